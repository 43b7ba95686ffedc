//! Per-frame simulation step
//!
//! Advances the game by one tick. Time is injected as an absolute `now_ms`
//! so tests can drive it deterministically.

use glam::Vec2;

use super::collision::{resolve_enemy_bullets, resolve_player_bullets};
use super::spawn::{explode, maybe_spawn_enemy};
use super::state::{Bullet, EnemyState, GameEvent, GameState, ParticleColor};
use crate::aim_velocity;
use crate::consts::AUTOPILOT_FIRE_INTERVAL_MS;

/// Held movement directions. Axes are independent and additive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub movement: MoveInput,
    /// Pointer clicks since the last tick, in arena coordinates
    pub clicks: Vec<Vec2>,
    /// New game (restart button)
    pub restart: bool,
    /// Demo mode - fire at the nearest enemy automatically
    pub autopilot: bool,
}

/// Advance the game state by one tick at absolute time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if input.restart {
        state.reset(now_ms);
    }
    state.time_ms = now_ms;

    if !state.player.is_alive() {
        advance_death(state);
        update_particles(state);
        return;
    }

    move_player(state, input.movement);

    for &target in &input.clicks {
        fire_bullet(state, target);
    }
    if input.autopilot {
        autopilot_fire(state, now_ms);
    }

    advance_bullets(state);

    resolve_enemy_bullets(state);
    resolve_player_bullets(state, now_ms);

    let death_ms = state.tuning.enemy_death_ms;
    for enemy in &mut state.enemies {
        enemy.advance_death(now_ms, death_ms);
    }
    state.enemies.retain(|e| e.state != EnemyState::Removed);

    enemies_fire(state, now_ms);
    maybe_spawn_enemy(state, now_ms);
    update_particles(state);
}

/// Apply held keys and clamp to the arena. Diagonals are not normalized.
pub fn move_player(state: &mut GameState, movement: MoveInput) {
    let player = &mut state.player;
    if !player.is_alive() {
        return;
    }

    if movement.up {
        player.pos.y -= player.speed;
    }
    if movement.down {
        player.pos.y += player.speed;
    }
    if movement.left {
        player.pos.x -= player.speed;
    }
    if movement.right {
        player.pos.x += player.speed;
    }

    player.pos.x = player.pos.x.clamp(0.0, state.tuning.arena_width);
    player.pos.y = player.pos.y.clamp(0.0, state.tuning.arena_height);
}

/// Fire one bullet from the player toward `target`. Ignored once the player
/// is dead.
pub fn fire_bullet(state: &mut GameState, target: Vec2) -> bool {
    if !state.player.is_alive() {
        return false;
    }
    let origin = state.player.pos;
    state.bullets.push(Bullet {
        pos: origin,
        vel: aim_velocity(origin, target, state.tuning.bullet_speed),
        radius: state.tuning.bullet_radius,
    });
    true
}

/// Move both bullet stores and drop anything strictly outside the arena
fn advance_bullets(state: &mut GameState) {
    let (w, h) = (state.tuning.arena_width, state.tuning.arena_height);
    for b in state.bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
        b.advance();
    }
    state.bullets.retain(|b| crate::in_arena(b.pos, w, h));
    state.enemy_bullets.retain(|b| crate::in_arena(b.pos, w, h));
}

/// Active enemies shoot at the player on independent timers once the score
/// reaches the aggression threshold
fn enemies_fire(state: &mut GameState, now_ms: u64) {
    if !state.tuning.enemies_shoot(state.score) {
        return;
    }

    let target = state.player.pos;
    let interval = state.tuning.enemy_shot_interval_ms;
    let speed = state.tuning.enemy_bullet_speed;
    let radius = state.tuning.bullet_radius;

    for enemy in state.enemies.iter_mut().filter(|e| e.is_active()) {
        if now_ms.saturating_sub(enemy.last_shot) <= interval {
            continue;
        }
        state.enemy_bullets.push(Bullet {
            pos: enemy.pos,
            vel: aim_velocity(enemy.pos, target, speed),
            radius,
        });
        enemy.last_shot = now_ms;
        state.events.push(GameEvent::EnemyFired { id: enemy.id });
    }
}

/// Death sequence: one red burst on the first dead tick, then fade.
/// The burst comes on the first tick that *starts* dead, one tick after the
/// lethal hit.
fn advance_death(state: &mut GameState) {
    if !state.player.death_burst_done {
        state.player.death_burst_done = true;
        let pos = state.player.pos;
        explode(state, pos, ParticleColor::Red);
        state.events.push(GameEvent::PlayerDied { score: state.score });
        log::info!("Game over - final score {}", state.score);
    }
    state.player.alpha -= state.tuning.player_fade_per_tick;
}

fn update_particles(state: &mut GameState) {
    let fade = state.tuning.particle_fade_per_tick;
    for p in &mut state.particles {
        p.advance(fade);
    }
    state.particles.retain(|p| !p.is_expired());
}

/// Demo mode: shoot at the nearest active enemy, rate limited
fn autopilot_fire(state: &mut GameState, now_ms: u64) {
    if let Some(last) = state.last_autopilot_shot_ms
        && now_ms.saturating_sub(last) < AUTOPILOT_FIRE_INTERVAL_MS
    {
        return;
    }

    let origin = state.player.pos;
    let target = state
        .enemies
        .iter()
        .filter(|e| e.is_active())
        .min_by(|a, b| {
            a.pos
                .distance_squared(origin)
                .partial_cmp(&b.pos.distance_squared(origin))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos);

    if let Some(target) = target
        && fire_bullet(state, target)
    {
        state.last_autopilot_shot_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_enemy_at;
    use proptest::prelude::*;

    const FRAME: u64 = 16;

    fn still_bullet(pos: Vec2) -> Bullet {
        Bullet {
            pos,
            vel: Vec2::ZERO,
            radius: 5.0,
        }
    }

    fn held(up: bool, down: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            movement: MoveInput {
                up,
                down,
                left,
                right,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_movement_is_additive_and_clamped() {
        let mut state = GameState::new(1, 0);
        tick(&mut state, &held(true, false, false, true), FRAME);
        assert_eq!(state.player.pos, Vec2::new(404.0, 296.0));

        // Opposite keys cancel
        tick(&mut state, &held(true, true, true, true), FRAME * 2);
        assert_eq!(state.player.pos, Vec2::new(404.0, 296.0));

        state.player.pos = Vec2::new(2.0, 598.0);
        tick(&mut state, &held(false, true, true, false), FRAME * 3);
        assert_eq!(state.player.pos, Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_click_fires_bullet() {
        let mut state = GameState::new(1, 0);
        let input = TickInput {
            clicks: vec![Vec2::new(500.0, 300.0), Vec2::new(400.0, 200.0)],
            ..Default::default()
        };
        tick(&mut state, &input, FRAME);
        // Both bullets already moved once this tick
        assert_eq!(state.bullets.len(), 2);
        assert!((state.bullets[0].pos - Vec2::new(407.0, 300.0)).length() < 1e-4);
        assert!((state.bullets[1].pos - Vec2::new(400.0, 293.0)).length() < 1e-4);
        assert_eq!(state.bullets[0].radius, 5.0);
    }

    #[test]
    fn test_bullets_pruned_only_outside_arena() {
        let mut state = GameState::new(1, 0);
        state.bullets.push(Bullet {
            pos: Vec2::new(793.0, 300.0),
            vel: Vec2::new(7.0, 0.0),
            radius: 5.0,
        });
        state.enemy_bullets.push(Bullet {
            pos: Vec2::new(10.0, 3.0),
            vel: Vec2::new(0.0, -4.0),
            radius: 5.0,
        });

        tick(&mut state, &TickInput::default(), FRAME);
        // Exactly on the edge stays
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 800.0);
        assert!(state.enemy_bullets.is_empty());

        tick(&mut state, &TickInput::default(), FRAME * 2);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_death_timing() {
        let mut state = GameState::new(1, 0);
        spawn_enemy_at(&mut state, Vec2::new(100.0, 100.0), 0);
        state.bullets.push(still_bullet(Vec2::new(100.0, 100.0)));

        tick(&mut state, &TickInput::default(), 1000);
        assert_eq!(state.enemies[0].state, EnemyState::Dying { started_ms: 1000 });
        assert_eq!(state.score, 100);

        let mut last_alpha = state.enemies[0].alpha;
        for now in [1100, 1250, 1399, 1400] {
            tick(&mut state, &TickInput::default(), now);
            assert_eq!(state.enemies.len(), 1, "enemy should remain at {now}");
            let e = &state.enemies[0];
            assert!(e.alpha < last_alpha);
            assert_eq!(e.alpha, e.scale);
            last_alpha = e.alpha;
        }

        tick(&mut state, &TickInput::default(), 1401);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_scenario_ten_hits_kill_player() {
        let mut state = GameState::new(1, 0);
        for _ in 0..10 {
            state.enemy_bullets.push(still_bullet(Vec2::new(400.0, 300.0)));
        }
        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.player.health, 0);
        assert!(state.is_game_over());
        assert!(state.enemy_bullets.is_empty());

        // First dead tick: one red burst, fade starts
        tick(&mut state, &held(true, false, true, false), FRAME * 2);
        let red = state
            .particles
            .iter()
            .filter(|p| p.color == ParticleColor::Red)
            .count();
        assert_eq!(red, 15);
        assert!((state.player.alpha - 0.99).abs() < 1e-6);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!(state
            .drain_events()
            .contains(&GameEvent::PlayerDied { score: 0 }));

        // No second burst; still frozen
        for i in 3..10 {
            tick(&mut state, &held(false, true, false, true), FRAME * i);
        }
        assert!(state.particles.len() <= 15);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert!((state.player.alpha - 0.92).abs() < 1e-4);
    }

    #[test]
    fn test_dead_player_freezes_world() {
        let mut state = GameState::new(1, 0);
        state.player.health = 0;
        spawn_enemy_at(&mut state, Vec2::new(100.0, 100.0), 0);
        state.bullets.push(Bullet {
            pos: Vec2::new(300.0, 300.0),
            vel: Vec2::new(7.0, 0.0),
            radius: 5.0,
        });
        let clicks = TickInput {
            clicks: vec![Vec2::new(0.0, 0.0)],
            ..Default::default()
        };

        tick(&mut state, &clicks, 10_000);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_death_particles_keep_animating() {
        let mut state = GameState::new(1, 0);
        state.player.health = -10;
        tick(&mut state, &TickInput::default(), FRAME);
        let life = state.particles[0].life;
        tick(&mut state, &TickInput::default(), FRAME * 2);
        assert_eq!(state.particles[0].life, life - 1);

        for i in 3..40 {
            tick(&mut state, &TickInput::default(), FRAME * i);
        }
        assert!(state.particles.is_empty());
        // Alpha keeps dropping with no floor
        for i in 40..200 {
            tick(&mut state, &TickInput::default(), FRAME * i);
        }
        assert!(state.player.alpha < 0.0);
    }

    #[test]
    fn test_scenario_reset() {
        let mut state = GameState::new(1, 0);
        state.player.pos = Vec2::new(10.0, 20.0);
        state.player.health = -30;
        state.player.alpha = 0.2;
        state.player.death_burst_done = true;
        state.score = 700;
        state.bullets.push(still_bullet(Vec2::new(1.0, 1.0)));
        state.enemy_bullets.push(still_bullet(Vec2::new(1.0, 1.0)));
        spawn_enemy_at(&mut state, Vec2::new(50.0, 50.0), 0);
        explode(&mut state, Vec2::ZERO, ParticleColor::Orange);

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, 5000);

        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.alpha, 1.0);
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.last_spawn_ms, 5000);
    }

    fn shots_over_window(score: u64) -> usize {
        let mut state = GameState::new(1, 0);
        state.score = score;
        spawn_enemy_at(&mut state, Vec2::new(100.0, 100.0), 0);
        let mut fired = 0;
        let mut now = 0;
        while now <= 2000 {
            tick(&mut state, &TickInput::default(), now);
            fired += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyFired { .. }))
                .count();
            now += FRAME;
        }
        fired
    }

    #[test]
    fn test_scenario_aggression_threshold() {
        assert_eq!(shots_over_window(499), 0);
        assert!(shots_over_window(500) >= 1);
    }

    #[test]
    fn test_enemy_bullet_aims_at_player() {
        let mut state = GameState::new(1, 0);
        state.score = 500;
        spawn_enemy_at(&mut state, Vec2::new(100.0, 300.0), 0);
        tick(&mut state, &TickInput::default(), 1501);
        assert_eq!(state.enemy_bullets.len(), 1);
        // Fired after the bullet pass, so it has not moved yet
        let b = state.enemy_bullets[0];
        assert_eq!(b.pos, Vec2::new(100.0, 300.0));
        assert!((b.vel - Vec2::new(4.0, 0.0)).length() < 1e-5);
        assert_eq!(state.enemies[0].last_shot, 1501);
    }

    fn fired_ids(state: &mut GameState) -> Vec<u32> {
        state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::EnemyFired { id } => Some(id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_enemy_shot_timers_are_independent() {
        let mut state = GameState::new(1, 0);
        state.score = 500;
        let a = spawn_enemy_at(&mut state, Vec2::new(100.0, 100.0), 0);
        let b = spawn_enemy_at(&mut state, Vec2::new(700.0, 100.0), 1000);
        let c = spawn_enemy_at(&mut state, Vec2::new(100.0, 500.0), 0);
        state.enemies[2].start_dying(1400);
        state.events.clear();

        tick(&mut state, &TickInput::default(), 1501);
        assert_eq!(fired_ids(&mut state), vec![a]);
        assert_eq!(state.enemies[0].last_shot, 1501);
        assert_eq!(state.enemies[1].last_shot, 1000);
        // Dying enemies never shoot
        assert_eq!(state.enemies[2].id, c);
        assert_eq!(state.enemies[2].last_shot, 0);

        tick(&mut state, &TickInput::default(), 2501);
        assert_eq!(fired_ids(&mut state), vec![b]);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.enemies[0].last_shot, 1501);
        assert_eq!(state.enemies[1].last_shot, 2501);
    }

    #[test]
    fn test_spawner_runs_in_tick() {
        let mut state = GameState::new(1, 0);
        tick(&mut state, &TickInput::default(), 3000);
        assert!(state.enemies.is_empty());
        tick(&mut state, &TickInput::default(), 3001);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].visible_until, 5001);
    }

    #[test]
    fn test_autopilot_targets_nearest_enemy() {
        let mut state = GameState::new(1, 0);
        spawn_enemy_at(&mut state, Vec2::new(700.0, 300.0), 0);
        spawn_enemy_at(&mut state, Vec2::new(400.0, 500.0), 0);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        tick(&mut state, &input, FRAME);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.bullets[0].vel.x.abs() < 1e-4);
        assert!(state.bullets[0].vel.y > 0.0);

        // Rate limited
        tick(&mut state, &input, FRAME * 2);
        assert_eq!(state.bullets.len(), 1);
        tick(&mut state, &input, FRAME + AUTOPILOT_FIRE_INTERVAL_MS);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, 0);
        let mut state2 = GameState::new(99999, 0);
        let input = TickInput {
            autopilot: true,
            movement: MoveInput {
                left: true,
                ..Default::default()
            },
            ..Default::default()
        };

        for i in 0..1000 {
            tick(&mut state1, &input, i * FRAME);
            tick(&mut state2, &input, i * FRAME);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.particles.len(), state2.particles.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
        }
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_arena(
            moves in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
                1..300,
            )
        ) {
            let mut state = GameState::new(5, 0);
            for (i, (up, down, left, right)) in moves.into_iter().enumerate() {
                tick(&mut state, &held(up, down, left, right), i as u64 * FRAME);
                let p = state.player.pos;
                prop_assert!(p.x >= 0.0 && p.x <= 800.0);
                prop_assert!(p.y >= 0.0 && p.y <= 600.0);
            }
        }

        #[test]
        fn prop_bullet_heads_for_click(
            px in 0.0f32..800.0,
            py in 0.0f32..600.0,
            mx in -200.0f32..1000.0,
            my in -200.0f32..800.0,
        ) {
            let origin = Vec2::new(px, py);
            let target = Vec2::new(mx, my);
            prop_assume!(origin.distance(target) > 1e-2);

            let mut state = GameState::new(5, 0);
            state.player.pos = origin;
            prop_assert!(fire_bullet(&mut state, target));

            let b = state.bullets[0];
            let expected = (target - origin).normalize() * 7.0;
            prop_assert_eq!(b.pos, origin);
            prop_assert!((b.vel - expected).length() < 1e-3);
        }

        #[test]
        fn prop_score_never_decreases(
            clicks in proptest::collection::vec(
                proptest::option::of((0.0f32..800.0, 0.0f32..600.0)),
                1..400,
            )
        ) {
            let mut tuning = crate::tuning::Tuning::default();
            tuning.spawn_interval_ms = 100;
            let mut state = GameState::with_tuning(11, tuning, 0);
            let mut last = 0;
            for (i, click) in clicks.into_iter().enumerate() {
                let input = TickInput {
                    clicks: click.map(|(x, y)| Vec2::new(x, y)).into_iter().collect(),
                    autopilot: i % 2 == 0,
                    ..Default::default()
                };
                tick(&mut state, &input, i as u64 * FRAME);
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }
    }
}
