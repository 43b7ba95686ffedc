//! Collision detection and damage resolution
//!
//! Everything is circle-vs-circle: two bodies touch when the distance between
//! their centers is strictly less than the sum of their radii. Exactly at the
//! threshold is a miss.

use glam::Vec2;

use super::spawn::explode;
use super::state::{GameEvent, GameState, ParticleColor};

/// Strict circle proximity test
#[inline]
pub fn circles_touch(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Enemy bullets vs the player.
///
/// Every touching bullet is consumed and deals damage, so several hits in one
/// tick stack. Returns the number of hits.
pub fn resolve_enemy_bullets(state: &mut GameState) -> u32 {
    let damage = state.tuning.enemy_bullet_damage;
    let player = &mut state.player;
    let events = &mut state.events;
    let mut hits = 0;

    state.enemy_bullets.retain(|b| {
        if circles_touch(b.pos, b.radius, player.pos, player.size) {
            player.health -= damage;
            hits += 1;
            events.push(GameEvent::PlayerHit {
                health: player.health,
            });
            false
        } else {
            true
        }
    });

    if hits > 0 {
        log::debug!("Player took {} hit(s), health {}", hits, state.player.health);
    }
    hits
}

/// Player bullets vs enemies.
///
/// Each bullet kills at most one enemy: the first active enemy in store order
/// that it touches. Dying enemies are skipped. The bullet is consumed on a
/// hit. Returns the number of kills.
pub fn resolve_player_bullets(state: &mut GameState, now_ms: u64) -> u32 {
    let mut kills = 0;
    let mut i = 0;

    while i < state.bullets.len() {
        let bullet = state.bullets[i];
        let target = state.enemies.iter().position(|e| {
            e.is_active() && circles_touch(bullet.pos, bullet.radius, e.pos, e.size)
        });

        let Some(idx) = target else {
            i += 1;
            continue;
        };

        let enemy = &mut state.enemies[idx];
        enemy.start_dying(now_ms);
        let (id, pos) = (enemy.id, enemy.pos);

        explode(state, pos, ParticleColor::Orange);
        let before = state.score;
        state.score += state.tuning.kill_score;
        announce_thresholds(state, before);
        state.events.push(GameEvent::EnemyKilled {
            id,
            score: state.score,
        });
        log::info!("Enemy {} destroyed, score {}", id, state.score);

        state.bullets.remove(i);
        kills += 1;
    }

    kills
}

/// Log difficulty changes when the score crosses a threshold
fn announce_thresholds(state: &GameState, before: u64) {
    let t = &state.tuning;
    if before < t.stealth_score && state.score >= t.stealth_score {
        log::info!("Score {}: enemies now hide after {}ms", state.score, t.visible_window_hard_ms);
    }
    if before < t.aggression_score && state.score >= t.aggression_score {
        log::info!("Score {}: enemies return fire", state.score);
    }
}
