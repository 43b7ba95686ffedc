//! Enemy spawner and explosion bursts

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyState, GameEvent, GameState, Particle, ParticleColor};
use crate::consts::{PARTICLE_MIN_RADIUS, PARTICLE_RADIUS_JITTER, PARTICLE_SPREAD};

/// Fixed-period spawner: at most one enemy per tick, and only once more than
/// `spawn_interval_ms` has passed since the previous spawn. A long tick never
/// produces a backlog.
///
/// Returns whether an enemy was spawned.
pub fn maybe_spawn_enemy(state: &mut GameState, now_ms: u64) -> bool {
    if now_ms.saturating_sub(state.last_spawn_ms) <= state.tuning.spawn_interval_ms {
        return false;
    }
    spawn_enemy(state, now_ms);
    state.last_spawn_ms = now_ms;
    true
}

/// Append one enemy at a uniformly random arena position
pub fn spawn_enemy(state: &mut GameState, now_ms: u64) -> u32 {
    let x = state.rng.random::<f32>() * state.tuning.arena_width;
    let y = state.rng.random::<f32>() * state.tuning.arena_height;
    spawn_enemy_at(state, Vec2::new(x, y), now_ms)
}

/// Append one enemy at `pos`. Visibility window depends on the current score.
pub fn spawn_enemy_at(state: &mut GameState, pos: Vec2, now_ms: u64) -> u32 {
    let id = state.next_entity_id();
    let visible_until = now_ms + state.tuning.visible_window(state.score);
    state.enemies.push(Enemy {
        id,
        pos,
        size: state.tuning.enemy_size,
        visible_until,
        last_shot: now_ms,
        state: EnemyState::Active,
        alpha: 1.0,
        scale: 1.0,
    });
    state.events.push(GameEvent::EnemySpawned { id, pos });
    log::debug!("Enemy {} spawned at ({:.0}, {:.0}), visible until {}", id, pos.x, pos.y, visible_until);
    id
}

/// Emit a burst of particles at `pos`
pub fn explode(state: &mut GameState, pos: Vec2, color: ParticleColor) {
    let count = state.tuning.explosion_particles;
    let life = state.tuning.particle_life;
    state.particles.reserve(count);
    for _ in 0..count {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            (state.rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        );
        let radius = PARTICLE_MIN_RADIUS + state.rng.random::<f32>() * PARTICLE_RADIUS_JITTER;
        state.particles.push(Particle {
            pos,
            vel,
            radius,
            color,
            alpha: 1.0,
            life,
        });
    }
}
