//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time is injected, never read from a wall clock
//! - Seeded RNG only
//! - Stable iteration order (store insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_touch, resolve_enemy_bullets, resolve_player_bullets};
pub use spawn::{explode, maybe_spawn_enemy, spawn_enemy, spawn_enemy_at};
pub use state::{
    Bullet, Enemy, EnemyState, GameEvent, GameState, Particle, ParticleColor, Player,
};
pub use tick::{MoveInput, TickInput, fire_bullet, move_player, tick};
