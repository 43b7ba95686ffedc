//! Stealth Arena - a single-screen arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, lifecycle)
//! - `renderer`: Read-only draw list built from the game state
//! - `platform`: Input mapping and injected clocks
//! - `assets`: Sprite slots with placeholder fallback
//! - `tuning`: Game balance table

pub mod assets;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use assets::{AssetError, SpriteAtlas, SpriteKind, SpriteSlot};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (fixed, no resize handling)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Nominal frame length used by headless drivers (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Alpha lost per tick while the player fades out after death
    pub const PLAYER_FADE_PER_TICK: f32 = 0.01;

    /// Projectiles
    pub const BULLET_SPEED: f32 = 7.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const ENEMY_BULLET_DAMAGE: i32 = 10;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const SPAWN_INTERVAL_MS: u64 = 3000;
    pub const ENEMY_SHOT_INTERVAL_MS: u64 = 1500;
    pub const ENEMY_DEATH_MS: u64 = 400;
    pub const VISIBLE_WINDOW_MS: u64 = 2000;
    pub const VISIBLE_WINDOW_HARD_MS: u64 = 1000;
    /// Opacity of an enemy once its visibility window has closed
    pub const HIDDEN_ENEMY_ALPHA: f32 = 0.1;
    pub const KILL_SCORE: u64 = 100;

    /// Difficulty thresholds
    pub const STEALTH_SCORE: u64 = 300;
    pub const AGGRESSION_SCORE: u64 = 500;

    /// Explosions
    pub const EXPLOSION_PARTICLES: usize = 15;
    pub const PARTICLE_LIFE: i32 = 30;
    pub const PARTICLE_FADE_PER_TICK: f32 = 0.03;
    /// Particle velocity spread per axis (velocity in [-SPREAD/2, SPREAD/2))
    pub const PARTICLE_SPREAD: f32 = 6.0;
    pub const PARTICLE_MIN_RADIUS: f32 = 5.0;
    pub const PARTICLE_RADIUS_JITTER: f32 = 5.0;

    /// Sprites are drawn at a fixed size regardless of native resolution
    pub const SPRITE_DISPLAY_SIZE: f32 = 64.0;

    /// Demo-mode fire rate
    pub const AUTOPILOT_FIRE_INTERVAL_MS: u64 = 250;
}

/// Velocity of magnitude `speed` pointing from `from` toward `to`.
///
/// Uses the angle form (`atan2`, then `cos`/`sin`) so a zero-length aim
/// still yields a defined velocity along +x.
#[inline]
pub fn aim_velocity(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Whether a point lies inside the arena, edges included
#[inline]
pub fn in_arena(pos: Vec2, width: f32, height: f32) -> bool {
    pos.x >= 0.0 && pos.x <= width && pos.y >= 0.0 && pos.y <= height
}
