//! Game balance table
//!
//! Every number here is compiled in. `GameState` carries a copy so tests can
//! build shortened scenarios without touching the constants.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance values consumed by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,

    pub player_speed: f32,
    pub player_size: f32,
    pub player_max_health: i32,
    pub player_fade_per_tick: f32,

    pub bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub bullet_radius: f32,
    pub enemy_bullet_damage: i32,

    pub enemy_size: f32,
    pub spawn_interval_ms: u64,
    pub enemy_shot_interval_ms: u64,
    pub enemy_death_ms: u64,
    pub visible_window_ms: u64,
    pub visible_window_hard_ms: u64,
    pub kill_score: u64,

    /// Score at which the enemy visibility window shrinks
    pub stealth_score: u64,
    /// Score at which enemies start shooting back
    pub aggression_score: u64,

    pub explosion_particles: usize,
    pub particle_life: i32,
    pub particle_fade_per_tick: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_size: PLAYER_SIZE,
            player_max_health: PLAYER_MAX_HEALTH,
            player_fade_per_tick: PLAYER_FADE_PER_TICK,

            bullet_speed: BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            enemy_bullet_damage: ENEMY_BULLET_DAMAGE,

            enemy_size: ENEMY_SIZE,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            enemy_shot_interval_ms: ENEMY_SHOT_INTERVAL_MS,
            enemy_death_ms: ENEMY_DEATH_MS,
            visible_window_ms: VISIBLE_WINDOW_MS,
            visible_window_hard_ms: VISIBLE_WINDOW_HARD_MS,
            kill_score: KILL_SCORE,

            stealth_score: STEALTH_SCORE,
            aggression_score: AGGRESSION_SCORE,

            explosion_particles: EXPLOSION_PARTICLES,
            particle_life: PARTICLE_LIFE,
            particle_fade_per_tick: PARTICLE_FADE_PER_TICK,
        }
    }
}

impl Tuning {
    /// Arena center, where the player starts
    pub fn arena_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// How long a fresh enemy stays fully visible at the given score
    pub fn visible_window(&self, score: u64) -> u64 {
        if score >= self.stealth_score {
            self.visible_window_hard_ms
        } else {
            self.visible_window_ms
        }
    }

    /// Whether enemies return fire at the given score
    pub fn enemies_shoot(&self, score: u64) -> bool {
        score >= self.aggression_score
    }
}
