//! Game state and core simulation types
//!
//! Everything the simulation step mutates lives in [`GameState`]. Presentation
//! only ever borrows it immutably.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    /// Collision radius
    pub size: f32,
    /// Goes negative when several hits land in one tick
    pub health: i32,
    /// Fade-out alpha, only moves during the death animation (1 -> 0, unclamped)
    pub alpha: f32,
    /// Set once the death explosion has been emitted
    #[serde(default)]
    pub death_burst_done: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.arena_center(),
            speed: tuning.player_speed,
            size: tuning.player_size,
            health: tuning.player_max_health,
            alpha: 1.0,
            death_burst_done: false,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// A projectile. Player and enemy bullets share the shape but live in
/// separate stores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Bullet {
    /// Integrate one tick of motion
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// Enemy lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Alive, can be hit and can shoot
    Active,
    /// Hit; fading and shrinking until `started_ms + death duration`
    Dying { started_ms: u64 },
    /// Death animation finished, pruned at the end of the pass
    Removed,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Absolute time after which the enemy drops to near-invisible
    pub visible_until: u64,
    /// Absolute time of the last shot (spawn time until the first one)
    pub last_shot: u64,
    pub state: EnemyState,
    /// Derived from the death animation; 1.0 while active
    pub alpha: f32,
    pub scale: f32,
}

impl Enemy {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == EnemyState::Active
    }

    #[inline]
    pub fn is_dying(&self) -> bool {
        matches!(self.state, EnemyState::Dying { .. })
    }

    /// Active -> Dying. No-op for any other state.
    pub fn start_dying(&mut self, now_ms: u64) {
        if self.is_active() {
            self.state = EnemyState::Dying { started_ms: now_ms };
        }
    }

    /// Advance the death animation; Dying -> Removed once `elapsed > duration_ms`
    pub fn advance_death(&mut self, now_ms: u64, duration_ms: u64) {
        if let EnemyState::Dying { started_ms } = self.state {
            let elapsed = now_ms.saturating_sub(started_ms);
            if elapsed > duration_ms {
                self.state = EnemyState::Removed;
                return;
            }
            let t = 1.0 - elapsed as f32 / duration_ms as f32;
            self.alpha = t;
            self.scale = t;
        }
    }

    /// Opacity the renderer should use at `now_ms`
    pub fn opacity_at(&self, now_ms: u64, hidden_alpha: f32) -> f32 {
        match self.state {
            EnemyState::Active if now_ms < self.visible_until => 1.0,
            EnemyState::Active => hidden_alpha,
            EnemyState::Dying { .. } | EnemyState::Removed => self.alpha,
        }
    }
}

/// Explosion colour tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Enemy death
    Orange,
    /// Player death
    Red,
}

impl ParticleColor {
    pub fn as_css(&self) -> &'static str {
        match self {
            ParticleColor::Orange => "orange",
            ParticleColor::Red => "red",
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: ParticleColor,
    pub alpha: f32,
    /// Remaining ticks
    pub life: i32,
}

impl Particle {
    pub fn advance(&mut self, fade: f32) {
        self.pos += self.vel;
        self.alpha -= fade;
        self.life -= 1;
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life <= 0 || self.alpha <= 0.0
    }
}

/// Notable things that happened during a tick (not gameplay-affecting)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, pos: Vec2 },
    EnemyFired { id: u32 },
    EnemyKilled { id: u32, score: u64 },
    PlayerHit { health: i32 },
    PlayerDied { score: u64 },
}

/// Complete simulation state, exclusively owned by the tick
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    #[serde(skip)]
    pub rng: Pcg32,
    /// Never decreases between resets
    pub score: u64,
    /// `now` of the most recent tick
    pub time_ms: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub last_spawn_ms: u64,
    /// Last time the autopilot fired
    pub last_autopilot_shot_ms: Option<u64>,
    /// Events emitted since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed, starting at `now_ms`
    pub fn new(seed: u64, now_ms: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), now_ms)
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, now_ms: u64) -> Self {
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            time_ms: now_ms,
            player: Player::new(&tuning),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            last_spawn_ms: now_ms,
            last_autopilot_shot_ms: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// New game: player back to center at full health, score zeroed, every
    /// store cleared and the spawn timer restarted from `now_ms`.
    ///
    /// The RNG keeps its stream so consecutive games differ.
    pub fn reset(&mut self, now_ms: u64) {
        self.player = Player::new(&self.tuning);
        self.score = 0;
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.events.clear();
        self.last_spawn_ms = now_ms;
        self.last_autopilot_shot_ms = None;
        self.time_ms = now_ms;
        self.next_id = 1;
        log::info!("New game (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        !self.player.is_alive()
    }
}
