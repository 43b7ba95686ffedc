//! Sprite assets
//!
//! Loading happens outside the simulation (the browser decodes images
//! asynchronously). A failed sprite is not fatal: the renderer draws a
//! placeholder shape in its place and the game keeps running.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a sprite is unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("sprite {path} failed to load")]
    LoadFailed { path: String },
    #[error("sprite {path} decoded to an empty image")]
    EmptyImage { path: String },
}

/// The two sprites the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Enemy,
}

impl SpriteKind {
    pub fn path(&self) -> &'static str {
        match self {
            SpriteKind::Player => "player.png",
            SpriteKind::Enemy => "enemy.png",
        }
    }
}

/// Load status of one sprite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpriteSlot {
    #[default]
    Pending,
    /// Decoded; always drawn at the fixed display size
    Ready,
    Failed(AssetError),
}

impl SpriteSlot {
    pub fn is_ready(&self) -> bool {
        matches!(self, SpriteSlot::Ready)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpriteAtlas {
    player: SpriteSlot,
    enemy: SpriteSlot,
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atlas with both sprites usable (headless drivers, tests)
    pub fn ready() -> Self {
        Self {
            player: SpriteSlot::Ready,
            enemy: SpriteSlot::Ready,
        }
    }

    pub fn slot(&self, kind: SpriteKind) -> &SpriteSlot {
        match kind {
            SpriteKind::Player => &self.player,
            SpriteKind::Enemy => &self.enemy,
        }
    }

    fn slot_mut(&mut self, kind: SpriteKind) -> &mut SpriteSlot {
        match kind {
            SpriteKind::Player => &mut self.player,
            SpriteKind::Enemy => &mut self.enemy,
        }
    }

    pub fn is_ready(&self, kind: SpriteKind) -> bool {
        self.slot(kind).is_ready()
    }

    /// Record a decoded image. A zero-sized image counts as a failure.
    pub fn mark_loaded(&mut self, kind: SpriteKind, width: u32, height: u32) -> Result<(), AssetError> {
        if width == 0 || height == 0 {
            let err = AssetError::EmptyImage {
                path: kind.path().to_string(),
            };
            self.mark_failed(kind, err.clone());
            return Err(err);
        }
        log::info!("Loaded {} ({}x{})", kind.path(), width, height);
        *self.slot_mut(kind) = SpriteSlot::Ready;
        Ok(())
    }

    pub fn mark_failed(&mut self, kind: SpriteKind, err: AssetError) {
        log::warn!("{}; drawing placeholder instead", err);
        *self.slot_mut(kind) = SpriteSlot::Failed(err);
    }
}
