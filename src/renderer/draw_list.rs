//! Draw list generation

use glam::Vec2;

use super::{colors, fonts};
use crate::assets::{SpriteAtlas, SpriteKind};
use crate::consts::{HIDDEN_ENEMY_ALPHA, SPRITE_DISPLAY_SIZE};
use crate::sim::GameState;

/// One paint operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        width: f32,
        height: f32,
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: &'static str,
        alpha: f32,
    },
    /// Sprite drawn at `SPRITE_DISPLAY_SIZE`, top-left at `center - offset`
    /// before scaling about `center`
    Sprite {
        kind: SpriteKind,
        center: Vec2,
        offset: f32,
        size: f32,
        alpha: f32,
        scale: f32,
    },
    /// Stand-in for a sprite that failed or has not loaded yet
    Placeholder {
        kind: SpriteKind,
        center: Vec2,
        radius: f32,
        color: &'static str,
        alpha: f32,
        scale: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        font: &'static str,
        color: &'static str,
    },
}

/// Ordered paint operations for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands.iter()
    }

    fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    fn sprite(
        &mut self,
        atlas: &SpriteAtlas,
        kind: SpriteKind,
        center: Vec2,
        offset: f32,
        alpha: f32,
        scale: f32,
    ) {
        // Canvas ignores out-of-range globalAlpha, so clamp here
        let alpha = alpha.clamp(0.0, 1.0);
        let scale = scale.max(0.0);
        if atlas.is_ready(kind) {
            self.push(DrawCmd::Sprite {
                kind,
                center,
                offset,
                size: SPRITE_DISPLAY_SIZE,
                alpha,
                scale,
            });
        } else {
            let color = match kind {
                SpriteKind::Player => colors::PLAYER_PLACEHOLDER,
                SpriteKind::Enemy => colors::ENEMY_PLACEHOLDER,
            };
            self.push(DrawCmd::Placeholder {
                kind,
                center,
                radius: offset,
                color,
                alpha,
                scale,
            });
        }
    }
}

/// Build the frame for `state` as seen at `now_ms`
pub fn build_frame(state: &GameState, atlas: &SpriteAtlas, now_ms: u64) -> DrawList {
    let mut list = DrawList::default();
    let tuning = &state.tuning;

    list.push(DrawCmd::Clear {
        width: tuning.arena_width,
        height: tuning.arena_height,
    });

    for p in &state.particles {
        list.push(DrawCmd::Circle {
            center: p.pos,
            radius: p.radius,
            color: p.color.as_css(),
            alpha: p.alpha.clamp(0.0, 1.0),
        });
    }

    let player = &state.player;
    list.sprite(atlas, SpriteKind::Player, player.pos, player.size, player.alpha, 1.0);

    for b in &state.bullets {
        list.push(DrawCmd::Circle {
            center: b.pos,
            radius: b.radius,
            color: colors::PLAYER_BULLET,
            alpha: 1.0,
        });
    }
    for b in &state.enemy_bullets {
        list.push(DrawCmd::Circle {
            center: b.pos,
            radius: b.radius,
            color: colors::ENEMY_BULLET,
            alpha: 1.0,
        });
    }

    for e in &state.enemies {
        let alpha = e.opacity_at(now_ms, HIDDEN_ENEMY_ALPHA);
        list.sprite(atlas, SpriteKind::Enemy, e.pos, e.size, alpha, e.scale);
    }

    list.push(DrawCmd::Text {
        text: format!("Score: {}", state.score),
        pos: Vec2::new(20.0, 30.0),
        font: fonts::HUD,
        color: colors::HUD_TEXT,
    });
    list.push(DrawCmd::Text {
        text: format!("Health: {}", player.health),
        pos: Vec2::new(20.0, 60.0),
        font: fonts::HUD,
        color: colors::HUD_TEXT,
    });

    if state.is_game_over() {
        list.push(DrawCmd::Text {
            text: "GAME OVER".to_string(),
            pos: Vec2::new(tuning.arena_width / 2.0 - 150.0, tuning.arena_height / 2.0),
            font: fonts::BANNER,
            color: colors::GAME_OVER,
        });
    }

    list
}
