//! Presentation module
//!
//! Builds a backend-neutral draw list from a read-only borrow of the game
//! state. The browser driver replays it onto a Canvas 2D context.

pub mod draw_list;

pub use draw_list::{DrawCmd, DrawList, build_frame};

/// Colors for game elements (CSS color strings)
pub mod colors {
    pub const PLAYER_BULLET: &str = "yellow";
    pub const ENEMY_BULLET: &str = "red";
    pub const HUD_TEXT: &str = "white";
    pub const GAME_OVER: &str = "red";
    pub const PLAYER_PLACEHOLDER: &str = "deepskyblue";
    pub const ENEMY_PLACEHOLDER: &str = "mediumpurple";
}

/// HUD fonts
pub mod fonts {
    pub const HUD: &str = "24px Arial";
    pub const BANNER: &str = "48px Arial";
}
