//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key identifiers, pointer clicks)
//! - Time/ticks

pub mod input;
pub mod time;

pub use input::{InputState, Key};
pub use time::{Clock, ManualClock};
