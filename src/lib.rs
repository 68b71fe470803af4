//! Duel Pong - a single-screen paddle duel against a scripted opponent
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (geometry, collisions, opponent, match phase)
//! - `scheduler`: One simulation step per display refresh, with an explicit stop
//! - `renderer`: WebGPU rendering pipeline
//! - `input`: Pointer to field coordinate translation
//! - `settings`: Device-class presets and persisted preferences

pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use scheduler::{FrameOutcome, FrameScheduler};
pub use settings::{DevicePreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (field units == canvas CSS pixels)
    pub const FIELD_WIDTH: f32 = 500.0;
    pub const FIELD_HEIGHT: f32 = 700.0;

    /// Paddle geometry
    pub const PADDLE_WIDTH: f32 = 50.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the top/bottom edge where a paddle's contact band begins.
    /// Also the reference point the opponent steers with.
    pub const PADDLE_OFFSET: f32 = 25.0;
    /// Paddles start centred horizontally
    pub const PADDLE_START_X: f32 = 225.0;
    /// Top edge of the player's paddle (drawn 20px above the bottom)
    pub const PLAYER_PADDLE_Y: f32 = FIELD_HEIGHT - 20.0;
    /// Top edge of the opponent's paddle
    pub const OPPONENT_PADDLE_Y: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    pub const BALL_START_X: f32 = FIELD_WIDTH / 2.0;
    pub const BALL_START_Y: f32 = FIELD_HEIGHT / 2.0;

    /// Vertical speed after a point is scored (toward the player)
    pub const RESET_SPEED_Y: f32 = -3.0;
    /// Vertical speed magnitude cap
    pub const MAX_SPEED: f32 = 5.0;
    /// Horizontal speed imparted per unit of trajectory offset on a player hit
    pub const SPIN_FACTOR: f32 = 0.3;

    /// Points needed to win a match
    pub const SCORE_TO_WIN: u32 = 10;
}

/// Clamp a paddle x into the field so the whole paddle stays visible
#[inline]
pub fn clamp_paddle_x(x: f32) -> f32 {
    x.min(consts::FIELD_WIDTH - consts::PADDLE_WIDTH).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_paddle_x() {
        assert_eq!(clamp_paddle_x(-40.0), 0.0);
        assert_eq!(clamp_paddle_x(120.0), 120.0);
        assert_eq!(clamp_paddle_x(480.0), 450.0);
    }
}
