//! Geometry state and core simulation types
//!
//! Every scalar the simulation mutates lives in one owned [`GeometryState`],
//! created fresh for each match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_paddle_x;
use crate::consts::*;
use crate::settings::DevicePreset;

/// One side of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The human, defending the bottom edge
    Player,
    /// The scripted paddle, defending the top edge
    Opponent,
}

impl Side {
    /// Label shown on the game-over screen
    pub fn label(&self) -> &'static str {
        match self {
            Side::Player => "Player 1",
            Side::Opponent => "Computer",
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            radius: BALL_RADIUS,
        }
    }
}

/// A paddle. Only x moves; y, width and height are constants per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self { x: PADDLE_START_X }
    }
}

impl Paddle {
    /// Whether `x` lies strictly inside the paddle's horizontal span
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + PADDLE_WIDTH
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub player: u32,
    pub opponent: u32,
}

impl Scores {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    /// Set by the first pointer move of the match; gates speed-up, drift and the opponent
    pub player_has_moved: bool,
    /// Ball touched the player paddle since the last point reset
    pub ball_touched_player_paddle: bool,
}

/// Complete simulation state for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryState {
    pub ball: Ball,
    pub player_paddle: Paddle,
    pub opponent_paddle: Paddle,
    /// `y` is measured toward the opponent's edge: each frame `ball.y -= velocity.y`.
    /// `x` is screen-space.
    pub velocity: Vec2,
    pub scores: Scores,
    pub flags: Flags,
    /// Opponent step per frame, fixed for the match
    pub ai_speed: f32,
}

impl Default for GeometryState {
    fn default() -> Self {
        Self::new(DevicePreset::Standard)
    }
}

impl GeometryState {
    /// Fresh match state for a device-class preset
    pub fn new(preset: DevicePreset) -> Self {
        let speed_y = preset.initial_speed_y();
        Self {
            ball: Ball::default(),
            player_paddle: Paddle::default(),
            opponent_paddle: Paddle::default(),
            // Horizontal speed starts equal to the vertical preset
            velocity: Vec2::new(speed_y, speed_y),
            scores: Scores::default(),
            flags: Flags::default(),
            ai_speed: preset.ai_speed(),
        }
    }

    /// Point reset: ball back to centre, serving toward the player.
    ///
    /// `velocity.x` carries over from the previous rally.
    pub fn reset(&mut self) {
        self.ball.pos = Vec2::new(BALL_START_X, BALL_START_Y);
        self.velocity.y = RESET_SPEED_Y;
        self.flags.ball_touched_player_paddle = false;
    }

    /// Input port: move the player's paddle (field coordinates, clamped)
    pub fn set_player_paddle_x(&mut self, x: f32) {
        self.flags.player_has_moved = true;
        self.player_paddle.x = clamp_paddle_x(x);
    }

    /// Move the ball by one frame of velocity.
    ///
    /// Horizontal drift only applies once the player is engaged and has hit the ball.
    pub fn advance_ball(&mut self) {
        self.ball.pos.y -= self.velocity.y;
        if self.flags.player_has_moved && self.flags.ball_touched_player_paddle {
            self.ball.pos.x += self.velocity.x;
        }
    }
}
