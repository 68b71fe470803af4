//! Seeded stand-in for the human player
//!
//! Drives the player paddle in demo/idle mode and in the headless native run.
//! It follows the ball with an aim error that is re-rolled once per rally, so
//! it returns most balls, misses some, and produces varied spin.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::GeometryState;
use crate::consts::PADDLE_OFFSET;

/// Largest aim error in field units. Past the paddle's half width it misses.
pub const MAX_AIM_ERROR: f32 = 32.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    aim_error: f32,
    /// Ball direction seen last frame (true = heading toward the player)
    incoming: bool,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aim_error: 0.0,
            incoming: false,
        }
    }

    /// Current aim error, for logging
    pub fn aim_error(&self) -> f32 {
        self.aim_error
    }

    /// Paddle target for this frame, in field coordinates
    pub fn target_x(&mut self, state: &GeometryState) -> f32 {
        let incoming = state.velocity.y < 0.0;
        if incoming && !self.incoming {
            self.aim_error = self.rng.random_range(-MAX_AIM_ERROR..=MAX_AIM_ERROR);
        }
        self.incoming = incoming;

        state.ball.pos.x - PADDLE_OFFSET + self.aim_error
    }
}
