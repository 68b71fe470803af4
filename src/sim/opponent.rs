//! Scripted opponent
//!
//! Chases the ball one fixed step per frame. No smoothing or prediction, so it
//! can jitter by one step around the ball and lose to fast diagonal returns.

use super::state::GeometryState;
use crate::clamp_paddle_x;
use crate::consts::PADDLE_OFFSET;

/// Step the opponent paddle toward the ball. Dormant until the player moves.
pub fn move_opponent(state: &mut GeometryState) {
    if !state.flags.player_has_moved {
        return;
    }
    let paddle = &mut state.opponent_paddle;
    let step = if paddle.x + PADDLE_OFFSET < state.ball.pos.x {
        state.ai_speed
    } else {
        -state.ai_speed
    };
    paddle.x = clamp_paddle_x(paddle.x + step);
}
