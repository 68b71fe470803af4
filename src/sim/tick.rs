//! Per-frame simulation step
//!
//! One call advances the match by exactly one display frame. There is no
//! fixed-timestep accumulator: speeds are in field units per frame.

use super::collision::{StepReport, resolve_collisions};
use super::opponent::move_opponent;
use super::state::GeometryState;

/// Input gathered between two frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Latest paddle target in field coordinates. Only the most recent
    /// pointer event before the frame matters.
    pub paddle_x: Option<f32>,
}

impl TickInput {
    /// Record a pointer move, replacing any earlier one this frame
    pub fn set_paddle_x(&mut self, x: f32) {
        self.paddle_x = Some(x);
    }
}

/// Advance the state by one frame: input, ball motion, collisions, opponent
pub fn tick(state: &mut GeometryState, input: &TickInput) -> StepReport {
    if let Some(x) = input.paddle_x {
        state.set_player_paddle_x(x);
    }

    state.advance_ball();
    let report = resolve_collisions(state);
    move_opponent(state);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;
    use glam::Vec2;

    #[test]
    fn test_idle_ball_falls_toward_player() {
        let mut state = GeometryState::default();
        let input = TickInput::default();

        tick(&mut state, &input);
        assert_eq!(state.ball.pos, Vec2::new(250.0, 351.0));
        assert_eq!(state.opponent_paddle.x, 225.0);
        assert!(!state.flags.player_has_moved);
    }

    #[test]
    fn test_input_applied_before_motion() {
        let mut state = GeometryState::default();
        let mut input = TickInput::default();
        input.set_paddle_x(100.0);
        input.set_paddle_x(-50.0);

        tick(&mut state, &input);

        assert_eq!(state.player_paddle.x, 0.0);
        assert!(state.flags.player_has_moved);
        // Opponent wakes up on the same frame; ball at 250 == 225 + 25 so it steps left
        assert_eq!(state.opponent_paddle.x, 222.0);
    }

    #[test]
    fn test_idle_rally_never_speeds_up() {
        let mut state = GeometryState::default();
        let input = TickInput::default();
        let mut hits = 0;

        for _ in 0..5_000 {
            let report = tick(&mut state, &input);
            if report.paddle_hit.is_some() {
                hits += 1;
            }
            assert_eq!(state.velocity.y.abs(), 1.0);
            assert_eq!(report.scored, None);
        }
        // Ball travels straight up and down the centre line between both paddles
        assert!(hits > 0);
        assert_eq!(state.ball.pos.x, 250.0);
    }

    #[test]
    fn test_goal_produces_single_point() {
        let mut state = GeometryState::default();
        state.flags.player_has_moved = true;
        state.player_paddle.x = 0.0;
        state.ball.pos = Vec2::new(400.0, 698.0);
        state.velocity = Vec2::new(0.0, -4.0);

        let report = tick(&mut state, &TickInput::default());

        assert_eq!(report.scored, Some(Side::Opponent));
        assert_eq!(state.scores.opponent + state.scores.player, 1);
    }
}
