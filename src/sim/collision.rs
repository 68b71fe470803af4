//! Collision detection and response
//!
//! Discrete-step, axis-aligned checks: the ball centre against the side walls
//! and against each paddle's contact band. There is no sub-stepping, so the
//! ball may overshoot a boundary by up to one frame of travel.

use super::state::{GeometryState, Side};
use crate::consts::*;

/// What happened during one frame's collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Ball bounced off a side wall
    pub wall_bounce: bool,
    /// Ball was returned by this side's paddle
    pub paddle_hit: Option<Side>,
    /// This side won the point (ball already reset)
    pub scored: Option<Side>,
}

/// Speed-adjustment policy applied on every paddle return.
///
/// Once the player has engaged, the magnitude grows by one in the current
/// direction and saturates at [`MAX_SPEED`]. Before that, speed is left alone.
#[inline]
pub fn adjust_speed(current: f32, player_has_moved: bool) -> f32 {
    if !player_has_moved {
        return current;
    }
    let bumped = if current < 0.0 {
        current - 1.0
    } else {
        current + 1.0
    };
    bumped.clamp(-MAX_SPEED, MAX_SPEED)
}

/// Horizontal speed imparted by a player return, from where the ball met the paddle
#[inline]
pub fn spin_from_contact(ball_x: f32, paddle_x: f32) -> f32 {
    let trajectory_offset = ball_x - (paddle_x + PADDLE_OFFSET);
    trajectory_offset * SPIN_FACTOR
}

/// Resolve one frame of wall, paddle and goal-line contact
pub fn resolve_collisions(state: &mut GeometryState) -> StepReport {
    let mut report = StepReport::default();
    let ball_x = state.ball.pos.x;

    // Side walls
    if (ball_x < 0.0 && state.velocity.x < 0.0)
        || (ball_x > FIELD_WIDTH && state.velocity.x > 0.0)
    {
        state.velocity.x = -state.velocity.x;
        report.wall_bounce = true;
    }

    // Player edge (bottom)
    if state.ball.pos.y > FIELD_HEIGHT - PADDLE_OFFSET {
        if state.player_paddle.spans(ball_x) {
            state.flags.ball_touched_player_paddle = true;
            state.velocity.y = -adjust_speed(state.velocity.y, state.flags.player_has_moved);
            state.velocity.x = spin_from_contact(ball_x, state.player_paddle.x);
            report.paddle_hit = Some(Side::Player);
        } else if state.ball.pos.y > FIELD_HEIGHT {
            score_point(state, Side::Opponent, &mut report);
        }
    }

    // Opponent edge (top). After a reset the ball sits at mid-field, so this
    // can't produce a second point in the same frame.
    if state.ball.pos.y < PADDLE_OFFSET {
        if state.opponent_paddle.spans(ball_x) {
            state.velocity.y = -adjust_speed(state.velocity.y, state.flags.player_has_moved);
            report.paddle_hit = Some(Side::Opponent);
        } else if state.ball.pos.y < 0.0 {
            score_point(state, Side::Player, &mut report);
        }
    }

    report
}

fn score_point(state: &mut GeometryState, side: Side, report: &mut StepReport) {
    state.reset();
    state.scores.award(side);
    report.scored = Some(side);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn engaged_state() -> GeometryState {
        let mut state = GeometryState::default();
        state.flags.player_has_moved = true;
        state
    }

    #[test]
    fn test_adjust_speed_ramps_and_saturates() {
        assert_eq!(adjust_speed(-3.0, true), -4.0);
        assert_eq!(adjust_speed(3.0, true), 4.0);
        assert_eq!(adjust_speed(4.5, true), 5.0);
        assert_eq!(adjust_speed(-5.0, true), -5.0);
        assert_eq!(adjust_speed(0.0, true), 1.0);
    }

    #[test]
    fn test_adjust_speed_idle_is_identity() {
        assert_eq!(adjust_speed(-3.0, false), -3.0);
        assert_eq!(adjust_speed(17.0, false), 17.0);
    }

    #[test]
    fn test_player_paddle_return() {
        let mut state = engaged_state();
        state.ball.pos = Vec2::new(260.0, 685.0);
        state.player_paddle.x = 225.0;
        state.velocity = Vec2::new(0.0, -3.0);

        let report = resolve_collisions(&mut state);

        assert_eq!(report.paddle_hit, Some(Side::Player));
        assert!(state.flags.ball_touched_player_paddle);
        // -3 ramps to -4, then flips toward the opponent
        assert_eq!(state.velocity.y, 4.0);
        assert!((state.velocity.x - 3.0).abs() < 1e-4);
        assert_eq!(report.scored, None);
    }

    #[test]
    fn test_player_return_before_engagement_keeps_speed() {
        let mut state = GeometryState::default();
        state.ball.pos = Vec2::new(240.0, 690.0);
        state.velocity = Vec2::new(-1.0, -1.0);

        resolve_collisions(&mut state);

        assert_eq!(state.velocity.y, 1.0);
        assert!((state.velocity.x - (240.0 - 250.0) * 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_miss_past_player_edge_scores_for_opponent() {
        let mut state = engaged_state();
        state.ball.pos = Vec2::new(10.0, 705.0);
        state.velocity = Vec2::new(-2.0, -4.0);

        let report = resolve_collisions(&mut state);

        assert_eq!(report.scored, Some(Side::Opponent));
        assert_eq!(state.scores.opponent, 1);
        assert_eq!(state.scores.player, 0);
        assert_eq!(state.ball.pos, Vec2::new(250.0, 350.0));
        assert_eq!(state.velocity.y, -3.0);
    }

    #[test]
    fn test_inside_contact_band_without_paddle_is_not_a_point_yet() {
        let mut state = engaged_state();
        state.ball.pos = Vec2::new(10.0, 690.0);

        let report = resolve_collisions(&mut state);

        assert_eq!(report, StepReport::default());
        assert_eq!(state.ball.pos, Vec2::new(10.0, 690.0));
    }

    #[test]
    fn test_opponent_return_has_no_spin() {
        let mut state = engaged_state();
        state.ball.pos = Vec2::new(240.0, 20.0);
        state.opponent_paddle.x = 225.0;
        state.velocity = Vec2::new(1.5, 4.0);
        state.flags.ball_touched_player_paddle = true;

        let report = resolve_collisions(&mut state);

        assert_eq!(report.paddle_hit, Some(Side::Opponent));
        assert_eq!(state.velocity.y, -5.0);
        assert_eq!(state.velocity.x, 1.5);
        assert!(state.flags.ball_touched_player_paddle);
    }

    #[test]
    fn test_miss_past_opponent_edge_scores_for_player() {
        let mut state = engaged_state();
        state.ball.pos = Vec2::new(40.0, -2.0);
        state.opponent_paddle.x = 300.0;
        state.velocity = Vec2::new(3.0, 5.0);

        let report = resolve_collisions(&mut state);

        assert_eq!(report.scored, Some(Side::Player));
        assert_eq!(state.scores.player, 1);
        assert_eq!(state.ball.pos, Vec2::new(250.0, 350.0));
        // Horizontal speed carries over the reset
        assert_eq!(state.velocity.x, 3.0);
    }

    #[test]
    fn test_side_wall_bounce_only_when_moving_outward() {
        let mut state = engaged_state();
        state.ball.pos = Vec2::new(-1.0, 300.0);
        state.velocity = Vec2::new(-2.0, 1.0);
        assert!(resolve_collisions(&mut state).wall_bounce);
        assert_eq!(state.velocity.x, 2.0);

        // Already heading back in: leave it
        assert!(!resolve_collisions(&mut state).wall_bounce);
        assert_eq!(state.velocity.x, 2.0);

        state.ball.pos = Vec2::new(501.0, 300.0);
        assert!(resolve_collisions(&mut state).wall_bounce);
        assert_eq!(state.velocity.x, -2.0);
    }
}
