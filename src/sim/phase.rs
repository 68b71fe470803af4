//! Match state machine
//!
//! `NotStarted -> InProgress -> Over`, and `Over -> InProgress` on rematch.
//! The machine never returns to `NotStarted`.

use serde::{Deserialize, Serialize};

use super::state::{Scores, Side};
use crate::consts::SCORE_TO_WIN;

/// Where the match is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    NotStarted,
    InProgress,
    Over,
}

/// Actions that drive transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    /// First start after load
    Start,
    /// "Play Again" after a match ended
    Rematch,
    /// A side reached the win threshold
    Finish(Side),
}

/// Outcome of a transition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from: MatchStatus,
    pub to: MatchStatus,
    pub action: MatchAction,
}

#[derive(Debug, Clone)]
pub struct MatchStateMachine {
    status: MatchStatus,
    winner: Option<Side>,
    matches_started: u32,
}

impl Default for MatchStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStateMachine {
    pub fn new() -> Self {
        Self {
            status: MatchStatus::NotStarted,
            winner: None,
            matches_started: 0,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Winner of the last finished match (cleared when the next one starts)
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == MatchStatus::InProgress
    }

    /// Whether the running (or last) match is the first since load
    pub fn is_first_match(&self) -> bool {
        self.matches_started <= 1
    }

    pub fn matches_started(&self) -> u32 {
        self.matches_started
    }

    /// Check if an action is valid from the current status
    pub fn can_transition(&self, action: MatchAction) -> bool {
        self.next_status(action).is_some()
    }

    /// Attempt a transition. Invalid actions leave the machine untouched.
    pub fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let from = self.status;
        let Some(to) = self.next_status(action) else {
            log::warn!("Rejected match action {:?} while {:?}", action, from);
            return TransitionResult {
                success: false,
                from,
                to: from,
                action,
            };
        };

        match action {
            MatchAction::Start | MatchAction::Rematch => {
                self.winner = None;
                self.matches_started += 1;
            }
            MatchAction::Finish(side) => self.winner = Some(side),
        }
        self.status = to;

        TransitionResult {
            success: true,
            from,
            to,
            action,
        }
    }

    /// End the match if either side has reached the win threshold.
    ///
    /// Returns the winner only on the frame the match ends.
    pub fn check_terminal(&mut self, scores: &Scores) -> Option<Side> {
        if !self.is_in_progress() {
            return None;
        }
        let winner = if scores.player == SCORE_TO_WIN {
            Side::Player
        } else if scores.opponent == SCORE_TO_WIN {
            Side::Opponent
        } else {
            return None;
        };
        self.transition(MatchAction::Finish(winner));
        Some(winner)
    }

    fn next_status(&self, action: MatchAction) -> Option<MatchStatus> {
        match (self.status, action) {
            (MatchStatus::NotStarted, MatchAction::Start) => Some(MatchStatus::InProgress),
            (MatchStatus::InProgress, MatchAction::Finish(_)) => Some(MatchStatus::Over),
            (MatchStatus::Over, MatchAction::Rematch) => Some(MatchStatus::InProgress),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_lifecycle() {
        let mut machine = MatchStateMachine::new();
        assert_eq!(machine.status(), MatchStatus::NotStarted);

        let result = machine.transition(MatchAction::Start);
        assert!(result.success);
        assert_eq!(result.from, MatchStatus::NotStarted);
        assert!(machine.is_in_progress());
        assert!(machine.is_first_match());

        let scores = Scores {
            player: 3,
            opponent: 10,
        };
        assert_eq!(machine.check_terminal(&scores), Some(Side::Opponent));
        assert_eq!(machine.status(), MatchStatus::Over);
        assert_eq!(machine.winner(), Some(Side::Opponent));

        // Already over: no second signal
        assert_eq!(machine.check_terminal(&scores), None);

        let result = machine.transition(MatchAction::Rematch);
        assert!(result.success);
        assert_eq!(result.from, MatchStatus::Over);
        assert_eq!(machine.winner(), None);
        assert!(!machine.is_first_match());
        assert_eq!(machine.matches_started(), 2);
    }

    #[test]
    fn test_player_wins_at_threshold() {
        let mut machine = MatchStateMachine::new();
        machine.transition(MatchAction::Start);
        let scores = Scores {
            player: 10,
            opponent: 9,
        };
        assert_eq!(machine.check_terminal(&scores), Some(Side::Player));
        assert_eq!(machine.winner().map(|s| s.label()), Some("Player 1"));
    }

    #[test]
    fn test_below_threshold_keeps_playing() {
        let mut machine = MatchStateMachine::new();
        machine.transition(MatchAction::Start);
        let scores = Scores {
            player: 9,
            opponent: 9,
        };
        assert_eq!(machine.check_terminal(&scores), None);
        assert!(machine.is_in_progress());
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut machine = MatchStateMachine::new();
        assert!(!machine.can_transition(MatchAction::Rematch));
        let result = machine.transition(MatchAction::Rematch);
        assert!(!result.success);
        assert_eq!(result.to, MatchStatus::NotStarted);

        machine.transition(MatchAction::Start);
        assert!(!machine.transition(MatchAction::Start).success);
        assert!(!machine.transition(MatchAction::Rematch).success);
        assert_eq!(machine.matches_started(), 1);

        machine.transition(MatchAction::Finish(Side::Player));
        assert!(!machine.transition(MatchAction::Start).success);
        assert!(!machine.transition(MatchAction::Finish(Side::Opponent)).success);
        assert_eq!(machine.winner(), Some(Side::Player));
    }

    #[test]
    fn test_not_started_ignores_scores() {
        let mut machine = MatchStateMachine::new();
        let scores = Scores {
            player: 10,
            opponent: 0,
        };
        assert_eq!(machine.check_terminal(&scores), None);
        assert_eq!(machine.status(), MatchStatus::NotStarted);
    }
}
