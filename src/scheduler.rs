//! Frame scheduler
//!
//! Owns the match (geometry + state machine) and runs one simulation step per
//! display refresh. The platform loop calls [`FrameScheduler::run_frame`] and
//! only requests another frame while it returns [`FrameOutcome::Continue`].

use crate::renderer::RenderSink;
use crate::settings::DevicePreset;
use crate::sim::{
    GeometryState, MatchAction, MatchStateMachine, MatchStatus, Side, TickInput,
    TransitionResult, tick,
};

/// What the platform loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Match still running: schedule the next frame
    Continue,
    /// The match ended on this frame. Reported exactly once per match.
    MatchOver(Side),
    /// Nothing to step (not started, or already over)
    Halted,
}

impl FrameOutcome {
    pub fn should_continue(&self) -> bool {
        matches!(self, FrameOutcome::Continue)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    state: GeometryState,
    machine: MatchStateMachine,
    input: TickInput,
    preset: DevicePreset,
    /// Frames stepped in the current match
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GeometryState {
        &self.state
    }

    pub fn machine(&self) -> &MatchStateMachine {
        &self.machine
    }

    pub fn status(&self) -> MatchStatus {
        self.machine.status()
    }

    /// Preset the current match was initialised with
    pub fn preset(&self) -> DevicePreset {
        self.preset
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Input port: the latest pointer position wins until the next frame
    pub fn set_player_paddle_x(&mut self, x: f32) {
        self.input.set_paddle_x(x);
    }

    /// First match after load
    pub fn start_match(&mut self, preset: DevicePreset) -> TransitionResult {
        self.begin(MatchAction::Start, preset)
    }

    /// "Play Again" after a match has ended
    pub fn request_rematch(&mut self, preset: DevicePreset) -> TransitionResult {
        self.begin(MatchAction::Rematch, preset)
    }

    fn begin(&mut self, action: MatchAction, preset: DevicePreset) -> TransitionResult {
        let result = self.machine.transition(action);
        if result.success {
            self.preset = preset;
            self.state = GeometryState::new(preset);
            self.input = TickInput::default();
            self.frames = 0;
            log::info!(
                "Match {} started ({} preset)",
                self.machine.matches_started(),
                preset.as_str()
            );
        }
        result
    }

    /// Advance the simulation one frame without drawing
    pub fn step(&mut self) -> FrameOutcome {
        if !self.machine.is_in_progress() {
            return FrameOutcome::Halted;
        }

        let input = std::mem::take(&mut self.input);
        let report = tick(&mut self.state, &input);
        self.frames += 1;

        if let Some(side) = report.scored {
            log::debug!(
                "Point to {} ({} - {})",
                side.label(),
                self.state.scores.player,
                self.state.scores.opponent
            );
        }

        match self.machine.check_terminal(&self.state.scores) {
            Some(winner) => {
                log::info!(
                    "{} wins {} - {} after {} frames",
                    winner.label(),
                    self.state.scores.player,
                    self.state.scores.opponent,
                    self.frames
                );
                FrameOutcome::MatchOver(winner)
            }
            None => FrameOutcome::Continue,
        }
    }

    /// Draw the current state, then step it
    pub fn run_frame<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> FrameOutcome {
        if !self.machine.is_in_progress() {
            return FrameOutcome::Halted;
        }
        sink.render(&self.state);
        self.step()
    }

    /// Run frames until the match ends or `max_frames` is reached.
    ///
    /// `drive` runs before every frame and may feed input.
    pub fn run_until_over<S, F>(&mut self, sink: &mut S, max_frames: u64, mut drive: F) -> Option<Side>
    where
        S: RenderSink + ?Sized,
        F: FnMut(&mut FrameScheduler),
    {
        for _ in 0..max_frames {
            drive(self);
            match self.run_frame(sink) {
                FrameOutcome::Continue => {}
                FrameOutcome::MatchOver(winner) => return Some(winner),
                FrameOutcome::Halted => return None,
            }
        }
        log::warn!("Stopped after {} frames without a winner", max_frames);
        None
    }
}
