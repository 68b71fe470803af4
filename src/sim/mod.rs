//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per display frame, speeds in field units per frame
//! - Seeded RNG only (autopilot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod opponent;
pub mod phase;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{StepReport, adjust_speed, resolve_collisions, spin_from_contact};
pub use opponent::move_opponent;
pub use phase::{MatchAction, MatchStateMachine, MatchStatus, TransitionResult};
pub use state::{Ball, Flags, GeometryState, Paddle, Scores, Side};
pub use tick::{TickInput, tick};
