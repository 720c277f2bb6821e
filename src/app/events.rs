//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port after each dispatch or tick.
//! Adapters on the other side decide what to do with them. In the
//! firmware they go to the serial log.

use super::commands::RemoteCommand;
use super::state::{Direction, Steering};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller finished its boot sequence.
    Started,

    /// Propulsion was switched on or off.
    PowerChanged { on: bool },

    /// Throttle moved.
    SpeedChanged { from: u8, to: u8 },

    /// A reversal was committed.
    DirectionChanged { to: Direction },

    /// A steering button took effect.
    SteeringChanged { from: Steering, to: Steering },

    /// The hold-timeout monitor released the steering motor.
    SteeringReleased,

    /// A command was refused (rejected tone played).
    Rejected(RemoteCommand),
}
