//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (IR receiver, motor drivers, buzzer, clock, event sinks)
//! implement these traits. The [`Controller`](super::service::Controller)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use super::commands::RemoteEvent;
use super::effects::Tone;
use super::state::{Direction, SteerDirection};

// ───────────────────────────────────────────────────────────────
// Remote port (driven adapter: IR decoder → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the control loop polls this once per iteration.
pub trait RemotePort {
    /// Next decoded frame, if one arrived since the last call. Never blocks.
    fn poll(&mut self) -> Option<RemoteEvent>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// Implementations own the physical conventions (pin polarity, duty
/// scaling). `play_tone` and `hold` are synchronous and stall the caller
/// for their whole duration.
pub trait ActuatorPort {
    /// Run the propulsion motor at `percent` (0-100, 0 = coast) in `direction`.
    fn drive_propulsion(&mut self, percent: u8, direction: Direction);

    /// Energise the steering motor towards `side`.
    fn set_steering(&mut self, side: SteerDirection);

    /// De-energise the steering motor.
    fn stop_steering(&mut self);

    /// Play a feedback pattern; returns once it has finished.
    fn play_tone(&mut self, tone: Tone);

    /// Block for `ms` milliseconds.
    fn hold(&mut self, ms: u32);

    /// Kill every output (safe state).
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond uptime. Wraps at `u32::MAX`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
