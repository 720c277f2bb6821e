//! Side-effects requested by the domain core.
//!
//! The dispatcher and the hold-timeout monitor never touch hardware; they
//! return a short, fixed-capacity list of [`Effect`]s which the controller
//! hands to the [`ActuatorPort`](super::ports::ActuatorPort) in order.

use super::state::{Direction, SteerDirection};

/// Upper bound on effects produced by a single dispatch or tick.
/// A committed reversal is the longest sequence (4).
pub const MAX_EFFECTS: usize = 6;

/// Ordered effect list.
pub type Effects = heapless::Vec<Effect, MAX_EFFECTS>;

/// Buzzer feedback patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Long chirp sequence played when switching on.
    PowerOn,
    /// Single long beep played when switching off.
    PowerOff,
    /// Single short beep acknowledging an accepted command.
    Confirm,
    /// Three pulses: command refused (bound reached, cooldown running).
    Rejected,
    /// Double beep played once at boot.
    ShortBeep,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::PowerOn,
        Tone::PowerOff,
        Tone::Confirm,
        Tone::Rejected,
        Tone::ShortBeep,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run propulsion at `percent` (0 coasts) in `direction`.
    DriveMotor { percent: u8, direction: Direction },
    /// Drive the steering motor towards one side.
    SetSteering(SteerDirection),
    /// Release the steering motor.
    StopSteering,
    /// Play a feedback pattern (blocking).
    PlayTone(Tone),
    /// Settle pause of the reversal safety-stop (blocking).
    SafetyPause { ms: u32 },
}

impl Effect {
    /// Whether applying this effect stalls the control loop.
    pub const fn blocks(&self) -> bool {
        matches!(self, Self::PlayTone(_) | Self::SafetyPause { .. })
    }
}

/// Build an [`Effects`] list from a literal sequence.
pub fn effects<const N: usize>(list: [Effect; N]) -> Effects {
    list.into_iter().collect()
}
