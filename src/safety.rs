//! Time-based safety checks.
//!
//! Two independent guards run against [`DeviceState`]:
//!
//! - [`HoldTimeoutMonitor`] runs **every loop iteration**, whether or not a
//!   remote frame arrived. The steering motor is "on while held"; the only
//!   evidence of a held button is the remote's repeat stream, so the motor
//!   is released once that stream has been silent for longer than the
//!   release timeout.
//! - [`ReversalGuard`] enforces the cooldown between two propulsion
//!   reversals. It is consulted by the dispatcher before committing one.
//!
//! All times are millisecond uptime counters; elapsed time is computed with
//! wrapping subtraction so the counter wrap never looks like a timeout.

use crate::app::effects::{Effect, Effects, effects};
use crate::app::state::{DeviceState, Steering};
use crate::config::ControllerConfig;

/// Steering release watchdog.
pub struct HoldTimeoutMonitor {
    release_timeout_ms: u32,
}

impl HoldTimeoutMonitor {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            release_timeout_ms: config.release_timeout_ms,
        }
    }

    /// Release the steering motor if its signal has gone stale.
    pub fn tick(&self, now_ms: u32, state: &mut DeviceState) -> Effects {
        if !state.is_steering() {
            return Effects::new();
        }

        let silent_ms = now_ms.wrapping_sub(state.last_steering_signal_ms);
        if silent_ms > self.release_timeout_ms {
            state.steering = Steering::Neutral;
            effects([Effect::StopSteering])
        } else {
            Effects::new()
        }
    }
}

/// Propulsion reversal cooldown.
pub struct ReversalGuard {
    cooldown_ms: u32,
}

impl ReversalGuard {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            cooldown_ms: config.direction_change_delay_ms,
        }
    }

    /// Whether a reversal may be committed at `now_ms`.
    /// The very first reversal is always permitted.
    pub fn permits(&self, now_ms: u32, last_change_ms: Option<u32>) -> bool {
        match last_change_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.cooldown_ms,
        }
    }
}
