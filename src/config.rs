//! Controller configuration parameters
//!
//! The fixed thresholds and speeds that shape the remote-control policy.
//! There is no runtime override path: the values below are the firmware's
//! behaviour. The struct exists so the dispatcher, the hold-timeout monitor
//! and the drivers read one source of truth, and so the boot log can print
//! the effective configuration.

use serde::{Deserialize, Serialize};

use crate::drivers::buzzer;
use crate::error::{Error, Result};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Steering ---
    /// Gap (ms) without a steering signal after which the button counts as released
    pub release_timeout_ms: u32,

    // --- Propulsion ---
    /// Minimum time (ms) between two committed direction reversals
    pub direction_change_delay_ms: u32,
    /// Zero-speed settle pause (ms) inserted before a reversal takes effect
    pub safety_pause_ms: u32,
    /// Speed applied when the controller is switched on (0-100%)
    pub power_on_speed_percent: u8,
    /// Speed applied right after a committed reversal (0-100%)
    pub reversal_speed_percent: u8,
    /// Target of the preset-speed button (0-100%)
    pub preset_speed_percent: u8,
    /// SpeedUp / SpeedDown increment (percentage points)
    pub speed_step_percent: u8,

    // --- PWM ---
    /// Propulsion PWM base frequency (Hz)
    pub propulsion_pwm_freq_hz: u32,
    /// Buzzer PWM base frequency (Hz)
    pub buzzer_pwm_freq_hz: u32,

    // --- Timing ---
    /// Idle sleep between loop iterations when nothing arrived (ms)
    pub loop_idle_ms: u32,
    /// Task watchdog timeout (ms); must outlast the longest blocking tone
    pub watchdog_timeout_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Steering
            release_timeout_ms: 150,

            // Propulsion
            direction_change_delay_ms: 500,
            safety_pause_ms: 2000,
            power_on_speed_percent: 15,
            reversal_speed_percent: 15,
            preset_speed_percent: 30,
            speed_step_percent: 10,

            // PWM
            propulsion_pwm_freq_hz: 3_920, // ~3.9 kHz, same carrier as the AVR timer-0 /8 setting
            buzzer_pwm_freq_hz: 2_000,

            // Timing
            loop_idle_ms: 1,
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl ControllerConfig {
    /// Reject constant sets that would break the controller's invariants.
    pub fn validate(&self) -> Result<()> {
        let speeds = [
            self.power_on_speed_percent,
            self.reversal_speed_percent,
            self.preset_speed_percent,
        ];
        if speeds.iter().any(|s| *s > 100 || s % 5 != 0) {
            return Err(Error::Config("speeds must be multiples of 5 within 0-100"));
        }
        if self.speed_step_percent == 0 || self.speed_step_percent % 5 != 0 {
            return Err(Error::Config("speed step must be a non-zero multiple of 5"));
        }
        if self.release_timeout_ms == 0 {
            return Err(Error::Config("release timeout must be non-zero"));
        }
        if self.loop_idle_ms >= self.release_timeout_ms {
            return Err(Error::Config("loop idle must be shorter than the release timeout"));
        }
        if self.watchdog_timeout_ms <= self.safety_pause_ms {
            return Err(Error::Config("watchdog must outlast the safety pause"));
        }
        if self.watchdog_timeout_ms <= buzzer::longest_ms() {
            return Err(Error::Config("watchdog must outlast the longest tone"));
        }
        if self.propulsion_pwm_freq_hz == 0 || self.buzzer_pwm_freq_hz == 0 {
            return Err(Error::Config("PWM frequencies must be non-zero"));
        }
        Ok(())
    }
}
