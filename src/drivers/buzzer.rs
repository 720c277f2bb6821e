//! PWM buzzer with named feedback patterns.
//!
//! Each pattern is a list of alternating on/off segments. The buzzer is an
//! active one: "on" drives the channel fully on, "off" is duty zero.
//! Playback is synchronous and always ends silent.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::effects::Tone;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    On(u32),
    Off(u32),
}

impl Segment {
    const fn ms(self) -> u32 {
        match self {
            Segment::On(ms) | Segment::Off(ms) => ms,
        }
    }
}

use Segment::{Off, On};

const POWER_ON: &[Segment] = &[On(2500), Off(700), On(700), Off(700), On(700)];
const POWER_OFF: &[Segment] = &[On(4000)];
const CONFIRM: &[Segment] = &[On(500)];
const REJECTED: &[Segment] = &[On(400), Off(400), On(400), Off(400), On(400), Off(400)];
const SHORT_BEEP: &[Segment] = &[On(800), Off(400), On(800)];

/// Segment table for `tone`.
pub const fn pattern(tone: Tone) -> &'static [Segment] {
    match tone {
        Tone::PowerOn => POWER_ON,
        Tone::PowerOff => POWER_OFF,
        Tone::Confirm => CONFIRM,
        Tone::Rejected => REJECTED,
        Tone::ShortBeep => SHORT_BEEP,
    }
}

/// Total playback time of `tone`.
pub fn duration_ms(tone: Tone) -> u32 {
    pattern(tone).iter().map(|s| s.ms()).sum()
}

/// Playback time of the longest tone; every blocking call fits in this.
pub fn longest_ms() -> u32 {
    Tone::ALL.into_iter().map(duration_ms).max().unwrap_or(0)
}

pub struct Buzzer<P> {
    pwm: P,
}

impl<P: SetDutyCycle> Buzzer<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Play `tone` to completion, blocking on `delay`.
    pub fn play(&mut self, tone: Tone, delay: &mut impl DelayNs) -> Result<(), ActuatorError> {
        for segment in pattern(tone) {
            match *segment {
                On(ms) => {
                    self.pwm
                        .set_duty_cycle_fully_on()
                        .map_err(|_| ActuatorError::PwmWriteFailed)?;
                    delay.delay_ms(ms);
                }
                Off(ms) => {
                    self.silence()?;
                    delay.delay_ms(ms);
                }
            }
        }
        self.silence()
    }

    pub fn silence(&mut self) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }
}
