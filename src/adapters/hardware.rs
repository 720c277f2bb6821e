//! Hardware adapter: bridges real peripherals to the actuator port.
//!
//! Owns the propulsion, steering and buzzer drivers plus the blocking
//! delay, and exposes them through [`ActuatorPort`]. This is the only
//! module in the system that commands actual outputs. Drivers are generic
//! over `embedded-hal` traits, so the same adapter runs on LEDC/GPIO in
//! firmware and on mock pins under test.
//!
//! Driver failures are logged and swallowed: the loop must keep running
//! (and keep feeding the watchdog) even if one write is refused.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::effects::Tone;
use crate::app::ports::ActuatorPort;
use crate::app::state::{Direction, SteerDirection};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::propulsion::{DirectionSelect, PropulsionDriver};
use crate::drivers::steering::SteeringActuator;
use crate::error::ActuatorError;

/// Concrete adapter that combines all actuators behind [`ActuatorPort`].
pub struct HardwareAdapter<Sel, Pwm, SteerA, SteerB, BuzzPwm, Delay> {
    propulsion: PropulsionDriver<Sel, Pwm>,
    steering: SteeringActuator<SteerA, SteerB>,
    buzzer: Buzzer<BuzzPwm>,
    delay: Delay,
    faults: u32,
}

impl<Sel, Pwm, SteerA, SteerB, BuzzPwm, Delay> HardwareAdapter<Sel, Pwm, SteerA, SteerB, BuzzPwm, Delay>
where
    Sel: DirectionSelect,
    Pwm: SetDutyCycle,
    SteerA: OutputPin,
    SteerB: OutputPin,
    BuzzPwm: SetDutyCycle,
    Delay: DelayNs,
{
    pub fn new(
        propulsion: PropulsionDriver<Sel, Pwm>,
        steering: SteeringActuator<SteerA, SteerB>,
        buzzer: Buzzer<BuzzPwm>,
        delay: Delay,
    ) -> Self {
        Self {
            propulsion,
            steering,
            buzzer,
            delay,
            faults: 0,
        }
    }

    /// Driver writes that failed since boot.
    pub fn faults(&self) -> u32 {
        self.faults
    }

    fn check(&mut self, what: &str, result: Result<(), ActuatorError>) {
        if let Err(e) = result {
            self.faults = self.faults.wrapping_add(1);
            warn!("{}: {}", what, e);
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<Sel, Pwm, SteerA, SteerB, BuzzPwm, Delay> ActuatorPort
    for HardwareAdapter<Sel, Pwm, SteerA, SteerB, BuzzPwm, Delay>
where
    Sel: DirectionSelect,
    Pwm: SetDutyCycle,
    SteerA: OutputPin,
    SteerB: OutputPin,
    BuzzPwm: SetDutyCycle,
    Delay: DelayNs,
{
    fn drive_propulsion(&mut self, percent: u8, direction: Direction) {
        let r = self.propulsion.drive(percent, direction);
        self.check("propulsion", r);
    }

    fn set_steering(&mut self, side: SteerDirection) {
        let r = self.steering.drive(side);
        self.check("steering", r);
    }

    fn stop_steering(&mut self) {
        let r = self.steering.stop();
        self.check("steering", r);
    }

    fn play_tone(&mut self, tone: Tone) {
        let r = self.buzzer.play(tone, &mut self.delay);
        self.check("buzzer", r);
    }

    fn hold(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn all_off(&mut self) {
        let r = self.propulsion.coast();
        self.check("propulsion", r);
        let r = self.steering.stop();
        self.check("steering", r);
        let r = self.buzzer.silence();
        self.check("buzzer", r);
    }
}
