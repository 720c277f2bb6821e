//! Propulsion motor driver (single-channel H-bridge).
//!
//! Speed comes from one PWM channel; direction from a select stage that
//! is either two digital lines (one per direction) or, on older boards, a
//! single direction pin.
//!
//! ## Safety contract
//!
//! Both direction lines are driven LOW before either is raised, so the
//! bridge never sees forward and reverse selected at once. A throttle of
//! 0% coasts: duty zero and both lines LOW.
//!
//! The reversal cooldown is enforced by the dispatcher; this driver is a
//! dumb actuator.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::state::Direction;
use crate::error::ActuatorError;

/// Map a 0-100 throttle onto the 8-bit PWM range, rounding to nearest.
pub fn duty_from_percent(percent: u8) -> u8 {
    let p = u16::from(percent.min(100));
    ((p * 255 + 50) / 100) as u8
}

// ── Direction select ──────────────────────────────────────────

/// How the bridge is told which way to turn.
pub trait DirectionSelect {
    fn select(&mut self, direction: Direction) -> Result<(), ActuatorError>;

    /// Release the select lines (coast).
    fn release(&mut self) -> Result<(), ActuatorError>;
}

/// Two select lines: one HIGH for forward, the other HIGH for reverse.
pub struct DualSelect<F, R> {
    forward: F,
    reverse: R,
}

impl<F: OutputPin, R: OutputPin> DualSelect<F, R> {
    pub fn new(forward: F, reverse: R) -> Self {
        Self { forward, reverse }
    }
}

impl<F: OutputPin, R: OutputPin> DirectionSelect for DualSelect<F, R> {
    fn select(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        self.release()?;
        match direction {
            Direction::Forward => self.forward.set_high().map_err(|_| ActuatorError::GpioWriteFailed),
            Direction::Reverse => self.reverse.set_high().map_err(|_| ActuatorError::GpioWriteFailed),
        }
    }

    fn release(&mut self) -> Result<(), ActuatorError> {
        self.forward.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.reverse.set_low().map_err(|_| ActuatorError::GpioWriteFailed)
    }
}

/// Legacy wiring: one pin, LOW = forward, HIGH = reverse.
pub struct SingleSelect<P> {
    pin: P,
}

impl<P: OutputPin> SingleSelect<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: OutputPin> DirectionSelect for SingleSelect<P> {
    fn select(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        match direction {
            Direction::Forward => self.pin.set_low(),
            Direction::Reverse => self.pin.set_high(),
        }
        .map_err(|_| ActuatorError::GpioWriteFailed)
    }

    fn release(&mut self) -> Result<(), ActuatorError> {
        self.pin.set_low().map_err(|_| ActuatorError::GpioWriteFailed)
    }
}

// ── Driver ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropulsionState {
    Coasting,
    Running { duty: u8, direction: Direction },
}

pub struct PropulsionDriver<S, P> {
    select: S,
    pwm: P,
    state: PropulsionState,
}

impl<S: DirectionSelect, P: SetDutyCycle> PropulsionDriver<S, P> {
    pub fn new(select: S, pwm: P) -> Self {
        Self {
            select,
            pwm,
            state: PropulsionState::Coasting,
        }
    }

    /// Run at `percent` (clamped to 100) in `direction`. 0% coasts.
    pub fn drive(&mut self, percent: u8, direction: Direction) -> Result<(), ActuatorError> {
        let duty = duty_from_percent(percent);
        if duty == 0 {
            return self.coast();
        }

        // Cut power before touching the select lines.
        self.write_duty(0)?;
        self.select.select(direction)?;
        self.write_duty(duty)?;

        self.state = PropulsionState::Running { duty, direction };
        Ok(())
    }

    pub fn coast(&mut self) -> Result<(), ActuatorError> {
        self.write_duty(0)?;
        self.select.release()?;
        self.state = PropulsionState::Coasting;
        Ok(())
    }

    pub fn state(&self) -> PropulsionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, PropulsionState::Coasting)
    }

    fn write_duty(&mut self, duty: u8) -> Result<(), ActuatorError> {
        match duty {
            0 => self.pwm.set_duty_cycle_fully_off(),
            255 => self.pwm.set_duty_cycle_fully_on(),
            d => self.pwm.set_duty_cycle_fraction(u16::from(d), 255),
        }
        .map_err(|_| ActuatorError::PwmWriteFailed)
    }
}
