//! Steering motor driver: a two-input H-bridge, full on or off.
//!
//! A HIGH with B LOW turns right, B HIGH with A LOW turns left, both LOW
//! is neutral. The opposite input is always lowered first.

use embedded_hal::digital::OutputPin;

use crate::app::state::SteerDirection;
use crate::error::ActuatorError;

pub struct SteeringActuator<A, B> {
    a: A,
    b: B,
    active: Option<SteerDirection>,
}

impl<A: OutputPin, B: OutputPin> SteeringActuator<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b, active: None }
    }

    pub fn drive(&mut self, side: SteerDirection) -> Result<(), ActuatorError> {
        match side {
            SteerDirection::Left => {
                self.a.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
                self.b.set_high().map_err(|_| ActuatorError::GpioWriteFailed)?;
            }
            SteerDirection::Right => {
                self.b.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
                self.a.set_high().map_err(|_| ActuatorError::GpioWriteFailed)?;
            }
        }
        self.active = Some(side);
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.a.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.b.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.active = None;
        Ok(())
    }

    pub fn active(&self) -> Option<SteerDirection> {
        self.active
    }
}
