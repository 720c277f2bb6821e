//! Device state shared by the dispatcher and the hold-timeout monitor.
//!
//! One instance lives inside the [`Controller`](super::service::Controller)
//! for the whole process lifetime. It is only ever mutated through
//! `&mut DeviceState` from the control loop, so no locking is involved.

/// Propulsion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Side the steering motor is driven towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerDirection {
    Left,
    Right,
}

/// Current steering actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    Neutral,
    Left,
    Right,
}

impl From<SteerDirection> for Steering {
    fn from(dir: SteerDirection) -> Self {
        match dir {
            SteerDirection::Left => Self::Left,
            SteerDirection::Right => Self::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    /// Propulsion enabled.
    pub power: bool,
    /// Throttle, 0-100. Only meaningful while `power` is set.
    pub speed_percent: u8,
    /// Only meaningful while `power` is set.
    pub direction: Direction,
    pub steering: Steering,
    /// Uptime (ms) of the latest steering code, fresh or repeat.
    pub last_steering_signal_ms: u32,
    /// Uptime (ms) of the latest committed reversal; `None` until the first.
    pub last_direction_change_ms: Option<u32>,
}

impl DeviceState {
    /// Power-on reset state: off, stopped, facing forward, steering neutral.
    pub const fn new() -> Self {
        Self {
            power: false,
            speed_percent: 0,
            direction: Direction::Forward,
            steering: Steering::Neutral,
            last_steering_signal_ms: 0,
            last_direction_change_ms: None,
        }
    }

    pub fn is_steering(&self) -> bool {
        self.steering != Steering::Neutral
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}
