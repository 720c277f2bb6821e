//! GPIO assignments that code reads by number.
//!
//! Output pins go through typed `esp_idf_hal` drivers, so `main` selects
//! them from `Peripherals::pins` directly:
//!
//! | Signal                       | GPIO |
//! |------------------------------|------|
//! | Propulsion PWM (LEDC ch0)    | 5    |
//! | Propulsion forward select    | 4    |
//! | Propulsion reverse select    | 6    |
//! | Steering input A (right)     | 7    |
//! | Steering input B (left)      | 11   |
//! | Active buzzer (LEDC ch1)     | 2    |
//!
//! Strapping pins (0, 3, 45, 46) are avoided.

/// Demodulated IR input (38 kHz receiver, active LOW), any-edge interrupt.
/// Configured through raw `gpio_config` in `drivers::hw_init`.
pub const IR_RECEIVER_GPIO: i32 = 12;
