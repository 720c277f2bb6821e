//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements    | Connects to                     |
//! |---------------|---------------|---------------------------------|
//! | `hardware`    | ActuatorPort  | Propulsion, steering, buzzer    |
//! | `ir_receiver` | RemotePort    | IR edge queue + NEC decoder     |
//! | `log_sink`    | EventSink     | Serial log output               |
//! | `time`        | ClockPort     | ESP32 system timer              |

pub mod hardware;
pub mod ir_receiver;
pub mod log_sink;
pub mod time;
