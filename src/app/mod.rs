//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the remote-control rules: command interpretation,
//! device state, and the effects they produce. All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod actuation;
pub mod commands;
pub mod dispatcher;
pub mod effects;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
