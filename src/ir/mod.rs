//! Infrared remote reception: ISR edge capture and NEC decoding.

pub mod edges;
pub mod nec;
