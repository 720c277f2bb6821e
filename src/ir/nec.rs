//! NEC protocol decoder.
//!
//! ## Frame timing
//!
//! | Segment        | Nominal   | Accepted       |
//! |----------------|-----------|----------------|
//! | Lead mark      | 9 ms      | 8 – 10 ms      |
//! | Lead space     | 4.5 ms    | 3.5 – 5 ms     |
//! | Repeat space   | 2.25 ms   | 1.75 – 2.75 ms |
//! | Bit mark       | 562 µs    | 300 – 900 µs   |
//! | Bit space (0)  | 562 µs    | 300 – 1200 µs  |
//! | Bit space (1)  | 1687 µs   | 1200 – 2000 µs |
//!
//! Bits arrive LSB first: address, inverted address (or extended address
//! high byte), command, inverted command. The resulting `u32` has the
//! address in its low byte, so `0xE51A52AD` is address `0xAD`, command
//! `0x1A`.
//!
//! The decoder is fed the receiver's edges and is pure: timestamps come
//! from the edges themselves.

use super::edges::Edge;
use crate::app::commands::REPEAT_SENTINEL;

const LEAD_MARK_US: (u32, u32) = (8_000, 10_000);
const LEAD_SPACE_US: (u32, u32) = (3_500, 5_000);
const REPEAT_SPACE_US: (u32, u32) = (1_750, 2_750);
const BIT_MARK_US: (u32, u32) = (300, 900);
const BIT_SPACE_US: (u32, u32) = (300, 2_000);
const ONE_THRESHOLD_US: u32 = 1_200;

const fn within(us: u32, (lo, hi): (u32, u32)) -> bool {
    us >= lo && us <= hi
}

/// One stretch of constant line level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    /// Carrier present (line LOW).
    Mark(u32),
    /// Carrier absent (line HIGH).
    Space(u32),
}

/// A successfully decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NecFrame {
    pub code: u32,
    pub repeat: bool,
}

impl NecFrame {
    pub const fn address(&self) -> u8 {
        self.code as u8
    }

    pub const fn command(&self) -> u8 {
        (self.code >> 16) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    LeadMark,
    RepeatTail,
    BitMark { bits: u8, value: u32 },
    BitSpace { bits: u8, value: u32 },
}

pub struct NecDecoder {
    phase: Phase,
    last_edge: Option<Edge>,
    last_code: Option<u32>,
    rejected: u32,
}

impl Default for NecDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NecDecoder {
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_edge: None,
            last_code: None,
            rejected: 0,
        }
    }

    /// Feed one line transition. The level before `edge` and the time
    /// since the previous edge form the pulse that just ended.
    pub fn push_edge(&mut self, edge: Edge) -> Option<NecFrame> {
        let previous = self.last_edge.replace(edge)?;
        let us = edge.at_us.wrapping_sub(previous.at_us);
        let pulse = if previous.high {
            Pulse::Space(us)
        } else {
            Pulse::Mark(us)
        };
        self.push_pulse(pulse)
    }

    /// Feed one pulse.
    pub fn push_pulse(&mut self, pulse: Pulse) -> Option<NecFrame> {
        // A lead mark restarts decoding wherever we were.
        if let Pulse::Mark(us) = pulse {
            if within(us, LEAD_MARK_US) {
                self.phase = Phase::LeadMark;
                return None;
            }
        }

        let (next, frame) = match (self.phase, pulse) {
            (Phase::LeadMark, Pulse::Space(us)) if within(us, LEAD_SPACE_US) => {
                (Phase::BitMark { bits: 0, value: 0 }, None)
            }
            (Phase::LeadMark, Pulse::Space(us)) if within(us, REPEAT_SPACE_US) => {
                (Phase::RepeatTail, None)
            }
            (Phase::RepeatTail, Pulse::Mark(us)) if within(us, BIT_MARK_US) => {
                let code = self.last_code.unwrap_or(REPEAT_SENTINEL);
                (Phase::Idle, Some(NecFrame { code, repeat: true }))
            }
            (Phase::BitMark { bits, value }, Pulse::Mark(us)) if within(us, BIT_MARK_US) => {
                (Phase::BitSpace { bits, value }, None)
            }
            (Phase::BitSpace { bits, value }, Pulse::Space(us)) if within(us, BIT_SPACE_US) => {
                let value = value | (u32::from(us > ONE_THRESHOLD_US) << bits);
                let bits = bits + 1;
                if bits < 32 {
                    (Phase::BitMark { bits, value }, None)
                } else {
                    (Phase::Idle, self.finish(value))
                }
            }
            (Phase::Idle, _) => (Phase::Idle, None),
            _ => {
                self.rejected += 1;
                (Phase::Idle, None)
            }
        };

        self.phase = next;
        frame
    }

    /// Frames abandoned on a timing violation or failed checksum.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    fn finish(&mut self, code: u32) -> Option<NecFrame> {
        let command = (code >> 16) as u8;
        let inverse = (code >> 24) as u8;
        if command != !inverse {
            self.rejected += 1;
            return None;
        }
        self.last_code = Some(code);
        Some(NecFrame { code, repeat: false })
    }
}
