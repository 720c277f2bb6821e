//! Fuzz target: `NecDecoder::push_edge`
//!
//! Turns arbitrary bytes into a stream of receiver edges (two bytes of
//! interval, alternating level) and asserts that the decoder never panics
//! and only yields frames whose command byte matches its inverse.
//!
//! cargo fuzz run fuzz_nec_decoder

#![no_main]

use irdrive::app::commands::REPEAT_SENTINEL;
use irdrive::ir::edges::Edge;
use irdrive::ir::nec::NecDecoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = NecDecoder::new();
    let mut at_us = 0u32;
    let mut high = false;

    for chunk in data.chunks_exact(2) {
        // Scale so the lead mark and lead space ranges are reachable.
        let interval = u32::from(u16::from_le_bytes([chunk[0], chunk[1]])) / 4;
        at_us = at_us.wrapping_add(interval);

        if let Some(frame) = decoder.push_edge(Edge { at_us, high }) {
            if frame.code != REPEAT_SENTINEL {
                let command = (frame.code >> 16) as u8;
                let inverse = (frame.code >> 24) as u8;
                assert_eq!(command, !inverse, "decoder yielded a frame with a bad checksum");
            } else {
                assert!(frame.repeat, "sentinel must be flagged as a repeat");
            }
        }
        high = !high;
    }
});
