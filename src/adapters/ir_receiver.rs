//! IR receiver adapter. Implements [`RemotePort`] on top of the ISR edge
//! queue and the NEC decoder.
//!
//! Each `poll()` drains every pending edge through the decoder. Decoded
//! frames are buffered so that a backlog accumulated during a blocking
//! tone is handed out one frame per loop iteration, oldest first.

use heapless::Deque;
use log::debug;

use crate::app::commands::RemoteEvent;
use crate::app::ports::RemotePort;
use crate::ir::edges::{EdgeQueue, IR_EDGES};
use crate::ir::nec::NecDecoder;

const PENDING_CAP: usize = 8;

pub struct IrReceiverAdapter<'q> {
    edges: &'q EdgeQueue,
    decoder: NecDecoder,
    pending: Deque<RemoteEvent, PENDING_CAP>,
}

impl IrReceiverAdapter<'static> {
    /// Adapter reading the queue fed by the receiver-pin ISR.
    pub fn from_isr_queue() -> Self {
        Self::new(&IR_EDGES)
    }
}

impl<'q> IrReceiverAdapter<'q> {
    pub fn new(edges: &'q EdgeQueue) -> Self {
        Self {
            edges,
            decoder: NecDecoder::new(),
            pending: Deque::new(),
        }
    }

    /// Frames abandoned by the decoder since boot.
    pub fn rejected_frames(&self) -> u32 {
        self.decoder.rejected()
    }

    fn drain_edges(&mut self) {
        while let Some(edge) = self.edges.pop() {
            let Some(frame) = self.decoder.push_edge(edge) else {
                continue;
            };
            let event = RemoteEvent::from_decoder(frame.code, frame.repeat);
            if self.pending.push_back(event).is_err() {
                debug!("IR: frame backlog full, dropping {:#010X}", frame.code);
            }
        }
    }
}

impl RemotePort for IrReceiverAdapter<'_> {
    fn poll(&mut self) -> Option<RemoteEvent> {
        self.drain_edges();
        self.pending.pop_front()
    }
}
