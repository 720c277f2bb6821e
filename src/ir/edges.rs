//! Interrupt-fed IR edge queue.
//!
//! The GPIO any-edge ISR on the receiver pin records each transition
//! here; the main loop drains it into the NEC decoder.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ IR pin ISR   │────▶│  Edge Queue  │────▶│  Main Loop   │
//! │ (producer)   │     │  (lock-free) │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! Each slot packs the microsecond timestamp and the line level into one
//! `u32`: bit 0 is the level, the remaining bits the timestamp. Losing the
//! lowest microsecond is irrelevant at NEC tolerances.

use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// Pending-edge capacity. One full NEC frame is 68 edges.
pub const EDGE_QUEUE_CAP: usize = 128;

/// One transition on the receiver line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Microsecond timestamp, wrapping.
    pub at_us: u32,
    /// Line level after the transition. The demodulator idles HIGH.
    pub high: bool,
}

impl Edge {
    const fn pack(self) -> u32 {
        (self.at_us & !1) | self.high as u32
    }

    const fn unpack(raw: u32) -> Self {
        Self {
            at_us: raw & !1,
            high: raw & 1 != 0,
        }
    }
}

/// Lock-free single-producer / single-consumer ring.
///
/// Exactly one context may push (the ISR) and exactly one may pop (the
/// main loop). One slot stays empty to tell full from empty.
pub struct EdgeQueue {
    head: AtomicUsize,
    tail: AtomicUsize,
    slots: [AtomicU32; EDGE_QUEUE_CAP],
    dropped: AtomicU32,
}

impl Default for EdgeQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeQueue {
    pub const fn new() -> Self {
        Self {
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            slots: [const { AtomicU32::new(0) }; EDGE_QUEUE_CAP],
            dropped: AtomicU32::new(0),
        }
    }

    /// Push an edge. Safe to call from ISR context.
    /// Returns `false` if the queue is full (edge dropped).
    pub fn push(&self, edge: Edge) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        let next = (head + 1) % EDGE_QUEUE_CAP;

        if next == tail {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        self.slots[head].store(edge.pack(), Ordering::Relaxed);
        self.head.store(next, Ordering::Release);
        true
    }

    /// Pop the oldest edge. Main loop only.
    pub fn pop(&self) -> Option<Edge> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);

        if tail == head {
            return None;
        }

        let raw = self.slots[tail].load(Ordering::Relaxed);
        self.tail.store((tail + 1) % EDGE_QUEUE_CAP, Ordering::Release);
        Some(Edge::unpack(raw))
    }

    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Relaxed);
        (head + EDGE_QUEUE_CAP - tail) % EDGE_QUEUE_CAP
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Edges lost to overflow since boot.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// The receiver pin's queue, fed by the GPIO ISR.
pub static IR_EDGES: EdgeQueue = EdgeQueue::new();
