//! State shared between the interrupt handlers
//!
//! | field       | written by                  | read by                     |
//! |-------------|-----------------------------|-----------------------------|
//! | `frame`     | bit receiver, frame latch   | bit receiver, frame latch   |
//! | `value`     | frame latch                 | output updater              |
//! | `old_value` | output updater              | output updater              |
//!
//! `frame` is only touched inside a critical section, so the receiver and the
//! latch stay correct even if the platform lets them nest. `value` needs no
//! lock: it is a 16 bit atomic with a single writer, and whatever the output
//! updater reads is a frame that was complete when it was stored. A read that
//! misses a concurrent store just sees the previous frame and picks up the new
//! one on the next timer overflow.

use core::cell::Cell;
use core::sync::atomic::{AtomicU16, Ordering};

use bare_metal::Mutex;

use crate::config::DiscardPolicy;
use crate::stats::FrameStats;

/// Number of bits in one frame.
pub const FRAME_BITS: u8 = 16;

/// The frame currently being clocked in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Accumulator, only meaningful once `bits == FRAME_BITS`
    pub receive: u16,
    /// Bits shifted in so far, never above `FRAME_BITS`
    pub bits: u8,
}

impl Frame {
    pub const fn new() -> Self {
        Frame { receive: 0, bits: 0 }
    }

    pub fn is_complete(&self) -> bool {
        self.bits >= FRAME_BITS
    }

    /// Shift one bit in MSB first. Returns `false` and leaves the frame
    /// untouched once it is complete.
    pub fn shift_in(&mut self, bit: bool) -> bool {
        if self.is_complete() {
            return false;
        }

        self.receive = (self.receive << 1) | u16::from(bit);
        self.bits += 1;
        true
    }
}

pub struct SharedState {
    frame: Mutex<Cell<Frame>>,
    value: AtomicU16,
    old_value: AtomicU16,
    discard: DiscardPolicy,
    stats: FrameStats,
}

impl SharedState {
    pub const fn new(discard: DiscardPolicy) -> Self {
        SharedState {
            frame: Mutex::new(Cell::new(Frame::new())),
            value: AtomicU16::new(0),
            old_value: AtomicU16::new(0),
            discard,
            stats: FrameStats::new(),
        }
    }

    /// The in-flight frame; borrow it inside a critical section.
    pub fn frame<'cs>(&'cs self, cs: &'cs bare_metal::CriticalSection) -> &'cs Cell<Frame> {
        self.frame.borrow(cs)
    }

    /// Most recently latched frame.
    pub fn value(&self) -> u16 {
        self.value.load(Ordering::Acquire)
    }

    pub(crate) fn publish(&self, value: u16) {
        self.value.store(value, Ordering::Release);
    }

    /// Value last written to the compare register.
    pub fn old_value(&self) -> u16 {
        self.old_value.load(Ordering::Relaxed)
    }

    pub(crate) fn set_old_value(&self, value: u16) {
        self.old_value.store(value, Ordering::Relaxed);
    }

    pub fn discard_policy(&self) -> DiscardPolicy {
        self.discard
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_msb_first() {
        let mut frame = Frame::new();

        for bit in [true, false, true, true] {
            assert!(frame.shift_in(bit));
        }

        assert_eq!(frame.receive, 0b1011);
        assert_eq!(frame.bits, 4);
        assert!(!frame.is_complete());
    }

    #[test]
    fn refuses_seventeenth_bit() {
        let mut frame = Frame::new();

        for _ in 0..FRAME_BITS {
            assert!(frame.shift_in(true));
        }

        assert!(frame.is_complete());
        assert!(!frame.shift_in(false));
        assert_eq!(frame.receive, 0xFFFF);
        assert_eq!(frame.bits, FRAME_BITS);
    }

    #[test]
    fn starts_idle() {
        let state = SharedState::new(DiscardPolicy::Reset);

        assert_eq!(state.value(), 0);
        assert_eq!(state.old_value(), 0);
        assert_eq!(state.discard_policy(), DiscardPolicy::Reset);
        assert_eq!(state.stats().snapshot().latched, 0);
    }
}
