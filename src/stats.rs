//! Protocol counters
//!
//! Pure observability: nothing in the receive or output path reads them.
//! Every counter has exactly one writer, so a plain load/store pair is
//! enough and works on cores without read-modify-write atomics.

use core::sync::atomic::{AtomicU32, Ordering};

#[derive(Default)]
pub struct FrameStats {
    latched: AtomicU32,
    short_frames: AtomicU32,
    overrun_edges: AtomicU32,
    pwm_writes: AtomicU32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameStatsSnapshot {
    /// Frames committed to the current value
    pub latched: u32,
    /// Releases of chip-select with 1 to 15 bits received
    pub short_frames: u32,
    /// Clock edges dropped because a full frame was already held
    pub overrun_edges: u32,
    /// Writes to the PWM compare register
    pub pwm_writes: u32,
}

fn bump(counter: &AtomicU32) {
    let count = counter.load(Ordering::Relaxed);
    counter.store(count.saturating_add(1), Ordering::Relaxed);
}

impl FrameStats {
    pub const fn new() -> Self {
        FrameStats {
            latched: AtomicU32::new(0),
            short_frames: AtomicU32::new(0),
            overrun_edges: AtomicU32::new(0),
            pwm_writes: AtomicU32::new(0),
        }
    }

    pub(crate) fn record_latch(&self) {
        bump(&self.latched);
    }

    pub(crate) fn record_short_frame(&self) {
        bump(&self.short_frames);
    }

    pub(crate) fn record_overrun(&self) {
        bump(&self.overrun_edges);
    }

    pub(crate) fn record_pwm_write(&self) {
        bump(&self.pwm_writes);
    }

    pub fn snapshot(&self) -> FrameStatsSnapshot {
        FrameStatsSnapshot {
            latched: self.latched.load(Ordering::Relaxed),
            short_frames: self.short_frames.load(Ordering::Relaxed),
            overrun_edges: self.overrun_edges.load(Ordering::Relaxed),
            pwm_writes: self.pwm_writes.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_record() {
        let stats = FrameStats::new();

        stats.record_latch();
        stats.record_latch();
        stats.record_short_frame();
        stats.record_pwm_write();

        assert_eq!(
            stats.snapshot(),
            FrameStatsSnapshot {
                latched: 2,
                short_frames: 1,
                overrun_edges: 0,
                pwm_writes: 1,
            }
        );
    }

    #[test]
    fn counters_saturate() {
        let stats = FrameStats::new();
        stats.overrun_edges.store(u32::MAX - 1, Ordering::Relaxed);

        stats.record_overrun();
        assert_eq!(stats.snapshot().overrun_edges, u32::MAX);

        stats.record_overrun();
        assert_eq!(stats.snapshot().overrun_edges, u32::MAX);
    }
}
