//! Frame latch, runs on every chip-select edge
//!
//! Only the releasing edge commits anything. A release with exactly
//! 16 bits copies the accumulator into the shared value and rearms the
//! receiver; any other bit count drops the frame silently, and the
//! configured [`DiscardPolicy`] decides whether the partial bits survive.

use crate::config::DiscardPolicy;
use crate::critical::{self, InterruptMask};
use crate::hal::SerialLines;
use crate::state::{Frame, SharedState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LatchOutcome {
    /// A complete frame was published
    Latched(u16),
    /// Released with a partial frame of this many bits
    Discarded { bits: u8 },
    /// Released with nothing received
    Idle,
    /// The edge asserted chip-select, nothing to do
    Asserted,
}

pub fn on_select_edge<M, L>(state: &SharedState, mask: &M, lines: &L) -> LatchOutcome
where
    M: InterruptMask,
    L: SerialLines,
{
    if lines.select_asserted() {
        return LatchOutcome::Asserted;
    }

    let outcome = critical::free(mask, |cs| {
        let cell = state.frame(cs);
        let frame = cell.get();

        if frame.is_complete() {
            /* Publish before rearming, the receiver cannot run in between */
            state.publish(frame.receive);
            cell.set(Frame::new());
            LatchOutcome::Latched(frame.receive)
        } else if frame.bits == 0 {
            LatchOutcome::Idle
        } else {
            if state.discard_policy() == DiscardPolicy::Reset {
                cell.set(Frame::new());
            }
            LatchOutcome::Discarded { bits: frame.bits }
        }
    });

    match outcome {
        LatchOutcome::Latched(value) => {
            state.stats().record_latch();
            log_trace!("latched {=u16:#x}", value);
        }
        LatchOutcome::Discarded { bits } => {
            state.stats().record_short_frame();
            log_debug!("short frame, {=u8} bits dropped", bits);
        }
        _ => {}
    }

    outcome
}
