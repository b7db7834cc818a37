//! Bit receiver, runs on every rising edge of the serial clock

use crate::critical::{self, InterruptMask};
use crate::hal::SerialLines;
use crate::state::SharedState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockOutcome {
    /// One bit was appended to the frame
    Shifted,
    /// Chip-select was released, the edge was ignored
    Deselected,
    /// A full frame is already held, the edge was dropped
    Overrun,
}

pub fn on_clock_edge<M, L>(state: &SharedState, mask: &M, lines: &L) -> ClockOutcome
where
    M: InterruptMask,
    L: SerialLines,
{
    if !lines.select_asserted() {
        return ClockOutcome::Deselected;
    }

    /* Sample before anything else, the master may move MOSI soon */
    let bit = lines.data_high();

    let shifted = critical::free(mask, |cs| {
        let cell = state.frame(cs);
        let mut frame = cell.get();
        let shifted = frame.shift_in(bit);
        cell.set(frame);
        shifted
    });

    if shifted {
        ClockOutcome::Shifted
    } else {
        state.stats().record_overrun();
        ClockOutcome::Overrun
    }
}
