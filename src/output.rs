//! Output path: timer overflow handler and the atomic compare register write

use crate::critical::{self, InterruptMask};
use crate::hal::PwmCompare;
use crate::state::SharedState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateOutcome {
    /// The compare register now holds this value
    Applied(u16),
    /// The latched value was already applied
    Unchanged,
}

/// Write `value` to the compare register with interrupts disabled.
///
/// The previous interrupt enable state is restored afterwards rather than
/// interrupts being switched back on, so this may be called from a context
/// that already runs with interrupts off.
pub fn write_pwm<M, P>(mask: &M, pwm: &P, value: u16)
where
    M: InterruptMask,
    P: PwmCompare,
{
    critical::free(mask, |_| pwm.write_compare(value));
}

/// Apply the latched value if it differs from what the register holds.
///
/// Runs on every timer overflow, so a freshly latched frame reaches the
/// output within one PWM period.
pub fn on_timer_overflow<M, P>(state: &SharedState, mask: &M, pwm: &P) -> UpdateOutcome
where
    M: InterruptMask,
    P: PwmCompare,
{
    let value = state.value();

    if value == state.old_value() {
        return UpdateOutcome::Unchanged;
    }

    write_pwm(mask, pwm, value);
    state.set_old_value(value);
    state.stats().record_pwm_write();

    UpdateOutcome::Applied(value)
}
