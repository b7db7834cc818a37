//! Binding of the handlers to their trigger sources

use crate::critical::InterruptMask;
use crate::hal::{PwmCompare, SerialLines};
use crate::latch::{self, LatchOutcome};
use crate::output::{self, UpdateOutcome};
use crate::receiver::{self, ClockOutcome};
use crate::state::SharedState;

/// Hardware events the slave reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// Rising edge on the serial clock
    ClockEdge,
    /// Any edge on chip-select
    SelectEdge,
    /// PWM timer reached TOP and wrapped
    TimerOverflow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Clock(ClockOutcome),
    Select(LatchOutcome),
    Timer(UpdateOutcome),
}

/// The slave with its state and hardware collaborators bound together.
pub struct PwmSlave<'a, M, L, P> {
    state: &'a SharedState,
    mask: &'a M,
    lines: &'a L,
    pwm: &'a P,
}

impl<'a, M, L, P> PwmSlave<'a, M, L, P>
where
    M: InterruptMask,
    L: SerialLines,
    P: PwmCompare,
{
    pub fn new(state: &'a SharedState, mask: &'a M, lines: &'a L, pwm: &'a P) -> Self {
        PwmSlave {
            state,
            mask,
            lines,
            pwm,
        }
    }

    pub fn state(&self) -> &SharedState {
        self.state
    }

    pub fn on_clock_edge(&self) -> ClockOutcome {
        receiver::on_clock_edge(self.state, self.mask, self.lines)
    }

    pub fn on_select_edge(&self) -> LatchOutcome {
        latch::on_select_edge(self.state, self.mask, self.lines)
    }

    pub fn on_timer_overflow(&self) -> UpdateOutcome {
        output::on_timer_overflow(self.state, self.mask, self.pwm)
    }

    /// Force the compare register, bypassing the change detection.
    pub fn write_pwm(&self, value: u16) {
        output::write_pwm(self.mask, self.pwm, value);
    }

    pub fn dispatch(&self, trigger: Trigger) -> Outcome {
        match trigger {
            Trigger::ClockEdge => Outcome::Clock(self.on_clock_edge()),
            Trigger::SelectEdge => Outcome::Select(self.on_select_edge()),
            Trigger::TimerOverflow => Outcome::Timer(self.on_timer_overflow()),
        }
    }
}
