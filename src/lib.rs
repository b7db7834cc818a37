//! Bit-banged SPI slave that turns 16 bit frames into a PWM duty cycle.
//!
//! The master clocks a frame in MSB first while holding chip-select low and
//! releases chip-select to commit it. Three interrupt handlers do all the
//! work:
//!
//! * [`receiver::on_clock_edge`] shifts one MOSI bit in per SCK rising edge,
//! * [`latch::on_select_edge`] publishes a complete frame when CS is released,
//! * [`output::on_timer_overflow`] copies a new value into the PWM compare
//!   register once per timer period, through [`output::write_pwm`].
//!
//! The handlers only share a [`SharedState`] and are bound to the hardware
//! through [`InterruptMask`], [`SerialLines`] and [`PwmCompare`], so the whole
//! protocol runs against test doubles on the host. The [`board`] module holds
//! the ATSAMD20E15A bindings and bring-up.

#![cfg_attr(not(test), no_std)]

#[cfg(all(target_arch = "arm", feature = "defmt"))]
use defmt_rtt as _;

#[macro_use]
mod log;

#[cfg(target_arch = "arm")]
pub mod board;
pub mod config;
pub mod critical;
pub mod hal;
pub mod latch;
pub mod output;
pub mod receiver;
pub mod regs;
pub mod state;
pub mod stats;
pub mod trigger;

pub use config::{Config, ConfigError, DiscardPolicy, Prescaler};
pub use critical::{CriticalSection, InterruptMask};
pub use hal::{PwmCompare, SerialLines};
pub use latch::LatchOutcome;
pub use output::{write_pwm, UpdateOutcome};
pub use receiver::ClockOutcome;
pub use state::{Frame, SharedState, FRAME_BITS};
pub use stats::{FrameStats, FrameStatsSnapshot};
pub use trigger::{Outcome, PwmSlave, Trigger};
