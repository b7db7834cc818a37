//! SPI slave firmware: 16 bit frames on PA14/PA15/PA16 set the PWM duty
//! cycle on PA05.
//!
//! Build with `cargo build --release --example spi_pwm_slave --features rt
//! --target thumbv6m-none-eabi`.

#![no_std]
#![no_main]

extern crate panic_halt;

use cortex_m_rt::{entry, exception};
use spi_pwm_slave::board::{
    bring_up, clear_tc0_overflow, delay_init, take_eic_triggers, PortLines, Primask, Tc0Compare,
};
use spi_pwm_slave::regs::Interrupt;
use spi_pwm_slave::{Config, PwmSlave, SharedState, Trigger};

const CONFIG: Config = Config::new();

static STATE: SharedState = SharedState::new(CONFIG.discard);
static MASK: Primask = Primask;
static LINES: PortLines = PortLines;
static PWM: Tc0Compare = Tc0Compare;

fn slave() -> PwmSlave<'static, Primask, PortLines, Tc0Compare> {
    PwmSlave::new(&STATE, &MASK, &LINES, &PWM)
}

#[entry]
fn main() -> ! {
    delay_init();

    let Some(mut peripherals) = cortex_m::Peripherals::take() else {
        loop {
            cortex_m::asm::wfi();
        }
    };

    bring_up(&mut peripherals.NVIC, &CONFIG);

    unsafe { cortex_m::interrupt::enable() };

    /* Start from a known duty cycle */
    slave().write_pwm(0);

    /* Nothing here, everything runs in the interrupts */
    loop {
        cortex_m::asm::wfi();
    }
}

/* The device interrupts are not in the vector table of their own, every one
 * of them lands here with its IRQ number */
#[exception]
unsafe fn DefaultHandler(irqn: i16) {
    let slave = slave();

    match Interrupt::from_irqn(irqn) {
        Some(Interrupt::EIC) => {
            for trigger in take_eic_triggers().triggers() {
                slave.dispatch(trigger);
            }
        }
        Some(Interrupt::TC0) => {
            clear_tc0_overflow();
            slave.dispatch(Trigger::TimerOverflow);
        }
        _ => {}
    }
}
