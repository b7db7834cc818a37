//! ATSAMD20E15A bring-up and hardware bindings
//!
//! Pin map, all on port A:
//!
//! | pin  | function                                 |
//! |------|------------------------------------------|
//! | PA05 | PWM out, TC0/WO[1]                       |
//! | PA14 | SCK, EXTINT14, rising edge               |
//! | PA15 | MOSI, plain input                        |
//! | PA16 | CS, EXTINT0, both edges, pull-up, active low |

use bare_metal::CriticalSection;
use cortex_m::interrupt;
use cortex_m::peripheral::NVIC;
use cortex_m::register::primask;

use crate::config::Config;
use crate::critical::InterruptMask;
use crate::hal::{PwmCompare, SerialLines};
use crate::regs::*;
use crate::trigger::Trigger;

pub const PIN_PWM: usize = 5;
pub const PIN_SCK: usize = 14;
pub const PIN_MOSI: usize = 15;
pub const PIN_CS: usize = 16;

const EXTINT_SCK: u32 = 14;
const EXTINT_CS: u32 = 0;

/* Same level for EIC and TC0 so the handlers never preempt each other */
const IRQ_PRIORITY: u8 = 0x40;

pub fn delay_init() {
    for _ in 0..200_000 {
        cortex_m::asm::nop();
    }
}

fn wait_gclk(gclk: &Gclk) {
    while gclk.status.read() & STATUS_SYNCBUSY != 0 {}
}

fn wait_eic(eic: &Eic) {
    while eic.status.read() & STATUS_SYNCBUSY != 0 {}
}

fn wait_tc(tc: &TcCount16) {
    while tc.status.read() & STATUS_SYNCBUSY != 0 {}
}

fn set_pmux(port: &PortGroup, pin: usize, function: u8) {
    unsafe {
        port.pmux[pin >> 1].modify(|r| {
            if pin & 1 == 1 {
                (r & 0x0F) | (function << 4)
            } else {
                (r & 0xF0) | function
            }
        });
    }
}

/* EIC CONFIGn holds eight 4 bit SENSE/FILTEN slots */
fn set_sense(eic: &Eic, extint: u32, sense: u32) {
    let shift = (extint % 8) * 4;

    unsafe {
        eic.config[(extint / 8) as usize].modify(|r| (r & !(0xF << shift)) | (sense << shift));
    }
}

/// Run the CPU from the 8 MHz oscillator without its reset divider of 8.
pub fn init_8_mhz_clock(cs: &CriticalSection) {
    let sysctrl = SYSCTRL.borrow(cs);

    unsafe { sysctrl.osc8m.modify(|r| r & !SYSCTRL_OSC8M_PRESC_MASK) };
}

pub fn init_pins(cs: &CriticalSection) {
    let port = PORT.borrow(cs);

    unsafe {
        /* SCK, MOSI and CS are inputs, PWM is an output */
        port.dirclr.write((1 << PIN_SCK) | (1 << PIN_MOSI) | (1 << PIN_CS));
        port.dirset.write(1 << PIN_PWM);

        /* Pull CS up so a floating line reads as released */
        port.outset.write(1 << PIN_CS);

        port.pincfg[PIN_MOSI].write(PORT_PINCFG_INEN);
        port.pincfg[PIN_SCK].write(PORT_PINCFG_INEN | PORT_PINCFG_PMUXEN);
        port.pincfg[PIN_CS].write(PORT_PINCFG_INEN | PORT_PINCFG_PULLEN | PORT_PINCFG_PMUXEN);
        port.pincfg[PIN_PWM].write(PORT_PINCFG_PMUXEN);
    }

    set_pmux(port, PIN_SCK, PORT_PMUX_A);
    set_pmux(port, PIN_CS, PORT_PMUX_A);
    set_pmux(port, PIN_PWM, PORT_PMUX_E);
}

/// Free running TC0 in match PWM mode: CC0 is TOP, CC1 the duty cycle.
pub fn setup_tc0(cs: &CriticalSection, config: &Config) {
    let gclk = GCLK.borrow(cs);
    let pm = PM.borrow(cs);
    let tc0 = TC0.borrow(cs);

    /* Setup CPU clock for TC0 and TC1 */
    unsafe {
        gclk.clkctrl
            .write(GCLK_CLKCTRL_CLKEN | GCLK_CLKCTRL_GEN_GCLK0 | GCLK_CLKCTRL_ID_TC0_TC1)
    };

    /* And wait */
    wait_gclk(gclk);

    /* Enable clock for TC0 */
    unsafe { pm.apbcmask.modify(|r| r | PM_APBCMASK_TC0) };

    unsafe { tc0.ctrla.write(TC_CTRLA_SWRST) };
    while tc0.ctrla.read() & TC_CTRLA_SWRST != 0 {}

    unsafe {
        tc0.ctrla.write(
            TC_CTRLA_MODE_COUNT16
                | TC_CTRLA_WAVEGEN_MPWM
                | (config.prescaler.bits() << TC_CTRLA_PRESCALER_SHIFT),
        )
    };
    wait_tc(tc0);

    /* Make timer autorestart */
    unsafe { tc0.ctrlbclr.write(TC_CTRLB_ONESHOT) };
    wait_tc(tc0);

    /* TOP, and a zero duty cycle until the first frame arrives */
    unsafe { tc0.cc[0].write(config.pwm_top) };
    wait_tc(tc0);
    unsafe { tc0.cc[1].write(0) };
    wait_tc(tc0);

    /* Set interrupt to trigger on overflow */
    tc0.intflag.set(TC_INT_OVF);
    unsafe { tc0.intenset.write(TC_INT_OVF) };

    unsafe { tc0.ctrla.modify(|r| r | TC_CTRLA_ENABLE) };
    wait_tc(tc0);
}

/// SCK interrupts on its rising edge, CS on both edges.
pub fn setup_eic(cs: &CriticalSection) {
    let eic = EIC.borrow(cs);
    let pm = PM.borrow(cs);
    let gclk = GCLK.borrow(cs);

    /* Enable clock for EIC */
    unsafe { pm.apbamask.modify(|r| r | PM_APBAMASK_EIC) };

    /* Set up clock generator 0 as input for EIC */
    unsafe { gclk.clkctrl.write(GCLK_CLKCTRL_CLKEN | GCLK_CLKCTRL_GEN_GCLK0 | GCLK_CLKCTRL_ID_EIC) };
    wait_gclk(gclk);

    unsafe { eic.ctrl.write(EIC_CTRL_SWRST) };
    while eic.ctrl.read() & EIC_CTRL_SWRST != 0 {}
    wait_eic(eic);

    set_sense(eic, EXTINT_SCK, EIC_SENSE_RISE);
    set_sense(eic, EXTINT_CS, EIC_SENSE_BOTH);
    wait_eic(eic);

    let lines = (1 << EXTINT_SCK) | (1 << EXTINT_CS);
    eic.intflag.set(lines);
    unsafe { eic.intenset.write(lines) };
    wait_eic(eic);

    unsafe { eic.ctrl.modify(|r| r | EIC_CTRL_ENABLE) };
    wait_eic(eic);
}

/// Configure clock, pins, timer and EIC, then unmask their interrupts.
///
/// Global interrupts stay as they were; the caller enables them once the
/// shared state is in place.
pub fn bring_up(nvic: &mut NVIC, config: &Config) {
    interrupt::free(|cs| {
        init_8_mhz_clock(cs);
        init_pins(cs);
        setup_tc0(cs, config);
        setup_eic(cs);
    });

    for irq in [Interrupt::EIC, Interrupt::TC0] {
        unsafe { nvic.set_priority(irq, IRQ_PRIORITY) };
        NVIC::unpend(irq);
        unsafe { NVIC::unmask(irq) };
    }

    log_info!(
        "bring-up done, top {=u16:#x}, prescaler {=u16}, discard {}",
        config.pwm_top,
        config.prescaler.divider(),
        config.discard
    );
}

/// Global interrupt enable through PRIMASK.
pub struct Primask;

/* Single core, so a set PRIMASK keeps every other context out */
unsafe impl InterruptMask for Primask {
    type State = bool;

    fn acquire(&self) -> bool {
        let was_active = primask::read().is_active();
        interrupt::disable();
        was_active
    }

    fn release(&self, was_active: bool) {
        if was_active {
            unsafe { interrupt::enable() }
        }
    }
}

fn port_in() -> u32 {
    unsafe { (*PORT.get()).in_.read() }
}

/// MOSI and CS read straight from PORT.IN.
pub struct PortLines;

impl SerialLines for PortLines {
    fn data_high(&self) -> bool {
        port_in() & (1 << PIN_MOSI) != 0
    }

    fn select_asserted(&self) -> bool {
        port_in() & (1 << PIN_CS) == 0
    }
}

/// TC0 CC1, the duty cycle of PA05.
pub struct Tc0Compare;

impl PwmCompare for Tc0Compare {
    fn write_compare(&self, value: u16) {
        let tc0 = unsafe { &*TC0.get() };

        /* The write syncs into the TC clock domain, a second one before
         * SYNCBUSY clears would stall the bus */
        wait_tc(tc0);
        unsafe { tc0.cc[1].write(value) };
    }
}

pub fn clear_tc0_overflow() {
    let tc0 = unsafe { &*TC0.get() };
    tc0.intflag.set(TC_INT_OVF);
}

/// EIC lines that fired since the last call.
#[derive(Clone, Copy, Debug, Default)]
pub struct EicTriggers {
    pub clock: bool,
    pub select: bool,
}

impl EicTriggers {
    /// Clock first, so a final clock edge that raced the release is counted
    /// before the frame is latched.
    pub fn triggers(self) -> impl Iterator<Item = Trigger> {
        [(self.clock, Trigger::ClockEdge), (self.select, Trigger::SelectEdge)]
            .into_iter()
            .filter_map(|(fired, trigger)| if fired { Some(trigger) } else { None })
    }
}

/// Read and acknowledge the SCK and CS interrupt flags.
pub fn take_eic_triggers() -> EicTriggers {
    let eic = unsafe { &*EIC.get() };
    let flags = eic.intflag.get() & ((1 << EXTINT_SCK) | (1 << EXTINT_CS));

    eic.intflag.set(flags);

    EicTriggers {
        clock: flags & (1 << EXTINT_SCK) != 0,
        select: flags & (1 << EXTINT_CS) != 0,
    }
}
