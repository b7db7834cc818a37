//! Register blocks of the ATSAMD20 peripherals the slave touches
//!
//! Only the registers used by the bring-up and the handlers are spelled out.
//! Interrupt flag registers are write-one-to-clear, so they are plain
//! `VolatileCell`s: a read-modify-write through `RW::modify` would clear
//! flags that were never looked at.

use bare_metal::Peripheral;
use vcell::VolatileCell;
use volatile_register::{RO, RW, WO};

#[repr(C)]
pub struct PortGroup {
    pub dir: RW<u32>,
    pub dirclr: WO<u32>,
    pub dirset: WO<u32>,
    pub dirtgl: WO<u32>,
    pub out: RW<u32>,
    pub outclr: WO<u32>,
    pub outset: WO<u32>,
    pub outtgl: WO<u32>,
    pub in_: RO<u32>,
    pub ctrl: RW<u32>,
    pub wrconfig: WO<u32>,
    _reserved0: [u32; 1],
    pub pmux: [RW<u8>; 16],
    pub pincfg: [RW<u8>; 32],
}

#[repr(C)]
pub struct Eic {
    pub ctrl: RW<u8>,
    pub status: RO<u8>,
    pub nmictrl: RW<u8>,
    pub nmiflag: VolatileCell<u8>,
    pub evctrl: RW<u32>,
    pub intenclr: WO<u32>,
    pub intenset: WO<u32>,
    pub intflag: VolatileCell<u32>,
    pub wakeup: RW<u32>,
    pub config: [RW<u32>; 2],
}

#[repr(C)]
pub struct Sysctrl {
    pub intenclr: RW<u32>,
    pub intenset: RW<u32>,
    pub intflag: VolatileCell<u32>,
    pub pclksr: RO<u32>,
    _reserved0: [u32; 4],
    pub osc8m: RW<u32>,
}

#[repr(C)]
pub struct Gclk {
    pub ctrl: RW<u8>,
    pub status: RO<u8>,
    pub clkctrl: RW<u16>,
    pub genctrl: RW<u32>,
    pub gendiv: RW<u32>,
}

#[repr(C)]
pub struct Pm {
    pub ctrl: RW<u8>,
    pub sleep: RW<u8>,
    _reserved0: [u8; 6],
    pub cpusel: RW<u8>,
    pub apbasel: RW<u8>,
    pub apbbsel: RW<u8>,
    pub apbcsel: RW<u8>,
    _reserved1: [u8; 8],
    pub ahbmask: RW<u32>,
    pub apbamask: RW<u32>,
    pub apbbmask: RW<u32>,
    pub apbcmask: RW<u32>,
}

/* TC in 16 bit counter mode */
#[repr(C)]
pub struct TcCount16 {
    pub ctrla: RW<u16>,
    pub readreq: RW<u16>,
    pub ctrlbclr: RW<u8>,
    pub ctrlbset: RW<u8>,
    pub ctrlc: RW<u8>,
    _reserved0: u8,
    pub dbgctrl: RW<u8>,
    _reserved1: u8,
    pub evctrl: RW<u16>,
    pub intenclr: RW<u8>,
    pub intenset: RW<u8>,
    pub intflag: VolatileCell<u8>,
    pub status: RO<u8>,
    pub count: RW<u16>,
    _reserved2: [u8; 6],
    pub cc: [RW<u16>; 2],
}

pub const PM: Peripheral<Pm> = unsafe { Peripheral::new(0x4000_0400) };
pub const SYSCTRL: Peripheral<Sysctrl> = unsafe { Peripheral::new(0x4000_0800) };
pub const GCLK: Peripheral<Gclk> = unsafe { Peripheral::new(0x4000_0C00) };
pub const EIC: Peripheral<Eic> = unsafe { Peripheral::new(0x4000_1800) };
pub const PORT: Peripheral<PortGroup> = unsafe { Peripheral::new(0x4100_4400) };
pub const TC0: Peripheral<TcCount16> = unsafe { Peripheral::new(0x4200_2000) };

/* Common synchronisation busy flag of GCLK, EIC and TC STATUS */
pub const STATUS_SYNCBUSY: u8 = 1 << 7;

pub const SYSCTRL_OSC8M_PRESC_MASK: u32 = 0x3 << 8;

pub const PM_APBAMASK_EIC: u32 = 1 << 6;
pub const PM_APBCMASK_TC0: u32 = 1 << 8;

pub const GCLK_CLKCTRL_CLKEN: u16 = 1 << 14;
pub const GCLK_CLKCTRL_GEN_GCLK0: u16 = 0 << 8;
pub const GCLK_CLKCTRL_ID_EIC: u16 = 0x03;
pub const GCLK_CLKCTRL_ID_TC0_TC1: u16 = 0x13;

pub const PORT_PINCFG_PMUXEN: u8 = 1 << 0;
pub const PORT_PINCFG_INEN: u8 = 1 << 1;
pub const PORT_PINCFG_PULLEN: u8 = 1 << 2;
pub const PORT_PMUX_A: u8 = 0x0;
pub const PORT_PMUX_E: u8 = 0x4;

pub const EIC_CTRL_SWRST: u8 = 1 << 0;
pub const EIC_CTRL_ENABLE: u8 = 1 << 1;
pub const EIC_SENSE_RISE: u32 = 0x1;
pub const EIC_SENSE_BOTH: u32 = 0x3;

pub const TC_CTRLA_SWRST: u16 = 1 << 0;
pub const TC_CTRLA_ENABLE: u16 = 1 << 1;
pub const TC_CTRLA_MODE_COUNT16: u16 = 0 << 2;
pub const TC_CTRLA_WAVEGEN_MPWM: u16 = 3 << 5;
pub const TC_CTRLA_PRESCALER_SHIFT: u16 = 8;
pub const TC_CTRLB_ONESHOT: u8 = 1 << 2;
pub const TC_INT_OVF: u8 = 1 << 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum Interrupt {
    PM = 0,
    SYSCTRL = 1,
    WDT = 2,
    RTC = 3,
    EIC = 4,
    NVMCTRL = 5,
    EVSYS = 6,
    SERCOM0 = 7,
    SERCOM1 = 8,
    SERCOM2 = 9,
    SERCOM3 = 10,
    SERCOM4 = 11,
    SERCOM5 = 12,
    TC0 = 13,
    TC1 = 14,
    TC2 = 15,
    TC3 = 16,
    TC4 = 17,
    TC5 = 18,
    TC6 = 19,
    TC7 = 20,
    ADC = 21,
    AC = 22,
    DAC = 23,
    PTC = 24,
}

impl Interrupt {
    /// Map the IRQ number handed to `DefaultHandler` back to a device interrupt.
    pub fn from_irqn(irqn: i16) -> Option<Self> {
        let interrupt = match irqn {
            0 => Interrupt::PM,
            1 => Interrupt::SYSCTRL,
            2 => Interrupt::WDT,
            3 => Interrupt::RTC,
            4 => Interrupt::EIC,
            5 => Interrupt::NVMCTRL,
            6 => Interrupt::EVSYS,
            7 => Interrupt::SERCOM0,
            8 => Interrupt::SERCOM1,
            9 => Interrupt::SERCOM2,
            10 => Interrupt::SERCOM3,
            11 => Interrupt::SERCOM4,
            12 => Interrupt::SERCOM5,
            13 => Interrupt::TC0,
            14 => Interrupt::TC1,
            15 => Interrupt::TC2,
            16 => Interrupt::TC3,
            17 => Interrupt::TC4,
            18 => Interrupt::TC5,
            19 => Interrupt::TC6,
            20 => Interrupt::TC7,
            21 => Interrupt::ADC,
            22 => Interrupt::AC,
            23 => Interrupt::DAC,
            24 => Interrupt::PTC,
            _ => return None,
        };

        Some(interrupt)
    }
}

#[cfg(target_arch = "arm")]
unsafe impl cortex_m::interrupt::InterruptNumber for Interrupt {
    fn number(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{offset_of, size_of};

    #[test]
    fn register_offsets() {
        assert_eq!(offset_of!(PortGroup, in_), 0x20);
        assert_eq!(offset_of!(PortGroup, pmux), 0x30);
        assert_eq!(offset_of!(PortGroup, pincfg), 0x40);
        assert_eq!(offset_of!(Eic, intflag), 0x10);
        assert_eq!(offset_of!(Eic, config), 0x18);
        assert_eq!(offset_of!(Sysctrl, osc8m), 0x20);
        assert_eq!(offset_of!(Gclk, clkctrl), 0x02);
        assert_eq!(offset_of!(Gclk, gendiv), 0x08);
        assert_eq!(offset_of!(Pm, apbamask), 0x18);
        assert_eq!(offset_of!(Pm, apbcmask), 0x20);
        assert_eq!(offset_of!(TcCount16, evctrl), 0x0A);
        assert_eq!(offset_of!(TcCount16, intflag), 0x0E);
        assert_eq!(offset_of!(TcCount16, count), 0x10);
        assert_eq!(offset_of!(TcCount16, cc), 0x18);
        assert_eq!(size_of::<TcCount16>(), 0x1C);
    }

    #[test]
    fn irq_numbers() {
        assert_eq!(Interrupt::from_irqn(4), Some(Interrupt::EIC));
        assert_eq!(Interrupt::from_irqn(13), Some(Interrupt::TC0));
        assert_eq!(Interrupt::from_irqn(-1), None);
        assert_eq!(Interrupt::from_irqn(25), None);
    }
}
