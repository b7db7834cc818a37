#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::vec::Vec;

use spi_pwm_slave::{
    DiscardPolicy, InterruptMask, LatchOutcome, PwmCompare, PwmSlave, SerialLines, SharedState,
};

pub struct MockMask {
    pub enabled: Cell<bool>,
    pub acquires: Cell<u32>,
}

impl MockMask {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Cell::new(enabled),
            acquires: Cell::new(0),
        }
    }
}

/* Each test drives the slave from its own thread only */
unsafe impl InterruptMask for MockMask {
    type State = bool;

    fn acquire(&self) -> bool {
        self.acquires.set(self.acquires.get() + 1);
        self.enabled.replace(false)
    }

    fn release(&self, state: bool) {
        self.enabled.set(state);
    }
}

#[derive(Default)]
pub struct MockLines {
    pub data: Cell<bool>,
    pub select: Cell<bool>,
}

impl SerialLines for MockLines {
    fn data_high(&self) -> bool {
        self.data.get()
    }

    fn select_asserted(&self) -> bool {
        self.select.get()
    }
}

/// Compare register that is stored one byte at a time, like a 16 bit
/// register on an 8 bit bus. Whenever interrupts are enabled between the two
/// byte stores, a nested interrupt is simulated and records what it reads.
pub struct MockPwm<'a> {
    mask: &'a MockMask,
    low: Cell<u8>,
    high: Cell<u8>,
    pub writes: RefCell<Vec<u16>>,
    pub nested_reads: RefCell<Vec<u16>>,
}

impl<'a> MockPwm<'a> {
    pub fn new(mask: &'a MockMask) -> Self {
        Self {
            mask,
            low: Cell::new(0),
            high: Cell::new(0),
            writes: RefCell::new(Vec::new()),
            nested_reads: RefCell::new(Vec::new()),
        }
    }

    pub fn register(&self) -> u16 {
        u16::from(self.high.get()) << 8 | u16::from(self.low.get())
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl PwmCompare for MockPwm<'_> {
    fn write_compare(&self, value: u16) {
        self.low.set(value as u8);

        if self.mask.enabled.get() {
            self.nested_reads.borrow_mut().push(self.register());
        }

        self.high.set((value >> 8) as u8);
        self.writes.borrow_mut().push(value);
    }
}

pub type Slave<'a> = PwmSlave<'a, MockMask, MockLines, MockPwm<'a>>;

pub struct Rig {
    pub state: SharedState,
    pub mask: MockMask,
    pub lines: MockLines,
}

impl Rig {
    pub fn new(discard: DiscardPolicy) -> Self {
        Self {
            state: SharedState::new(discard),
            mask: MockMask::new(true),
            lines: MockLines::default(),
        }
    }

    pub fn slave<'a>(&'a self, pwm: &'a MockPwm<'a>) -> Slave<'a> {
        PwmSlave::new(&self.state, &self.mask, &self.lines, pwm)
    }

    pub fn select(&self, slave: &Slave<'_>) -> LatchOutcome {
        self.lines.select.set(true);
        slave.on_select_edge()
    }

    pub fn release(&self, slave: &Slave<'_>) -> LatchOutcome {
        self.lines.select.set(false);
        slave.on_select_edge()
    }

    pub fn clock_bit(&self, slave: &Slave<'_>, bit: bool) {
        self.lines.data.set(bit);
        slave.on_clock_edge();
    }

    /// Clock the top `count` bits of `word`, MSB first.
    pub fn clock_bits(&self, slave: &Slave<'_>, word: u16, count: u32) {
        for i in 0..count {
            self.clock_bit(slave, (word >> (15 - i)) & 1 == 1);
        }
    }

    /// A complete select, 16 clocks, release transaction.
    pub fn send_frame(&self, slave: &Slave<'_>, word: u16) -> LatchOutcome {
        self.select(slave);
        self.clock_bits(slave, word, 16);
        self.release(slave)
    }
}
