//! In-memory stand-ins for the GPIO banks and the fault sink.
//!
//! Every bank write is appended to a log shared by all banks of a
//! [`MockHardware`], with the value before and after, so tests can check
//! both the final register state and the order in which it was reached.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::vec::Vec;

use crate::sdk::drivers::port::error::{DiagnosticSink, Fault};
use crate::sdk::drivers::port::hardware::PortHardware;
use crate::sdk::drivers::port::types::Port;
use crate::sdk::mcu::register::RegisterBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegWrite {
    pub port: Port,
    pub offset: u32,
    pub old: u32,
    pub new: u32,
}

type WriteLog = Rc<RefCell<Vec<RegWrite>>>;

pub struct MockBank {
    port: Port,
    regs: RefCell<BTreeMap<u32, u32>>,
    log: WriteLog,
}

impl MockBank {
    pub fn new() -> Self {
        Self::with_log(Port::A, WriteLog::default())
    }

    fn with_log(port: Port, log: WriteLog) -> Self {
        Self {
            port,
            regs: RefCell::new(BTreeMap::new()),
            log,
        }
    }

    /// Sets a register without logging a write, as if left by reset or by
    /// earlier firmware.
    pub fn preset(&self, offset: u32, value: u32) {
        self.regs.borrow_mut().insert(offset, value);
    }

    pub fn value(&self, offset: u32) -> u32 {
        self.regs.borrow().get(&offset).copied().unwrap_or(0)
    }

    pub fn bit(&self, offset: u32, pin: u8) -> bool {
        self.value(offset) & (1 << pin) != 0
    }

    /// Writes issued to this bank, oldest first.
    pub fn writes(&self) -> Vec<RegWrite> {
        self.log
            .borrow()
            .iter()
            .filter(|w| w.port == self.port)
            .copied()
            .collect()
    }

    pub fn snapshot(&self) -> BTreeMap<u32, u32> {
        self.regs.borrow().clone()
    }
}

impl RegisterBank for MockBank {
    fn read(&self, offset: u32) -> u32 {
        self.value(offset)
    }

    fn write(&self, offset: u32, value: u32) {
        let old = self.regs.borrow_mut().insert(offset, value).unwrap_or(0);
        self.log.borrow_mut().push(RegWrite {
            port: self.port,
            offset,
            old,
            new: value,
        });
    }
}

pub struct MockHardware {
    banks: [MockBank; 6],
    log: WriteLog,
    clocks: RefCell<Vec<Port>>,
}

impl MockHardware {
    pub fn new() -> Self {
        let log = WriteLog::default();
        Self {
            banks: Port::ALL.map(|port| MockBank::with_log(port, log.clone())),
            log,
            clocks: RefCell::new(Vec::new()),
        }
    }

    /// All bank writes in issue order.
    pub fn writes(&self) -> Vec<RegWrite> {
        self.log.borrow().clone()
    }

    pub fn clear_writes(&self) {
        self.log.borrow_mut().clear();
    }

    /// Ports whose clock was enabled, in call order.
    pub fn clocks(&self) -> Vec<Port> {
        self.clocks.borrow().clone()
    }

    pub fn snapshot(&self) -> Vec<BTreeMap<u32, u32>> {
        self.banks.iter().map(MockBank::snapshot).collect()
    }
}

impl PortHardware for MockHardware {
    type Bank = MockBank;

    fn bank(&self, port: Port) -> &MockBank {
        &self.banks[port as usize]
    }

    fn enable_clock(&self, port: Port) {
        self.clocks.borrow_mut().push(port);
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub faults: Vec<Fault>,
}

impl DiagnosticSink for RecordingSink {
    fn report(&mut self, fault: Fault) {
        self.faults.push(fault);
    }
}
