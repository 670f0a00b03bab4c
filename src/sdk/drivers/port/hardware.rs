use core::cell::Cell;

use critical_section::Mutex;

use crate::sdk::drivers::port::resolver::resolve;
use crate::sdk::drivers::port::types::Port;
use crate::sdk::mcu::clock::enable_port_clock;
use crate::sdk::mcu::register::{MmioBank, RegisterBank};

/// Everything the driver needs from the chip: the register bank of each port
/// and the clock gate in front of it.
pub trait PortHardware {
    type Bank: RegisterBank;

    fn bank(&self, port: Port) -> &Self::Bank;

    fn enable_clock(&self, port: Port);
}

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// The six memory-mapped GPIO banks of the TM4C123GH6PM.
pub struct Tm4c123 {
    banks: [MmioBank; 6],
}

impl Tm4c123 {
    /// Hands out the GPIO banks. Only the first call returns `Some`.
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            let taken = TAKEN.borrow(cs);
            if taken.get() {
                return None;
            }

            taken.set(true);
            Some(unsafe { Self::steal() })
        })
    }

    /// # Safety
    ///
    /// Bypasses the one-time check of [`Tm4c123::take`]. The caller must make
    /// sure no other handle is used to access the same banks.
    pub unsafe fn steal() -> Self {
        Self {
            banks: Port::ALL.map(|port| MmioBank::new(resolve(port))),
        }
    }
}

impl PortHardware for Tm4c123 {
    type Bank = MmioBank;

    fn bank(&self, port: Port) -> &MmioBank {
        &self.banks[port as usize]
    }

    fn enable_clock(&self, port: Port) {
        enable_port_clock(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_once() {
        let hw = Tm4c123::take();
        assert!(hw.is_some());
        assert!(Tm4c123::take().is_none());

        let hw = hw.unwrap();
        for port in Port::ALL {
            assert_eq!(hw.bank(port).base(), resolve(port));
        }
    }
}
