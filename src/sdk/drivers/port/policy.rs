use crate::sdk::drivers::port::types::{PinMask, Port};
use crate::sdk::mcu::register::{PortRegisters, RegisterBank, GPIO_LOCK_KEY};

/// PC0-PC3 carry TCK/SWCLK, TMS/SWDIO, TDI and TDO/SWO.
pub const JTAG_PINS_PORT_C: PinMask = PinMask::PIN0
    .union(PinMask::PIN1)
    .union(PinMask::PIN2)
    .union(PinMask::PIN3);

/// PD7 (NMI) and PF0 (NMI) power up locked behind GPIOLOCK/GPIOCR.
pub const COMMIT_PINS_PORT_D: PinMask = PinMask::PIN7;
pub const COMMIT_PINS_PORT_F: PinMask = PinMask::PIN0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinClass {
    /// Debug pin, never touched by the driver.
    Reserved,
    /// Needs the unlock key and its GPIOCR bit before any other write.
    ProtectedCommit,
    Normal,
}

pub fn classify(port: Port, pin_index: u8) -> PinClass {
    let mask = PinMask::of(pin_index);

    match port {
        Port::C if JTAG_PINS_PORT_C.contains(mask) => PinClass::Reserved,
        Port::D if COMMIT_PINS_PORT_D.contains(mask) => PinClass::ProtectedCommit,
        Port::F if COMMIT_PINS_PORT_F.contains(mask) => PinClass::ProtectedCommit,
        _ => PinClass::Normal,
    }
}

/// Opens the commit gate of `pin` so that writes to its GPIOAFSEL, GPIOPUR,
/// GPIOPDR and GPIODEN bits take effect.
///
/// # Algorithm
///
/// 1. Write the unlock key to GPIOLOCK
/// 2. Set the pin's bit in GPIOCR
///
/// # Notes
///
/// * GPIOLOCK stays unlocked while the key is rewritten and the GPIOCR bit is
///   already set, so repeating both writes on every configuration pass is
///   harmless.
pub fn unlock_and_commit<B: RegisterBank>(regs: &PortRegisters<B>, pin: u8) {
    regs.write_lock(GPIO_LOCK_KEY);
    regs.set_cr_bit(pin);
}
