use crate::sdk::drivers::port::types::Port;
use crate::sdk::mcu::register::{
    GPIO_PORTA_BASE_ADDR, GPIO_PORTB_BASE_ADDR, GPIO_PORTC_BASE_ADDR, GPIO_PORTD_BASE_ADDR,
    GPIO_PORTE_BASE_ADDR, GPIO_PORTF_BASE_ADDR,
};

/// Base address of the register bank controlling `port`.
///
/// Ports A-D sit in the low APB window, E and F further up, so the mapping is
/// not a simple stride. `Port` is closed, so there is no "unknown bank" case.
pub const fn resolve(port: Port) -> u32 {
    match port {
        Port::A => GPIO_PORTA_BASE_ADDR,
        Port::B => GPIO_PORTB_BASE_ADDR,
        Port::C => GPIO_PORTC_BASE_ADDR,
        Port::D => GPIO_PORTD_BASE_ADDR,
        Port::E => GPIO_PORTE_BASE_ADDR,
        Port::F => GPIO_PORTF_BASE_ADDR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bank_addresses() {
        assert_eq!(resolve(Port::A), 0x4000_4000);
        assert_eq!(resolve(Port::B), 0x4000_5000);
        assert_eq!(resolve(Port::C), 0x4000_6000);
        assert_eq!(resolve(Port::D), 0x4000_7000);
        assert_eq!(resolve(Port::E), 0x4002_4000);
        assert_eq!(resolve(Port::F), 0x4002_5000);
    }

    #[test]
    fn test_resolve_is_injective() {
        for (i, a) in Port::ALL.iter().enumerate() {
            for b in &Port::ALL[i + 1..] {
                assert_ne!(resolve(*a), resolve(*b));
            }
        }
    }
}
