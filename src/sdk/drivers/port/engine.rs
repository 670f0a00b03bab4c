use crate::sdk::drivers::port::types::{Direction, FunctionMode, Level, PinDescriptor, PullPolicy};
use crate::sdk::mcu::register::{PortRegisters, RegisterBank};

/// Programs one pin from its descriptor.
///
/// The caller has already handled the special-pin policy: reserved pins never
/// reach this function and commit-protected pins have been unlocked.
///
/// # Parameters
///
/// * `regs` - Register bank of the pin's port
/// * `desc` - Desired configuration of the pin
///
/// # Algorithm
///
/// 1. Direction, then output level or pull resistors
/// 2. Digital enable vs. analog select
/// 3. Alternate function select and PMCx field
pub fn apply_config<B: RegisterBank>(regs: &PortRegisters<B>, desc: &PinDescriptor) {
    let pin = desc.pin_index;

    match desc.direction {
        Direction::Output => {
            regs.set_dir_bit(pin);
            match desc.initial_level {
                Level::High => regs.set_data_bit(pin),
                Level::Low => regs.clear_data_bit(pin),
            }
        }
        Direction::Input => {
            regs.clear_dir_bit(pin);
            apply_pull(regs, pin, desc.pull);
        }
    }

    apply_mode(regs, pin, desc.mode);
}

/// The opposite resistor is always released first so PUR and PDR are never
/// set together for one pin.
fn apply_pull<B: RegisterBank>(regs: &PortRegisters<B>, pin: u8, pull: PullPolicy) {
    match pull {
        PullPolicy::PullUp => {
            regs.clear_pdr_bit(pin);
            regs.set_pur_bit(pin);
        }
        PullPolicy::PullDown => {
            regs.clear_pur_bit(pin);
            regs.set_pdr_bit(pin);
        }
        PullPolicy::None => {
            regs.clear_pur_bit(pin);
            regs.clear_pdr_bit(pin);
        }
    }
}

/// Routes `pin` to the GPIO block, the analog block or a peripheral.
///
/// Used both by the full configuration pass and by runtime mode changes.
pub fn apply_mode<B: RegisterBank>(regs: &PortRegisters<B>, pin: u8, mode: FunctionMode) {
    match mode {
        FunctionMode::Analog => {
            regs.clear_den_bit(pin);
            regs.set_amsel_bit(pin);
        }
        FunctionMode::Dio | FunctionMode::Alternate(_) => {
            regs.set_den_bit(pin);
            regs.clear_amsel_bit(pin);
        }
    }

    match mode {
        FunctionMode::Dio => {
            regs.clear_afsel_bit(pin);
            regs.set_pctl_field(pin, 0);
        }
        FunctionMode::Analog | FunctionMode::Alternate(_) => {
            regs.set_afsel_bit(pin);
            regs.set_pctl_field(pin, mode.pctl_value());
        }
    }
}

pub fn apply_direction<B: RegisterBank>(regs: &PortRegisters<B>, pin: u8, direction: Direction) {
    match direction {
        Direction::Output => regs.set_dir_bit(pin),
        Direction::Input => regs.clear_dir_bit(pin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::drivers::port::mock::MockBank;
    use crate::sdk::drivers::port::types::Port;
    use crate::sdk::mcu::register::*;

    fn configure(bank: &MockBank, desc: PinDescriptor) {
        apply_config(&PortRegisters::new(bank), &desc);
    }

    #[test]
    fn test_output_high() {
        let bank = MockBank::new();
        bank.preset(GPIO_PUR_OFFSET, 0b0000_0100);

        configure(&bank, PinDescriptor::new(Port::A, 2).output(Level::High));

        assert!(bank.bit(GPIO_DIR_OFFSET, 2));
        assert!(bank.bit(GPIO_DATA_OFFSET, 2));
        assert!(bank.bit(GPIO_DEN_OFFSET, 2));
        assert!(!bank.bit(GPIO_AFSEL_OFFSET, 2));
        // Output pins leave the pull registers alone
        assert!(bank.bit(GPIO_PUR_OFFSET, 2));
        assert!(bank.writes().iter().all(|w| w.offset != GPIO_PUR_OFFSET && w.offset != GPIO_PDR_OFFSET));
    }

    #[test]
    fn test_output_low_clears_data() {
        let bank = MockBank::new();
        bank.preset(GPIO_DATA_OFFSET, 0xFF);

        configure(&bank, PinDescriptor::new(Port::B, 5).output(Level::Low));

        assert_eq!(bank.value(GPIO_DATA_OFFSET), 0xDF);
    }

    #[test]
    fn test_input_pull_up_releases_pull_down() {
        let bank = MockBank::new();
        bank.preset(GPIO_DIR_OFFSET, 0b0001_0000);
        bank.preset(GPIO_PDR_OFFSET, 0b0001_0000);

        configure(&bank, PinDescriptor::new(Port::F, 4).input(PullPolicy::PullUp));

        assert!(!bank.bit(GPIO_DIR_OFFSET, 4));
        assert!(bank.bit(GPIO_PUR_OFFSET, 4));
        assert!(!bank.bit(GPIO_PDR_OFFSET, 4));

        // PDR is released before PUR is set
        let writes = bank.writes();
        let pdr = writes.iter().position(|w| w.offset == GPIO_PDR_OFFSET).unwrap();
        let pur = writes.iter().position(|w| w.offset == GPIO_PUR_OFFSET).unwrap();
        assert!(pdr < pur);
    }

    #[test]
    fn test_input_pull_down_releases_pull_up() {
        let bank = MockBank::new();
        bank.preset(GPIO_PUR_OFFSET, 0b1000_0000);

        configure(&bank, PinDescriptor::new(Port::A, 7).input(PullPolicy::PullDown));

        assert!(!bank.bit(GPIO_PUR_OFFSET, 7));
        assert!(bank.bit(GPIO_PDR_OFFSET, 7));
    }

    #[test]
    fn test_input_no_pull_clears_both() {
        let bank = MockBank::new();
        bank.preset(GPIO_PUR_OFFSET, 0xFF);
        bank.preset(GPIO_PDR_OFFSET, 0x00);

        configure(&bank, PinDescriptor::new(Port::A, 0));

        assert_eq!(bank.value(GPIO_PUR_OFFSET), 0xFE);
        assert_eq!(bank.value(GPIO_PDR_OFFSET), 0x00);
    }

    #[test]
    fn test_analog_mode() {
        let bank = MockBank::new();
        bank.preset(GPIO_DEN_OFFSET, 0xFF);
        bank.preset(GPIO_PCTL_OFFSET, 0x0000_7000);

        configure(&bank, PinDescriptor::new(Port::E, 3).mode(FunctionMode::Analog));

        assert!(!bank.bit(GPIO_DEN_OFFSET, 3));
        assert!(bank.bit(GPIO_AMSEL_OFFSET, 3));
        assert!(bank.bit(GPIO_AFSEL_OFFSET, 3));
        assert_eq!(bank.value(GPIO_PCTL_OFFSET), 0);
    }

    #[test]
    fn test_alternate_mode_replaces_pctl_field() {
        let bank = MockBank::new();
        // PMC1 holds a stale function, neighbours must survive
        bank.preset(GPIO_PCTL_OFFSET, 0x0000_0F31);
        bank.preset(GPIO_AMSEL_OFFSET, 0b10);

        configure(&bank, PinDescriptor::new(Port::A, 1).mode(FunctionMode::Alternate(8)));

        assert!(bank.bit(GPIO_AFSEL_OFFSET, 1));
        assert!(bank.bit(GPIO_DEN_OFFSET, 1));
        assert!(!bank.bit(GPIO_AMSEL_OFFSET, 1));
        assert_eq!(bank.value(GPIO_PCTL_OFFSET), 0x0000_0F81);
    }

    #[test]
    fn test_dio_mode_zeroes_pctl_field() {
        let bank = MockBank::new();
        bank.preset(GPIO_AFSEL_OFFSET, 0x80);
        bank.preset(GPIO_PCTL_OFFSET, 0x7000_0001);

        configure(&bank, PinDescriptor::new(Port::D, 7));

        assert!(!bank.bit(GPIO_AFSEL_OFFSET, 7));
        assert_eq!(bank.value(GPIO_PCTL_OFFSET), 0x0000_0001);
    }

    #[test]
    fn test_apply_direction_touches_dir_only() {
        let bank = MockBank::new();
        let regs = PortRegisters::new(&bank);

        apply_direction(&regs, 6, Direction::Output);
        apply_direction(&regs, 1, Direction::Output);
        apply_direction(&regs, 6, Direction::Input);

        assert_eq!(bank.value(GPIO_DIR_OFFSET), 0b0000_0010);
        assert!(bank.writes().iter().all(|w| w.offset == GPIO_DIR_OFFSET));
    }
}
