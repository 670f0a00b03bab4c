use crate::sdk::drivers::port::types::{Level, PinDescriptor, PinId, Port, PullPolicy};

// Pins bonded out on the TM4C123GH6PM (64-pin LQFP)
pub const NUMBER_OF_PINS: usize = 43;

// Flat pin identifiers, one per bonded pin
pub const PA0: PinId = PinId::new(0);
pub const PA1: PinId = PinId::new(1);
pub const PA2: PinId = PinId::new(2);
pub const PA3: PinId = PinId::new(3);
pub const PA4: PinId = PinId::new(4);
pub const PA5: PinId = PinId::new(5);
pub const PA6: PinId = PinId::new(6);
pub const PA7: PinId = PinId::new(7);
pub const PB0: PinId = PinId::new(8);
pub const PB1: PinId = PinId::new(9);
pub const PB2: PinId = PinId::new(10);
pub const PB3: PinId = PinId::new(11);
pub const PB4: PinId = PinId::new(12);
pub const PB5: PinId = PinId::new(13);
pub const PB6: PinId = PinId::new(14);
pub const PB7: PinId = PinId::new(15);
pub const PC0: PinId = PinId::new(16);
pub const PC1: PinId = PinId::new(17);
pub const PC2: PinId = PinId::new(18);
pub const PC3: PinId = PinId::new(19);
pub const PC4: PinId = PinId::new(20);
pub const PC5: PinId = PinId::new(21);
pub const PC6: PinId = PinId::new(22);
pub const PC7: PinId = PinId::new(23);
pub const PD0: PinId = PinId::new(24);
pub const PD1: PinId = PinId::new(25);
pub const PD2: PinId = PinId::new(26);
pub const PD3: PinId = PinId::new(27);
pub const PD4: PinId = PinId::new(28);
pub const PD5: PinId = PinId::new(29);
pub const PD6: PinId = PinId::new(30);
pub const PD7: PinId = PinId::new(31);
pub const PE0: PinId = PinId::new(32);
pub const PE1: PinId = PinId::new(33);
pub const PE2: PinId = PinId::new(34);
pub const PE3: PinId = PinId::new(35);
pub const PE4: PinId = PinId::new(36);
pub const PE5: PinId = PinId::new(37);
pub const PF0: PinId = PinId::new(38);
pub const PF1: PinId = PinId::new(39);
pub const PF2: PinId = PinId::new(40);
pub const PF3: PinId = PinId::new(41);
pub const PF4: PinId = PinId::new(42);

/// Pin mode values.
///
/// Alternate function numbers are the GPIOPCTL PMCx encodings from the
/// datasheet's signal table. Several pins share a number, since the value
/// only selects a peripheral relative to the pin it is written for.
pub mod mode {
    use crate::sdk::drivers::port::types::FunctionMode;

    pub const DIO: FunctionMode = FunctionMode::Dio;
    pub const ANALOG: FunctionMode = FunctionMode::Analog;

    pub const PA0_U0RX: FunctionMode = FunctionMode::Alternate(1);
    pub const PA1_U0TX: FunctionMode = FunctionMode::Alternate(1);
    pub const PB0_U1RX: FunctionMode = FunctionMode::Alternate(1);
    pub const PB1_U1TX: FunctionMode = FunctionMode::Alternate(1);
    pub const PC4_U4RX: FunctionMode = FunctionMode::Alternate(1);
    pub const PC5_U4TX: FunctionMode = FunctionMode::Alternate(1);
    pub const PC6_U3RX: FunctionMode = FunctionMode::Alternate(1);
    pub const PC7_U3TX: FunctionMode = FunctionMode::Alternate(1);
    pub const PD0_SSI3CLK: FunctionMode = FunctionMode::Alternate(1);
    pub const PD1_SSI3FSS: FunctionMode = FunctionMode::Alternate(1);
    pub const PD2_SSI3RX: FunctionMode = FunctionMode::Alternate(1);
    pub const PD3_SSI3TX: FunctionMode = FunctionMode::Alternate(1);
    pub const PD4_U6RX: FunctionMode = FunctionMode::Alternate(1);
    pub const PD5_U6TX: FunctionMode = FunctionMode::Alternate(1);
    pub const PD6_U2RX: FunctionMode = FunctionMode::Alternate(1);
    pub const PD7_U2TX: FunctionMode = FunctionMode::Alternate(1);
    pub const PE0_U7RX: FunctionMode = FunctionMode::Alternate(1);
    pub const PE1_U7TX: FunctionMode = FunctionMode::Alternate(1);
    pub const PE4_U5RX: FunctionMode = FunctionMode::Alternate(1);
    pub const PE5_U5TX: FunctionMode = FunctionMode::Alternate(1);
    pub const PF0_U1RTS: FunctionMode = FunctionMode::Alternate(1);
    pub const PF1_U1CTS: FunctionMode = FunctionMode::Alternate(1);

    pub const PA2_SSI0CLK: FunctionMode = FunctionMode::Alternate(2);
    pub const PA3_SSI0FSS: FunctionMode = FunctionMode::Alternate(2);
    pub const PA4_SSI0RX: FunctionMode = FunctionMode::Alternate(2);
    pub const PA5_SSI0TX: FunctionMode = FunctionMode::Alternate(2);
    pub const PB4_SSI2CLK: FunctionMode = FunctionMode::Alternate(2);
    pub const PB5_SSI2FSS: FunctionMode = FunctionMode::Alternate(2);
    pub const PB6_SSI2RX: FunctionMode = FunctionMode::Alternate(2);
    pub const PB7_SSI2TX: FunctionMode = FunctionMode::Alternate(2);
    pub const PC4_U1RX: FunctionMode = FunctionMode::Alternate(2);
    pub const PC5_U1TX: FunctionMode = FunctionMode::Alternate(2);
    pub const PD0_SSI1CLK: FunctionMode = FunctionMode::Alternate(2);
    pub const PD1_SSI1FSS: FunctionMode = FunctionMode::Alternate(2);
    pub const PD2_SSI1RX: FunctionMode = FunctionMode::Alternate(2);
    pub const PD3_SSI1TX: FunctionMode = FunctionMode::Alternate(2);
    pub const PF0_SSI1RX: FunctionMode = FunctionMode::Alternate(2);
    pub const PF1_SSI1TX: FunctionMode = FunctionMode::Alternate(2);
    pub const PF2_SSI1CLK: FunctionMode = FunctionMode::Alternate(2);
    pub const PF3_SSI1FSS: FunctionMode = FunctionMode::Alternate(2);

    pub const PA6_I2C1SCL: FunctionMode = FunctionMode::Alternate(3);
    pub const PA7_I2C1SDA: FunctionMode = FunctionMode::Alternate(3);
    pub const PB2_I2C0SCL: FunctionMode = FunctionMode::Alternate(3);
    pub const PB3_I2C0SDA: FunctionMode = FunctionMode::Alternate(3);
    pub const PD0_I2C3SCL: FunctionMode = FunctionMode::Alternate(3);
    pub const PD1_I2C3SDA: FunctionMode = FunctionMode::Alternate(3);
    pub const PE4_I2C2SCL: FunctionMode = FunctionMode::Alternate(3);
    pub const PE5_I2C2SDA: FunctionMode = FunctionMode::Alternate(3);
    pub const PF0_CAN0RX: FunctionMode = FunctionMode::Alternate(3);
    pub const PF3_CAN0TX: FunctionMode = FunctionMode::Alternate(3);

    pub const PB4_M0PWM2: FunctionMode = FunctionMode::Alternate(4);
    pub const PB5_M0PWM3: FunctionMode = FunctionMode::Alternate(4);
    pub const PB6_M0PWM0: FunctionMode = FunctionMode::Alternate(4);
    pub const PB7_M0PWM1: FunctionMode = FunctionMode::Alternate(4);
    pub const PC4_M0PWM6: FunctionMode = FunctionMode::Alternate(4);
    pub const PC5_M0PWM7: FunctionMode = FunctionMode::Alternate(4);
    pub const PD0_M0PWM6: FunctionMode = FunctionMode::Alternate(4);
    pub const PD1_M0PWM7: FunctionMode = FunctionMode::Alternate(4);
    pub const PD2_M0FAULT0: FunctionMode = FunctionMode::Alternate(4);
    pub const PD6_M0FAULT0: FunctionMode = FunctionMode::Alternate(4);
    pub const PE4_M0PWM4: FunctionMode = FunctionMode::Alternate(4);
    pub const PE5_M0PWM5: FunctionMode = FunctionMode::Alternate(4);
    pub const PF2_M0FAULT0: FunctionMode = FunctionMode::Alternate(4);

    pub const PA6_M1PWM2: FunctionMode = FunctionMode::Alternate(5);
    pub const PA7_M1PWM3: FunctionMode = FunctionMode::Alternate(5);
    pub const PD0_M1PWM0: FunctionMode = FunctionMode::Alternate(5);
    pub const PD1_M1PWM1: FunctionMode = FunctionMode::Alternate(5);
    pub const PE4_M1PWM2: FunctionMode = FunctionMode::Alternate(5);
    pub const PE5_M1PWM3: FunctionMode = FunctionMode::Alternate(5);
    pub const PF0_M1PWM4: FunctionMode = FunctionMode::Alternate(5);
    pub const PF1_M1PWM5: FunctionMode = FunctionMode::Alternate(5);
    pub const PF2_M1PWM6: FunctionMode = FunctionMode::Alternate(5);
    pub const PF3_M1PWM7: FunctionMode = FunctionMode::Alternate(5);
    pub const PF4_M1FAULT0: FunctionMode = FunctionMode::Alternate(5);

    pub const PC4_IDX1: FunctionMode = FunctionMode::Alternate(6);
    pub const PC5_PHA1: FunctionMode = FunctionMode::Alternate(6);
    pub const PC6_PHB1: FunctionMode = FunctionMode::Alternate(6);
    pub const PD3_IDX0: FunctionMode = FunctionMode::Alternate(6);
    pub const PD6_PHA0: FunctionMode = FunctionMode::Alternate(6);
    pub const PD7_PHB0: FunctionMode = FunctionMode::Alternate(6);
    pub const PF0_PHA0: FunctionMode = FunctionMode::Alternate(6);
    pub const PF1_PHB0: FunctionMode = FunctionMode::Alternate(6);
    pub const PF4_IDX0: FunctionMode = FunctionMode::Alternate(6);

    pub const PB0_T2CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PB1_T2CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PB2_T3CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PB3_T3CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PB4_T1CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PB5_T1CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PB6_T0CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PB7_T0CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PC4_WT0CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PC5_WT0CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PC6_WT1CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PC7_WT1CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PD0_WT2CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PD1_WT2CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PD2_WT3CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PD3_WT3CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PD4_WT4CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PD5_WT4CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PD6_WT5CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PD7_WT5CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PF0_T0CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PF1_T0CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PF2_T1CCP0: FunctionMode = FunctionMode::Alternate(7);
    pub const PF3_T1CCP1: FunctionMode = FunctionMode::Alternate(7);
    pub const PF4_T2CCP0: FunctionMode = FunctionMode::Alternate(7);

    pub const PA0_CAN1RX: FunctionMode = FunctionMode::Alternate(8);
    pub const PA1_CAN1TX: FunctionMode = FunctionMode::Alternate(8);
    pub const PB4_CAN0RX: FunctionMode = FunctionMode::Alternate(8);
    pub const PB5_CAN0TX: FunctionMode = FunctionMode::Alternate(8);
    pub const PC4_U1RTS: FunctionMode = FunctionMode::Alternate(8);
    pub const PC5_U1CTS: FunctionMode = FunctionMode::Alternate(8);
    pub const PC6_USB0EPEN: FunctionMode = FunctionMode::Alternate(8);
    pub const PC7_USB0PFLT: FunctionMode = FunctionMode::Alternate(8);
    pub const PD2_USB0EPEN: FunctionMode = FunctionMode::Alternate(8);
    pub const PD3_USB0PFLT: FunctionMode = FunctionMode::Alternate(8);
    pub const PD7_NMI: FunctionMode = FunctionMode::Alternate(8);
    pub const PE4_CAN0RX: FunctionMode = FunctionMode::Alternate(8);
    pub const PE5_CAN0TX: FunctionMode = FunctionMode::Alternate(8);
    pub const PF0_NMI: FunctionMode = FunctionMode::Alternate(8);
    pub const PF4_USB0EPEN: FunctionMode = FunctionMode::Alternate(8);

    pub const PF0_C0O: FunctionMode = FunctionMode::Alternate(9);
    pub const PF1_C1O: FunctionMode = FunctionMode::Alternate(9);

    pub const PF1_TRD1: FunctionMode = FunctionMode::Alternate(14);
    pub const PF2_TRD0: FunctionMode = FunctionMode::Alternate(14);
    pub const PF3_TRCLK: FunctionMode = FunctionMode::Alternate(14);
}

/// Digital input, no pull, both attributes changeable at runtime.
const fn gpio(port: Port, pin: u8) -> PinDescriptor {
    PinDescriptor::new(port, pin).mutable(true, true)
}

const fn board_table() -> [PinDescriptor; NUMBER_OF_PINS] {
    let mut table = [PinDescriptor::new(Port::A, 0); NUMBER_OF_PINS];

    let mut p = 0;
    while p < Port::ALL.len() {
        let port = Port::ALL[p];
        let mut pin = 0;
        while pin < port.pin_count() {
            table[(port.first_pin() + pin) as usize] = gpio(port, pin);
            pin += 1;
        }
        p += 1;
    }

    // UART0, routed to the debug probe's virtual COM port
    table[PA0.index()] = PinDescriptor::new(Port::A, 0).mode(mode::PA0_U0RX);
    table[PA1.index()] = PinDescriptor::new(Port::A, 1)
        .output(Level::High)
        .mode(mode::PA1_U0TX);

    // JTAG, never touched by the driver
    table[PC0.index()] = PinDescriptor::new(Port::C, 0);
    table[PC1.index()] = PinDescriptor::new(Port::C, 1);
    table[PC2.index()] = PinDescriptor::new(Port::C, 2);
    table[PC3.index()] = PinDescriptor::new(Port::C, 3);

    // SW2 and SW1, active low
    table[PF0.index()] = gpio(Port::F, 0).input(PullPolicy::PullUp);
    table[PF4.index()] = gpio(Port::F, 4).input(PullPolicy::PullUp);

    // RGB LED: red, blue, green
    table[PF1.index()] = gpio(Port::F, 1).output(Level::Low);
    table[PF2.index()] = gpio(Port::F, 2).output(Level::Low);
    table[PF3.index()] = gpio(Port::F, 3).output(Level::Low);

    // AIN0 on PE3
    table[PE3.index()] = gpio(Port::E, 3).mode(mode::ANALOG);

    table
}

/// Default configuration for the EK-TM4C123GXL LaunchPad.
pub static PORT_PIN_CONFIG: [PinDescriptor; NUMBER_OF_PINS] = board_table();

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::drivers::port::types::{Direction, FunctionMode};

    #[test]
    fn test_board_table_indexed_by_pin_id() {
        for (i, desc) in PORT_PIN_CONFIG.iter().enumerate() {
            assert_eq!(desc.pin_id(), Some(PinId::new(i as u8)), "entry {}", i);
        }
    }

    #[test]
    fn test_board_table_modes_valid() {
        assert!(PORT_PIN_CONFIG.iter().all(|desc| desc.mode.is_valid()));
    }

    #[test]
    fn test_board_table_launchpad_pins() {
        let led = PORT_PIN_CONFIG[PF1.index()];
        assert_eq!(led.direction, Direction::Output);
        assert_eq!(led.initial_level, Level::Low);

        let sw1 = PORT_PIN_CONFIG[PF4.index()];
        assert_eq!(sw1.direction, Direction::Input);
        assert_eq!(sw1.pull, PullPolicy::PullUp);

        assert_eq!(PORT_PIN_CONFIG[PA0.index()].mode, mode::PA0_U0RX);
        assert!(!PORT_PIN_CONFIG[PA0.index()].mode_mutable);
        assert_eq!(PORT_PIN_CONFIG[PE3.index()].mode, FunctionMode::Analog);
    }

    #[test]
    fn test_pin_ids_match_ports() {
        assert_eq!(PinId::from_port_pin(Port::D, 7), Some(PD7));
        assert_eq!(PinId::from_port_pin(Port::F, 4), Some(PF4));
        assert_eq!(PE5.raw(), 37);
    }
}
