use bitflags::bitflags;
use num_derive::FromPrimitive;

use crate::BIT;

/// GPIO port banks of the TM4C123GH6PM.
///
/// The discriminant is the port number used by the system control clock
/// gating register (RCGC2 bit N enables port N) and by the raw configuration
/// records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

impl Port {
    pub const ALL: [Port; 6] = [Port::A, Port::B, Port::C, Port::D, Port::E, Port::F];

    /// Port number (0 for A through 5 for F).
    #[inline(always)]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Number of bonded-out pins on this port.
    ///
    /// Ports A-D expose all eight pins, port E exposes PE0-PE5 and port F
    /// exposes PF0-PF4.
    pub const fn pin_count(self) -> u8 {
        match self {
            Port::A | Port::B | Port::C | Port::D => 8,
            Port::E => 6,
            Port::F => 5,
        }
    }

    /// Flat identifier of pin 0 of this port.
    ///
    /// The identifier ranges of consecutive ports are contiguous, so this is
    /// the running sum of the pin counts of all previous ports.
    pub const fn first_pin(self) -> u8 {
        match self {
            Port::A => 0,
            Port::B => 8,
            Port::C => 16,
            Port::D => 24,
            Port::E => 32,
            Port::F => 38,
        }
    }
}

/// Flat pin identifier: bank and in-bank index folded into one integer.
///
/// PA0 is 0, PB0 is 8, ... PF4 is 42. It doubles as the index of the pin's
/// descriptor inside the configuration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PinId(u8);

impl PinId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Position of this pin's descriptor in the configuration table.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Builds the flat identifier of `pin` on `port`.
    ///
    /// Returns `None` if `pin` is not bonded out on that port.
    pub const fn from_port_pin(port: Port, pin: u8) -> Option<Self> {
        if pin < port.pin_count() {
            Some(Self(port.first_pin() + pin))
        } else {
            None
        }
    }

    /// Splits the flat identifier back into port and in-bank index.
    pub fn port_pin(self) -> Option<(Port, u8)> {
        Port::ALL
            .iter()
            .find(|port| self.0 >= port.first_pin() && self.0 < port.first_pin() + port.pin_count())
            .map(|port| (*port, self.0 - port.first_pin()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum Direction {
    Input = 0,
    Output = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum Level {
    Low = 0,
    High = 1,
}

/// Internal resistor selection. Only meaningful for input pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum PullPolicy {
    None = 0,
    PullUp = 1,
    PullDown = 2,
}

/// Raw mode value reserved for analog operation.
///
/// Kept outside the 4-bit GPIOPCTL range so it can never be confused with an
/// alternate peripheral function.
pub const MODE_RAW_ANALOG: u8 = 0x10;

/// Highest alternate function number that fits a GPIOPCTL PMCx field.
pub const MODE_ALTERNATE_MAX: u8 = 0x0F;

/// What drives the pin: the GPIO block, the analog block, or a peripheral.
///
/// `Alternate(n)` routes the pin to the peripheral selected by PMCx value `n`
/// (see the per-pin constants in [`crate::config::mode`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionMode {
    Dio,
    Analog,
    Alternate(u8),
}

impl FunctionMode {
    /// Decodes the raw mode byte of a configuration record.
    ///
    /// * `0` - plain digital I/O
    /// * `1..=15` - alternate function `n`
    /// * `0x10` - analog
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(FunctionMode::Dio),
            MODE_RAW_ANALOG => Some(FunctionMode::Analog),
            1..=MODE_ALTERNATE_MAX => Some(FunctionMode::Alternate(raw)),
            _ => None,
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            FunctionMode::Dio => 0,
            FunctionMode::Analog => MODE_RAW_ANALOG,
            FunctionMode::Alternate(n) => n,
        }
    }

    /// `Alternate(0)` would alias plain digital I/O and values above 15 do
    /// not fit the PMCx field.
    pub const fn is_valid(self) -> bool {
        match self {
            FunctionMode::Alternate(n) => n >= 1 && n <= MODE_ALTERNATE_MAX,
            _ => true,
        }
    }

    /// Value written into the pin's 4-bit GPIOPCTL field.
    pub const fn pctl_value(self) -> u32 {
        match self {
            FunctionMode::Alternate(n) => (n & MODE_ALTERNATE_MAX) as u32,
            FunctionMode::Dio | FunctionMode::Analog => 0,
        }
    }
}

/// Static configuration of one physical pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinDescriptor {
    pub port: Port,
    pub pin_index: u8,
    pub direction: Direction,
    pub pull: PullPolicy,
    pub initial_level: Level,
    pub mode: FunctionMode,
    pub direction_mutable: bool,
    pub mode_mutable: bool,
}

impl PinDescriptor {
    /// Digital input, no pull resistor, locked at runtime.
    pub const fn new(port: Port, pin_index: u8) -> Self {
        Self {
            port,
            pin_index,
            direction: Direction::Input,
            pull: PullPolicy::None,
            initial_level: Level::Low,
            mode: FunctionMode::Dio,
            direction_mutable: false,
            mode_mutable: false,
        }
    }

    pub const fn output(mut self, level: Level) -> Self {
        self.direction = Direction::Output;
        self.initial_level = level;
        self
    }

    pub const fn input(mut self, pull: PullPolicy) -> Self {
        self.direction = Direction::Input;
        self.pull = pull;
        self
    }

    pub const fn mode(mut self, mode: FunctionMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn mutable(mut self, direction: bool, mode: bool) -> Self {
        self.direction_mutable = direction;
        self.mode_mutable = mode;
        self
    }

    /// Flat identifier this descriptor belongs at, if the pin exists.
    pub const fn pin_id(&self) -> Option<PinId> {
        PinId::from_port_pin(self.port, self.pin_index)
    }
}

bitflags! {
    /// One bit per pin of a port, matching the layout of the per-pin GPIO
    /// registers (GPIODIR, GPIODEN, GPIOCR, ...).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PinMask: u32 {
        const PIN0 = BIT!(0);
        const PIN1 = BIT!(1);
        const PIN2 = BIT!(2);
        const PIN3 = BIT!(3);
        const PIN4 = BIT!(4);
        const PIN5 = BIT!(5);
        const PIN6 = BIT!(6);
        const PIN7 = BIT!(7);
    }
}

impl PinMask {
    pub const fn of(pin_index: u8) -> Self {
        Self::from_bits_truncate(BIT!(pin_index as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_id_round_trips_port_boundaries() {
        assert_eq!(PinId::from_port_pin(Port::A, 0), Some(PinId::new(0)));
        assert_eq!(PinId::from_port_pin(Port::B, 0), Some(PinId::new(8)));
        assert_eq!(PinId::from_port_pin(Port::E, 5), Some(PinId::new(37)));
        assert_eq!(PinId::from_port_pin(Port::F, 0), Some(PinId::new(38)));
        assert_eq!(PinId::from_port_pin(Port::F, 4), Some(PinId::new(42)));

        assert_eq!(PinId::new(37).port_pin(), Some((Port::E, 5)));
        assert_eq!(PinId::new(38).port_pin(), Some((Port::F, 0)));
        assert_eq!(PinId::new(43).port_pin(), None);
    }

    #[test]
    fn test_pin_id_rejects_unbonded_pins() {
        // PE6, PE7 and PF5-PF7 do not exist on this package
        assert_eq!(PinId::from_port_pin(Port::E, 6), None);
        assert_eq!(PinId::from_port_pin(Port::F, 5), None);
        assert_eq!(PinId::from_port_pin(Port::A, 8), None);
    }

    #[test]
    fn test_port_ranges_are_contiguous() {
        let mut next = 0;
        for port in Port::ALL {
            assert_eq!(port.first_pin(), next);
            next += port.pin_count();
        }
        assert_eq!(next, 43);
    }

    #[test]
    fn test_function_mode_raw_encoding() {
        assert_eq!(FunctionMode::from_raw(0), Some(FunctionMode::Dio));
        assert_eq!(FunctionMode::from_raw(1), Some(FunctionMode::Alternate(1)));
        assert_eq!(FunctionMode::from_raw(14), Some(FunctionMode::Alternate(14)));
        assert_eq!(FunctionMode::from_raw(MODE_RAW_ANALOG), Some(FunctionMode::Analog));
        assert_eq!(FunctionMode::from_raw(0x11), None);

        assert!(!FunctionMode::Alternate(0).is_valid());
        assert!(!FunctionMode::Alternate(16).is_valid());
        assert!(FunctionMode::Alternate(15).is_valid());

        assert_eq!(FunctionMode::Analog.pctl_value(), 0);
        assert_eq!(FunctionMode::Alternate(8).pctl_value(), 8);
    }

    #[test]
    fn test_pin_mask_of() {
        assert_eq!(PinMask::of(0), PinMask::PIN0);
        assert_eq!(PinMask::of(7), PinMask::PIN7);
        assert!((PinMask::PIN0 | PinMask::PIN1 | PinMask::PIN2 | PinMask::PIN3).contains(PinMask::of(2)));
    }
}
