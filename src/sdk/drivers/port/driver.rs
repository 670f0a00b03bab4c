use tracing::{debug, trace};

use crate::config::NUMBER_OF_PINS;
use crate::sdk::drivers::port::engine::{apply_config, apply_direction};
#[cfg(feature = "set-pin-mode-api")]
use crate::sdk::drivers::port::engine::apply_mode;
use crate::sdk::drivers::port::error::{ApiId, Attribute, DiagnosticSink, PortError};
#[cfg(feature = "dev-error-detect")]
use crate::sdk::drivers::port::error::Fault;
use crate::sdk::drivers::port::hardware::PortHardware;
use crate::sdk::drivers::port::policy::{classify, unlock_and_commit, PinClass};
use crate::sdk::drivers::port::types::{Direction, FunctionMode, PinDescriptor, PinId};
#[cfg(feature = "version-info-api")]
use crate::sdk::drivers::port::version::VersionInfo;
use crate::sdk::mcu::register::PortRegisters;

/// Lifecycle of the driver. Starts uninitialized and is never torn down.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModuleState<'a> {
    pub initialized: bool,
    pub active_table: Option<&'a [PinDescriptor]>,
}

/// GPIO port driver.
///
/// Owns the hardware handle, the fault sink and the module state. Calls are
/// synchronous and the driver does no locking of its own; the integrator
/// serializes access (typically by owning the driver in a single task).
pub struct PortDriver<'a, H: PortHardware, S: DiagnosticSink> {
    hw: H,
    sink: S,
    state: ModuleState<'a>,
}

impl<'a, H: PortHardware, S: DiagnosticSink> PortDriver<'a, H, S> {
    pub fn new(hw: H, sink: S) -> Self {
        Self {
            hw,
            sink,
            state: ModuleState::default(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn state(&self) -> &ModuleState<'a> {
        &self.state
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Configures every pin of `table` and binds it as the active table.
    ///
    /// # Parameters
    ///
    /// * `table` - One descriptor per pin, indexed by flat pin identifier
    ///
    /// # Algorithm
    ///
    /// 1. Reject a missing or empty table, before touching hardware, and
    ///    any table that [`validate`] refuses
    /// 2. For each descriptor in order: enable its port clock (once per
    ///    port), skip reserved pins, unlock commit-protected pins, then
    ///    apply the full configuration
    /// 3. Mark the module initialized
    ///
    /// # Notes
    ///
    /// * Calling this again reconfigures every pin and rebinds the table.
    ///   It is meant for cold start and is not reentrant.
    pub fn initialize(&mut self, table: Option<&'a [PinDescriptor]>) -> Result<(), PortError> {
        let table = match table {
            Some(table) if !table.is_empty() => table,
            _ => return Err(self.raise(ApiId::Init, PortError::NullConfiguration)),
        };

        if let Err(error) = validate(table) {
            return Err(self.raise(ApiId::Init, error));
        }

        debug!(pins = table.len(), "configuring port pins");

        let mut clocked = 0u8;
        for desc in table {
            let port_bit = 1u8 << desc.port.number();
            if clocked & port_bit == 0 {
                self.hw.enable_clock(desc.port);
                clocked |= port_bit;
            }

            let regs = PortRegisters::new(self.hw.bank(desc.port));
            match classify(desc.port, desc.pin_index) {
                PinClass::Reserved => {
                    trace!(port = desc.port.number(), pin = desc.pin_index, "reserved pin skipped");
                    continue;
                }
                PinClass::ProtectedCommit => unlock_and_commit(&regs, desc.pin_index),
                PinClass::Normal => {}
            }

            apply_config(&regs, desc);
        }

        self.state.initialized = true;
        self.state.active_table = Some(table);

        Ok(())
    }

    /// Changes the direction of one pin at runtime.
    ///
    /// Only GPIODIR is written. The stored descriptor is not modified, so a
    /// later [`refresh_port_direction`](Self::refresh_port_direction) restores
    /// the configured direction.
    #[cfg(feature = "set-pin-direction-api")]
    pub fn set_pin_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), PortError> {
        const API: ApiId = ApiId::SetPinDirection;

        let desc = self.lookup(API, pin)?;
        if !desc.direction_mutable {
            return Err(self.raise(API, PortError::ImmutableAttribute(Attribute::Direction)));
        }

        let regs = PortRegisters::new(self.hw.bank(desc.port));
        match classify(desc.port, desc.pin_index) {
            PinClass::Reserved => return Ok(()),
            PinClass::ProtectedCommit => unlock_and_commit(&regs, desc.pin_index),
            PinClass::Normal => {}
        }

        let output = direction == Direction::Output;
        trace!(pin = pin.raw(), output, "set pin direction");
        apply_direction(&regs, desc.pin_index, direction);

        Ok(())
    }

    /// Switches one pin between digital I/O, analog and a peripheral.
    ///
    /// Direction and pull settings are left as they are. The active table
    /// keeps the mode it was initialized with.
    #[cfg(feature = "set-pin-mode-api")]
    pub fn set_pin_mode(&mut self, pin: PinId, mode: FunctionMode) -> Result<(), PortError> {
        const API: ApiId = ApiId::SetPinMode;

        let desc = self.lookup(API, pin)?;
        if !desc.mode_mutable {
            return Err(self.raise(API, PortError::ImmutableAttribute(Attribute::Mode)));
        }
        if !mode.is_valid() {
            return Err(self.raise(API, PortError::InvalidMode(mode.raw())));
        }

        let regs = PortRegisters::new(self.hw.bank(desc.port));
        match classify(desc.port, desc.pin_index) {
            PinClass::Reserved => return Ok(()),
            PinClass::ProtectedCommit => unlock_and_commit(&regs, desc.pin_index),
            PinClass::Normal => {}
        }

        trace!(pin = pin.raw(), mode = mode.raw(), "set pin mode");
        apply_mode(&regs, desc.pin_index, mode);

        Ok(())
    }

    /// Re-applies the configured direction of every pin in the active table.
    ///
    /// Only GPIODIR is touched; reserved pins are skipped.
    pub fn refresh_port_direction(&mut self) -> Result<(), PortError> {
        let table = self.active_table(ApiId::RefreshPortDirection)?;

        for desc in table {
            if classify(desc.port, desc.pin_index) == PinClass::Reserved {
                continue;
            }

            apply_direction(&PortRegisters::new(self.hw.bank(desc.port)), desc.pin_index, desc.direction);
        }

        Ok(())
    }

    #[cfg(feature = "version-info-api")]
    pub fn version_info(&mut self, out: Option<&mut VersionInfo>) -> Result<(), PortError> {
        match out {
            Some(out) => {
                *out = VersionInfo::CURRENT;
                Ok(())
            }
            None => Err(self.raise(ApiId::GetVersionInfo, PortError::NullOutputPointer)),
        }
    }

    fn active_table(&mut self, api: ApiId) -> Result<&'a [PinDescriptor], PortError> {
        let ModuleState { initialized, active_table } = self.state;
        match active_table {
            Some(table) if initialized => Ok(table),
            _ => Err(self.raise(api, PortError::Uninitialized)),
        }
    }

    fn lookup(&mut self, api: ApiId, pin: PinId) -> Result<PinDescriptor, PortError> {
        let table = self.active_table(api)?;

        match table.get(pin.index()) {
            Some(desc) => Ok(*desc),
            None => Err(self.raise(api, PortError::InvalidPinIdentifier(pin.raw()))),
        }
    }

    /// Forwards `error` to the sink (when development error detection is
    /// enabled) and hands it back for returning to the caller.
    fn raise(&mut self, api: ApiId, error: PortError) -> PortError {
        #[cfg(feature = "dev-error-detect")]
        self.sink.report(Fault::new(api, error));
        #[cfg(not(feature = "dev-error-detect"))]
        let _ = api;

        error
    }
}

/// Checks that `table` can be indexed by flat pin identifier.
///
/// Entry `n` must describe the pin whose identifier is `n`, so the table can
/// hold at most [`NUMBER_OF_PINS`] entries. Every mode must also be one that
/// [`FunctionMode::is_valid`] accepts.
pub fn validate(table: &[PinDescriptor]) -> Result<(), PortError> {
    if table.len() > NUMBER_OF_PINS {
        return Err(PortError::InvalidPinIdentifier(NUMBER_OF_PINS as u8));
    }

    for (id, desc) in table.iter().enumerate() {
        let id = id as u8;
        if desc.pin_id() != Some(PinId::new(id)) {
            return Err(PortError::InvalidPinIdentifier(id));
        }
        if !desc.mode.is_valid() {
            return Err(PortError::InvalidMode(desc.mode.raw()));
        }
    }

    Ok(())
}

#[cfg(all(
    test,
    feature = "dev-error-detect",
    feature = "set-pin-direction-api",
    feature = "set-pin-mode-api",
    feature = "version-info-api"
))]
mod tests {
    use super::*;
    use crate::config::{self, PORT_PIN_CONFIG};
    use crate::sdk::drivers::port::error::Fault;
    use crate::sdk::drivers::port::mock::{MockHardware, RecordingSink, RegWrite};
    use crate::sdk::drivers::port::types::{Level, Port, PullPolicy};
    use crate::sdk::mcu::register::*;

    type TestDriver<'a> = PortDriver<'a, MockHardware, RecordingSink>;

    fn driver<'a>() -> TestDriver<'a> {
        PortDriver::new(MockHardware::new(), RecordingSink::default())
    }

    fn faults(drv: &TestDriver) -> Vec<Fault> {
        drv.sink().faults.clone()
    }

    #[test]
    fn test_initialize_applies_default_table() {
        let mut drv = driver();
        assert!(drv.initialize(Some(&PORT_PIN_CONFIG[..])).is_ok());
        assert!(drv.is_initialized());
        assert!(faults(&drv).is_empty());

        let hw = drv.hardware();
        for desc in PORT_PIN_CONFIG.iter() {
            if classify(desc.port, desc.pin_index) == PinClass::Reserved {
                continue;
            }
            let bank = hw.bank(desc.port);
            let pin = desc.pin_index;

            assert_eq!(bank.bit(GPIO_DIR_OFFSET, pin), desc.direction == Direction::Output);
            if desc.direction == Direction::Input {
                assert_eq!(bank.bit(GPIO_PUR_OFFSET, pin), desc.pull == PullPolicy::PullUp);
                assert_eq!(bank.bit(GPIO_PDR_OFFSET, pin), desc.pull == PullPolicy::PullDown);
            }

            let analog = desc.mode == FunctionMode::Analog;
            assert_eq!(bank.bit(GPIO_DEN_OFFSET, pin), !analog);
            assert_eq!(bank.bit(GPIO_AMSEL_OFFSET, pin), analog);
            assert_eq!(bank.bit(GPIO_AFSEL_OFFSET, pin), desc.mode != FunctionMode::Dio);
            assert_eq!(PortRegisters::new(bank).pctl_field(pin), desc.mode.pctl_value());
        }
    }

    #[test]
    fn test_initialize_enables_clock_once_per_port() {
        let mut drv = driver();
        drv.initialize(Some(&PORT_PIN_CONFIG[..])).unwrap();

        assert_eq!(drv.hardware().clocks(), Port::ALL.to_vec());
    }

    #[test]
    fn test_initialize_missing_table() {
        static EMPTY: [PinDescriptor; 0] = [];
        let mut drv = driver();

        assert_eq!(drv.initialize(None), Err(PortError::NullConfiguration));
        assert_eq!(drv.initialize(Some(&EMPTY[..])), Err(PortError::NullConfiguration));

        assert!(!drv.is_initialized());
        assert!(drv.hardware().writes().is_empty());
        assert!(drv.hardware().clocks().is_empty());
        assert_eq!(
            faults(&drv),
            vec![
                Fault::new(ApiId::Init, PortError::NullConfiguration),
                Fault::new(ApiId::Init, PortError::NullConfiguration),
            ]
        );
    }

    #[test]
    fn test_initialize_rejects_unbonded_pin() {
        static TABLE: [PinDescriptor; 2] = [PinDescriptor::new(Port::A, 0), PinDescriptor::new(Port::F, 6)];
        let mut drv = driver();

        assert_eq!(drv.initialize(Some(&TABLE[..])), Err(PortError::InvalidPinIdentifier(1)));
        assert!(!drv.is_initialized());
        assert!(drv.hardware().writes().is_empty());
    }

    #[test]
    fn test_commit_pin_unlock_precedes_direction() {
        let mut table = PORT_PIN_CONFIG;
        table[config::PD7.index()] = table[config::PD7.index()].output(Level::Low);
        let table: &'static [PinDescriptor] = Box::leak(Box::new(table));
        let mut drv = driver();

        for _ in 0..2 {
            drv.hardware().clear_writes();
            drv.initialize(Some(table)).unwrap();

            // PD7 is the only pin of port D that is unlocked
            let writes = drv.hardware().bank(Port::D).writes();
            let lock = writes.iter().position(|w| w.offset == GPIO_LOCK_OFFSET).unwrap();
            assert_eq!(
                writes[lock],
                RegWrite { port: Port::D, offset: GPIO_LOCK_OFFSET, old: writes[lock].old, new: GPIO_LOCK_KEY }
            );
            assert_eq!(writes[lock + 1].offset, GPIO_CR_OFFSET);
            assert_eq!(writes[lock + 1].new & 0x80, 0x80);
            assert_eq!(writes[lock + 2].offset, GPIO_DIR_OFFSET);
            assert_eq!(writes[lock + 2].new & 0x80, 0x80);
            // PD7's direction is not touched before the unlock
            assert!(writes[..lock].iter().all(|w| w.offset != GPIO_DIR_OFFSET || (w.old ^ w.new) & 0x80 == 0));
        }
    }

    #[test]
    fn test_immutable_output_pin() {
        static TABLE: [PinDescriptor; 1] = [PinDescriptor::new(Port::A, 0).output(Level::High)];
        let mut drv = driver();
        drv.initialize(Some(&TABLE[..])).unwrap();

        let bank = drv.hardware().bank(Port::A);
        assert!(bank.bit(GPIO_DIR_OFFSET, 0));
        assert!(bank.bit(GPIO_DATA_OFFSET, 0));

        drv.hardware().clear_writes();
        assert_eq!(
            drv.set_pin_direction(config::PA0, Direction::Input),
            Err(PortError::ImmutableAttribute(Attribute::Direction))
        );

        assert!(drv.hardware().bank(Port::A).bit(GPIO_DIR_OFFSET, 0));
        assert!(drv.hardware().writes().is_empty());
        assert_eq!(
            faults(&drv),
            vec![Fault::new(ApiId::SetPinDirection, PortError::ImmutableAttribute(Attribute::Direction))]
        );
    }

    #[test]
    fn test_immutable_mode() {
        static TABLE: [PinDescriptor; 1] = [PinDescriptor::new(Port::A, 0)];
        let mut drv = driver();
        drv.initialize(Some(&TABLE[..])).unwrap();
        drv.hardware().clear_writes();

        assert_eq!(
            drv.set_pin_mode(config::PA0, FunctionMode::Alternate(1)),
            Err(PortError::ImmutableAttribute(Attribute::Mode))
        );
        assert!(drv.hardware().writes().is_empty());
        assert_eq!(faults(&drv).len(), 1);
        assert_eq!(faults(&drv)[0].error.code(), 0x0E);
    }

    /// Board table with the JTAG pins marked fully mutable, so that only the
    /// reserved-pin policy stands between the mutators and the registers.
    fn table_with_mutable_jtag() -> &'static [PinDescriptor] {
        let mut table = PORT_PIN_CONFIG;
        for id in [config::PC0, config::PC1, config::PC2, config::PC3] {
            let desc = &mut table[id.index()];
            *desc = desc.output(Level::High).mode(FunctionMode::Alternate(1)).mutable(true, true);
        }
        Box::leak(Box::new(table))
    }

    #[test]
    fn test_reserved_pins_never_written() {
        let mut drv = driver();
        drv.initialize(Some(table_with_mutable_jtag())).unwrap();

        // PC4-PC7 are configured, PC0-PC3 keep their reset state
        for w in drv.hardware().bank(Port::C).writes() {
            assert_eq!(w.old & 0x0F, w.new & 0x0F);
        }

        drv.hardware().clear_writes();
        for id in [config::PC0, config::PC1, config::PC2, config::PC3] {
            assert_eq!(drv.set_pin_direction(id, Direction::Input), Ok(()));
            assert_eq!(drv.set_pin_mode(id, FunctionMode::Analog), Ok(()));
        }
        assert!(drv.hardware().writes().is_empty());

        assert_eq!(drv.refresh_port_direction(), Ok(()));
        for w in drv.hardware().bank(Port::C).writes() {
            assert_eq!(w.old & 0x0F, w.new & 0x0F);
        }
        assert!(faults(&drv).is_empty());
    }

    #[test]
    fn test_initialize_rejects_misplaced_entry() {
        // PB3 sits at the slot of PA0
        static TABLE: [PinDescriptor; 1] = [PinDescriptor::new(Port::B, 3).output(Level::High).mutable(true, true)];
        let mut drv = driver();

        assert_eq!(drv.initialize(Some(&TABLE[..])), Err(PortError::InvalidPinIdentifier(0)));
        assert!(!drv.is_initialized());
        assert!(drv.hardware().writes().is_empty());
        assert!(drv.hardware().clocks().is_empty());

        // Nothing was bound, so the mutators still refuse to run
        assert_eq!(drv.set_pin_direction(config::PA0, Direction::Input), Err(PortError::Uninitialized));
        assert!(drv.hardware().writes().is_empty());
        assert_eq!(faults(&drv)[0], Fault::new(ApiId::Init, PortError::InvalidPinIdentifier(0)));
    }

    #[test]
    fn test_initialize_rejects_oversized_table() {
        let table: Vec<PinDescriptor> = PORT_PIN_CONFIG.iter().chain(PORT_PIN_CONFIG.iter()).copied().collect();
        let table: &'static [PinDescriptor] = table.leak();
        let mut drv = driver();

        assert_eq!(drv.initialize(Some(table)), Err(PortError::InvalidPinIdentifier(43)));
        assert!(drv.hardware().writes().is_empty());
    }

    #[test]
    fn test_initialize_rejects_invalid_mode() {
        let mut table = PORT_PIN_CONFIG;
        table[config::PA2.index()] = table[config::PA2.index()].mode(FunctionMode::Alternate(0));
        let table: &'static [PinDescriptor] = Box::leak(Box::new(table));
        let mut drv = driver();

        assert_eq!(drv.initialize(Some(table)), Err(PortError::InvalidMode(0)));
        assert!(!drv.is_initialized());
        assert!(drv.hardware().writes().is_empty());
        assert_eq!(faults(&drv), vec![Fault::new(ApiId::Init, PortError::InvalidMode(0))]);
    }

    #[test]
    fn test_reserved_pins_keep_state_with_full_table() {
        let mut drv = driver();
        let bank_c = drv.hardware().bank(Port::C);
        bank_c.preset(GPIO_AFSEL_OFFSET, 0x0F);
        bank_c.preset(GPIO_DEN_OFFSET, 0x0F);
        bank_c.preset(GPIO_PCTL_OFFSET, 0x0000_1111);

        drv.initialize(Some(&PORT_PIN_CONFIG[..])).unwrap();
        drv.refresh_port_direction().unwrap();

        let bank_c = drv.hardware().bank(Port::C);
        assert_eq!(bank_c.value(GPIO_AFSEL_OFFSET) & 0x0F, 0x0F);
        assert_eq!(bank_c.value(GPIO_DEN_OFFSET) & 0x0F, 0x0F);
        assert_eq!(bank_c.value(GPIO_PCTL_OFFSET) & 0xFFFF, 0x1111);
        for w in bank_c.writes() {
            assert_eq!(w.old & 0x0F, w.new & 0x0F);
        }
    }

    #[test]
    fn test_mutators_before_initialize() {
        let mut drv = driver();

        assert_eq!(drv.set_pin_direction(config::PF1, Direction::Output), Err(PortError::Uninitialized));
        assert_eq!(drv.set_pin_mode(config::PF1, FunctionMode::Dio), Err(PortError::Uninitialized));
        assert_eq!(drv.refresh_port_direction(), Err(PortError::Uninitialized));

        assert!(drv.hardware().writes().is_empty());
        let apis: Vec<ApiId> = faults(&drv).iter().map(|f| f.api).collect();
        assert_eq!(apis, vec![ApiId::SetPinDirection, ApiId::SetPinMode, ApiId::RefreshPortDirection]);
        assert!(faults(&drv).iter().all(|f| f.error == PortError::Uninitialized));
    }

    #[test]
    fn test_invalid_pin_identifier() {
        let mut drv = driver();
        drv.initialize(Some(&PORT_PIN_CONFIG[..])).unwrap();
        drv.hardware().clear_writes();

        assert_eq!(
            drv.set_pin_direction(PinId::new(43), Direction::Output),
            Err(PortError::InvalidPinIdentifier(43))
        );
        assert_eq!(drv.set_pin_mode(PinId::new(200), FunctionMode::Dio), Err(PortError::InvalidPinIdentifier(200)));
        assert!(drv.hardware().writes().is_empty());
        assert_eq!(faults(&drv).len(), 2);
    }

    #[test]
    fn test_set_pin_direction_mutable() {
        static TABLE: [PinDescriptor; 2] = [
            PinDescriptor::new(Port::A, 0),
            PinDescriptor::new(Port::A, 1).mutable(true, false),
        ];
        let mut drv = driver();
        drv.initialize(Some(&TABLE[..])).unwrap();
        drv.hardware().clear_writes();

        drv.set_pin_direction(config::PA1, Direction::Output).unwrap();

        let writes = drv.hardware().writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].offset, GPIO_DIR_OFFSET);
        assert_eq!(writes[0].new, 0b10);
        // Descriptor unchanged, so refresh restores the configured input
        drv.refresh_port_direction().unwrap();
        assert!(!drv.hardware().bank(Port::A).bit(GPIO_DIR_OFFSET, 1));
    }

    #[test]
    fn test_set_pin_direction_commit_pin_unlocks_first() {
        let mut drv = driver();
        drv.initialize(Some(&PORT_PIN_CONFIG[..])).unwrap();
        drv.hardware().clear_writes();

        drv.set_pin_direction(config::PF0, Direction::Output).unwrap();

        let offsets: Vec<u32> = drv.hardware().writes().iter().map(|w| w.offset).collect();
        assert_eq!(offsets, vec![GPIO_LOCK_OFFSET, GPIO_CR_OFFSET, GPIO_DIR_OFFSET]);
    }

    #[test]
    fn test_set_pin_mode_commit_pin_unlocks_first() {
        let mut drv = driver();
        drv.initialize(Some(&PORT_PIN_CONFIG[..])).unwrap();
        drv.hardware().clear_writes();

        drv.set_pin_mode(config::PF0, config::mode::PF0_CAN0RX).unwrap();

        let offsets: Vec<u32> = drv.hardware().writes().iter().map(|w| w.offset).collect();
        assert_eq!(
            offsets,
            vec![
                GPIO_LOCK_OFFSET,
                GPIO_CR_OFFSET,
                GPIO_DEN_OFFSET,
                GPIO_AMSEL_OFFSET,
                GPIO_AFSEL_OFFSET,
                GPIO_PCTL_OFFSET
            ]
        );
        assert_eq!(PortRegisters::new(drv.hardware().bank(Port::F)).pctl_field(0), 3);
    }

    #[test]
    fn test_set_pin_mode_alternate() {
        let mut drv = driver();
        drv.initialize(Some(&PORT_PIN_CONFIG[..])).unwrap();

        drv.set_pin_mode(config::PB2, config::mode::PB2_I2C0SCL).unwrap();

        let bank = drv.hardware().bank(Port::B);
        assert!(bank.bit(GPIO_AFSEL_OFFSET, 2));
        assert!(bank.bit(GPIO_DEN_OFFSET, 2));
        assert_eq!(PortRegisters::new(bank).pctl_field(2), 3);
        // The table still records the boot-time mode
        assert_eq!(PORT_PIN_CONFIG[config::PB2.index()].mode, FunctionMode::Dio);

        drv.set_pin_mode(config::PB2, FunctionMode::Analog).unwrap();
        let bank = drv.hardware().bank(Port::B);
        assert!(!bank.bit(GPIO_DEN_OFFSET, 2));
        assert!(bank.bit(GPIO_AMSEL_OFFSET, 2));
        assert_eq!(PortRegisters::new(bank).pctl_field(2), 0);
    }

    #[test]
    fn test_set_pin_mode_invalid() {
        let mut drv = driver();
        drv.initialize(Some(&PORT_PIN_CONFIG[..])).unwrap();
        drv.hardware().clear_writes();

        assert_eq!(drv.set_pin_mode(config::PB2, FunctionMode::Alternate(0)), Err(PortError::InvalidMode(0)));
        assert_eq!(drv.set_pin_mode(config::PB2, FunctionMode::Alternate(16)), Err(PortError::InvalidMode(16)));
        assert!(drv.hardware().writes().is_empty());
        assert!(faults(&drv).iter().all(|f| f.api == ApiId::SetPinMode && f.error.code() == 0x0D));
    }

    #[test]
    fn test_refresh_port_direction_idempotent() {
        let mut drv = driver();
        drv.initialize(Some(&PORT_PIN_CONFIG[..])).unwrap();
        drv.set_pin_direction(config::PB0, Direction::Output).unwrap();

        drv.refresh_port_direction().unwrap();
        let first = drv.hardware().snapshot();
        drv.hardware().clear_writes();
        drv.refresh_port_direction().unwrap();

        assert_eq!(drv.hardware().snapshot(), first);
        assert!(drv.hardware().writes().iter().all(|w| w.offset == GPIO_DIR_OFFSET && w.old == w.new));
    }

    #[test]
    fn test_version_info() {
        let mut drv = driver();
        let mut info = VersionInfo::default();

        assert_eq!(drv.version_info(Some(&mut info)), Ok(()));
        assert_eq!(info.vendor_id, 1000);
        assert_eq!(info.module_id, 120);
        assert_eq!((info.sw_major_version, info.sw_minor_version, info.sw_patch_version), (1, 0, 0));

        assert_eq!(drv.version_info(None), Err(PortError::NullOutputPointer));
        assert_eq!(faults(&drv), vec![Fault::new(ApiId::GetVersionInfo, PortError::NullOutputPointer)]);
    }
}
