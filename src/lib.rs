//! GPIO port driver for the TM4C123GH6PM.
//!
//! A static table of [`PinDescriptor`]s describes every bonded pin. It is
//! applied once through [`PortDriver::initialize`]; afterwards individual pins
//! may be re-pointed at runtime where the table allows it.
//!
//! ```ignore
//! use tm4c_port::{config, Direction, PortDriver, Tm4c123, TracingSink};
//!
//! let hw = Tm4c123::take().unwrap();
//! let mut port = PortDriver::new(hw, TracingSink);
//! port.initialize(Some(&config::PORT_PIN_CONFIG[..]))?;
//! port.set_pin_direction(config::PF0, Direction::Output)?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod sdk;

pub use sdk::drivers::port::{
    ApiId, Attribute, DiagnosticSink, Direction, Fault, FunctionMode, Level, ModuleState, PinDescriptor, PinId,
    PinMask, Port, PortDriver, PortError, PortHardware, PullPolicy, Tm4c123, TracingSink, VersionInfo,
};
