//! Pin multiplexing and electrical configuration of the GPIO ports.

pub mod blob;
pub mod driver;
pub mod engine;
pub mod error;
pub mod hardware;
pub mod policy;
pub mod resolver;
pub mod types;
pub mod version;

#[cfg(test)]
pub mod mock;

pub use driver::{ModuleState, PortDriver};
pub use error::{ApiId, Attribute, DiagnosticSink, Fault, PortError, TracingSink};
pub use hardware::{PortHardware, Tm4c123};
pub use types::{Direction, FunctionMode, Level, PinDescriptor, PinId, PinMask, Port, PullPolicy};
pub use version::VersionInfo;
