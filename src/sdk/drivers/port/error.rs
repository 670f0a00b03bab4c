use thiserror::Error;

/// Module id reported with every fault (AUTOSAR Port driver).
pub const MODULE_ID: u16 = 120;
pub const INSTANCE_ID: u8 = 0;

/// Which runtime-mutable attribute a rejected call tried to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Direction,
    Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("port driver used before initialization")]
    Uninitialized,
    #[error("pin identifier {0} is not in the active configuration")]
    InvalidPinIdentifier(u8),
    #[error("pin {0:?} is configured unchangeable")]
    ImmutableAttribute(Attribute),
    #[error("no configuration supplied")]
    NullConfiguration,
    #[error("mode {0:#04x} is not a valid pin mode")]
    InvalidMode(u8),
    #[error("no output location supplied")]
    NullOutputPointer,
}

impl PortError {
    /// Development error code as reported to the error tracer.
    pub const fn code(&self) -> u8 {
        match self {
            PortError::InvalidPinIdentifier(_) => 0x0A,
            PortError::ImmutableAttribute(Attribute::Direction) => 0x0B,
            PortError::NullConfiguration => 0x0C,
            PortError::InvalidMode(_) => 0x0D,
            PortError::ImmutableAttribute(Attribute::Mode) => 0x0E,
            PortError::Uninitialized => 0x0F,
            PortError::NullOutputPointer => 0x10,
        }
    }
}

/// Service id of the driver operation that raised a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ApiId {
    Init = 0x00,
    SetPinDirection = 0x01,
    RefreshPortDirection = 0x02,
    GetVersionInfo = 0x03,
    SetPinMode = 0x04,
}

/// One detected development error, addressed the way the error tracer
/// expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub module_id: u16,
    pub instance_id: u8,
    pub api: ApiId,
    pub error: PortError,
}

impl Fault {
    pub const fn new(api: ApiId, error: PortError) -> Self {
        Self {
            module_id: MODULE_ID,
            instance_id: INSTANCE_ID,
            api,
            error,
        }
    }
}

/// Receiver of detected faults.
///
/// The driver calls `report` exactly once per rejected call, before the
/// error is handed back to the caller.
pub trait DiagnosticSink {
    fn report(&mut self, fault: Fault);
}

/// Sink that turns every fault into a `warn` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, fault: Fault) {
        let api = fault.api as u8;
        let code = fault.error.code();
        tracing::warn!(
            module_id = fault.module_id,
            instance_id = fault.instance_id,
            api,
            code,
            error = %fault.error,
            "port fault"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortError::InvalidPinIdentifier(43).code(), 0x0A);
        assert_eq!(PortError::ImmutableAttribute(Attribute::Direction).code(), 0x0B);
        assert_eq!(PortError::NullConfiguration.code(), 0x0C);
        assert_eq!(PortError::InvalidMode(0x20).code(), 0x0D);
        assert_eq!(PortError::ImmutableAttribute(Attribute::Mode).code(), 0x0E);
        assert_eq!(PortError::Uninitialized.code(), 0x0F);
        assert_eq!(PortError::NullOutputPointer.code(), 0x10);
    }

    #[test]
    fn test_fault_addressing() {
        let fault = Fault::new(ApiId::SetPinMode, PortError::Uninitialized);
        assert_eq!(fault.module_id, 120);
        assert_eq!(fault.instance_id, 0);
        assert_eq!(fault.api as u8, 0x04);
    }

    #[test]
    fn test_tracing_sink_accepts_faults_without_subscriber() {
        let mut sink = TracingSink;
        sink.report(Fault::new(ApiId::Init, PortError::NullConfiguration));
    }
}
