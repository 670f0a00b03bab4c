use bytemuck::{Pod, Zeroable};
use heapless::Vec;
use num_traits::FromPrimitive;
use thiserror::Error;

use crate::config::NUMBER_OF_PINS;
use crate::sdk::drivers::port::types::{Direction, FunctionMode, Level, PinDescriptor, PinId, Port, PullPolicy};

/// One pin as laid out by the configuration generator.
///
/// | byte | field                  | values                      |
/// |------|------------------------|-----------------------------|
/// | 0    | `port`                 | 0 (A) ..= 5 (F)             |
/// | 1    | `pin`                  | 0 ..= pins on the port - 1  |
/// | 2    | `direction`            | 0 input, 1 output           |
/// | 3    | `resistor`             | 0 off, 1 pull-up, 2 pull-down |
/// | 4    | `initial_value`        | 0 low, 1 high               |
/// | 5    | `mode`                 | 0 DIO, 1..=15 alternate, 0x10 analog |
/// | 6    | `direction_changeable` | 0 / 1                       |
/// | 7    | `mode_changeable`      | 0 / 1                       |
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct RawPinConfig {
    pub port: u8,
    pub pin: u8,
    pub direction: u8,
    pub resistor: u8,
    pub initial_value: u8,
    pub mode: u8,
    pub direction_changeable: u8,
    pub mode_changeable: u8,
}

pub const RAW_PIN_CONFIG_SIZE: usize = core::mem::size_of::<RawPinConfig>();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlobError {
    #[error("blob length {0} is not a whole number of records")]
    Length(usize),
    #[error("blob holds {0} records, more than there are pins")]
    TooManyRecords(usize),
    #[error("record {record}: unknown port {value}")]
    UnknownPort { record: usize, value: u8 },
    #[error("record {record}: pin {value} is not bonded out")]
    InvalidPin { record: usize, value: u8 },
    #[error("record {record}: bad {field} value {value}")]
    InvalidField { record: usize, field: &'static str, value: u8 },
    #[error("record {record}: mode {value:#04x} is not a valid pin mode")]
    InvalidMode { record: usize, value: u8 },
    #[error("record {record} describes pin {pin}; records must be in pin order")]
    OutOfOrder { record: usize, pin: u8 },
}

fn field<T: FromPrimitive>(record: usize, name: &'static str, value: u8) -> Result<T, BlobError> {
    T::from_u8(value).ok_or(BlobError::InvalidField { record, field: name, value })
}

fn flag(record: usize, name: &'static str, value: u8) -> Result<bool, BlobError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(BlobError::InvalidField { record, field: name, value }),
    }
}

impl RawPinConfig {
    /// Validates the record found at position `record` of a blob.
    pub fn decode(&self, record: usize) -> Result<PinDescriptor, BlobError> {
        let port: Port = Port::from_u8(self.port).ok_or(BlobError::UnknownPort { record, value: self.port })?;
        if PinId::from_port_pin(port, self.pin).is_none() {
            return Err(BlobError::InvalidPin { record, value: self.pin });
        }

        let mode = FunctionMode::from_raw(self.mode).ok_or(BlobError::InvalidMode { record, value: self.mode })?;

        Ok(PinDescriptor {
            port,
            pin_index: self.pin,
            direction: field::<Direction>(record, "direction", self.direction)?,
            pull: field::<PullPolicy>(record, "resistor", self.resistor)?,
            initial_level: field::<Level>(record, "initial_value", self.initial_value)?,
            mode,
            direction_mutable: flag(record, "direction_changeable", self.direction_changeable)?,
            mode_mutable: flag(record, "mode_changeable", self.mode_changeable)?,
        })
    }
}

impl From<&PinDescriptor> for RawPinConfig {
    fn from(desc: &PinDescriptor) -> Self {
        Self {
            port: desc.port.number(),
            pin: desc.pin_index,
            direction: desc.direction as u8,
            resistor: desc.pull as u8,
            initial_value: desc.initial_level as u8,
            mode: desc.mode.raw(),
            direction_changeable: desc.direction_mutable as u8,
            mode_changeable: desc.mode_mutable as u8,
        }
    }
}

/// Decodes a configuration blob into a table ready for the driver.
///
/// The table is indexed by flat pin identifier, so record `n` must describe
/// the pin whose identifier is `n`. A blob may stop early and leave the
/// remaining pins unconfigured.
pub fn decode(bytes: &[u8]) -> Result<Vec<PinDescriptor, NUMBER_OF_PINS>, BlobError> {
    let records: &[RawPinConfig] = bytemuck::try_cast_slice(bytes).map_err(|_| BlobError::Length(bytes.len()))?;
    if records.len() > NUMBER_OF_PINS {
        return Err(BlobError::TooManyRecords(records.len()));
    }

    let mut table = Vec::new();
    for (record, raw) in records.iter().enumerate() {
        let desc = raw.decode(record)?;

        let pin = desc.pin_id().map(PinId::raw).unwrap_or(u8::MAX);
        if pin as usize != record {
            return Err(BlobError::OutOfOrder { record, pin });
        }

        table.push(desc).map_err(|_| BlobError::TooManyRecords(records.len()))?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PORT_PIN_CONFIG;

    fn encode(table: &[PinDescriptor]) -> std::vec::Vec<u8> {
        let raw: std::vec::Vec<RawPinConfig> = table.iter().map(RawPinConfig::from).collect();
        bytemuck::cast_slice::<RawPinConfig, u8>(&raw).to_vec()
    }

    #[test]
    fn test_record_layout() {
        assert_eq!(RAW_PIN_CONFIG_SIZE, 8);

        // PA1 output high, alternate function 1, both attributes changeable
        let bytes = [0u8, 1, 1, 0, 1, 1, 1, 1];
        let raw: &RawPinConfig = bytemuck::from_bytes(&bytes);
        let desc = raw.decode(1).unwrap();

        assert_eq!(desc.port, Port::A);
        assert_eq!(desc.pin_index, 1);
        assert_eq!(desc.direction, Direction::Output);
        assert_eq!(desc.initial_level, Level::High);
        assert_eq!(desc.mode, FunctionMode::Alternate(1));
        assert!(desc.direction_mutable && desc.mode_mutable);
    }

    #[test]
    fn test_decode_board_table() {
        let table = decode(&encode(&PORT_PIN_CONFIG)).unwrap();
        assert_eq!(&table[..], &PORT_PIN_CONFIG[..]);
    }

    #[test]
    fn test_decode_partial_table() {
        let table = decode(&encode(&PORT_PIN_CONFIG[..10])).unwrap();
        assert_eq!(table.len(), 10);
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        let mut bytes = encode(&PORT_PIN_CONFIG[..2]);
        bytes.pop();
        assert_eq!(decode(&bytes), Err(BlobError::Length(15)));
    }

    #[test]
    fn test_decode_rejects_bad_port() {
        let mut bytes = encode(&PORT_PIN_CONFIG[..2]);
        bytes[RAW_PIN_CONFIG_SIZE] = 6;
        assert_eq!(decode(&bytes), Err(BlobError::UnknownPort { record: 1, value: 6 }));
    }

    #[test]
    fn test_decode_rejects_unbonded_pin() {
        // PF5 does not exist
        let bytes = [5u8, 5, 0, 0, 0, 0, 0, 0];
        assert_eq!(decode(&bytes), Err(BlobError::InvalidPin { record: 0, value: 5 }));
    }

    #[test]
    fn test_decode_rejects_bad_mode() {
        let mut bytes = encode(&PORT_PIN_CONFIG[..1]);
        bytes[5] = 0x11;
        assert_eq!(decode(&bytes), Err(BlobError::InvalidMode { record: 0, value: 0x11 }));
    }

    #[test]
    fn test_decode_rejects_bad_enum_and_flag() {
        let mut bytes = encode(&PORT_PIN_CONFIG[..1]);
        bytes[3] = 3;
        assert_eq!(
            decode(&bytes),
            Err(BlobError::InvalidField { record: 0, field: "resistor", value: 3 })
        );

        let mut bytes = encode(&PORT_PIN_CONFIG[..1]);
        bytes[7] = 2;
        assert_eq!(
            decode(&bytes),
            Err(BlobError::InvalidField { record: 0, field: "mode_changeable", value: 2 })
        );
    }

    #[test]
    fn test_decode_rejects_out_of_order() {
        let mut table = [PORT_PIN_CONFIG[0], PORT_PIN_CONFIG[1], PORT_PIN_CONFIG[2]];
        table.swap(1, 2);
        assert_eq!(decode(&encode(&table)), Err(BlobError::OutOfOrder { record: 1, pin: 2 }));
    }

    #[test]
    fn test_decode_rejects_oversized_blob() {
        let mut bytes = encode(&PORT_PIN_CONFIG);
        bytes.extend_from_slice(&[0; RAW_PIN_CONFIG_SIZE]);
        assert_eq!(decode(&bytes), Err(BlobError::TooManyRecords(44)));
    }
}
