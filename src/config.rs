//! # Client Configuration
//!
//! Everything a [`SiemensClient`](crate::SiemensClient) needs besides its
//! injected collaborators.
//!
//! ```rust
//! use siemens_facade::{DeviceModel, SiemensConfig, TransportKind};
//!
//! let config = SiemensConfig::new(TransportKind::Tcp, DeviceModel::S7_1500)
//!     .with_connection_string("192.168.0.10:102");
//!
//! assert_eq!(config.connection_string.as_deref(), Some("192.168.0.10:102"));
//! assert_eq!(config.belong_address, 2);
//! ```

use crate::constants::{DEFAULT_BELONG_ADDRESS, DEFAULT_MASTER_ADDRESS};
use crate::error::SiemensResult;
use crate::profile::DeviceModel;
use crate::selector::TransportKind;

/// Construction parameters for a Siemens client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiemensConfig {
    /// Transport bound at construction.
    pub transport_kind: TransportKind,
    /// `host`, `host:port`, or a serial port name; `None` for wrapper defaults.
    pub connection_string: Option<String>,
    /// Controller family; decides the connection profile.
    pub model: DeviceModel,
    /// Station address of the PLC.
    pub belong_address: u8,
    /// Station address of this client.
    pub master_address: u8,
}

impl SiemensConfig {
    pub fn new(transport_kind: TransportKind, model: DeviceModel) -> Self {
        Self {
            transport_kind,
            model,
            ..Self::default()
        }
    }

    /// Build from raw numeric selectors as used by integer-based
    /// configuration files (PPI = 0, MPI = 1, TCP = 2; models 0-5).
    pub fn from_raw(transport_kind: u8, model: u8) -> SiemensResult<Self> {
        let model = DeviceModel::from_raw(model)?;
        let transport_kind = TransportKind::from_raw(transport_kind)?;
        Ok(Self::new(transport_kind, model))
    }

    /// Set the connection string.
    pub fn with_connection_string(mut self, connection: impl Into<String>) -> Self {
        self.connection_string = Some(connection.into());
        self
    }

    /// Set the PLC station address.
    pub fn with_belong_address(mut self, address: u8) -> Self {
        self.belong_address = address;
        self
    }

    /// Set the client station address.
    pub fn with_master_address(mut self, address: u8) -> Self {
        self.master_address = address;
        self
    }
}

impl Default for SiemensConfig {
    fn default() -> Self {
        Self {
            transport_kind: TransportKind::Tcp,
            connection_string: None,
            model: DeviceModel::S7_1200,
            belong_address: DEFAULT_BELONG_ADDRESS,
            master_address: DEFAULT_MASTER_ADDRESS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiemensError;

    #[test]
    fn test_defaults() {
        let config = SiemensConfig::default();
        assert_eq!(config.transport_kind, TransportKind::Tcp);
        assert_eq!(config.model, DeviceModel::S7_1200);
        assert_eq!(config.connection_string, None);
        assert_eq!(config.belong_address, DEFAULT_BELONG_ADDRESS);
        assert_eq!(config.master_address, DEFAULT_MASTER_ADDRESS);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SiemensConfig::new(TransportKind::PointToPoint, DeviceModel::S7_200)
            .with_connection_string("/dev/ttyUSB0")
            .with_belong_address(3)
            .with_master_address(1);

        assert_eq!(config.transport_kind, TransportKind::PointToPoint);
        assert_eq!(config.connection_string.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(config.belong_address, 3);
        assert_eq!(config.master_address, 1);
    }

    #[test]
    fn test_from_raw() {
        let config = SiemensConfig::from_raw(2, 1).unwrap();
        assert_eq!(config.transport_kind, TransportKind::Tcp);
        assert_eq!(config.model, DeviceModel::S7_200Smart);

        assert!(matches!(
            SiemensConfig::from_raw(2, 9),
            Err(SiemensError::Configuration { .. })
        ));
        assert!(matches!(
            SiemensConfig::from_raw(7, 0),
            Err(SiemensError::InvalidArgument { .. })
        ));
    }
}
