//! # Device Profiles
//!
//! Each S7 controller family negotiates its ISO-on-TCP connection with a fixed
//! set of constants. This module maps a [`DeviceModel`] to that set once, at
//! client construction.
//!
//! | Model | TPDU | Src TSAP | Dst TSAP | Max calling | Max called | Max PDU |
//! |-------|------|----------|----------|-------------|------------|---------|
//! | S7-200 | 0x09 | 0x1001 | 0x1000 | 1 | 1 | 960 |
//! | S7-300 / S7-400 | 0x1a | 0x4b54 | 0x0302 | 1 | 1 | 240 |
//! | S7-1200 / S7-1500 | 0x0a | 0x1011 | 0x0301 | 3 | 3 | 256 |
//! | S7-200 Smart | 0x0a | 0x0101 | 0x0101 | 1 | 1 | 960 |

use std::fmt;
use std::str::FromStr;

use crate::error::{SiemensError, SiemensResult};

/// Profile shared by the S7-200.
pub const S7_200_PROFILE: ConnectionProfile = ConnectionProfile {
    tpdu_size: 0x09,
    source_tsap: 0x1001,
    dest_tsap: 0x1000,
    max_calling: 0x0001,
    max_called: 0x0001,
    max_pdu: 0x03c0,
};

/// Profile shared by the S7-300 and S7-400.
pub const S7_300_400_PROFILE: ConnectionProfile = ConnectionProfile {
    tpdu_size: 0x1a,
    source_tsap: 0x4b54,
    dest_tsap: 0x0302,
    max_calling: 0x0001,
    max_called: 0x0001,
    max_pdu: 0x00f0,
};

/// Profile shared by the S7-1200 and S7-1500.
pub const S7_1200_1500_PROFILE: ConnectionProfile = ConnectionProfile {
    tpdu_size: 0x0a,
    source_tsap: 0x1011,
    dest_tsap: 0x0301,
    max_calling: 0x0003,
    max_called: 0x0003,
    max_pdu: 0x0100,
};

/// Profile of the S7-200 Smart.
pub const S7_200_SMART_PROFILE: ConnectionProfile = ConnectionProfile {
    tpdu_size: 0x0a,
    source_tsap: 0x0101,
    dest_tsap: 0x0101,
    max_calling: 0x0001,
    max_called: 0x0001,
    max_pdu: 0x03c0,
};

/// Supported Siemens controller families.
///
/// # Example
///
/// ```rust
/// use siemens_facade::DeviceModel;
///
/// let model: DeviceModel = "s7-1200".parse().unwrap();
/// assert_eq!(model, DeviceModel::S7_1200);
/// assert_eq!(model.profile().max_pdu, 0x0100);
/// ```
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceModel {
    S7_200,
    S7_200Smart,
    S7_300,
    S7_400,
    S7_1200,
    S7_1500,
}

impl DeviceModel {
    /// Every supported model, in raw selector order.
    pub const ALL: [DeviceModel; 6] = [
        DeviceModel::S7_200,
        DeviceModel::S7_200Smart,
        DeviceModel::S7_300,
        DeviceModel::S7_400,
        DeviceModel::S7_1200,
        DeviceModel::S7_1500,
    ];

    /// Map a raw numeric selector (0-5) to a model.
    ///
    /// Values outside the table are a configuration error, never a default.
    pub fn from_raw(raw: u8) -> SiemensResult<Self> {
        Self::ALL
            .get(raw as usize)
            .copied()
            .ok_or_else(|| SiemensError::configuration(format!("Unknown Siemens model: {}", raw)))
    }

    /// Raw numeric selector of this model.
    pub fn to_raw(self) -> u8 {
        match self {
            DeviceModel::S7_200 => 0,
            DeviceModel::S7_200Smart => 1,
            DeviceModel::S7_300 => 2,
            DeviceModel::S7_400 => 3,
            DeviceModel::S7_1200 => 4,
            DeviceModel::S7_1500 => 5,
        }
    }

    /// Connection constants for this model.
    #[inline]
    pub fn profile(self) -> ConnectionProfile {
        ConnectionProfile::resolve(self)
    }

    /// Get descriptive name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceModel::S7_200 => "S7-200",
            DeviceModel::S7_200Smart => "S7-200 Smart",
            DeviceModel::S7_300 => "S7-300",
            DeviceModel::S7_400 => "S7-400",
            DeviceModel::S7_1200 => "S7-1200",
            DeviceModel::S7_1500 => "S7-1500",
        }
    }
}

impl fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceModel {
    type Err = SiemensError;

    /// Accepts "S7-200", "s7_1200", "S7200SMART", "200smart", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let family = normalized.strip_prefix("S7").unwrap_or(&normalized);
        match family {
            "200" => Ok(DeviceModel::S7_200),
            "200SMART" | "SMART200" | "SMART" => Ok(DeviceModel::S7_200Smart),
            "300" => Ok(DeviceModel::S7_300),
            "400" => Ok(DeviceModel::S7_400),
            "1200" => Ok(DeviceModel::S7_1200),
            "1500" => Ok(DeviceModel::S7_1500),
            _ => Err(SiemensError::configuration(format!(
                "Unknown Siemens model: {}",
                s
            ))),
        }
    }
}

/// Low-level connection constants for one controller family.
///
/// Immutable once resolved; the TCP wrapper receives all six values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionProfile {
    /// Negotiated TPDU size code.
    pub tpdu_size: u8,
    /// Source (client) TSAP.
    pub source_tsap: u16,
    /// Destination (PLC) TSAP.
    pub dest_tsap: u16,
    /// Maximum parallel jobs requested by the caller.
    pub max_calling: u16,
    /// Maximum parallel jobs accepted by the PLC.
    pub max_called: u16,
    /// Maximum PDU length in bytes.
    pub max_pdu: u16,
}

impl ConnectionProfile {
    /// Resolve the profile of a controller family.
    pub const fn resolve(model: DeviceModel) -> Self {
        match model {
            DeviceModel::S7_200 => S7_200_PROFILE,
            DeviceModel::S7_300 | DeviceModel::S7_400 => S7_300_400_PROFILE,
            DeviceModel::S7_1200 | DeviceModel::S7_1500 => S7_1200_1500_PROFILE,
            DeviceModel::S7_200Smart => S7_200_SMART_PROFILE,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
