//! # Connection Mode Selector
//!
//! Turns a [`TransportKind`], an optional connection string and the resolved
//! [`ConnectionProfile`] into a ready-to-use wrapper.
//!
//! | Kind | Connection string | Wrapper |
//! |------|-------------------|---------|
//! | PPI | none | `point_to_point(None, ..)` |
//! | PPI | any | `point_to_point(Some(conn), ..)` |
//! | MPI | any | `UnsupportedTransport` error |
//! | TCP | none | `tcp(profile, Default)` |
//! | TCP | `host` / bad port | `tcp(profile, Host(host))` |
//! | TCP | `host:port` | `tcp(profile, HostPort(host, port))` |

use std::fmt;
use std::str::FromStr;

use tracing::{info, warn};

use crate::endpoint::ConnectionEndpoint;
use crate::error::{SiemensError, SiemensResult};
use crate::profile::ConnectionProfile;
use crate::wrapper::{ProtocolWrapper, TcpEndpoint, WrapperFactory};

/// Transport a client can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// PPI point-to-point serial
    PointToPoint,
    /// MPI multi-point serial (no wrapper available)
    MultiPoint,
    /// ISO-on-TCP
    Tcp,
}

impl TransportKind {
    /// Map a raw numeric selector (PPI = 0, MPI = 1, TCP = 2).
    pub fn from_raw(raw: u8) -> SiemensResult<Self> {
        match raw {
            0 => Ok(TransportKind::PointToPoint),
            1 => Ok(TransportKind::MultiPoint),
            2 => Ok(TransportKind::Tcp),
            other => Err(SiemensError::invalid_argument(format!(
                "Unknown transport kind: {}",
                other
            ))),
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            TransportKind::PointToPoint => 0,
            TransportKind::MultiPoint => 1,
            TransportKind::Tcp => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::PointToPoint => "PPI",
            TransportKind::MultiPoint => "MPI",
            TransportKind::Tcp => "TCP",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = SiemensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "PPI" | "POINTTOPOINT" | "SERIAL" => Ok(TransportKind::PointToPoint),
            "MPI" | "MULTIPOINT" => Ok(TransportKind::MultiPoint),
            "TCP" | "ISOONTCP" | "ISOTCP" | "ETHERNET" => Ok(TransportKind::Tcp),
            _ => Err(SiemensError::invalid_argument(format!(
                "Unknown transport kind: {}",
                s
            ))),
        }
    }
}

/// Work out how the TCP wrapper should be addressed.
pub fn tcp_endpoint(connection: Option<&str>) -> TcpEndpoint {
    match connection.map(ConnectionEndpoint::parse) {
        None => TcpEndpoint::Default,
        Some(ConnectionEndpoint {
            host,
            port: Some(port),
        }) => TcpEndpoint::HostPort(host, port),
        Some(ConnectionEndpoint { host, port: None }) => TcpEndpoint::Host(host),
    }
}

/// Inputs the selector needs for one bind.
#[derive(Debug, Clone, Copy)]
pub struct BindContext<'a> {
    pub connection: Option<&'a str>,
    pub profile: &'a ConnectionProfile,
    pub belong_address: u8,
    pub master_address: u8,
}

/// Construct the wrapper for `kind`.
///
/// Every call builds a new wrapper; nothing is cached between binds.
pub fn bind(
    kind: TransportKind,
    ctx: BindContext<'_>,
    factory: &dyn WrapperFactory,
) -> SiemensResult<Box<dyn ProtocolWrapper>> {
    let result = match kind {
        TransportKind::PointToPoint => {
            factory.point_to_point(ctx.connection, ctx.belong_address, ctx.master_address)
        }
        TransportKind::MultiPoint => Err(SiemensError::unsupported_transport(kind.as_str())),
        TransportKind::Tcp => {
            let endpoint = tcp_endpoint(ctx.connection);
            info!(
                "Binding ISO-on-TCP wrapper: endpoint={}, tsap={:04x}->{:04x}, max_pdu={}",
                endpoint, ctx.profile.source_tsap, ctx.profile.dest_tsap, ctx.profile.max_pdu
            );
            factory.tcp(ctx.profile, endpoint)
        }
    };

    match &result {
        Ok(_) => info!(
            "Bound {} wrapper (station {} via master {})",
            kind, ctx.belong_address, ctx.master_address
        ),
        Err(e) => warn!("Failed to bind {} wrapper: {}", kind, e),
    }

    result
}
