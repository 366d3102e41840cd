//! Transport-specific protocol wrappers
//!
//! The facade never touches frames or sockets. A [`ProtocolWrapper`] owns the
//! live PPI serial line or ISO-on-TCP connection and exchanges one request
//! record for one response record. A [`WrapperFactory`] builds the wrapper
//! for each transport kind the selector binds.

use std::fmt;

use async_trait::async_trait;

use crate::error::SiemensResult;
use crate::profile::ConnectionProfile;
use crate::protocol::{RequestKind, SiemensRequest, SiemensResponse};
use crate::selector::TransportKind;

/// Handler looked up on a wrapper by request kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolHandler {
    pub kind: RequestKind,
    /// Byte order this handler uses on the wire
    pub is_little_endian: bool,
}

impl ProtocolHandler {
    pub fn new(kind: RequestKind, is_little_endian: bool) -> Self {
        Self {
            kind,
            is_little_endian,
        }
    }

    /// Big-endian handler, the native S7 byte order.
    pub fn big_endian(kind: RequestKind) -> Self {
        Self::new(kind, false)
    }
}

/// Live protocol implementation for one transport.
///
/// Serialization of concurrent exchanges, timeouts and retries are the
/// wrapper's business; the facade calls [`send_receive`](Self::send_receive)
/// once per read or write.
#[async_trait]
pub trait ProtocolWrapper: Send + Sync {
    /// Transport this wrapper speaks.
    fn transport_kind(&self) -> TransportKind;

    /// Handler for the given request kind.
    fn handler(&self, kind: RequestKind) -> ProtocolHandler;

    /// Send a request through `handler` and wait for the matching response.
    async fn send_receive(
        &mut self,
        handler: ProtocolHandler,
        request: SiemensRequest,
    ) -> SiemensResult<SiemensResponse>;
}

/// How the TCP wrapper should reach the PLC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TcpEndpoint {
    /// No connection string; the wrapper picks its own defaults
    Default,
    /// Host given without a usable port
    Host(String),
    /// Host and port both parsed
    HostPort(String, u16),
}

impl fmt::Display for TcpEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TcpEndpoint::Default => write!(f, "<default>"),
            TcpEndpoint::Host(host) => write!(f, "{}", host),
            TcpEndpoint::HostPort(host, port) => write!(f, "{}:{}", host, port),
        }
    }
}

/// Constructors for each supported transport wrapper.
///
/// There is no multi-point constructor: the selector rejects MPI before a
/// factory is ever consulted.
pub trait WrapperFactory: Send + Sync {
    /// Build a PPI wrapper. `connection` is passed through verbatim; `None`
    /// asks for the wrapper's defaults.
    fn point_to_point(
        &self,
        connection: Option<&str>,
        belong_address: u8,
        master_address: u8,
    ) -> SiemensResult<Box<dyn ProtocolWrapper>>;

    /// Build an ISO-on-TCP wrapper negotiating with `profile`.
    fn tcp(
        &self,
        profile: &ConnectionProfile,
        endpoint: TcpEndpoint,
    ) -> SiemensResult<Box<dyn ProtocolWrapper>>;
}
