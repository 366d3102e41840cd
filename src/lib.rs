//! # Siemens Facade - Device-Profile-Driven S7 Client
//!
//! A transport-agnostic front end for Siemens S7 PLCs. Pick a controller
//! family and a transport; the facade resolves the connection constants,
//! builds the matching protocol wrapper and gives you two calls: read bytes
//! and write values.
//!
//! ## Supported Controllers
//!
//! | Model | Profile |
//! |-------|---------|
//! | S7-200 | TSAP 0x1001 → 0x1000, PDU 960 |
//! | S7-200 Smart | TSAP 0x0101 → 0x0101, PDU 960 |
//! | S7-300 / S7-400 | TSAP 0x4b54 → 0x0302, PDU 240 |
//! | S7-1200 / S7-1500 | TSAP 0x1011 → 0x0301, PDU 256 |
//!
//! ## Supported Transports
//!
//! | Transport | Status |
//! |-----------|--------|
//! | PPI (point-to-point serial) | ✅ |
//! | MPI (multi-point serial) | ❌ `UnsupportedTransport` |
//! | ISO-on-TCP | ✅ |
//!
//! ## Collaborators
//!
//! Frame encoding, serial and socket I/O, and symbolic address translation
//! are not part of this crate. Supply them through [`WrapperFactory`],
//! [`ProtocolWrapper`] and [`AddressTranslator`].
//!
//! ## Quick Start
//!
//! ```rust
//! use siemens_facade::{ConnectionEndpoint, DeviceModel, SiemensConfig, TransportKind};
//!
//! let config = SiemensConfig::new(TransportKind::Tcp, DeviceModel::S7_300)
//!     .with_connection_string("192.168.0.1:102");
//!
//! let profile = config.model.profile();
//! assert_eq!(profile.source_tsap, 0x4b54);
//!
//! let endpoint = ConnectionEndpoint::parse(config.connection_string.as_deref().unwrap());
//! assert_eq!(endpoint.port, Some(102));
//! ```

// ============================================================================
// Core modules
// ============================================================================

/// Core error types and result handling
pub mod error;

/// S7 protocol constants
pub mod constants;

/// Device models and their connection profiles
pub mod profile;

/// Connection string parsing
pub mod endpoint;

/// Request and response records
pub mod protocol;

/// Wrapper and factory traits
pub mod wrapper;

/// Transport kind selection and wrapper binding
pub mod selector;

/// Client configuration
pub mod config;

/// Typed write values
pub mod value;

/// Client facade
pub mod client;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// === Async runtime (users can use siemens_facade::tokio) ===
pub use tokio;

// === Needed to implement ProtocolWrapper ===
pub use async_trait::async_trait;

// === Core client API ===
pub use client::SiemensClient;
pub use config::SiemensConfig;

// === Error handling ===
pub use error::{SiemensError, SiemensResult};

// === Core types ===
pub use endpoint::ConnectionEndpoint;
pub use profile::{ConnectionProfile, DeviceModel};
pub use protocol::{
    AccessKind, AccessResult, AddressTranslator, ReadRequest, ReadResponse, RequestKind,
    SiemensAddress, SiemensRequest, SiemensResponse, SiemensTypeCode, WriteRequest,
    WriteResponse,
};
pub use selector::TransportKind;
pub use value::SiemensValue;

// === Wrapper capability ===
pub use wrapper::{ProtocolHandler, ProtocolWrapper, TcpEndpoint, WrapperFactory};

// === Constants commonly needed by wrappers ===
pub use constants::{ISO_TCP_DEFAULT_PORT, READ_REQUEST_KIND_ID, WRITE_REQUEST_KIND_ID};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn info() -> String {
    format!("Siemens Facade v{} - S7 client facade for PPI and ISO-on-TCP", VERSION)
}
