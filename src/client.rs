//! Siemens S7 client facade
//!
//! [`SiemensClient`] hides which transport is in use. It resolves the device
//! profile once, asks the selector for a wrapper, and turns every read or
//! write into a single request record dispatched through that wrapper.
//!
//! # Failure contract
//!
//! Two flavours of each operation exist:
//!
//! | Lossy | Diagnostic | On failure |
//! |-------|------------|------------|
//! | [`read_bytes`](SiemensClient::read_bytes) | [`try_read_bytes`](SiemensClient::try_read_bytes) | `None` / `Err(cause)` |
//! | [`write_bytes`](SiemensClient::write_bytes) | [`try_write_bytes`](SiemensClient::try_write_bytes) | `false` / `Err(cause)` |
//!
//! The lossy calls never return an error: translation failures, transport
//! failures and unexpected responses all collapse into the sentinel.
//!
//! # Ownership
//!
//! The client owns its wrapper outright. Every operation takes `&mut self`,
//! so a transport switch can only happen once in-flight calls have returned.
//! Share a client between tasks by wrapping it in `tokio::sync::Mutex`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use siemens_facade::{
//!     AccessKind, AddressTranslator, ConnectionProfile, DeviceModel, ProtocolWrapper,
//!     SiemensAddress, SiemensClient, SiemensConfig, SiemensError, SiemensResult, SiemensValue,
//!     TcpEndpoint, TransportKind, WrapperFactory,
//! };
//! # struct MyWrappers;
//! # impl WrapperFactory for MyWrappers {
//! #     fn point_to_point(&self, _: Option<&str>, _: u8, _: u8) -> SiemensResult<Box<dyn ProtocolWrapper>> {
//! #         Err(SiemensError::transport("no serial line"))
//! #     }
//! #     fn tcp(&self, _: &ConnectionProfile, _: TcpEndpoint) -> SiemensResult<Box<dyn ProtocolWrapper>> {
//! #         Err(SiemensError::transport("no socket"))
//! #     }
//! # }
//! # struct MyTranslator;
//! # impl AddressTranslator for MyTranslator {
//! #     fn translate(&self, address: &str, _: AccessKind) -> SiemensResult<SiemensAddress> {
//! #         Err(SiemensError::translation(address, "not wired up"))
//! #     }
//! # }
//!
//! # #[tokio::main]
//! # async fn main() -> SiemensResult<()> {
//! let config = SiemensConfig::new(TransportKind::Tcp, DeviceModel::S7_1200)
//!     .with_connection_string("192.168.0.10:102");
//! let mut client = SiemensClient::new(config, Arc::new(MyWrappers), Arc::new(MyTranslator))?;
//!
//! if let Some(bytes) = client.read_bytes("DB1.DBB0", 4).await {
//!     println!("DB1.DBB0..3 = {:02X?}", &bytes[..]);
//! }
//! let ok = client.write_bytes("DB1.DBW10", &[SiemensValue::Word(0x1234)]).await;
//! # let _ = ok;
//! # Ok(())
//! # }
//! ```
use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::config::SiemensConfig;
use crate::error::{SiemensError, SiemensResult};
use crate::profile::{ConnectionProfile, DeviceModel};
use crate::protocol::{
    AddressTranslator, ReadRequest, RequestKind, SiemensRequest, SiemensResponse, WriteRequest,
};
use crate::selector::{self, BindContext, TransportKind};
use crate::value::SiemensValue;
use crate::wrapper::{ProtocolWrapper, WrapperFactory};

/// Transport-agnostic Siemens S7 client.
pub struct SiemensClient {
    transport_kind: TransportKind,
    connection_string: Option<String>,
    model: DeviceModel,
    profile: ConnectionProfile,
    belong_address: u8,
    master_address: u8,
    wrapper: Box<dyn ProtocolWrapper>,
    factory: Arc<dyn WrapperFactory>,
    translator: Arc<dyn AddressTranslator>,
}

impl SiemensClient {
    /// Create a client and bind its initial transport.
    ///
    /// Station addresses are passed through untouched. Fails with
    /// `UnsupportedTransport` for MPI, or with whatever the factory reports
    /// when it cannot build the wrapper.
    pub fn new(
        config: SiemensConfig,
        factory: Arc<dyn WrapperFactory>,
        translator: Arc<dyn AddressTranslator>,
    ) -> SiemensResult<Self> {
        let profile = config.model.profile();
        debug!(
            "Resolved {} profile: tpdu=0x{:02x}, max_pdu={}",
            config.model, profile.tpdu_size, profile.max_pdu
        );

        let wrapper = selector::bind(
            config.transport_kind,
            BindContext {
                connection: config.connection_string.as_deref(),
                profile: &profile,
                belong_address: config.belong_address,
                master_address: config.master_address,
            },
            factory.as_ref(),
        )?;

        Ok(Self {
            transport_kind: config.transport_kind,
            connection_string: config.connection_string,
            model: config.model,
            profile,
            belong_address: config.belong_address,
            master_address: config.master_address,
            wrapper,
            factory,
            translator,
        })
    }

    /// Positional constructor: transport, connection string, model, PLC
    /// station address, client station address.
    pub fn connect(
        transport_kind: TransportKind,
        connection_string: Option<&str>,
        model: DeviceModel,
        belong_address: u8,
        master_address: u8,
        factory: Arc<dyn WrapperFactory>,
        translator: Arc<dyn AddressTranslator>,
    ) -> SiemensResult<Self> {
        let mut config = SiemensConfig::new(transport_kind, model)
            .with_belong_address(belong_address)
            .with_master_address(master_address);
        config.connection_string = connection_string.map(str::to_string);
        Self::new(config, factory, translator)
    }

    // ===== Transport selection =====

    /// Rebind to `kind`, replacing the active wrapper.
    ///
    /// A fresh wrapper is built even when `kind` equals the current kind. On
    /// error the previous kind and wrapper stay in place.
    pub fn set_transport_kind(&mut self, kind: TransportKind) -> SiemensResult<()> {
        let wrapper = selector::bind(
            kind,
            BindContext {
                connection: self.connection_string.as_deref(),
                profile: &self.profile,
                belong_address: self.belong_address,
                master_address: self.master_address,
            },
            self.factory.as_ref(),
        )?;

        self.transport_kind = kind;
        self.wrapper = wrapper;
        Ok(())
    }

    /// Rebind from a raw selector value (PPI = 0, MPI = 1, TCP = 2).
    pub fn set_transport_kind_raw(&mut self, raw: u8) -> SiemensResult<()> {
        let kind = TransportKind::from_raw(raw)?;
        self.set_transport_kind(kind)
    }

    // ===== Data access =====

    /// Read `count` bytes starting at `start_address`, reporting why a read
    /// failed.
    pub async fn try_read_bytes(&mut self, start_address: &str, count: u16) -> SiemensResult<Bytes> {
        let handler = self.wrapper.handler(RequestKind::Read);
        let request = ReadRequest::bytes(
            self.belong_address,
            self.master_address,
            start_address,
            count,
            Arc::clone(&self.translator),
        );
        debug!(
            "{} read: start={}, count={}, kind=0x{:04x}",
            self.transport_kind, start_address, count, request.request_kind_id
        );

        match self
            .wrapper
            .send_receive(handler, SiemensRequest::Read(request))
            .await?
        {
            SiemensResponse::Read(response) => {
                debug!("{} read returned {} bytes", self.transport_kind, response.payload.len());
                Ok(response.payload)
            }
            other => Err(SiemensError::malformed_response(format!(
                "expected read response, got {:?} response",
                other.kind()
            ))),
        }
    }

    /// Write `values` starting at `start_address`, reporting why a write
    /// failed. Succeeds only when the PLC answers with "no error".
    pub async fn try_write_bytes(
        &mut self,
        start_address: &str,
        values: &[SiemensValue],
    ) -> SiemensResult<()> {
        let handler = self.wrapper.handler(RequestKind::Write);
        let request = WriteRequest::new(
            self.belong_address,
            self.master_address,
            start_address,
            values.to_vec(),
            Arc::clone(&self.translator),
        );
        debug!(
            "{} write: start={}, values={}, bytes={}",
            self.transport_kind,
            start_address,
            values.len(),
            request.payload_len()
        );

        match self
            .wrapper
            .send_receive(handler, SiemensRequest::Write(request))
            .await?
        {
            SiemensResponse::Write(response) if response.access_result.is_ok() => Ok(()),
            SiemensResponse::Write(response) => Err(SiemensError::AccessDenied {
                result: response.access_result,
            }),
            other => Err(SiemensError::malformed_response(format!(
                "expected write response, got {:?} response",
                other.kind()
            ))),
        }
    }

    /// Read `count` bytes starting at `start_address`.
    ///
    /// Returns `None` on any failure; the cause is only visible at debug
    /// level. Use [`try_read_bytes`](Self::try_read_bytes) to inspect it.
    pub async fn read_bytes(&mut self, start_address: &str, count: u16) -> Option<Bytes> {
        match self.try_read_bytes(start_address, count).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                debug!("Read of {} absorbed: {}", start_address, e);
                None
            }
        }
    }

    /// Write `values` starting at `start_address`.
    ///
    /// Returns `true` only when the PLC reports "no error".
    pub async fn write_bytes(&mut self, start_address: &str, values: &[SiemensValue]) -> bool {
        match self.try_write_bytes(start_address, values).await {
            Ok(()) => true,
            Err(e) => {
                debug!("Write to {} absorbed: {}", start_address, e);
                false
            }
        }
    }

    // ===== Endianness =====

    /// Byte order of the active wrapper's read handler.
    pub fn little_endian_on_read(&self) -> bool {
        self.wrapper.handler(RequestKind::Read).is_little_endian
    }

    /// Byte order of the active wrapper's write handler.
    pub fn little_endian_on_write(&self) -> bool {
        self.wrapper.handler(RequestKind::Write).is_little_endian
    }

    // ===== Accessors =====

    pub fn transport_kind(&self) -> TransportKind {
        self.transport_kind
    }

    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string.as_deref()
    }

    pub fn model(&self) -> DeviceModel {
        self.model
    }

    pub fn profile(&self) -> &ConnectionProfile {
        &self.profile
    }

    pub fn belong_address(&self) -> u8 {
        self.belong_address
    }

    pub fn master_address(&self) -> u8 {
        self.master_address
    }

    /// Active wrapper.
    pub fn wrapper(&self) -> &dyn ProtocolWrapper {
        self.wrapper.as_ref()
    }
}

impl std::fmt::Debug for SiemensClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiemensClient")
            .field("transport_kind", &self.transport_kind)
            .field("connection_string", &self.connection_string)
            .field("model", &self.model)
            .field("belong_address", &self.belong_address)
            .field("master_address", &self.master_address)
            .finish_non_exhaustive()
    }
}
