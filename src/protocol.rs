//! S7 request and response records
//!
//! Records are built fresh for every call and handed to the active
//! [`ProtocolWrapper`](crate::wrapper::ProtocolWrapper). They carry the
//! injected [`AddressTranslator`] so the wrapper can resolve the symbolic
//! start address while it encodes the frame.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::constants::{READ_REQUEST_KIND_ID, WRITE_REQUEST_KIND_ID};
use crate::error::SiemensResult;
use crate::value::SiemensValue;

/// Key used to look up a request handler on a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Read,
    Write,
}

impl RequestKind {
    /// Fixed request-kind identifier stamped on records of this kind.
    pub fn id(self) -> u16 {
        match self {
            RequestKind::Read => READ_REQUEST_KIND_ID,
            RequestKind::Write => WRITE_REQUEST_KIND_ID,
        }
    }
}

/// S7 transport size codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SiemensTypeCode {
    Bit = 0x01,
    Byte = 0x02,
    Char = 0x03,
    Word = 0x04,
    Int = 0x05,
    DWord = 0x06,
    DInt = 0x07,
    Real = 0x08,
    Counter = 0x1C,
    Timer = 0x1D,
}

impl SiemensTypeCode {
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Item return code reported by the PLC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessResult {
    NoError,
    HardwareFault,
    IllegalObjectAccess,
    InvalidAddress,
    DataTypeNotSupported,
    ObjectNotExist,
    Unknown(u8),
}

impl AccessResult {
    pub fn from_u8(code: u8) -> Self {
        match code {
            0xFF => AccessResult::NoError,
            0x01 => AccessResult::HardwareFault,
            0x03 => AccessResult::IllegalObjectAccess,
            0x05 => AccessResult::InvalidAddress,
            0x06 => AccessResult::DataTypeNotSupported,
            0x0A => AccessResult::ObjectNotExist,
            other => AccessResult::Unknown(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            AccessResult::NoError => 0xFF,
            AccessResult::HardwareFault => 0x01,
            AccessResult::IllegalObjectAccess => 0x03,
            AccessResult::InvalidAddress => 0x05,
            AccessResult::DataTypeNotSupported => 0x06,
            AccessResult::ObjectNotExist => 0x0A,
            AccessResult::Unknown(code) => code,
        }
    }

    #[inline]
    pub fn is_ok(self) -> bool {
        self == AccessResult::NoError
    }
}

impl fmt::Display for AccessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessResult::NoError => write!(f, "no error"),
            AccessResult::HardwareFault => write!(f, "hardware fault"),
            AccessResult::IllegalObjectAccess => write!(f, "illegal object access"),
            AccessResult::InvalidAddress => write!(f, "invalid address"),
            AccessResult::DataTypeNotSupported => write!(f, "data type not supported"),
            AccessResult::ObjectNotExist => write!(f, "object does not exist"),
            AccessResult::Unknown(code) => write!(f, "unknown result 0x{:02X}", code),
        }
    }
}

// ============================================================================
// Address translation
// ============================================================================

/// Direction an address is translated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// Protocol-native S7 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiemensAddress {
    /// Area code (0x84 = DB, 0x81 = inputs, 0x82 = outputs, 0x83 = flags, ...)
    pub area: u8,
    /// Data block number, 0 outside DB areas
    pub db_number: u16,
    /// Byte offset inside the area
    pub byte_offset: u32,
    /// Bit index inside the byte (0-7)
    pub bit: u8,
}

/// Maps symbolic addresses such as `"DB1.DBW0"` to [`SiemensAddress`].
///
/// Injected once per client and shared read-only with every record.
pub trait AddressTranslator: Send + Sync {
    fn translate(&self, address: &str, access: AccessKind) -> SiemensResult<SiemensAddress>;
}

// ============================================================================
// Request records
// ============================================================================

/// Read request record.
#[derive(Clone)]
pub struct ReadRequest {
    pub belong_address: u8,
    pub master_address: u8,
    pub request_kind_id: u16,
    pub type_code: SiemensTypeCode,
    pub start_address: String,
    pub count: u16,
    pub translator: Arc<dyn AddressTranslator>,
}

impl ReadRequest {
    /// Byte-typed read of `count` bytes starting at `start_address`.
    pub fn bytes(
        belong_address: u8,
        master_address: u8,
        start_address: impl Into<String>,
        count: u16,
        translator: Arc<dyn AddressTranslator>,
    ) -> Self {
        Self {
            belong_address,
            master_address,
            request_kind_id: RequestKind::Read.id(),
            type_code: SiemensTypeCode::Byte,
            start_address: start_address.into(),
            count,
            translator,
        }
    }

    /// Resolve the start address through the injected translator.
    pub fn translate(&self) -> SiemensResult<SiemensAddress> {
        self.translator
            .translate(&self.start_address, AccessKind::Read)
    }
}

impl fmt::Debug for ReadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadRequest")
            .field("belong_address", &self.belong_address)
            .field("master_address", &self.master_address)
            .field("request_kind_id", &format_args!("0x{:04x}", self.request_kind_id))
            .field("type_code", &self.type_code)
            .field("start_address", &self.start_address)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

/// Write request record.
#[derive(Clone)]
pub struct WriteRequest {
    pub belong_address: u8,
    pub master_address: u8,
    pub request_kind_id: u16,
    pub start_address: String,
    pub values: Vec<SiemensValue>,
    pub translator: Arc<dyn AddressTranslator>,
}

impl WriteRequest {
    pub fn new(
        belong_address: u8,
        master_address: u8,
        start_address: impl Into<String>,
        values: Vec<SiemensValue>,
        translator: Arc<dyn AddressTranslator>,
    ) -> Self {
        Self {
            belong_address,
            master_address,
            request_kind_id: RequestKind::Write.id(),
            start_address: start_address.into(),
            values,
            translator,
        }
    }

    pub fn translate(&self) -> SiemensResult<SiemensAddress> {
        self.translator
            .translate(&self.start_address, AccessKind::Write)
    }

    /// Payload size of all values in bytes.
    pub fn payload_len(&self) -> usize {
        SiemensValue::total_len(&self.values)
    }
}

impl fmt::Debug for WriteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteRequest")
            .field("belong_address", &self.belong_address)
            .field("master_address", &self.master_address)
            .field("request_kind_id", &format_args!("0x{:04x}", self.request_kind_id))
            .field("start_address", &self.start_address)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// Request handed to a wrapper.
#[derive(Debug, Clone)]
pub enum SiemensRequest {
    Read(ReadRequest),
    Write(WriteRequest),
}

impl SiemensRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            SiemensRequest::Read(_) => RequestKind::Read,
            SiemensRequest::Write(_) => RequestKind::Write,
        }
    }

    pub fn start_address(&self) -> &str {
        match self {
            SiemensRequest::Read(r) => &r.start_address,
            SiemensRequest::Write(w) => &w.start_address,
        }
    }
}

// ============================================================================
// Response records
// ============================================================================

/// Decoded read response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResponse {
    pub payload: Bytes,
}

/// Decoded write response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResponse {
    pub access_result: AccessResult,
}

/// Response returned by a wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiemensResponse {
    Read(ReadResponse),
    Write(WriteResponse),
}

impl SiemensResponse {
    pub fn read(payload: impl Into<Bytes>) -> Self {
        SiemensResponse::Read(ReadResponse {
            payload: payload.into(),
        })
    }

    pub fn write(access_result: AccessResult) -> Self {
        SiemensResponse::Write(WriteResponse { access_result })
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            SiemensResponse::Read(_) => RequestKind::Read,
            SiemensResponse::Write(_) => RequestKind::Write,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiemensError;

    struct DbOnly;

    impl AddressTranslator for DbOnly {
        fn translate(&self, address: &str, _access: AccessKind) -> SiemensResult<SiemensAddress> {
            let offset = address
                .strip_prefix("DB1.DBB")
                .and_then(|o| o.parse::<u32>().ok())
                .ok_or_else(|| SiemensError::translation(address, "not a DB1 byte address"))?;
            Ok(SiemensAddress {
                area: 0x84,
                db_number: 1,
                byte_offset: offset,
                bit: 0,
            })
        }
    }

    #[test]
    fn test_access_result_codes() {
        assert_eq!(AccessResult::from_u8(0xFF), AccessResult::NoError);
        assert_eq!(AccessResult::from_u8(0x05), AccessResult::InvalidAddress);
        assert_eq!(AccessResult::from_u8(0x42), AccessResult::Unknown(0x42));
        assert_eq!(AccessResult::Unknown(0x42).to_u8(), 0x42);
        assert!(AccessResult::NoError.is_ok());
        assert!(!AccessResult::HardwareFault.is_ok());
    }

    #[test]
    fn test_read_request_fixed_fields() {
        let req = ReadRequest::bytes(2, 0, "DB1.DBB4", 8, Arc::new(DbOnly));
        assert_eq!(req.request_kind_id, 0xd3c7);
        assert_eq!(req.type_code, SiemensTypeCode::Byte);
        assert_eq!(req.type_code.to_u8(), 0x02);
        assert_eq!(req.translate().unwrap().byte_offset, 4);
    }

    #[test]
    fn test_write_request_fixed_fields() {
        let req = WriteRequest::new(
            2,
            0,
            "DB1.DBB0",
            vec![SiemensValue::Word(1), SiemensValue::Byte(2)],
            Arc::new(DbOnly),
        );
        assert_eq!(req.request_kind_id, 0xd3c8);
        assert_eq!(req.payload_len(), 3);

        let req = SiemensRequest::Write(req);
        assert_eq!(req.kind(), RequestKind::Write);
        assert_eq!(req.start_address(), "DB1.DBB0");
    }

    #[test]
    fn test_translation_failure_surfaces() {
        let req = ReadRequest::bytes(2, 0, "M0.0", 1, Arc::new(DbOnly));
        assert!(matches!(
            req.translate(),
            Err(SiemensError::Translation { .. })
        ));
    }

    #[test]
    fn test_debug_omits_translator() {
        let req = ReadRequest::bytes(2, 0, "DB1.DBB0", 1, Arc::new(DbOnly));
        let text = format!("{:?}", req);
        assert!(text.contains("0xd3c7"));
        assert!(text.contains("DB1.DBB0"));
    }
}
