//! # Siemens Value Types
//!
//! Typed values carried by write requests. The wrapper decides the final
//! wire encoding; [`SiemensValue::to_bytes`] is provided for wrappers that
//! simply need the raw bytes in a given byte order.

use std::fmt;

use crate::protocol::SiemensTypeCode;

/// Value written to a PLC area.
///
/// | Variant | Bytes | S7 type |
/// |---------|-------|---------|
/// | Bool | 1 | BOOL |
/// | Byte | 1 | BYTE |
/// | Word | 2 | WORD |
/// | Int | 2 | INT |
/// | DWord | 4 | DWORD |
/// | DInt | 4 | DINT |
/// | Real | 4 | REAL |
///
/// # Example
///
/// ```rust
/// use siemens_facade::SiemensValue;
///
/// let v = SiemensValue::Word(0x1234);
/// assert_eq!(v.byte_len(), 2);
/// assert_eq!(v.to_bytes(false), vec![0x12, 0x34]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SiemensValue {
    Bool(bool),
    Byte(u8),
    Word(u16),
    Int(i16),
    DWord(u32),
    DInt(i32),
    Real(f32),
}

impl SiemensValue {
    /// Number of bytes the value occupies in PLC memory.
    #[inline]
    pub fn byte_len(&self) -> usize {
        match self {
            SiemensValue::Bool(_) | SiemensValue::Byte(_) => 1,
            SiemensValue::Word(_) | SiemensValue::Int(_) => 2,
            SiemensValue::DWord(_) | SiemensValue::DInt(_) | SiemensValue::Real(_) => 4,
        }
    }

    /// S7 transport size code matching this value.
    pub fn type_code(&self) -> SiemensTypeCode {
        match self {
            SiemensValue::Bool(_) => SiemensTypeCode::Bit,
            SiemensValue::Byte(_) => SiemensTypeCode::Byte,
            SiemensValue::Word(_) => SiemensTypeCode::Word,
            SiemensValue::Int(_) => SiemensTypeCode::Int,
            SiemensValue::DWord(_) => SiemensTypeCode::DWord,
            SiemensValue::DInt(_) => SiemensTypeCode::DInt,
            SiemensValue::Real(_) => SiemensTypeCode::Real,
        }
    }

    /// Raw bytes of the value. S7 CPUs are big-endian; pass the handler's
    /// `is_little_endian` flag for transports that differ.
    pub fn to_bytes(&self, little_endian: bool) -> Vec<u8> {
        macro_rules! ordered {
            ($v:expr) => {
                if little_endian {
                    $v.to_le_bytes().to_vec()
                } else {
                    $v.to_be_bytes().to_vec()
                }
            };
        }

        match self {
            SiemensValue::Bool(b) => vec![u8::from(*b)],
            SiemensValue::Byte(v) => vec![*v],
            SiemensValue::Word(v) => ordered!(v),
            SiemensValue::Int(v) => ordered!(v),
            SiemensValue::DWord(v) => ordered!(v),
            SiemensValue::DInt(v) => ordered!(v),
            SiemensValue::Real(v) => ordered!(v),
        }
    }

    /// Total byte length of a value slice.
    pub fn total_len(values: &[SiemensValue]) -> usize {
        values.iter().map(SiemensValue::byte_len).sum()
    }
}

impl fmt::Display for SiemensValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiemensValue::Bool(v) => write!(f, "{}", v),
            SiemensValue::Byte(v) => write!(f, "B#16#{:02X}", v),
            SiemensValue::Word(v) => write!(f, "W#16#{:04X}", v),
            SiemensValue::Int(v) => write!(f, "{}", v),
            SiemensValue::DWord(v) => write!(f, "DW#16#{:08X}", v),
            SiemensValue::DInt(v) => write!(f, "L#{}", v),
            SiemensValue::Real(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for SiemensValue {
    fn from(v: bool) -> Self {
        SiemensValue::Bool(v)
    }
}

impl From<u8> for SiemensValue {
    fn from(v: u8) -> Self {
        SiemensValue::Byte(v)
    }
}

impl From<u16> for SiemensValue {
    fn from(v: u16) -> Self {
        SiemensValue::Word(v)
    }
}

impl From<i16> for SiemensValue {
    fn from(v: i16) -> Self {
        SiemensValue::Int(v)
    }
}

impl From<u32> for SiemensValue {
    fn from(v: u32) -> Self {
        SiemensValue::DWord(v)
    }
}

impl From<i32> for SiemensValue {
    fn from(v: i32) -> Self {
        SiemensValue::DInt(v)
    }
}

impl From<f32> for SiemensValue {
    fn from(v: f32) -> Self {
        SiemensValue::Real(v)
    }
}
