//! S7 protocol constants used by the facade
//!
//! Request-kind identifiers travel inside every request record so the wrapper
//! can tell read and write exchanges apart before it looks at the payload.

// ============================================================================
// Request Kind Identifiers
// ============================================================================

/// Request-kind identifier stamped on every read request record
pub const READ_REQUEST_KIND_ID: u16 = 0xd3c7;

/// Request-kind identifier stamped on every write request record
pub const WRITE_REQUEST_KIND_ID: u16 = 0xd3c8;

// ============================================================================
// Endpoint Defaults
// ============================================================================

/// ISO-on-TCP (RFC 1006) well-known port
pub const ISO_TCP_DEFAULT_PORT: u16 = 102;

/// Separator between host and port in a connection string
pub const ENDPOINT_SEPARATOR: char = ':';

// ============================================================================
// PPI Station Addresses
// ============================================================================

/// Default PLC station address on a PPI bus
pub const DEFAULT_BELONG_ADDRESS: u8 = 2;

/// Default master (programming device) address on a PPI bus
pub const DEFAULT_MASTER_ADDRESS: u8 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind_ids_are_adjacent() {
        assert_eq!(READ_REQUEST_KIND_ID, 0xd3c7);
        assert_eq!(WRITE_REQUEST_KIND_ID, READ_REQUEST_KIND_ID + 1);
    }

    #[test]
    fn test_station_defaults_distinct() {
        assert_ne!(DEFAULT_BELONG_ADDRESS, DEFAULT_MASTER_ADDRESS);
    }
}
