//! Connection string parsing
//!
//! A connection string is either `host` or `host:port`. Parsing never fails:
//! a port that is missing or does not parse is simply absent.

use std::fmt;

use crate::constants::ENDPOINT_SEPARATOR;

/// Host and optional port taken from a free-form connection string.
///
/// # Example
///
/// ```rust
/// use siemens_facade::ConnectionEndpoint;
///
/// let ep = ConnectionEndpoint::parse("10.0.0.5:102");
/// assert_eq!(ep.host, "10.0.0.5");
/// assert_eq!(ep.port, Some(102));
///
/// let ep = ConnectionEndpoint::parse("10.0.0.5:abc");
/// assert_eq!(ep.port, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionEndpoint {
    /// Host part (the whole string when no separator is present)
    pub host: String,
    /// Port part, when present and numeric
    pub port: Option<u16>,
}

impl ConnectionEndpoint {
    /// Split on the first `:`. The right part becomes the port only if it
    /// parses as a `u16` after trimming whitespace.
    pub fn parse(connection: &str) -> Self {
        match connection.split_once(ENDPOINT_SEPARATOR) {
            Some((host, port)) => Self {
                host: host.to_string(),
                port: port.trim().parse::<u16>().ok(),
            },
            None => Self {
                host: connection.to_string(),
                port: None,
            },
        }
    }
}

impl fmt::Display for ConnectionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => write!(f, "{}", self.host),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_host_only() {
        let ep = ConnectionEndpoint::parse("10.0.0.5");
        assert_eq!(ep.host, "10.0.0.5");
        assert_eq!(ep.port, None);
    }

    #[test]
    fn test_host_and_port() {
        let ep = ConnectionEndpoint::parse("10.0.0.5:102");
        assert_eq!(ep.host, "10.0.0.5");
        assert_eq!(ep.port, Some(102));
        assert_eq!(ep.to_string(), "10.0.0.5:102");
    }

    #[test]
    fn test_bad_port_is_absent() {
        let ep = ConnectionEndpoint::parse("10.0.0.5:abc");
        assert_eq!(ep.host, "10.0.0.5");
        assert_eq!(ep.port, None);

        // Out of range for a TCP port
        assert_eq!(ConnectionEndpoint::parse("plc:70000").port, None);
        assert_eq!(ConnectionEndpoint::parse("plc:-1").port, None);
        assert_eq!(ConnectionEndpoint::parse("plc:").port, None);
    }

    #[test]
    fn test_splits_on_first_separator() {
        let ep = ConnectionEndpoint::parse("plc:102:extra");
        assert_eq!(ep.host, "plc");
        assert_eq!(ep.port, None);
    }

    #[test]
    fn test_port_whitespace_tolerated() {
        assert_eq!(ConnectionEndpoint::parse("plc: 102 ").port, Some(102));
    }

    #[test]
    fn test_serial_connection_string_kept_as_host() {
        let ep = ConnectionEndpoint::parse("/dev/ttyUSB0");
        assert_eq!(ep.host, "/dev/ttyUSB0");
        assert_eq!(ep.port, None);
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(s in ".*") {
            let ep = ConnectionEndpoint::parse(&s);
            prop_assert!(s.starts_with(ep.host.as_str()));
        }

        #[test]
        fn prop_host_port_recovered(host in "[a-z0-9.]{1,20}", port in any::<u16>()) {
            let ep = ConnectionEndpoint::parse(&format!("{}:{}", host, port));
            prop_assert_eq!(ep.host, host);
            prop_assert_eq!(ep.port, Some(port));
        }

        #[test]
        fn prop_non_numeric_port_absent(host in "[a-z0-9.]{1,20}", port in "[a-z]{1,8}") {
            let ep = ConnectionEndpoint::parse(&format!("{}:{}", host, port));
            prop_assert_eq!(ep.host, host);
            prop_assert_eq!(ep.port, None);
        }
    }
}
