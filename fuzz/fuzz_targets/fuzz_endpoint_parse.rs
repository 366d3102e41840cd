#![no_main]

use libfuzzer_sys::fuzz_target;
use siemens_facade::selector::tcp_endpoint;
use siemens_facade::{ConnectionEndpoint, TcpEndpoint};

fuzz_target!(|data: &str| {
    let ep = ConnectionEndpoint::parse(data);
    assert!(data.starts_with(ep.host.as_str()));

    match tcp_endpoint(Some(data)) {
        TcpEndpoint::HostPort(host, port) => {
            assert_eq!(host, ep.host);
            assert_eq!(Some(port), ep.port);
        }
        TcpEndpoint::Host(host) => {
            assert_eq!(host, ep.host);
            assert!(ep.port.is_none());
        }
        TcpEndpoint::Default => panic!("connection string given but default endpoint chosen"),
    }
});
