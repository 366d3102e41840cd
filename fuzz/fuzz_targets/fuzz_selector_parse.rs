#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use siemens_facade::{DeviceModel, SiemensConfig, TransportKind};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    raw_kind: u8,
    raw_model: u8,
    kind_name: &'a str,
    model_name: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    // Selector parsing must reject, never panic
    let _ = input.kind_name.parse::<TransportKind>();
    let _ = input.model_name.parse::<DeviceModel>();

    match SiemensConfig::from_raw(input.raw_kind, input.raw_model) {
        Ok(config) => {
            assert_eq!(config.transport_kind.to_raw(), input.raw_kind);
            assert_eq!(config.model.to_raw(), input.raw_model);
        }
        Err(e) => assert!(e.is_configuration()),
    }
});
