//! End-to-end behaviour of `SiemensClient` against scripted wrappers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use siemens_facade::{
    async_trait, AccessKind, AccessResult, AddressTranslator, ConnectionProfile, DeviceModel,
    ProtocolHandler, ProtocolWrapper, RequestKind, SiemensAddress, SiemensClient, SiemensConfig,
    SiemensError, SiemensRequest, SiemensResponse, SiemensResult, SiemensValue, TcpEndpoint,
    TransportKind, WrapperFactory,
};

/// What the scripted wrapper does on its next exchange
enum Step {
    Reply(SiemensResponse),
    Fail(SiemensError),
}

#[derive(Default)]
struct Script {
    steps: Mutex<VecDeque<Step>>,
    /// Transport of the wrapper that served each exchange
    served_by: Mutex<Vec<TransportKind>>,
    /// TCP endpoints requested from the factory
    tcp_endpoints: Mutex<Vec<TcpEndpoint>>,
    /// Profiles handed to the TCP constructor
    tcp_profiles: Mutex<Vec<ConnectionProfile>>,
}

impl Script {
    fn push(&self, step: Step) {
        self.steps.lock().unwrap().push_back(step);
    }
}

struct ScriptedWrapper {
    kind: TransportKind,
    script: Arc<Script>,
}

#[async_trait]
impl ProtocolWrapper for ScriptedWrapper {
    fn transport_kind(&self) -> TransportKind {
        self.kind
    }

    fn handler(&self, kind: RequestKind) -> ProtocolHandler {
        // PPI reads little-endian in this script, everything else big-endian
        let little = self.kind == TransportKind::PointToPoint && kind == RequestKind::Read;
        ProtocolHandler::new(kind, little)
    }

    async fn send_receive(
        &mut self,
        _handler: ProtocolHandler,
        _request: SiemensRequest,
    ) -> SiemensResult<SiemensResponse> {
        self.script.served_by.lock().unwrap().push(self.kind);
        match self.script.steps.lock().unwrap().pop_front() {
            Some(Step::Reply(response)) => Ok(response),
            Some(Step::Fail(err)) => Err(err),
            None => Err(SiemensError::transport("script exhausted")),
        }
    }
}

struct ScriptedFactory {
    script: Arc<Script>,
}

impl WrapperFactory for ScriptedFactory {
    fn point_to_point(
        &self,
        _connection: Option<&str>,
        _belong_address: u8,
        _master_address: u8,
    ) -> SiemensResult<Box<dyn ProtocolWrapper>> {
        Ok(Box::new(ScriptedWrapper {
            kind: TransportKind::PointToPoint,
            script: Arc::clone(&self.script),
        }))
    }

    fn tcp(
        &self,
        profile: &ConnectionProfile,
        endpoint: TcpEndpoint,
    ) -> SiemensResult<Box<dyn ProtocolWrapper>> {
        self.script.tcp_endpoints.lock().unwrap().push(endpoint);
        self.script.tcp_profiles.lock().unwrap().push(*profile);
        Ok(Box::new(ScriptedWrapper {
            kind: TransportKind::Tcp,
            script: Arc::clone(&self.script),
        }))
    }
}

struct AnyAddress;

impl AddressTranslator for AnyAddress {
    fn translate(&self, _address: &str, _access: AccessKind) -> SiemensResult<SiemensAddress> {
        Ok(SiemensAddress {
            area: 0x84,
            db_number: 1,
            byte_offset: 0,
            bit: 0,
        })
    }
}

fn tcp_client(model: DeviceModel, connection: Option<&str>) -> (SiemensClient, Arc<Script>) {
    let script = Arc::new(Script::default());
    let factory = Arc::new(ScriptedFactory {
        script: Arc::clone(&script),
    });
    let client = SiemensClient::connect(
        TransportKind::Tcp,
        connection,
        model,
        2,
        0,
        factory,
        Arc::new(AnyAddress),
    )
    .unwrap();
    (client, script)
}

#[test]
fn tcp_wrapper_receives_model_profile() {
    for model in DeviceModel::ALL {
        let (client, script) = tcp_client(model, None);
        assert_eq!(script.tcp_profiles.lock().unwrap()[0], model.profile());
        assert_eq!(client.model(), model);
    }
}

#[test]
fn tcp_endpoint_follows_connection_string() {
    let cases = [
        (None, TcpEndpoint::Default),
        (Some("10.0.0.5"), TcpEndpoint::Host("10.0.0.5".into())),
        (
            Some("10.0.0.5:102"),
            TcpEndpoint::HostPort("10.0.0.5".into(), 102),
        ),
        (Some("10.0.0.5:abc"), TcpEndpoint::Host("10.0.0.5".into())),
    ];

    for (connection, expected) in cases {
        let (client, script) = tcp_client(DeviceModel::S7_1500, connection);
        assert_eq!(script.tcp_endpoints.lock().unwrap()[0], expected);
        assert_eq!(client.connection_string(), connection);
    }
}

#[test]
fn multipoint_always_unsupported() {
    for connection in [None, Some("COM1"), Some("10.0.0.5:102")] {
        let script = Arc::new(Script::default());
        let mut config = SiemensConfig::new(TransportKind::MultiPoint, DeviceModel::S7_300);
        config.connection_string = connection.map(str::to_string);
        let result = SiemensClient::new(
            config,
            Arc::new(ScriptedFactory { script }),
            Arc::new(AnyAddress),
        );
        assert!(matches!(
            result,
            Err(SiemensError::UnsupportedTransport { .. })
        ));
    }
}

#[test]
fn tcp_binds_with_any_station_address() {
    let script = Arc::new(Script::default());
    let client = SiemensClient::connect(
        TransportKind::Tcp,
        Some("10.0.0.5:102"),
        DeviceModel::S7_1200,
        0xFF,
        0,
        Arc::new(ScriptedFactory {
            script: Arc::clone(&script),
        }),
        Arc::new(AnyAddress),
    )
    .unwrap();

    assert_eq!(client.belong_address(), 0xFF);
    assert_eq!(client.transport_kind(), TransportKind::Tcp);
    assert_eq!(
        *script.tcp_endpoints.lock().unwrap(),
        vec![TcpEndpoint::HostPort("10.0.0.5".into(), 102)]
    );
}

#[tokio::test]
async fn read_failure_is_absorbed() {
    let (mut client, script) = tcp_client(DeviceModel::S7_300, Some("10.0.0.5"));
    script.push(Step::Fail(SiemensError::transport("connection reset")));
    script.push(Step::Fail(SiemensError::timeout("no reply", 500)));

    assert_eq!(client.read_bytes("DB1.DBB0", 4).await, None);
    assert_eq!(client.read_bytes("DB1.DBB0", 4).await, None);
}

#[tokio::test]
async fn write_true_only_on_no_error() {
    let (mut client, script) = tcp_client(DeviceModel::S7_1200, None);
    let values = [SiemensValue::DInt(-1)];

    script.push(Step::Reply(SiemensResponse::write(AccessResult::NoError)));
    assert!(client.write_bytes("DB1.DBB0", &values).await);

    script.push(Step::Reply(SiemensResponse::write(AccessResult::from_u8(0x0A))));
    assert!(!client.write_bytes("DB1.DBB0", &values).await);

    script.push(Step::Fail(SiemensError::transport("broken pipe")));
    assert!(!client.write_bytes("DB1.DBB0", &values).await);
}

#[tokio::test]
async fn rebind_from_tcp_to_ppi_switches_dispatch() {
    let (mut client, script) = tcp_client(DeviceModel::S7_200, Some("10.0.0.5:102"));
    assert!(!client.little_endian_on_read());

    script.push(Step::Reply(SiemensResponse::read(vec![0x01])));
    script.push(Step::Reply(SiemensResponse::read(vec![0x02])));

    assert_eq!(client.read_bytes("DB1.DBB0", 1).await.as_deref(), Some(&[0x01][..]));
    client.set_transport_kind(TransportKind::PointToPoint).unwrap();
    assert_eq!(client.read_bytes("DB1.DBB0", 1).await.as_deref(), Some(&[0x02][..]));

    assert_eq!(
        *script.served_by.lock().unwrap(),
        vec![TransportKind::Tcp, TransportKind::PointToPoint]
    );
    assert!(client.little_endian_on_read());
    assert!(!client.little_endian_on_write());
}

#[tokio::test]
async fn shared_client_behind_mutex() {
    let (client, script) = tcp_client(DeviceModel::S7_1500, None);
    let client = Arc::new(tokio::sync::Mutex::new(client));
    for i in 0..4u8 {
        script.push(Step::Reply(SiemensResponse::read(vec![i])));
    }

    let mut handles = Vec::new();
    for _ in 0..4 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(async move {
            client.lock().await.read_bytes("DB1.DBB0", 1).await
        }));
    }

    let mut seen = Vec::new();
    for handle in handles {
        seen.push(handle.await.unwrap().unwrap()[0]);
    }
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3]);
}
