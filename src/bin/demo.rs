//! Siemens Facade Demo
//!
//! Demonstrates the siemens_facade library features including:
//! - Device profile resolution for every supported S7 family
//! - Connection string parsing
//! - Reading and writing through a simulated in-memory PLC
//! - Switching transports at runtime
//!
//! Usage: cargo run --bin demo [model] [connection_string]
//! Example: cargo run --bin demo S7-1200 192.168.0.10:102

use std::sync::{Arc, Mutex};

use siemens_facade::{
    async_trait, AccessKind, AccessResult, AddressTranslator, ConnectionEndpoint,
    ConnectionProfile, DeviceModel, ProtocolHandler, ProtocolWrapper, RequestKind, SiemensAddress,
    SiemensClient, SiemensConfig, SiemensError, SiemensRequest, SiemensResponse, SiemensResult,
    SiemensValue, TcpEndpoint, TransportKind, WrapperFactory, ISO_TCP_DEFAULT_PORT,
};

/// Accepts `DB<n>.DBB<offset>`
struct DbByteTranslator;

impl AddressTranslator for DbByteTranslator {
    fn translate(&self, address: &str, _access: AccessKind) -> SiemensResult<SiemensAddress> {
        let (db, offset) = address
            .strip_prefix("DB")
            .and_then(|rest| rest.split_once(".DBB"))
            .ok_or_else(|| SiemensError::translation(address, "expected DB<n>.DBB<offset>"))?;
        Ok(SiemensAddress {
            area: 0x84,
            db_number: db
                .parse()
                .map_err(|_| SiemensError::translation(address, "bad DB number"))?,
            byte_offset: offset
                .parse()
                .map_err(|_| SiemensError::translation(address, "bad offset"))?,
            bit: 0,
        })
    }
}

/// One data block shared by every simulated wrapper
struct SimulatedPlc {
    memory: Arc<Mutex<Vec<u8>>>,
    kind: TransportKind,
}

#[async_trait]
impl ProtocolWrapper for SimulatedPlc {
    fn transport_kind(&self) -> TransportKind {
        self.kind
    }

    fn handler(&self, kind: RequestKind) -> ProtocolHandler {
        ProtocolHandler::big_endian(kind)
    }

    async fn send_receive(
        &mut self,
        handler: ProtocolHandler,
        request: SiemensRequest,
    ) -> SiemensResult<SiemensResponse> {
        let mut memory = self
            .memory
            .lock()
            .map_err(|_| SiemensError::transport("simulated PLC poisoned"))?;
        match request {
            SiemensRequest::Read(r) => {
                let start = r.translate()?.byte_offset as usize;
                let end = start + r.count as usize;
                let data = memory
                    .get(start..end)
                    .ok_or_else(|| SiemensError::transport("read past end of DB"))?;
                Ok(SiemensResponse::read(data.to_vec()))
            }
            SiemensRequest::Write(w) => {
                let start = w.translate()?.byte_offset as usize;
                let bytes: Vec<u8> = w
                    .values
                    .iter()
                    .flat_map(|v| v.to_bytes(handler.is_little_endian))
                    .collect();
                match memory.get_mut(start..start + bytes.len()) {
                    Some(slot) => {
                        slot.copy_from_slice(&bytes);
                        Ok(SiemensResponse::write(AccessResult::NoError))
                    }
                    None => Ok(SiemensResponse::write(AccessResult::InvalidAddress)),
                }
            }
        }
    }
}

struct SimulatedFactory {
    memory: Arc<Mutex<Vec<u8>>>,
}

impl WrapperFactory for SimulatedFactory {
    fn point_to_point(
        &self,
        connection: Option<&str>,
        belong_address: u8,
        master_address: u8,
    ) -> SiemensResult<Box<dyn ProtocolWrapper>> {
        println!(
            "    [factory] PPI wrapper on {} (station {} <- master {})",
            connection.unwrap_or("<default port>"),
            belong_address,
            master_address
        );
        Ok(Box::new(SimulatedPlc {
            memory: Arc::clone(&self.memory),
            kind: TransportKind::PointToPoint,
        }))
    }

    fn tcp(
        &self,
        profile: &ConnectionProfile,
        endpoint: TcpEndpoint,
    ) -> SiemensResult<Box<dyn ProtocolWrapper>> {
        let (host, port) = match endpoint {
            TcpEndpoint::Default => ("127.0.0.1".to_string(), ISO_TCP_DEFAULT_PORT),
            TcpEndpoint::Host(host) => (host, ISO_TCP_DEFAULT_PORT),
            TcpEndpoint::HostPort(host, port) => (host, port),
        };
        println!(
            "    [factory] ISO-on-TCP wrapper to {}:{} (TSAP {:04X} -> {:04X}, PDU {})",
            host, port, profile.source_tsap, profile.dest_tsap, profile.max_pdu
        );
        Ok(Box::new(SimulatedPlc {
            memory: Arc::clone(&self.memory),
            kind: TransportKind::Tcp,
        }))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 {}", siemens_facade::info());
    println!("=============================\n");

    // =========================================================================
    // Part 1: Device profiles (no connection required)
    // =========================================================================
    println!("📦 Part 1: Device Profiles");
    println!("--------------------------");

    for model in DeviceModel::ALL {
        let p = model.profile();
        println!(
            "  {:<13} tpdu=0x{:02x} tsap={:04x}->{:04x} calling={} called={} pdu={}",
            model.as_str(),
            p.tpdu_size,
            p.source_tsap,
            p.dest_tsap,
            p.max_calling,
            p.max_called,
            p.max_pdu
        );
    }

    // =========================================================================
    // Part 2: Connection strings
    // =========================================================================
    println!("\n🔗 Part 2: Connection Strings");
    println!("-----------------------------");

    for s in ["10.0.0.5", "10.0.0.5:102", "10.0.0.5:abc"] {
        let ep = ConnectionEndpoint::parse(s);
        println!("  {:<14} -> host={}, port={:?}", s, ep.host, ep.port);
    }

    // =========================================================================
    // Part 3: Simulated PLC
    // =========================================================================
    println!("\n🔌 Part 3: Read/Write Through a Simulated PLC");
    println!("----------------------------------------------");

    let mut args = std::env::args().skip(1);
    let model: DeviceModel = args.next().as_deref().unwrap_or("S7-1200").parse()?;
    let connection = args.next().unwrap_or_else(|| "127.0.0.1:102".to_string());

    let factory = Arc::new(SimulatedFactory {
        memory: Arc::new(Mutex::new(vec![0u8; 64])),
    });
    let config = SiemensConfig::new(TransportKind::Tcp, model).with_connection_string(connection);
    let mut client = SiemensClient::new(config, factory, Arc::new(DbByteTranslator))?;

    let ok = client
        .write_bytes(
            "DB1.DBB0",
            &[SiemensValue::Word(0x1234), SiemensValue::Real(50.0)],
        )
        .await;
    println!("  Write DB1.DBB0: {}", if ok { "✅" } else { "❌" });

    if let Some(bytes) = client.read_bytes("DB1.DBB0", 6).await {
        println!("  Read  DB1.DBB0..5: {:02X?}", &bytes[..]);
    }

    println!("  Read past end: {:?}", client.read_bytes("DB1.DBB60", 8).await);
    if let Err(e) = client.try_read_bytes("MW10", 2).await {
        println!("  Diagnostic read of MW10: {}", e);
    }

    // =========================================================================
    // Part 4: Switching transports
    // =========================================================================
    println!("\n🔄 Part 4: Switching Transports");
    println!("-------------------------------");

    client.set_transport_kind(TransportKind::PointToPoint)?;
    println!(
        "  Now on {} (little-endian read={}, write={})",
        client.transport_kind(),
        client.little_endian_on_read(),
        client.little_endian_on_write()
    );
    println!(
        "  Read via PPI: {:02X?}",
        client.read_bytes("DB1.DBB0", 2).await.map(|b| b.to_vec())
    );

    match client.set_transport_kind(TransportKind::MultiPoint) {
        Ok(()) => println!("  MPI bound (unexpected)"),
        Err(e) => println!("  ⚠️  {} (still on {})", e, client.transport_kind()),
    }

    println!("\n🎉 Demo completed!");
    Ok(())
}
