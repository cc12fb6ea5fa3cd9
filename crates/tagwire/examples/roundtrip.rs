//! Writes a few reference packets into one buffer, reads them back and
//! prints the protocol manifest other runtimes can verify against.
//!
//! Run with:
//!   cargo run --example roundtrip --features packets,logging -- trace

use tagwire::buffer::ByteBuffer;
use tagwire::logging::{init_logging, LogFormat, LogLevel};
use tagwire::packets::{self, ObjectA, ObjectB, Packet, SimpleObject};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<LogLevel>()?,
        None => LogLevel::Debug,
    };
    init_logging(LogFormat::Text, level);

    let registry = packets::init_protocol()?;

    let outbound = vec![
        Packet::SimpleObject(SimpleObject { c: 7, g: true }),
        Packet::ObjectA(ObjectA {
            a: 1,
            m: [(1, "one".to_string())].into_iter().collect(),
            object_b: Some(ObjectB { flag: true }),
        }),
        Packet::ObjectB(ObjectB { flag: false }),
    ];

    let mut buf = ByteBuffer::new();
    for packet in &outbound {
        packets::write(&mut buf, packet)?;
    }
    eprintln!("Encoded {} packets into {} bytes", outbound.len(), buf.len());

    while buf.remaining() > 0 {
        let packet = packets::read(&mut buf)?;
        eprintln!("Decoded {packet:?}");
    }

    println!("{}", registry.manifest().to_json()?);
    Ok(())
}
