use std::fmt;

use tagwire_buffer::ByteBuffer;
use tracing::{debug, trace};

use crate::codec::Protocol;
use crate::error::{RegistryError, Result};
use crate::registry::ProtocolRegistry;

/// Writes packets as `i16 id | framed body` and reads them back by id.
///
/// Failed calls leave the buffer as they found it: a failed write truncates
/// back to the previous write end, a failed read restores the read cursor.
pub struct Dispatcher<'r, P: Protocol> {
    registry: &'r ProtocolRegistry<P>,
}

impl<P: Protocol> fmt::Debug for Dispatcher<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", self.registry)
            .finish()
    }
}

impl<P: Protocol> Clone for Dispatcher<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Protocol> Copy for Dispatcher<'_, P> {}

impl<'r, P: Protocol> Dispatcher<'r, P> {
    pub fn new(registry: &'r ProtocolRegistry<P>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ProtocolRegistry<P> {
        self.registry
    }

    /// Append the packet's protocol id followed by its framed body.
    pub fn write(&self, buf: &mut ByteBuffer, packet: &P) -> Result<()> {
        let id = self.registry.protocol_id_of(packet.kind())?;
        let codec = self.registry.codec_of(id.get())?;

        let start = buf.write_offset();
        buf.write_i16(id.get());
        if let Err(err) = codec.encode(buf, packet, self.registry.config()) {
            buf.truncate(start);
            return Err(err);
        }

        trace!(
            protocol_id = id.get(),
            packet = codec.packet_name(),
            bytes = buf.write_offset() - start,
            "packet written"
        );
        Ok(())
    }

    /// Read a protocol id and decode the packet it selects.
    pub fn read(&self, buf: &mut ByteBuffer) -> Result<P> {
        let start = buf.read_offset();
        let result = buf
            .read_i16()
            .map_err(RegistryError::from)
            .and_then(|id| self.decode_body(buf, id));
        if result.is_err() {
            buf.set_read_offset(start)?;
        }
        result
    }

    /// Append only the framed body, for callers that carry the id themselves.
    pub fn write_body(&self, buf: &mut ByteBuffer, packet: &P) -> Result<()> {
        let id = self.registry.protocol_id_of(packet.kind())?;
        let codec = self.registry.codec_of(id.get())?;

        let start = buf.write_offset();
        codec
            .encode(buf, packet, self.registry.config())
            .inspect_err(|_| buf.truncate(start))
    }

    /// Decode a framed body whose protocol id was read elsewhere.
    pub fn read_body(&self, buf: &mut ByteBuffer, id: i16) -> Result<P> {
        let start = buf.read_offset();
        let result = self.decode_body(buf, id);
        if result.is_err() {
            buf.set_read_offset(start)?;
        }
        result
    }

    fn decode_body(&self, buf: &mut ByteBuffer, id: i16) -> Result<P> {
        let codec = self.registry.codec_of(id).inspect_err(|_| {
            debug!(protocol_id = id, "unknown protocol id");
        })?;
        let packet = codec
            .decode(buf, self.registry.config())?
            .ok_or(RegistryError::AbsentPacket(id))?;

        trace!(protocol_id = id, packet = codec.packet_name(), "packet read");
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use tagwire_frame::{LengthMode, WireConfig};

    use super::*;
    use crate::codec::FramedCodec;
    use crate::registry::Binding;
    use crate::testing::{bindings, chat, Chat, Ping, TestKind, TestPacket};

    fn registry() -> ProtocolRegistry<TestPacket> {
        ProtocolRegistry::from_bindings(bindings()).unwrap()
    }

    #[test]
    fn write_prefixes_protocol_id() {
        let registry = registry();
        let mut buf = ByteBuffer::new();

        registry
            .dispatcher()
            .write(&mut buf, &TestPacket::Ping(Ping { seq: 9 }))
            .unwrap();

        assert_eq!(buf.as_slice(), &[0, 1, 0, 0, 0, 4, 0, 0, 0, 9]);
    }

    #[test]
    fn packets_roundtrip_in_sequence() {
        let registry = registry();
        let dispatcher = registry.dispatcher();
        let packets = vec![
            chat("hello"),
            TestPacket::Ping(Ping { seq: -1 }),
            chat(""),
        ];

        let mut buf = ByteBuffer::new();
        for packet in &packets {
            dispatcher.write(&mut buf, packet).unwrap();
        }

        for packet in &packets {
            assert_eq!(&dispatcher.read(&mut buf).unwrap(), packet);
        }
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn unbound_kind_writes_nothing() {
        let registry = registry();
        let mut buf = ByteBuffer::new();
        buf.write_i8(42);

        let err = registry
            .dispatcher()
            .write(&mut buf, &TestPacket::Orphan)
            .unwrap_err();

        assert!(matches!(err, RegistryError::UnknownType(_)));
        assert_eq!(buf.as_slice(), &[42]);
    }

    #[test]
    fn failed_write_is_rolled_back() {
        let config = WireConfig {
            max_string_len: 6,
            ..WireConfig::default()
        };
        let registry = ProtocolRegistry::from_bindings_with_config(bindings(), config).unwrap();
        let dispatcher = registry.dispatcher();

        let mut buf = ByteBuffer::new();
        dispatcher.write(&mut buf, &chat("ok")).unwrap();
        let written = buf.len();

        assert!(dispatcher.write(&mut buf, &chat("too long")).is_err());
        assert_eq!(buf.len(), written);
        assert!(dispatcher.write_body(&mut buf, &chat("too long")).is_err());
        assert_eq!(buf.len(), written);
    }

    #[test]
    fn codec_bound_to_wrong_kind_is_a_mismatch() {
        let registry = ProtocolRegistry::<TestPacket>::from_bindings(vec![Binding::new(
            1,
            TestKind::Ping,
            FramedCodec::<Chat>::new(),
        )])
        .unwrap();
        let mut buf = ByteBuffer::from_slice(&[9]);

        let err = registry
            .dispatcher()
            .write(&mut buf, &TestPacket::Ping(Ping { seq: 4 }))
            .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::CodecMismatch {
                expected: "Chat",
                ref found
            } if found == "Ping"
        ));
        assert_eq!(buf.as_slice(), &[9]);
    }

    #[test]
    fn unknown_id_restores_cursor() {
        let registry = registry();
        let mut buf = ByteBuffer::from_slice(&[0, 2, 0, 0, 0, 0]);

        let err = registry.dispatcher().read(&mut buf).unwrap_err();

        assert!(err.is_unknown_protocol_id());
        assert_eq!(buf.read_offset(), 0);
    }

    #[test]
    fn negative_id_is_unknown() {
        let registry = registry();
        let mut buf = ByteBuffer::from_slice(&[0xFF, 0xFF]);

        assert!(matches!(
            registry.dispatcher().read(&mut buf),
            Err(RegistryError::UnknownProtocolId(-1))
        ));
    }

    #[test]
    fn absent_body_is_an_error() {
        let registry = registry();
        let mut buf = ByteBuffer::from_slice(&[0, 1, 0, 0, 0, 0]);

        assert!(matches!(
            registry.dispatcher().read(&mut buf),
            Err(RegistryError::AbsentPacket(1))
        ));
        assert_eq!(buf.read_offset(), 0);
    }

    #[test]
    fn partial_packet_is_malformed_and_resumable() {
        let registry = registry();
        let dispatcher = registry.dispatcher();

        let mut full = ByteBuffer::new();
        dispatcher.write(&mut full, &chat("split me")).unwrap();
        let bytes = full.as_slice().to_vec();
        let (head, tail) = bytes.split_at(bytes.len() / 2);

        let mut buf = ByteBuffer::from_slice(head);
        let err = dispatcher.read(&mut buf).unwrap_err();
        assert!(err.is_malformed_stream());
        assert_eq!(buf.read_offset(), 0);

        buf.write_bytes(tail);
        assert_eq!(dispatcher.read(&mut buf).unwrap(), chat("split me"));
    }

    #[test]
    fn body_only_roundtrip() {
        let registry = registry();
        let dispatcher = registry.dispatcher();
        let mut buf = ByteBuffer::new();

        dispatcher.write_body(&mut buf, &chat("body")).unwrap();
        assert_eq!(dispatcher.read_body(&mut buf, 7).unwrap(), chat("body"));

        dispatcher.write_body(&mut buf, &chat("body")).unwrap();
        let start = buf.read_offset();
        assert!(dispatcher.read_body(&mut buf, 3).is_err());
        assert_eq!(buf.read_offset(), start);
    }

    #[test]
    fn untracked_mode_roundtrips() {
        let config = WireConfig {
            length_mode: LengthMode::Untracked,
            ..WireConfig::default()
        };
        let registry = ProtocolRegistry::from_bindings_with_config(bindings(), config).unwrap();
        let dispatcher = registry.dispatcher();
        let mut buf = ByteBuffer::new();

        dispatcher
            .write(&mut buf, &TestPacket::Ping(Ping { seq: 5 }))
            .unwrap();

        assert_eq!(buf.as_slice(), &[0, 1, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 5]);
        assert_eq!(
            dispatcher.read(&mut buf).unwrap(),
            TestPacket::Ping(Ping { seq: 5 })
        );
    }
}
