//! Reference protocol shared with the other tagwire runtimes.
//!
//! This crate is laid out the way the schema compiler emits a protocol:
//! one struct per packet, the [`Packet`] tagged union with its
//! [`PacketKind`] discriminant, and an ordered [`bindings`] list that pins
//! every kind to its protocol id.
//!
//! | id  | packet            |
//! |-----|-------------------|
//! | 0   | [`EmptyObject`]   |
//! | 100 | [`ComplexObject`] |
//! | 101 | [`NormalObject`]  |
//! | 102 | [`ObjectA`]       |
//! | 103 | [`ObjectB`]       |
//! | 104 | [`SimpleObject`]  |
//!
//! ```
//! use tagwire_buffer::ByteBuffer;
//! use tagwire_packets::{Packet, SimpleObject};
//!
//! let mut buf = ByteBuffer::new();
//! tagwire_packets::write(&mut buf, &Packet::SimpleObject(SimpleObject { c: 7, g: true }))?;
//! assert_eq!(buf.as_slice(), &[0x00, 0x68, 0, 0, 0, 5, 0, 0, 0, 7, 1]);
//!
//! let packet = tagwire_packets::read(&mut buf)?;
//! assert!(matches!(packet, Packet::SimpleObject(SimpleObject { c: 7, g: true })));
//! # Ok::<(), tagwire_registry::RegistryError>(())
//! ```

pub mod packet;

use tagwire_buffer::ByteBuffer;
use tagwire_registry::{
    Binding, PacketVariant, Protocol, ProtocolRegistry, RegistryCell, Result,
};

pub use packet::{ComplexObject, EmptyObject, NormalObject, ObjectA, ObjectB, SimpleObject};

/// Every packet of the protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    EmptyObject(EmptyObject),
    ComplexObject(ComplexObject),
    NormalObject(NormalObject),
    ObjectA(ObjectA),
    ObjectB(ObjectB),
    SimpleObject(SimpleObject),
}

/// Discriminant of [`Packet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    EmptyObject,
    ComplexObject,
    NormalObject,
    ObjectA,
    ObjectB,
    SimpleObject,
}

impl PacketKind {
    pub const ALL: [PacketKind; 6] = [
        PacketKind::EmptyObject,
        PacketKind::ComplexObject,
        PacketKind::NormalObject,
        PacketKind::ObjectA,
        PacketKind::ObjectB,
        PacketKind::SimpleObject,
    ];
}

impl Protocol for Packet {
    type Kind = PacketKind;

    fn kind(&self) -> PacketKind {
        match self {
            Packet::EmptyObject(_) => PacketKind::EmptyObject,
            Packet::ComplexObject(_) => PacketKind::ComplexObject,
            Packet::NormalObject(_) => PacketKind::NormalObject,
            Packet::ObjectA(_) => PacketKind::ObjectA,
            Packet::ObjectB(_) => PacketKind::ObjectB,
            Packet::SimpleObject(_) => PacketKind::SimpleObject,
        }
    }
}

macro_rules! packet_variant {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl PacketVariant<Packet> for $ty {
                const KIND: PacketKind = PacketKind::$ty;

                fn wrap(self) -> Packet {
                    Packet::$ty(self)
                }

                fn unwrap_ref(packet: &Packet) -> Option<&Self> {
                    match packet {
                        Packet::$ty(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Packet {
                fn from(inner: $ty) -> Self {
                    Packet::$ty(inner)
                }
            }
        )+
    };
}

packet_variant!(
    EmptyObject,
    ComplexObject,
    NormalObject,
    ObjectA,
    ObjectB,
    SimpleObject,
);

/// The protocol's id assignments, in declaration order.
pub fn bindings() -> Vec<Binding<Packet>> {
    vec![
        Binding::framed::<EmptyObject>(0),
        Binding::framed::<ComplexObject>(100),
        Binding::framed::<NormalObject>(101),
        Binding::framed::<ObjectA>(102),
        Binding::framed::<ObjectB>(103),
        Binding::framed::<SimpleObject>(104),
    ]
}

static REGISTRY: RegistryCell<Packet> = RegistryCell::new();

/// Install the process-wide registry. Safe to call any number of times
/// from any thread; only the first call builds it.
pub fn init_protocol() -> Result<&'static ProtocolRegistry<Packet>> {
    REGISTRY.initialize(bindings)
}

/// The process-wide registry, installed on first use.
pub fn registry() -> Result<&'static ProtocolRegistry<Packet>> {
    match REGISTRY.get() {
        Some(registry) => Ok(registry),
        None => init_protocol(),
    }
}

/// Write `packet` as `id | framed body` through the process-wide registry.
pub fn write(buf: &mut ByteBuffer, packet: &Packet) -> Result<()> {
    registry()?.dispatcher().write(buf, packet)
}

/// Read one packet through the process-wide registry.
pub fn read(buf: &mut ByteBuffer) -> Result<Packet> {
    registry()?.dispatcher().read(buf)
}
