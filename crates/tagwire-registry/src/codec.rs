use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use tagwire_buffer::ByteBuffer;
use tagwire_frame::{read_object, write_object, FieldSpec, WireConfig, WireObject, WireReader, WireWriter};

use crate::error::{RegistryError, Result};

/// The closed set of packets one registry dispatches.
///
/// Implemented by the tagged union emitted for a protocol; `Kind` is its
/// fieldless discriminant and serves as the packet type descriptor.
pub trait Protocol: Sized + Send + Sync + 'static {
    type Kind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    fn kind(&self) -> Self::Kind;
}

/// Encode/decode pair for exactly one packet kind.
///
/// Codecs are stateless; the registry owns them for the life of the process.
pub trait PacketCodec<P: Protocol>: Send + Sync {
    /// Schema name of the packet this codec handles.
    fn packet_name(&self) -> &'static str;

    /// Declared fields, in wire order.
    fn fields(&self) -> Vec<FieldSpec>;

    /// Append the framed packet body to `buf`.
    fn encode(&self, buf: &mut ByteBuffer, packet: &P, config: &WireConfig) -> Result<()>;

    /// Read a framed packet body. `None` means the body carried the absent marker.
    fn decode(&self, buf: &mut ByteBuffer, config: &WireConfig) -> Result<Option<P>>;
}

/// A packet struct that is one variant of the protocol union `P`.
pub trait PacketVariant<P: Protocol>: WireObject + Send + Sync + 'static {
    /// The union discriminant of this variant.
    const KIND: P::Kind;

    fn wrap(self) -> P;

    fn unwrap_ref(packet: &P) -> Option<&Self>;
}

/// The one codec implementation every packet shares: the object framing of
/// `tagwire-frame` around the variant's declared fields.
pub struct FramedCodec<T> {
    _variant: PhantomData<fn() -> T>,
}

impl<T> FramedCodec<T> {
    pub fn new() -> Self {
        Self {
            _variant: PhantomData,
        }
    }
}

impl<T> Default for FramedCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FramedCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramedCodec")
            .field("variant", &std::any::type_name::<T>())
            .finish()
    }
}

impl<P, T> PacketCodec<P> for FramedCodec<T>
where
    P: Protocol,
    T: PacketVariant<P>,
{
    fn packet_name(&self) -> &'static str {
        T::NAME
    }

    fn fields(&self) -> Vec<FieldSpec> {
        T::fields()
    }

    fn encode(&self, buf: &mut ByteBuffer, packet: &P, config: &WireConfig) -> Result<()> {
        let body = T::unwrap_ref(packet).ok_or_else(|| RegistryError::CodecMismatch {
            expected: T::NAME,
            found: format!("{:?}", packet.kind()),
        })?;
        write_object(&mut WireWriter::new(buf, config), Some(body))?;
        Ok(())
    }

    fn decode(&self, buf: &mut ByteBuffer, config: &WireConfig) -> Result<Option<P>> {
        let body = read_object::<T>(&mut WireReader::new(buf, config))?;
        Ok(body.map(T::wrap))
    }
}
