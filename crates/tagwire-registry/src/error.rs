use tagwire_buffer::BufferError;
use tagwire_frame::FrameError;

use crate::id::MAX_PROTOCOL_ID;

/// Errors raised by registry construction and packet dispatch.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A received protocol id is out of range or has no codec.
    #[error("protocol id {0} has no registered codec")]
    UnknownProtocolId(i16),

    /// A packet kind has no protocol id binding.
    #[error("no protocol id bound to packet type {0}")]
    UnknownType(String),

    /// A binding uses an id outside the valid range.
    #[error("protocol id {0} outside 0..={max}", max = MAX_PROTOCOL_ID)]
    ProtocolIdOutOfRange(i32),

    /// Two bindings share one protocol id.
    #[error("protocol id {id} bound to both {existing} and {duplicate}")]
    DuplicateProtocolId {
        id: i16,
        existing: &'static str,
        duplicate: &'static str,
    },

    /// One packet kind appears in two bindings.
    #[error("packet type {kind} bound to both id {existing} and id {duplicate}")]
    DuplicateType {
        kind: String,
        existing: i16,
        duplicate: i16,
    },

    /// A codec was handed a packet of another kind.
    #[error("codec for {expected} received a {found} packet")]
    CodecMismatch {
        expected: &'static str,
        found: String,
    },

    /// The packet body carried the absent marker.
    #[error("packet body for protocol id {0} is absent")]
    AbsentPacket(i16),

    /// A protocol manifest disagrees with the local registry.
    #[error("protocol manifest mismatch: {}", .0.join("; "))]
    ManifestMismatch(Vec<String>),

    /// A protocol manifest could not be serialized or parsed.
    #[error("manifest json error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Field encoding or decoding failed.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
}

impl RegistryError {
    /// True when a read ran past the available bytes.
    ///
    /// Transports can treat this as "wait for more data".
    pub fn is_malformed_stream(&self) -> bool {
        matches!(self, Self::Frame(err) if err.is_malformed_stream())
    }

    /// True when a peer sent an id this registry does not know.
    pub fn is_unknown_protocol_id(&self) -> bool {
        matches!(self, Self::UnknownProtocolId(_))
    }
}

impl From<BufferError> for RegistryError {
    fn from(err: BufferError) -> Self {
        Self::Frame(FrameError::Buffer(err))
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
