use tagwire_buffer::BufferError;

use crate::codec::LengthKind;

/// Errors that can occur while encoding or decoding framed fields.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The underlying buffer rejected a read, write or cursor move.
    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// An object length marker below `-1`.
    #[error("invalid object length marker {0}")]
    InvalidLengthMarker(i32),

    /// A string or collection announced a negative length.
    #[error("negative {kind} length {len}")]
    NegativeLength { kind: LengthKind, len: i32 },

    /// A string, collection or object is larger than the configured limit.
    #[error("{kind} length {len} exceeds limit {max}")]
    LengthLimitExceeded {
        kind: LengthKind,
        len: usize,
        max: usize,
    },

    /// A string payload is not valid UTF-8.
    #[error("string payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A non-optional object field was encoded as absent.
    #[error("required object {0} is absent")]
    AbsentObject(&'static str),

    /// A `-1` marker was read while untracked markers are disabled.
    #[error("untracked length marker rejected for {0}")]
    UntrackedMarkerRejected(&'static str),
}

impl FrameError {
    /// True when a read ran past the available bytes.
    pub fn is_malformed_stream(&self) -> bool {
        matches!(self, Self::Buffer(BufferError::MalformedStream { .. }))
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
