/// Errors raised by [`ByteBuffer`](crate::ByteBuffer) accessors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// A read ran past the written bytes.
    #[error("malformed stream: needed {needed} bytes, {remaining} remaining")]
    MalformedStream { needed: usize, remaining: usize },

    /// A cursor or patch offset points past the written bytes.
    #[error("offset {offset} out of bounds (len {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, BufferError>;
