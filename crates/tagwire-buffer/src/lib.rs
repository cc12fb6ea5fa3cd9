//! Cursor-based byte buffer for the tagwire protocol.
//!
//! This is the lowest layer of tagwire. Every codec reads and writes through
//! the [`ByteBuffer`] provided here:
//! - fixed-width, big-endian integers and floats
//! - one-byte booleans
//! - an explicit read cursor that framing code can reposition

pub mod buffer;
pub mod error;

pub use buffer::ByteBuffer;
pub use error::{BufferError, Result};
