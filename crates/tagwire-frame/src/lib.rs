//! Object framing and field encodings shared by every tagwire codec.
//!
//! Every object on the wire is wrapped in a 4-byte big-endian length marker:
//! - `0` — the object is absent
//! - `-1` — the object is present, its length was not tracked
//! - `n > 0` — the object is present and its fields occupy exactly `n` bytes
//!
//! Readers always jump to `start + n` after decoding the fields they know,
//! so producers may append fields without breaking older consumers.

pub mod codec;
pub mod config;
pub mod error;
pub mod object;

pub use codec::{LengthKind, WireField, WireReader, WireWriter};
pub use config::{LengthMode, WireConfig, DEFAULT_MAX_COLLECTION_LEN, DEFAULT_MAX_STRING_LEN};
pub use error::{FrameError, Result};
pub use object::{
    read_object, read_required, write_object, FieldSpec, WireObject, ABSENT_MARKER,
    MARKER_SIZE, UNTRACKED_MARKER,
};
