//! Compact binary wire protocol with a fixed-id packet registry.
//!
//! Every packet travels as a big-endian `i16` protocol id followed by a
//! length-framed body. Peers built from older or newer revisions of a schema
//! keep talking: readers skip fields they do not know.
//!
//! # Crate Structure
//!
//! - [`buffer`] — Big-endian byte buffer with a movable read cursor
//! - [`frame`] — Object framing, field encodings and wire configuration
//! - [`registry`] — Protocol ids, codecs, registry and dispatcher
//! - [`packets`] — Reference protocol (behind `packets` feature)
//! - [`logging`] — `tracing-subscriber` setup (behind `logging` feature)

/// Re-export buffer types.
pub mod buffer {
    pub use tagwire_buffer::*;
}

/// Re-export frame types.
pub mod frame {
    pub use tagwire_frame::*;
}

/// Re-export registry types.
pub mod registry {
    pub use tagwire_registry::*;
}

/// Re-export the reference protocol (requires `packets` feature).
#[cfg(feature = "packets")]
pub mod packets {
    pub use tagwire_packets::*;
}

#[cfg(feature = "logging")]
pub mod logging;
