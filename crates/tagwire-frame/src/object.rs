use tracing::{trace, warn};

use crate::codec::{WireField, WireReader, WireWriter};
use crate::config::LengthMode;
use crate::error::{FrameError, Result};

/// Length marker of an absent object.
pub const ABSENT_MARKER: i32 = 0;

/// Length marker of a present object whose length was not tracked.
pub const UNTRACKED_MARKER: i32 = -1;

/// Width of an object length marker in bytes.
pub const MARKER_SIZE: usize = 4;

/// One declared field of a [`WireObject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub wire_type: String,
}

impl FieldSpec {
    /// Describe a field named `name` whose Rust type is `T`.
    pub fn of<T: WireField>(name: &'static str) -> Self {
        Self {
            name,
            wire_type: T::wire_type(),
        }
    }
}

/// A framed object: an ordered list of fields behind a length marker.
///
/// Implementations only list their fields; [`write_object`] and
/// [`read_object`] own the marker and skip logic.
pub trait WireObject: Sized {
    /// Schema name shared by every runtime.
    const NAME: &'static str;

    /// Declared fields, in wire order.
    fn fields() -> Vec<FieldSpec>;

    fn write_fields(&self, w: &mut WireWriter<'_>) -> Result<()>;

    fn read_fields(r: &mut WireReader<'_>) -> Result<Self>;
}

/// Encode an optional object with its length marker.
pub fn write_object<T: WireObject>(w: &mut WireWriter<'_>, value: Option<&T>) -> Result<()> {
    let Some(value) = value else {
        w.buffer().write_i32(ABSENT_MARKER);
        return Ok(());
    };

    match w.config().length_mode {
        LengthMode::Untracked => {
            w.buffer().write_i32(UNTRACKED_MARKER);
            value.write_fields(w)
        }
        LengthMode::Tracked => {
            let marker_offset = w.buffer().write_offset();
            w.buffer().write_i32(UNTRACKED_MARKER);
            value.write_fields(w)?;

            // An empty body keeps the sentinel: zero would read back as absent.
            let len = w.buffer().write_offset() - marker_offset - MARKER_SIZE;
            if len > 0 {
                let marker = w.object_marker(len)?;
                w.buffer().patch_i32(marker_offset, marker)?;
            }
            Ok(())
        }
    }
}

/// Decode an optional object, skipping any bytes past its known fields.
pub fn read_object<T: WireObject>(r: &mut WireReader<'_>) -> Result<Option<T>> {
    let marker = r.buffer().read_i32()?;
    if marker == ABSENT_MARKER {
        return Ok(None);
    }
    if marker < UNTRACKED_MARKER {
        return Err(FrameError::InvalidLengthMarker(marker));
    }
    if marker == UNTRACKED_MARKER && !r.config().accept_untracked {
        return Err(FrameError::UntrackedMarkerRejected(T::NAME));
    }

    let start = r.buffer().read_offset();
    if marker > 0 {
        let remaining = r.buffer().remaining();
        if marker as usize > remaining {
            return Err(tagwire_buffer::BufferError::MalformedStream {
                needed: marker as usize,
                remaining,
            }
            .into());
        }
    }

    let value = T::read_fields(r)?;

    if marker > 0 {
        let len = marker as usize;
        let consumed = r.buffer().read_offset() - start;
        if consumed > len {
            warn!(
                object = T::NAME,
                declared = len,
                consumed,
                "known fields overran declared length"
            );
        } else if consumed < len {
            trace!(object = T::NAME, skipped = len - consumed, "skipping unknown fields");
        }
        r.buffer().set_read_offset(start + len)?;
    }

    Ok(Some(value))
}

/// Decode an object that must be present.
pub fn read_required<T: WireObject>(r: &mut WireReader<'_>) -> Result<T> {
    read_object(r)?.ok_or(FrameError::AbsentObject(T::NAME))
}

impl<T: WireObject> WireField for Option<T> {
    fn wire_type() -> String {
        T::NAME.to_string()
    }

    fn write_field(&self, w: &mut WireWriter<'_>) -> Result<()> {
        write_object(w, self.as_ref())
    }

    fn read_field(r: &mut WireReader<'_>) -> Result<Self> {
        read_object(r)
    }
}

/// Implement [`WireField`] for objects that appear as non-optional fields
/// (list elements, map values).
///
/// They are framed like any other object; an absent marker in their position
/// fails with [`FrameError::AbsentObject`].
#[macro_export]
macro_rules! object_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::WireField for $ty {
                fn wire_type() -> String {
                    <$ty as $crate::WireObject>::NAME.to_string()
                }

                fn write_field(&self, w: &mut $crate::WireWriter<'_>) -> $crate::Result<()> {
                    $crate::write_object(w, Some(self))
                }

                fn read_field(r: &mut $crate::WireReader<'_>) -> $crate::Result<Self> {
                    $crate::read_required(r)
                }
            }
        )+
    };
}
