use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use tagwire_buffer::ByteBuffer;

use crate::config::WireConfig;
use crate::error::{FrameError, Result};

/// What a length prefix measures, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthKind {
    String,
    Collection,
    Object,
}

impl fmt::Display for LengthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LengthKind::String => "string",
            LengthKind::Collection => "collection",
            LengthKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Encoding side: a buffer plus the wire configuration in effect.
pub struct WireWriter<'a> {
    buf: &'a mut ByteBuffer,
    config: &'a WireConfig,
}

impl<'a> WireWriter<'a> {
    pub fn new(buf: &'a mut ByteBuffer, config: &'a WireConfig) -> Self {
        Self { buf, config }
    }

    /// The buffer being written.
    pub fn buffer(&mut self) -> &mut ByteBuffer {
        &mut *self.buf
    }

    /// Active wire configuration.
    pub fn config(&self) -> &'a WireConfig {
        self.config
    }

    /// Encode one field.
    pub fn write<T: WireField>(&mut self, value: &T) -> Result<()> {
        value.write_field(self)
    }

    pub(crate) fn write_len(&mut self, kind: LengthKind, len: usize) -> Result<()> {
        let len = self.checked_len(kind, len)?;
        self.buf.write_i32(len);
        Ok(())
    }

    /// Length marker for an object body of `len` bytes.
    pub(crate) fn object_marker(&self, len: usize) -> Result<i32> {
        self.checked_len(LengthKind::Object, len)
    }

    fn checked_len(&self, kind: LengthKind, len: usize) -> Result<i32> {
        let max = limit_for(self.config, kind);
        if len > max {
            return Err(FrameError::LengthLimitExceeded { kind, len, max });
        }
        i32::try_from(len).map_err(|_| FrameError::LengthLimitExceeded {
            kind,
            len,
            max: i32::MAX as usize,
        })
    }
}

/// Decoding side: a buffer plus the wire configuration in effect.
pub struct WireReader<'a> {
    buf: &'a mut ByteBuffer,
    config: &'a WireConfig,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a mut ByteBuffer, config: &'a WireConfig) -> Self {
        Self { buf, config }
    }

    /// The buffer being read.
    pub fn buffer(&mut self) -> &mut ByteBuffer {
        &mut *self.buf
    }

    /// Active wire configuration.
    pub fn config(&self) -> &'a WireConfig {
        self.config
    }

    /// Decode one field.
    pub fn read<T: WireField>(&mut self) -> Result<T> {
        T::read_field(self)
    }

    pub(crate) fn read_len(&mut self, kind: LengthKind) -> Result<usize> {
        let len = self.buf.read_i32()?;
        if len < 0 {
            return Err(FrameError::NegativeLength { kind, len });
        }
        let len = len as usize;
        let max = limit_for(self.config, kind);
        if len > max {
            return Err(FrameError::LengthLimitExceeded { kind, len, max });
        }
        Ok(len)
    }
}

fn limit_for(config: &WireConfig, kind: LengthKind) -> usize {
    match kind {
        LengthKind::String => config.max_string_len,
        LengthKind::Collection => config.max_collection_len,
        LengthKind::Object => i32::MAX as usize,
    }
}

/// A value with a fixed wire encoding.
///
/// Implemented for the primitive field types, strings, lists, sets, maps and
/// optional objects. Packet structs get an implementation through
/// [`object_field!`](crate::object_field).
pub trait WireField: Sized {
    /// Cross-runtime type name used in protocol manifests, e.g. `list<int>`.
    fn wire_type() -> String;

    fn write_field(&self, w: &mut WireWriter<'_>) -> Result<()>;

    fn read_field(r: &mut WireReader<'_>) -> Result<Self>;
}

macro_rules! primitive_field {
    ($ty:ty, $name:literal, $write:ident, $read:ident) => {
        impl WireField for $ty {
            fn wire_type() -> String {
                $name.to_string()
            }

            fn write_field(&self, w: &mut WireWriter<'_>) -> Result<()> {
                w.buffer().$write(*self);
                Ok(())
            }

            fn read_field(r: &mut WireReader<'_>) -> Result<Self> {
                Ok(r.buffer().$read()?)
            }
        }
    };
}

primitive_field!(bool, "bool", write_bool, read_bool);
primitive_field!(i8, "byte", write_i8, read_i8);
primitive_field!(i16, "short", write_i16, read_i16);
primitive_field!(i32, "int", write_i32, read_i32);
primitive_field!(i64, "long", write_i64, read_i64);
primitive_field!(f32, "float", write_f32, read_f32);
primitive_field!(f64, "double", write_f64, read_f64);

impl WireField for String {
    fn wire_type() -> String {
        "string".to_string()
    }

    fn write_field(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.write_len(LengthKind::String, self.len())?;
        w.buffer().write_bytes(self.as_bytes());
        Ok(())
    }

    fn read_field(r: &mut WireReader<'_>) -> Result<Self> {
        let len = r.read_len(LengthKind::String)?;
        let bytes = r.buffer().read_slice(len)?;
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }
}

impl<T: WireField> WireField for Vec<T> {
    fn wire_type() -> String {
        format!("list<{}>", T::wire_type())
    }

    fn write_field(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.write_len(LengthKind::Collection, self.len())?;
        for element in self {
            element.write_field(w)?;
        }
        Ok(())
    }

    fn read_field(r: &mut WireReader<'_>) -> Result<Self> {
        let len = r.read_len(LengthKind::Collection)?;
        let mut list = Vec::with_capacity(len.min(r.buffer().remaining()));
        for _ in 0..len {
            list.push(T::read_field(r)?);
        }
        Ok(list)
    }
}

impl<T: WireField + Eq + Hash> WireField for HashSet<T> {
    fn wire_type() -> String {
        format!("set<{}>", T::wire_type())
    }

    fn write_field(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.write_len(LengthKind::Collection, self.len())?;
        for element in self {
            element.write_field(w)?;
        }
        Ok(())
    }

    fn read_field(r: &mut WireReader<'_>) -> Result<Self> {
        let len = r.read_len(LengthKind::Collection)?;
        let mut set = HashSet::with_capacity(len.min(r.buffer().remaining()));
        for _ in 0..len {
            set.insert(T::read_field(r)?);
        }
        Ok(set)
    }
}

impl<K, V> WireField for HashMap<K, V>
where
    K: WireField + Eq + Hash,
    V: WireField,
{
    fn wire_type() -> String {
        format!("map<{},{}>", K::wire_type(), V::wire_type())
    }

    fn write_field(&self, w: &mut WireWriter<'_>) -> Result<()> {
        w.write_len(LengthKind::Collection, self.len())?;
        for (key, value) in self {
            key.write_field(w)?;
            value.write_field(w)?;
        }
        Ok(())
    }

    fn read_field(r: &mut WireReader<'_>) -> Result<Self> {
        let len = r.read_len(LengthKind::Collection)?;
        let mut map = HashMap::with_capacity(len.min(r.buffer().remaining()));
        for _ in 0..len {
            let key = K::read_field(r)?;
            let value = V::read_field(r)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}
