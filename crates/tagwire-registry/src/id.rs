use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Number of protocol id slots: one per non-negative `i16` below `i16::MAX`.
pub const MAX_PROTOCOL_NUM: usize = i16::MAX as usize;

/// Largest valid protocol id.
pub const MAX_PROTOCOL_ID: i16 = i16::MAX - 1;

/// A validated protocol identifier in `0..=32766`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ProtocolId(i16);

impl ProtocolId {
    /// Validate a raw id. Out-of-range values are rejected, never clamped.
    pub fn new(raw: i32) -> Result<Self> {
        if (0..=i32::from(MAX_PROTOCOL_ID)).contains(&raw) {
            Ok(Self(raw as i16))
        } else {
            Err(RegistryError::ProtocolIdOutOfRange(raw))
        }
    }

    /// The id as written on the wire.
    pub fn get(self) -> i16 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i32> for ProtocolId {
    type Error = RegistryError;

    fn try_from(raw: i32) -> Result<Self> {
        Self::new(raw)
    }
}

impl TryFrom<i16> for ProtocolId {
    type Error = RegistryError;

    fn try_from(raw: i16) -> Result<Self> {
        Self::new(i32::from(raw))
    }
}

impl From<ProtocolId> for i16 {
    fn from(id: ProtocolId) -> Self {
        id.0
    }
}

impl From<ProtocolId> for i32 {
    fn from(id: ProtocolId) -> Self {
        i32::from(id.0)
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
