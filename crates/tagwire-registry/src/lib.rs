//! Protocol id registry and packet dispatch.
//!
//! A [`ProtocolRegistry`] binds every packet kind of a protocol to a fixed
//! 16-bit [`ProtocolId`] and a [`PacketCodec`]. It is built once from the
//! binding list emitted by the schema compiler and is read-only afterwards.
//! The [`Dispatcher`] prefixes each packet with its id on write and routes
//! on that id on read.
//!
//! Process-wide registries go through [`RegistryCell`], which installs the
//! bindings exactly once even under concurrent initialization.

pub mod cell;
pub mod codec;
pub mod dispatcher;
pub mod error;
pub mod id;
pub mod manifest;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use cell::RegistryCell;
pub use codec::{FramedCodec, PacketCodec, PacketVariant, Protocol};
pub use dispatcher::Dispatcher;
pub use error::{RegistryError, Result};
pub use id::{ProtocolId, MAX_PROTOCOL_ID, MAX_PROTOCOL_NUM};
pub use manifest::{ManifestEntry, ManifestField, ProtocolManifest};
pub use registry::{Binding, ProtocolRegistry, RegistryBuilder};
