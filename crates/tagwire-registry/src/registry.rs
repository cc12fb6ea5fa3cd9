use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tagwire_frame::WireConfig;
use tracing::debug;

use crate::codec::{FramedCodec, PacketCodec, PacketVariant, Protocol};
use crate::dispatcher::Dispatcher;
use crate::error::{RegistryError, Result};
use crate::id::{ProtocolId, MAX_PROTOCOL_NUM};
use crate::manifest::{ManifestEntry, ManifestField, ProtocolManifest};

type CodecSlot<P> = Option<Arc<dyn PacketCodec<P>>>;

/// One `(id, kind, codec)` entry of a compiler-emitted binding list.
pub struct Binding<P: Protocol> {
    id: i32,
    kind: P::Kind,
    codec: Arc<dyn PacketCodec<P>>,
}

impl<P: Protocol> Binding<P> {
    /// Bind `kind` to `id` with an explicit codec. The id is validated when
    /// the binding is registered.
    pub fn new<C>(id: i32, kind: P::Kind, codec: C) -> Self
    where
        C: PacketCodec<P> + 'static,
    {
        Self {
            id,
            kind,
            codec: Arc::new(codec),
        }
    }

    /// Bind a packet struct to `id` through the shared [`FramedCodec`].
    pub fn framed<T: PacketVariant<P>>(id: i32) -> Self {
        Self::new(id, T::KIND, FramedCodec::<T>::new())
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn kind(&self) -> P::Kind {
        self.kind
    }

    pub fn packet_name(&self) -> &'static str {
        self.codec.packet_name()
    }
}

impl<P: Protocol> fmt::Debug for Binding<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("packet", &self.codec.packet_name())
            .finish()
    }
}

/// Collects bindings, rejecting invalid or conflicting ones as they arrive.
pub struct RegistryBuilder<P: Protocol> {
    slots: Vec<CodecSlot<P>>,
    ids: HashMap<P::Kind, ProtocolId>,
    config: WireConfig,
}

impl<P: Protocol> RegistryBuilder<P> {
    /// Create an empty builder with default wire config.
    pub fn new() -> Self {
        Self::with_config(WireConfig::default())
    }

    /// Create an empty builder with explicit wire config.
    pub fn with_config(config: WireConfig) -> Self {
        Self {
            slots: vec![None; MAX_PROTOCOL_NUM],
            ids: HashMap::new(),
            config,
        }
    }

    /// Install one binding.
    ///
    /// Fails on an id outside `0..=32766`, an id already taken, or a kind
    /// already bound. A failed call leaves the builder unchanged.
    pub fn register(&mut self, binding: Binding<P>) -> Result<&mut Self> {
        let id = ProtocolId::new(binding.id)?;

        if let Some(existing) = &self.slots[id.index()] {
            return Err(RegistryError::DuplicateProtocolId {
                id: id.get(),
                existing: existing.packet_name(),
                duplicate: binding.codec.packet_name(),
            });
        }
        if let Some(existing) = self.ids.get(&binding.kind) {
            return Err(RegistryError::DuplicateType {
                kind: format!("{:?}", binding.kind),
                existing: existing.get(),
                duplicate: id.get(),
            });
        }

        self.ids.insert(binding.kind, id);
        self.slots[id.index()] = Some(binding.codec);
        Ok(self)
    }

    /// Freeze the bindings into an immutable registry.
    pub fn build(self) -> ProtocolRegistry<P> {
        debug!(protocols = self.ids.len(), "protocol registry built");
        ProtocolRegistry {
            slots: self.slots.into_boxed_slice(),
            ids: self.ids,
            config: self.config,
        }
    }
}

impl<P: Protocol> Default for RegistryBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable id ↔ kind ↔ codec table.
///
/// Slot `i` holds the codec for protocol id `i`; a reverse map resolves a
/// packet kind to its id. Lookups take `&self` and need no locking.
pub struct ProtocolRegistry<P: Protocol> {
    slots: Box<[CodecSlot<P>]>,
    ids: HashMap<P::Kind, ProtocolId>,
    config: WireConfig,
}

impl<P: Protocol> ProtocolRegistry<P> {
    /// Start a builder with default wire config.
    pub fn builder() -> RegistryBuilder<P> {
        RegistryBuilder::new()
    }

    /// Build a registry from an ordered binding list.
    pub fn from_bindings<I>(bindings: I) -> Result<Self>
    where
        I: IntoIterator<Item = Binding<P>>,
    {
        Self::from_bindings_with_config(bindings, WireConfig::default())
    }

    /// Build a registry from an ordered binding list with explicit wire config.
    pub fn from_bindings_with_config<I>(bindings: I, config: WireConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Binding<P>>,
    {
        let mut builder = RegistryBuilder::with_config(config);
        for binding in bindings {
            builder.register(binding)?;
        }
        Ok(builder.build())
    }

    /// Protocol id bound to a packet kind.
    pub fn protocol_id_of(&self, kind: P::Kind) -> Result<ProtocolId> {
        self.ids
            .get(&kind)
            .copied()
            .ok_or_else(|| RegistryError::UnknownType(format!("{kind:?}")))
    }

    /// Codec bound to a raw wire id.
    ///
    /// Negative ids, `i16::MAX` and unbound ids all fail with
    /// [`RegistryError::UnknownProtocolId`].
    pub fn codec_of(&self, id: i16) -> Result<&dyn PacketCodec<P>> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.slots.get(index))
            .and_then(Option::as_ref)
            .map(|codec| codec.as_ref())
            .ok_or(RegistryError::UnknownProtocolId(id))
    }

    /// Check if a raw wire id has a codec.
    pub fn contains(&self, id: i16) -> bool {
        self.codec_of(id).is_ok()
    }

    /// Number of bound packet kinds.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Bound protocol ids, ascending.
    pub fn protocol_ids(&self) -> Vec<ProtocolId> {
        let mut ids: Vec<ProtocolId> = self.ids.values().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Wire configuration handed to every codec.
    pub fn config(&self) -> &WireConfig {
        &self.config
    }

    /// Dispatcher reading and writing through this registry.
    pub fn dispatcher(&self) -> Dispatcher<'_, P> {
        Dispatcher::new(self)
    }

    /// Describe every binding for comparison with other runtimes.
    pub fn manifest(&self) -> ProtocolManifest {
        let protocols = self
            .protocol_ids()
            .into_iter()
            .filter_map(|id| {
                let codec = self.slots[id.index()].as_ref()?;
                Some(ManifestEntry {
                    id,
                    name: codec.packet_name().to_string(),
                    fields: codec
                        .fields()
                        .into_iter()
                        .map(ManifestField::from)
                        .collect(),
                })
            })
            .collect();
        ProtocolManifest { protocols }
    }

    /// Compare a manifest produced elsewhere against this registry.
    ///
    /// Every id whose name or field layout differs, or that only one side
    /// binds, is reported.
    pub fn verify_manifest(&self, remote: &ProtocolManifest) -> Result<()> {
        let mismatches = self.manifest().diff(remote);
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::ManifestMismatch(mismatches))
        }
    }
}

impl<P: Protocol> fmt::Debug for ProtocolRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolRegistry")
            .field("protocols", &self.protocol_ids())
            .field("config", &self.config)
            .finish()
    }
}
