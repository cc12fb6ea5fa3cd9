use once_cell::sync::OnceCell;
use tracing::debug;

use crate::codec::Protocol;
use crate::error::Result;
use crate::registry::{Binding, ProtocolRegistry};

/// Process-wide slot for one protocol's registry.
///
/// The first successful initialization installs the registry; every later
/// call, concurrent or not, is a no-op. Concurrent callers wait for the one
/// build in progress. Readers after installation never block.
pub struct RegistryCell<P: Protocol> {
    cell: OnceCell<ProtocolRegistry<P>>,
}

impl<P: Protocol> RegistryCell<P> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Install a registry built from `bindings` unless one is already installed.
    ///
    /// The binding list is only produced when installation actually happens.
    pub fn initialize<F, I>(&self, bindings: F) -> Result<&ProtocolRegistry<P>>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = Binding<P>>,
    {
        self.initialize_with(|| ProtocolRegistry::from_bindings(bindings()))
    }

    /// Install the registry returned by `build` unless one is already installed.
    ///
    /// A failed build leaves the cell empty so a later call can retry.
    pub fn initialize_with<F>(&self, build: F) -> Result<&ProtocolRegistry<P>>
    where
        F: FnOnce() -> Result<ProtocolRegistry<P>>,
    {
        if let Some(registry) = self.cell.get() {
            debug!("protocol registry already initialized");
            return Ok(registry);
        }

        self.cell.get_or_try_init(|| {
            let registry = build()?;
            debug!(protocols = registry.len(), "installing protocol registry");
            Ok(registry)
        })
    }

    /// The installed registry, if any.
    pub fn get(&self) -> Option<&ProtocolRegistry<P>> {
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<P: Protocol> Default for RegistryCell<P> {
    fn default() -> Self {
        Self::new()
    }
}
