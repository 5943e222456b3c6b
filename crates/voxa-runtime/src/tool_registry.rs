//! Process-wide tool catalog.
//!
//! The registry maps a composite `(name, result tag)` key to a tool
//! descriptor. It is populated once at startup and read-only afterwards;
//! share it via `Arc` rather than behind a lock.

use std::collections::HashMap;
use std::sync::Arc;

use voxa_core::{RegistryError, ToolDescriptor, ToolKey};

/// Catalog of registered tools keyed by composite identity.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<ToolKey, Arc<ToolDescriptor>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, returning the stored descriptor.
    ///
    /// A second registration under the same composite key is an explicit
    /// conflict, never a silent overwrite.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
    ) -> Result<Arc<ToolDescriptor>, RegistryError> {
        let key = descriptor.key().clone();
        if self.tools.contains_key(&key) {
            return Err(RegistryError::DuplicateTool(key));
        }
        let stored = Arc::new(descriptor);
        self.tools.insert(key, Arc::clone(&stored));
        Ok(stored)
    }

    /// Register a tool, builder-style.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate key. Meant for startup wiring where a
    /// duplicate is a configuration bug that should fail loudly; use
    /// [`register`](Self::register) for fallible registration.
    pub fn with_tool(mut self, descriptor: ToolDescriptor) -> Self {
        self.register(descriptor).expect("unique tool key");
        self
    }

    /// Look up a descriptor by composite key. A miss is `None`, never an
    /// error.
    pub fn lookup(&self, key: &ToolKey) -> Option<Arc<ToolDescriptor>> {
        self.tools.get(key).cloned()
    }

    /// All registered descriptors, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<ToolDescriptor>> {
        self.tools.values()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
