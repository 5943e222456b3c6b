//! Agent catalog with lazy tool resolution.
//!
//! Agents reference tools by composite key, not by resolved descriptor, so
//! they can be declared before every tool is registered. Resolution happens
//! here, at read time, against the tool registry. A reference that fails to
//! resolve is dropped with a diagnostic warning, never an error to the
//! caller.

use std::collections::HashMap;
use std::sync::Arc;

use voxa_core::{AgentDescriptor, AgentSlug, RegistryError, ToolDescriptor, ToolSchema};

use crate::swap::swap_schema;
use crate::tool_registry::ToolRegistry;

/// Catalog of registered agents keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: HashMap<AgentSlug, Arc<AgentDescriptor>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent, returning the stored descriptor. Duplicate slugs
    /// are an explicit conflict.
    pub fn register(
        &mut self,
        descriptor: AgentDescriptor,
    ) -> Result<Arc<AgentDescriptor>, RegistryError> {
        let slug = descriptor.slug().clone();
        if self.agents.contains_key(&slug) {
            return Err(RegistryError::DuplicateAgent(slug));
        }
        let stored = Arc::new(descriptor);
        self.agents.insert(slug, Arc::clone(&stored));
        Ok(stored)
    }

    /// Register an agent, builder-style.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate slug; meant for startup wiring.
    pub fn with_agent(mut self, descriptor: AgentDescriptor) -> Self {
        self.register(descriptor).expect("unique agent slug");
        self
    }

    pub fn get(&self, slug: &AgentSlug) -> Option<Arc<AgentDescriptor>> {
        self.agents.get(slug).cloned()
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<AgentDescriptor>> {
        self.agents.values()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Resolve an agent's tool references against the tool registry.
    ///
    /// Preserves the agent's declared order. References that fail to
    /// resolve are filtered out with a warning per miss; an unknown slug
    /// yields an empty set. This call never fails.
    pub fn resolve_tools(
        &self,
        slug: &AgentSlug,
        tools: &ToolRegistry,
    ) -> Vec<Arc<ToolDescriptor>> {
        let Some(agent) = self.agents.get(slug) else {
            tracing::warn!(agent = %slug, "resolving tools for unknown agent");
            return Vec::new();
        };

        agent
            .tool_refs()
            .iter()
            .filter_map(|key| {
                let resolved = tools.lookup(key);
                if resolved.is_none() {
                    tracing::warn!(agent = %slug, tool = %key, "agent references unregistered tool");
                }
                resolved
            })
            .collect()
    }

    /// The function-calling schemas currently exposed to the model.
    ///
    /// The universal agent-swap schema is always present, first. With no
    /// active agent (or an unresolvable slug) it is the only entry;
    /// otherwise the active agent's resolved tools follow in declared
    /// order. Unresolved references are silently dropped from the output;
    /// the warning in [`resolve_tools`](Self::resolve_tools) is a
    /// diagnostic side effect only.
    pub fn function_definitions(
        &self,
        slug: Option<&AgentSlug>,
        tools: &ToolRegistry,
    ) -> Vec<ToolSchema> {
        let mut definitions = vec![swap_schema()];
        if let Some(slug) = slug {
            definitions.extend(
                self.resolve_tools(slug, tools)
                    .iter()
                    .map(|descriptor| descriptor.schema().clone()),
            );
        }
        definitions
    }
}
