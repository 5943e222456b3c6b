//! Agent descriptors.
//!
//! An agent is a named, curated subset of tools exposed to the model at one
//! time. The descriptor references tools by key, not by resolved descriptor:
//! agents can be declared before all of their tools are registered, and
//! resolution happens at dispatch time against the tool registry.

use serde::{Deserialize, Serialize};

use crate::identifiers::AgentSlug;
use crate::tool::ToolKey;

/// Opaque reference to the agent's icon asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Immutable descriptor of a registered agent.
///
/// `tool_refs` is ordered; the order is preserved when the agent's function
/// definitions are advertised to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    slug: AgentSlug,
    name: String,
    description: String,
    icon: IconRef,
    tool_refs: Vec<ToolKey>,
}

impl AgentDescriptor {
    pub fn new(
        slug: AgentSlug,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: IconRef,
    ) -> Self {
        Self {
            slug,
            name: name.into(),
            description: description.into(),
            icon,
            tool_refs: Vec::new(),
        }
    }

    /// Append a tool reference, builder-style. References are not checked
    /// against any registry here; late binding is deliberate.
    pub fn tool_ref(mut self, key: ToolKey) -> Self {
        self.tool_refs.push(key);
        self
    }

    pub fn slug(&self) -> &AgentSlug {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> &IconRef {
        &self.icon
    }

    /// The agent's tool references in declared order.
    pub fn tool_refs(&self) -> &[ToolKey] {
        &self.tool_refs
    }
}
