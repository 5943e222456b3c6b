//! Tool descriptors, results, and the handler seam.
//!
//! A tool is a callable capability: a model-facing schema, a flat credit
//! cost, an async implementation, and a result tag that determines the shape
//! of its success payload. Tools are registered once at startup and
//! immutable thereafter.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HandlerError;
use crate::identifiers::{ToolName, TurnId};
use crate::payload::{ResultPayload, ResultTag};

/// Composite identity of a tool: `(name, result tag)`.
///
/// Two tools may share a name as long as their tags differ; the pair is what
/// must be unique within a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolKey {
    pub name: ToolName,
    pub tag: ResultTag,
}

impl ToolKey {
    pub fn new(name: ToolName, tag: ResultTag) -> Self {
        Self { name, tag }
    }

    /// Parse a key from the raw strings of a function-call event.
    ///
    /// Returns `None` for an unknown tag or an invalid name; the caller
    /// treats that as a lookup miss, never as a hard error.
    pub fn parse(name: &str, tag: &str) -> Option<Self> {
        let name = ToolName::parse(name).ok()?;
        let tag = ResultTag::parse(tag)?;
        Some(Self { name, tag })
    }
}

impl fmt::Display for ToolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.tag)
    }
}

/// Model-facing function-calling schema for one tool.
///
/// `parameters` is a JSON-schema-shaped value. No shape validation happens
/// at registration; supplying a well-formed schema is the registrant's
/// responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSchema {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Tagged outcome of a tool invocation.
///
/// `response` is a natural-language sentence consumed by the model as
/// conversational context, not by the UI. A success may additionally carry a
/// typed payload for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResult {
    Success {
        response: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        props: Option<ResultPayload>,
    },
    Error {
        response: String,
    },
}

impl ToolResult {
    /// A success with model-facing text only.
    pub fn success(response: impl Into<String>) -> Self {
        ToolResult::Success {
            response: response.into(),
            props: None,
        }
    }

    /// A success carrying a tagged payload for the rendering layer.
    pub fn success_with(response: impl Into<String>, payload: ResultPayload) -> Self {
        ToolResult::Success {
            response: response.into(),
            props: Some(payload),
        }
    }

    /// An error whose text is returned to the model's context only.
    pub fn error(response: impl Into<String>) -> Self {
        ToolResult::Error {
            response: response.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolResult::Error { .. })
    }

    /// The model-facing response text, whichever the outcome.
    pub fn response(&self) -> &str {
        match self {
            ToolResult::Success { response, .. } | ToolResult::Error { response } => response,
        }
    }

    /// The tagged payload, if this is a success that carries one.
    pub fn payload(&self) -> Option<&ResultPayload> {
        match self {
            ToolResult::Success { props, .. } => props.as_ref(),
            ToolResult::Error { .. } => None,
        }
    }
}

/// Async implementation seam of a tool.
///
/// A handler receives the model's arguments and the current turn id. It may
/// push an ephemeral loader item into the shared transcript before awaiting
/// I/O. Returning `Err` is the "throw" channel: the dispatch engine converts
/// it into a generic error [`ToolResult`] rather than letting it propagate.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn invoke(&self, args: Value, turn: TurnId) -> Result<ToolResult, HandlerError>;
}

/// Opaque reference to the UI component that renders a tool's payload.
///
/// The rendering layer resolves it by the tool's result tag; this core only
/// stores and returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RendererRef(String);

impl RendererRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Immutable descriptor of a registered tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    key: ToolKey,
    schema: ToolSchema,
    cost: f64,
    handler: Arc<dyn ToolHandler>,
    renderer: Option<RendererRef>,
}

impl ToolDescriptor {
    /// Build a descriptor.
    ///
    /// # Panics
    ///
    /// Panics on a negative cost. Descriptors are built in startup wiring,
    /// where a bad cost is a configuration bug that should fail loudly.
    pub fn new(key: ToolKey, schema: ToolSchema, cost: f64, handler: Arc<dyn ToolHandler>) -> Self {
        assert!(cost >= 0.0, "tool cost must be non-negative");
        Self {
            key,
            schema,
            cost,
            handler,
            renderer: None,
        }
    }

    /// Attach a renderer reference, builder-style.
    pub fn with_renderer(mut self, renderer: RendererRef) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn key(&self) -> &ToolKey {
        &self.key
    }

    pub fn name(&self) -> &ToolName {
        &self.key.name
    }

    pub fn tag(&self) -> ResultTag {
        self.key.tag
    }

    pub fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    /// Flat charge applied when this tool is successfully invoked.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }

    pub fn renderer(&self) -> Option<&RendererRef> {
        self.renderer.as_ref()
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("key", &self.key)
            .field("cost", &self.cost)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}
