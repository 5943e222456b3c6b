//! Scope-checked tool dispatch.
//!
//! The dispatcher routes a model-issued function call to the registered
//! implementation, enforcing that the call is within the active agent's
//! tool set. Nothing escapes its boundary: out-of-scope calls, handler
//! failures, and timeouts all come back as error-status [`ToolResult`]s for
//! the model's context, never as panics or propagated errors. A broken
//! single tool call must not terminate the session.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use serde_json::Value;

use voxa_core::{
    AgentSlug, AgentSwapNotice, CreditMeter, ItemContent, ResultPayload, SharedTranscript,
    ToolKey, ToolResult, ToolSchema, TurnId, lock_shared,
};

use crate::agent_registry::AgentRegistry;
use crate::swap::swap_tool_key;
use crate::tool_registry::ToolRegistry;

/// Model-facing text for any implementation failure. The real cause goes to
/// the diagnostic log, not to the model.
const GENERIC_FAILURE: &str = "The tool was unable to complete that request.";

const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// A model-issued function call, as raw strings off the transport.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub name: String,
    pub tag: String,
    pub args: Value,
    pub turn: TurnId,
}

impl ToolInvocation {
    pub fn new(
        name: impl Into<String>,
        tag: impl Into<String>,
        args: Value,
        turn: TurnId,
    ) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            args,
            turn,
        }
    }
}

/// Dispatch engine: aggregates the exposed function set and routes calls.
///
/// Registries are read-only after startup and injected by reference; the
/// meter and transcript are shared with the turn-completion path and the
/// tool handlers respectively. `invoke` takes `&self`, so any number of
/// calls may be in flight concurrently; transcript ordering reflects
/// completion order, not issuance order.
pub struct Dispatcher {
    tools: Arc<ToolRegistry>,
    agents: Arc<AgentRegistry>,
    meter: Arc<Mutex<CreditMeter>>,
    transcript: SharedTranscript,
    active: RwLock<Option<AgentSlug>>,
    tool_timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        tools: Arc<ToolRegistry>,
        agents: Arc<AgentRegistry>,
        meter: Arc<Mutex<CreditMeter>>,
        transcript: SharedTranscript,
    ) -> Self {
        Self {
            tools,
            agents,
            meter,
            transcript,
            active: RwLock::new(None),
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Override the per-call deadline for tool implementations.
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// The currently active agent, if any. `None` means only the universal
    /// swap capability is exposed.
    pub fn active_agent(&self) -> Option<AgentSlug> {
        read_lock(&self.active).clone()
    }

    /// The function set currently advertised to the model.
    pub fn function_definitions(&self) -> Vec<ToolSchema> {
        self.agents
            .function_definitions(self.active_agent().as_ref(), &self.tools)
    }

    pub fn transcript(&self) -> &SharedTranscript {
        &self.transcript
    }

    pub fn meter(&self) -> &Arc<Mutex<CreditMeter>> {
        &self.meter
    }

    /// Route one model-issued call. Infallible by design: every outcome is
    /// a [`ToolResult`].
    pub async fn invoke(&self, invocation: ToolInvocation) -> ToolResult {
        let Some(key) = ToolKey::parse(&invocation.name, &invocation.tag) else {
            tracing::warn!(
                tool = %invocation.name,
                tag = %invocation.tag,
                "rejected call with unparseable tool identity"
            );
            return out_of_scope(&invocation.name);
        };

        // The swap capability is universal and handled in-engine: its effect
        // is the active-agent pointer, which lives here.
        if key == swap_tool_key() {
            return self.swap_agent(&invocation.args);
        }

        let active = self.active_agent();
        let permitted = match &active {
            Some(slug) => self.agents.resolve_tools(slug, &self.tools),
            None => Vec::new(),
        };
        let Some(descriptor) = permitted.into_iter().find(|d| d.key() == &key) else {
            tracing::warn!(tool = %key, active = ?active, "rejected out-of-scope tool call");
            return out_of_scope(&invocation.name);
        };

        let call = descriptor.handler().invoke(invocation.args, invocation.turn);
        let result = match tokio::time::timeout(self.tool_timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                tracing::warn!(tool = %key, error = %err, "tool implementation failed");
                ToolResult::error(GENERIC_FAILURE)
            }
            Err(_) => {
                tracing::warn!(
                    tool = %key,
                    timeout_ms = self.tool_timeout.as_millis() as u64,
                    "tool call timed out"
                );
                ToolResult::error(GENERIC_FAILURE)
            }
        };

        if result.is_success() {
            lock(&self.meter).debit_tool(descriptor.cost());
            if let Some(payload) = result.payload() {
                lock_shared(&self.transcript).enqueue(ItemContent::from(payload.clone()));
            }
        }
        result
    }

    /// Handle the universal swap call.
    ///
    /// A swap to an unregistered slug is rejected and the previous agent is
    /// retained, so the active pointer is always a registered slug or none.
    fn swap_agent(&self, args: &Value) -> ToolResult {
        let Some(raw) = args.get("agent").and_then(Value::as_str) else {
            return ToolResult::error("No agent was specified to switch to.");
        };

        let resolved = AgentSlug::parse(raw)
            .ok()
            .and_then(|slug| self.agents.get(&slug));
        let Some(agent) = resolved else {
            tracing::warn!(agent = raw, "rejected swap to unknown agent");
            return ToolResult::error(format!("No agent named '{raw}' is available."));
        };

        *write_lock(&self.active) = Some(agent.slug().clone());
        tracing::debug!(agent = %agent.slug(), "active agent changed");

        let notice = AgentSwapNotice {
            slug: agent.slug().clone(),
            name: agent.name().to_string(),
        };
        lock_shared(&self.transcript).enqueue(ItemContent::AgentSwap(notice.clone()));
        ToolResult::success_with(
            format!("You are now talking to {}.", agent.name()),
            ResultPayload::AgentSwap(notice),
        )
    }
}

fn out_of_scope(name: &str) -> ToolResult {
    ToolResult::error(format!("{name} is not available to the current agent"))
}

// A poisoned lock still holds valid data; keep serving rather than bringing
// the session down with the panicked task.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
