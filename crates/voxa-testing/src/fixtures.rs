//! Fixtures assembling a dispatcher around mock handlers.

use std::sync::{Arc, Mutex};

use voxa_core::{
    AgentDescriptor, AgentSlug, CreditMeter, IconRef, ResultTag, ToolDescriptor, ToolHandler,
    ToolKey, ToolName, ToolSchema, TranscriptQueue, UsageRates,
};
use voxa_runtime::{AgentRegistry, Dispatcher, ToolRegistry};

use crate::ledger::RecordingLedger;

/// A tool descriptor with a minimal schema, for tests that don't care about
/// parameter specs.
pub fn test_tool(
    name: &str,
    tag: ResultTag,
    cost: f64,
    handler: Arc<dyn ToolHandler>,
) -> ToolDescriptor {
    ToolDescriptor::new(
        ToolKey::new(ToolName::new_unchecked(name), tag),
        ToolSchema::new(name, format!("Test tool {name}."), serde_json::json!({})),
        cost,
        handler,
    )
}

/// An agent descriptor referencing the given tool keys, in order.
pub fn test_agent(slug: &str, tool_refs: impl IntoIterator<Item = ToolKey>) -> AgentDescriptor {
    let mut agent = AgentDescriptor::new(
        AgentSlug::new_unchecked(slug),
        slug.to_string(),
        format!("Test agent {slug}."),
        IconRef::new("icons/test.svg"),
    );
    for key in tool_refs {
        agent = agent.tool_ref(key);
    }
    agent
}

/// A dispatcher over the given tools and agents, with a recording ledger.
///
/// Returns the dispatcher plus a handle to the ledger for asserting on
/// persisted debits.
pub fn test_dispatcher(
    tools: ToolRegistry,
    agents: AgentRegistry,
    balance: f64,
) -> (Dispatcher, RecordingLedger) {
    let ledger = RecordingLedger::new();
    let meter = CreditMeter::new(balance, UsageRates::default(), Arc::new(ledger.clone()));
    let dispatcher = Dispatcher::new(
        Arc::new(tools),
        Arc::new(agents),
        Arc::new(Mutex::new(meter)),
        TranscriptQueue::shared(),
    );
    (dispatcher, ledger)
}
