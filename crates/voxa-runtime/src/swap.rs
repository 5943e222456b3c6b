//! The universal agent-swap capability.
//!
//! Swapping agents is the one capability exposed in every function set,
//! regardless of which agent is active. Its dispatch is handled by the
//! [`crate::Dispatcher`] itself because its effect, moving the
//! active-agent pointer, is dispatcher state rather than an external call.

use voxa_core::{ResultTag, ToolKey, ToolName, ToolSchema};

/// Model-facing name of the swap function.
pub const SWAP_TOOL_NAME: &str = "swapAgent";

/// Composite key of the swap capability.
pub fn swap_tool_key() -> ToolKey {
    ToolKey::new(ToolName::new_unchecked(SWAP_TOOL_NAME), ResultTag::AgentSwap)
}

/// Function-calling schema advertised for the swap capability.
pub fn swap_schema() -> ToolSchema {
    ToolSchema::new(
        SWAP_TOOL_NAME,
        "Switch the conversation to a different specialist agent. \
         Use this when the user asks for something outside the current agent's expertise.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "agent": {
                    "type": "string",
                    "description": "Slug of the agent to activate, e.g. 'token-analyst'."
                }
            },
            "required": ["agent"]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_key_round_trips_through_wire_strings() {
        let key = swap_tool_key();
        assert_eq!(
            ToolKey::parse(SWAP_TOOL_NAME, "agent_swap").unwrap(),
            key
        );
    }

    #[test]
    fn swap_schema_requires_the_agent_parameter() {
        let schema = swap_schema();
        assert_eq!(schema.name, SWAP_TOOL_NAME);
        assert_eq!(schema.parameters["required"][0], "agent");
    }
}
