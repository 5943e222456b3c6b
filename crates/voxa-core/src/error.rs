//! Error types for domain-specific failures.
//!
//! Nothing in this core throws past its public boundary: dispatch always
//! returns a tagged [`crate::tool::ToolResult`], lookups return `Option`,
//! and snapshot restoration degrades to a best-effort queue. The types here
//! cover the places where an explicit error is the contract: registration
//! conflicts, handler failures crossing the dispatch boundary, and ledger
//! persistence.

use crate::identifiers::AgentSlug;
use crate::tool::ToolKey;

/// Errors raised by registry registration.
///
/// Lookups never error; a miss is `None`. Registration conflicts are
/// explicit rather than silently overwriting the earlier descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(ToolKey),

    #[error("agent '{0}' is already registered")]
    DuplicateAgent(AgentSlug),
}

/// Categorized failure crossing the handler boundary.
///
/// This is the "throw" channel of a tool implementation. The dispatch engine
/// catches every variant and converts it into a generic error
/// [`crate::tool::ToolResult`] so a broken tool call never terminates the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    /// Network-level failure reaching an upstream collaborator.
    #[error("network failure: {0}")]
    Network(String),

    /// The upstream answered, but with something the handler could not parse.
    #[error("malformed upstream response: {0}")]
    Gateway(String),

    /// The model supplied arguments the handler could not use.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Unexpected internal state.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure persisting a credit debit to the external ledger.
///
/// Logged and dropped by the meter; the local balance stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger endpoint returned status {status}")]
    Endpoint { status: u16 },

    #[error("ledger transport failure: {0}")]
    Transport(String),
}
