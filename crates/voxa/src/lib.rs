//! # Voxa
//!
//! Core of a voice/text assistant whose conversational turns can invoke
//! external capabilities ("tools") curated into specialist "agents". The
//! crate keeps a queryable catalog of capabilities and the subset visible to
//! the model at any instant, dispatches model-issued calls safely against
//! that catalog with typed, tagged results, maintains an ordered replayable
//! transcript of conversation items, and meters usage cost per turn without
//! blocking the interactive path.
//!
//! ## Core components
//!
//! - [`ToolRegistry`] / [`AgentRegistry`]: catalogs built once at startup,
//!   read-only afterwards, injected wherever they are needed.
//! - [`Dispatcher`]: aggregates the model-facing function set for the
//!   active agent and routes calls with scope enforcement; every outcome is
//!   a tagged [`ToolResult`], never a propagated error.
//! - [`TranscriptQueue`]: FIFO conversation history, serializable for
//!   persistence across reloads.
//! - [`CreditMeter`]: per-session balance with non-blocking ledger
//!   persistence.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use voxa::{
//!     AgentDescriptor, AgentRegistry, AgentSlug, CreditMeter, Dispatcher, IconRef,
//!     SWAP_TOOL_NAME, ToolRegistry, TranscriptQueue,
//! };
//!
//! // Registries are plain objects, wired once at startup.
//! let tools = Arc::new(ToolRegistry::new());
//! let agents = Arc::new(AgentRegistry::new().with_agent(AgentDescriptor::new(
//!     AgentSlug::parse("token-analyst").unwrap(),
//!     "Token Analyst",
//!     "Token market data.",
//!     IconRef::new("icons/chart.svg"),
//! )));
//!
//! let dispatcher = Dispatcher::new(
//!     tools,
//!     agents,
//!     Arc::new(Mutex::new(CreditMeter::with_null_ledger(10.0))),
//!     TranscriptQueue::shared(),
//! );
//!
//! // With no active agent, only the universal swap capability is exposed.
//! let definitions = dispatcher.function_definitions();
//! assert_eq!(definitions.len(), 1);
//! assert_eq!(definitions[0].name, SWAP_TOOL_NAME);
//! ```

// ============================================================================
// Module aliases for namespaced access
// ============================================================================

pub use voxa_core as core;
pub use voxa_runtime as runtime;
pub use voxa_tools as tools;

#[cfg(feature = "testing")]
pub use voxa_testing as testing;

// ============================================================================
// Core types - identifiers, payloads, errors
// ============================================================================

pub use voxa_core::{
    AgentSlug, HandlerError, IdentifierError, LedgerError, RegistryError, ToolName, TurnId,
};

pub use voxa_core::{
    AgentSwapNotice, LendingMarketCard, LendingPool, NftCollectionCard, ResultPayload, ResultTag,
    TokenCard, TransactionReceipt,
};

// ============================================================================
// Tools and agents
// ============================================================================

pub use voxa_core::{
    AgentDescriptor, IconRef, RendererRef, ToolDescriptor, ToolHandler, ToolKey, ToolResult,
    ToolSchema,
};

// ============================================================================
// Transcript
// ============================================================================

pub use voxa_core::{
    ItemContent, Role, SharedTranscript, TranscriptItem, TranscriptQueue, TranscriptSnapshot,
    lock_shared,
};

// ============================================================================
// Credits
// ============================================================================

pub use voxa_core::{CreditLedger, CreditMeter, NullLedger, TurnUsage, UsageRates};

// ============================================================================
// Runtime - registries, dispatch, config
// ============================================================================

pub use voxa_runtime::{
    AgentRegistry, ConfigError, Dispatcher, RuntimeConfig, SWAP_TOOL_NAME, ToolInvocation,
    ToolRegistry, swap_schema, swap_tool_key,
};

// ============================================================================
// Built-in tools
// ============================================================================

pub use voxa_tools::{
    ChainDataSource, Collaborators, LendingMarketsTool, NftCollectionTool, SendTransactionTool,
    TokenDataTool, TransferGateway, TransferRequest, install,
};

#[cfg(feature = "network")]
pub use voxa_tools::HttpCreditLedger;
