//! # Voxa Core
//!
//! Core types for the Voxa assistant runtime: tool descriptors and tagged
//! results, agent descriptors, the ordered conversation transcript, and the
//! session credit meter. The runtime crate builds the registries and the
//! dispatch engine on top of these.

pub mod agent;
pub mod credits;
pub mod error;
pub mod identifiers;
pub mod payload;
pub mod tool;
pub mod transcript;

pub use agent::{AgentDescriptor, IconRef};
pub use credits::{CreditLedger, CreditMeter, NullLedger, TurnUsage, UsageRates};
pub use error::{HandlerError, LedgerError, RegistryError};
pub use identifiers::{AgentSlug, IdentifierError, ToolName, TurnId};
pub use payload::{
    AgentSwapNotice, LendingMarketCard, LendingPool, NftCollectionCard, ResultPayload, ResultTag,
    TokenCard, TransactionReceipt,
};
pub use tool::{RendererRef, ToolDescriptor, ToolHandler, ToolKey, ToolResult, ToolSchema};
pub use transcript::{
    ItemContent, Role, SharedTranscript, TranscriptItem, TranscriptQueue, TranscriptSnapshot,
    lock_shared,
};
