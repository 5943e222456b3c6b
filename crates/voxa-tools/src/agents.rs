//! Built-in agent catalog and startup wiring.
//!
//! Each agent is a curated slice of the built-in tools. Descriptors
//! reference tools by key only; resolution happens at dispatch time, so the
//! declaration order here is what the model sees.

use std::sync::Arc;

use voxa_core::{AgentDescriptor, AgentSlug, IconRef, SharedTranscript};
use voxa_runtime::{AgentRegistry, ToolRegistry};

use crate::lending::{LendingMarketsTool, lending_tool_key};
use crate::nft::{NftCollectionTool, nft_tool_key};
use crate::source::{ChainDataSource, TransferGateway};
use crate::token::{TokenDataTool, token_tool_key};
use crate::transfer::{SendTransactionTool, transfer_tool_key};

pub fn token_analyst() -> AgentDescriptor {
    AgentDescriptor::new(
        AgentSlug::new_unchecked("token-analyst"),
        "Token Analyst",
        "Price, volume and market data for fungible tokens.",
        IconRef::new("icons/token-analyst.svg"),
    )
    .tool_ref(token_tool_key())
    .tool_ref(lending_tool_key())
}

pub fn nft_scout() -> AgentDescriptor {
    AgentDescriptor::new(
        AgentSlug::new_unchecked("nft-scout"),
        "NFT Scout",
        "Floor prices, supply and ownership data for NFT collections.",
        IconRef::new("icons/nft-scout.svg"),
    )
    .tool_ref(nft_tool_key())
}

pub fn lending_desk() -> AgentDescriptor {
    AgentDescriptor::new(
        AgentSlug::new_unchecked("lending-desk"),
        "Lending Desk",
        "Supply and borrow rates across DeFi lending markets.",
        IconRef::new("icons/lending-desk.svg"),
    )
    .tool_ref(lending_tool_key())
}

pub fn transfer_desk() -> AgentDescriptor {
    AgentDescriptor::new(
        AgentSlug::new_unchecked("transfer-desk"),
        "Transfer Desk",
        "Sends on-chain transfers from the user's wallet.",
        IconRef::new("icons/transfer-desk.svg"),
    )
    .tool_ref(transfer_tool_key())
}

/// External collaborators the built-in tools need.
#[derive(Clone)]
pub struct Collaborators {
    pub chain: Arc<dyn ChainDataSource>,
    pub gateway: Arc<dyn TransferGateway>,
    pub transcript: SharedTranscript,
}

/// Build registries populated with every built-in tool and agent.
///
/// Called once at process startup, before any dispatch is expected. Panics
/// on duplicate registration, which here can only be a wiring bug.
pub fn install(collaborators: Collaborators) -> (ToolRegistry, AgentRegistry) {
    let Collaborators {
        chain,
        gateway,
        transcript,
    } = collaborators;

    let tools = ToolRegistry::new()
        .with_tool(TokenDataTool::new(Arc::clone(&chain), Arc::clone(&transcript)).descriptor())
        .with_tool(NftCollectionTool::new(Arc::clone(&chain), Arc::clone(&transcript)).descriptor())
        .with_tool(LendingMarketsTool::new(chain, Arc::clone(&transcript)).descriptor())
        .with_tool(SendTransactionTool::new(gateway, transcript).descriptor());

    let agents = AgentRegistry::new()
        .with_agent(token_analyst())
        .with_agent(nft_scout())
        .with_agent(lending_desk())
        .with_agent(transfer_desk());

    (tools, agents)
}
