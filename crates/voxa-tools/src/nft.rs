//! NFT collection data tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use voxa_core::{
    HandlerError, ItemContent, RendererRef, ResultPayload, ResultTag, SharedTranscript,
    ToolDescriptor, ToolHandler, ToolKey, ToolName, ToolResult, ToolSchema, TurnId, lock_shared,
};

use crate::source::ChainDataSource;

pub const NFT_TOOL_NAME: &str = "getNftCollection";
pub const NFT_TOOL_COST: f64 = 0.00001;

pub fn nft_tool_key() -> ToolKey {
    ToolKey::new(
        ToolName::new_unchecked(NFT_TOOL_NAME),
        ResultTag::NftCollection,
    )
}

pub fn nft_schema() -> ToolSchema {
    ToolSchema::new(
        NFT_TOOL_NAME,
        "Look up an NFT collection: floor price, owner count and total supply.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "string",
                    "description": "Contract address of the collection."
                }
            },
            "required": ["address"]
        }),
    )
}

/// Fetches collection data from the chain data source.
pub struct NftCollectionTool {
    source: Arc<dyn ChainDataSource>,
    transcript: SharedTranscript,
}

impl NftCollectionTool {
    pub fn new(source: Arc<dyn ChainDataSource>, transcript: SharedTranscript) -> Self {
        Self { source, transcript }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::new(nft_tool_key(), nft_schema(), NFT_TOOL_COST, Arc::new(self))
            .with_renderer(RendererRef::new("NftCollectionCard"))
    }
}

#[async_trait]
impl ToolHandler for NftCollectionTool {
    async fn invoke(&self, args: Value, _turn: TurnId) -> Result<ToolResult, HandlerError> {
        let address = args
            .get("address")
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::InvalidArguments("missing 'address'".into()))?;

        lock_shared(&self.transcript).enqueue(ItemContent::LoaderMessage {
            label: "Fetching collection data…".into(),
        });

        let card = self.source.nft_collection(address).await?;
        let response = format!(
            "{} has a floor of {} {}.",
            card.name, card.floor_price, card.currency
        );
        Ok(ToolResult::success_with(
            response,
            ResultPayload::NftCollection(card),
        ))
    }
}
