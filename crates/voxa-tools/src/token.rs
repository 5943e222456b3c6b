//! Token market data tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use voxa_core::{
    HandlerError, ItemContent, RendererRef, ResultPayload, ResultTag, SharedTranscript,
    ToolDescriptor, ToolHandler, ToolKey, ToolName, ToolResult, ToolSchema, TurnId, lock_shared,
};

use crate::source::ChainDataSource;

pub const TOKEN_TOOL_NAME: &str = "getTokenData";
pub const TOKEN_TOOL_COST: f64 = 0.00001;

pub fn token_tool_key() -> ToolKey {
    ToolKey::new(ToolName::new_unchecked(TOKEN_TOOL_NAME), ResultTag::TokenData)
}

pub fn token_schema() -> ToolSchema {
    ToolSchema::new(
        TOKEN_TOOL_NAME,
        "Look up market data for a fungible token: price, market cap, volume and 24h change.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "string",
                    "description": "Contract address of the token."
                }
            },
            "required": ["address"]
        }),
    )
}

/// Fetches a token overview from the chain data source.
///
/// Pushes a loader item before the upstream await so the UI has something to
/// show while the fetch is pending; the dispatcher appends the durable card
/// once the result lands.
pub struct TokenDataTool {
    source: Arc<dyn ChainDataSource>,
    transcript: SharedTranscript,
}

impl TokenDataTool {
    pub fn new(source: Arc<dyn ChainDataSource>, transcript: SharedTranscript) -> Self {
        Self { source, transcript }
    }

    /// The full descriptor for registry wiring.
    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::new(
            token_tool_key(),
            token_schema(),
            TOKEN_TOOL_COST,
            Arc::new(self),
        )
        .with_renderer(RendererRef::new("TokenDataCard"))
    }
}

#[async_trait]
impl ToolHandler for TokenDataTool {
    async fn invoke(&self, args: Value, _turn: TurnId) -> Result<ToolResult, HandlerError> {
        let address = args
            .get("address")
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::InvalidArguments("missing 'address'".into()))?;

        lock_shared(&self.transcript).enqueue(ItemContent::LoaderMessage {
            label: "Fetching token data…".into(),
        });

        let card = self.source.token_overview(address).await?;
        let response = format!(
            "{} ({}) is trading at ${:.4}.",
            card.name, card.symbol, card.price_usd
        );
        Ok(ToolResult::success_with(
            response,
            ResultPayload::TokenData(card),
        ))
    }
}
