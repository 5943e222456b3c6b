//! DeFi lending markets tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use voxa_core::{
    HandlerError, ItemContent, LendingMarketCard, RendererRef, ResultPayload, ResultTag,
    SharedTranscript, ToolDescriptor, ToolHandler, ToolKey, ToolName, ToolResult, ToolSchema,
    TurnId, lock_shared,
};

use crate::source::ChainDataSource;

pub const LENDING_TOOL_NAME: &str = "getLendingMarkets";
pub const LENDING_TOOL_COST: f64 = 0.00001;

pub fn lending_tool_key() -> ToolKey {
    ToolKey::new(
        ToolName::new_unchecked(LENDING_TOOL_NAME),
        ResultTag::LendingMarket,
    )
}

pub fn lending_schema() -> ToolSchema {
    ToolSchema::new(
        LENDING_TOOL_NAME,
        "List current supply and borrow rates across lending markets. \
         Optionally filter to a single asset symbol.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "asset": {
                    "type": "string",
                    "description": "Asset symbol to filter by, e.g. 'USDC'. Omit for all markets."
                }
            }
        }),
    )
}

/// Surfaces lending pool rates from the chain data source.
pub struct LendingMarketsTool {
    source: Arc<dyn ChainDataSource>,
    transcript: SharedTranscript,
}

impl LendingMarketsTool {
    pub fn new(source: Arc<dyn ChainDataSource>, transcript: SharedTranscript) -> Self {
        Self { source, transcript }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::new(
            lending_tool_key(),
            lending_schema(),
            LENDING_TOOL_COST,
            Arc::new(self),
        )
        .with_renderer(RendererRef::new("LendingMarketCard"))
    }
}

#[async_trait]
impl ToolHandler for LendingMarketsTool {
    async fn invoke(&self, args: Value, _turn: TurnId) -> Result<ToolResult, HandlerError> {
        let filter = args
            .get("asset")
            .and_then(Value::as_str)
            .map(str::to_uppercase);

        lock_shared(&self.transcript).enqueue(ItemContent::LoaderMessage {
            label: "Fetching lending rates…".into(),
        });

        let mut markets = self.source.lending_markets().await?;
        if let Some(filter) = &filter {
            markets.retain(|pool| pool.asset.eq_ignore_ascii_case(filter));
        }

        let response = match (markets.len(), &filter) {
            (0, Some(asset)) => format!("No lending market found for {asset}."),
            (0, None) => "No lending markets are available right now.".to_string(),
            (n, _) => format!("Found {n} lending market(s); the card has the rates."),
        };
        Ok(ToolResult::success_with(
            response,
            ResultPayload::LendingMarket(LendingMarketCard { markets }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxa_core::{LendingPool, NftCollectionCard, TokenCard, TranscriptQueue};

    struct FixedSource;

    #[async_trait]
    impl ChainDataSource for FixedSource {
        async fn token_overview(&self, _address: &str) -> Result<TokenCard, HandlerError> {
            Err(HandlerError::Internal("not under test".into()))
        }

        async fn nft_collection(&self, _address: &str) -> Result<NftCollectionCard, HandlerError> {
            Err(HandlerError::Internal("not under test".into()))
        }

        async fn lending_markets(&self) -> Result<Vec<LendingPool>, HandlerError> {
            Ok(vec![
                LendingPool {
                    asset: "USDC".into(),
                    supply_apy: 4.1,
                    borrow_apy: 6.3,
                    total_supplied_usd: Some(12_000_000.0),
                },
                LendingPool {
                    asset: "ETH".into(),
                    supply_apy: 2.2,
                    borrow_apy: 3.9,
                    total_supplied_usd: None,
                },
            ])
        }
    }

    #[tokio::test]
    async fn filters_markets_by_asset() {
        let tool = LendingMarketsTool::new(Arc::new(FixedSource), TranscriptQueue::shared());
        let result = tool
            .invoke(serde_json::json!({ "asset": "usdc" }), TurnId::random())
            .await
            .unwrap();

        match result.payload().unwrap() {
            ResultPayload::LendingMarket(card) => {
                assert_eq!(card.markets.len(), 1);
                assert_eq!(card.markets[0].asset, "USDC");
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_filter_returns_all_markets() {
        let tool = LendingMarketsTool::new(Arc::new(FixedSource), TranscriptQueue::shared());
        let result = tool
            .invoke(serde_json::json!({}), TurnId::random())
            .await
            .unwrap();

        match result.payload().unwrap() {
            ResultPayload::LendingMarket(card) => assert_eq!(card.markets.len(), 2),
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
