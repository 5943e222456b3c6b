//! On-chain transfer tool.
//!
//! Transaction construction and signing happen behind the
//! [`TransferGateway`] seam; this tool validates the model's arguments,
//! shows a loader while the gateway works, and surfaces the receipt.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use voxa_core::{
    HandlerError, ItemContent, RendererRef, ResultPayload, ResultTag, SharedTranscript,
    ToolDescriptor, ToolHandler, ToolKey, ToolName, ToolResult, ToolSchema, TurnId, lock_shared,
};

use crate::source::{TransferGateway, TransferRequest};

pub const TRANSFER_TOOL_NAME: &str = "sendTransaction";
pub const TRANSFER_TOOL_COST: f64 = 0.0001;

pub fn transfer_tool_key() -> ToolKey {
    ToolKey::new(
        ToolName::new_unchecked(TRANSFER_TOOL_NAME),
        ResultTag::TransactionMessage,
    )
}

pub fn transfer_schema() -> ToolSchema {
    ToolSchema::new(
        TRANSFER_TOOL_NAME,
        "Send an on-chain transfer from the user's wallet. \
         Always confirm the recipient and amount with the user first.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "to": {
                    "type": "string",
                    "description": "Recipient address."
                },
                "amount": {
                    "type": "number",
                    "description": "Amount to send, in whole units of the asset."
                },
                "asset": {
                    "type": "string",
                    "description": "Asset symbol, e.g. 'ETH' or 'USDC'."
                }
            },
            "required": ["to", "amount", "asset"]
        }),
    )
}

/// Submits a transfer through the gateway and reports the receipt.
pub struct SendTransactionTool {
    gateway: Arc<dyn TransferGateway>,
    transcript: SharedTranscript,
}

impl SendTransactionTool {
    pub fn new(gateway: Arc<dyn TransferGateway>, transcript: SharedTranscript) -> Self {
        Self {
            gateway,
            transcript,
        }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::new(
            transfer_tool_key(),
            transfer_schema(),
            TRANSFER_TOOL_COST,
            Arc::new(self),
        )
        .with_renderer(RendererRef::new("TransactionCard"))
    }
}

#[async_trait]
impl ToolHandler for SendTransactionTool {
    async fn invoke(&self, args: Value, _turn: TurnId) -> Result<ToolResult, HandlerError> {
        let to = args
            .get("to")
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::InvalidArguments("missing 'to'".into()))?;
        let amount = args
            .get("amount")
            .and_then(Value::as_f64)
            .ok_or_else(|| HandlerError::InvalidArguments("missing 'amount'".into()))?;
        let asset = args
            .get("asset")
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::InvalidArguments("missing 'asset'".into()))?;
        if amount <= 0.0 {
            return Err(HandlerError::InvalidArguments(
                "'amount' must be positive".into(),
            ));
        }

        lock_shared(&self.transcript).enqueue(ItemContent::LoaderMessage {
            label: "Submitting transaction…".into(),
        });

        let receipt = self
            .gateway
            .send(TransferRequest {
                to: to.to_string(),
                amount,
                asset: asset.to_string(),
            })
            .await?;

        let response = format!(
            "Sent {} {} to {}; the transaction is {}.",
            receipt.amount, receipt.asset, receipt.to, receipt.status
        );
        Ok(ToolResult::success_with(
            response,
            ResultPayload::TransactionMessage(receipt),
        ))
    }
}
