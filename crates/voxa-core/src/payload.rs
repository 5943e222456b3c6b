//! Tagged tool-result payloads.
//!
//! Every tool declares a result tag, and a successful invocation may carry a
//! payload whose shape is determined solely by that tag. The union is closed:
//! adding a tag means adding a [`ResultTag`] variant, a card type, and a
//! [`ResultPayload`] variant, and the compiler points at every match that
//! needs updating.

use serde::{Deserialize, Serialize};

use crate::identifiers::AgentSlug;

/// Discriminant identifying the shape of a tool's success payload.
///
/// The wire strings are the `type` tags the rendering layer switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTag {
    TokenData,
    NftCollection,
    LendingMarket,
    TransactionMessage,
    AgentSwap,
}

impl ResultTag {
    /// The wire string for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultTag::TokenData => "token_data",
            ResultTag::NftCollection => "nft_collection",
            ResultTag::LendingMarket => "lending_market",
            ResultTag::TransactionMessage => "transaction_message",
            ResultTag::AgentSwap => "agent_swap",
        }
    }

    /// Try to parse a wire string into a tag.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "token_data" => Some(ResultTag::TokenData),
            "nft_collection" => Some(ResultTag::NftCollection),
            "lending_market" => Some(ResultTag::LendingMarket),
            "transaction_message" => Some(ResultTag::TransactionMessage),
            "agent_swap" => Some(ResultTag::AgentSwap),
            _ => None,
        }
    }

    /// All known tags.
    pub fn all() -> &'static [ResultTag] {
        &[
            ResultTag::TokenData,
            ResultTag::NftCollection,
            ResultTag::LendingMarket,
            ResultTag::TransactionMessage,
            ResultTag::AgentSwap,
        ]
    }
}

impl std::fmt::Display for ResultTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Market overview for a fungible token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCard {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub price_usd: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_24h_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_24h_pct: Option<f64>,
}

/// Floor and supply data for an NFT collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftCollectionCard {
    pub address: String,
    pub name: String,
    pub floor_price: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owners: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<u64>,
}

/// A single lending pool within a market overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingPool {
    pub asset: String,
    pub supply_apy: f64,
    pub borrow_apy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_supplied_usd: Option<f64>,
}

/// Current rates across the lending markets a tool surfaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingMarketCard {
    pub markets: Vec<LendingPool>,
}

/// Outcome of a submitted on-chain transfer.
///
/// `status` is whatever the gateway reported (`submitted`, `confirmed`, ...);
/// this core does not interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub asset: String,
    pub status: String,
}

/// Confirmation that the active agent changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSwapNotice {
    pub slug: AgentSlug,
    pub name: String,
}

/// The closed union of success payloads, discriminated by result tag.
///
/// Serializes with a `type` field carrying the tag's wire string, so a
/// payload travels as e.g. `{"type": "token_data", "address": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultPayload {
    TokenData(TokenCard),
    NftCollection(NftCollectionCard),
    LendingMarket(LendingMarketCard),
    TransactionMessage(TransactionReceipt),
    AgentSwap(AgentSwapNotice),
}

impl ResultPayload {
    /// The tag discriminating this payload.
    pub fn tag(&self) -> ResultTag {
        match self {
            ResultPayload::TokenData(_) => ResultTag::TokenData,
            ResultPayload::NftCollection(_) => ResultTag::NftCollection,
            ResultPayload::LendingMarket(_) => ResultTag::LendingMarket,
            ResultPayload::TransactionMessage(_) => ResultTag::TransactionMessage,
            ResultPayload::AgentSwap(_) => ResultTag::AgentSwap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_wire_strings_round_trip() {
        for tag in ResultTag::all() {
            assert_eq!(ResultTag::parse(tag.as_str()), Some(*tag));
        }
        assert_eq!(ResultTag::parse("no_such_tag"), None);
    }

    #[test]
    fn payload_serializes_with_type_tag() {
        let payload = ResultPayload::TokenData(TokenCard {
            address: "0xabc".into(),
            symbol: "VOX".into(),
            name: "Voxa".into(),
            price_usd: 1.25,
            market_cap_usd: None,
            volume_24h_usd: None,
            change_24h_pct: Some(-3.2),
        });

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "token_data");
        assert_eq!(value["symbol"], "VOX");
        // Absent optionals are omitted, not null.
        assert!(value.get("market_cap_usd").is_none());

        let back: ResultPayload = serde_json::from_value(value).unwrap();
        assert_eq!(back, payload);
        assert_eq!(back.tag(), ResultTag::TokenData);
    }

    #[test]
    fn payload_tag_matches_serialized_type_for_every_variant() {
        let samples = [
            ResultPayload::LendingMarket(LendingMarketCard { markets: vec![] }),
            ResultPayload::AgentSwap(AgentSwapNotice {
                slug: AgentSlug::new_unchecked("token-analyst"),
                name: "Token Analyst".into(),
            }),
            ResultPayload::TransactionMessage(TransactionReceipt {
                hash: "0xdead".into(),
                from: "0x1".into(),
                to: "0x2".into(),
                amount: 0.5,
                asset: "ETH".into(),
                status: "submitted".into(),
            }),
        ];
        for payload in samples {
            let value = serde_json::to_value(&payload).unwrap();
            assert_eq!(value["type"], payload.tag().as_str());
        }
    }
}
