//! Seams to the blockchain collaborators.
//!
//! Wallet/RPC mechanics are out of scope for this core; tools reach the
//! chain only through these traits. Production wires in clients backed by
//! indexer APIs, tests wire in mocks.

use async_trait::async_trait;

use voxa_core::{HandlerError, LendingPool, NftCollectionCard, TokenCard, TransactionReceipt};

/// Read-only market and collection data.
#[async_trait]
pub trait ChainDataSource: Send + Sync {
    /// Market overview for a fungible token by contract address.
    async fn token_overview(&self, address: &str) -> Result<TokenCard, HandlerError>;

    /// Floor and supply data for an NFT collection by contract address.
    async fn nft_collection(&self, address: &str) -> Result<NftCollectionCard, HandlerError>;

    /// Current lending pools across the markets the source tracks.
    async fn lending_markets(&self) -> Result<Vec<LendingPool>, HandlerError>;
}

/// Parameters of an on-chain transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub to: String,
    pub amount: f64,
    pub asset: String,
}

/// Write path to the chain: submits a transfer and reports the receipt.
///
/// Transaction construction and signing live behind this seam.
#[async_trait]
pub trait TransferGateway: Send + Sync {
    async fn send(&self, request: TransferRequest) -> Result<TransactionReceipt, HandlerError>;
}
