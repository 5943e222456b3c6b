//! # Voxa Tools
//!
//! Built-in tool handlers and the built-in agent catalog: token market
//! data, NFT collections, DeFi lending rates, and on-chain transfers. The
//! blockchain itself stays behind the [`ChainDataSource`] and
//! [`TransferGateway`] seams; wallet/RPC mechanics are not this crate's
//! concern.
//!
//! With the `network` feature (default), the crate also provides the
//! HTTP credit-ledger sink used by the credit meter.

pub mod agents;
pub mod lending;
#[cfg(feature = "network")]
pub mod ledger;
pub mod nft;
pub mod source;
pub mod token;
pub mod transfer;

pub use agents::{Collaborators, install, lending_desk, nft_scout, token_analyst, transfer_desk};
pub use lending::{LENDING_TOOL_NAME, LendingMarketsTool, lending_schema, lending_tool_key};
#[cfg(feature = "network")]
pub use ledger::HttpCreditLedger;
pub use nft::{NFT_TOOL_NAME, NftCollectionTool, nft_schema, nft_tool_key};
pub use source::{ChainDataSource, TransferGateway, TransferRequest};
pub use token::{TOKEN_TOOL_NAME, TokenDataTool, token_schema, token_tool_key};
pub use transfer::{TRANSFER_TOOL_NAME, SendTransactionTool, transfer_schema, transfer_tool_key};
