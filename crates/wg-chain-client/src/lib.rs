pub mod abi;
mod error;

pub use error::ChainError;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use std::time::Duration;
use wg_api_types::ConnectionState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    pub value: U256,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptStatus {
    pub block_number: u64,
    pub success: bool,
}

/// A contract write handed to the wallet for signing and broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub chain_id: u64,
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
    pub function: &'static str,
}

/// Read side of the chain: balances and receipt polling.
#[async_trait(?Send)]
pub trait ChainReader {
    async fn native_balance(&self, account: Address) -> Result<U256, ChainError>;
    async fn token_balance(&self, token: Address, account: Address) -> Result<TokenBalance, ChainError>;
    /// `None` until the transaction is included in a block.
    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<ReceiptStatus>, ChainError>;
}

/// Wallet side: connection state and signing.
#[async_trait(?Send)]
pub trait WalletConnector {
    fn connection(&self) -> ConnectionState;
    /// Whether a write can be handed to the wallet right now.
    fn is_ready(&self) -> bool;
    async fn connect(&self) -> Result<ConnectionState, ChainError>;
    async fn disconnect(&self) -> Result<ConnectionState, ChainError>;
    async fn switch_chain(&self, chain_id: u64) -> Result<(), ChainError>;
    /// Prompt for a signature and broadcast; resolves with the transaction hash.
    async fn write_contract(&self, call: ContractCall) -> Result<TxHash, ChainError>;
}

#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}
