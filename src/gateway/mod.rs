use alloy::primitives::{TxHash, U256};
use async_trait::async_trait;

use crate::{error::GatewayError, events::RawNumberChanged};

pub mod chain;

pub use chain::ChainGateway;

/// Outcome of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptStatus {
    pub success: bool,
    pub error_message: Option<String>,
}

impl ReceiptStatus {
    pub fn success() -> Self {
        Self {
            success: true,
            error_message: None,
        }
    }

    pub fn failure(error_message: Option<String>) -> Self {
        Self {
            success: false,
            error_message,
        }
    }
}

/// Access to the deployed SimpleStorage contract.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Calls the `getMyNumber` view.
    async fn read_number(&self) -> Result<U256, GatewayError>;

    /// Signs and broadcasts `setMyNumber(amount)`, returning once the node
    /// has accepted the transaction.
    async fn write_number(&self, amount: U256) -> Result<TxHash, GatewayError>;

    /// Waits until `tx_hash` is mined.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<ReceiptStatus, GatewayError>;

    /// `NumberChanged` entries from `from_block` up to the latest block, in
    /// ascending block/log order.
    async fn query_events(&self, from_block: u64) -> Result<Vec<RawNumberChanged>, GatewayError>;
}
