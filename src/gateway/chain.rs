use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Address, TxHash, U256},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::Filter,
    sol_types::SolEvent,
};
use async_trait::async_trait;
use log::{debug, info};

use crate::{
    config::Config,
    contract::SimpleStorage::{self, NumberChanged, SimpleStorageInstance},
    error::{ClientError, GatewayError},
    events::RawNumberChanged,
};

use super::{ContractGateway, ReceiptStatus};

/// [`ContractGateway`] backed by a JSON-RPC node and a local signing wallet.
#[derive(Clone)]
pub struct ChainGateway {
    address: Address,
    provider: DynProvider,
}

impl ChainGateway {
    pub async fn connect(cfg: &Config) -> Result<Self, ClientError> {
        let provider = ProviderBuilder::new()
            .wallet(cfg.wallet_private_key.clone())
            .connect(cfg.rpc_url.as_str())
            .await
            .map_err(|e| ClientError::Provider(e.to_string()))?
            .erased();

        Ok(Self::new(cfg.contract_address, provider))
    }

    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self { address, provider }
    }

    pub fn contract_address(&self) -> Address {
        self.address
    }

    fn get_contract(&self) -> SimpleStorageInstance<DynProvider> {
        SimpleStorage::new(self.address, self.provider.clone())
    }
}

#[async_trait]
impl ContractGateway for ChainGateway {
    async fn read_number(&self) -> Result<U256, GatewayError> {
        let number = self.get_contract().getMyNumber().call().await?;
        Ok(number)
    }

    async fn write_number(&self, amount: U256) -> Result<TxHash, GatewayError> {
        let pending = self.get_contract().setMyNumber(amount).send().await?;
        let tx_hash = *pending.tx_hash();

        info!("setMyNumber({amount}) broadcast in tx {tx_hash:?}");
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<ReceiptStatus, GatewayError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .get_receipt()
            .await
            .map_err(|e| GatewayError::Receipt(e.to_string()))?;

        debug!(
            "tx {tx_hash:?} mined in block {:?} (status={})",
            receipt.block_number,
            receipt.status()
        );

        if receipt.status() {
            Ok(ReceiptStatus::success())
        } else {
            Ok(ReceiptStatus::failure(
                receipt
                    .block_number
                    .map(|block| format!("Transaction reverted in block {block}")),
            ))
        }
    }

    async fn query_events(&self, from_block: u64) -> Result<Vec<RawNumberChanged>, GatewayError> {
        let filter = Filter::new()
            .address(self.address)
            .event_signature(NumberChanged::SIGNATURE_HASH)
            .from_block(from_block)
            .to_block(BlockNumberOrTag::Latest);

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        debug!(
            "Fetched {} NumberChanged logs from block {from_block}",
            logs.len()
        );
        Ok(logs.iter().map(RawNumberChanged::from_log).collect())
    }
}
