use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use url::Url;

use crate::{
    error::ConfigError,
    validators::{
        validate_address, validate_block_number, validate_url, validate_wallet_private_key,
    },
};

/// SimpleStorage deployment on Sepolia.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x503f96137a5C2C8C5bD0CfAC3509995A7a0d4a0d";
/// Public Sepolia endpoint, the network [`DEFAULT_CONTRACT_ADDRESS`] lives on.
pub const DEFAULT_RPC_URL: &str = "https://sepolia.drpc.org/";

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: Url,
    pub wallet_private_key: PrivateKeySigner,
    pub contract_address: Address,
    /// First block scanned for `NumberChanged` events.
    pub deployment_block: u64,
}

pub struct ConfigBuilder {
    rpc_url: Option<String>,
    wallet_private_key: Option<String>,
    contract_address: Option<String>,
    deployment_block: Option<String>,
}

impl ConfigBuilder {
    fn empty() -> Self {
        Self {
            rpc_url: None,
            wallet_private_key: None,
            contract_address: None,
            deployment_block: None,
        }
    }

    pub fn rpc_url(mut self, rpc_url: String) -> Self {
        self.rpc_url = Some(rpc_url);
        self
    }

    pub fn wallet_private_key(mut self, wallet_private_key: String) -> Self {
        self.wallet_private_key = Some(wallet_private_key);
        self
    }

    pub fn contract_address(mut self, contract_address: String) -> Self {
        self.contract_address = Some(contract_address);
        self
    }

    /// Scanning history from an earlier block is harmless but slower.
    pub fn deployment_block(mut self, deployment_block: String) -> Self {
        self.deployment_block = Some(deployment_block);
        self
    }

    pub fn from_env(mut self) -> Self {
        if let Ok(v) = std::env::var("SIMPLE_STORAGE_RPC_URL") {
            self = self.rpc_url(v);
        }
        if let Ok(v) = std::env::var("SIMPLE_STORAGE_WALLET_PRIVATE_KEY") {
            self = self.wallet_private_key(v);
        }
        if let Ok(v) = std::env::var("SIMPLE_STORAGE_CONTRACT_ADDRESS") {
            self = self.contract_address(v);
        }
        if let Ok(v) = std::env::var("SIMPLE_STORAGE_DEPLOYMENT_BLOCK") {
            self = self.deployment_block(v);
        }
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let rpc_url = Self::required(self.rpc_url, "rpc_url")?;
        let wallet_private_key = Self::required(self.wallet_private_key, "wallet_private_key")?;
        let contract_address = Self::required(self.contract_address, "contract_address")?;

        let rpc_url =
            validate_url(&rpc_url).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        let wallet_private_key = validate_wallet_private_key(&wallet_private_key)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        let contract_address = validate_address(&contract_address)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        let deployment_block =
            Self::optional(self.deployment_block, validate_block_number)?.unwrap_or_default();

        Ok(Config {
            rpc_url,
            wallet_private_key,
            contract_address,
            deployment_block,
        })
    }

    fn required(value: Option<String>, field: &str) -> Result<String, ConfigError> {
        value.ok_or_else(|| ConfigError::Missing(field.to_string()))
    }

    fn optional<T>(
        value: Option<String>,
        parser: impl FnOnce(&str) -> anyhow::Result<T>,
    ) -> Result<Option<T>, ConfigError> {
        match value {
            Some(raw) => parser(&raw)
                .map(Some)
                .map_err(|e| ConfigError::InvalidValue(e.to_string())),
            None => Ok(None),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::empty()
            .rpc_url(DEFAULT_RPC_URL.to_string())
            .contract_address(DEFAULT_CONTRACT_ADDRESS.to_string())
    }
}
