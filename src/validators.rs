use std::str::FromStr;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use url::Url;

pub fn validate_url(url: &str) -> anyhow::Result<Url> {
    Url::parse(url).map_err(|e| anyhow::anyhow!("invalid URL: {}", e))
}

pub fn validate_address(address: &str) -> anyhow::Result<Address> {
    Address::from_str(address).map_err(|e| anyhow::anyhow!("invalid address: {}", e))
}

pub fn validate_wallet_private_key(key: &str) -> anyhow::Result<PrivateKeySigner> {
    PrivateKeySigner::from_str(key).map_err(|e| anyhow::anyhow!("invalid private key: {}", e))
}

pub fn validate_block_number(block: &str) -> anyhow::Result<u64> {
    block
        .trim()
        .parse::<u64>()
        .map_err(|e| anyhow::anyhow!("invalid block number: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_number_accepts_padded_decimal() {
        assert_eq!(validate_block_number(" 7423 ").unwrap(), 7423);
    }

    #[test]
    fn block_number_rejects_negative() {
        let err = validate_block_number("-1").unwrap_err();
        assert!(err.to_string().contains("invalid block number"));
    }

    #[test]
    fn address_is_parsed_case_insensitively() {
        let lower = validate_address("0x503f96137a5c2c8c5bd0cfac3509995a7a0d4a0d").unwrap();
        let mixed = validate_address("0x503f96137a5C2C8C5bD0CfAC3509995A7a0d4a0d").unwrap();
        assert_eq!(lower, mixed);
    }
}
