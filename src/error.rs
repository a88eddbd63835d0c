use alloy::contract as alloy_contract;
use alloy::primitives::Bytes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config value: {0}")]
    InvalidValue(String),
    #[error("missing config: {0}")]
    Missing(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("client provider error: {0}")]
    Provider(String),
}

/// Reasons a piece of user input cannot be sent as a `uint256` argument.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a number")]
    Empty,
    #[error("Please enter a valid number")]
    NotANumber,
    #[error("Please enter a positive number (negative numbers are not allowed)")]
    Negative,
    #[error("Please enter a whole number (no decimals allowed)")]
    NotInteger,
    #[error("Please enter a number that fits in 256 bits")]
    Overflow,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] InputError),
    #[error("a transaction is already in flight")]
    InFlight,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("unknown revert (selector {selector:#x})")]
    UnknownRevert { selector: u32, data: Vec<u8> },
    #[error("provider/transport error: {0}")]
    Transport(String),
    #[error("receipt error: {0}")]
    Receipt(String),
}

/// Failure to load contract state. Shown until a later refresh succeeds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("Unable to read the stored number: {0}")]
    Number(GatewayError),
    #[error("Unable to load NumberChanged events: {0}")]
    Events(GatewayError),
}

impl GatewayError {
    /// Short, user-facing message without the error-kind prefix.
    pub fn message(&self) -> String {
        match self {
            Self::UnknownRevert { selector, .. } => {
                format!("execution reverted (selector {selector:#x})")
            }
            Self::Transport(msg) | Self::Receipt(msg) => msg.trim().to_string(),
        }
    }
}

fn extract_selector_and_data(e: &alloy_contract::Error) -> Option<(u32, Vec<u8>)> {
    e.as_revert_data().map(|bytes: Bytes| {
        let data = bytes.to_vec();
        let selector = if data.len() >= 4 {
            u32::from_be_bytes([data[0], data[1], data[2], data[3]])
        } else {
            0
        };
        (selector, data)
    })
}

macro_rules! impl_from_alloy_error {
    ($target:ty) => {
        impl From<alloy_contract::Error> for $target {
            fn from(e: alloy_contract::Error) -> Self {
                match extract_selector_and_data(&e) {
                    Some((selector, data)) => Self::UnknownRevert { selector, data },
                    None => Self::Transport(e.to_string()),
                }
            }
        }
    };
}

impl_from_alloy_error!(GatewayError);
