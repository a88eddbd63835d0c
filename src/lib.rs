pub mod client;
pub mod config;
mod contract;
pub mod controller;
pub mod error;
pub mod events;
pub mod gateway;
pub mod input;
mod validators;

pub use alloy::primitives::{Address, TxHash, U256};

pub use client::Client;
pub use config::{Config, ConfigBuilder};
pub use controller::Controller;
pub use controller::model::{Snapshot, Transaction, TxStatus};
pub use error::{GatewayError, InputError, ReadError, SubmitError};
pub use events::{EventLog, EventRecord, RawNumberChanged, project};
pub use gateway::{ChainGateway, ContractGateway, ReceiptStatus};
pub use input::{ValidationResult, validate};
