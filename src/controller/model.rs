use alloy::primitives::{TxHash, U256};

use crate::{
    error::{InputError, ReadError},
    events::EventLog,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TxStatus {
    #[default]
    Idle,
    /// `setMyNumber` handed to the wallet, no hash yet.
    Submitted,
    /// Accepted by the node, waiting to be mined.
    Confirming,
    Confirmed,
    Failed(String),
}

impl TxStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Submitted | Self::Confirming)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub handle: Option<TxHash>,
    pub status: TxStatus,
}

impl Transaction {
    pub(crate) fn submitted() -> Self {
        Self {
            handle: None,
            status: TxStatus::Submitted,
        }
    }
}

/// Everything a view needs to render the page.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Last successfully read `getMyNumber` value.
    pub stored_number: Option<U256>,
    pub transaction: Transaction,
    pub events: EventLog,
    pub input: String,
    pub validation_error: Option<InputError>,
    /// Set while the last refresh failed; cleared by the next successful one.
    pub read_error: Option<ReadError>,
}
