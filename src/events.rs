use alloy::{
    primitives::{Address, U256},
    rpc::types::Log,
};
use log::warn;

use crate::contract::SimpleStorage::NumberChanged;

/// A `NumberChanged` entry as delivered by the gateway, before projection.
///
/// Either field may be missing when the log could not be fully decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawNumberChanged {
    pub by: Option<Address>,
    pub number: Option<U256>,
}

impl RawNumberChanged {
    pub fn new(by: Address, number: U256) -> Self {
        Self {
            by: Some(by),
            number: Some(number),
        }
    }

    /// Decodes a `NumberChanged` log, keeping whatever can be recovered when
    /// the data section is malformed.
    pub fn from_log(log: &Log) -> Self {
        match log.log_decode::<NumberChanged>() {
            Ok(decoded) => {
                let NumberChanged { by, number } = *decoded.data();
                Self::new(by, number)
            }
            Err(err) => {
                warn!(
                    "Malformed NumberChanged log in tx {:?}: {err}",
                    log.transaction_hash
                );
                // topic 0 is the signature, topic 1 the indexed `by`
                let by = log.topics().get(1).map(|topic| Address::from_word(*topic));
                Self { by, number: None }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    actor: String,
    value: String,
}

impl EventRecord {
    pub fn new(actor: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            value: value.into(),
        }
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// `0x1234...abcd` form of the actor address.
    pub fn short_actor(&self) -> String {
        let len = self.actor.len();
        match (self.actor.get(..6), self.actor.get(len.saturating_sub(4)..)) {
            (Some(head), Some(tail)) if len > 10 => format!("{head}...{tail}"),
            _ => self.actor.clone(),
        }
    }
}

impl From<RawNumberChanged> for EventRecord {
    fn from(raw: RawNumberChanged) -> Self {
        Self {
            actor: raw.by.unwrap_or_default().to_string(),
            value: raw.number.map_or_else(|| "0".to_string(), |n| n.to_string()),
        }
    }
}

/// `NumberChanged` history in ascending block order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Canonical (oldest first) order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Most recent first. Does not touch the canonical order.
    pub fn display_order(&self) -> impl ExactSizeIterator<Item = &EventRecord> + '_ {
        self.records.iter().rev()
    }

    pub fn latest(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<EventRecord> for EventLog {
    fn from_iter<I: IntoIterator<Item = EventRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Builds the event log from gateway entries, trusting their order.
///
/// A missing value becomes `"0"`; no entry is ever dropped.
pub fn project<I>(raw_events: I) -> EventLog
where
    I: IntoIterator<Item = RawNumberChanged>,
{
    raw_events.into_iter().map(EventRecord::from).collect()
}
