#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use alloy::primitives::{Address, TxHash, U256, address};
use async_trait::async_trait;
use simple_storage_sdk::{ContractGateway, GatewayError, RawNumberChanged, ReceiptStatus};
use tokio::sync::Notify;

// second anvil/hardhat default account
pub const SENDER: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
pub const OTHER: Address = address!("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");

/// Blocks a gateway call until released by the test.
#[derive(Default)]
struct Gate {
    enabled: AtomicBool,
    notify: Notify,
}

impl Gate {
    async fn pass(&self) {
        if self.enabled.load(Ordering::SeqCst) {
            self.notify.notified().await;
        }
    }

    fn release(&self) {
        self.notify.notify_one();
    }
}

#[derive(Default)]
struct FakeChain {
    number: U256,
    events: Vec<RawNumberChanged>,
    pending: HashMap<TxHash, U256>,
    tx_count: u8,
}

/// In-memory SimpleStorage contract that mines every write from `SENDER`.
#[derive(Default)]
pub struct FakeGateway {
    chain: Mutex<FakeChain>,
    writes: AtomicUsize,
    reads: AtomicUsize,
    queries: AtomicUsize,
    last_from_block: Mutex<Option<u64>>,
    reject_with: Mutex<Option<String>>,
    receipt_error: Mutex<Option<String>>,
    next_read_delay: Mutex<Option<Duration>>,
    revert_next: AtomicBool,
    fail_reads: AtomicBool,
    fail_queries: AtomicBool,
    write_gate: Gate,
    receipt_gate: Gate,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_number(self, number: u64) -> Self {
        self.chain.lock().expect("chain poisoned").number = U256::from(number);
        self
    }

    pub fn with_events(self, events: Vec<RawNumberChanged>) -> Self {
        self.chain.lock().expect("chain poisoned").events = events;
        self
    }

    pub fn hold_writes(self) -> Self {
        self.write_gate.enabled.store(true, Ordering::SeqCst);
        self
    }

    pub fn hold_receipts(self) -> Self {
        self.receipt_gate.enabled.store(true, Ordering::SeqCst);
        self
    }

    pub fn release_write(&self) {
        self.write_gate.release();
    }

    pub fn release_receipt(&self) {
        self.receipt_gate.release();
    }

    pub fn reject_writes(&self, message: Option<&str>) {
        *self.reject_with.lock().expect("reject_with poisoned") = message.map(str::to_owned);
    }

    /// Makes every receipt wait fail with a transport error.
    pub fn fail_receipts(&self, message: Option<&str>) {
        *self.receipt_error.lock().expect("receipt_error poisoned") = message.map(str::to_owned);
    }

    /// The next read sees the current number but returns only after `delay`.
    pub fn delay_next_read(&self, delay: Duration) {
        *self.next_read_delay.lock().expect("next_read_delay poisoned") = Some(delay);
    }

    pub fn set_number(&self, number: u64) {
        self.chain.lock().expect("chain poisoned").number = U256::from(number);
    }

    pub fn revert_next(&self) {
        self.revert_next.store(true, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn last_from_block(&self) -> Option<u64> {
        *self.last_from_block.lock().expect("last_from_block poisoned")
    }

    pub fn number(&self) -> U256 {
        self.chain.lock().expect("chain poisoned").number
    }
}

#[async_trait]
impl ContractGateway for FakeGateway {
    async fn read_number(&self) -> Result<U256, GatewayError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport(
                "contract not deployed on this network".into(),
            ));
        }
        let number = self.number();
        let delay = self.next_read_delay.lock().expect("next_read_delay poisoned").take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(number)
    }

    async fn write_number(&self, amount: U256) -> Result<TxHash, GatewayError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.write_gate.pass().await;

        if let Some(message) = self.reject_with.lock().expect("reject_with poisoned").clone() {
            return Err(GatewayError::Transport(message));
        }

        let mut chain = self.chain.lock().expect("chain poisoned");
        chain.tx_count += 1;
        let tx_hash = TxHash::with_last_byte(chain.tx_count);
        chain.pending.insert(tx_hash, amount);
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<ReceiptStatus, GatewayError> {
        self.receipt_gate.pass().await;

        if let Some(message) = self.receipt_error.lock().expect("receipt_error poisoned").clone() {
            return Err(GatewayError::Transport(message));
        }

        let mut chain = self.chain.lock().expect("chain poisoned");
        let amount = chain
            .pending
            .remove(&tx_hash)
            .ok_or_else(|| GatewayError::Receipt(format!("unknown tx {tx_hash}")))?;

        if self.revert_next.swap(false, Ordering::SeqCst) {
            return Ok(ReceiptStatus::failure(None));
        }

        chain.number = amount;
        chain.events.push(RawNumberChanged::new(SENDER, amount));
        Ok(ReceiptStatus::success())
    }

    async fn query_events(&self, from_block: u64) -> Result<Vec<RawNumberChanged>, GatewayError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        *self.last_from_block.lock().expect("last_from_block poisoned") = Some(from_block);
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("eth_getLogs timed out".into()));
        }
        Ok(self.chain.lock().expect("chain poisoned").events.clone())
    }
}
