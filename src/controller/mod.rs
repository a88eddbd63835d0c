use std::sync::atomic::{AtomicU64, Ordering};

use alloy::primitives::{TxHash, U256};
use log::{debug, error, info, warn};
use tokio::sync::watch;

use crate::{
    error::{ReadError, SubmitError},
    events::project,
    gateway::ContractGateway,
    input::validate,
};

pub mod model;

use self::model::{Snapshot, Transaction, TxStatus};

/// Shown when the wallet or node rejects a write without saying why.
pub const GENERIC_SUBMIT_FAILURE: &str = "Transaction failed";
/// Shown when a mined transaction failed without a reason.
pub const GENERIC_REVERT_FAILURE: &str = "Transaction reverted";
/// Shown when the receipt could not be fetched and no reason was given.
pub const GENERIC_CONFIRM_FAILURE: &str = "Transaction confirmation failed";

/// Drives one `setMyNumber` transaction at a time and keeps the stored
/// number and event history in sync with the chain.
///
/// State lives in a [`watch`] channel: every transition is published to
/// [`Controller::subscribe`] receivers, and [`Controller::snapshot`] returns
/// the latest value.
pub struct Controller<G> {
    gateway: G,
    from_block: u64,
    state: watch::Sender<Snapshot>,
    refreshes_started: AtomicU64,
    /// Only written while the watch lock is held.
    refresh_applied: AtomicU64,
}

impl<G: ContractGateway> Controller<G> {
    /// `from_block` is where the event history starts, normally the contract's
    /// deployment block.
    pub fn new(gateway: G, from_block: u64) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self {
            gateway,
            from_block,
            state,
            refreshes_started: AtomicU64::new(0),
            refresh_applied: AtomicU64::new(0),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> TxStatus {
        self.state.borrow().transaction.status.clone()
    }

    /// Loads the stored number and event history for the first time.
    pub async fn on_init(&self) {
        info!("Loading SimpleStorage state from block {}", self.from_block);
        self.refresh().await;
    }

    pub fn set_input(&self, text: &str) {
        self.state.send_modify(|state| state.input = text.to_owned());
    }

    /// Validates `text` and, when it is a valid amount, runs the full
    /// `setMyNumber` lifecycle through to a terminal status.
    ///
    /// Returns [`SubmitError::InFlight`] without touching any state while a
    /// previous transaction is still `Submitted` or `Confirming`. Gateway
    /// failures are not errors here; they end in [`TxStatus::Failed`].
    pub async fn submit(&self, text: &str) -> Result<TxStatus, SubmitError> {
        let amount = self.admit(text).inspect_err(|err| match err {
            SubmitError::InFlight => warn!("Submit ignored: a transaction is already in flight"),
            SubmitError::Invalid(reason) => debug!("Submit rejected: {reason}"),
        })?;

        info!("Submitting setMyNumber({amount})");
        let tx_hash = match self.gateway.write_number(amount).await {
            Ok(tx_hash) => tx_hash,
            Err(err) => {
                warn!("setMyNumber({amount}) rejected: {err}");
                let status = TxStatus::Failed(failure_message(
                    Some(err.message()),
                    GENERIC_SUBMIT_FAILURE,
                ));
                self.finish(status.clone());
                return Ok(status);
            }
        };

        self.state.send_modify(|state| {
            state.transaction.handle = Some(tx_hash);
            state.transaction.status = TxStatus::Confirming;
        });
        info!("Waiting for tx {tx_hash:?} to be mined");

        let status = self.confirm(tx_hash).await;
        self.finish(status.clone());

        if status == TxStatus::Confirmed {
            self.on_confirmed().await;
        }
        Ok(status)
    }

    /// Checks the in-flight guard and validates, moving to `Submitted` in the
    /// same update so two concurrent callers cannot both be admitted.
    fn admit(&self, text: &str) -> Result<U256, SubmitError> {
        let mut admission = Err(SubmitError::InFlight);

        self.state.send_if_modified(|state| {
            if state.transaction.status.is_in_flight() {
                return false;
            }

            state.input = text.to_owned();
            match validate(text) {
                Ok(amount) => {
                    if state.transaction.status.is_terminal() {
                        debug!("Resetting finished transaction before a new submit");
                    }
                    state.validation_error = None;
                    state.transaction = Transaction::submitted();
                    admission = Ok(amount);
                }
                Err(reason) => {
                    state.validation_error = Some(reason);
                    admission = Err(SubmitError::Invalid(reason));
                }
            }
            true
        });

        admission
    }

    async fn confirm(&self, tx_hash: TxHash) -> TxStatus {
        match self.gateway.wait_for_receipt(tx_hash).await {
            Ok(receipt) if receipt.success => {
                info!("tx {tx_hash:?} confirmed");
                TxStatus::Confirmed
            }
            Ok(receipt) => {
                warn!("tx {tx_hash:?} failed on chain");
                TxStatus::Failed(failure_message(
                    receipt.error_message,
                    GENERIC_REVERT_FAILURE,
                ))
            }
            Err(err) => {
                error!("Waiting for tx {tx_hash:?} failed: {err}");
                TxStatus::Failed(failure_message(Some(err.message()), GENERIC_CONFIRM_FAILURE))
            }
        }
    }

    /// Publishes a terminal status. Confirmation also clears the input.
    fn finish(&self, status: TxStatus) {
        self.state.send_modify(|state| {
            if status == TxStatus::Confirmed {
                state.input.clear();
            }
            state.transaction.status = status;
        });
    }

    async fn on_confirmed(&self) {
        self.refresh().await;
    }

    /// Re-reads the stored number and the event history concurrently.
    ///
    /// Refreshes may overlap when a second transaction confirms before the
    /// first refresh returns. Results are dropped once a later refresh has
    /// been applied.
    async fn refresh(&self) {
        let generation = self.refreshes_started.fetch_add(1, Ordering::SeqCst) + 1;
        let (number, events) = tokio::join!(
            self.gateway.read_number(),
            self.gateway.query_events(self.from_block)
        );

        self.state.send_if_modified(|state| {
            if generation <= self.refresh_applied.load(Ordering::SeqCst) {
                debug!("Dropping refresh #{generation}: superseded by a newer one");
                return false;
            }
            self.refresh_applied.store(generation, Ordering::SeqCst);

            let mut read_error = None;

            match number {
                Ok(number) => state.stored_number = Some(number),
                Err(err) => {
                    error!("getMyNumber failed: {err}");
                    read_error = Some(ReadError::Number(err));
                }
            }

            match events {
                Ok(raw) => {
                    state.events = project(raw);
                    debug!("Event history holds {} records", state.events.len());
                }
                Err(err) => {
                    error!("NumberChanged query failed: {err}");
                    read_error.get_or_insert(ReadError::Events(err));
                }
            }

            state.read_error = read_error;
            true
        });
    }
}

fn failure_message(message: Option<String>, fallback: &str) -> String {
    message
        .map(|msg| msg.trim().to_owned())
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}
