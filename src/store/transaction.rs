//! # Compensating Transactions
//!
//! The actor stores have no shared transaction log, so a multi-store operation is made
//! all-or-nothing with a compensation journal (the saga pattern): every mutating step
//! records how to undo itself, and a rollback replays those undos newest-first.
//!
//! ```rust
//! use storefront::store::Transaction;
//! use std::sync::{Arc, Mutex};
//!
//! #[tokio::main]
//! async fn main() {
//!     let log = Arc::new(Mutex::new(Vec::new()));
//!     let mut tx = Transaction::new();
//!
//!     for step in ["reserve", "create"] {
//!         let log = log.clone();
//!         tx.on_rollback(step, move || async move {
//!             log.lock().unwrap().push(step);
//!             Ok::<_, std::convert::Infallible>(())
//!         });
//!     }
//!
//!     tx.rollback().await.unwrap();
//!     tx.rollback().await.unwrap(); // no-op
//!     assert_eq!(*log.lock().unwrap(), ["create", "reserve"]);
//! }
//! ```
//!
//! ## Release on every exit path
//!
//! - `commit()` discards the journal.
//! - `rollback()` runs it; calling it again, or after `commit()`, does nothing.
//! - Dropping a transaction that is still open (an early `?`, a panic, or a caller that
//!   stops polling) spawns the rollback onto the current Tokio runtime.
//!
//! A compensation that itself fails cannot be retried safely from here. It is logged as an
//! `error` event with `reconciliation = true` and the step label, and reported in
//! [`RollbackError`].

use futures::future::{BoxFuture, FutureExt};
use std::fmt::Display;
use std::future::Future;
use tracing::{debug, error, info, warn};

type Compensation = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), String>> + Send>;

struct Step {
    label: String,
    undo: Compensation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Open,
    Committed,
    RolledBack,
}

/// Compensations that failed during a rollback, by step label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("compensation failed for: {}", .failed.join(", "))]
pub struct RollbackError {
    pub failed: Vec<String>,
}

/// Handle for one multi-step operation. See the module docs.
pub struct Transaction {
    steps: Vec<Step>,
    state: TransactionState,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            state: TransactionState::Open,
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Number of compensations currently journaled.
    pub fn pending(&self) -> usize {
        self.steps.len()
    }

    /// Journals the undo for a step that has just succeeded.
    ///
    /// `label` names the step in logs (e.g. `"release 2 x product_1"`). Ignored once the
    /// transaction is no longer open.
    pub fn on_rollback<F, Fut, E>(&mut self, label: impl Into<String>, undo: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let label = label.into();
        if self.state != TransactionState::Open {
            warn!(step = %label, state = ?self.state, "Compensation registered on a closed transaction");
            return;
        }
        let undo: Compensation =
            Box::new(move || async move { undo().await.map_err(|e| e.to_string()) }.boxed());
        self.steps.push(Step { label, undo });
    }

    /// Makes every journaled step permanent.
    pub fn commit(&mut self) {
        if self.state != TransactionState::Open {
            return;
        }
        debug!(steps = self.steps.len(), "Transaction committed");
        self.steps.clear();
        self.state = TransactionState::Committed;
    }

    /// Undoes every journaled step, newest first.
    ///
    /// Every compensation is attempted even if an earlier one fails. A no-op after
    /// `commit()` or a previous rollback.
    pub async fn rollback(&mut self) -> Result<(), RollbackError> {
        if self.state != TransactionState::Open {
            return Ok(());
        }
        self.state = TransactionState::RolledBack;
        let steps = std::mem::take(&mut self.steps);
        info!(steps = steps.len(), "Rolling back transaction");
        let failed = compensate(steps).await;
        if failed.is_empty() {
            Ok(())
        } else {
            Err(RollbackError { failed })
        }
    }
}

async fn compensate(steps: Vec<Step>) -> Vec<String> {
    let mut failed = Vec::new();
    for Step { label, undo } in steps.into_iter().rev() {
        match undo().await {
            Ok(()) => debug!(step = %label, "Compensated"),
            Err(e) => {
                error!(
                    reconciliation = true,
                    step = %label,
                    error = %e,
                    "Compensation failed; manual reconciliation required"
                );
                failed.push(label);
            }
        }
    }
    failed
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if self.state != TransactionState::Open || self.steps.is_empty() {
            return;
        }
        let steps = std::mem::take(&mut self.steps);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!(steps = steps.len(), "Transaction dropped while open; rolling back");
                handle.spawn(compensate(steps));
            }
            Err(_) => {
                let labels: Vec<String> = steps.into_iter().map(|s| s.label).collect();
                error!(
                    reconciliation = true,
                    steps = ?labels,
                    "Transaction dropped outside a runtime; compensations not run"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::oneshot;

    type Log = Arc<Mutex<Vec<String>>>;

    fn record(tx: &mut Transaction, log: &Log, label: &str) {
        let log = log.clone();
        let entry = label.to_string();
        tx.on_rollback(label, move || async move {
            log.lock().unwrap().push(entry);
            Ok::<_, String>(())
        });
    }

    #[tokio::test]
    async fn test_rollback_runs_newest_first_once() {
        let log: Log = Default::default();
        let mut tx = Transaction::new();
        record(&mut tx, &log, "address");
        record(&mut tx, &log, "stock");
        record(&mut tx, &log, "order");

        tx.rollback().await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(*log.lock().unwrap(), ["order", "stock", "address"]);
        assert_eq!(tx.state(), TransactionState::RolledBack);
    }

    #[tokio::test]
    async fn test_rollback_after_commit_is_noop() {
        let log: Log = Default::default();
        let mut tx = Transaction::new();
        record(&mut tx, &log, "stock");

        tx.commit();
        tx.rollback().await.unwrap();
        drop(tx);
        tokio::task::yield_now().await;

        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_compensation_does_not_stop_the_rest() {
        let log: Log = Default::default();
        let mut tx = Transaction::new();
        record(&mut tx, &log, "first");
        tx.on_rollback("broken", || async { Err::<(), _>("store unavailable") });
        record(&mut tx, &log, "last");

        let err = tx.rollback().await.unwrap_err();
        assert_eq!(err.failed, ["broken"]);
        assert_eq!(*log.lock().unwrap(), ["last", "first"]);
    }

    #[tokio::test]
    async fn test_registration_after_close_is_ignored() {
        let log: Log = Default::default();
        let mut tx = Transaction::new();
        tx.commit();
        record(&mut tx, &log, "late");
        assert_eq!(tx.pending(), 0);
    }

    #[tokio::test]
    async fn test_dropping_open_transaction_rolls_back() {
        let (done_tx, done_rx) = oneshot::channel();
        {
            let mut tx = Transaction::new();
            tx.on_rollback("signal", move || async move {
                let _ = done_tx.send(());
                Ok::<_, String>(())
            });
        }
        tokio::time::timeout(Duration::from_secs(1), done_rx)
            .await
            .expect("rollback was not spawned")
            .unwrap();
    }
}
