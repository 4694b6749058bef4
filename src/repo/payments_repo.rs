//! In-memory payment ledger.
//!
//! A single task owns the map of outcomes. Handles send commands over an
//! mpsc channel and wait on a oneshot reply, so every read and write is
//! applied in mailbox order and no caller ever holds a lock.

use crate::domain::payment::PaymentOutcome;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("payment ledger is closed")]
    Closed,
}

enum LedgerCommand {
    Add {
        outcome: PaymentOutcome,
        ack: oneshot::Sender<()>,
    },
    Get {
        id: Uuid,
        reply: oneshot::Sender<Option<PaymentOutcome>>,
    },
}

/// Handle to the ledger task. Cheap to clone.
#[derive(Clone)]
pub struct PaymentsRepo {
    tx: mpsc::Sender<LedgerCommand>,
}

impl PaymentsRepo {
    /// Spawns the ledger task on the current tokio runtime.
    pub fn spawn(buffer_size: usize) -> Self {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        tokio::spawn(ledger_loop(rx));
        Self { tx }
    }

    /// Records an outcome. Returns once the ledger task has applied it.
    pub async fn add(&self, outcome: PaymentOutcome) -> Result<(), LedgerError> {
        let (ack, ack_rx) = oneshot::channel();
        self.tx
            .send(LedgerCommand::Add { outcome, ack })
            .await
            .map_err(|_| LedgerError::Closed)?;
        ack_rx.await.map_err(|_| LedgerError::Closed)
    }

    /// Handle whose ledger task is already gone.
    #[cfg(test)]
    pub(crate) fn closed() -> Self {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        Self { tx }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<PaymentOutcome>, LedgerError> {
        let (reply, reply_rx) = oneshot::channel();
        self.tx
            .send(LedgerCommand::Get { id, reply })
            .await
            .map_err(|_| LedgerError::Closed)?;
        reply_rx.await.map_err(|_| LedgerError::Closed)
    }
}

async fn ledger_loop(mut rx: mpsc::Receiver<LedgerCommand>) {
    let mut payments: HashMap<Uuid, PaymentOutcome> = HashMap::new();
    tracing::debug!("payment ledger started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            LedgerCommand::Add { outcome, ack } => {
                match payments.entry(outcome.id) {
                    Entry::Occupied(_) => {
                        tracing::warn!(payment_id = %outcome.id, "duplicate payment id ignored");
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(outcome);
                    }
                }
                let _ = ack.send(());
            }
            LedgerCommand::Get { id, reply } => {
                let _ = reply.send(payments.get(&id).cloned());
            }
        }
    }

    tracing::debug!(entries = payments.len(), "payment ledger stopped");
}
