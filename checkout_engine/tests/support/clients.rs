//! Scripted in-memory implementations of the wallet and ledger capabilities.

use std::{
    collections::{HashSet, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
        Mutex,
    },
};

use axm_common::Axm;
use checkout_engine::{
    traits::{LedgerError, NewOrder, OrderLedgerClient, TokenTransferClient, TransferError},
    types::{OrderId, TxId, WalletAddress},
};

/// A wallet that signs every transfer unless a failure has been scripted for it.
///
/// Clones share state, so tests keep a clone for inspection while the orchestrator owns the
/// original.
#[derive(Clone)]
pub struct ScriptedWallet {
    inner: Arc<WalletInner>,
}

struct WalletInner {
    balance: Axm,
    /// Outcome queue for upcoming transfers, in submission order. `None` is a success; an empty
    /// queue means everything succeeds.
    outcomes: Mutex<VecDeque<Option<TransferError>>>,
    calls: Mutex<Vec<(Axm, WalletAddress)>>,
}

impl ScriptedWallet {
    pub fn with_balance(balance: Axm) -> Self {
        Self {
            inner: Arc::new(WalletInner {
                balance,
                outcomes: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn script_outcomes(&self, outcomes: Vec<Option<TransferError>>) {
        self.inner.outcomes.lock().unwrap().extend(outcomes);
    }

    /// Every transfer attempted so far, as (amount, destination) pairs in call order.
    pub fn calls(&self) -> Vec<(Axm, WalletAddress)> {
        self.inner.calls.lock().unwrap().clone()
    }
}

impl TokenTransferClient for ScriptedWallet {
    async fn balance(&self) -> Result<Axm, TransferError> {
        Ok(self.inner.balance)
    }

    async fn transfer(&self, amount: Axm, to: &WalletAddress) -> Result<TxId, TransferError> {
        self.inner.calls.lock().unwrap().push((amount, to.clone()));
        if let Some(Some(err)) = self.inner.outcomes.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(TxId::from(format!("tx-{:012x}", rand::random::<u64>())))
    }
}

/// A ledger that records every order it accepts and can be told to fail for given sellers.
#[derive(Clone)]
pub struct RecordingLedger {
    inner: Arc<LedgerInner>,
}

#[derive(Default)]
struct LedgerInner {
    fail_for: Mutex<HashSet<String>>,
    orders: Mutex<Vec<NewOrder>>,
    sequence: AtomicU64,
}

impl Default for RecordingLedger {
    fn default() -> Self {
        Self { inner: Arc::new(LedgerInner::default()) }
    }
}

impl RecordingLedger {
    pub fn fail_for(&self, seller_id: &str) {
        self.inner.fail_for.lock().unwrap().insert(seller_id.to_string());
    }

    pub fn orders(&self) -> Vec<NewOrder> {
        self.inner.orders.lock().unwrap().clone()
    }
}

impl OrderLedgerClient for RecordingLedger {
    async fn create_order(&self, order: NewOrder) -> Result<OrderId, LedgerError> {
        if self.inner.fail_for.lock().unwrap().contains(&order.seller_id) {
            return Err(LedgerError::WriteFailed("ledger unavailable".to_string()));
        }
        let n = self.inner.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.orders.lock().unwrap().push(order);
        Ok(OrderId::from(format!("ord-{n}")))
    }
}
