use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CartLineItem, OrderId, TxId};

/// One seller-scoped order submitted to the ledger, together with the payment proof for the
/// transfer legs that settled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub seller_id: String,
    pub items: Vec<CartLineItem>,
    /// The confirmed seller-payout transaction.
    pub seller_tx_id: TxId,
    /// The platform-fee transaction, absent when no fee was due or the fee leg failed.
    pub fee_tx_id: Option<TxId>,
    pub shipping_name: String,
    pub shipping_email: String,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

/// Capability to persist one seller-scoped order in the external service of record.
#[allow(async_fn_in_trait)]
pub trait OrderLedgerClient {
    /// Persist the order and return its ledger id.
    async fn create_order(&self, order: NewOrder) -> Result<OrderId, LedgerError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Failed to write the order to the ledger: {0}")]
    WriteFailed(String),
    #[error("The ledger rejected the order: {0}")]
    Rejected(String),
}
