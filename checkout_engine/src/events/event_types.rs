use axm_common::Axm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::TxId;

/// Progress of the settlement loop, published after each group's result is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Number of shop groups with a recorded result so far.
    pub completed: usize,
    /// Total number of shop groups in the session.
    pub total: usize,
    /// Display name of the group being processed next. `None` once the loop has finished.
    pub current: Option<String>,
}

/// A fee leg failed after the seller payout had already confirmed.
///
/// The group's settlement proceeds regardless; this event is the reconciliation flag for the
/// fee that was never collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeTransferFailedEvent {
    pub seller_id: String,
    pub fee_amount: Axm,
    /// The seller-payout transaction the fee belonged to.
    pub seller_tx_id: TxId,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Emitted once, when the session enters `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutCompleteEvent {
    pub succeeded: usize,
    pub failed: usize,
}
