use axm_common::Axm;
use thiserror::Error;

use crate::types::{TxId, WalletAddress};

/// Capability to move AXM on-chain through the user's wallet.
///
/// Every call suspends until the wallet resolves it. The wallet's signing surface can show the
/// user only one confirmation prompt at a time, so callers must never issue concurrent
/// transfers; the orchestrator serializes all legs for this reason.
///
/// Amounts cross this boundary as integer base units of the 18-decimal token only. No floating
/// point is ever involved.
#[allow(async_fn_in_trait)]
pub trait TokenTransferClient {
    /// The spendable AXM balance of the connected wallet.
    async fn balance(&self) -> Result<Axm, TransferError>;

    /// Submit a single on-chain transfer of `amount` to `to`, returning the transaction id once
    /// the wallet has signed and broadcast it.
    ///
    /// A transfer that returns `Ok` is irreversible. There is no orchestrator-level timeout on
    /// the confirmation prompt; the call is bounded only by whatever the wallet provider
    /// enforces.
    async fn transfer(&self, amount: Axm, to: &WalletAddress) -> Result<TxId, TransferError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("The user rejected the signature request")]
    UserRejected,
    #[error("Network error during transfer: {0}")]
    Network(String),
    #[error("The transfer timed out before the wallet confirmed it")]
    Timeout,
}
