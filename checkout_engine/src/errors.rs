use axm_common::Axm;
use thiserror::Error;

use crate::{traits::TransferError, types::CheckoutStatus};

/// Errors that block a checkout before any settlement work begins.
///
/// These are the only errors [`PaymentOrchestrator::run`](crate::PaymentOrchestrator::run) ever
/// returns. Once the session enters `Processing`, every failure is captured in that group's
/// [`PaymentResult`](crate::types::PaymentResult) and nothing propagates to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("The checkout session is in the {actual} state, but {expected} is required")]
    InvalidState { expected: CheckoutStatus, actual: CheckoutStatus },
    #[error("The cart is empty")]
    EmptyCart,
    #[error("Shipping name and email are required")]
    IncompleteShipping,
    #[error("Insufficient balance. {required} is required, but only {available} is available")]
    InsufficientBalance { required: Axm, available: Axm },
    #[error("The wallet balance could not be determined: {0}")]
    BalanceUnavailable(#[source] TransferError),
}
