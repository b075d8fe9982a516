//! Capability traits for the two external collaborators of the checkout flow: the user's wallet
//! and the order ledger. The orchestrator is generic over both, so it can run against a real
//! wallet provider in production and against mocks in tests.

mod order_ledger;
mod token_transfer;

pub use order_ledger::{LedgerError, NewOrder, OrderLedgerClient};
pub use token_transfer::{TokenTransferClient, TransferError};
