//! AXM Checkout Engine
//!
//! The checkout engine settles a multi-seller shopping cart by paying each seller individually
//! with on-chain AXM token transfers and recording one order per seller in the external ledger.
//! It is wallet- and ledger-agnostic: both collaborators are capability traits
//! ([`traits::TokenTransferClient`] and [`traits::OrderLedgerClient`]) that the host supplies.
//!
//! The library is divided into three main sections:
//! 1. Cart aggregation ([`mod@cart`]): pure functions that partition the cart into per-seller
//!    shop groups and split each group's subtotal between the seller and the platform fee. All
//!    monetary math happens in integer base units of the 18-decimal token.
//! 2. The settlement flow ([`PaymentOrchestrator`]): a strictly sequential loop over the shop
//!    groups, two transfer legs and one ledger write per group, with per-seller failure
//!    isolation. There is deliberately no cross-seller atomicity: a partially failed checkout is
//!    a valid terminal outcome, and the session always completes with a full per-seller
//!    accounting.
//! 3. Events ([`mod@events`]): hooks for progress updates, fee-leg reconciliation flags and
//!    checkout completion, so the UI and back-office can observe a run without sharing state
//!    with it.

pub mod cart;
mod config;
mod errors;
pub mod events;
mod orchestrator;
mod progress;
pub mod traits;
pub mod types;

pub use config::{CheckoutConfig, DEFAULT_FEE_BASIS_POINTS};
pub use errors::CheckoutError;
pub use orchestrator::PaymentOrchestrator;
pub use progress::ProgressReport;
