use std::{fmt::Display, str::FromStr};

use axm_common::{Axm, BasisPoints};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::group_by_shop, errors::CheckoutError};

//--------------------------------------   WalletAddress     ---------------------------------------------------------
/// A lightweight wrapper around a string representing an on-chain wallet address
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAddress(pub String);

impl Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for WalletAddress {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------       OrderId       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------        TxId         ---------------------------------------------------------
/// An on-chain transaction identifier returned by the wallet for a single transfer leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxId(pub String);

impl Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for TxId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl TxId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------    CartLineItem     ---------------------------------------------------------
/// One product line in the cart. Immutable once checkout begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: String,
    pub seller_id: String,
    pub seller_name: String,
    /// The seller's payout wallet. A seller without one cannot be settled.
    pub seller_wallet: Option<WalletAddress>,
    /// Unit price in AXM base units.
    pub unit_price: Axm,
    pub quantity: u32,
}

impl CartLineItem {
    /// `unit_price × quantity` in base units.
    pub fn line_total(&self) -> Axm {
        self.unit_price * i128::from(self.quantity)
    }
}

//--------------------------------------      ShopGroup      ---------------------------------------------------------
/// The subset of the cart's line items belonging to one seller.
///
/// Groups are produced by [`group_by_shop`](crate::cart::group_by_shop) in first-seen-seller
/// order, and their items keep the original cart order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopGroup {
    pub seller_id: String,
    pub seller_name: String,
    pub seller_wallet: Option<WalletAddress>,
    pub items: Vec<CartLineItem>,
}

impl ShopGroup {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn subtotal(&self) -> Axm {
        self.items.iter().map(CartLineItem::line_total).sum()
    }
}

//--------------------------------------    FeeBreakdown     ---------------------------------------------------------
/// The split of a group's subtotal between the seller and the platform fee.
///
/// `seller_amount + fee_amount == subtotal` exactly. Rounding from the basis-point calculation is
/// absorbed into the fee, so no base units are created or destroyed by the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub subtotal: Axm,
    pub fee_basis_points: BasisPoints,
    pub fee_amount: Axm,
    pub seller_amount: Axm,
}

//--------------------------------------  SettlementStatus   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementStatus {
    /// Both the seller payout and the order record went through.
    Succeeded,
    /// The group was not settled. The reason is recorded on the result.
    Failed,
}

impl Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettlementStatus::Succeeded => write!(f, "Succeeded"),
            SettlementStatus::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid settlement status: {0}")]
pub struct ConversionError(String);

impl FromStr for SettlementStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Succeeded" => Ok(Self::Succeeded),
            "Failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid settlement status: {s}"))),
        }
    }
}

//--------------------------------------   PaymentResult     ---------------------------------------------------------
/// The terminal outcome of settling one seller group. Immutable once written.
///
/// Field presence follows the outcome: `order_id` is present iff the group succeeded;
/// `seller_tx_id` is present iff the seller-payout leg was confirmed (including the case where
/// funds moved but the order record failed afterwards); `fee_tx_id` only if the fee leg
/// succeeded; `error` iff the group failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub seller_id: String,
    pub seller_name: String,
    pub status: SettlementStatus,
    pub order_id: Option<OrderId>,
    pub seller_tx_id: Option<TxId>,
    pub fee_tx_id: Option<TxId>,
    pub error: Option<String>,
    pub item_count: usize,
    pub settled_at: DateTime<Utc>,
}

impl PaymentResult {
    pub fn succeeded(group: &ShopGroup, order_id: OrderId, seller_tx_id: TxId, fee_tx_id: Option<TxId>) -> Self {
        Self {
            seller_id: group.seller_id.clone(),
            seller_name: group.seller_name.clone(),
            status: SettlementStatus::Succeeded,
            order_id: Some(order_id),
            seller_tx_id: Some(seller_tx_id),
            fee_tx_id,
            error: None,
            item_count: group.item_count(),
            settled_at: Utc::now(),
        }
    }

    /// A failure before any funds moved for this group.
    pub fn failed<S: Into<String>>(group: &ShopGroup, reason: S) -> Self {
        Self {
            seller_id: group.seller_id.clone(),
            seller_name: group.seller_name.clone(),
            status: SettlementStatus::Failed,
            order_id: None,
            seller_tx_id: None,
            fee_tx_id: None,
            error: Some(reason.into()),
            item_count: group.item_count(),
            settled_at: Utc::now(),
        }
    }

    /// A failure after the seller-payout leg already confirmed. The transaction ids are kept on
    /// the result so the host can reconcile the moved funds against the missing order record.
    pub fn failed_after_transfer<S: Into<String>>(
        group: &ShopGroup,
        seller_tx_id: TxId,
        fee_tx_id: Option<TxId>,
        reason: S,
    ) -> Self {
        Self {
            seller_id: group.seller_id.clone(),
            seller_name: group.seller_name.clone(),
            status: SettlementStatus::Failed,
            order_id: None,
            seller_tx_id: Some(seller_tx_id),
            fee_tx_id,
            error: Some(reason.into()),
            item_count: group.item_count(),
            settled_at: Utc::now(),
        }
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == SettlementStatus::Succeeded
    }
}

//--------------------------------------    ShippingInfo     ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl ShippingInfo {
    pub fn new<S: Into<String>>(name: S, email: S) -> Self {
        Self { name: name.into(), email: email.into(), address: None, notes: None }
    }

    /// Presence check only. Anything beyond name and email being non-empty is the form's problem.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

//--------------------------------------   CheckoutStatus    ---------------------------------------------------------
/// Lifecycle of a checkout session.
///
/// `Cart → Payment → Processing → Complete`. `Complete` is terminal and is reached
/// unconditionally once the settlement loop finishes, whatever the mix of per-group outcomes.
/// There is no transition back to `Payment`; failed groups are not retried within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStatus {
    Cart,
    Payment,
    Processing,
    Complete,
}

impl Display for CheckoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutStatus::Cart => write!(f, "Cart"),
            CheckoutStatus::Payment => write!(f, "Payment"),
            CheckoutStatus::Processing => write!(f, "Processing"),
            CheckoutStatus::Complete => write!(f, "Complete"),
        }
    }
}

impl FromStr for CheckoutStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cart" => Ok(Self::Cart),
            "Payment" => Ok(Self::Payment),
            "Processing" => Ok(Self::Processing),
            "Complete" => Ok(Self::Complete),
            s => Err(ConversionError(format!("Invalid checkout status: {s}"))),
        }
    }
}

//--------------------------------------  CheckoutSession    ---------------------------------------------------------
/// One customer checkout spanning any number of sellers.
///
/// The session is created in `Cart` status, moves to `Payment` when the user confirms the intent
/// to pay, and is then handed to the
/// [`PaymentOrchestrator`](crate::PaymentOrchestrator), which exclusively owns and
/// mutates it through `Processing` until it becomes immutable in `Complete`. Results are
/// append-only, one per shop group, in group order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub shipping: ShippingInfo,
    pub cart: Vec<CartLineItem>,
    pub groups: Vec<ShopGroup>,
    pub results: Vec<PaymentResult>,
    pub status: CheckoutStatus,
    pub started_at: DateTime<Utc>,
}

impl CheckoutSession {
    pub fn new(shipping: ShippingInfo, cart: Vec<CartLineItem>) -> Self {
        let groups = group_by_shop(&cart);
        Self { shipping, cart, groups, results: Vec::new(), status: CheckoutStatus::Cart, started_at: Utc::now() }
    }

    /// The user has confirmed the intent to pay. Moves the session from `Cart` to `Payment`.
    pub fn confirm_payment(&mut self) -> Result<(), CheckoutError> {
        if self.status != CheckoutStatus::Cart {
            return Err(CheckoutError::InvalidState { expected: CheckoutStatus::Cart, actual: self.status });
        }
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if !self.shipping.is_complete() {
            return Err(CheckoutError::IncompleteShipping);
        }
        self.status = CheckoutStatus::Payment;
        Ok(())
    }

    /// Percentage of shop groups settled so far, 0..=100.
    pub fn progress_percent(&self) -> u8 {
        if self.groups.is_empty() {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation)]
        {
            (self.results.len() * 100 / self.groups.len()) as u8
        }
    }

    pub fn succeeded_results(&self) -> impl Iterator<Item = &PaymentResult> {
        self.results.iter().filter(|r| r.is_succeeded())
    }

    pub fn failed_results(&self) -> impl Iterator<Item = &PaymentResult> {
        self.results.iter().filter(|r| !r.is_succeeded())
    }
}
