//! Cart aggregation and per-seller fee computation.
//!
//! Everything in this module is a pure function over cart data. The orchestrator calls these to
//! derive the per-seller settlement plan; nothing here touches a wallet or the ledger.

use axm_common::{Axm, BasisPoints};

use crate::types::{CartLineItem, FeeBreakdown, ShopGroup};

/// Partition the cart's line items into one [`ShopGroup`] per seller.
///
/// Deterministic: groups appear in first-seen-seller order and each group's items keep the cart
/// order. Every item lands in exactly one group, so the union of all groups' items is the input
/// cart with no loss or duplication.
pub fn group_by_shop(items: &[CartLineItem]) -> Vec<ShopGroup> {
    let mut groups: Vec<ShopGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.seller_id == item.seller_id) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(ShopGroup {
                seller_id: item.seller_id.clone(),
                seller_name: item.seller_name.clone(),
                seller_wallet: item.seller_wallet.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

/// Split a group's subtotal between the seller and the platform fee.
///
/// The subtotal is Σ(unit_price × quantity) in integer base units. The fee truncates towards
/// zero and the seller amount is the remainder, so `seller_amount + fee_amount == subtotal`
/// holds exactly for every input.
pub fn compute_fees(group: &ShopGroup, fee_basis_points: BasisPoints) -> FeeBreakdown {
    let subtotal = group.subtotal();
    let fee_amount = fee_basis_points.fee_on(subtotal);
    let seller_amount = subtotal - fee_amount;
    FeeBreakdown { subtotal, fee_basis_points, fee_amount, seller_amount }
}

/// The whole cart's subtotal, used by the pre-flight balance check.
pub fn cart_subtotal(items: &[CartLineItem]) -> Axm {
    items.iter().map(CartLineItem::line_total).sum()
}
