//! Shared fixtures for the checkout flow tests.

pub mod clients;
pub mod mocks;

use axm_common::Axm;
use checkout_engine::types::{CartLineItem, CheckoutSession, ShippingInfo, WalletAddress};

pub fn line_item(product: &str, seller: &str, wallet: Option<&str>, price_axm: i64, quantity: u32) -> CartLineItem {
    CartLineItem {
        product_id: product.to_string(),
        seller_id: seller.to_string(),
        seller_name: format!("Shop {seller}"),
        seller_wallet: wallet.map(WalletAddress::from),
        unit_price: Axm::from_axm(price_axm),
        quantity,
    }
}

pub fn shipping() -> ShippingInfo {
    ShippingInfo {
        name: "Alice Example".to_string(),
        email: "alice@example.com".to_string(),
        address: Some("1 Test Lane".to_string()),
        notes: None,
    }
}

/// A session that has already moved through `Cart` into `Payment`.
pub fn paid_up_session(cart: Vec<CartLineItem>) -> CheckoutSession {
    let mut session = CheckoutSession::new(shipping(), cart);
    session.confirm_payment().expect("session should reach Payment");
    session
}
