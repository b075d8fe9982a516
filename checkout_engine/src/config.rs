use std::env;

use axm_common::{parse_or_default, BasisPoints};
use log::*;

use crate::types::WalletAddress;

pub const DEFAULT_FEE_BASIS_POINTS: u32 = 200;

/// Session-wide settlement constants.
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Platform fee rate applied to every seller group's subtotal.
    pub fee_basis_points: BasisPoints,
    /// Destination wallet for the platform-fee leg.
    pub treasury: WalletAddress,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self { fee_basis_points: BasisPoints::new(DEFAULT_FEE_BASIS_POINTS), treasury: WalletAddress::from("") }
    }
}

impl CheckoutConfig {
    pub fn new<A: Into<WalletAddress>>(fee_basis_points: u32, treasury: A) -> Self {
        Self { fee_basis_points: BasisPoints::new(fee_basis_points), treasury: treasury.into() }
    }

    pub fn from_env_or_default() -> Self {
        let raw_fee = env::var("AXM_FEE_BPS").ok();
        if let Some(s) = &raw_fee {
            if s.trim().parse::<u32>().is_err() {
                error!(
                    "🪛️ {s} is not a valid fee for AXM_FEE_BPS. Using the default, {DEFAULT_FEE_BASIS_POINTS} bps, \
                     instead."
                );
            }
        }
        let fee_basis_points = BasisPoints::new(parse_or_default(raw_fee, DEFAULT_FEE_BASIS_POINTS));
        let treasury = env::var("AXM_TREASURY_ADDRESS").ok().unwrap_or_else(|| {
            error!("🪛️ AXM_TREASURY_ADDRESS is not set. Fee legs will fail until it is configured.");
            String::default()
        });
        Self { fee_basis_points, treasury: WalletAddress::from(treasury) }
    }
}
