use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::op;

pub const AXM_CURRENCY_CODE: &str = "AXM";
pub const AXM_CURRENCY_CODE_LOWER: &str = "axm";
pub const AXM_DECIMALS: u32 = 18;
/// Number of base units in one whole AXM token.
pub const AXM_BASE_UNITS: i128 = 1_000_000_000_000_000_000;

//--------------------------------------        Axm         ----------------------------------------------------------
/// An amount of the AXM settlement token, held as integer base units of the 18-decimal token.
///
/// All settlement arithmetic happens on the integer base units. Floating point only ever appears
/// in [`Display`] output, which is for presentation and must never feed back into a calculation.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Axm(i128);

op!(binary Axm, Add, add);
op!(binary Axm, Sub, sub);
op!(inplace Axm, SubAssign, sub_assign);
op!(unary Axm, Neg, neg);

impl Mul<i128> for Axm {
    type Output = Self;

    fn mul(self, rhs: i128) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Axm {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in AXM base units: {0}")]
pub struct AxmConversionError(String);

impl From<i128> for Axm {
    fn from(value: i128) -> Self {
        Self(value)
    }
}

impl PartialEq for Axm {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Axm {}

impl TryFrom<u128> for Axm {
    type Error = AxmConversionError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        if value > i128::MAX as u128 {
            Err(AxmConversionError(format!("Value {} is too large to convert to Axm", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i128))
        }
    }
}

impl Display for Axm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / AXM_BASE_UNITS;
        // Four decimal places is plenty for display.
        let frac = (self.0 % AXM_BASE_UNITS).unsigned_abs() / 100_000_000_000_000;
        if self.0 < 0 && whole == 0 {
            write!(f, "-0.{frac:04} {AXM_CURRENCY_CODE}")
        } else {
            write!(f, "{whole}.{frac:04} {AXM_CURRENCY_CODE}")
        }
    }
}

impl Axm {
    pub fn value(&self) -> i128 {
        self.0
    }

    /// An amount of whole AXM tokens.
    pub fn from_axm(tokens: i64) -> Self {
        Self(i128::from(tokens) * AXM_BASE_UNITS)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

//--------------------------------------    BasisPoints      ---------------------------------------------------------
/// A fee rate in basis points. 1 bps = 0.01%, so 200 bps is a 2% fee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BasisPoints(u32);

impl BasisPoints {
    pub fn new(bps: u32) -> Self {
        Self(bps)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The fee levied on `amount`, truncated towards zero.
    ///
    /// The remainder after the fee is `amount - fee_on(amount)`, so the fee absorbs any rounding
    /// and no base units are created or destroyed by the split.
    pub fn fee_on(&self, amount: Axm) -> Axm {
        Axm::from(amount.value() * i128::from(self.0) / 10_000)
    }
}

impl From<u32> for BasisPoints {
    fn from(bps: u32) -> Self {
        Self(bps)
    }
}

impl Display for BasisPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bps", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arithmetic_on_base_units() {
        let a = Axm::from(1_500);
        let b = Axm::from(500);
        assert_eq!(a + b, Axm::from(2_000));
        assert_eq!(a - b, Axm::from(1_000));
        assert_eq!(-b, Axm::from(-500));
        assert_eq!(b * 3, Axm::from(1_500));
        let mut c = a;
        c -= b;
        assert_eq!(c, Axm::from(1_000));
    }

    #[test]
    fn summing_amounts() {
        let total: Axm = vec![Axm::from_axm(1), Axm::from_axm(2), Axm::from(5)].into_iter().sum();
        assert_eq!(total, Axm::from(3 * AXM_BASE_UNITS + 5));
    }

    #[test]
    fn whole_token_conversion() {
        assert_eq!(Axm::from_axm(100).value(), 100 * AXM_BASE_UNITS);
        assert_eq!(Axm::from_axm(-3).value(), -3 * AXM_BASE_UNITS);
    }

    #[test]
    fn display_formatting() {
        assert_eq!(Axm::from_axm(100).to_string(), "100.0000 AXM");
        assert_eq!(Axm::from(AXM_BASE_UNITS / 2).to_string(), "0.5000 AXM");
        assert_eq!(Axm::from(-AXM_BASE_UNITS / 4).to_string(), "-0.2500 AXM");
    }

    #[test]
    fn u128_conversion_guards_overflow() {
        assert!(Axm::try_from(u128::MAX).is_err());
        assert_eq!(Axm::try_from(42u128).unwrap(), Axm::from(42));
    }

    #[test]
    fn fee_split_conserves_base_units() {
        let bps = BasisPoints::new(200);
        // Amounts chosen so the 2% fee truncates.
        for units in [0i128, 1, 49, 50, 99, 10_000, 123_456_789, 5 * AXM_BASE_UNITS + 7] {
            let subtotal = Axm::from(units);
            let fee = bps.fee_on(subtotal);
            let remainder = subtotal - fee;
            assert_eq!(remainder + fee, subtotal);
            assert!(fee.value() <= units * 200 / 10_000 + 1);
        }
    }

    #[test]
    fn two_percent_of_one_hundred() {
        let fee = BasisPoints::new(200).fee_on(Axm::from_axm(100));
        assert_eq!(fee, Axm::from_axm(2));
    }

    #[test]
    fn zero_rate_takes_nothing() {
        assert_eq!(BasisPoints::new(0).fee_on(Axm::from_axm(10)), Axm::default());
    }
}
