mod axm;
mod helpers;
pub mod op;

pub use axm::{
    Axm,
    AxmConversionError,
    BasisPoints,
    AXM_BASE_UNITS,
    AXM_CURRENCY_CODE,
    AXM_CURRENCY_CODE_LOWER,
    AXM_DECIMALS,
};
pub use helpers::parse_or_default;
