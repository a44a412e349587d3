use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnDetails {
    /// Profit earned in the final year of the holding period only.
    pub yearly_profit: Decimal,
    /// `yearly_profit + principal`.
    pub yearly_return: Decimal,
    /// Principal returned once plus every year's profit.
    pub actual_return: Decimal,
}

/// One row of the investment page's projection table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnProjection {
    pub years: u32,
    pub rate: Decimal,
    pub details: ReturnDetails,
}
