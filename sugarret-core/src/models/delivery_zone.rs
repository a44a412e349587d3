use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub name: String,
    pub areas: Vec<String>,
    pub fee: Decimal,
    /// Human-readable window, e.g. "20-30 mins".
    pub eta: String,
}
