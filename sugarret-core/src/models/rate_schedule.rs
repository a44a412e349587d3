use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::ReturnsError;

/// Annual profit rates offered to investors, indexed from year 1.
///
/// Years past the end of the published schedule reuse the last rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitRateSchedule {
    pub rates: Vec<Decimal>,
    /// Smallest principal the investment page accepts.
    pub minimum_investment: Decimal,
}

impl ProfitRateSchedule {
    pub fn new(rates: Vec<Decimal>) -> Self {
        Self {
            rates,
            ..Default::default()
        }
    }

    pub fn with_minimum_investment(
        mut self,
        minimum_investment: Decimal,
    ) -> Self {
        self.minimum_investment = minimum_investment;
        self
    }

    /// Rate applied in `year` (1-indexed), clamped to the last published rate.
    ///
    /// Returns `None` for year 0 or an empty schedule.
    pub fn rate_for_year(
        &self,
        year: u32,
    ) -> Option<Decimal> {
        let index = usize::try_from(year).ok()?.checked_sub(1)?;
        self.rates.get(index).or_else(|| self.rates.last()).copied()
    }

    /// # Errors
    ///
    /// Returns [`ReturnsError::EmptySchedule`] or [`ReturnsError::NegativeRate`]
    /// for the first negative rate.
    pub fn validate(&self) -> Result<(), ReturnsError> {
        if self.rates.is_empty() {
            return Err(ReturnsError::EmptySchedule);
        }
        if let Some((index, rate)) = self
            .rates
            .iter()
            .enumerate()
            .find(|(_, rate)| **rate < Decimal::ZERO)
        {
            return Err(ReturnsError::NegativeRate {
                year: index + 1,
                rate: *rate,
            });
        }
        Ok(())
    }
}

impl Default for ProfitRateSchedule {
    fn default() -> Self {
        Self {
            rates: vec![
                Decimal::new(12, 2),
                Decimal::new(14, 2),
                Decimal::new(16, 2),
                Decimal::new(18, 2),
                Decimal::new(20, 2),
            ],
            minimum_investment: Decimal::from(5000),
        }
    }
}
