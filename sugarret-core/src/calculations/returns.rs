//! Investment return calculator.
//!
//! For a principal `P`, holding period `n` and rate schedule `r`:
//!
//! | Value | Formula |
//! |-------|---------|
//! | `rate(i)` | `r[i-1]`, or the last rate once `i` runs past the schedule |
//! | `yearly_profit` | `P × rate(n)` |
//! | `yearly_return` | `yearly_profit + P` |
//! | `actual_return` | `P + Σ P × rate(i)` for `i` in `1..=n` |
//! | ROI | `(actual_return - P) / P × 100` |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use sugarret_core::{ProfitRateSchedule, ReturnCalculator};
//!
//! let calculator = ReturnCalculator::new(ProfitRateSchedule::default());
//! let details = calculator.calculate(dec!(5000), 3).unwrap();
//!
//! assert_eq!(details.actual_return, dec!(7100));
//! assert_eq!(calculator.roi(dec!(5000), 3).unwrap(), dec!(42));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ProfitRateSchedule, ReturnDetails, ReturnProjection};

/// Errors that can occur while calculating investment returns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReturnsError {
    /// The principal must be non-negative.
    #[error("investment amount must be non-negative, got {0}")]
    NegativePrincipal(Decimal),

    /// ROI is undefined for a zero principal.
    #[error("return on investment is undefined for a zero investment")]
    ZeroPrincipal,

    /// The holding period must be at least one year.
    #[error("holding period must be at least 1 year, got {0}")]
    InvalidHoldingPeriod(u32),

    /// The rate schedule has no rates.
    #[error("profit rate schedule is empty")]
    EmptySchedule,

    /// A rate in the schedule is negative.
    #[error("profit rate for year {year} must be non-negative, got {rate}")]
    NegativeRate { year: usize, rate: Decimal },

    /// The principal is below the schedule's minimum investment.
    #[error("minimum investment is {minimum}, got {amount}")]
    BelowMinimum { amount: Decimal, minimum: Decimal },

    /// The result does not fit in a decimal.
    #[error("investment amount {0} is too large to project")]
    Overflow(Decimal),
}

/// Computes returns for `principal` held `years` years under `rates`.
///
/// See the module documentation for the formulas.
///
/// # Errors
///
/// Returns [`ReturnsError`] if the principal is negative, `years` is zero,
/// or `rates` is empty or contains a negative rate.
///
/// ```
/// use rust_decimal_macros::dec;
/// use sugarret_core::compute_returns;
///
/// let details = compute_returns(dec!(5000), 1, &[dec!(0.12), dec!(0.14)]).unwrap();
///
/// assert_eq!(details.yearly_profit, dec!(600));
/// assert_eq!(details.yearly_return, dec!(5600));
/// assert_eq!(details.actual_return, dec!(5600));
/// ```
pub fn compute_returns(
    principal: Decimal,
    years: u32,
    rates: &[Decimal],
) -> Result<ReturnDetails, ReturnsError> {
    ReturnCalculator::new(ProfitRateSchedule::new(rates.to_vec())).calculate(principal, years)
}

/// Return on investment as a percentage of the principal.
///
/// # Errors
///
/// Same as [`compute_returns`], plus [`ReturnsError::ZeroPrincipal`] when
/// `principal` is zero.
pub fn compute_roi(
    principal: Decimal,
    years: u32,
    rates: &[Decimal],
) -> Result<Decimal, ReturnsError> {
    ReturnCalculator::new(ProfitRateSchedule::new(rates.to_vec())).roi(principal, years)
}

/// Calculator bound to a single profit rate schedule.
#[derive(Debug, Clone)]
pub struct ReturnCalculator {
    schedule: ProfitRateSchedule,
}

impl ReturnCalculator {
    pub fn new(schedule: ProfitRateSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &ProfitRateSchedule {
        &self.schedule
    }

    /// Validates the rate schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ReturnsError::EmptySchedule`] or [`ReturnsError::NegativeRate`].
    pub fn validate(&self) -> Result<(), ReturnsError> {
        self.schedule.validate()
    }

    /// Computes [`ReturnDetails`] for `principal` held `years` years.
    ///
    /// # Errors
    ///
    /// Returns [`ReturnsError`] if the schedule is invalid, the principal is
    /// negative or `years` is zero.
    pub fn calculate(
        &self,
        principal: Decimal,
        years: u32,
    ) -> Result<ReturnDetails, ReturnsError> {
        self.validate()?;
        if principal < Decimal::ZERO {
            warn!(%principal, "rejected negative investment amount");
            return Err(ReturnsError::NegativePrincipal(principal));
        }
        if years == 0 {
            return Err(ReturnsError::InvalidHoldingPeriod(years));
        }

        let overflow = || ReturnsError::Overflow(principal);

        let total_profit = self
            .cumulative_rate(years)
            .and_then(|rate| principal.checked_mul(rate))
            .ok_or_else(overflow)?;

        let yearly_profit = principal
            .checked_mul(self.rate(years))
            .ok_or_else(overflow)?;
        let yearly_return = yearly_profit.checked_add(principal).ok_or_else(overflow)?;
        let actual_return = total_profit.checked_add(principal).ok_or_else(overflow)?;

        debug!(
            %principal,
            years,
            %yearly_profit,
            %actual_return,
            "calculated investment returns"
        );

        Ok(ReturnDetails {
            yearly_profit,
            yearly_return,
            actual_return,
        })
    }

    /// Return on investment over `years`, as a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ReturnsError::ZeroPrincipal`] for a zero principal, otherwise
    /// the same errors as [`ReturnCalculator::calculate`].
    pub fn roi(
        &self,
        principal: Decimal,
        years: u32,
    ) -> Result<Decimal, ReturnsError> {
        let details = self.calculate(principal, years)?;
        if principal.is_zero() {
            return Err(ReturnsError::ZeroPrincipal);
        }
        let gain = details.actual_return - principal;
        gain.checked_div(principal)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|roi| roi.normalize())
            .ok_or(ReturnsError::Overflow(principal))
    }

    /// One row per holding period from 1 to `max_years`.
    ///
    /// # Errors
    ///
    /// Same as [`ReturnCalculator::calculate`]; `max_years` must be at least 1.
    pub fn project(
        &self,
        principal: Decimal,
        max_years: u32,
    ) -> Result<Vec<ReturnProjection>, ReturnsError> {
        if max_years == 0 {
            return Err(ReturnsError::InvalidHoldingPeriod(max_years));
        }
        (1..=max_years)
            .map(|years| {
                Ok(ReturnProjection {
                    years,
                    rate: self.rate(years),
                    details: self.calculate(principal, years)?,
                })
            })
            .collect()
    }

    /// Checks `amount` against the schedule's minimum investment.
    ///
    /// # Errors
    ///
    /// Returns [`ReturnsError::BelowMinimum`] when `amount` is smaller.
    pub fn check_minimum(
        &self,
        amount: Decimal,
    ) -> Result<(), ReturnsError> {
        if amount < self.schedule.minimum_investment {
            return Err(ReturnsError::BelowMinimum {
                amount,
                minimum: self.schedule.minimum_investment,
            });
        }
        Ok(())
    }

    // Sum of rate(i) for i in 1..=years. Years past the schedule all use the
    // last rate, so the clamped tail is a single multiplication.
    fn cumulative_rate(
        &self,
        years: u32,
    ) -> Option<Decimal> {
        let rates = &self.schedule.rates;
        let published = usize::try_from(years)
            .map_or(rates.len(), |years| years.min(rates.len()));
        let head = rates[..published]
            .iter()
            .try_fold(Decimal::ZERO, |sum, rate| sum.checked_add(*rate))?;

        let tail_years = u64::from(years).saturating_sub(published as u64);
        if tail_years == 0 {
            return Some(head);
        }
        let last = rates.last().copied().unwrap_or(Decimal::ZERO);
        Decimal::from(tail_years)
            .checked_mul(last)
            .and_then(|tail| head.checked_add(tail))
    }

    // Zero only for an empty schedule, which validate() rejects.
    fn rate(
        &self,
        year: u32,
    ) -> Decimal {
        self.schedule.rate_for_year(year).unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn canonical_rates() -> Vec<Decimal> {
        vec![dec!(0.12), dec!(0.14), dec!(0.16), dec!(0.18), dec!(0.20)]
    }

    fn calculator() -> ReturnCalculator {
        ReturnCalculator::new(ProfitRateSchedule::default())
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn one_year_returns_first_rate_profit() {
        let details = compute_returns(dec!(5000), 1, &canonical_rates()).unwrap();

        assert_eq!(
            details,
            ReturnDetails {
                yearly_profit: dec!(600),
                yearly_return: dec!(5600),
                actual_return: dec!(5600),
            }
        );
    }

    #[test]
    fn three_years_accumulates_simple_profit() {
        let details = compute_returns(dec!(5000), 3, &canonical_rates()).unwrap();

        // 5000 + 5000 * (0.12 + 0.14 + 0.16)
        assert_eq!(details.actual_return, dec!(7100));
        assert_eq!(details.yearly_profit, dec!(800));
        assert_eq!(details.yearly_return, dec!(5800));
    }

    #[test]
    fn years_past_schedule_use_last_rate() {
        let details = compute_returns(dec!(1000), 7, &canonical_rates()).unwrap();

        // 1000 * (0.12 + 0.14 + 0.16 + 0.18 + 0.20 + 0.20 + 0.20) = 1200
        assert_eq!(details.yearly_profit, dec!(200));
        assert_eq!(details.actual_return, dec!(2200));
    }

    #[test]
    fn single_rate_schedule_clamps_every_year() {
        let details = compute_returns(dec!(100), 4, &[dec!(0.10)]).unwrap();

        assert_eq!(details.yearly_profit, dec!(10));
        assert_eq!(details.actual_return, dec!(140));
    }

    #[test]
    fn zero_principal_yields_zero_profit() {
        let details = compute_returns(dec!(0), 3, &canonical_rates()).unwrap();

        assert_eq!(details.actual_return, dec!(0));
        assert_eq!(details.yearly_return, dec!(0));
    }

    #[test]
    fn actual_return_never_below_yearly_return_or_principal() {
        for principal in [dec!(0), dec!(1), dec!(5000), dec!(123456.78)] {
            for years in 1..=10 {
                let details = compute_returns(principal, years, &canonical_rates()).unwrap();

                assert!(details.actual_return >= details.yearly_return);
                assert!(details.yearly_return >= principal);
            }
        }
    }

    #[test]
    fn negative_principal_is_rejected() {
        let result = compute_returns(dec!(-1), 1, &canonical_rates());

        assert_eq!(result, Err(ReturnsError::NegativePrincipal(dec!(-1))));
    }

    #[test]
    fn zero_years_is_rejected() {
        let result = compute_returns(dec!(5000), 0, &canonical_rates());

        assert_eq!(result, Err(ReturnsError::InvalidHoldingPeriod(0)));
    }

    #[test]
    fn empty_schedule_is_rejected() {
        let result = compute_returns(dec!(5000), 1, &[]);

        assert_eq!(result, Err(ReturnsError::EmptySchedule));
    }

    #[test]
    fn negative_rate_is_rejected_with_its_year() {
        let result = compute_returns(dec!(5000), 1, &[dec!(0.12), dec!(-0.01)]);

        assert_eq!(
            result,
            Err(ReturnsError::NegativeRate {
                year: 2,
                rate: dec!(-0.01),
            })
        );
    }

    #[test]
    fn overflowing_principal_is_reported() {
        let result = compute_returns(Decimal::MAX, 2, &[dec!(2)]);

        assert_eq!(result, Err(ReturnsError::Overflow(Decimal::MAX)));
    }

    #[test]
    fn longest_holding_period_is_computed_directly() {
        // 0.12 + 0.14 + 0.16 + 0.18 + 0.20, then 0.20 for the remaining years
        let details = calculator().calculate(dec!(5000), u32::MAX).unwrap();

        assert_eq!(details.yearly_profit, dec!(1000));
        assert_eq!(details.actual_return, dec!(4294967299000));
    }

    #[test]
    fn longest_holding_period_can_overflow() {
        let principal = Decimal::from(u64::MAX);

        let result = compute_returns(principal, u32::MAX, &[dec!(10)]);

        assert_eq!(result, Err(ReturnsError::Overflow(principal)));
    }

    #[test]
    fn project_stays_cheap_for_long_tables() {
        let rows = calculator().project(dec!(5000), 1_000).unwrap();

        assert_eq!(rows.len(), 1_000);
        assert_eq!(rows[999].details.actual_return, dec!(1004000));
    }

    // =========================================================================
    // roi tests
    // =========================================================================

    #[test]
    fn roi_for_three_years_is_forty_two_percent() {
        let roi = compute_roi(dec!(5000), 3, &canonical_rates()).unwrap();

        assert_eq!(roi, dec!(42));
    }

    #[test]
    fn roi_does_not_depend_on_principal() {
        let small = calculator().roi(dec!(5000), 5).unwrap();
        let large = calculator().roi(dec!(250000), 5).unwrap();

        assert_eq!(small, dec!(80));
        assert_eq!(small, large);
    }

    #[test]
    fn roi_with_zero_principal_is_an_error() {
        let result = compute_roi(dec!(0), 3, &canonical_rates());

        assert_eq!(result, Err(ReturnsError::ZeroPrincipal));
    }

    // =========================================================================
    // project tests
    // =========================================================================

    #[test]
    fn project_lists_each_holding_period() {
        let rows = calculator().project(dec!(5000), 3).unwrap();

        let actual: Vec<_> = rows
            .iter()
            .map(|row| (row.years, row.rate, row.details.actual_return))
            .collect();
        assert_eq!(
            actual,
            vec![
                (1, dec!(0.12), dec!(5600)),
                (2, dec!(0.14), dec!(6300)),
                (3, dec!(0.16), dec!(7100)),
            ]
        );
    }

    #[test]
    fn project_rejects_zero_years() {
        let result = calculator().project(dec!(5000), 0);

        assert_eq!(result, Err(ReturnsError::InvalidHoldingPeriod(0)));
    }

    // =========================================================================
    // check_minimum tests
    // =========================================================================

    #[test]
    fn check_minimum_accepts_exact_minimum() {
        assert_eq!(calculator().check_minimum(dec!(5000)), Ok(()));
    }

    #[test]
    fn check_minimum_rejects_smaller_amounts() {
        assert_eq!(
            calculator().check_minimum(dec!(4999.99)),
            Err(ReturnsError::BelowMinimum {
                amount: dec!(4999.99),
                minimum: dec!(5000),
            })
        );
    }
}
