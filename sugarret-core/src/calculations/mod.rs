//! Investment return calculations for the investor pages.
//!
//! Profit is simple (additive) interest: each year of the holding period
//! earns `principal * rate(year)` and nothing compounds.

pub mod common;
pub mod returns;

pub use returns::{ReturnCalculator, ReturnsError, compute_returns, compute_roi};
