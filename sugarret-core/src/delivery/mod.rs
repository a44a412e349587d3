//! Delivery availability checker.
//!
//! There is no address lookup: the checker simulates coverage by picking a
//! zone and an availability outcome from an injected [`RandomSource`], so a
//! scripted or seeded source makes every quote reproducible.

mod random;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::DeliveryZone;

pub use random::RandomSource;

/// Share of addresses reported as deliverable by default.
pub const DEFAULT_AVAILABILITY: f64 = 0.8;

#[derive(Debug, Error, PartialEq)]
pub enum DeliveryError {
    #[error("please enter your address")]
    EmptyAddress,

    #[error("no delivery zones are configured")]
    NoZones,

    #[error("availability must be between 0 and 1, got {0}")]
    InvalidAvailability(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeliveryQuote {
    Available {
        zone: String,
        fee: Decimal,
        eta: String,
    },
    Unavailable,
}

impl DeliveryQuote {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryChecker {
    zones: Vec<DeliveryZone>,
    availability: f64,
}

impl DeliveryChecker {
    /// # Errors
    ///
    /// Returns [`DeliveryError::NoZones`] for an empty zone list and
    /// [`DeliveryError::InvalidAvailability`] unless `availability` is in `[0, 1]`.
    pub fn new(
        zones: Vec<DeliveryZone>,
        availability: f64,
    ) -> Result<Self, DeliveryError> {
        if zones.is_empty() {
            return Err(DeliveryError::NoZones);
        }
        if !(0.0..=1.0).contains(&availability) {
            return Err(DeliveryError::InvalidAvailability(availability));
        }
        Ok(Self {
            zones,
            availability,
        })
    }

    pub fn zones(&self) -> &[DeliveryZone] {
        &self.zones
    }

    /// Quotes delivery to `address`.
    ///
    /// Draws a zone first, then an availability outcome; the address is
    /// covered when the second draw is below `availability`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::EmptyAddress`] for a blank address.
    pub fn check(
        &self,
        address: &str,
        rng: &mut dyn RandomSource,
    ) -> Result<DeliveryQuote, DeliveryError> {
        if address.trim().is_empty() {
            warn!("delivery check requested without an address");
            return Err(DeliveryError::EmptyAddress);
        }

        let zone = &self.zones[rng.next_index(self.zones.len())];
        let covered = rng.next_unit() < self.availability;
        debug!(zone = %zone.name, covered, "simulated delivery check");

        if !covered {
            return Ok(DeliveryQuote::Unavailable);
        }
        Ok(DeliveryQuote::Available {
            zone: zone.name.clone(),
            fee: zone.fee,
            eta: zone.eta.clone(),
        })
    }
}

fn zone(
    name: &str,
    areas: [&str; 3],
    fee: i64,
    eta: &str,
) -> DeliveryZone {
    DeliveryZone {
        name: name.to_string(),
        areas: areas.iter().map(|area| area.to_string()).collect(),
        fee: Decimal::from(fee),
        eta: eta.to_string(),
    }
}

/// The four Accra delivery zones.
pub fn default_zones() -> Vec<DeliveryZone> {
    vec![
        zone("Zone 1", ["Spintex", "Tema Station", "Baatsona"], 5, "20-30 mins"),
        zone("Zone 2", ["East Legon", "Airport", "Cantonments"], 8, "30-45 mins"),
        zone("Zone 3", ["Osu", "Labone", "Dzorwulu"], 10, "45-60 mins"),
        zone("Zone 4", ["Adabraka", "Ring Road", "Asylum Down"], 12, "50-70 mins"),
    ]
}

impl Default for DeliveryChecker {
    fn default() -> Self {
        Self {
            zones: default_zones(),
            availability: DEFAULT_AVAILABILITY,
        }
    }
}
