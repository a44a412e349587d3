//! The configured storefront services shared by every command.

use anyhow::{Context, Result};
use sugarret_core::{
    Catalog, DeliveryChecker, ProfitRateSchedule, ReturnCalculator, SlotScheduler,
    delivery::default_zones,
};
use sugarret_data::{CatalogLoader, DeliveryZoneLoader, RateScheduleLoader};
use tracing::debug;

use crate::config::SiteConfig;

#[derive(Debug, Clone)]
pub struct Storefront {
    pub calculator: ReturnCalculator,
    pub scheduler: SlotScheduler,
    pub catalog: Catalog,
    pub delivery: DeliveryChecker,
    pub projection_years: u32,
    pub date_count: usize,
}

impl Storefront {
    /// Builds the services described by `config`, loading any CSV files it names.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let investment = &config.investment;
        let schedule = match &investment.rates_csv {
            Some(path) => RateScheduleLoader::load_from_file(path, investment.minimum_investment)
                .with_context(|| format!("Failed to load profit rates: {}", path.display()))?,
            None => ProfitRateSchedule::new(investment.rates.clone())
                .with_minimum_investment(investment.minimum_investment),
        };
        let calculator = ReturnCalculator::new(schedule);
        calculator.validate().context("Invalid profit rate schedule")?;

        let scheduler = SlotScheduler::new(config.schedule.window())
            .context("Invalid meeting schedule")?;

        let catalog = match &config.catalog.csv {
            Some(path) => CatalogLoader::load_from_file(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
            None => Catalog::default(),
        };

        let zones = match &config.delivery.zones_csv {
            Some(path) => DeliveryZoneLoader::load_from_file(path)
                .with_context(|| format!("Failed to load delivery zones: {}", path.display()))?,
            None => default_zones(),
        };
        let delivery = DeliveryChecker::new(zones, config.delivery.availability)
            .context("Invalid delivery settings")?;

        debug!(
            products = catalog.entries().len(),
            zones = delivery.zones().len(),
            "storefront ready"
        );

        Ok(Self {
            calculator,
            scheduler,
            catalog,
            delivery,
            projection_years: investment.projection_years,
            date_count: config.schedule.date_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_build_the_published_storefront() {
        let storefront = Storefront::from_config(&SiteConfig::default()).unwrap();

        assert_eq!(storefront.catalog, Catalog::default());
        assert_eq!(storefront.calculator.schedule(), &ProfitRateSchedule::default());
        assert_eq!(storefront.delivery.zones().len(), 4);
        assert_eq!(storefront.date_count, 12);
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let mut config = SiteConfig::default();
        config.catalog.csv = Some("/nonexistent/catalog.csv".into());

        let err = Storefront::from_config(&config).unwrap_err();

        assert!(err.to_string().contains("Failed to load catalog"));
    }
}
