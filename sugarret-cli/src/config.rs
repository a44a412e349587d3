//! Storefront configuration file (`sugarret.toml`).
//!
//! Every section and key is optional; missing values fall back to the
//! published defaults.
//!
//! ```toml
//! [investment]
//! rates = [0.12, 0.14, 0.16, 0.18, 0.20]
//! minimum_investment = 5000
//! projection_years = 3
//!
//! [schedule]
//! start_hour = 9
//! end_hour = 18
//! date_count = 12
//!
//! [delivery]
//! availability = 0.8
//! zones_csv = "data/delivery_zones.csv"
//!
//! [catalog]
//! csv = "data/catalog.csv"
//! ```
//!
//! Relative CSV paths are resolved against the directory holding the config
//! file.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sugarret_core::scheduling::DEFAULT_DATE_COUNT;
use sugarret_core::{ProfitRateSchedule, SlotWindow, delivery::DEFAULT_AVAILABILITY};
use thiserror::Error;
use tracing::debug;

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "sugarret.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub investment: InvestmentConfig,
    pub schedule: ScheduleConfig,
    pub delivery: DeliveryConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvestmentConfig {
    /// Inline rates; ignored when `rates_csv` is set.
    pub rates: Vec<Decimal>,
    pub rates_csv: Option<PathBuf>,
    pub minimum_investment: Decimal,
    /// Rows in the `returns` projection table.
    pub projection_years: u32,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        let schedule = ProfitRateSchedule::default();
        Self {
            rates: schedule.rates,
            rates_csv: None,
            minimum_investment: schedule.minimum_investment,
            projection_years: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub date_count: usize,
}

impl ScheduleConfig {
    pub fn window(&self) -> SlotWindow {
        SlotWindow {
            start_hour: self.start_hour,
            end_hour: self.end_hour,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let window = SlotWindow::default();
        Self {
            start_hour: window.start_hour,
            end_hour: window.end_hour,
            date_count: DEFAULT_DATE_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeliveryConfig {
    pub availability: f64,
    pub zones_csv: Option<PathBuf>,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            availability: DEFAULT_AVAILABILITY,
            zones_csv: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub csv: Option<PathBuf>,
}

impl SiteConfig {
    pub fn from_toml_str(
        source: &str,
        origin: &str,
    ) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(source).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, resolving relative CSV paths against its directory.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&source, &path.display().to_string())?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `explicit` if given, else `./sugarret.toml` if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load_from_file(fallback)
                } else {
                    debug!("no config file found; using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.investment.rates_csv.is_none() && self.investment.rates.is_empty() {
            return Err(ConfigError::Invalid(
                "investment.rates must not be empty".to_string(),
            ));
        }
        if self.investment.minimum_investment < Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "investment.minimum_investment must be non-negative, got {}",
                self.investment.minimum_investment
            )));
        }
        if self.investment.projection_years == 0 {
            return Err(ConfigError::Invalid(
                "investment.projection_years must be at least 1".to_string(),
            ));
        }
        self.schedule
            .window()
            .validate()
            .map_err(|err| ConfigError::Invalid(format!("schedule: {err}")))?;
        if self.schedule.date_count == 0 {
            return Err(ConfigError::Invalid(
                "schedule.date_count must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.delivery.availability) {
            return Err(ConfigError::Invalid(format!(
                "delivery.availability must be between 0 and 1, got {}",
                self.delivery.availability
            )));
        }
        Ok(())
    }

    fn resolve_paths(
        &mut self,
        base: &Path,
    ) {
        for path in [
            &mut self.investment.rates_csv,
            &mut self.delivery.zones_csv,
            &mut self.catalog.csv,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
