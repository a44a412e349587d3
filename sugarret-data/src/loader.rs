use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use sugarret_core::{
    Catalog, CatalogEntry, CatalogError, DeliveryZone, ProfitRateSchedule, ReturnCalculator,
    ReturnsError,
};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading storefront data files.
#[derive(Debug, Error)]
pub enum DataLoaderError {
    #[error("cannot open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("{0} file has no rows")]
    Empty(&'static str),

    #[error("profit rates must cover years 1..n without gaps: expected year {expected}, found {found}")]
    NonContiguousYear { expected: u32, found: u32 },

    #[error("delivery zone '{0}' lists no areas")]
    ZoneWithoutAreas(String),

    #[error("delivery zone '{name}' has a negative fee {fee}")]
    NegativeFee { name: String, fee: Decimal },

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("invalid profit rate schedule: {0}")]
    Schedule(#[from] ReturnsError),
}

impl From<csv::Error> for DataLoaderError {
    fn from(err: csv::Error) -> Self {
        DataLoaderError::CsvParse(err.to_string())
    }
}

fn open(path: &Path) -> Result<File, DataLoaderError> {
    File::open(path).map_err(|source| DataLoaderError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_records<R, T>(reader: R) -> Result<Vec<T>, DataLoaderError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A row of the product catalog CSV:
/// `id,name,description,unit_price,category`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit_price: Decimal,
    pub category: String,
}

impl From<CatalogRecord> for CatalogEntry {
    fn from(record: CatalogRecord) -> Self {
        CatalogEntry {
            id: record.id,
            name: record.name,
            description: record.description,
            unit_price: record.unit_price,
            category: record.category,
        }
    }
}

/// Loader for the product catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<CatalogRecord>, DataLoaderError> {
        parse_records(reader)
    }

    /// Parses and validates a catalog. Duplicate ids and negative prices are rejected.
    pub fn load<R: Read>(reader: R) -> Result<Catalog, DataLoaderError> {
        let records = Self::parse(reader)?;
        if records.is_empty() {
            return Err(DataLoaderError::Empty("catalog"));
        }
        debug!(products = records.len(), "parsed catalog");
        Ok(Catalog::new(records.into_iter().map(CatalogEntry::from).collect())?)
    }

    pub fn load_from_file(path: &Path) -> Result<Catalog, DataLoaderError> {
        Self::load(open(path)?)
    }
}

// ---------------------------------------------------------------------------
// Profit rate schedule
// ---------------------------------------------------------------------------

/// A row of the profit rate CSV: `year,rate`, rate as a fraction (0.12 for 12%).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RateScheduleRecord {
    pub year: u32,
    pub rate: Decimal,
}

/// Loader for the investor profit rate schedule.
///
/// Rows may appear in any order but together must cover years `1..=n`
/// exactly once.
pub struct RateScheduleLoader;

impl RateScheduleLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RateScheduleRecord>, DataLoaderError> {
        parse_records(reader)
    }

    pub fn load<R: Read>(
        reader: R,
        minimum_investment: Decimal,
    ) -> Result<ProfitRateSchedule, DataLoaderError> {
        let mut records = Self::parse(reader)?;
        if records.is_empty() {
            return Err(DataLoaderError::Empty("profit rate"));
        }
        records.sort_by_key(|record| record.year);

        for (expected, record) in (1u32..).zip(&records) {
            if record.year != expected {
                return Err(DataLoaderError::NonContiguousYear {
                    expected,
                    found: record.year,
                });
            }
        }

        let schedule = ProfitRateSchedule::new(records.into_iter().map(|r| r.rate).collect())
            .with_minimum_investment(minimum_investment);
        ReturnCalculator::new(schedule.clone()).validate()?;
        debug!(years = schedule.rates.len(), "parsed profit rate schedule");
        Ok(schedule)
    }

    pub fn load_from_file(
        path: &Path,
        minimum_investment: Decimal,
    ) -> Result<ProfitRateSchedule, DataLoaderError> {
        Self::load(open(path)?, minimum_investment)
    }
}

// ---------------------------------------------------------------------------
// Delivery zones
// ---------------------------------------------------------------------------

/// A row of the delivery zone CSV: `name,areas,fee,eta`, with `areas`
/// separated by `;`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeliveryZoneRecord {
    pub name: String,
    pub areas: String,
    pub fee: Decimal,
    pub eta: String,
}

impl DeliveryZoneRecord {
    fn into_zone(self) -> Result<DeliveryZone, DataLoaderError> {
        let areas: Vec<String> = self
            .areas
            .split(';')
            .map(str::trim)
            .filter(|area| !area.is_empty())
            .map(str::to_string)
            .collect();
        if areas.is_empty() {
            return Err(DataLoaderError::ZoneWithoutAreas(self.name));
        }
        if self.fee < Decimal::ZERO {
            return Err(DataLoaderError::NegativeFee {
                name: self.name,
                fee: self.fee,
            });
        }
        Ok(DeliveryZone {
            name: self.name,
            areas,
            fee: self.fee,
            eta: self.eta,
        })
    }
}

/// Loader for delivery zones.
pub struct DeliveryZoneLoader;

impl DeliveryZoneLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<DeliveryZoneRecord>, DataLoaderError> {
        parse_records(reader)
    }

    pub fn load<R: Read>(reader: R) -> Result<Vec<DeliveryZone>, DataLoaderError> {
        let records = Self::parse(reader)?;
        if records.is_empty() {
            return Err(DataLoaderError::Empty("delivery zone"));
        }
        records.into_iter().map(DeliveryZoneRecord::into_zone).collect()
    }

    pub fn load_from_file(path: &Path) -> Result<Vec<DeliveryZone>, DataLoaderError> {
        Self::load(open(path)?)
    }
}
