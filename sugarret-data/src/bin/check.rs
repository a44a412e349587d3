use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use sugarret_data::{CatalogLoader, DeliveryZoneLoader, RateScheduleLoader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validate storefront data files before deploying them.
///
/// Each file is parsed and checked the same way the storefront loads it.
/// The first problem found is reported and the process exits non-zero.
#[derive(Parser, Debug)]
#[command(name = "sugarret-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Product catalog CSV (id,name,description,unit_price,category)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Profit rate CSV (year,rate)
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// Delivery zone CSV (name,areas,fee,eta)
    #[arg(short, long)]
    zones: Option<PathBuf>,

    /// Minimum investment to attach to the loaded rate schedule
    #[arg(long, default_value = "5000")]
    minimum_investment: Decimal,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();

    let args = Args::parse();
    if args.catalog.is_none() && args.rates.is_none() && args.zones.is_none() {
        anyhow::bail!("nothing to check; pass --catalog, --rates and/or --zones");
    }

    if let Some(path) = &args.catalog {
        let catalog = CatalogLoader::load_from_file(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        info!(
            "{}: {} products in {} categories",
            path.display(),
            catalog.entries().len(),
            catalog.categories().len()
        );
    }

    if let Some(path) = &args.rates {
        let schedule = RateScheduleLoader::load_from_file(path, args.minimum_investment)
            .with_context(|| format!("Failed to load profit rates: {}", path.display()))?;
        info!("{}: {} years of profit rates", path.display(), schedule.rates.len());
    }

    if let Some(path) = &args.zones {
        let zones = DeliveryZoneLoader::load_from_file(path)
            .with_context(|| format!("Failed to load delivery zones: {}", path.display()))?;
        info!("{}: {} delivery zones", path.display(), zones.len());
    }

    Ok(())
}
