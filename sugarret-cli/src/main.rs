use std::io;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use sugarret_core::{MeetingRequest, MeetingType, OrderType, RandomSource, TimeSlot, parse_date};
use tracing::debug;

use sugarret_cli::{
    commands,
    config::SiteConfig,
    logging,
    session::{OrderAction, OrderSession},
    storefront::Storefront,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Sugarret storefront: investment returns, meetings, delivery and orders.
#[derive(Debug, Parser)]
#[command(name = "sugarret", version)]
struct Cli {
    /// Config file; defaults to ./sugarret.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Pretend the current local time is this (YYYY-MM-DDTHH:MM).
    #[arg(long, global = true, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Projected returns for an investment amount.
    Returns {
        /// Amount to invest, in cedis.
        #[arg(default_value = "5000")]
        amount: Decimal,

        /// Show details for a single holding period instead of the table.
        #[arg(long)]
        years: Option<u32>,
    },

    /// Upcoming business days available for meetings.
    Dates {
        /// Number of dates to list.
        #[arg(long)]
        count: Option<usize>,
    },

    /// Free meeting slots on a date.
    Slots {
        /// Date in YYYY-MM-DD form; defaults to today.
        #[arg(value_parser = parse_day)]
        date: Option<NaiveDate>,
    },

    /// Check whether we deliver to an address.
    Delivery {
        address: String,

        /// Seed for the availability simulation.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Build a cart from actions such as add:1 change:1:-1 remove:2.
    Order {
        actions: Vec<OrderAction>,

        #[arg(long = "type", default_value = "pickup", value_parser = parse_order_type)]
        order_type: OrderType,

        /// Delivery address; required to check out a delivery order.
        #[arg(long)]
        address: Option<String>,

        /// Place the order after applying the actions.
        #[arg(long)]
        checkout: bool,
    },

    /// Request an investor meeting.
    Meeting {
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,

        /// Slot in HH:00 form.
        #[arg(long)]
        time: Option<TimeSlot>,

        #[arg(long = "type", default_value = "video", value_parser = parse_meeting_type)]
        meeting_type: MeetingType,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        company: String,

        #[arg(long)]
        investment_amount: Option<Decimal>,

        #[arg(long, default_value = "")]
        message: String,
    },

    /// List the products on offer.
    Catalog,
}

fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").map_err(|e| e.to_string())
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn parse_order_type(s: &str) -> Result<OrderType, String> {
    OrderType::parse(s).ok_or_else(|| format!("'{s}' is not pickup or delivery"))
}

fn parse_meeting_type(s: &str) -> Result<MeetingType, String> {
    MeetingType::parse(s).ok_or_else(|| {
        let known: Vec<&str> = MeetingType::all().iter().map(MeetingType::as_str).collect();
        format!("'{s}' is not a meeting type; expected one of {}", known.join(", "))
    })
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = SiteConfig::load(cli.config.as_deref())?;
    let storefront = Storefront::from_config(&config)?;
    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());
    debug!(%now, "running command");

    let mut out = io::stdout().lock();
    match cli.command {
        Command::Returns { amount, years } => commands::returns(&storefront, amount, years, &mut out),
        Command::Dates { count } => commands::dates(&storefront, count, now, &mut out),
        Command::Slots { date } => {
            commands::slots(&storefront, date.unwrap_or(now.date()), now, &mut out)
        }
        Command::Delivery { address, seed } => {
            let mut rng: Box<dyn RandomSource> = match seed {
                Some(seed) => {
                    debug!(seed, "seeded delivery simulation");
                    Box::new(StdRng::seed_from_u64(seed))
                }
                None => Box::new(rand::rng()),
            };
            commands::delivery(&storefront, &address, rng.as_mut(), &mut out)
        }
        Command::Order {
            actions,
            order_type,
            address,
            checkout,
        } => {
            let mut session = OrderSession::new(order_type);
            session.address = address;
            commands::order(&storefront, &mut session, &actions, checkout, &mut out)
        }
        Command::Meeting {
            date,
            time,
            meeting_type,
            name,
            email,
            phone,
            company,
            investment_amount,
            message,
        } => {
            let request = MeetingRequest {
                date,
                time,
                meeting_type,
                name,
                email,
                phone,
                company,
                investment_amount,
                message,
            };
            commands::meeting(&storefront, &request, now, &mut out)
        }
        Command::Catalog => commands::catalog(&storefront, &mut out),
    }
}
