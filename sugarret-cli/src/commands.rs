//! Renders each storefront page as plain text.
//!
//! Every command writes to the supplied writer and takes "now" and any
//! randomness from the caller, so the output is reproducible in tests.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sugarret_core::{
    DeliveryQuote, MeetingRequest, RandomSource,
    calculations::common::{as_percent, round_half_up},
};

use crate::session::{OrderAction, OrderSession};
use crate::storefront::Storefront;

/// Formats an amount in cedis with two decimals, e.g. `₵5600.00`.
pub fn money(amount: Decimal) -> String {
    format!("₵{:.2}", round_half_up(amount))
}

pub fn returns(
    storefront: &Storefront,
    amount: Decimal,
    years: Option<u32>,
    out: &mut impl Write,
) -> Result<()> {
    let calculator = &storefront.calculator;
    calculator.check_minimum(amount)?;

    if let Some(years) = years {
        let details = calculator.calculate(amount, years)?;
        let roi = calculator.roi(amount, years)?;
        writeln!(out, "Investment:      {}", money(amount))?;
        writeln!(out, "Holding period:  {years} year(s)")?;
        writeln!(out, "Final-year profit: {}", money(details.yearly_profit))?;
        writeln!(out, "Final-year return: {}", money(details.yearly_return))?;
        writeln!(out, "Total return:    {}", money(details.actual_return))?;
        writeln!(out, "ROI:             {}%", round_half_up(roi))?;
        return Ok(());
    }

    writeln!(out, "Projected returns on {}", money(amount))?;
    writeln!(out, "{:<6} {:>6} {:>14} {:>14}", "Years", "Rate", "Profit", "Total")?;
    for row in calculator.project(amount, storefront.projection_years)? {
        writeln!(
            out,
            "{:<6} {:>5}% {:>14} {:>14}",
            row.years,
            as_percent(row.rate),
            money(row.details.yearly_profit),
            money(row.details.actual_return)
        )?;
    }
    Ok(())
}

pub fn dates(
    storefront: &Storefront,
    count: Option<usize>,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> Result<()> {
    let count = count.unwrap_or(storefront.date_count);
    for date in storefront.scheduler.available_dates(count, now)? {
        writeln!(out, "{}  {}", date, date.format("%a %d %b"))?;
    }
    Ok(())
}

pub fn slots(
    storefront: &Storefront,
    date: NaiveDate,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> Result<()> {
    let slots = storefront.scheduler.time_slots(date, now);
    if slots.is_empty() {
        writeln!(out, "No time slots left on {date}")?;
        return Ok(());
    }
    for slot in slots {
        writeln!(out, "{slot}")?;
    }
    Ok(())
}

pub fn delivery(
    storefront: &Storefront,
    address: &str,
    rng: &mut dyn RandomSource,
    out: &mut impl Write,
) -> Result<()> {
    match storefront.delivery.check(address, rng)? {
        DeliveryQuote::Available { zone, fee, eta } => {
            writeln!(out, "Delivery available to your area!")?;
            writeln!(out, "Zone: {zone}")?;
            writeln!(out, "Fee:  {}", money(fee))?;
            writeln!(out, "Time: {eta}")?;
        }
        DeliveryQuote::Unavailable => {
            writeln!(out, "Sorry, we don't deliver to this area yet.")?;
        }
    }
    Ok(())
}

pub fn order(
    storefront: &Storefront,
    session: &mut OrderSession,
    actions: &[OrderAction],
    checkout: bool,
    out: &mut impl Write,
) -> Result<()> {
    for action in actions {
        session.apply(&storefront.catalog, action)?;
    }

    writeln!(out, "Your order ({})", session.order_type.as_str())?;
    for item in session.cart.items() {
        writeln!(
            out,
            "  {:<24} {:>3} x {:>8} = {:>10}",
            item.name,
            item.quantity,
            money(item.unit_price),
            money(item.line_total())
        )?;
    }
    writeln!(
        out,
        "Items: {}  Total: {}",
        session.cart.item_count(),
        money(session.cart.total())
    )?;

    if checkout {
        let receipt = session.checkout()?;
        writeln!(
            out,
            "Order placed successfully! {} item(s), {}. We'll contact you shortly.",
            receipt.confirmation.item_count,
            money(receipt.confirmation.total)
        )?;
        if let Some(address) = receipt.address {
            writeln!(out, "Delivering to: {address}")?;
        }
    }
    Ok(())
}

pub fn meeting(
    storefront: &Storefront,
    request: &MeetingRequest,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> Result<()> {
    let confirmed = request
        .validate(&storefront.scheduler, now)
        .context("Meeting request rejected")?;
    writeln!(
        out,
        "Thanks {}, your {} is requested. We'll confirm by email at {}.",
        confirmed.name,
        confirmed.summary(),
        confirmed.email
    )?;
    Ok(())
}

pub fn catalog(
    storefront: &Storefront,
    out: &mut impl Write,
) -> Result<()> {
    for category in storefront.catalog.categories() {
        writeln!(out, "{category}")?;
        for entry in storefront.catalog.in_category(category) {
            writeln!(
                out,
                "  [{}] {:<24} {:>8}  {}",
                entry.id,
                entry.name,
                money(entry.unit_price),
                entry.description
            )?;
        }
    }
    Ok(())
}
