//! End-to-end flows across the public API, one per storefront page.

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal_macros::dec;
use sugarret_core::{
    Cart, CartError, Catalog, DeliveryChecker, MeetingRequest, MeetingType, ProfitRateSchedule,
    ReturnCalculator, SlotScheduler, available_dates, compute_returns, time_slots,
};

fn at(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

#[test]
fn investment_table_matches_published_figures() {
    let calculator = ReturnCalculator::new(ProfitRateSchedule::default());

    let rows = calculator.project(dec!(5000), 3).unwrap();
    let profits: Vec<_> = rows.iter().map(|row| row.details.yearly_profit).collect();

    assert_eq!(profits, vec![dec!(600), dec!(700), dec!(800)]);
    assert_eq!(calculator.roi(dec!(5000), 3).unwrap(), dec!(42));
}

#[test]
fn clamped_rate_matches_last_published_rate() {
    let schedule = ProfitRateSchedule::default();

    for years in 6..=12 {
        let details = compute_returns(dec!(1000), years, &schedule.rates).unwrap();
        assert_eq!(details.yearly_profit, dec!(200));
    }
}

#[test]
fn meeting_booked_from_generated_slots_is_confirmed() {
    // Saturday morning: the first offered date is Monday 2025-01-06.
    let now = at(2025, 1, 4, 11, 0);
    let scheduler = SlotScheduler::default();

    let dates = available_dates(5, now).unwrap();
    let slots = time_slots(dates[0], now);
    let request = MeetingRequest {
        date: Some(dates[0]),
        time: Some(slots[0]),
        meeting_type: MeetingType::Video,
        name: "Kwame".to_string(),
        email: "kwame@example.org".to_string(),
        ..Default::default()
    };

    let confirmed = request.validate(&scheduler, now).unwrap();

    assert_eq!(confirmed.summary(), "Video Call on 2025-01-06 at 09:00 (45 minutes)");
}

#[test]
fn order_flow_from_catalog_to_checkout() {
    let catalog = Catalog::default();
    let mut cart = Cart::new();

    cart.add_item(catalog.find("1").unwrap());
    cart.add_item(catalog.find("6").unwrap());
    cart.add_item(catalog.find("1").unwrap());
    cart.change_quantity("6", -1);

    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total(), dec!(30));

    let confirmation = cart.checkout().unwrap();
    assert_eq!(confirmation.total, dec!(30));
    assert_eq!(cart.checkout(), Err(CartError::Empty));
}

#[test]
fn delivery_quotes_are_reproducible_for_a_seed() {
    let checker = DeliveryChecker::default();

    let quotes: Vec<_> = (0..3)
        .map(|_| checker.check("Spintex Road", &mut StdRng::seed_from_u64(7)).unwrap())
        .collect();

    assert!(quotes.windows(2).all(|pair| pair[0] == pair[1]));
}
