//! Meeting date and time-slot generation.
//!
//! Candidate dates are business days (Monday to Friday) counted forward from
//! the reference date. Time slots cover a fixed daily window and, on the
//! reference date itself, start strictly after the current hour.
//!
//! The reference time is always supplied by the caller so that output depends
//! only on the arguments.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use thiserror::Error;
use tracing::debug;

use crate::models::{SlotWindow, TimeSlot};

/// Number of candidate dates the meeting page offers.
pub const DEFAULT_DATE_COUNT: usize = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("at least one date must be requested, got {0}")]
    InvalidCount(usize),

    #[error("slot window {start_hour}:00-{end_hour}:00 is invalid")]
    InvalidWindow { start_hour: u32, end_hour: u32 },

    #[error("'{0}' is not a date in YYYY-MM-DD form")]
    InvalidDate(String),

    #[error("ran out of calendar dates after {0}")]
    CalendarExhausted(NaiveDate),
}

/// Returns `true` for Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// ```
/// use chrono::NaiveDate;
/// use sugarret_core::parse_date;
///
/// assert_eq!(parse_date("2025-01-06").unwrap(), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
/// assert!(parse_date("06/01/2025").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(s.to_string()))
}

/// The next `count` business days starting at `now`'s date, inclusive.
///
/// Uses the default 09:00-18:00 window; see [`SlotScheduler`] to customise it.
pub fn available_dates(
    count: usize,
    now: NaiveDateTime,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    SlotScheduler::default().available_dates(count, now)
}

/// Hourly slots for `selected` in the default 09:00-18:00 window.
pub fn time_slots(
    selected: NaiveDate,
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    SlotScheduler::default().time_slots(selected, now)
}

/// Generates meeting dates and slots for a configurable daily window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotScheduler {
    window: SlotWindow,
}

impl SlotScheduler {
    /// Creates a scheduler for `window`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidWindow`] if the window ends before it
    /// starts or runs past 23:00.
    pub fn new(window: SlotWindow) -> Result<Self, ScheduleError> {
        window.validate()?;
        Ok(Self { window })
    }

    pub fn window(&self) -> SlotWindow {
        self.window
    }

    /// The next `count` business days, scanning one calendar day at a time
    /// from `now`'s date (inclusive).
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use sugarret_core::SlotScheduler;
    ///
    /// // 2025-01-04 is a Saturday.
    /// let now = NaiveDate::from_ymd_opt(2025, 1, 4).unwrap().and_hms_opt(10, 0, 0).unwrap();
    /// let dates = SlotScheduler::default().available_dates(2, now).unwrap();
    ///
    /// assert_eq!(dates[0].to_string(), "2025-01-06");
    /// assert_eq!(dates[1].to_string(), "2025-01-07");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidCount`] when `count` is zero.
    pub fn available_dates(
        &self,
        count: usize,
        now: NaiveDateTime,
    ) -> Result<Vec<NaiveDate>, ScheduleError> {
        if count == 0 {
            return Err(ScheduleError::InvalidCount(count));
        }

        let mut dates = Vec::with_capacity(count);
        let mut current = now.date();
        loop {
            if is_business_day(current) {
                dates.push(current);
                if dates.len() == count {
                    break;
                }
            }
            current = current
                .succ_opt()
                .ok_or(ScheduleError::CalendarExhausted(current))?;
        }

        debug!(count, first = %dates[0], "generated meeting dates");
        Ok(dates)
    }

    /// Hourly slots for `selected`, ascending.
    ///
    /// When `selected` is `now`'s date only hours strictly after the current
    /// hour remain. Every other date, including past ones, gets the full
    /// window.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use sugarret_core::SlotScheduler;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let now = day.and_hms_opt(14, 30, 0).unwrap();
    /// let slots: Vec<String> = SlotScheduler::default()
    ///     .time_slots(day, now)
    ///     .iter()
    ///     .map(ToString::to_string)
    ///     .collect();
    ///
    /// assert_eq!(slots, ["15:00", "16:00", "17:00", "18:00"]);
    /// ```
    pub fn time_slots(
        &self,
        selected: NaiveDate,
        now: NaiveDateTime,
    ) -> Vec<TimeSlot> {
        let is_today = selected == now.date();
        self.window
            .slots()
            .filter(|slot| !is_today || slot.hour() > now.hour())
            .collect()
    }
}
