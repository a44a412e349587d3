//! Investor meeting requests.
//!
//! A request is confirmed only when it names a bookable slot: a business day
//! no earlier than today, at an hour the [`SlotScheduler`] still offers.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{MeetingType, TimeSlot};
use crate::scheduling::{SlotScheduler, is_business_day};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeetingError {
    #[error("please select a date and time for your meeting")]
    MissingSlot,

    #[error("please enter your name")]
    MissingName,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("{0} is in the past")]
    DateInPast(NaiveDate),

    #[error("{0} is not a business day")]
    NotBusinessDay(NaiveDate),

    #[error("{time} is not available on {date}")]
    SlotUnavailable { date: NaiveDate, time: TimeSlot },

    #[error("investment amount must be non-negative, got {0}")]
    NegativeInvestment(Decimal),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub meeting_type: MeetingType,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub investment_amount: Option<Decimal>,
    pub message: String,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedMeeting {
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub meeting_type: MeetingType,
    pub name: String,
    pub email: String,
}

impl ConfirmedMeeting {
    pub fn summary(&self) -> String {
        format!(
            "{} on {} at {} ({} minutes)",
            self.meeting_type.title(),
            self.date,
            self.time,
            self.meeting_type.duration_minutes()
        )
    }
}

impl MeetingRequest {
    /// Checks the request against `scheduler` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns the first [`MeetingError`] found, checking the slot selection
    /// before the contact details.
    pub fn validate(
        &self,
        scheduler: &SlotScheduler,
        now: NaiveDateTime,
    ) -> Result<ConfirmedMeeting, MeetingError> {
        let (Some(date), Some(time)) = (self.date, self.time) else {
            warn!("meeting request without a date and time");
            return Err(MeetingError::MissingSlot);
        };

        if date < now.date() {
            return Err(MeetingError::DateInPast(date));
        }
        if !is_business_day(date) {
            return Err(MeetingError::NotBusinessDay(date));
        }
        if !scheduler.time_slots(date, now).contains(&time) {
            return Err(MeetingError::SlotUnavailable { date, time });
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(MeetingError::MissingName);
        }
        let email = self.email.trim();
        if !EMAIL_PATTERN.is_match(email) {
            return Err(MeetingError::InvalidEmail(self.email.clone()));
        }
        if let Some(amount) = self.investment_amount.filter(|amount| *amount < Decimal::ZERO) {
            return Err(MeetingError::NegativeInvestment(amount));
        }

        info!(%date, %time, meeting_type = self.meeting_type.as_str(), "meeting request accepted");
        Ok(ConfirmedMeeting {
            date,
            time,
            meeting_type: self.meeting_type,
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(
        year: i32,
        month: u32,
        day: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn slot(hour: u32) -> TimeSlot {
        TimeSlot::new(hour).unwrap()
    }

    // Wednesday 2025-01-01, 14:30
    fn now() -> NaiveDateTime {
        date(2025, 1, 1).and_hms_opt(14, 30, 0).unwrap()
    }

    fn request() -> MeetingRequest {
        MeetingRequest {
            date: Some(date(2025, 1, 2)),
            time: Some(slot(10)),
            meeting_type: MeetingType::Office,
            name: "Ama Mensah".to_string(),
            email: "ama@example.com".to_string(),
            investment_amount: Some(dec!(10000)),
            ..Default::default()
        }
    }

    fn validate(request: &MeetingRequest) -> Result<ConfirmedMeeting, MeetingError> {
        request.validate(&SlotScheduler::default(), now())
    }

    #[test]
    fn valid_request_is_confirmed() {
        let confirmed = validate(&request()).unwrap();

        assert_eq!(confirmed.date, date(2025, 1, 2));
        assert_eq!(confirmed.time, slot(10));
        assert_eq!(confirmed.summary(), "Office Visit on 2025-01-02 at 10:00 (60 minutes)");
    }

    #[test]
    fn missing_time_is_rejected() {
        let request = MeetingRequest {
            time: None,
            ..request()
        };

        assert_eq!(validate(&request), Err(MeetingError::MissingSlot));
    }

    #[test]
    fn missing_date_is_rejected() {
        let request = MeetingRequest {
            date: None,
            ..request()
        };

        assert_eq!(validate(&request), Err(MeetingError::MissingSlot));
    }

    #[test]
    fn past_date_is_rejected() {
        let request = MeetingRequest {
            date: Some(date(2024, 12, 31)),
            ..request()
        };

        assert_eq!(validate(&request), Err(MeetingError::DateInPast(date(2024, 12, 31))));
    }

    #[test]
    fn weekend_date_is_rejected() {
        let request = MeetingRequest {
            date: Some(date(2025, 1, 4)),
            ..request()
        };

        assert_eq!(validate(&request), Err(MeetingError::NotBusinessDay(date(2025, 1, 4))));
    }

    #[test]
    fn elapsed_hour_today_is_rejected() {
        let request = MeetingRequest {
            date: Some(date(2025, 1, 1)),
            time: Some(slot(14)),
            ..request()
        };

        assert_eq!(
            validate(&request),
            Err(MeetingError::SlotUnavailable {
                date: date(2025, 1, 1),
                time: slot(14),
            })
        );
    }

    #[test]
    fn later_hour_today_is_accepted() {
        let request = MeetingRequest {
            date: Some(date(2025, 1, 1)),
            time: Some(slot(15)),
            ..request()
        };

        assert!(validate(&request).is_ok());
    }

    #[test]
    fn hour_outside_window_is_rejected() {
        let request = MeetingRequest {
            time: Some(slot(20)),
            ..request()
        };

        assert!(matches!(validate(&request), Err(MeetingError::SlotUnavailable { .. })));
    }

    #[test]
    fn blank_name_is_rejected() {
        let request = MeetingRequest {
            name: "  ".to_string(),
            ..request()
        };

        assert_eq!(validate(&request), Err(MeetingError::MissingName));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let request = MeetingRequest {
            email: "ama.example.com".to_string(),
            ..request()
        };

        assert_eq!(
            validate(&request),
            Err(MeetingError::InvalidEmail("ama.example.com".to_string()))
        );
    }

    #[test]
    fn negative_investment_is_rejected() {
        let request = MeetingRequest {
            investment_amount: Some(dec!(-5)),
            ..request()
        };

        assert_eq!(validate(&request), Err(MeetingError::NegativeInvestment(dec!(-5))));
    }
}
