use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scheduling::ScheduleError;

/// A bookable hour, always on the hour boundary. Displays as `HH:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    hour: u32,
}

impl TimeSlot {
    /// Returns `None` if `hour` is not a valid hour of the day.
    pub fn new(hour: u32) -> Option<Self> {
        (hour < 24).then_some(Self { hour })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:02}:00", self.hour)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeSlotParseError {
    #[error("time slot must look like HH:00, got '{0}'")]
    Format(String),

    #[error("hour must be between 0 and 23, got {0}")]
    HourOutOfRange(u32),
}

impl FromStr for TimeSlot {
    type Err = TimeSlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minutes) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| TimeSlotParseError::Format(s.to_string()))?;
        if minutes != "00" || hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeSlotParseError::Format(s.to_string()));
        }
        let hour: u32 = hour
            .parse()
            .map_err(|_| TimeSlotParseError::Format(s.to_string()))?;
        TimeSlot::new(hour).ok_or(TimeSlotParseError::HourOutOfRange(hour))
    }
}

/// Daily booking window; both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl SlotWindow {
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidWindow`] if the window ends before it
    /// starts or runs past 23:00.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.start_hour > self.end_hour || self.end_hour > 23 {
            return Err(ScheduleError::InvalidWindow {
                start_hour: self.start_hour,
                end_hour: self.end_hour,
            });
        }
        Ok(())
    }

    /// Every slot in the window, ascending.
    pub fn slots(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        (self.start_hour..=self.end_hour).filter_map(TimeSlot::new)
    }
}

impl Default for SlotWindow {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 18,
        }
    }
}
