//! Schedule types: date spans, working-day sets, and daily time ranges.

use std::collections::BTreeSet;
use std::str::FromStr;

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WizardError};

/// Day of the week a recurring project can run on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Maps a calendar date's weekday into this set's representation.
    pub fn from_civil(weekday: jiff::civil::Weekday) -> Self {
        match weekday {
            jiff::civil::Weekday::Monday => Weekday::Monday,
            jiff::civil::Weekday::Tuesday => Weekday::Tuesday,
            jiff::civil::Weekday::Wednesday => Weekday::Wednesday,
            jiff::civil::Weekday::Thursday => Weekday::Thursday,
            jiff::civil::Weekday::Friday => Weekday::Friday,
            jiff::civil::Weekday::Saturday => Weekday::Saturday,
            jiff::civil::Weekday::Sunday => Weekday::Sunday,
        }
    }

    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Invalid weekday: {s}")),
        }
    }
}

/// When the project work happens: a single continuous date span, or a
/// date range crossed with a subset of weekdays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schedule {
    /// One continuous span from `start` through `end` (inclusive).
    OneTime { start: Date, end: Date },
    /// A date range where work occurs only on the listed weekdays.
    Recurring {
        start: Date,
        end: Date,
        days: BTreeSet<Weekday>,
    },
}

impl Schedule {
    /// Creates a one-time schedule. The end date must not precede the start.
    pub fn one_time(start: Date, end: Date) -> Result<Self> {
        if end < start {
            return Err(WizardError::invalid_input(
                "end_date",
                "End date must not precede the start date",
            ));
        }
        Ok(Schedule::OneTime { start, end })
    }

    /// Creates a recurring schedule over a date range and working-day set.
    pub fn recurring(start: Date, end: Date, days: BTreeSet<Weekday>) -> Result<Self> {
        if end < start {
            return Err(WizardError::invalid_input(
                "end_date",
                "End date must not precede the start date",
            ));
        }
        Ok(Schedule::Recurring { start, end, days })
    }

    /// The first calendar day of the schedule.
    pub fn start(&self) -> Date {
        match self {
            Schedule::OneTime { start, .. } | Schedule::Recurring { start, .. } => *start,
        }
    }

    /// The last calendar day of the schedule (inclusive).
    pub fn end(&self) -> Date {
        match self {
            Schedule::OneTime { end, .. } | Schedule::Recurring { end, .. } => *end,
        }
    }

    /// Working-day set for recurring schedules, empty otherwise.
    pub fn working_days(&self) -> Option<&BTreeSet<Weekday>> {
        match self {
            Schedule::OneTime { .. } => None,
            Schedule::Recurring { days, .. } => Some(days),
        }
    }
}

/// A validated daily working window where the end is strictly after the
/// start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    start: Time,
    end: Time,
}

impl TimeRange {
    /// Creates a time range; the end must be strictly after the start.
    pub fn new(start: Time, end: Time) -> Result<Self> {
        if end <= start {
            return Err(WizardError::invalid_input(
                "end_time",
                "End time must be strictly after the start time",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    /// Length of the daily window in fractional hours.
    pub fn daily_hours(&self) -> f64 {
        crate::estimate::daily_hours(self.start, self.end)
    }
}

/// In-progress edit of a daily time window.
///
/// Setting a bound that would invert the range clears the conflicting
/// opposite bound instead of rejecting the edit, so the pair never holds
/// `end <= start`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeRangeEdit {
    start: Option<Time>,
    end: Option<Time>,
}

impl TimeRangeEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<Time> {
        self.start
    }

    pub fn end(&self) -> Option<Time> {
        self.end
    }

    /// Sets the start bound, clearing the end bound if it no longer follows.
    pub fn set_start(&mut self, start: Time) {
        if let Some(end) = self.end {
            if end <= start {
                self.end = None;
            }
        }
        self.start = Some(start);
    }

    /// Sets the end bound, clearing the start bound if it no longer precedes.
    pub fn set_end(&mut self, end: Time) {
        if let Some(start) = self.start {
            if end <= start {
                self.start = None;
            }
        }
        self.end = Some(end);
    }

    /// Finishes the edit, yielding a validated range once both bounds exist.
    pub fn finish(self) -> Option<TimeRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => TimeRange::new(start, end).ok(),
            _ => None,
        }
    }
}
