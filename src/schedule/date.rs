use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::PlannerError;

const KEY_FORMAT: &str = "%Y-%m-%d";
const COMPACT_FORMAT: &str = "%Y%m%d";
const LABEL_FORMAT: &str = "%a, %b %-d";

/// A date-only occurrence. Equality and ordering follow the `(year, month, day)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the canonical `YYYY-MM-DD` form, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, PlannerError> {
        let trimmed = input.trim();
        NaiveDate::parse_from_str(trimmed, KEY_FORMAT)
            .map(Self)
            .map_err(|_| PlannerError::InvalidDate(trimmed.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns `None` when the result falls outside the supported calendar range.
    pub fn checked_add_days(self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    /// The tracker key, `YYYY-MM-DD`.
    pub fn key(&self) -> String {
        self.0.format(KEY_FORMAT).to_string()
    }

    /// The iCalendar DATE form, `YYYYMMDD`.
    pub fn compact(&self) -> String {
        self.0.format(COMPACT_FORMAT).to_string()
    }

    /// Short display label such as `Wed, Jan 1`.
    pub fn label(&self) -> String {
        self.0.format(LABEL_FORMAT).to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for CalendarDate {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}
