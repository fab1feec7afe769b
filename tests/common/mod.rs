#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{TimeZone, Utc};
use microdose_planner::{time::FixedClock, CalendarDate};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated directory that survives until the test binary exits.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd(year, month, day).expect("valid date")
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 12, 30, 45).unwrap())
}

/// Every day from `from` through `to`, inclusive.
pub fn days_between(from: CalendarDate, to: CalendarDate) -> Vec<CalendarDate> {
    let mut days = Vec::new();
    let mut current = from;
    while current <= to {
        days.push(current);
        current = current.checked_add_days(1).expect("within range");
    }
    days
}
