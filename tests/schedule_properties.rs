mod common;

use chrono::Duration;
use common::{date, days_between};
use microdose_planner::schedule::{
    generate_schedule, generate_schedule_from_str, CalendarDate, FrequencyPattern,
};

fn sample_starts() -> Vec<CalendarDate> {
    // Covers a leap year, month ends and two year boundaries.
    days_between(date(2023, 12, 1), date(2025, 1, 31))
}

#[test]
fn twice_weekly_has_twelve_increasing_dates_from_start() {
    for start in sample_starts() {
        let schedule = generate_schedule(start, FrequencyPattern::TwiceWeekly);
        assert_eq!(schedule.len(), 12, "start {start}");
        assert_eq!(schedule.start(), Some(start));
        for (idx, pair) in schedule.dates().windows(2).enumerate() {
            let gap = pair[1].date() - pair[0].date();
            let expected = if idx % 2 == 0 { 3 } else { 4 };
            assert_eq!(gap, Duration::days(expected), "start {start} step {idx}");
        }
        let span = schedule.dates()[11].date() - start.date();
        assert_eq!(span, Duration::days(38));
    }
}

#[test]
fn every_other_day_covers_offsets_zero_through_forty_two() {
    for start in sample_starts() {
        let schedule = generate_schedule(start, FrequencyPattern::EveryOtherDay);
        assert_eq!(schedule.len(), 22, "start {start}");
        for (idx, occurrence) in schedule.iter().enumerate() {
            let offset = occurrence.date() - start.date();
            assert_eq!(offset, Duration::days(idx as i64 * 2));
        }
    }
}

#[test]
fn generation_is_deterministic() {
    for pattern in FrequencyPattern::ALL {
        let first = generate_schedule(date(2025, 3, 30), pattern);
        let second = generate_schedule(date(2025, 3, 30), pattern);
        assert_eq!(first, second);
    }
}

#[test]
fn every_other_day_crosses_into_february() {
    let schedule = generate_schedule_from_str("2025-01-01", "every_other_day");
    let keys: Vec<String> = schedule.iter().map(CalendarDate::key).collect();
    assert_eq!(keys.first().map(String::as_str), Some("2025-01-01"));
    assert_eq!(keys[15], "2025-01-31");
    assert_eq!(keys[16], "2025-02-02");
    assert_eq!(keys.last().map(String::as_str), Some("2025-02-12"));
}

#[test]
fn leap_day_is_scheduled() {
    let schedule = generate_schedule(date(2024, 2, 27), FrequencyPattern::EveryOtherDay);
    assert!(schedule.contains(&date(2024, 2, 29)));
    assert!(schedule.contains(&date(2024, 3, 2)));
}

#[test]
fn unparseable_start_gives_no_dates() {
    for input in ["", "01/02/2025", "2025-02-29", "yesterday"] {
        assert!(generate_schedule_from_str(input, "two_per_week").is_empty());
    }
}
