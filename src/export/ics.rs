use chrono::{DateTime, Utc};

use super::ExportSettings;
use crate::schedule::CalendarDate;
use crate::time::{Clock, SystemClock};

const DTSTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const LINE_SEPARATOR: &str = "\n";

/// Calendar interchange text with one all-day event per input date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarExport {
    text: String,
    event_count: usize,
    generated_at: DateTime<Utc>,
}

impl CalendarExport {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// The `DTSTAMP` value shared by every event.
    pub fn dtstamp(&self) -> String {
        format_dtstamp(self.generated_at)
    }
}

/// Builds an export with default settings, stamped with the system clock.
///
/// Returns `None` for an empty input so no file is offered.
pub fn build_export(dates: &[CalendarDate]) -> Option<CalendarExport> {
    build_export_with(dates, &ExportSettings::default(), &SystemClock)
}

/// Builds an export with explicit settings and clock.
///
/// The clock is read once; all events carry the same `DTSTAMP`. Duplicate
/// dates still get distinct UIDs through the index suffix.
pub fn build_export_with(
    dates: &[CalendarDate],
    settings: &ExportSettings,
    clock: &dyn Clock,
) -> Option<CalendarExport> {
    if dates.is_empty() {
        tracing::debug!("export skipped, no dates");
        return None;
    }

    let generated_at = clock.now();
    let dtstamp = format_dtstamp(generated_at);

    let mut lines: Vec<String> = Vec::with_capacity(5 + dates.len() * 7);
    lines.push("BEGIN:VCALENDAR".into());
    lines.push("VERSION:2.0".into());
    lines.push(format!("PRODID:{}", settings.product_id));
    lines.push("CALSCALE:GREGORIAN".into());

    for (idx, date) in dates.iter().enumerate() {
        let start = date.compact();
        // Garbage in, garbage out: a date at the end of the range reuses its own day.
        let end = date.checked_add_days(1).unwrap_or(*date).compact();
        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:{}-{}@{}", start, idx, settings.uid_domain));
        lines.push(format!("DTSTAMP:{}", dtstamp));
        lines.push(format!("SUMMARY:{}", settings.summary));
        lines.push(format!("DTSTART;VALUE=DATE:{}", start));
        lines.push(format!("DTEND;VALUE=DATE:{}", end));
        lines.push("END:VEVENT".into());
    }

    lines.push("END:VCALENDAR".into());

    tracing::debug!(events = dates.len(), %dtstamp, "built calendar export");
    Some(CalendarExport {
        text: lines.join(LINE_SEPARATOR),
        event_count: dates.len(),
        generated_at,
    })
}

fn format_dtstamp(instant: DateTime<Utc>) -> String {
    instant.format(DTSTAMP_FORMAT).to_string()
}
