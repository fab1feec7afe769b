use super::{AcknowledgementSet, CalendarDate, FrequencyPattern};
use crate::errors::PlannerError;

/// Chronologically ordered occurrences produced for one `(start, pattern)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pattern: FrequencyPattern,
    dates: Vec<CalendarDate>,
}

impl Schedule {
    /// A schedule with no occurrences, the "no dates yet" state.
    pub fn empty(pattern: FrequencyPattern) -> Self {
        Self {
            pattern,
            dates: Vec::new(),
        }
    }

    pub fn pattern(&self) -> FrequencyPattern {
        self.pattern
    }

    pub fn start(&self) -> Option<CalendarDate> {
        self.dates.first().copied()
    }

    pub fn dates(&self) -> &[CalendarDate] {
        &self.dates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalendarDate> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates are only ever built ascending by `generate_schedule`.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.dates.binary_search(date).is_ok()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        CalendarDate::parse(key)
            .map(|date| self.contains(&date))
            .unwrap_or(false)
    }

    /// Occurrences present in `acknowledged`, kept in schedule order.
    pub fn acknowledged(&self, acknowledged: &AcknowledgementSet) -> Vec<CalendarDate> {
        self.dates
            .iter()
            .filter(|date| acknowledged.contains_date(date))
            .copied()
            .collect()
    }

    pub fn into_dates(self) -> Vec<CalendarDate> {
        self.dates
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a CalendarDate;
    type IntoIter = std::slice::Iter<'a, CalendarDate>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}

/// Builds the schedule for `start` under `pattern`.
///
/// Occurrences are strictly increasing. A start so close to the end of the
/// supported calendar that the horizon overflows yields an empty schedule.
pub fn generate_schedule(start: CalendarDate, pattern: FrequencyPattern) -> Schedule {
    let count = pattern.occurrence_count();
    let mut dates = Vec::with_capacity(count);
    let mut current = start;

    for index in 0..count {
        dates.push(current);
        if index + 1 == count {
            break;
        }
        match current.checked_add_days(pattern.step_after(index)) {
            Some(next) => current = next,
            None => {
                tracing::warn!(%start, %pattern, "schedule horizon exceeds calendar range");
                return Schedule::empty(pattern);
            }
        }
    }

    tracing::debug!(%start, %pattern, occurrences = dates.len(), "generated schedule");
    Schedule { pattern, dates }
}

/// Strict variant that rejects unparseable dates and unknown pattern ids.
pub fn try_generate_schedule(start: &str, pattern: &str) -> Result<Schedule, PlannerError> {
    let start = CalendarDate::parse(start)?;
    let pattern: FrequencyPattern = pattern.parse()?;
    Ok(generate_schedule(start, pattern))
}

/// Permissive variant: invalid input produces an empty schedule instead of an error.
pub fn generate_schedule_from_str(start: &str, pattern: &str) -> Schedule {
    match try_generate_schedule(start, pattern) {
        Ok(schedule) => schedule,
        Err(err) => {
            tracing::warn!(start, pattern, error = %err, "returning empty schedule");
            Schedule::empty(FrequencyPattern::from_id(pattern).unwrap_or_default())
        }
    }
}
