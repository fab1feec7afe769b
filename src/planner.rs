//! Planner session tying the generator, tracker and exporter together.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::PlannerError,
    export::{
        build_export_with, export_filename, ExportArtifact, ExportSettings, CALENDAR_MIME_TYPE,
        DEFAULT_FILE_PREFIX,
    },
    schedule::{generate_schedule, AcknowledgementSet, CalendarDate, FrequencyPattern, Schedule},
    time::Clock,
};

/// What happens to acknowledgements when the schedule is regenerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcknowledgementPolicy {
    /// Marks survive even if their date left the schedule.
    #[default]
    Keep,
    /// Marks outside the new schedule are dropped.
    Reconcile,
    /// All marks are cleared.
    Reset,
}

impl AcknowledgementPolicy {
    pub const ALL: [AcknowledgementPolicy; 3] = [
        AcknowledgementPolicy::Keep,
        AcknowledgementPolicy::Reconcile,
        AcknowledgementPolicy::Reset,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AcknowledgementPolicy::Keep => "keep",
            AcknowledgementPolicy::Reconcile => "reconcile",
            AcknowledgementPolicy::Reset => "reset",
        }
    }
}

impl FromStr for AcknowledgementPolicy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(AcknowledgementPolicy::Keep),
            "reconcile" => Ok(AcknowledgementPolicy::Reconcile),
            "reset" => Ok(AcknowledgementPolicy::Reset),
            other => Err(PlannerError::InvalidConfig(format!(
                "unknown acknowledgement policy `{}` (keep, reconcile, reset)",
                other
            ))),
        }
    }
}

impl fmt::Display for AcknowledgementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One displayable schedule line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub date: CalendarDate,
    pub key: String,
    pub label: String,
    pub acknowledged: bool,
}

/// A single user session: start date, pattern, the derived schedule and its marks.
#[derive(Debug, Clone)]
pub struct DosePlanner {
    start: Option<CalendarDate>,
    pattern: FrequencyPattern,
    schedule: Schedule,
    acknowledged: AcknowledgementSet,
    policy: AcknowledgementPolicy,
    settings: ExportSettings,
    file_prefix: String,
}

impl DosePlanner {
    pub fn new(start: CalendarDate, pattern: FrequencyPattern) -> Self {
        Self {
            start: Some(start),
            pattern,
            schedule: generate_schedule(start, pattern),
            acknowledged: AcknowledgementSet::new(),
            policy: AcknowledgementPolicy::default(),
            settings: ExportSettings::default(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }

    /// Starts today with the configured default pattern, labels and policy.
    pub fn from_config(config: &Config, clock: &dyn Clock) -> Self {
        let mut planner = Self::new(CalendarDate::new(clock.today()), config.default_pattern);
        planner.apply_config(config);
        planner
    }

    /// Refreshes export labels and policy without touching the schedule.
    pub fn apply_config(&mut self, config: &Config) {
        self.policy = config.acknowledgement_policy;
        self.settings = ExportSettings::from(config);
        self.file_prefix = config.file_prefix.clone();
    }

    pub fn with_policy(mut self, policy: AcknowledgementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn start(&self) -> Option<CalendarDate> {
        self.start
    }

    pub fn pattern(&self) -> FrequencyPattern {
        self.pattern
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn acknowledged(&self) -> &AcknowledgementSet {
        &self.acknowledged
    }

    pub fn policy(&self) -> AcknowledgementPolicy {
        self.policy
    }

    pub fn set_start(&mut self, start: CalendarDate) {
        self.start = Some(start);
        self.regenerate();
    }

    /// Accepts raw picker input; an unparseable value leaves an empty schedule.
    pub fn set_start_input(&mut self, input: &str) -> Option<CalendarDate> {
        self.start = CalendarDate::parse(input).ok();
        if self.start.is_none() {
            tracing::warn!(input, "start date not recognised");
        }
        self.regenerate();
        self.start
    }

    pub fn set_pattern(&mut self, pattern: FrequencyPattern) {
        self.pattern = pattern;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.schedule = match self.start {
            Some(start) => generate_schedule(start, self.pattern),
            None => Schedule::empty(self.pattern),
        };
        match self.policy {
            AcknowledgementPolicy::Keep => {}
            AcknowledgementPolicy::Reconcile => {
                let dropped = self.acknowledged.retain_scheduled(&self.schedule);
                tracing::debug!(dropped, "reconciled acknowledgements");
            }
            AcknowledgementPolicy::Reset => self.acknowledged.clear(),
        }
    }

    /// Flips the mark for `key`, returning whether it is now marked.
    pub fn toggle(&mut self, key: &str) -> bool {
        self.acknowledged.toggle(key.trim())
    }

    /// Flips the mark for the occurrence at `index` (zero based).
    pub fn toggle_index(&mut self, index: usize) -> Option<bool> {
        let date = *self.schedule.dates().get(index)?;
        Some(self.acknowledged.toggle_date(&date))
    }

    pub fn clear_acknowledged(&mut self) {
        self.acknowledged.clear();
    }

    /// Drops marks that are not part of the current schedule.
    pub fn reconcile(&mut self) -> usize {
        self.acknowledged.retain_scheduled(&self.schedule)
    }

    pub fn rows(&self) -> Vec<ScheduleRow> {
        self.schedule
            .iter()
            .map(|date| ScheduleRow {
                date: *date,
                key: date.key(),
                label: date.label(),
                acknowledged: self.acknowledged.contains_date(date),
            })
            .collect()
    }

    /// Marked occurrences in schedule order, or the whole schedule when nothing is marked.
    pub fn export_dates(&self) -> Vec<CalendarDate> {
        if self.acknowledged.is_empty() {
            self.schedule.dates().to_vec()
        } else {
            self.schedule.acknowledged(&self.acknowledged)
        }
    }

    pub fn filename(&self) -> Option<String> {
        self.start
            .map(|start| export_filename(&self.file_prefix, &start, self.pattern))
    }

    /// Builds the downloadable artifact, or `None` when there is nothing to export.
    pub fn export(&self, clock: &dyn Clock) -> Option<ExportArtifact> {
        let dates = self.export_dates();
        let calendar = build_export_with(&dates, &self.settings, clock)?;
        let filename = self.filename()?;
        Some(ExportArtifact {
            filename,
            mime_type: CALENDAR_MIME_TYPE,
            calendar,
        })
    }

    pub fn try_export(&self, clock: &dyn Clock) -> Result<ExportArtifact, PlannerError> {
        self.export(clock).ok_or(PlannerError::NothingToExport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap())
    }

    #[test]
    fn export_falls_back_to_full_schedule() {
        let planner = DosePlanner::new(date(2025, 1, 1), FrequencyPattern::TwiceWeekly);
        assert_eq!(planner.export_dates(), planner.schedule().dates().to_vec());
    }

    #[test]
    fn export_uses_marks_in_schedule_order() {
        let mut planner = DosePlanner::new(date(2025, 1, 1), FrequencyPattern::TwiceWeekly);
        planner.toggle("2025-01-11");
        planner.toggle("2025-01-04");
        assert_eq!(
            planner.export_dates(),
            vec![date(2025, 1, 4), date(2025, 1, 11)]
        );
    }

    #[test]
    fn stale_marks_only_are_an_empty_export() {
        let mut planner = DosePlanner::new(date(2025, 1, 1), FrequencyPattern::TwiceWeekly);
        planner.toggle("2024-12-31");
        assert!(planner.export_dates().is_empty());
        assert!(planner.export(&clock()).is_none());
        assert!(matches!(
            planner.try_export(&clock()),
            Err(PlannerError::NothingToExport)
        ));
    }

    #[test]
    fn invalid_start_input_empties_schedule() {
        let mut planner = DosePlanner::new(date(2025, 1, 1), FrequencyPattern::TwiceWeekly);
        assert_eq!(planner.set_start_input("soon"), None);
        assert!(planner.schedule().is_empty());
        assert!(planner.rows().is_empty());
        assert!(planner.export(&clock()).is_none());
    }

    #[test]
    fn policies_control_marks_on_regeneration() {
        let mut keep = DosePlanner::new(date(2025, 1, 1), FrequencyPattern::TwiceWeekly);
        keep.toggle("2025-01-04");
        keep.set_pattern(FrequencyPattern::EveryOtherDay);
        assert!(keep.acknowledged().contains("2025-01-04"));

        let mut reconcile = DosePlanner::new(date(2025, 1, 1), FrequencyPattern::TwiceWeekly)
            .with_policy(AcknowledgementPolicy::Reconcile);
        reconcile.toggle("2025-01-04");
        reconcile.toggle("2025-01-03");
        reconcile.set_pattern(FrequencyPattern::EveryOtherDay);
        assert!(!reconcile.acknowledged().contains("2025-01-04"));
        assert!(reconcile.acknowledged().contains("2025-01-03"));

        let mut reset = DosePlanner::new(date(2025, 1, 1), FrequencyPattern::TwiceWeekly)
            .with_policy(AcknowledgementPolicy::Reset);
        reset.toggle("2025-01-04");
        reset.set_start(date(2025, 1, 2));
        assert!(reset.acknowledged().is_empty());
    }

    #[test]
    fn toggle_index_marks_row() {
        let mut planner = DosePlanner::new(date(2025, 1, 1), FrequencyPattern::TwiceWeekly);
        assert_eq!(planner.toggle_index(1), Some(true));
        assert_eq!(planner.toggle_index(99), None);
        let rows = planner.rows();
        assert!(rows[1].acknowledged);
        assert_eq!(rows[1].label, "Sat, Jan 4");
    }

    #[test]
    fn export_artifact_carries_name_and_mime() {
        let planner = DosePlanner::new(date(2025, 1, 1), FrequencyPattern::EveryOtherDay);
        let artifact = planner.export(&clock()).unwrap();
        assert_eq!(
            artifact.filename,
            "microdosing-2025-01-01-every_other_day.ics"
        );
        assert_eq!(artifact.mime_type, "text/calendar");
        assert_eq!(artifact.calendar.event_count(), 22);
    }

    #[test]
    fn from_config_starts_today() {
        let mut config = Config::default();
        config.default_pattern = FrequencyPattern::EveryOtherDay;
        config.file_prefix = "plan".into();
        let planner = DosePlanner::from_config(&config, &clock());
        assert_eq!(planner.start(), Some(date(2025, 1, 1)));
        assert_eq!(
            planner.filename().as_deref(),
            Some("plan-2025-01-01-every_other_day.ics")
        );
    }
}
