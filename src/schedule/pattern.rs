use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::PlannerError;

/// Days from the start date covered by a schedule (six weeks).
pub const SCHEDULE_HORIZON_DAYS: u64 = 42;

const TWICE_WEEKLY_OCCURRENCES: usize = 12;

/// Recurrence rule selecting how occurrences are spaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyPattern {
    #[serde(rename = "every_other_day")]
    EveryOtherDay,
    #[default]
    #[serde(rename = "two_per_week")]
    TwiceWeekly,
}

impl FrequencyPattern {
    pub const ALL: [FrequencyPattern; 2] =
        [FrequencyPattern::EveryOtherDay, FrequencyPattern::TwiceWeekly];

    /// Stable identifier used in filenames and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            FrequencyPattern::EveryOtherDay => "every_other_day",
            FrequencyPattern::TwiceWeekly => "two_per_week",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrequencyPattern::EveryOtherDay => "Every other day",
            FrequencyPattern::TwiceWeekly => "2x per week",
        }
    }

    /// Number of occurrences a schedule for this pattern contains.
    pub fn occurrence_count(&self) -> usize {
        match self {
            FrequencyPattern::EveryOtherDay => (SCHEDULE_HORIZON_DAYS / 2 + 1) as usize,
            FrequencyPattern::TwiceWeekly => TWICE_WEEKLY_OCCURRENCES,
        }
    }

    /// Days to advance after the occurrence at `index` (zero based) to reach the next one.
    ///
    /// Twice weekly alternates +3 and +4 so each pair of sessions spans one week.
    pub fn step_after(&self, index: usize) -> u64 {
        match self {
            FrequencyPattern::EveryOtherDay => 2,
            FrequencyPattern::TwiceWeekly => {
                if index % 2 == 0 {
                    3
                } else {
                    4
                }
            }
        }
    }

    /// Resolves an identifier leniently: case-insensitive, `-` or `_`, plus a few aliases.
    pub fn from_id(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "every_other_day" | "everyotherday" | "eod" => Some(FrequencyPattern::EveryOtherDay),
            "two_per_week" | "twice_weekly" | "twiceweekly" | "2x" => {
                Some(FrequencyPattern::TwiceWeekly)
            }
            _ => None,
        }
    }
}

impl FromStr for FrequencyPattern {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| PlannerError::UnknownPattern(s.trim().to_string()))
    }
}

impl fmt::Display for FrequencyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for pattern in FrequencyPattern::ALL {
            assert_eq!(pattern.id().parse::<FrequencyPattern>().unwrap(), pattern);
        }
    }

    #[test]
    fn from_id_is_lenient() {
        assert_eq!(
            FrequencyPattern::from_id("Every-Other-Day"),
            Some(FrequencyPattern::EveryOtherDay)
        );
        assert_eq!(
            FrequencyPattern::from_id("twice_weekly"),
            Some(FrequencyPattern::TwiceWeekly)
        );
        assert_eq!(FrequencyPattern::from_id("weekly"), None);
    }

    #[test]
    fn unknown_pattern_reports_input() {
        let err = "monthly".parse::<FrequencyPattern>().unwrap_err();
        assert_eq!(err.to_string(), "unknown pattern `monthly`");
    }

    #[test]
    fn twice_weekly_steps_alternate() {
        let steps: Vec<u64> = (0..4)
            .map(|idx| FrequencyPattern::TwiceWeekly.step_after(idx))
            .collect();
        assert_eq!(steps, vec![3, 4, 3, 4]);
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&FrequencyPattern::TwiceWeekly).unwrap();
        assert_eq!(json, "\"two_per_week\"");
        let parsed: FrequencyPattern = serde_json::from_str("\"every_other_day\"").unwrap();
        assert_eq!(parsed, FrequencyPattern::EveryOtherDay);
    }
}
