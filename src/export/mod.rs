//! Calendar export of scheduled dates.

pub mod ics;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::schedule::{CalendarDate, FrequencyPattern};

pub use ics::{build_export, build_export_with, CalendarExport};

pub const CALENDAR_MIME_TYPE: &str = "text/calendar";
pub const CALENDAR_EXTENSION: &str = "ics";
pub const DEFAULT_FILE_PREFIX: &str = "microdosing";

/// Fixed labels written into every export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub product_id: String,
    pub summary: String,
    pub uid_domain: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            product_id: "-//Magic Bar//Microdose Scheduler//EN".into(),
            summary: "Microdose (Magic Bar)".into(),
            uid_domain: "magicbar.co".into(),
        }
    }
}

impl From<&Config> for ExportSettings {
    fn from(config: &Config) -> Self {
        Self {
            product_id: config.product_id.clone(),
            summary: config.summary.clone(),
            uid_domain: config.uid_domain.clone(),
        }
    }
}

/// A calendar export paired with the name and MIME type it is offered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub calendar: CalendarExport,
}

/// Download name such as `microdosing-2025-01-01-two_per_week.ics`.
pub fn export_filename(prefix: &str, start: &CalendarDate, pattern: FrequencyPattern) -> String {
    format!(
        "{}-{}-{}.{}",
        prefix,
        start.key(),
        pattern.id(),
        CALENDAR_EXTENSION
    )
}
