#![doc(test(attr(deny(warnings))))]

//! Microdose Planner builds six-week dosing schedules, tracks which sessions
//! were taken, and exports them as all-day calendar events.

pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod planner;
pub mod schedule;
pub mod time;
pub mod utils;

pub use errors::PlannerError;
pub use export::{build_export, CalendarExport};
pub use planner::DosePlanner;
pub use schedule::{generate_schedule, AcknowledgementSet, CalendarDate, FrequencyPattern, Schedule};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log. Safe to call repeatedly.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Microdose Planner tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
