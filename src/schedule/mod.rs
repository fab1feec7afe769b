//! Date schedule generation and acknowledgement tracking.

pub mod date;
pub mod generator;
pub mod pattern;
pub mod tracker;

pub use date::CalendarDate;
pub use generator::{
    generate_schedule, generate_schedule_from_str, try_generate_schedule, Schedule,
};
pub use pattern::{FrequencyPattern, SCHEDULE_HORIZON_DAYS};
pub use tracker::AcknowledgementSet;
