use thiserror::Error;

/// Error type shared by the planner library.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid date `{0}` (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("nothing to export: the schedule has no dates or none of the marks match it")]
    NothingToExport,
}
