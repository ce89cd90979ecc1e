use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unsupported domain key: {key} (expected 1, 2, 3 or 4)")]
    UnsupportedDomain { key: i64 },

    #[error("Invalid date for {what}: day {day}, month {month}")]
    InvalidDate { what: &'static str, day: u8, month: u8 },

    #[error("Simulation period ends ({end}) before it starts ({start})")]
    InvertedPeriod { start: String, end: String },

    #[error("Invalid parameter: {what} = {value} (must be positive)")]
    NonPositive { what: &'static str, value: u32 },

    #[error("Invalid label '{label}': {reason}")]
    InvalidLabel { label: String, reason: &'static str },
}
