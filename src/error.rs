//! Errors raised when validating timer input

use thiserror::Error;

/// Upper bound for a single countdown: one week.
pub const MAX_DURATION_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Rejections produced by preset and custom-duration entry.
///
/// None of these change the timer: the operation that produced one is a no-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimerError {
    #[error("'{0}' is not a number of minutes")]
    InvalidDuration(String),

    #[error("duration must be positive, got {0} minutes")]
    NonPositiveDuration(f64),

    #[error("duration of {0} minutes exceeds the one week limit")]
    DurationTooLong(f64),

    #[error("preset must be at least one minute")]
    ZeroPreset,
}
