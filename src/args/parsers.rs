use std::time::Duration;

use crate::error::{AppError, AppResult, ValidationError};

pub(crate) fn parse_repeat_count(s: &str) -> AppResult<u32> {
    let value: u32 = s.trim().parse().map_err(|err| {
        AppError::validation(ValidationError::InvalidRepeatCount {
            value: s.to_owned(),
            source: err,
        })
    })?;
    if value == 0 {
        return Err(AppError::validation(ValidationError::RepeatCountZero));
    }
    Ok(value)
}

pub(crate) fn parse_delay_seconds(s: &str) -> AppResult<Duration> {
    let seconds: f64 = s.trim().parse().map_err(|err| {
        AppError::validation(ValidationError::InvalidDelay {
            value: s.to_owned(),
            source: err,
        })
    })?;
    delay_from_seconds(seconds)
}

/// Converts a fractional-seconds delay into a `Duration`, rejecting
/// negative and non-finite values.
pub(crate) fn delay_from_seconds(seconds: f64) -> AppResult<Duration> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| AppError::validation(ValidationError::DelayNegative))
}

pub(crate) fn parse_timeout_seconds(s: &str) -> AppResult<Duration> {
    let seconds: u64 = s.trim().parse().map_err(AppError::from)?;
    Ok(Duration::from_secs(seconds))
}
