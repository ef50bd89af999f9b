use std::time::Duration;

use tracing::warn;

use crate::args::{
    DEFAULT_BODY, DEFAULT_DELAY_SECONDS, DEFAULT_HEADERS_TEXT, DEFAULT_PARAMS_TEXT,
    DEFAULT_REPEAT_COUNT, DEFAULT_TIMEOUT, DEFAULT_URL, HttpMethod, VolleyArgs,
};

use super::types::{ConfigFile, SessionConfig};

/// Resolves the effective session defaults: CLI over config file over
/// hardcoded fallbacks. Out-of-range file values are replaced by the
/// fallback with a warning; resolution itself never fails, so a broken
/// config cannot abort startup.
#[must_use]
pub fn resolve_session(args: &VolleyArgs, file: Option<&ConfigFile>) -> SessionConfig {
    let request = file.and_then(|file| file.request.as_ref());
    let execution = file.and_then(|file| file.execution.as_ref());

    let url = args
        .url
        .clone()
        .or_else(|| request.and_then(|section| section.url.clone()))
        .unwrap_or_else(|| DEFAULT_URL.to_owned());

    let method: HttpMethod = args
        .method
        .or_else(|| request.and_then(|section| section.method))
        .unwrap_or_default();

    let params_text = args
        .params
        .clone()
        .or_else(|| request.and_then(|section| section.params.clone()))
        .unwrap_or_else(|| DEFAULT_PARAMS_TEXT.to_owned());

    let headers_text = args
        .headers_text()
        .or_else(|| request.and_then(|section| section.headers.clone()))
        .unwrap_or_else(|| DEFAULT_HEADERS_TEXT.to_owned());

    let body = args
        .data
        .clone()
        .or_else(|| request.and_then(|section| section.body.clone()))
        .unwrap_or_else(|| DEFAULT_BODY.to_owned());

    let repeat_count = args
        .repeat
        .or_else(|| resolve_file_repeat(execution.and_then(|section| section.repeat_count)))
        .unwrap_or(DEFAULT_REPEAT_COUNT);

    let delay = args
        .delay
        .or_else(|| resolve_file_delay(execution.and_then(|section| section.delay_seconds)))
        .unwrap_or_else(fallback_delay);

    let timeout = args.timeout.unwrap_or(DEFAULT_TIMEOUT);

    SessionConfig {
        url,
        method,
        params_text,
        headers_text,
        body,
        repeat_count,
        delay,
        timeout,
    }
}

fn resolve_file_repeat(value: Option<u32>) -> Option<u32> {
    match value {
        Some(0) => {
            warn!(
                "Config repeat_count 0 is invalid; using default {}.",
                DEFAULT_REPEAT_COUNT
            );
            None
        }
        Some(count) => Some(count),
        None => None,
    }
}

fn resolve_file_delay(value: Option<f64>) -> Option<Duration> {
    let seconds = value?;
    match Duration::try_from_secs_f64(seconds) {
        Ok(delay) => Some(delay),
        Err(_) => {
            warn!(
                "Config delay_seconds {} is invalid; using default {}s.",
                seconds, DEFAULT_DELAY_SECONDS
            );
            None
        }
    }
}

fn fallback_delay() -> Duration {
    Duration::try_from_secs_f64(DEFAULT_DELAY_SECONDS).unwrap_or(Duration::from_secs(1))
}
