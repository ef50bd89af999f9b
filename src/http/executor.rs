use reqwest::Client;
use tokio::time::Instant;

use crate::events::RunResult;

use super::request::RequestSpec;

const PREVIEW_CHAR_LIMIT: usize = 200;

/// Issues one HTTP call for `spec` and reports the outcome.
///
/// Infallible by contract: transport failures (timeout, refused
/// connection, DNS) and request-build failures are folded into the
/// returned [`RunResult`]'s `error` field and never escape. A completed
/// exchange is a success whatever its status code.
pub async fn execute(client: &Client, spec: &RequestSpec) -> RunResult {
    let start = Instant::now();

    let request = match spec.to_request(client) {
        Ok(request) => request,
        Err(err) => return failure(start, err.to_string()),
    };

    match client.execute(request).await {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.bytes().await {
                Ok(bytes) => RunResult {
                    status: Some(status),
                    elapsed: start.elapsed(),
                    size_bytes: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
                    body_preview: body_preview(&bytes),
                    error: None,
                },
                Err(err) => failure(start, err.to_string()),
            }
        }
        Err(err) => failure(start, err.to_string()),
    }
}

fn failure(start: Instant, error: String) -> RunResult {
    RunResult {
        status: None,
        elapsed: start.elapsed(),
        size_bytes: 0,
        body_preview: String::new(),
        error: Some(error),
    }
}

/// Pretty-prints the body when it parses as JSON, otherwise renders it as
/// (lossy) text; either way the preview is capped at 200 characters.
fn body_preview(bytes: &[u8]) -> String {
    let rendered = match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(value) => {
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
        }
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    };
    truncate_chars(&rendered, PREVIEW_CHAR_LIMIT)
}

fn truncate_chars(text: &str, limit: usize) -> String {
    let mut preview: String = text.chars().take(limit).collect();
    if text.chars().count() > limit {
        preview.push_str("...");
    }
    preview
}
