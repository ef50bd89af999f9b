use std::time::Duration;

use serde::Deserialize;

use crate::args::HttpMethod;

/// Raw config file shape. Every field is optional; resolution against the
/// hardcoded fallbacks happens in [`super::resolve_session`].
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub request: Option<RequestSection>,
    pub execution: Option<ExecutionSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestSection {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    /// Query parameters as 'key: value' text.
    pub params: Option<String>,
    /// Headers as 'Key: Value' text.
    pub headers: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExecutionSection {
    pub repeat_count: Option<u32>,
    pub delay_seconds: Option<f64>,
}

/// Static request defaults resolved once at startup; read-only thereafter.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub url: String,
    pub method: HttpMethod,
    pub params_text: String,
    pub headers_text: String,
    pub body: String,
    pub repeat_count: u32,
    pub delay: Duration,
    pub timeout: Duration,
}
