use std::time::Duration;

use clap::Parser;

use super::parsers::{parse_delay_seconds, parse_repeat_count, parse_timeout_seconds};
use super::types::HttpMethod;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Manual HTTP request tester in Rust - compose requests from key/value text, fire them once or on repeat, and stream structured per-run results without blocking."
)]
pub struct VolleyArgs {
    /// HTTP method to use
    #[arg(long, short = 'X', ignore_case = true)]
    pub method: Option<HttpMethod>,

    /// Target URL (overrides the URL list and config default)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Query parameters as 'key: value' text, comma- or newline-separated
    #[arg(long, short = 'P')]
    pub params: Option<String>,

    /// HTTP headers as 'Key: Value' text (repeatable; each occurrence may
    /// itself hold comma-separated pairs)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Request body data (for POST/PUT/PATCH)
    #[arg(long, short)]
    pub data: Option<String>,

    /// Number of times to fire each request
    #[arg(long, short = 'n', value_parser = parse_repeat_count)]
    pub repeat: Option<u32>,

    /// Delay between repeated runs, in seconds (fractions allowed)
    #[arg(long, value_parser = parse_delay_seconds)]
    pub delay: Option<Duration>,

    /// URL list file, one URL per line ('#' comments and blanks ignored)
    #[arg(long = "urls-file", short = 'f')]
    pub urls_file: Option<String>,

    /// Config file path (.toml or .json); defaults to volley.toml / volley.json
    #[arg(long, short)]
    pub config: Option<String>,

    /// Per-request network timeout in seconds
    #[arg(long, value_parser = parse_timeout_seconds)]
    pub timeout: Option<Duration>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl VolleyArgs {
    /// Joins repeatable `-H` occurrences into one text block for the
    /// key/value tokenizer.
    #[must_use]
    pub fn headers_text(&self) -> Option<String> {
        if self.headers.is_empty() {
            return None;
        }
        Some(self.headers.join("\n"))
    }
}
