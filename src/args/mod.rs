//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::VolleyArgs;
pub use types::HttpMethod;

pub(crate) use defaults::{
    DEFAULT_BODY, DEFAULT_DELAY_SECONDS, DEFAULT_HEADERS_TEXT, DEFAULT_PARAMS_TEXT,
    DEFAULT_REPEAT_COUNT, DEFAULT_TIMEOUT, DEFAULT_URL, DEFAULT_URLS_FILE, DEFAULT_USER_AGENT,
};
