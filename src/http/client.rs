use std::time::Duration;

use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Builds the shared HTTP client with the per-call network timeout.
///
/// One client serves every slot; `reqwest::Client` is cheap to clone and
/// pools connections internally.
///
/// # Errors
///
/// Returns an error when the underlying client cannot be constructed.
pub fn build_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
