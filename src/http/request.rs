use reqwest::{Client, Request, Url};
use thiserror::Error;

use crate::args::HttpMethod;
use crate::error::{AppError, AppResult, HttpError};
use crate::kv::{KvIssue, KvMap, parse_pairs};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// One fully assembled request definition. Built fresh per send; immutable
/// once handed to the executor.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub query: KvMap,
    pub headers: KvMap,
    pub body: String,
    pub is_json_body: bool,
}

/// Non-fatal problems found while assembling a [`RequestSpec`]. The build
/// always succeeds; these are surfaced as warnings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildIssue {
    #[error("Bad query fragment: {0}")]
    Params(KvIssue),
    #[error("Bad header fragment: {0}")]
    Headers(KvIssue),
    #[error("Body is not valid JSON; sending as raw data.")]
    NonJsonBody,
}

impl RequestSpec {
    /// Assembles a spec from loosely-typed text the way it arrives from the
    /// CLI or config: query/header text goes through the tolerant key/value
    /// tokenizer, an empty URL falls back to `fallback_url`, and for
    /// body-carrying methods the body is sniffed for JSON (injecting
    /// `Content-Type: application/json` when no content-type header was
    /// supplied, first case-insensitive match wins).
    #[must_use]
    pub fn build(
        method: HttpMethod,
        url: &str,
        params_text: &str,
        headers_text: &str,
        body: &str,
        fallback_url: &str,
    ) -> (Self, Vec<BuildIssue>) {
        let mut issues = Vec::new();

        let (query, param_issues) = parse_pairs(params_text);
        issues.extend(param_issues.into_iter().map(BuildIssue::Params));

        let (mut headers, header_issues) = parse_pairs(headers_text);
        issues.extend(header_issues.into_iter().map(BuildIssue::Headers));

        let url = url.trim();
        let url = if url.is_empty() { fallback_url } else { url };

        let mut is_json_body = false;
        if method.carries_body() && !body.is_empty() {
            if serde_json::from_str::<serde_json::Value>(body).is_ok() {
                is_json_body = true;
                if headers.get_ignore_ascii_case(CONTENT_TYPE).is_none() {
                    headers.insert(CONTENT_TYPE.to_owned(), APPLICATION_JSON.to_owned());
                }
            } else {
                issues.push(BuildIssue::NonJsonBody);
            }
        }

        (
            Self {
                method,
                url: url.to_owned(),
                query,
                headers,
                body: body.to_owned(),
                is_json_body,
            },
            issues,
        )
    }

    /// Converts the spec into a wire request for `client`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL does not parse or the request cannot
    /// be built.
    pub fn to_request(&self, client: &Client) -> AppResult<Request> {
        let url = Url::parse(&self.url).map_err(|err| {
            AppError::http(HttpError::InvalidUrl {
                url: self.url.clone(),
                source: err,
            })
        })?;

        let mut request_builder = match self.method {
            HttpMethod::Get => client.get(url),
            HttpMethod::Post => client.post(url),
            HttpMethod::Put => client.put(url),
            HttpMethod::Patch => client.patch(url),
            HttpMethod::Delete => client.delete(url),
            HttpMethod::Head => client.head(url),
        };

        if !self.query.is_empty() {
            request_builder = request_builder.query(self.query.entries());
        }

        for (key, value) in self.headers.iter() {
            request_builder = request_builder.header(key, value);
        }

        if !self.body.is_empty() {
            request_builder = request_builder.body(self.body.clone());
        }

        request_builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))
    }
}
