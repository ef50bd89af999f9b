use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("volley/", env!("CARGO_PKG_VERSION"));

/// Fallback request defaults used when neither the CLI nor a config file
/// supplies a value.
pub(crate) const DEFAULT_URL: &str = "https://jsonplaceholder.typicode.com/posts/1";
pub(crate) const DEFAULT_PARAMS_TEXT: &str = "userId: 1, limit: 3";
pub(crate) const DEFAULT_HEADERS_TEXT: &str = "Content-Type: application/json";
pub(crate) const DEFAULT_BODY: &str = "{\"name\": \"Test User\", \"id\": 1}";
pub(crate) const DEFAULT_REPEAT_COUNT: u32 = 5;
pub(crate) const DEFAULT_DELAY_SECONDS: f64 = 1.0;

/// Per-call network timeout.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// URL list checked in the working directory when `--urls-file` is absent.
pub(crate) const DEFAULT_URLS_FILE: &str = "urls.txt";
