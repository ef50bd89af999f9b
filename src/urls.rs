//! URL list loading: one request slot per usable line.

use std::path::Path;

use tracing::warn;

use crate::args::DEFAULT_URLS_FILE;
use crate::error::{AppError, AppResult, HttpError};

/// Reads a line-oriented URL list. Blank lines and lines starting with `#`
/// are ignored.
///
/// # Errors
///
/// Returns an error when the file cannot be read.
pub fn read_url_list(path: &Path) -> AppResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::http(HttpError::ReadUrlFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}

/// Seeds the slot URLs: the explicit file, or the default file when
/// present, falling back to one slot with `default_url`. An unreadable or
/// empty list warns and falls back rather than failing startup.
#[must_use]
pub fn seed_urls(path: Option<&str>, default_url: &str) -> Vec<String> {
    let explicit = path.is_some();
    let path = Path::new(path.unwrap_or(DEFAULT_URLS_FILE));

    if !path.exists() {
        if explicit {
            warn!(
                "URL list '{}' not found; using the default URL.",
                path.display()
            );
        }
        return vec![default_url.to_owned()];
    }

    match read_url_list(path) {
        Ok(urls) if urls.is_empty() => {
            warn!(
                "URL list '{}' has no usable lines; using the default URL.",
                path.display()
            );
            vec![default_url.to_owned()]
        }
        Ok(urls) => urls,
        Err(err) => {
            warn!("{}; using the default URL.", err);
            vec![default_url.to_owned()]
        }
    }
}
