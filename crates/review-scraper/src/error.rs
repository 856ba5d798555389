use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures that end a scrape run.
///
/// Per-field lookup misses never show up here; the extractor absorbs them.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no reviews matching `{selector}` appeared within {waited:?}")]
    ReviewsNotFound { selector: String, waited: Duration },

    #[error("target URL must not be empty")]
    EmptyUrl,

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("browser error: {0}")]
    Browser(String),

    #[error("failed to write export {path:?}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    pub fn browser(err: impl std::fmt::Display) -> Self {
        ScrapeError::Browser(err.to_string())
    }

    /// Label used for diagnostic artifacts captured for this failure.
    pub fn diagnostic_label(&self) -> &'static str {
        match self {
            ScrapeError::ReviewsNotFound { .. } => "reviews-not-found",
            ScrapeError::EmptyUrl | ScrapeError::Navigation { .. } => "navigation-failed",
            ScrapeError::Browser(_) => "browser-error",
            ScrapeError::Export { .. } | ScrapeError::Io(_) => "export-failed",
        }
    }
}
