//! One scrape run: load, extract, export, and capture diagnostics on failure.

use browser_debug::{CaptureReport, PageInspector, PageSnapshot};
use review_config::{PathManager, ScraperConfig};
use review_models::Review;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};
use crate::browser::BrowserSession;
use crate::dom::ReviewPage;
use crate::error::ScrapeError;
use crate::export::write_reviews_to_path;
use crate::extract::extract_reviews;
use crate::loader::{load_reviews, WaitPolicy};
use crate::selectors;

#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub reviews: Vec<Review>,
    pub output_path: PathBuf,
}

/// A failed run and whatever diagnostics were captured for it.
///
/// `diagnostics` is empty when capture is disabled or no page was ever open.
#[derive(Debug)]
pub struct ScrapeFailure {
    pub error: ScrapeError,
    pub diagnostics: CaptureReport,
}

impl From<ScrapeError> for ScrapeFailure {
    fn from(error: ScrapeError) -> Self {
        Self {
            error,
            diagnostics: CaptureReport::default(),
        }
    }
}

impl fmt::Display for ScrapeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for ScrapeFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}

/// Scrape an already open page. The CSV is only written when loading succeeds.
pub async fn scrape_page<P>(page: &P, config: &ScraperConfig) -> Result<ScrapeOutcome, ScrapeFailure>
where
    P: ReviewPage + PageSnapshot,
{
    match collect_and_export(page, config).await {
        Ok(outcome) => Ok(outcome),
        Err(error) => {
            let diagnostics = capture_diagnostics(page, config, &error).await;
            Err(ScrapeFailure { error, diagnostics })
        }
    }
}

async fn collect_and_export<P: ReviewPage>(page: &P, config: &ScraperConfig) -> Result<ScrapeOutcome, ScrapeError> {
    let nodes = load_reviews(
        page,
        &config.target.url,
        selectors::REVIEW_CONTAINER,
        WaitPolicy::from(&config.browser),
    )
    .await?;

    let reviews = extract_reviews(&nodes, page).await;
    let output_path = config.export.output_path.clone();
    write_reviews_to_path(&output_path, &reviews)?;

    Ok(ScrapeOutcome { reviews, output_path })
}

async fn capture_diagnostics<P: PageSnapshot>(
    page: &P,
    config: &ScraperConfig,
    error: &ScrapeError,
) -> CaptureReport {
    let mut inspector = PageInspector::new(page, config.diagnostics.clone());
    let report = inspector.capture_failure(error.diagnostic_label()).await;
    for path in &report.saved {
        info!("Diagnostic artifact saved: {}", path.display());
    }
    if !report.is_clean() {
        warn!(failures = report.failures.len(), "Some diagnostics could not be captured");
    }
    report
}

/// Launch a browser, scrape `config.target.url` and shut the browser down
/// again whatever the outcome.
pub async fn run_scrape(config: &ScraperConfig, paths: &PathManager) -> Result<ScrapeOutcome, ScrapeFailure> {
    let session = BrowserSession::launch(&config.browser, paths).await?;

    let result = match session.new_page().await {
        Ok(page) => scrape_page(&page, config).await,
        Err(e) => Err(ScrapeFailure::from(e)),
    };

    if let Err(e) = session.close().await {
        warn!("Failed to close browser cleanly: {}", e);
    }
    result
}
