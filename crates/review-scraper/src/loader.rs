use review_config::BrowserOptions;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, info, warn};
use crate::dom::ReviewPage;
use crate::error::ScrapeError;

/// How long to wait for review markup, and how often to look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub budget: Duration,
    pub poll_interval: Duration,
}

impl WaitPolicy {
    pub fn new(budget: Duration, poll_interval: Duration) -> Self {
        Self { budget, poll_interval }
    }
}

impl From<&BrowserOptions> for WaitPolicy {
    fn from(options: &BrowserOptions) -> Self {
        Self::new(options.wait_budget(), options.poll_interval())
    }
}

/// Poll `probe` until it yields a value or `policy.budget` runs out.
///
/// The probe always runs at least once, even with a zero budget. A probe
/// still pending at the deadline is dropped.
pub async fn wait_until<T, F, Fut>(policy: WaitPolicy, mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + policy.budget;
    loop {
        match timeout_at(deadline, probe()).await {
            Ok(Some(value)) => return Some(value),
            Ok(None) => {}
            Err(_) => return None,
        }
        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        sleep(policy.poll_interval.min(deadline - now)).await;
    }
}

/// Navigate to `url` and wait until at least one `container` node is present.
pub async fn load_reviews<P: ReviewPage>(
    page: &P,
    url: &str,
    container: &str,
    policy: WaitPolicy,
) -> Result<Vec<P::Node>, ScrapeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ScrapeError::EmptyUrl);
    }

    info!(url, "Opening product page");
    page.navigate(url).await.map_err(|e| ScrapeError::Navigation {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let mut polls = 0u32;
    let found = wait_until(policy, || {
        polls += 1;
        let attempt = polls;
        async move {
            match page.find_all(container).await {
                Ok(nodes) => {
                    debug!(attempt, count = nodes.len(), "Polled for review nodes");
                    (!nodes.is_empty()).then_some(nodes)
                }
                Err(e) => {
                    debug!(attempt, error = %e, "Review node query failed");
                    None
                }
            }
        }
    })
    .await;

    match found {
        Some(nodes) => {
            info!("Found {} review elements", nodes.len());
            Ok(nodes)
        }
        None => {
            warn!(waited = ?policy.budget, "Reviews did not appear in the DOM");
            Err(ScrapeError::ReviewsNotFound {
                selector: container.to_string(),
                waited: policy.budget,
            })
        }
    }
}
