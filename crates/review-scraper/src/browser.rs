use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use review_config::{BrowserOptions, PathManager};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use which::which;
use crate::error::ScrapeError;

const MAX_HANDLER_ERRORS: usize = 10;

/// A launched Chromium plus the task driving its CDP connection.
///
/// Call [`BrowserSession::close`] on every path; dropping the session only
/// kills the process without waiting for it.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    pub async fn launch(options: &BrowserOptions, paths: &PathManager) -> Result<Self, ScrapeError> {
        let chrome_path = match find_chromium(options.chrome_executable.as_deref()) {
            Some(path) => path,
            None => fetch_chromium(&paths.chromium_download_dir()).await?,
        };
        info!(executable = %chrome_path.display(), headless = options.headless, "Launching browser");

        let config = build_browser_config(&chrome_path, options)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::Browser(format!("Failed to launch browser: {}", e)))?;

        let handler_task = tokio::spawn(async move {
            let mut error_count = 0;

            while let Some(h) = handler.next().await {
                match h {
                    Ok(_) => error_count = 0,
                    Err(e) => {
                        error_count += 1;
                        warn!(
                            "Browser handler error (count: {}/{}): {:?}",
                            error_count, MAX_HANDLER_ERRORS, e
                        );
                        if error_count >= MAX_HANDLER_ERRORS {
                            error!(
                                "Browser handler received {} consecutive errors. Browser process may have crashed.",
                                error_count
                            );
                            break;
                        }
                    }
                }
            }
            debug!("Browser handler task ended");
        });

        Ok(Self { browser, handler_task })
    }

    pub async fn new_page(&self) -> Result<Page, ScrapeError> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(ScrapeError::browser)
    }

    /// Close the browser and wait briefly for the handler to wind down.
    pub async fn close(mut self) -> Result<(), ScrapeError> {
        info!("Shutting down browser instance");
        let closed = self.browser.close().await.map_err(ScrapeError::browser);
        if closed.is_ok() {
            if let Err(e) = self.browser.wait().await {
                warn!("Failed to wait for browser process: {}", e);
            }
        }
        if tokio::time::timeout(Duration::from_secs(2), &mut self.handler_task)
            .await
            .is_err()
        {
            self.handler_task.abort();
        }
        closed.map(|_| ())
    }
}

fn build_browser_config(chrome_path: &Path, options: &BrowserOptions) -> Result<BrowserConfig, ScrapeError> {
    let mut builder = BrowserConfig::builder()
        .chrome_executable(chrome_path)
        .window_size(options.window_width, options.window_height)
        .arg("--no-sandbox")
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage")
        .arg("--disable-notifications")
        .arg("--disable-extensions");

    // the builder launches headless unless told otherwise
    if !options.headless {
        builder = builder.with_head();
    }

    builder
        .build()
        .map_err(|e| ScrapeError::Browser(format!("Failed to build browser config: {}", e)))
}

/// Configured executable, then well-known install paths, then `PATH`.
fn find_chromium(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        warn!("Configured browser executable {:?} does not exist, searching", path);
    }

    let system_paths = [
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/local/bin/chromium",
        "/opt/google/chrome/chrome",
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
    ];
    for path in &system_paths {
        if Path::new(path).exists() {
            return Some(PathBuf::from(path));
        }
    }

    ["chromium", "chromium-browser", "google-chrome", "chrome"]
        .iter()
        .find_map(|name| which(name).ok())
}

async fn fetch_chromium(download_dir: &Path) -> Result<PathBuf, ScrapeError> {
    info!("No system Chromium found, downloading via BrowserFetcher...");
    tokio::fs::create_dir_all(download_dir).await?;

    let fetcher_options = BrowserFetcherOptions::builder()
        .with_path(download_dir)
        .build()
        .map_err(|e| ScrapeError::Browser(format!("Failed to create BrowserFetcherOptions: {}", e)))?;
    let revision = BrowserFetcher::new(fetcher_options)
        .fetch()
        .await
        .map_err(|e| ScrapeError::Browser(format!("Failed to fetch Chromium: {}", e)))?;

    info!("Chromium downloaded to: {:?}", revision.executable_path);
    Ok(revision.executable_path)
}
