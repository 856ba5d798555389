use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};
use crate::config::{DebugConfig, ScreenshotFormat};

/// A diagnostic artifact could not be captured.
///
/// Only ever produced on an already failing path, so callers log it and
/// carry on with the original error.
#[derive(Debug, Error)]
#[error("failed to capture {artifact}: {message}")]
pub struct CaptureError {
    pub artifact: &'static str,
    pub message: String,
}

impl CaptureError {
    fn new(artifact: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            artifact,
            message: err.to_string(),
        }
    }
}

/// Anything that can hand over its current markup and a rendered image.
#[async_trait]
pub trait PageSnapshot: Send + Sync {
    async fn snapshot_html(&self) -> Result<String>;
    async fn snapshot_image(&self, format: ScreenshotFormat) -> Result<Vec<u8>>;
}

#[async_trait]
impl PageSnapshot for Page {
    async fn snapshot_html(&self) -> Result<String> {
        Ok(self.content().await?)
    }

    async fn snapshot_image(&self, format: ScreenshotFormat) -> Result<Vec<u8>> {
        let format = match format {
            ScreenshotFormat::Png => CaptureScreenshotFormat::Png,
            ScreenshotFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
        };
        let params = ScreenshotParams::builder()
            .format(format)
            .full_page(true)
            .build();
        Ok(self.screenshot(params).await?)
    }
}

/// Outcome of a best-effort capture.
#[derive(Debug, Default)]
pub struct CaptureReport {
    pub saved: Vec<PathBuf>,
    pub failures: Vec<CaptureError>,
}

impl CaptureReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct PageInspector<'a, P: PageSnapshot + ?Sized> {
    page: &'a P,
    config: DebugConfig,
    screenshot_counter: u32,
}

impl<'a, P: PageSnapshot + ?Sized> PageInspector<'a, P> {
    pub fn new(page: &'a P, config: DebugConfig) -> Self {
        Self {
            page,
            config,
            screenshot_counter: 0,
        }
    }

    /// Capture a screenshot with a label
    pub async fn screenshot(&mut self, label: &str) -> Result<PathBuf, CaptureError> {
        self.screenshot_counter += 1;
        let format = self.config.screenshot_format;
        let filename = format!(
            "{:03}_{}.{}",
            self.screenshot_counter,
            sanitize_label(label),
            format.extension()
        );
        let path = self.config.output_dir.join(filename);

        let data = self
            .page
            .snapshot_image(format)
            .await
            .map_err(|e| CaptureError::new("screenshot", e))?;
        std::fs::write(&path, data).map_err(|e| CaptureError::new("screenshot", e))?;
        info!("Screenshot saved: {:?}", path);
        Ok(path)
    }

    /// Save full page HTML
    pub async fn save_page_html(&self, label: &str) -> Result<PathBuf, CaptureError> {
        let path = self
            .config
            .output_dir
            .join(format!("{}.html", sanitize_label(label)));

        let html = self
            .page
            .snapshot_html()
            .await
            .map_err(|e| CaptureError::new("page source", e))?;
        std::fs::write(&path, html).map_err(|e| CaptureError::new("page source", e))?;
        info!("Page HTML saved: {:?}", path);
        Ok(path)
    }

    /// Save whatever the config asks for. Never fails; problems end up in the report.
    pub async fn capture_failure(&mut self, label: &str) -> CaptureReport {
        let mut report = CaptureReport::default();
        if !self.config.enabled {
            return report;
        }

        if let Err(e) = std::fs::create_dir_all(&self.config.output_dir) {
            let err = CaptureError::new("diagnostics directory", e);
            warn!("{}", err);
            report.failures.push(err);
            return report;
        }

        if self.config.capture_html {
            match self.save_page_html(label).await {
                Ok(path) => report.saved.push(path),
                Err(e) => {
                    warn!("{}", e);
                    report.failures.push(e);
                }
            }
        }

        if self.config.capture_screenshots {
            match self.screenshot(label).await {
                Ok(path) => report.saved.push(path),
                Err(e) => {
                    warn!("{}", e);
                    report.failures.push(e);
                }
            }
        }

        report
    }
}

fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}
