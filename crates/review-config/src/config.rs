use browser_debug::DebugConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("target.url is required")]
    MissingUrl,
    #[error("target.url must start with http:// or https://, got '{0}'")]
    InvalidUrl(String),
    #[error("browser.{0} must be greater than zero")]
    NonPositive(&'static str),
    #[error("export.output_path must not be empty")]
    MissingOutputPath,
}

/// Effective configuration for one scrape run.
///
/// Built once at start-up (file, then environment, then CLI flags) and
/// passed by reference afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScraperConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub browser: BrowserOptions,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub diagnostics: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TargetConfig {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserOptions {
    #[serde(default)]
    pub headless: bool,
    #[serde(default = "default_wait_seconds")]
    pub wait_seconds: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_executable: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_wait_seconds() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    250
}

fn default_window_width() -> u32 {
    1600
}

fn default_window_height() -> u32 {
    1000
}

fn default_output_path() -> PathBuf {
    PathBuf::from("build/reports/reviews.csv")
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: false,
            wait_seconds: default_wait_seconds(),
            poll_interval_ms: default_poll_interval_ms(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            chrome_executable: None,
        }
    }
}

impl BrowserOptions {
    pub fn wait_budget(&self) -> Duration {
        Duration::from_secs(self.wait_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

impl ScraperConfig {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ScraperConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `REVIEW_SCRAPER_*` and `CHROME_PATH` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_with(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("REVIEW_SCRAPER_URL").filter(|v| !v.trim().is_empty()) {
            self.target.url = url.trim().to_string();
        }
        if let Some(headless) = lookup("REVIEW_SCRAPER_HEADLESS") {
            self.browser.headless = matches!(headless.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(output) = lookup("REVIEW_SCRAPER_OUTPUT").filter(|v| !v.trim().is_empty()) {
            self.export.output_path = PathBuf::from(output.trim());
        }
        if let Some(chrome) = lookup("CHROME_PATH").filter(|v| !v.trim().is_empty()) {
            self.browser.chrome_executable = Some(PathBuf::from(chrome.trim()));
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.target.url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }
        if self.browser.wait_seconds == 0 {
            return Err(ConfigError::NonPositive("wait_seconds"));
        }
        if self.browser.poll_interval_ms == 0 {
            return Err(ConfigError::NonPositive("poll_interval_ms"));
        }
        if self.browser.window_width == 0 {
            return Err(ConfigError::NonPositive("window_width"));
        }
        if self.browser.window_height == 0 {
            return Err(ConfigError::NonPositive("window_height"));
        }
        if self.export.output_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingOutputPath);
        }
        Ok(())
    }
}
