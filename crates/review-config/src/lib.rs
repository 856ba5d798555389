pub mod config;
pub mod paths;

pub use config::{BrowserOptions, ConfigError, ExportConfig, ScraperConfig, TargetConfig};
pub use paths::PathManager;
