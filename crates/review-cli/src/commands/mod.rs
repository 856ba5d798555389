pub mod config;
pub mod extract;
pub mod scrape;

use color_eyre::Result;
use review_config::{PathManager, ScraperConfig};
use std::path::Path;

/// Config file (explicit path or the default location), then environment overrides.
pub fn load_config(explicit: Option<&Path>, paths: &PathManager) -> Result<ScraperConfig> {
    let mut config = match explicit {
        Some(path) => ScraperConfig::load_from_file(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", path.display(), e))?,
        None => {
            let path = paths.config_file();
            ScraperConfig::load_or_default(&path)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", path.display(), e))?
        }
    };
    config.apply_env_overrides();
    Ok(config)
}
