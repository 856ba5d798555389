use anyhow::Result;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "review-scraper";

/// Resolves where configuration and downloaded browser binaries live.
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var("REVIEW_SCRAPER_CONFIG_DIR") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
                .join(APP_DIR),
        };

        let data_dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine user data directory"))?
            .join(APP_DIR);

        Ok(Self { config_dir, data_dir })
    }

    /// Both directories rooted at `base`; used for tests and portable installs.
    pub fn with_base(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            config_dir: base.to_path_buf(),
            data_dir: base.join("data"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Where a fetched Chromium build is unpacked when no system browser exists.
    pub fn chromium_download_dir(&self) -> PathBuf {
        self.data_dir.join("chromium")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".").join(APP_DIR)))
    }
}
