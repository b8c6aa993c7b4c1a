use anyhow::Result;
use std::path::{Path, PathBuf};

/// Resolves where config, data, and logs live. `WATCHLOG_BASE_PATH`
/// overrides the platform config directory (useful in containers and tests).
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Ok(base) = std::env::var("WATCHLOG_BASE_PATH") {
            return Ok(Self::with_base(PathBuf::from(base)));
        }
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchlog");
        Ok(Self::with_base(base_dir))
    }

    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_layout() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/watchlog-test"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/watchlog-test/config.toml"));
        assert_eq!(paths.data_dir(), Path::new("/tmp/watchlog-test/data"));
        assert_eq!(paths.log_dir(), Path::new("/tmp/watchlog-test/logs"));
    }
}
