use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Where recognized codes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerSource {
    /// Spawn `zbarcam` on `device` and read decoded codes from its stdout.
    Zbarcam,
    /// Keyboard-wedge scanner or manual entry; no camera device involved.
    Keyboard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default = "default_source")]
    pub source: ScannerSource,
    /// Video device handed to zbarcam and probed for access at startup.
    #[serde(default = "default_device")]
    pub device: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory downloaded animation files are cached in.
    /// Defaults to `~/.cache/lottiescan/lotties`.
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            device: default_device(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_source() -> ScannerSource {
    ScannerSource::Zbarcam
}

fn default_device() -> PathBuf {
    PathBuf::from("/dev/video0")
}

fn default_cache_dir() -> PathBuf {
    platform::cache_dir().join("lotties")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("lottiescan/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`, writing a default config there first if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scanner.source, ScannerSource::Zbarcam);
        assert_eq!(config.scanner.device, PathBuf::from("/dev/video0"));
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("lottiescan/"));
        assert!(config.cache.dir.ends_with("lottiescan/lotties"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scanner]
            source = "keyboard"
            "#,
        )
        .unwrap();
        assert_eq!(config.scanner.source, ScannerSource::Keyboard);
        assert_eq!(config.scanner.device, PathBuf::from("/dev/video0"));
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.scanner.source, created.scanner.source);
        assert_eq!(reloaded.cache.dir, created.cache.dir);
    }
}
