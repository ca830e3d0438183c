use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ProviderId;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional provider id, e.g. "mock". Defaults to the mock generator.
    pub provider: Option<String>,

    /// Optional seed for the mock generator; unseeded runs use entropy.
    pub mock_seed: Option<u64>,

    /// Override for the directory holding persisted dashboard data
    /// (the favorites list). Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Return the configured provider as a strongly-typed ProviderId,
    /// falling back to the mock generator when none is set.
    pub fn provider_id(&self) -> Result<ProviderId> {
        match self.provider.as_deref() {
            Some(s) => ProviderId::try_from(s),
            None => Ok(ProviderId::Mock),
        }
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Directory for persisted dashboard data, honoring the override.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weather-dashboard", "dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_defaults_to_mock_when_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.provider_id().unwrap(), ProviderId::Mock);
    }

    #[test]
    fn provider_id_parses_configured_value() {
        let cfg = Config { provider: Some("mock".to_string()), ..Config::default() };
        assert_eq!(cfg.provider_id().unwrap(), ProviderId::Mock);
    }

    #[test]
    fn unknown_configured_provider_errors() {
        let cfg = Config { provider: Some("weatherapi".to_string()), ..Config::default() };
        let err = cfg.provider_id().unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn data_dir_override_wins() {
        let cfg = Config { data_dir: Some(PathBuf::from("/tmp/dash")), ..Config::default() };
        assert_eq!(cfg.data_dir().unwrap(), PathBuf::from("/tmp/dash"));
    }

    #[test]
    fn save_and_load_roundtrip_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            provider: Some("mock".to_string()),
            mock_seed: Some(42),
            data_dir: Some(PathBuf::from("/tmp/dash")),
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider.as_deref(), Some("mock"));
        assert_eq!(loaded.mock_seed, Some(42));
        assert_eq!(loaded.data_dir, Some(PathBuf::from("/tmp/dash")));
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(loaded.provider.is_none());
        assert!(loaded.mock_seed.is_none());
        assert!(loaded.data_dir.is_none());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config {
            provider: Some("mock".to_string()),
            mock_seed: Some(7),
            data_dir: None,
        };

        let serialized = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.provider.as_deref(), Some("mock"));
        assert_eq!(parsed.mock_seed, Some(7));
        assert!(parsed.data_dir.is_none());
    }
}
