//! Configuration storage operations

use crate::{models::Config, Result};
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.json";

pub struct ConfigStorage {
    config_dir: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Load the config, writing defaults first if the file is missing or empty.
    pub fn load(&self) -> Result<Config> {
        let config_path = self.path();

        if !config_path.exists() {
            return self.save_default();
        }

        let content = std::fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            return self.save_default();
        }

        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        std::fs::create_dir_all(&self.config_dir)?;

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(self.path(), content)?;

        Ok(())
    }

    fn save_default(&self) -> Result<Config> {
        let config = Config::default();
        self.save(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Preset, TimerConfig};
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("studytimer"));

        let config = storage.load().unwrap();
        assert_eq!(config, Config::default());
        assert!(storage.path().exists());
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().to_path_buf());
        std::fs::write(storage.path(), "  \n").unwrap();

        let config = storage.load().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().to_path_buf());

        let mut config = Config::default();
        config.timer = TimerConfig::new(2700, 600).unwrap();
        config.presets.push(Preset::new("Sprint", 600));
        config.notifications.desktop_notifications = false;
        storage.save(&config).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().to_path_buf());

        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(matches!(storage.save(&config), Err(Error::Validation(_))));
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_load_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().to_path_buf());
        std::fs::write(storage.path(), "{ not json").unwrap();

        assert!(matches!(storage.load(), Err(Error::Json(_))));
    }
}
