//! Application configuration

use crate::duration::format_minutes;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

use super::TimerError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    pub timer: TimerConfig,
    #[serde(default = "Preset::defaults")]
    pub presets: Vec<Preset>,
    #[serde(default)]
    pub notifications: NotificationConfig,
    pub log_level: String,
}

/// Durations for one study session, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerConfig {
    pub focus_duration: u64,
    pub break_duration: u64,
}

/// A suggested focus length offered as a one-key shortcut.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Ring the terminal bell when an interval elapses
    pub audio_alerts: bool,
    /// Raise a desktop notification when an interval elapses
    pub desktop_notifications: bool,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.timer.validate()?;

        if self.presets.is_empty() {
            return Err(Error::Validation(
                "At least one focus preset is required".to_string(),
            ));
        }

        for (i, preset) in self.presets.iter().enumerate() {
            preset.validate()?;
            if self.presets[..i].iter().any(|p| p.seconds == preset.seconds) {
                return Err(Error::Validation(format!(
                    "Duplicate preset duration: {} seconds",
                    preset.seconds
                )));
            }
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Preset bound to the 1-based shortcut `number`.
    pub fn preset(&self, number: usize) -> Option<&Preset> {
        number.checked_sub(1).and_then(|i| self.presets.get(i))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            timer: TimerConfig::default(),
            presets: Preset::defaults(),
            notifications: NotificationConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl TimerConfig {
    pub const DEFAULT_FOCUS: u64 = 1500;
    pub const DEFAULT_BREAK: u64 = 300;

    /// Build a config, rejecting zero durations.
    pub fn new(focus_duration: u64, break_duration: u64) -> std::result::Result<Self, TimerError> {
        let config = Self {
            focus_duration,
            break_duration,
        };
        config.check()?;
        Ok(config)
    }

    pub(crate) fn check(&self) -> std::result::Result<(), TimerError> {
        if self.focus_duration == 0 || self.break_duration == 0 {
            return Err(TimerError::InvalidDuration);
        }
        Ok(())
    }

    /// Validate timer configuration
    pub fn validate(&self) -> Result<()> {
        if self.focus_duration == 0 {
            return Err(Error::Validation(
                "Focus duration must be greater than 0".to_string(),
            ));
        }

        if self.break_duration == 0 {
            return Err(Error::Validation(
                "Break duration must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_duration: Self::DEFAULT_FOCUS,
            break_duration: Self::DEFAULT_BREAK,
        }
    }
}

impl Preset {
    pub fn new(name: impl Into<String>, seconds: u64) -> Self {
        Self {
            name: name.into(),
            seconds,
        }
    }

    /// Pomodoro, Extended and Deep Work blocks.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Pomodoro", 25 * 60),
            Self::new("Extended", 45 * 60),
            Self::new("Deep Work", 90 * 60),
        ]
    }

    /// Button label, e.g. `25 min`.
    pub fn label(&self) -> String {
        format_minutes(self.seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Preset name cannot be empty".to_string()));
        }
        if self.seconds == 0 {
            return Err(Error::Validation(format!(
                "Preset '{}' must be longer than 0 seconds",
                self.name
            )));
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            audio_alerts: true,
            desktop_notifications: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.timer.focus_duration, 1500);
        assert_eq!(config.timer.break_duration, 300);
        assert_eq!(config.presets.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timer_config_new_rejects_zero() {
        assert_eq!(TimerConfig::new(0, 300), Err(TimerError::InvalidDuration));
        assert_eq!(TimerConfig::new(1500, 0), Err(TimerError::InvalidDuration));

        let config = TimerConfig::new(2700, 300).unwrap();
        assert_eq!(config.focus_duration, 2700);
        assert_eq!(config.break_duration, 300);
    }

    #[test]
    fn test_timer_config_accepts_long_durations() {
        let config = TimerConfig {
            focus_duration: 6 * 3600,
            break_duration: 300,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_lookup_and_labels() {
        let config = Config::default();
        assert_eq!(config.preset(1).map(|p| p.seconds), Some(1500));
        assert_eq!(config.preset(2).map(|p| p.seconds), Some(2700));
        assert_eq!(config.preset(3).map(|p| p.seconds), Some(5400));
        assert!(config.preset(0).is_none());
        assert!(config.preset(4).is_none());

        let labels: Vec<String> = config.presets.iter().map(Preset::label).collect();
        assert_eq!(labels, vec!["25 min", "45 min", "1h 30m"]);
    }

    #[test]
    fn test_config_invalid() {
        let mut config = Config::default();
        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.presets.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.presets.push(Preset::new("Again", 1500));
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.presets[0].seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.timer.break_duration = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_missing_sections_use_defaults() {
        let json = r#"{
            "version": "1.0.0",
            "timer": { "focus_duration": 2700, "break_duration": 300 },
            "log_level": "debug"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.timer.focus_duration, 2700);
        assert_eq!(config.presets, Preset::defaults());
        assert_eq!(config.notifications, NotificationConfig::default());
    }
}
