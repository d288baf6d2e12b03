use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "todo-tui";

/// Theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum ThemeMode {
    #[default]
    Purple,
    Dark,
    Light,
}

impl ThemeMode {
    /// Next theme in the cycle
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Purple,
            ThemeMode::Purple => ThemeMode::Dark,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
            ThemeMode::Purple => "Purple",
        }
    }
}

/// Language options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum Language {
    Korean,
    #[default]
    English,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme mode selection
    pub theme_mode: ThemeMode,
    /// Language selection
    pub language: Language,
    /// Show help overlay
    pub show_help: bool,
    /// Log filter used when `TODO_TUI_LOG` is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            language: Language::default(),
            show_help: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            Self::parse_or_default(&content)
        } else {
            let default_config = Config::default();
            let _ = default_config.save();
            default_config
        };

        Ok(config)
    }

    /// Parse config text, saving and returning the default if it is malformed
    fn parse_or_default(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|_| {
            let default_config = Config::default();
            let _ = default_config.save();
            default_config
        })
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Directory holding the config and log files
    pub fn config_dir() -> Result<PathBuf> {
        // Use XDG config directory standard or fallback to ~/.config
        let base = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
                .join(".config")
        };

        Ok(base.join(APP_DIR))
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Advance to the next theme and return it
    pub fn cycle_theme(&mut self) -> ThemeMode {
        self.theme_mode = self.theme_mode.next();
        self.theme_mode
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Get theme display string
    pub fn theme_display(&self) -> &str {
        self.theme_mode.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme_mode, ThemeMode::Purple);
        assert_eq!(config.language, Language::English);
        assert!(!config.show_help);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            theme_mode: ThemeMode::Purple,
            language: Language::Korean,
            show_help: true,
            log_level: "debug".to_string(),
        };

        let serialized = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&serialized).unwrap();

        assert_eq!(config.theme_mode, deserialized.theme_mode);
        assert_eq!(config.language, deserialized.language);
        assert_eq!(config.show_help, deserialized.show_help);
        assert_eq!(config.log_level, deserialized.log_level);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"theme_mode":"Light"}"#).unwrap();
        assert_eq!(config.theme_mode, ThemeMode::Light);
        assert_eq!(config.language, Language::English);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_theme_cycle() {
        let mut config = Config::default();
        assert_eq!(config.cycle_theme(), ThemeMode::Dark);
        assert_eq!(config.cycle_theme(), ThemeMode::Light);
        assert_eq!(config.cycle_theme(), ThemeMode::Purple);
    }

    #[test]
    fn test_first_launch_uses_purple_theme() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.theme_mode, ThemeMode::Purple);
        assert_eq!(config.theme_display(), "Purple");
    }

    #[test]
    fn test_theme_display() {
        for (theme, expected_display) in [
            (ThemeMode::Dark, "Dark"),
            (ThemeMode::Light, "Light"),
            (ThemeMode::Purple, "Purple"),
        ] {
            let config = Config {
                theme_mode: theme,
                ..Default::default()
            };
            assert_eq!(config.theme_display(), expected_display);
        }
    }

    #[test]
    fn test_help_toggle() {
        let mut config = Config::default();
        assert!(!config.show_help);

        config.toggle_help();
        assert!(config.show_help);

        config.toggle_help();
        assert!(!config.show_help);
    }
}
