use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ui::theme::{Theme, DEFAULT_THEME_NAME};

/// Theme settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(default = "default_theme_name")]
    pub name: String,
}

fn default_theme_name() -> String {
    DEFAULT_THEME_NAME.to_string()
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
        }
    }
}

fn default_output_suffix() -> String {
    "-modified".to_string()
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemeSettings,
    /// Suffix inserted before the extension of the output file name
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeSettings::default(),
            output_suffix: default_output_suffix(),
        }
    }
}

impl Settings {
    /// Returns the config directory path (~/.huedit)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".huedit"))
    }

    /// Returns the themes directory path (~/.huedit/themes)
    pub fn themes_dir() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("themes"))
    }

    /// Returns the config file path (~/.huedit/settings.json)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    /// Ensures config directories and default files exist
    /// Called on app startup to initialize configuration
    pub fn ensure_config_exists() {
        // Create ~/.huedit/
        if let Some(config_dir) = Self::config_dir() {
            if !config_dir.exists() {
                if fs::create_dir_all(&config_dir).is_ok() {
                    // Set directory permissions to user-only on Unix
                    #[cfg(unix)]
                    {
                        use std::os::unix::fs::PermissionsExt;
                        let perms = fs::Permissions::from_mode(0o700);
                        let _ = fs::set_permissions(&config_dir, perms);
                    }
                }
            }
        }

        // Create ~/.huedit/themes/ with the built-in themes as editable files
        if let Some(themes_dir) = Self::themes_dir() {
            if !themes_dir.exists() {
                let _ = fs::create_dir_all(&themes_dir);
            }

            let dark_theme_path = themes_dir.join("dark.json");
            if !dark_theme_path.exists() {
                let _ = fs::write(&dark_theme_path, Theme::dark().to_json());
            }

            let light_theme_path = themes_dir.join("light.json");
            if !light_theme_path.exists() {
                let _ = fs::write(&light_theme_path, Theme::light().to_json());
            }
        }

        // Create default settings.json if not exists
        if let Some(config_path) = Self::config_path() {
            if !config_path.exists() {
                let default_settings = Self::default();
                let _ = default_settings.save();
            }
        }
    }

    /// Loads settings from the config file, returns default if not found or invalid
    pub fn load() -> Self {
        Self::load_with_error().unwrap_or_default()
    }

    /// Loads settings from the config file with error information
    pub fn load_with_error() -> Result<Self, String> {
        Self::ensure_config_exists();

        let config_path = Self::config_path()
            .ok_or_else(|| "Could not determine config path".to_string())?;

        let content = fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Invalid JSON in settings.json: {}", e))
    }

    /// Saves settings to the config file using atomic write pattern
    pub fn save(&self) -> io::Result<()> {
        let Some(config_dir) = Self::config_dir() else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            ));
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = fs::Permissions::from_mode(0o700);
                let _ = fs::set_permissions(&config_dir, perms);
            }
        }

        let config_path = config_dir.join("settings.json");
        let temp_path = config_dir.join("settings.json.tmp");
        let content = serde_json::to_string_pretty(self)?;

        // Atomic write: write to temp file first, then rename
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &config_path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.theme.name, DEFAULT_THEME_NAME);
        assert_eq!(settings.output_suffix, "-modified");
    }

    #[test]
    fn test_parse_partial_json() {
        let json = r#"{"theme":{"name":"light"}}"#;
        let settings: Settings = serde_json::from_str(json).expect("parse failed");
        assert_eq!(settings.theme.name, "light");
        assert_eq!(settings.output_suffix, "-modified");
    }

    #[test]
    fn test_parse_empty_json_uses_defaults() {
        let settings: Settings = serde_json::from_str("{}").expect("parse failed");
        assert_eq!(settings.theme.name, DEFAULT_THEME_NAME);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = Settings::default();
        settings.theme.name = "light".to_string();
        settings.output_suffix = ".recolored".to_string();
        let json = serde_json::to_string(&settings).expect("serialize failed");
        let parsed: Settings = serde_json::from_str(&json).expect("parse failed");
        assert_eq!(parsed.theme.name, "light");
        assert_eq!(parsed.output_suffix, ".recolored");
    }
}
