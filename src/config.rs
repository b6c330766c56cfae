use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{JournalError, Result, WriteMode};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory where journal files are stored
    pub journals_dir: PathBuf,

    /// How journal files are written on save
    pub write_mode: WriteMode,

    /// Default editor command
    pub editor_command: Option<String>,

    /// Display settings
    pub theme: Theme,
}

/// Fonts and colours used when rendering journals.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub font: String,
    pub font_size_primary: u32,
    pub font_size_secondary: u32,
    /// Accent colour, also used for entry time headings
    pub color_primary: String,
    pub color_secondary: String,
    pub color_bg_primary: String,
    pub color_bg_secondary: String,
    pub color_bg_button: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            font: "Acme".to_string(),
            font_size_primary: 52,
            font_size_secondary: 30,
            color_primary: "#ffc800".to_string(),
            color_secondary: "#ffffff".to_string(),
            color_bg_primary: "#3f3f3f".to_string(),
            color_bg_secondary: "#000000".to_string(),
            color_bg_button: "#595959".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let journals_dir = project_dirs()
            .map(|dirs| dirs.data_dir().join("Journals"))
            .unwrap_or_else(|| PathBuf::from("./Journals"));

        Config {
            journals_dir,
            write_mode: WriteMode::default(),
            editor_command: None,
            theme: Theme::default(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "daybook")
}

impl Config {
    /// Location of the configuration file when none is given explicitly.
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("./Settings/config.json"))
    }

    /// Loads the configuration at `path`, writing the defaults there first if
    /// the file doesn't exist.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        // First run: persist the defaults so the user has a file to edit
        if !path.exists() {
            info!("Creating default configuration at {}", path.display());
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content).map_err(|e| JournalError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|_| JournalError::DirectoryError {
                    path: parent.to_path_buf(),
                })?;
            }
        }

        // Pretty-printed so the file stays hand-editable
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key.trim() {
            "journals_dir" => self.journals_dir = PathBuf::from(value),
            "write_mode" => {
                self.write_mode = match value {
                    "overwrite" => WriteMode::Overwrite,
                    "atomic" => WriteMode::Atomic,
                    other => {
                        return Err(config_error(format!(
                            "Invalid write_mode: {}. Must be one of: overwrite, atomic",
                            other
                        )))
                    }
                }
            }
            "editor_command" => {
                self.editor_command = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "font" => self.theme.font = value.to_string(),
            "font_size_primary" => self.theme.font_size_primary = parse_size(key, value)?,
            "font_size_secondary" => self.theme.font_size_secondary = parse_size(key, value)?,
            "color_primary" => self.theme.color_primary = parse_color(key, value)?,
            "color_secondary" => self.theme.color_secondary = parse_color(key, value)?,
            "color_bg_primary" => self.theme.color_bg_primary = parse_color(key, value)?,
            "color_bg_secondary" => self.theme.color_bg_secondary = parse_color(key, value)?,
            "color_bg_button" => self.theme.color_bg_button = parse_color(key, value)?,
            other => return Err(config_error(format!("Unknown setting: {}", other))),
        }
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

fn config_error(message: String) -> JournalError {
    JournalError::ConfigError { message }
}

fn parse_size(key: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(config_error(format!(
            "Invalid {}: {}. Must be a positive integer",
            key, value
        ))),
    }
}

/// Accepts `#rgb` and `#rrggbb` colours.
fn parse_color(key: &str, value: &str) -> Result<String> {
    let valid = value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));

    if valid {
        Ok(value.to_lowercase())
    } else {
        Err(config_error(format!(
            "Invalid {}: {}. Expected a colour like #ffc800",
            key, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.font, "Acme");
        assert_eq!(theme.color_primary, "#ffc800");
        assert_eq!(theme.font_size_primary, 52);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings").join("config.json");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.is_file());

        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(created, loaded);
    }

    #[test]
    fn test_save_and_reload_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.set("color_primary", "#00FF00").unwrap();
        config.set("write_mode", "atomic").unwrap();
        config.set("journals_dir", "/tmp/journals").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded.theme.color_primary, "#00ff00");
        assert_eq!(loaded.write_mode, WriteMode::Atomic);
        assert_eq!(loaded.journals_dir, PathBuf::from("/tmp/journals"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"theme": {"font": "Mono"}}"#).unwrap();

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config.theme.font, "Mono");
        assert_eq!(config.theme.color_primary, "#ffc800");
        assert_eq!(config.write_mode, WriteMode::Overwrite);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "[").unwrap();

        assert!(matches!(
            Config::load_or_create(&path),
            Err(JournalError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("color_primary", "yellow").is_err());
        assert!(config.set("color_primary", "#12345").is_err());
        assert!(config.set("font_size_primary", "0").is_err());
        assert!(config.set("font_size_primary", "big").is_err());
        assert!(config.set("write_mode", "append").is_err());
        assert!(config.set("no_such_key", "1").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_editor_command() {
        let mut config = Config::default();
        config.set("editor_command", "code --wait").unwrap();
        assert_eq!(config.get_editor_command(), "code --wait");

        config.set("editor_command", "").unwrap();
        assert_eq!(config.editor_command, None);
    }
}
