use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::editor::{CaseMode, FONT_SIZES};
use super::error::AppError;
use super::focus::FOCUS_POLL_DEFAULT_MS;

/// Operator-facing startup configuration. Loaded once; runtime changes to
/// font size and case mode live in EditorState and are not written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Initial index into the 9-step font scale.
    #[serde(default = "default_font_size_index")]
    pub font_size_index: usize,

    #[serde(default = "default_case_mode")]
    pub case_mode: CaseMode,

    /// Focus reconciliation poll interval.
    #[serde(default = "default_focus_poll_ms")]
    pub focus_poll_ms: u64,

    /// Whether to grab OS-global shortcuts while focused.
    #[serde(default = "default_suppress_global_shortcuts")]
    pub suppress_global_shortcuts: bool,
}

fn default_font_size_index() -> usize {
    FONT_SIZES.len() - 1 // Largest size: this is a large-print kiosk.
}

fn default_case_mode() -> CaseMode {
    CaseMode::Upper
}

fn default_focus_poll_ms() -> u64 {
    FOCUS_POLL_DEFAULT_MS
}

fn default_suppress_global_shortcuts() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            font_size_index: default_font_size_index(),
            case_mode: default_case_mode(),
            focus_poll_ms: default_focus_poll_ms(),
            suppress_global_shortcuts: default_suppress_global_shortcuts(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Failed to parse settings: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                let _ = default.save();
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::get_config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("kioskpad");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.font_size_index, 8);
        assert_eq!(settings.case_mode, CaseMode::Upper);
        assert_eq!(settings.focus_poll_ms, 100);
        assert!(settings.suppress_global_shortcuts);
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        // A config file carrying only one field still loads.
        let json = r#"{"font_size_index": 2}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.font_size_index, 2);
        assert_eq!(settings.case_mode, CaseMode::Upper);
        assert_eq!(settings.focus_poll_ms, 100);
        assert!(settings.suppress_global_shortcuts);
    }

    #[test]
    fn test_case_mode_serialization() {
        let settings = AppSettings {
            case_mode: CaseMode::Lower,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"Lower\""));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = AppSettings {
            font_size_index: 3,
            case_mode: CaseMode::AsTyped,
            focus_poll_ms: 250,
            suppress_global_shortcuts: false,
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, json).unwrap();

        let loaded: AppSettings =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, settings);
    }
}
