use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::theme::Skin;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access settings: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub skin: Skin,
    /// Forces reduced motion on or off; `None` defers to the environment.
    #[serde(default)]
    pub reduced_motion: Option<bool>,
    /// How long the theme cross-fade marker stays up, in milliseconds.
    #[serde(default = "default_theme_transition_ms")]
    pub theme_transition_ms: u64,
    /// Duration of a smooth section scroll, in milliseconds.
    #[serde(default = "default_smooth_scroll_ms")]
    pub smooth_scroll_ms: u64,
    #[serde(default = "default_show_dot_nav")]
    pub show_dot_nav: bool,
}

fn default_theme_transition_ms() -> u64 { 450 }
fn default_smooth_scroll_ms() -> u64 { 800 }
fn default_show_dot_nav() -> bool { true }

const FILE_NAME: &str = "preferences.json";

impl Default for Preferences {
    fn default() -> Self {
        Self {
            skin: Skin::default(),
            reduced_motion: None,
            theme_transition_ms: default_theme_transition_ms(),
            smooth_scroll_ms: default_smooth_scroll_ms(),
            show_dot_nav: default_show_dot_nav(),
        }
    }
}

/// Config directory: Windows → AppData/Local/folio/
/// Linux → ~/.config/folio/
pub fn config_dir() -> PathBuf {
    dirs::config_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

impl Preferences {
    /// Read `preferences.json` from `dir`. A missing or unreadable file
    /// yields defaults; the result is always sanitized.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(FILE_NAME);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let mut prefs: Self = serde_json::from_str(&contents).unwrap_or_else(|e| {
                    tracing::warn!("Invalid preferences file, using defaults: {e}");
                    Self::default()
                });
                prefs.sanitize();
                prefs
            }
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::debug!("Preferences unreadable at {}: {e}", path.display());
                }
                Self::default()
            }
        }
    }

    /// Clamp all numeric fields to valid ranges.
    pub fn sanitize(&mut self) {
        self.theme_transition_ms = self.theme_transition_ms.min(2000);
        self.smooth_scroll_ms = self.smooth_scroll_ms.clamp(100, 3000);
    }

    pub fn save(&self, dir: &Path) -> Result<(), SettingsError> {
        fs::create_dir_all(dir)?;

        // Set restrictive permissions on config directory (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o700));
        }

        let path = dir.join(FILE_NAME);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }

    pub fn theme_transition(&self) -> Duration {
        Duration::from_millis(self.theme_transition_ms)
    }

    pub fn smooth_scroll(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-prefs-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_default_values() {
        let prefs = Preferences::default();
        assert_eq!(prefs.skin, Skin::Dev);
        assert_eq!(prefs.reduced_motion, None);
        assert_eq!(prefs.theme_transition_ms, 450);
        assert_eq!(prefs.smooth_scroll_ms, 800);
        assert!(prefs.show_dot_nav);
    }

    #[test]
    fn test_backwards_compat_missing_fields() {
        let old_json = r#"{"skin":"paper"}"#;
        let prefs: Preferences = serde_json::from_str(old_json).unwrap();
        assert_eq!(prefs.skin, Skin::Paper);
        assert_eq!(prefs.smooth_scroll_ms, 800);
        assert!(prefs.show_dot_nav);
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut prefs = Preferences {
            theme_transition_ms: 99_999,
            smooth_scroll_ms: 5,
            ..Preferences::default()
        };
        prefs.sanitize();
        assert_eq!(prefs.theme_transition_ms, 2000);
        assert_eq!(prefs.smooth_scroll_ms, 100);
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("save");
        let prefs = Preferences {
            skin: Skin::Paper,
            reduced_motion: Some(true),
            show_dot_nav: false,
            ..Preferences::default()
        };
        prefs.save(&dir).unwrap();
        assert_eq!(Preferences::load(&dir), prefs);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_or_corrupt_file_gives_defaults() {
        let dir = scratch_dir("corrupt");
        assert_eq!(Preferences::load(&dir), Preferences::default());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "{ not json").unwrap();
        assert_eq!(Preferences::load(&dir), Preferences::default());
        let _ = fs::remove_dir_all(&dir);
    }
}
