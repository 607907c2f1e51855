//! Persisted visitor preferences (the theme flag).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::default_chatfolio_dir;
use crate::error::ChatError;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Storage abstraction for the theme preference.
pub trait PreferenceStore: Send + Sync {
    /// Stored theme, or the default when nothing was saved.
    fn load_theme(&self) -> Result<Theme, ChatError>;
    fn save_theme(&self, theme: Theme) -> Result<(), ChatError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct PreferenceFile {
    theme: Theme,
}

/// File-backed store writing `preferences.toml`.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: base_dir.into().join("preferences.toml"),
        }
    }

    /// Store under `~/.chatfolio`.
    pub fn new_default() -> Self {
        Self::new(default_chatfolio_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_theme(&self) -> Result<Theme, ChatError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Theme::default()),
            Err(err) => return Err(err.into()),
        };
        let file: PreferenceFile = toml::from_str(&raw)?;
        Ok(file.theme)
    }

    fn save_theme(&self, theme: Theme) -> Result<(), ChatError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(&PreferenceFile { theme })?)?;
        tracing::debug!(path = %self.path.display(), %theme, "saved theme preference");
        Ok(())
    }
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    theme: Mutex<Option<Theme>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_theme(&self) -> Result<Theme, ChatError> {
        let theme = self
            .theme
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(theme.unwrap_or_default())
    }

    fn save_theme(&self, theme: Theme) -> Result<(), ChatError> {
        *self
            .theme
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_means_dark() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(dir.path());
        assert_eq!(store.load_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn saved_theme_survives_a_new_store() {
        let dir = TempDir::new().unwrap();
        FilePreferenceStore::new(dir.path().join("nested"))
            .save_theme(Theme::Light)
            .unwrap();

        let reopened = FilePreferenceStore::new(dir.path().join("nested"));
        assert_eq!(reopened.load_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(dir.path());
        fs::write(store.path(), "theme = \"sepia\"").unwrap();
        assert!(matches!(store.load_theme(), Err(ChatError::Toml(_))));
    }

    #[test]
    fn toggle_flips_and_memory_store_remembers() {
        let store = MemoryPreferenceStore::default();
        let next = store.load_theme().unwrap().toggle();
        store.save_theme(next).unwrap();
        assert_eq!(store.load_theme().unwrap(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
    }
}
