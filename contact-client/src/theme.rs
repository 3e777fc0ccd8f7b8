use serde::{Deserialize, Serialize};

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Key the theme preference is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access preference file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Persistent string key-value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Dark mode toggle backed by a preference store.
pub struct ThemeToggle<S> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeToggle<S> {
    /// Uses the stored preference when there is one, the system preference
    /// otherwise. Any stored value other than `dark` means light.
    pub fn init(store: S, system_prefers_dark: bool) -> Self {
        let system = if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        };

        let stored = match store.get(THEME_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()).map(|v| match Theme::parse(&v) {
                Some(Theme::Dark) => Theme::Dark,
                _ => Theme::Light,
            }),
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {e}");
                None
            }
        };

        Self {
            store,
            theme: stored.unwrap_or(system),
        }
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn is_dark(&self) -> bool {
        matches!(self.theme, Theme::Dark)
    }

    /// The moon icon shows in dark mode, the sun icon in light mode.
    pub const fn dark_icon_visible(&self) -> bool {
        self.is_dark()
    }

    pub const fn light_icon_visible(&self) -> bool {
        !self.is_dark()
    }

    /// Flips the theme and persists the new choice. The switch takes effect
    /// even when persisting fails.
    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        self.theme = self.theme.toggled();
        self.store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
