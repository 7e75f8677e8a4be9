use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use crate::catalog::Language;

/// Storage key of the language preference
pub const LANGUAGE_KEY: &str = "goodkraken-language";

/// Durable key-value storage for client preferences
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Volatile store, mostly for tests
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, one entry per key
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/goodkraken/preferences.json`, when the platform has a config dir
    #[must_use]
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("goodkraken").join("preferences.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> HashMap<String, String> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return HashMap::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring unreadable preferences at {}: {e}", self.path.display());
            HashMap::new()
        })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&values).map_err(io::Error::other)?;
        std::fs::write(&self.path, json)
    }
}

/// The user's interface language, read once at startup and written on every change
pub struct LanguageContext {
    store: Arc<dyn PreferenceStore>,
    language: Language,
}

impl LanguageContext {
    /// Load the saved preference; unknown or missing codes keep the default
    pub fn load(store: Arc<dyn PreferenceStore>) -> Self {
        let language = store
            .get(LANGUAGE_KEY)
            .and_then(|code| Language::from_code(&code))
            .unwrap_or_default();

        Self { store, language }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Err(e) = self.store.set(LANGUAGE_KEY, language.code()) {
            warn!("Failed to persist language preference: {e}");
        }
    }
}
