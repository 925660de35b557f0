//! Preference store
//!
//! Reads fall back to defaults when storage fails; writes are best effort
//! and only logged on failure. Read-merge-write sequences run under one
//! lock so concurrent updates for a user are never lost.

use super::{MemoryBackend, PreferenceBackend, Preset, UserKey, UserPreferences};
use crate::error::PrefsError;
use serde_json::{Map, Value};
use std::sync::Mutex;

/// Per-user preferences on top of a storage backend
pub struct PreferenceStore {
    backend: Box<dyn PreferenceBackend>,
    write_lock: Mutex<()>,
}

impl PreferenceStore {
    /// Create a store over the given backend
    pub fn new(backend: impl PreferenceBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            write_lock: Mutex::new(()),
        }
    }

    /// A store that forgets everything on exit
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Current preferences, or the defaults for a user never written
    pub fn get(&self, key: &UserKey) -> UserPreferences {
        match self.backend.load(key) {
            Ok(Some(prefs)) => prefs,
            Ok(None) => UserPreferences::default(),
            Err(e) => {
                tracing::warn!(user = %key, error = %e, "preference read failed, using defaults");
                UserPreferences::default()
            }
        }
    }

    /// Shallow-merge `partial` into the user's preferences and save
    pub fn set(&self, key: &UserKey, partial: &Value) -> Result<UserPreferences, PrefsError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let updated = self.get(key).merged(partial)?;
        self.save(key, &updated);
        Ok(updated)
    }

    /// Add a preset with a content-derived id; returns the stored presets
    pub fn add_preset(&self, key: &UserKey, settings: Map<String, Value>) -> Vec<Preset> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut prefs = self.get(key);
        let preset = Preset::new(settings);
        tracing::debug!(user = %key, preset = %preset.id, "adding preset");
        prefs.push_preset(preset);
        self.save(key, &prefs);
        prefs.presets
    }

    fn save(&self, key: &UserKey, prefs: &UserPreferences) {
        if let Err(e) = self.backend.store(key, prefs) {
            tracing::warn!(
                user = %key,
                backend = self.backend.name(),
                error = %e,
                "preference write failed"
            );
        }
    }
}
