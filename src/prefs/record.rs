//! Preference records, presets and user keys

use crate::error::PrefsError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;

/// Most presets kept per user
pub const MAX_PRESETS: usize = 10;

const USER_KEY_LEN: usize = 16;
const PRESET_ID_LEN: usize = 8;

fn sha256_prefix(bytes: &[u8], len: usize) -> String {
    let digest = hex::encode(Sha256::digest(bytes));
    digest[..len].to_string()
}

/// Storage key for a user: a truncated SHA-256 of the raw identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserKey(String);

impl UserKey {
    /// Hash a raw identifier into a key. The raw identifier is never stored.
    pub fn from_identifier(identifier: &str) -> Self {
        Self::from_bytes(identifier.as_bytes())
    }

    /// Hash raw identifier bytes, which need not be UTF-8
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(sha256_prefix(bytes, USER_KEY_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named snapshot of settings with a content-derived id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl Preset {
    /// Build a preset, deriving its id from the settings (any incoming `id` is replaced)
    pub fn new(mut settings: Map<String, Value>) -> Self {
        settings.remove("id");
        let encoded = Value::Object(settings.clone()).to_string();
        Self {
            id: sha256_prefix(encoded.as_bytes(), PRESET_ID_LEN),
            settings,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.settings.get("name").and_then(Value::as_str)
    }
}

/// Per-user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub volume: f64,
    pub speed: f64,
    pub intensity: f64,
    pub scale: String,
    #[serde(default)]
    pub presets: Vec<Preset>,
    /// Extra keys set by clients, kept as given
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            volume: 50.0,
            speed: 5.0,
            intensity: 70.0,
            scale: "pentatonic".to_string(),
            presets: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl UserPreferences {
    /// Shallow-merge `partial` over this record: each top-level key replaces the current value
    pub fn merged(&self, partial: &Value) -> Result<Self, PrefsError> {
        let partial = partial.as_object().ok_or(PrefsError::NotAnObject)?;

        let mut current = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in partial {
            current.insert(key.clone(), value.clone());
        }

        Ok(serde_json::from_value(Value::Object(current))?)
    }

    /// Append a preset, keeping only the most recent `MAX_PRESETS`
    pub fn push_preset(&mut self, preset: Preset) {
        self.presets.push(preset);
        if self.presets.len() > MAX_PRESETS {
            let excess = self.presets.len() - MAX_PRESETS;
            self.presets.drain(..excess);
        }
    }
}
