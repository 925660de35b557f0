//! Configuration schema definitions

use crate::mapping::ScaleKind;
use crate::prefs::{JsonFileBackend, PreferenceStore};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynesthesiaConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversion settings
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Preference storage
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

impl SynesthesiaConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be between 1 and 65535");
        }
        if self.server.host.trim().is_empty() {
            bail!("Server host must not be empty");
        }

        if ScaleKind::from_name(&self.mapping.default_scale).is_none() {
            bail!(
                "Unknown default scale '{}' (expected pentatonic, major or minor)",
                self.mapping.default_scale
            );
        }

        if self.preferences.backend == BackendKind::File
            && self.preferences.path.as_os_str().is_empty()
        {
            bail!("File preference backend requires a path");
        }

        Ok(())
    }

    /// The configured default scale (pentatonic if the name is unknown)
    pub fn default_scale(&self) -> ScaleKind {
        ScaleKind::select(&self.mapping.default_scale)
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static frontend files (None = API only)
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

/// Conversion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Scale for text requests that name none (default: pentatonic)
    #[serde(default = "default_scale")]
    pub default_scale: String,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            default_scale: default_scale(),
        }
    }
}

fn default_scale() -> String { "pentatonic".to_string() }

/// Preference storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Backend type (default: file)
    #[serde(default)]
    pub backend: BackendKind,

    /// JSON file for the file backend (default: preferences.json)
    #[serde(default = "default_prefs_path")]
    pub path: PathBuf,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            path: default_prefs_path(),
        }
    }
}

impl PreferencesConfig {
    /// Open a preference store on the configured backend
    pub fn open_store(&self) -> PreferenceStore {
        match self.backend {
            BackendKind::File => PreferenceStore::new(JsonFileBackend::open(&self.path)),
            BackendKind::Memory => PreferenceStore::in_memory(),
        }
    }
}

fn default_prefs_path() -> PathBuf { PathBuf::from("preferences.json") }

/// Types of preference backends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// One JSON file on disk
    #[default]
    File,
    /// Process memory, lost on exit
    Memory,
}
