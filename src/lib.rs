//! Synesthesia - turn text, colors and numbers into sound
//!
//! Letters become pitches on a musical scale, colors become tones and
//! waveforms, numbers become animated patterns. A small preference store
//! keeps per-user settings and presets.

pub mod config;
pub mod error;
pub mod mapping;
pub mod prefs;
pub mod server;

pub use config::SynesthesiaConfig;
pub use mapping::ContentMapper;
pub use prefs::PreferenceStore;
