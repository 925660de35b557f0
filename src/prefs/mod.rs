//! User preference storage
//!
//! Users are identified by a hashed key. Each key maps to a small
//! preference record with a bounded preset history.

mod backend;
mod record;
mod store;

pub use backend::{JsonFileBackend, MemoryBackend, PreferenceBackend};
pub use record::{Preset, UserKey, UserPreferences, MAX_PRESETS};
pub use store::PreferenceStore;
