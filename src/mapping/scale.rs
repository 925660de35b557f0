//! Musical scales for letter-to-pitch mapping

use serde::{Deserialize, Serialize};
use std::fmt;

const PENTATONIC: &[u8] = &[0, 2, 4, 7, 9];
const MAJOR: &[u8] = &[0, 2, 4, 5, 7, 9, 11];
const MINOR: &[u8] = &[0, 2, 3, 5, 7, 8, 10];

/// Scale definition (intervals in semitones from root)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    /// C D E G A
    #[default]
    Pentatonic,
    /// C D E F G A B
    Major,
    /// C D Eb F G Ab Bb
    Minor,
}

impl ScaleKind {
    /// Look up a scale by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pentatonic" => Some(Self::Pentatonic),
            "major" => Some(Self::Major),
            "minor" => Some(Self::Minor),
            _ => None,
        }
    }

    /// Look up a scale by name, falling back to pentatonic for anything unknown
    pub fn select(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }

    /// Get the name of this scale
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pentatonic => "pentatonic",
            Self::Major => "major",
            Self::Minor => "minor",
        }
    }

    /// Get the intervals
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Self::Pentatonic => PENTATONIC,
            Self::Major => MAJOR,
            Self::Minor => MINOR,
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semitone offsets for a scale name; unknown names get pentatonic
pub fn select_scale(name: &str) -> &'static [u8] {
    ScaleKind::select(name).intervals()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_table() {
        assert_eq!(select_scale("pentatonic"), &[0, 2, 4, 7, 9]);
        assert_eq!(select_scale("major"), &[0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(select_scale("minor"), &[0, 2, 3, 5, 7, 8, 10]);
    }

    #[test]
    fn test_unknown_scale_falls_back_to_pentatonic() {
        assert_eq!(select_scale("dorian"), PENTATONIC);
        assert_eq!(select_scale(""), PENTATONIC);
        assert_eq!(select_scale("MAJOR"), PENTATONIC);
        assert_eq!(ScaleKind::select("chromatic"), ScaleKind::Pentatonic);
    }

    #[test]
    fn test_from_name_is_strict() {
        assert_eq!(ScaleKind::from_name("minor"), Some(ScaleKind::Minor));
        assert!(ScaleKind::from_name("blues").is_none());
    }

    #[test]
    fn test_intervals_within_octave() {
        for kind in [ScaleKind::Pentatonic, ScaleKind::Major, ScaleKind::Minor] {
            assert!(!kind.intervals().is_empty());
            assert!(kind.intervals().iter().all(|&i| i < 12));
            assert!(kind.intervals().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_scale_serde_names() {
        let kind: ScaleKind = serde_yaml::from_str("major").unwrap();
        assert_eq!(kind, ScaleKind::Major);
        assert_eq!(serde_json::to_string(&ScaleKind::Minor).unwrap(), "\"minor\"");
        assert_eq!(ScaleKind::Pentatonic.to_string(), "pentatonic");
    }
}
