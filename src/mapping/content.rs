//! ContentMapper: the entry points callers use
//!
//! The mapper holds only the scale used when a request names none;
//! every call takes its scale explicitly, so one mapper is shared freely.

use super::{
    color_to_sound, detect_content_type, detect_value, number_to_pattern, parse_number,
    ColorSoundResult, DetectedContent, PatternResult, ScaleKind, TextMapping,
};
use crate::error::MappingError;
use serde::Serialize;
use serde_json::Value;

/// Empty mapping for undetectable input, serialized as `{}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyMapping {}

/// Whatever mapping the detected content produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Mapping {
    Text(TextMapping),
    Color(ColorSoundResult),
    Number(PatternResult),
    Empty(EmptyMapping),
}

/// Detected type plus its mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoMapping {
    pub detected: DetectedContent,
    pub mapping: Mapping,
}

/// Converts user content into sound and pattern parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentMapper {
    default_scale: ScaleKind,
}

impl ContentMapper {
    /// Create a mapper with the given fallback scale
    pub fn new(default_scale: ScaleKind) -> Self {
        Self { default_scale }
    }

    /// Scale used when a request does not name one
    pub fn default_scale(&self) -> ScaleKind {
        self.default_scale
    }

    /// Resolve a requested scale name; absent means the default, unknown means pentatonic
    pub fn resolve_scale(&self, name: Option<&str>) -> ScaleKind {
        name.map_or(self.default_scale, ScaleKind::select)
    }

    pub fn detect(&self, content: &str) -> DetectedContent {
        detect_content_type(content)
    }

    pub fn detect_value(&self, content: &Value) -> DetectedContent {
        detect_value(content)
    }

    pub fn map_text(&self, text: &str, scale: ScaleKind) -> TextMapping {
        let mapping = TextMapping::from_text(text, scale);
        tracing::debug!(
            scale = %scale,
            entries = mapping.mappings.len(),
            notes = mapping.note_count(),
            "mapped text"
        );
        mapping
    }

    pub fn map_color(&self, hex: &str) -> ColorSoundResult {
        color_to_sound(hex)
    }

    /// Map a JSON number or numeric string; fails for anything else
    pub fn map_number(&self, number: &Value) -> Result<PatternResult, MappingError> {
        let number = parse_number(number)?;
        Ok(number_to_pattern(number))
    }

    /// Detect the content type and apply the matching conversion
    pub fn map_auto(&self, content: &Value) -> AutoMapping {
        let detected = self.detect_value(content);
        let mapping = match &detected {
            DetectedContent::Text(text) => Mapping::Text(self.map_text(text, self.default_scale)),
            DetectedContent::Color(hex) => Mapping::Color(self.map_color(hex)),
            DetectedContent::Number(n) => Mapping::Number(number_to_pattern(*n)),
            DetectedContent::Unknown => Mapping::Empty(EmptyMapping {}),
        };
        tracing::debug!(kind = detected.kind(), "auto-mapped content");
        AutoMapping { detected, mapping }
    }
}
