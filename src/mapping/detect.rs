//! Content type detection for raw user input

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

/// Classified input, serialized as `{"type": ..., "value": ...}`
#[derive(Debug, Clone, PartialEq)]
pub enum DetectedContent {
    /// `#rgb` or `#rrggbb`, kept as typed (with the `#`)
    Color(String),
    Number(f64),
    Text(String),
    Unknown,
}

impl DetectedContent {
    /// Type tag: "color", "number", "text" or "unknown"
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Unknown => "unknown",
        }
    }
}

impl Serialize for DetectedContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DetectedContent", 2)?;
        state.serialize_field("type", self.kind())?;
        match self {
            Self::Color(s) | Self::Text(s) => state.serialize_field("value", s)?,
            Self::Number(n) => state.serialize_field("value", n)?,
            Self::Unknown => state.serialize_field("value", &Option::<()>::None)?,
        }
        state.end()
    }
}

fn is_short_or_long_hex(digits: &str) -> bool {
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Classify a string: color, then number, then text
pub fn detect_content_type(content: &str) -> DetectedContent {
    let content = content.trim();
    if content.is_empty() {
        return DetectedContent::Unknown;
    }

    if let Some(digits) = content.strip_prefix('#') {
        if is_short_or_long_hex(digits) {
            return DetectedContent::Color(content.to_string());
        }
    }

    if let Ok(number) = content.parse::<f64>() {
        if number.is_finite() {
            return DetectedContent::Number(number);
        }
    }

    DetectedContent::Text(content.to_string())
}

/// Classify an arbitrary JSON value; anything but a string is unknown
pub fn detect_value(value: &Value) -> DetectedContent {
    match value {
        Value::String(s) => detect_content_type(s),
        _ => DetectedContent::Unknown,
    }
}
