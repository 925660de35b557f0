//! Color to sound mapping
//!
//! Hue picks the pitch, saturation picks the waveform and lightness
//! scales the volume.

use super::mapper::round2;
use super::{LinearMapper, Mapper};
use serde::Serialize;

/// Frequency reported when a color cannot be parsed
const FALLBACK_FREQUENCY: f64 = 440.0;

/// RGB color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise complement (255 - c)
    pub fn complement(&self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSL color: hue in degrees [0, 360), saturation and lightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Oscillator shape chosen from saturation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Vivid colors get brighter waveforms
    pub fn from_saturation(saturation: f64) -> Self {
        if saturation > 0.7 {
            Self::Sawtooth
        } else if saturation > 0.4 {
            Self::Triangle
        } else {
            Self::Sine
        }
    }
}

/// Sound parameters derived from a color, or an error for unparsable input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSoundResult {
    pub frequency: f64,
    pub waveform: Waveform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_modifier: Option<f64>,
    pub rgb: Option<Rgb>,
    pub hsl: Option<Hsl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complementary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ColorSoundResult {
    fn invalid() -> Self {
        Self {
            frequency: FALLBACK_FREQUENCY,
            waveform: Waveform::Sine,
            volume_modifier: None,
            rgb: None,
            hsl: None,
            complementary: None,
            error: Some("Invalid color format".to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Parse `#rgb` / `#rrggbb` (the `#` is optional)
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Standard RGB to HSL conversion
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: sector / 6.0 * 360.0,
        s,
        l,
    }
}

/// Complementary color of a hex string; black when the input is not a color
pub fn complementary(hex: &str) -> String {
    hex_to_rgb(hex)
        .map(|rgb| rgb.complement())
        .unwrap_or(Rgb::new(0, 0, 0))
        .to_hex()
}

/// Derive sound parameters from a hex color
pub fn color_to_sound(hex: &str) -> ColorSoundResult {
    let Some(rgb) = hex_to_rgb(hex) else {
        tracing::debug!(input = hex, "rejected color");
        return ColorSoundResult::invalid();
    };

    let hsl = rgb_to_hsl(rgb);
    let frequency = LinearMapper::hue_to_frequency().map(hsl.h);
    let volume = LinearMapper::lightness_to_volume().map(hsl.l);

    ColorSoundResult {
        frequency: round2(frequency),
        waveform: Waveform::from_saturation(hsl.s),
        volume_modifier: Some(round2(volume)),
        rgb: Some(rgb),
        hsl: Some(Hsl {
            h: round2(hsl.h),
            s: round2(hsl.s),
            l: round2(hsl.l),
        }),
        complementary: Some(complementary(hex)),
        error: None,
    }
}
