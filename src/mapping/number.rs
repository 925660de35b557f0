//! Number to pattern mapping
//!
//! Every field is a pure function of the input: magnitude drives pitch,
//! polygon shape and particle density, divisibility picks the motion.

use super::mapper::round2;
use super::{LogarithmicMapper, Mapper};
use crate::error::MappingError;
use serde::Serialize;
use serde_json::Value;

const MAX_OSCILLATORS: u32 = 5;
const MAX_PARTICLES: u32 = 100;

/// Motion pattern, chosen by divisibility of the signed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Steady,
    Pulse,
    Arpeggio,
    Sweep,
    Wave,
}

impl PatternKind {
    /// Checked in priority order: 7, 5, 3, 2
    pub fn for_number(number: f64) -> Self {
        let divisible_by = |m: f64| number.rem_euclid(m) == 0.0;
        if divisible_by(7.0) {
            Self::Wave
        } else if divisible_by(5.0) {
            Self::Sweep
        } else if divisible_by(3.0) {
            Self::Arpeggio
        } else if divisible_by(2.0) {
            Self::Pulse
        } else {
            Self::Steady
        }
    }
}

/// Visual parameters for a pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualParams {
    /// Polygon sides, 3-9
    pub sides: u32,
    pub rotation_speed: f64,
    /// Hue in degrees [0, 360)
    pub color_hue: f64,
    /// 0-100
    pub particle_count: u32,
}

/// Sound and visual pattern derived from a number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternResult {
    pub frequency: f64,
    pub pattern: PatternKind,
    /// 1-5
    pub oscillator_count: u32,
    pub visual: VisualParams,
    pub is_negative: bool,
    pub magnitude: f64,
}

/// Derive pattern parameters from a finite number
pub fn number_to_pattern(number: f64) -> PatternResult {
    let magnitude = number.abs();
    let whole = magnitude.floor();

    let frequency = LogarithmicMapper::number_band().map(magnitude % 100.0);

    PatternResult {
        frequency: round2(frequency),
        pattern: PatternKind::for_number(number),
        oscillator_count: ((magnitude / 10.0).floor() + 1.0).min(MAX_OSCILLATORS as f64) as u32,
        visual: VisualParams {
            sides: 3 + (whole % 7.0) as u32,
            rotation_speed: magnitude % 10.0 + 1.0,
            color_hue: (magnitude % 12.0) * 30.0,
            particle_count: whole.min(MAX_PARTICLES as f64) as u32,
        },
        is_negative: number < 0.0,
        magnitude,
    }
}

/// Read a number from a JSON value: numbers as-is, strings parsed after trimming
pub fn parse_number(value: &Value) -> Result<f64, MappingError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| MappingError::InvalidNumber(value.to_string()))
}
