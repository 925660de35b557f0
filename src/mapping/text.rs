//! Text to pitch sequence mapping
//!
//! Letters walk up the selected scale, wrapping into higher octaves.
//! Digits climb chromatically from the base pitch. Whitespace becomes
//! a short rest; anything else sounds the base pitch.

use super::mapper::round2;
use super::ScaleKind;
use serde::Serialize;

/// Base frequency (A3)
pub const BASE_FREQUENCY: f64 = 220.0;

/// Reference pitch for note naming (A4)
const A4_HZ: f64 = 440.0;

/// MIDI note number of A4
const A4_MIDI: f64 = 69.0;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const NOTE_DURATION: f64 = 0.2;
const REST_DURATION: f64 = 0.1;

/// One input character and the tone it produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyMapping {
    /// Position of the character in the input
    pub index: usize,
    #[serde(rename = "char")]
    pub character: char,
    /// Frequency in Hz, 0 for rests
    pub frequency: f64,
    /// Note name such as "A3", or "rest"
    pub note: String,
    /// Duration in seconds
    pub duration: f64,
}

impl FrequencyMapping {
    fn is_rest(&self) -> bool {
        self.note == "rest"
    }
}

/// A full text conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMapping {
    pub mappings: Vec<FrequencyMapping>,
    pub total_duration: f64,
}

impl TextMapping {
    /// Convert text under the given scale
    pub fn from_text(text: &str, scale: ScaleKind) -> Self {
        let mappings = text_to_frequencies(text, scale);
        let total_duration = mappings.iter().map(|m| m.duration).sum();
        Self {
            mappings,
            total_duration,
        }
    }

    /// Number of sounding (non-rest) entries
    pub fn note_count(&self) -> usize {
        self.mappings.iter().filter(|m| !m.is_rest()).count()
    }
}

/// Frequency for the first character of `symbol`; empty input gives the base frequency
pub fn char_to_frequency(symbol: &str, scale: ScaleKind) -> f64 {
    symbol
        .chars()
        .next()
        .map_or(BASE_FREQUENCY, |ch| pitch_of(ch, scale.intervals()))
}

fn pitch_of(ch: char, intervals: &[u8]) -> f64 {
    let mut upper = ch.to_uppercase();
    let ch = match (upper.next(), upper.next()) {
        (Some(c), None) => c,
        _ => return BASE_FREQUENCY,
    };

    match ch {
        'A'..='Z' => {
            let note_index = (ch as u32 - 'A' as u32) as usize;
            let scale_index = note_index % intervals.len();
            let octave_offset = (note_index / intervals.len()) * 12;
            let semitones = intervals[scale_index] as usize + octave_offset;
            semitones_above_base(semitones as f64)
        }
        '0'..='9' => semitones_above_base((ch as u32 - '0' as u32) as f64),
        _ => BASE_FREQUENCY,
    }
}

fn semitones_above_base(semitones: f64) -> f64 {
    BASE_FREQUENCY * 2.0_f64.powf(semitones / 12.0)
}

/// Name the nearest equal-tempered note, e.g. 440 Hz is "A4"
pub fn frequency_to_note(frequency: f64) -> String {
    if frequency <= 0.0 || !frequency.is_finite() {
        return "rest".to_string();
    }

    let midi = (12.0 * (frequency / A4_HZ).log2() + A4_MIDI).round() as i64;
    let name = NOTE_NAMES[midi.rem_euclid(12) as usize];
    let octave = midi.div_euclid(12) - 1;
    format!("{}{}", name, octave)
}

/// Convert each character of `text` to a tone or rest, in order
pub fn text_to_frequencies(text: &str, scale: ScaleKind) -> Vec<FrequencyMapping> {
    let intervals = scale.intervals();

    text.chars()
        .enumerate()
        .map(|(index, character)| {
            if character.is_whitespace() {
                FrequencyMapping {
                    index,
                    character,
                    frequency: 0.0,
                    note: "rest".to_string(),
                    duration: REST_DURATION,
                }
            } else {
                let frequency = pitch_of(character, intervals);
                FrequencyMapping {
                    index,
                    character,
                    frequency: round2(frequency),
                    note: frequency_to_note(frequency),
                    duration: NOTE_DURATION,
                }
            }
        })
        .collect()
}
