//! Mapping system for turning user content into sound parameters
//!
//! Text becomes a pitch sequence, colors become a tone and waveform,
//! numbers become an animated pattern.

mod color;
mod content;
mod detect;
mod linear;
mod logarithmic;
mod mapper;
mod number;
mod scale;
mod text;

pub use color::{
    color_to_sound, complementary, hex_to_rgb, rgb_to_hsl, ColorSoundResult, Hsl, Rgb, Waveform,
};
pub use content::{AutoMapping, ContentMapper, EmptyMapping, Mapping};
pub use detect::{detect_content_type, detect_value, DetectedContent};
pub use linear::LinearMapper;
pub use logarithmic::LogarithmicMapper;
pub use mapper::Mapper;
pub use number::{number_to_pattern, parse_number, PatternKind, PatternResult, VisualParams};
pub use scale::{select_scale, ScaleKind};
pub use text::{
    char_to_frequency, frequency_to_note, text_to_frequencies, FrequencyMapping, TextMapping,
    BASE_FREQUENCY,
};
