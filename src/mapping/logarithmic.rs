//! Logarithmic mapper implementation
//!
//! Maps input values onto an exponential curve so equal input steps
//! land on equal pitch ratios.

use super::Mapper;

/// Logarithmic mapper for perceptual scaling
///
/// Uses the formula: output = out_min * (out_max/out_min)^((input - in_min)/(in_max - in_min))
pub struct LogarithmicMapper {
    name: String,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
}

impl LogarithmicMapper {
    /// Create a new logarithmic mapper
    ///
    /// Note: both output bounds are kept above zero for the log curve
    pub fn new(
        name: impl Into<String>,
        in_min: f64,
        in_max: f64,
        out_min: f64,
        out_max: f64,
    ) -> Self {
        Self {
            name: name.into(),
            in_min,
            in_max,
            out_min: out_min.max(0.001),
            out_max: out_max.max(0.001),
        }
    }

    /// Numbers 0-100 onto one decade of frequency, 100 Hz to 1 kHz
    pub fn number_band() -> Self {
        Self::new("number_band", 0.0, 100.0, 100.0, 1000.0)
    }
}

impl Mapper for LogarithmicMapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn map(&self, input: f64) -> f64 {
        let in_range = self.in_max - self.in_min;
        let normalized = if in_range.abs() < f64::EPSILON {
            0.5
        } else {
            (input - self.in_min) / in_range
        }
        .clamp(0.0, 1.0);

        let ratio = self.out_max / self.out_min;
        let output = self.out_min * ratio.powf(normalized);

        output.clamp(self.out_min.min(self.out_max), self.out_min.max(self.out_max))
    }
}
