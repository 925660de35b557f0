//! Linear mapper implementation

use super::Mapper;

/// Linear interpolation mapper
pub struct LinearMapper {
    name: String,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
}

impl LinearMapper {
    /// Create a new linear mapper. Output is clamped to the output range.
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
            out_min,
            out_max,
        }
    }

    /// Hue in degrees (0-360) to a tone between 200 and 800 Hz
    pub fn hue_to_frequency() -> Self {
        Self::new("hue_to_frequency", 0.0, 360.0, 200.0, 800.0)
    }

    /// Lightness (0-1) to a volume modifier between 0.5 and 1.0
    pub fn lightness_to_volume() -> Self {
        Self::new("lightness_to_volume", 0.0, 1.0, 0.5, 1.0)
    }
}

impl Mapper for LinearMapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn map(&self, input: f64) -> f64 {
        let in_range = self.in_max - self.in_min;
        let normalized = if in_range.abs() < f64::EPSILON {
            0.5
        } else {
            (input - self.in_min) / in_range
        };

        let output = self.out_min + normalized * (self.out_max - self.out_min);
        output.clamp(self.out_min.min(self.out_max), self.out_min.max(self.out_max))
    }
}
