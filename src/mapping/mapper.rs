//! Mapper trait

/// A scaling function from one parameter range to another
pub trait Mapper: Send + Sync {
    /// Get the name of this mapper
    fn name(&self) -> &str;

    /// Map an input value to an output value
    fn map(&self, input: f64) -> f64;
}

/// Round to two decimal places, the precision every result reports
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
