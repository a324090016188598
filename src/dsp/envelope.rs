//! Block-rate exciter envelope.

use super::units::semitones_to_ratio;

/// Gate follower whose attack and release times are both set by one shape
/// control: low values give a percussive envelope, high values a slow swell.
#[derive(Debug, Clone, Default)]
pub struct ExciterEnvelope {
    value: f32,
}

impl ExciterEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Advance by one block and return the new level.
    #[inline]
    pub fn process(&mut self, gate: bool, shape: f32) -> f32 {
        let shape = shape.clamp(0.0, 1.0);
        let coefficient = if gate {
            0.8 * semitones_to_ratio(-60.0 * shape)
        } else {
            0.3 * semitones_to_ratio(-48.0 * shape)
        };
        let target = if gate { 1.0 } else { 0.0 };
        self.value += coefficient * (target - self.value);

        self.value
    }
}
