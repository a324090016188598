//! Fast pseudo random number generator.

// Based on MIT-licensed code (c) 2012 by Olivier Gillet (ol.gillet@gmail.com)

/// Linear congruential generator. Each engine owns one, so instances never
/// share noise state.
#[derive(Debug, Clone)]
pub struct Random {
    state: u32,
}

impl Default for Random {
    fn default() -> Self {
        Self::new(0x21)
    }
}

impl Random {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn get_word(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value from `0.0` to `1.0`.
    #[inline]
    pub fn get_float(&mut self) -> f32 {
        self.get_word() as f32 / 4294967296.0
    }

    /// Uniform value from `-1.0` to `1.0`.
    #[inline]
    pub fn get_bipolar(&mut self) -> f32 {
        self.get_float() * 2.0 - 1.0
    }
}
