//! DSP building blocks of the reference engine.

// Based on MIT-licensed code (c) 2014 by Emilie Gillet (emilie.o.gillet@gmail.com)

pub mod delay_line;
pub mod envelope;
pub mod filter;
pub mod random;
pub mod resonator;
pub mod reverb;
pub mod string;
pub mod units;

use crate::INTERNAL_SAMPLE_RATE;

/// Normalized frequency of A4 at the internal sample rate.
pub const A4: f32 = 440.0 / INTERNAL_SAMPLE_RATE as f32;

/// Normalized frequency (cycles per sample) of a MIDI note at the internal rate.
#[inline]
pub fn note_to_frequency(note: f32) -> f32 {
    A4 * units::semitones_to_ratio(note - 69.0)
}

#[inline]
pub fn one_pole(out: &mut f32, in_: f32, coefficient: f32) {
    *out += coefficient * (in_ - *out);
}

#[inline]
pub fn soft_limit(x: f32) -> f32 {
    x * (27.0 + x * x) / (27.0 + 9.0 * x * x)
}

#[inline]
pub fn soft_clip(x: f32) -> f32 {
    if x < -3.0 {
        -1.0
    } else if x > 3.0 {
        1.0
    } else {
        soft_limit(x)
    }
}

#[inline]
pub fn crossfade(a: f32, b: f32, fade: f32) -> f32 {
    a + (b - a) * fade
}
