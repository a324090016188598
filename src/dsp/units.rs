//! Pitch ratio conversion.

// Based on MIT-licensed code (c) 2012 by Emilie Gillet (emilie.o.gillet@gmail.com)

#[allow(unused_imports)]
use num_traits::float::Float;
use spin::Once;

const PITCH_RATIO_HIGH_SIZE: usize = 257;
const PITCH_RATIO_LOW_SIZE: usize = 256;

struct PitchRatioTables {
    high: [f32; PITCH_RATIO_HIGH_SIZE],
    low: [f32; PITCH_RATIO_LOW_SIZE],
}

static PITCH_RATIO_TABLES: Once<PitchRatioTables> = Once::new();

fn tables() -> &'static PitchRatioTables {
    PITCH_RATIO_TABLES.call_once(|| {
        let mut high = [0.0; PITCH_RATIO_HIGH_SIZE];
        let mut low = [0.0; PITCH_RATIO_LOW_SIZE];

        for (i, ratio) in high.iter_mut().enumerate() {
            *ratio = 2.0f32.powf((i as f32 - 128.0) / 12.0);
        }
        for (i, ratio) in low.iter_mut().enumerate() {
            *ratio = 2.0f32.powf(i as f32 / (PITCH_RATIO_LOW_SIZE as f32 * 12.0));
        }

        PitchRatioTables { high, low }
    })
}

/// Build the lookup tables so the first call on the audio path does not.
pub fn init() {
    tables();
}

/// Frequency ratio of an interval in semitones, valid from `-128.0` to `128.0`.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    let pitch = (semitones + 128.0).clamp(0.0, 256.0);
    let pitch_integral = pitch as usize;
    let pitch_fractional = pitch - pitch_integral as f32;
    let tables = tables();

    tables.high[pitch_integral]
        * tables.low[(pitch_fractional * PITCH_RATIO_LOW_SIZE as f32) as usize]
}
