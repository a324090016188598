//! Karplus-Strong string with an optional curved bridge non-linearity.

// Based on MIT-licensed code (c) 2016 by Emilie Gillet (emilie.o.gillet@gmail.com)

#[allow(unused_imports)]
use num_traits::float::Float;

use super::delay_line::DelayLine;
use super::units::semitones_to_ratio;
use super::{crossfade, one_pole, soft_limit};
use crate::INTERNAL_SAMPLE_RATE;

pub const DELAY_LINE_SIZE: usize = 2048;

const MIN_DELAY: f32 = 4.0;
const MAX_DELAY: f32 = (DELAY_LINE_SIZE - 2) as f32;
const SEMITONES_PER_DECADE: f32 = 39.863137;

#[derive(Debug, Clone)]
pub struct String {
    string: DelayLine,
    damping_state: f32,
    dc_x: f32,
    dc_y: f32,
}

impl Default for String {
    fn default() -> Self {
        Self::new()
    }
}

impl String {
    pub fn new() -> Self {
        Self {
            string: DelayLine::new(DELAY_LINE_SIZE),
            damping_state: 0.0,
            dc_x: 0.0,
            dc_y: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.string.reset();
        self.damping_state = 0.0;
        self.dc_x = 0.0;
        self.dc_y = 0.0;
    }

    /// Render the string. `out` receives the bridge signal, `aux` a pickup
    /// tap whose distance from the bridge follows `position`.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn process(
        &mut self,
        f0: f32,
        non_linearity: f32,
        brightness: f32,
        damping: f32,
        position: f32,
        in_: &[f32],
        out: &mut [f32],
        aux: &mut [f32],
    ) {
        let delay = (1.0 / f0.max(1e-6)).clamp(MIN_DELAY, MAX_DELAY);
        let pickup_delay = (delay * (0.5 + 0.5 * position.clamp(0.0, 1.0))).max(1.0);

        // Loop gain per period for a -60 dB decay time of `t60` seconds.
        let sustain = 1.0 - damping.clamp(0.0, 1.0);
        let t60 = 0.05 + 8.0 * sustain * sustain;
        let feedback = semitones_to_ratio(
            -3.0 * delay / (t60 * INTERNAL_SAMPLE_RATE as f32) * SEMITONES_PER_DECADE,
        )
        .min(0.9995);
        let lp_coefficient = 0.1 + 0.8 * brightness.clamp(0.0, 1.0);
        let curved_bridge = non_linearity.clamp(0.0, 1.0);
        let bridge_drive = 1.0 + 8.0 * curved_bridge;

        for ((in_sample, out_sample), aux_sample) in
            in_.iter().zip(out.iter_mut()).zip(aux.iter_mut())
        {
            let mut s = self.string.read_frac(delay);

            if curved_bridge > 0.0 {
                // Asymmetric saturation; never increases the magnitude, so the
                // loop gain stays below unity.
                let drive = if s > 0.0 { bridge_drive } else { bridge_drive * 1.5 };
                s = crossfade(s, soft_limit(s * drive) / drive, curved_bridge);
            }

            one_pole(&mut self.damping_state, s, lp_coefficient);

            // DC blocker keeps the feedback loop centred.
            let x = self.damping_state;
            self.dc_y = self.dc_y * 0.995 + x - self.dc_x;
            self.dc_x = x;

            self.string.write(*in_sample + self.dc_y * feedback);
            *out_sample = self.dc_y;
            *aux_sample = self.string.read_frac(pickup_delay);
        }
    }
}
