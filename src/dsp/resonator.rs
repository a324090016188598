//! Modal resonator: a bank of band-pass modes with stretchable partials.
//!
//! Even partials feed the main output and odd partials the aux output, which
//! gives the stereo image a natural spread.

// Based on MIT-licensed code (c) 2016 by Emilie Gillet (emilie.o.gillet@gmail.com)

#[allow(unused_imports)]
use num_traits::float::Float;

use super::filter::ResonatorSvf;
use super::units::semitones_to_ratio;

pub const NUM_MODES: usize = 16;
pub const MODE_BATCH_SIZE: usize = 4;

const MODES_PER_CHANNEL: usize = NUM_MODES / 2;
const BATCHES_PER_CHANNEL: usize = MODES_PER_CHANNEL / MODE_BATCH_SIZE;

#[derive(Debug, Clone, Default)]
pub struct Resonator {
    main_filters: [ResonatorSvf<MODE_BATCH_SIZE>; BATCHES_PER_CHANNEL],
    aux_filters: [ResonatorSvf<MODE_BATCH_SIZE>; BATCHES_PER_CHANNEL],
}

impl Resonator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        for filter in self.main_filters.iter_mut() {
            filter.reset();
        }
        for filter in self.aux_filters.iter_mut() {
            filter.reset();
        }
    }

    /// Render the bank, overwriting `main` and `aux`.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn process(
        &mut self,
        f0: f32,
        geometry: f32,
        brightness: f32,
        damping: f32,
        position: f32,
        in_: &[f32],
        main: &mut [f32],
        aux: &mut [f32],
    ) {
        let geometry = geometry.clamp(0.0, 1.0);
        let brightness = brightness.clamp(0.0, 1.0);
        let damping = damping.clamp(0.0, 1.0);

        let mut stiffness = (geometry - 0.25) * 0.3;
        let q_sqrt = semitones_to_ratio((1.0 - damping) * 79.7);
        let mut q = 500.0 * q_sqrt * q_sqrt;
        let q_loss = brightness * (2.0 - brightness) * 0.85 + 0.15;

        let mut mode_f = [[0.0; MODE_BATCH_SIZE]; NUM_MODES / MODE_BATCH_SIZE];
        let mut mode_q = [[0.0; MODE_BATCH_SIZE]; NUM_MODES / MODE_BATCH_SIZE];
        let mut mode_a = [[0.0; MODE_BATCH_SIZE]; NUM_MODES / MODE_BATCH_SIZE];

        let mut harmonic = f0;
        let mut stretch_factor = 1.0;

        for i in 0..NUM_MODES {
            let mode_frequency = f32::min(harmonic * stretch_factor, 0.45);
            let mode_attenuation = 1.0 - mode_frequency * 2.0;
            let amplitude = (core::f32::consts::PI * position * (i + 1) as f32).cos() * 0.25;

            // Interleave partials: even modes go to the main batches, odd
            // modes to the aux batches.
            let channel_offset = (i & 1) * BATCHES_PER_CHANNEL;
            let slot = i / 2;
            let batch = channel_offset + slot / MODE_BATCH_SIZE;
            let lane = slot % MODE_BATCH_SIZE;

            mode_f[batch][lane] = mode_frequency;
            let quality = 1.0 + mode_frequency * q;
            mode_q[batch][lane] = quality;
            // Band-pass peak gain grows with Q, compensate half of it.
            mode_a[batch][lane] = amplitude * mode_attenuation / quality.sqrt();

            stretch_factor += stiffness;
            if stiffness < 0.0 {
                // Keep partials from folding back into negative frequencies.
                stiffness *= 0.93;
            } else {
                stiffness *= 0.98;
            }
            harmonic += f0;
            q *= q_loss;
        }

        main.fill(0.0);
        aux.fill(0.0);

        for (n, filter) in self.main_filters.iter_mut().enumerate() {
            filter.process_add(&mode_f[n], &mode_q[n], &mode_a[n], in_, main);
        }
        for (n, filter) in self.aux_filters.iter_mut().enumerate() {
            let batch = BATCHES_PER_CHANNEL + n;
            filter.process_add(&mode_f[batch], &mode_q[batch], &mode_a[batch], in_, aux);
        }
    }
}
