//! Zero-delay-feedback state variable filters.

// Based on MIT-licensed code (c) 2014 by Olivier Gillet (ol.gillet@gmail.com)

const M_PI_F: f32 = core::f32::consts::PI;
const M_PI_POW_3: f32 = M_PI_F * M_PI_F * M_PI_F;
const M_PI_POW_5: f32 = M_PI_POW_3 * M_PI_F * M_PI_F;

/// Fast approximation of `tan(pi * f)` for `f` below `0.5`.
#[inline]
pub fn tan_fast(f: f32) -> f32 {
    let a = 3.260e-01 * M_PI_POW_3;
    let b = 1.823e-01 * M_PI_POW_5;
    let f2 = f * f;

    f * (M_PI_F + f2 * (a + b * f2))
}

/// Batch of `BATCH_SIZE` band-pass SVFs sharing one input, summed into one output.
#[derive(Debug, Clone)]
pub struct ResonatorSvf<const BATCH_SIZE: usize> {
    state_1: [f32; BATCH_SIZE],
    state_2: [f32; BATCH_SIZE],
}

impl<const BATCH_SIZE: usize> Default for ResonatorSvf<BATCH_SIZE> {
    fn default() -> Self {
        Self {
            state_1: [0.0; BATCH_SIZE],
            state_2: [0.0; BATCH_SIZE],
        }
    }
}

impl<const BATCH_SIZE: usize> ResonatorSvf<BATCH_SIZE> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.state_1.fill(0.0);
        self.state_2.fill(0.0);
    }

    /// Adds the band-pass outputs of all filters, weighted by `gain`, to `out`.
    #[inline]
    pub fn process_add(
        &mut self,
        f: &[f32; BATCH_SIZE],
        q: &[f32; BATCH_SIZE],
        gain: &[f32; BATCH_SIZE],
        in_: &[f32],
        out: &mut [f32],
    ) {
        let mut g = [0.0; BATCH_SIZE];
        let mut r_plus_g = [0.0; BATCH_SIZE];
        let mut h = [0.0; BATCH_SIZE];

        for i in 0..BATCH_SIZE {
            g[i] = tan_fast(f[i]);
            let r = 1.0 / q[i];
            h[i] = 1.0 / (1.0 + r * g[i] + g[i] * g[i]);
            r_plus_g[i] = r + g[i];
        }

        let mut state_1 = self.state_1;
        let mut state_2 = self.state_2;

        for (in_sample, out_sample) in in_.iter().zip(out.iter_mut()) {
            let mut s_out = 0.0;

            for i in 0..BATCH_SIZE {
                let hp = (*in_sample - r_plus_g[i] * state_1[i] - state_2[i]) * h[i];
                let bp = g[i] * hp + state_1[i];
                state_1[i] = g[i] * hp + bp;
                let lp = g[i] * bp + state_2[i];
                state_2[i] = g[i] * bp + lp;
                s_out += gain[i] * bp;
            }

            *out_sample += s_out;
        }

        self.state_1 = state_1;
        self.state_2 = state_2;
    }
}
