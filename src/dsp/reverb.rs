//! Stereo reverb for the "space" control.
//!
//! All comb and all-pass lines live in one buffer of `REVERB_BUFFER_SIZE`
//! samples, allocated when the reverb is created.

// Based on MIT-licensed code (c) 2014 by Emilie Gillet (emilie.o.gillet@gmail.com)

use alloc::boxed::Box;
use alloc::vec;

pub const REVERB_BUFFER_SIZE: usize = 32768;

const COMB_LENGTHS: [usize; 4] = [1013, 1079, 1160, 1231];
const ALLPASS_LENGTHS: [usize; 2] = [505, 400];
const ALLPASS_COEFFICIENT: f32 = 0.6;

/// Region of the shared buffer used as a circular delay.
#[derive(Debug, Clone, Copy)]
struct Line {
    base: usize,
    length: usize,
    cursor: usize,
}

impl Line {
    #[inline]
    fn read(&self, buffer: &[f32]) -> f32 {
        buffer[self.base + self.cursor]
    }

    #[inline]
    fn write_advance(&mut self, buffer: &mut [f32], sample: f32) {
        buffer[self.base + self.cursor] = sample;
        self.cursor += 1;
        if self.cursor == self.length {
            self.cursor = 0;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reverb {
    buffer: Box<[f32]>,
    combs: [Line; 4],
    allpasses: [Line; 2],
    lp_state: [f32; 4],
}

impl Default for Reverb {
    fn default() -> Self {
        Self::new()
    }
}

impl Reverb {
    pub fn new() -> Self {
        let mut base = 0;
        let mut line = |length: usize| {
            let line = Line {
                base,
                length,
                cursor: 0,
            };
            base += length;
            line
        };

        let combs = COMB_LENGTHS.map(&mut line);
        let allpasses = ALLPASS_LENGTHS.map(&mut line);

        Self {
            buffer: vec![0.0; REVERB_BUFFER_SIZE].into_boxed_slice(),
            combs,
            allpasses,
            lp_state: [0.0; 4],
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        for line in self.combs.iter_mut().chain(self.allpasses.iter_mut()) {
            line.cursor = 0;
        }
        self.lp_state = [0.0; 4];
    }

    /// Mix the reverb into `main`/`aux` in place. `amount` from `0.0` (dry)
    /// to `1.0` (long tail, wide).
    #[inline]
    pub fn process(&mut self, amount: f32, main: &mut [f32], aux: &mut [f32]) {
        let amount = amount.clamp(0.0, 1.0);
        if amount <= 0.0 {
            return;
        }

        let feedback = 0.7 + 0.25 * amount;
        let damping = 0.3;
        let wet_gain = 0.35 * amount;
        let dry_gain = 1.0 - 0.3 * amount;
        let buffer = &mut self.buffer[..];

        for (main_sample, aux_sample) in main.iter_mut().zip(aux.iter_mut()) {
            let input = (*main_sample + *aux_sample) * 0.25;
            let mut wet = [0.0; 4];

            for (i, comb) in self.combs.iter_mut().enumerate() {
                let delayed = comb.read(buffer);
                self.lp_state[i] += damping * (delayed - self.lp_state[i]);
                comb.write_advance(buffer, input + self.lp_state[i] * feedback);
                wet[i] = delayed;
            }

            let mut left = wet[0] + wet[2];
            let mut right = wet[1] + wet[3];

            let [first, second] = &mut self.allpasses;
            left = allpass(first, buffer, left);
            right = allpass(second, buffer, right);

            *main_sample = *main_sample * dry_gain + left * wet_gain;
            *aux_sample = *aux_sample * dry_gain + right * wet_gain;
        }
    }
}

#[inline]
fn allpass(line: &mut Line, buffer: &mut [f32], sample: f32) -> f32 {
    let delayed = line.read(buffer);
    let write = sample + ALLPASS_COEFFICIENT * delayed;
    line.write_advance(buffer, write);

    delayed - ALLPASS_COEFFICIENT * write
}
