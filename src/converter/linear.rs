//! Linear interpolating converter.
//!
//! The read position is tracked as an exact rational number (in units of
//! `1 / output_rate` input samples), so the converter never drifts and an
//! input block always yields `floor` or `ceil` of `len * output_rate / input_rate`
//! frames. The last input sample of a block is kept so that interpolation
//! continues seamlessly into the next one.

use super::Converter;
use crate::error::Error;

#[derive(Debug, Clone)]
pub struct LinearConverter {
    input_rate: i64,
    output_rate: i64,

    /// Read position relative to the first sample of the next block, scaled
    /// by `output_rate`. `-output_rate` points at the held history sample.
    phase: i64,

    history: [f32; 2],
}

impl LinearConverter {
    pub fn reset(&mut self) {
        self.phase = -self.output_rate;
        self.history = [0.0; 2];
    }
}

impl Converter for LinearConverter {
    fn new(input_rate: u32, output_rate: u32) -> Result<Self, Error> {
        if input_rate == 0 || output_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }

        let output_rate = i64::from(output_rate);

        Ok(Self {
            input_rate: i64::from(input_rate),
            output_rate,
            phase: -output_rate,
            history: [0.0; 2],
        })
    }

    fn convert(
        &mut self,
        main: &[f32],
        aux: &[f32],
        out_main: &mut [f32],
        out_aux: &mut [f32],
    ) -> usize {
        let frames = main.len().min(aux.len());
        if frames == 0 {
            return 0;
        }

        let sample = |channel: &[f32], history: f32, index: i64| -> f32 {
            if index < 0 {
                history
            } else {
                channel[index as usize]
            }
        };

        // Positions up to, but excluding, the last input sample can be
        // interpolated without looking ahead into the next block.
        let end = (frames as i64 - 1) * self.output_rate;
        let capacity = out_main.len().min(out_aux.len());
        let mut written = 0;

        while self.phase < end && written < capacity {
            let index = self.phase.div_euclid(self.output_rate);
            let fraction = self.phase.rem_euclid(self.output_rate) as f32 / self.output_rate as f32;

            let a = sample(main, self.history[0], index);
            let b = main[(index + 1) as usize];
            out_main[written] = a + (b - a) * fraction;

            let a = sample(aux, self.history[1], index);
            let b = aux[(index + 1) as usize];
            out_aux[written] = a + (b - a) * fraction;

            written += 1;
            self.phase += self.input_rate;
        }

        // Positions that did not fit into the output are dropped.
        if self.phase < end {
            let skipped = (end - self.phase + self.input_rate - 1) / self.input_rate;
            self.phase += skipped * self.input_rate;
        }

        self.phase -= frames as i64 * self.output_rate;
        self.history = [main[frames - 1], aux[frames - 1]];

        written
    }
}
