//! Converter backed by the polynomial resampler of the `rubato` crate.

use alloc::string::ToString;

use ::rubato::{FastFixedIn, PolynomialDegree, Resampler};

use super::Converter;
use crate::error::Error;
use crate::BLOCK_SIZE;

pub struct RubatoConverter {
    resampler: FastFixedIn<f32>,
}

impl core::fmt::Debug for RubatoConverter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RubatoConverter").finish_non_exhaustive()
    }
}

impl Converter for RubatoConverter {
    fn new(input_rate: u32, output_rate: u32) -> Result<Self, Error> {
        if input_rate == 0 || output_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }

        let ratio = f64::from(output_rate) / f64::from(input_rate);
        let resampler = FastFixedIn::<f32>::new(ratio, 1.0, PolynomialDegree::Cubic, BLOCK_SIZE, 2)
            .map_err(|e| Error::Converter(e.to_string()))?;

        Ok(Self { resampler })
    }

    fn convert(
        &mut self,
        main: &[f32],
        aux: &[f32],
        out_main: &mut [f32],
        out_aux: &mut [f32],
    ) -> usize {
        let input: [&[f32]; 2] = [main, aux];
        let mut output: [&mut [f32]; 2] = [out_main, out_aux];

        match self
            .resampler
            .process_into_buffer(&input[..], &mut output[..], None)
        {
            Ok((_, written)) => written,
            Err(e) => {
                log::error!("Resampling failed: {e}");
                0
            }
        }
    }
}
