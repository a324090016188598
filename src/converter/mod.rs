//! Sample rate conversion from the internal rate to the host rate.

pub mod linear;
#[cfg(feature = "rubato")]
pub mod rubato;

pub use linear::LinearConverter;
#[cfg(feature = "rubato")]
pub use self::rubato::RubatoConverter;

use crate::error::Error;

/// Converts fixed-size blocks of two channels to a variable number of
/// output frames.
pub trait Converter {
    /// Build a converter from `input_rate` to `output_rate`, both in Hz.
    fn new(input_rate: u32, output_rate: u32) -> Result<Self, Error>
    where
        Self: Sized;

    /// Convert one block per channel and return the number of frames written
    /// to the start of `out_main` and `out_aux`.
    ///
    /// Must never write beyond the output slices.
    fn convert(
        &mut self,
        main: &[f32],
        aux: &[f32],
        out_main: &mut [f32],
        out_aux: &mut [f32],
    ) -> usize;
}
