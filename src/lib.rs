#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "rubato")), no_std)]

extern crate alloc;

pub mod converter;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod instance;
pub mod model;
pub mod parameter;
pub mod patch;
pub mod stream;

pub use converter::{Converter, LinearConverter};
pub use engine::{Engine, Excitation, ModalEngine};
pub use error::Error;
pub use instance::Instance;
pub use model::{ModelSelection, ResonatorModel, EASTER_EGG_MODEL};
pub use parameter::Parameter;
pub use patch::{Patch, PerformanceState};

/// Sample rate the engine runs at in Hz.
pub const INTERNAL_SAMPLE_RATE: u32 = 32000;

/// Number of samples the engine renders per block.
pub const BLOCK_SIZE: usize = 16;

/// Number of host rate samples allocated per output channel by `Instance::init`.
///
/// This is an upper bound for what one internal block can expand to at
/// `host_sample_rate`, with a lot of headroom. Returns `None` when the size
/// does not fit in a `usize`.
pub const fn host_buffer_capacity(host_sample_rate: u32) -> Option<usize> {
    let rate = INTERNAL_SAMPLE_RATE as usize;
    rate.checked_mul(1 + host_sample_rate as usize / rate)
}
