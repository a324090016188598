//! Synthesis engine interface.

pub mod modal_engine;

pub use modal_engine::ModalEngine;

use crate::model::ModelSelection;
use crate::patch::{Patch, PerformanceState};
use crate::BLOCK_SIZE;

/// Renders one block of `BLOCK_SIZE` samples at the internal sample rate.
///
/// The patch is passed in on every block and must be read fresh each time;
/// implementations must not cache it across calls.
pub trait Engine {
    fn render(
        &mut self,
        patch: &Patch,
        performance: &PerformanceState,
        model: ModelSelection,
        excitation: &Excitation,
        main: &mut [f32],
        aux: &mut [f32],
    );
}

/// External excitation signals for one block.
///
/// The buffers are never cleared by the instance: whatever was written last
/// is fed to the engine on every subsequent block.
#[derive(Debug, Clone, PartialEq)]
pub struct Excitation {
    /// Signal fed into the blow exciter.
    pub blow: [f32; BLOCK_SIZE],

    /// Signal fed into the strike exciter.
    pub strike: [f32; BLOCK_SIZE],
}

impl Default for Excitation {
    fn default() -> Self {
        Self {
            blow: [0.0; BLOCK_SIZE],
            strike: [0.0; BLOCK_SIZE],
        }
    }
}

impl Excitation {
    pub fn clear(&mut self) {
        self.blow.fill(0.0);
        self.strike.fill(0.0);
    }
}
