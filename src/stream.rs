//! Host adapter that fills buffers of any length from an [`Instance`].
//!
//! The instance produces a varying number of host rate samples per engine
//! block. `Voice` keeps a read position into the last rendered block and
//! calls `process` again whenever it has been consumed. It also tracks the
//! held note from incoming MIDI and only forwards parameter values that
//! actually changed.

use crate::converter::{Converter, LinearConverter};
use crate::engine::{Engine, ModalEngine};
use crate::error::Error;
use crate::instance::Instance;
use crate::parameter::{Parameter, NUM_PARAMETERS};
use crate::{BLOCK_SIZE, INTERNAL_SAMPLE_RATE};

/// Consecutive empty blocks after which `render` gives up and outputs silence.
///
/// Raised for host rates so low that a block legitimately yields no frames
/// most of the time.
const MIN_EMPTY_BLOCKS: usize = 64;

fn empty_block_limit(host_sample_rate: u32) -> usize {
    let block_output = BLOCK_SIZE as u64 * u64::from(host_sample_rate.max(1));
    let blocks_per_frame = u64::from(INTERNAL_SAMPLE_RATE).div_ceil(block_output) as usize;
    MIN_EMPTY_BLOCKS.max(2 * blocks_per_frame + 2)
}

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;

#[derive(Debug)]
pub struct Voice<E = ModalEngine, C = LinearConverter> {
    instance: Instance<E, C>,
    position: usize,
    length: usize,
    note_held: bool,
    note: f32,
    current_values: [Option<f32>; NUM_PARAMETERS],
}

impl Voice<ModalEngine, LinearConverter> {
    /// Create and initialize a voice with the bundled engine and converter.
    pub fn new(host_sample_rate: u32) -> Result<Self, Error> {
        let mut instance = Instance::new();
        instance.init(host_sample_rate)?;

        Ok(Self::from_instance(instance))
    }
}

impl<E: Engine, C: Converter> Voice<E, C> {
    /// Wrap an instance that has already been initialized.
    pub fn from_instance(instance: Instance<E, C>) -> Self {
        Self {
            instance,
            position: 0,
            length: 0,
            note_held: false,
            note: 1.0,
            current_values: [None; NUM_PARAMETERS],
        }
    }

    pub fn instance(&self) -> &Instance<E, C> {
        &self.instance
    }

    pub fn instance_mut(&mut self) -> &mut Instance<E, C> {
        &mut self.instance
    }

    pub fn into_instance(self) -> Instance<E, C> {
        self.instance
    }

    pub fn note_held(&self) -> bool {
        self.note_held
    }

    pub fn note(&self) -> f32 {
        self.note
    }

    /// Update the note state from a MIDI message.
    ///
    /// Returns `false` for messages other than note on/off, which the caller
    /// may pass on elsewhere.
    pub fn handle_midi(&mut self, message: &[u8]) -> bool {
        let [status, key, velocity, ..] = *message else {
            return false;
        };

        let mut kind = status & 0xF0;
        if kind == NOTE_ON && velocity == 0 {
            kind = NOTE_OFF;
        }

        match kind {
            NOTE_OFF => {
                self.note_held = false;
                log::trace!("Note off: {key}");
                true
            }
            NOTE_ON => {
                self.note_held = true;
                self.note = f32::from(key);
                log::trace!("Note on: {key}");
                true
            }
            _ => false,
        }
    }

    /// Forward `value` to the instance if it differs from the last value sent.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f32) {
        let current = &mut self.current_values[parameter as usize];
        if *current != Some(value) {
            *current = Some(value);
            self.instance.set_parameter(parameter, value);
        }
    }

    /// Fill both channels with the next `left.len()` frames.
    ///
    /// # Panics
    ///
    /// Panics if the instance has not been initialized.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        let max_empty_blocks = self
            .instance
            .sample_rate()
            .map_or(MIN_EMPTY_BLOCKS, empty_block_limit);
        let mut empty_blocks = 0;

        for (left_sample, right_sample) in left.iter_mut().zip(right.iter_mut()) {
            while self.position == self.length {
                if empty_blocks == max_empty_blocks {
                    *left_sample = 0.0;
                    *right_sample = 0.0;
                    break;
                }

                self.length = self.instance.process(self.note_held, self.note);
                self.position = 0;

                if self.length == 0 {
                    empty_blocks += 1;
                } else {
                    empty_blocks = 0;
                }
            }

            if self.position < self.length {
                *left_sample = self.instance.main_val(self.position);
                *right_sample = self.instance.aux_val(self.position);
                self.position += 1;
            }
        }
    }
}
