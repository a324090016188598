//! Reference physical modelling engine: bow, blow and strike exciters driving
//! a modal bank, a non-linear string or a chord of strings, followed by a
//! stereo reverb.
//!
//! Easter egg mode replaces the exciters with a pair of slowly beating sine
//! drones fed into the modal bank.

// Based on MIT-licensed code (c) 2014 by Emilie Gillet (emilie.o.gillet@gmail.com)

#[allow(unused_imports)]
use num_traits::float::Float;

use super::{Engine, Excitation};
use crate::dsp::envelope::ExciterEnvelope;
use crate::dsp::random::Random;
use crate::dsp::resonator::Resonator;
use crate::dsp::reverb::Reverb;
use crate::dsp::string::String;
use crate::dsp::units::{self, semitones_to_ratio};
use crate::dsp::{note_to_frequency, one_pole, soft_clip};
use crate::model::{ModelSelection, ResonatorModel};
use crate::patch::{Patch, PerformanceState};
use crate::BLOCK_SIZE;

const NUM_STRINGS: usize = 3;
const MAX_MALLET_WIDTH: usize = 8;
const OUTPUT_GAIN: f32 = 2.0;

/// Chord intervals in semitones for the sympathetic strings, selected by geometry.
const CHORDS: [[f32; NUM_STRINGS]; 5] = [
    [0.0, 7.0, 12.0],
    [0.0, 4.0, 7.0],
    [0.0, 3.0, 7.0],
    [0.0, 5.0, 10.0],
    [0.0, 7.0, 19.0],
];

#[derive(Debug, Clone)]
pub struct ModalEngine {
    envelope: ExciterEnvelope,
    random: Random,
    resonator: Resonator,
    strings: [String; NUM_STRINGS],
    reverb: Reverb,

    bow_state: f32,
    blow_state: f32,
    strike_state: f32,
    previous_gate: bool,
    drone_phase: [f32; 2],

    excitation: [f32; BLOCK_SIZE],
    temp_main: [f32; BLOCK_SIZE],
    temp_aux: [f32; BLOCK_SIZE],
}

impl Default for ModalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalEngine {
    pub fn new() -> Self {
        units::init();

        Self {
            envelope: ExciterEnvelope::new(),
            random: Random::default(),
            resonator: Resonator::new(),
            strings: [String::new(), String::new(), String::new()],
            reverb: Reverb::new(),
            bow_state: 0.0,
            blow_state: 0.0,
            strike_state: 0.0,
            previous_gate: false,
            drone_phase: [0.0; 2],
            excitation: [0.0; BLOCK_SIZE],
            temp_main: [0.0; BLOCK_SIZE],
            temp_aux: [0.0; BLOCK_SIZE],
        }
    }

    /// Return to the state of a freshly constructed engine.
    pub fn reset(&mut self) {
        self.envelope.reset();
        self.random = Random::default();
        self.resonator.reset();
        for string in self.strings.iter_mut() {
            string.reset();
        }
        self.reverb.reset();
        self.bow_state = 0.0;
        self.blow_state = 0.0;
        self.strike_state = 0.0;
        self.previous_gate = false;
        self.drone_phase = [0.0; 2];
    }

    fn render_exciter(&mut self, patch: &Patch, gate: bool, excitation: &Excitation) {
        let rising_edge = gate && !self.previous_gate;
        let envelope = self.envelope.process(gate, patch.exciter_envelope_shape);

        let bow_level = patch.exciter_bow_level * envelope;
        let bow_timbre = patch.exciter_bow_timbre.clamp(0.0, 1.0);
        let bow_coefficient = 0.005 + 0.4 * bow_timbre * bow_timbre;

        let blow_level = patch.exciter_blow_level * envelope;
        let blow_meta = patch.exciter_blow_meta.clamp(0.0, 1.0);
        let blow_timbre = patch.exciter_blow_timbre.clamp(0.0, 1.0);
        let blow_coefficient = 0.02 + 0.6 * blow_timbre * blow_timbre;

        let strike_timbre = patch.exciter_strike_timbre.clamp(0.0, 1.0);
        let strike_coefficient = 0.05 + 0.9 * strike_timbre * strike_timbre;
        let hardness = patch.exciter_strike_meta.clamp(0.0, 1.0);
        let mallet_width = 1 + ((1.0 - hardness) * (MAX_MALLET_WIDTH - 1) as f32) as usize;

        for i in 0..BLOCK_SIZE {
            let bow_noise = self.random.get_bipolar();
            one_pole(&mut self.bow_state, bow_noise, bow_coefficient);

            let flow_noise = self.random.get_bipolar();
            let blow_source = flow_noise + (excitation.blow[i] - flow_noise) * blow_meta;
            one_pole(&mut self.blow_state, blow_source, blow_coefficient);

            let mut strike = excitation.strike[i];
            if rising_edge && i < mallet_width {
                // Raised-cosine mallet pulse, narrower for harder mallets.
                let phase = (i as f32 + 0.5) / mallet_width as f32;
                let pulse = 0.5 - 0.5 * (2.0 * core::f32::consts::PI * phase).cos();
                strike += pulse * 2.0 / mallet_width as f32;
            }
            one_pole(&mut self.strike_state, strike, strike_coefficient);

            self.excitation[i] = self.bow_state * bow_level * 4.0
                + self.blow_state * blow_level * 2.0
                + self.strike_state * patch.exciter_strike_level * 8.0;
        }

        self.previous_gate = gate;
    }

    fn render_drone(&mut self, f0: f32, gate: bool, geometry: f32) {
        let envelope = self.envelope.process(gate, 0.8);
        let beating = semitones_to_ratio(0.15 + geometry.clamp(0.0, 1.0) * 0.5);
        let increments = [f0, f0 * beating];

        for sample in self.excitation.iter_mut() {
            let mut drone = 0.0;
            for (phase, increment) in self.drone_phase.iter_mut().zip(increments) {
                *phase += increment;
                if *phase >= 1.0 {
                    *phase -= 1.0;
                }
                drone += (2.0 * core::f32::consts::PI * *phase).sin();
            }
            *sample = drone * envelope * 0.05;
        }

        self.previous_gate = gate;
    }

    fn render_strings(&mut self, patch: &Patch, f0: f32, main: &mut [f32], aux: &mut [f32]) {
        let chord_index =
            (patch.resonator_geometry.clamp(0.0, 1.0) * (CHORDS.len() - 1) as f32 + 0.5) as usize;
        let chord = CHORDS[chord_index.min(CHORDS.len() - 1)];

        main.fill(0.0);
        aux.fill(0.0);

        for (n, string) in self.strings.iter_mut().enumerate() {
            string.process(
                f0 * semitones_to_ratio(chord[n]),
                0.0,
                patch.resonator_brightness,
                patch.resonator_damping,
                patch.resonator_position,
                &self.excitation,
                &mut self.temp_main,
                &mut self.temp_aux,
            );

            // First string left, second right, third in the centre.
            let (main_gain, aux_gain) = match n {
                0 => (0.5, 0.15),
                1 => (0.15, 0.5),
                _ => (0.33, 0.33),
            };
            for i in 0..BLOCK_SIZE {
                main[i] += self.temp_main[i] * main_gain + self.temp_aux[i] * 0.1;
                aux[i] += self.temp_main[i] * aux_gain + self.temp_aux[i] * 0.1;
            }
        }
    }
}

impl Engine for ModalEngine {
    fn render(
        &mut self,
        patch: &Patch,
        performance: &PerformanceState,
        model: ModelSelection,
        excitation: &Excitation,
        main: &mut [f32],
        aux: &mut [f32],
    ) {
        let f0 = note_to_frequency(performance.note + performance.modulation).clamp(1e-4, 0.45);

        match model {
            ModelSelection::EasterEgg(_) => {
                self.render_drone(f0, performance.gate, patch.resonator_geometry);
                self.resonator.process(
                    f0,
                    patch.resonator_geometry,
                    patch.resonator_brightness,
                    patch.resonator_damping,
                    patch.resonator_position,
                    &self.excitation,
                    main,
                    aux,
                );
            }
            ModelSelection::Concrete(ResonatorModel::Modal) => {
                self.render_exciter(patch, performance.gate, excitation);
                self.resonator.process(
                    f0,
                    patch.resonator_geometry,
                    patch.resonator_brightness,
                    patch.resonator_damping,
                    patch.resonator_position,
                    &self.excitation,
                    main,
                    aux,
                );
            }
            ModelSelection::Concrete(ResonatorModel::String) => {
                self.render_exciter(patch, performance.gate, excitation);
                self.strings[0].process(
                    f0,
                    patch.resonator_geometry,
                    patch.resonator_brightness,
                    patch.resonator_damping,
                    patch.resonator_position,
                    &self.excitation,
                    main,
                    aux,
                );
            }
            ModelSelection::Concrete(ResonatorModel::Strings) => {
                self.render_exciter(patch, performance.gate, excitation);
                self.render_strings(patch, f0, main, aux);
            }
        }

        self.reverb.process(patch.space, main, aux);

        for sample in main.iter_mut().chain(aux.iter_mut()) {
            *sample = soft_clip(*sample * OUTPUT_GAIN);
        }
    }
}
