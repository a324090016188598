//! Instance controller: owns the patch, the performance state, both
//! collaborators and all buffers, and steps the engine one block per call.

use alloc::boxed::Box;
use alloc::vec;

use crate::converter::{Converter, LinearConverter};
use crate::engine::{Engine, Excitation, ModalEngine};
use crate::error::Error;
use crate::model::{ModelSelection, EASTER_EGG_MODEL};
use crate::parameter::Parameter;
use crate::patch::{Patch, PerformanceState};
use crate::{host_buffer_capacity, BLOCK_SIZE, INTERNAL_SAMPLE_RATE};

/// Host rate side of the instance, created by `init`.
#[derive(Debug)]
struct HostOutput<C> {
    sample_rate: u32,
    converter: C,
    main: Box<[f32]>,
    aux: Box<[f32]>,
}

/// One monophonic voice.
///
/// All methods must be called from one context at a time, normally the audio
/// callback. Parameter changes take effect on the next call to `process`.
#[derive(Debug)]
pub struct Instance<E = ModalEngine, C = LinearConverter> {
    engine: E,
    patch: Patch,
    performance: PerformanceState,
    model: ModelSelection,
    excitation: Excitation,

    block_main: [f32; BLOCK_SIZE],
    block_aux: [f32; BLOCK_SIZE],

    output: Option<HostOutput<C>>,
    rendered: usize,
}

impl Instance<ModalEngine, LinearConverter> {
    /// Create an instance with the bundled engine and converter.
    pub fn new() -> Self {
        Self::with_engine(ModalEngine::new())
    }
}

impl Default for Instance<ModalEngine, LinearConverter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine, C: Converter> Instance<E, C> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            patch: Patch::default(),
            performance: PerformanceState::default(),
            model: ModelSelection::default(),
            excitation: Excitation::default(),
            block_main: [0.0; BLOCK_SIZE],
            block_aux: [0.0; BLOCK_SIZE],
            output: None,
            rendered: 0,
        }
    }

    /// Build the converter and allocate the host rate buffers.
    ///
    /// Must be called once before `process`. A second call is rejected with
    /// [`Error::AlreadyInitialized`] and leaves the instance untouched.
    pub fn init(&mut self, host_sample_rate: u32) -> Result<(), Error> {
        if let Some(output) = &self.output {
            log::warn!(
                "Ignoring init at {} Hz, already running at {} Hz",
                host_sample_rate,
                output.sample_rate
            );
            return Err(Error::AlreadyInitialized(output.sample_rate));
        }

        if host_sample_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }

        let capacity = host_buffer_capacity(host_sample_rate).ok_or(Error::InvalidSampleRate)?;
        let converter = C::new(INTERNAL_SAMPLE_RATE, host_sample_rate)?;

        log::debug!(
            "Initialized for {} Hz host rate, {} samples per output channel",
            host_sample_rate,
            capacity
        );

        self.output = Some(HostOutput {
            sample_rate: host_sample_rate,
            converter,
            main: vec![0.0; capacity].into_boxed_slice(),
            aux: vec![0.0; capacity].into_boxed_slice(),
        });
        self.rendered = 0;

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.output.is_some()
    }

    /// Host sample rate given to `init`.
    pub fn sample_rate(&self) -> Option<u32> {
        self.output.as_ref().map(|output| output.sample_rate)
    }

    /// Length of each host rate output buffer, `0` before `init`.
    pub fn capacity(&self) -> usize {
        self.output.as_ref().map_or(0, |output| output.main.len())
    }

    /// Render one engine block and convert it to the host rate.
    ///
    /// Returns the number of valid samples in the output buffers. They stay
    /// valid until the next call.
    ///
    /// # Panics
    ///
    /// Panics if the instance has not been initialized.
    pub fn process(&mut self, gate: bool, note: f32) -> usize {
        let Some(output) = self.output.as_mut() else {
            panic!("Instance::process called before Instance::init");
        };

        self.performance.gate = gate;
        self.performance.note = note;

        self.engine.render(
            &self.patch,
            &self.performance,
            self.model,
            &self.excitation,
            &mut self.block_main,
            &mut self.block_aux,
        );

        let written = output.converter.convert(
            &self.block_main,
            &self.block_aux,
            &mut output.main,
            &mut output.aux,
        );
        debug_assert!(written <= output.main.len());

        self.rendered = written;

        written
    }

    /// Number of valid samples from the last `process` call.
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// Main output sample `index` of the last rendered block.
    ///
    /// # Panics
    ///
    /// Panics if the instance has not been initialized or `index` is beyond
    /// the buffer capacity.
    #[inline]
    pub fn main_val(&self, index: usize) -> f32 {
        debug_assert!(index < self.rendered);
        self.host_output().main[index]
    }

    /// Aux output sample `index` of the last rendered block.
    ///
    /// # Panics
    ///
    /// Same as [`Instance::main_val`].
    #[inline]
    pub fn aux_val(&self, index: usize) -> f32 {
        debug_assert!(index < self.rendered);
        self.host_output().aux[index]
    }

    /// Valid main output samples of the last rendered block.
    pub fn main(&self) -> &[f32] {
        match &self.output {
            Some(output) => &output.main[..self.rendered],
            None => &[],
        }
    }

    /// Valid aux output samples of the last rendered block.
    pub fn aux(&self) -> &[f32] {
        match &self.output {
            Some(output) => &output.aux[..self.rendered],
            None => &[],
        }
    }

    fn host_output(&self) -> &HostOutput<C> {
        match &self.output {
            Some(output) => output,
            None => panic!("Instance sample accessed before Instance::init"),
        }
    }

    pub fn set_exciter_envelope_shape(&mut self, value: f32) {
        self.patch.exciter_envelope_shape = value;
    }

    pub fn set_exciter_bow_level(&mut self, value: f32) {
        self.patch.exciter_bow_level = value;
    }

    pub fn set_exciter_bow_timbre(&mut self, value: f32) {
        self.patch.exciter_bow_timbre = value;
    }

    pub fn set_exciter_blow_level(&mut self, value: f32) {
        self.patch.exciter_blow_level = value;
    }

    pub fn set_exciter_blow_meta(&mut self, value: f32) {
        self.patch.exciter_blow_meta = value;
    }

    pub fn set_exciter_blow_timbre(&mut self, value: f32) {
        self.patch.exciter_blow_timbre = value;
    }

    pub fn set_exciter_strike_level(&mut self, value: f32) {
        self.patch.exciter_strike_level = value;
    }

    pub fn set_exciter_strike_meta(&mut self, value: f32) {
        self.patch.exciter_strike_meta = value;
    }

    pub fn set_exciter_strike_timbre(&mut self, value: f32) {
        self.patch.exciter_strike_timbre = value;
    }

    pub fn set_resonator_geometry(&mut self, value: f32) {
        self.patch.resonator_geometry = value;
    }

    pub fn set_resonator_brightness(&mut self, value: f32) {
        self.patch.resonator_brightness = value;
    }

    pub fn set_resonator_damping(&mut self, value: f32) {
        self.patch.resonator_damping = value;
    }

    pub fn set_resonator_position(&mut self, value: f32) {
        self.patch.resonator_position = value;
    }

    pub fn set_space(&mut self, value: f32) {
        self.patch.space = value;
    }

    /// Select a resonator model by its host value.
    ///
    /// [`EASTER_EGG_MODEL`] enters easter egg mode and keeps the current
    /// model underneath; `0..=2` leave it and select that model. Other values
    /// are ignored.
    pub fn set_resonator_model(&mut self, value: i32) {
        if !self.model.apply(value) {
            log::warn!(
                "Ignoring unknown resonator model {} (expected 0 to {})",
                value,
                EASTER_EGG_MODEL
            );
        }
    }

    /// Switch easter egg mode without touching the concrete model.
    pub fn set_easter_egg(&mut self, enabled: bool) {
        if enabled {
            self.model.enter_easter_egg();
        } else {
            self.model.leave_easter_egg();
        }
    }

    pub fn resonator_model(&self) -> ModelSelection {
        self.model
    }

    /// Set a parameter by identifier. The resonator model is truncated to an
    /// integer.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f32) {
        match parameter {
            Parameter::ExciterEnvShape => self.set_exciter_envelope_shape(value),
            Parameter::ExciterBowLevel => self.set_exciter_bow_level(value),
            Parameter::ExciterBowTimbre => self.set_exciter_bow_timbre(value),
            Parameter::ExciterBlowLevel => self.set_exciter_blow_level(value),
            Parameter::ExciterBlowMeta => self.set_exciter_blow_meta(value),
            Parameter::ExciterBlowTimbre => self.set_exciter_blow_timbre(value),
            Parameter::ExciterStrikeLevel => self.set_exciter_strike_level(value),
            Parameter::ExciterStrikeMeta => self.set_exciter_strike_meta(value),
            Parameter::ExciterStrikeTimbre => self.set_exciter_strike_timbre(value),
            Parameter::ResonatorGeometry => self.set_resonator_geometry(value),
            Parameter::ResonatorBrightness => self.set_resonator_brightness(value),
            Parameter::ResonatorDamping => self.set_resonator_damping(value),
            Parameter::ResonatorPosition => self.set_resonator_position(value),
            Parameter::Space => self.set_space(value),
            Parameter::ResonatorModel => self.set_resonator_model(value as i32),
        }
    }

    /// External excitation fed to the engine on every block.
    pub fn excitation_mut(&mut self) -> &mut Excitation {
        &mut self.excitation
    }

    /// Copy up to `BLOCK_SIZE` samples into the blow input. Remaining samples
    /// keep their previous values.
    pub fn set_blow_input(&mut self, samples: &[f32]) {
        let len = samples.len().min(BLOCK_SIZE);
        self.excitation.blow[..len].copy_from_slice(&samples[..len]);
    }

    /// Copy up to `BLOCK_SIZE` samples into the strike input. Remaining
    /// samples keep their previous values.
    pub fn set_strike_input(&mut self, samples: &[f32]) {
        let len = samples.len().min(BLOCK_SIZE);
        self.excitation.strike[..len].copy_from_slice(&samples[..len]);
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
