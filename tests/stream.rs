//! Tests for the host adapter.

mod wav_writer;

use modal_host::parameter::{Parameter, NUM_PARAMETERS, RESONATOR_MODEL_CHOICES};
use modal_host::stream::Voice;
use modal_host::{
    Converter, Engine, Error, Excitation, Instance, LinearConverter, ModelSelection, Patch,
    PerformanceState, ResonatorModel,
};

/// Engine outputting the gate in main and the note in aux.
#[derive(Debug, Default)]
struct PerformanceEngine {
    blocks: usize,
    patches: Vec<Patch>,
}

impl Engine for PerformanceEngine {
    fn render(
        &mut self,
        patch: &Patch,
        performance: &PerformanceState,
        _model: ModelSelection,
        _excitation: &Excitation,
        main: &mut [f32],
        aux: &mut [f32],
    ) {
        self.blocks += 1;
        self.patches.push(*patch);
        main.fill(if performance.gate { 1.0 } else { 0.0 });
        aux.fill(performance.note);
    }
}

/// Converter emitting `n` frames per block, cycling through `pattern`.
#[derive(Debug)]
struct PatternConverter {
    pattern: &'static [usize],
    position: usize,
}

impl Converter for PatternConverter {
    fn new(_input_rate: u32, _output_rate: u32) -> Result<Self, Error> {
        Ok(Self {
            pattern: &[3, 0, 5, 1],
            position: 0,
        })
    }

    fn convert(
        &mut self,
        main: &[f32],
        aux: &[f32],
        out_main: &mut [f32],
        out_aux: &mut [f32],
    ) -> usize {
        let n = self.pattern[self.position % self.pattern.len()];
        self.position += 1;
        out_main[..n].fill(main[0]);
        out_aux[..n].fill(aux[0]);
        n
    }
}

/// Converter that never produces anything.
#[derive(Debug)]
struct Mute;

impl Converter for Mute {
    fn new(_input_rate: u32, _output_rate: u32) -> Result<Self, Error> {
        Ok(Self)
    }

    fn convert(&mut self, _: &[f32], _: &[f32], _: &mut [f32], _: &mut [f32]) -> usize {
        0
    }
}

fn pattern_voice() -> Voice<PerformanceEngine, PatternConverter> {
    let mut instance = Instance::with_engine(PerformanceEngine::default());
    instance.init(48000).unwrap();
    Voice::from_instance(instance)
}

#[test]
fn midi_note_tracking() {
    let mut voice = pattern_voice();
    assert!(!voice.note_held());
    assert_eq!(voice.note(), 1.0);

    assert!(voice.handle_midi(&[0x90, 64, 100]));
    assert!(voice.note_held());
    assert_eq!(voice.note(), 64.0);

    // Note on with zero velocity is a note off and keeps the last note.
    assert!(voice.handle_midi(&[0x91, 70, 0]));
    assert!(!voice.note_held());
    assert_eq!(voice.note(), 64.0);

    assert!(voice.handle_midi(&[0x92, 50, 1]));
    assert!(voice.handle_midi(&[0x80, 50, 64]));
    assert!(!voice.note_held());
    assert_eq!(voice.note(), 50.0);

    assert!(!voice.handle_midi(&[0xB0, 21, 127]));
    assert!(!voice.handle_midi(&[0x90, 60]));
    assert!(!voice.note_held());
}

#[test]
fn fills_blocks_of_any_length() {
    let mut voice = pattern_voice();
    voice.handle_midi(&[0x90, 60, 100]);

    let mut left = vec![0.0; 100];
    let mut right = vec![0.0; 100];
    let mut rendered = 0;
    for size in [1, 7, 64, 3, 25] {
        voice.render(&mut left[..size], &mut right[..size]);
        assert!(left[..size].iter().all(|s| *s == 1.0));
        assert!(right[..size].iter().all(|s| *s == 60.0));
        rendered += size;
    }

    // Pattern 3, 0, 5, 1 yields 9 frames every 4 blocks.
    let blocks = voice.instance().engine().blocks;
    assert!(blocks * 9 / 4 + 5 >= rendered);
    assert!(blocks * 9 / 4 <= rendered + 9);
}

#[test]
fn note_changes_apply_on_next_engine_block() {
    let mut voice = pattern_voice();
    let mut left = [0.0; 3];
    let mut right = [0.0; 3];

    voice.handle_midi(&[0x90, 40, 100]);
    voice.render(&mut left, &mut right);
    assert_eq!(right, [40.0; 3]);

    // The first block is fully consumed, so the next frame comes from a new
    // engine block that sees the released gate.
    voice.handle_midi(&[0x80, 40, 0]);
    voice.render(&mut left[..1], &mut right[..1]);
    assert_eq!(left[0], 0.0);
}

#[test]
fn parameters_forwarded_only_on_change() {
    let mut voice = pattern_voice();
    let mut left = [0.0; 32];
    let mut right = [0.0; 32];

    voice.set_parameter(Parameter::ResonatorDamping, 0.9);
    voice.set_parameter(Parameter::ResonatorDamping, 0.9);
    voice.set_parameter(Parameter::Space, 1.5);
    voice.render(&mut left, &mut right);

    let patch = *voice.instance().engine().patches.last().unwrap();
    assert_eq!(patch.resonator_damping, 0.9);
    assert_eq!(patch.space, 1.5);

    voice.set_parameter(Parameter::ResonatorModel, 3.0);
    assert!(voice.instance().resonator_model().is_easter_egg());
    voice.set_parameter(Parameter::ResonatorModel, 2.0);
    assert_eq!(
        voice.instance().resonator_model(),
        ModelSelection::Concrete(ResonatorModel::Strings)
    );
}

#[test]
fn mute_converter_renders_silence() {
    let mut instance: Instance<PerformanceEngine, Mute> =
        Instance::with_engine(PerformanceEngine::default());
    instance.init(48000).unwrap();
    let mut voice = Voice::from_instance(instance);
    voice.handle_midi(&[0x90, 60, 100]);

    let mut left = [1.0; 8];
    let mut right = [1.0; 8];
    voice.render(&mut left, &mut right);

    assert_eq!(left, [0.0; 8]);
    assert_eq!(right, [0.0; 8]);
}

#[test]
fn very_low_host_rate_keeps_rendering() {
    // At 4 Hz one frame comes out roughly every 500 engine blocks.
    let mut instance: Instance<PerformanceEngine, LinearConverter> =
        Instance::with_engine(PerformanceEngine::default());
    instance.init(4).unwrap();
    let mut voice = Voice::from_instance(instance);
    voice.handle_midi(&[0x90, 60, 100]);

    let mut left = [0.0; 3];
    let mut right = [0.0; 3];
    voice.render(&mut left, &mut right);

    assert_eq!(left[1..], [1.0, 1.0]);
    assert_eq!(right[1..], [60.0, 60.0]);
    assert!(voice.instance().engine().blocks > 2 * 64);
}

#[test]
fn parameter_metadata() {
    assert_eq!(Parameter::ALL.len(), NUM_PARAMETERS);

    for parameter in Parameter::ALL {
        assert_eq!(Parameter::from_name(parameter.name()), Some(parameter));
        let (min, max) = parameter.range();
        let default = parameter.default_value();
        assert!(min <= default && default <= max);
    }

    assert_eq!(Parameter::from_name("exciterEnvShape"), Some(Parameter::ExciterEnvShape));
    assert_eq!(Parameter::from_name("unknown"), None);
    assert_eq!(Parameter::Space.range(), (0.0, 2.0));
    assert_eq!(Parameter::ResonatorModel.range().1 as usize + 1, RESONATOR_MODEL_CHOICES.len());
    assert!(Parameter::ResonatorModel.is_choice());
}

#[test]
fn default_voice_at_host_rate() {
    let mut voice = Voice::new(44100).unwrap();
    let mut left = vec![0.0; 44100];
    let mut right = vec![0.0; 44100];

    voice.handle_midi(&[0x90, 55, 100]);
    for (l, r) in left.chunks_mut(128).zip(right.chunks_mut(128)).take(172) {
        voice.render(l, r);
    }
    voice.handle_midi(&[0x80, 55, 0]);
    for (l, r) in left.chunks_mut(128).zip(right.chunks_mut(128)).skip(172) {
        voice.render(l, r);
    }

    assert!(left.iter().chain(right.iter()).all(|s| s.is_finite()));
    assert!(left.iter().any(|s| *s != 0.0));

    wav_writer::write_stereo("stream/default_voice.wav", 44100, &left, &right).ok();
}
