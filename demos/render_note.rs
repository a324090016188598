//! Render a short phrase through a voice at 44.1 kHz and write it to a WAV file.

use hound::{SampleFormat, WavSpec, WavWriter};
use simple_logger::SimpleLogger;

use modal_host::parameter::Parameter;
use modal_host::stream::Voice;

const SAMPLE_RATE: u32 = 44100;
const HOST_BLOCK_SIZE: usize = 128;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()?;

    let mut voice = Voice::new(SAMPLE_RATE)?;
    voice.set_parameter(Parameter::ResonatorBrightness, 0.6);
    voice.set_parameter(Parameter::Space, 0.5);

    let spec = WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create("render_note.wav", spec)?;

    let mut left = [0.0; HOST_BLOCK_SIZE];
    let mut right = [0.0; HOST_BLOCK_SIZE];
    let blocks_per_note = SAMPLE_RATE as usize / HOST_BLOCK_SIZE / 2;

    for (model, key) in [(0, 48), (1, 55), (2, 60), (3, 43)] {
        voice.set_parameter(Parameter::ResonatorModel, model as f32);
        voice.handle_midi(&[0x90, key, 100]);
        log::info!("Model {model}, note {key}");

        for n in 0..blocks_per_note {
            if n == blocks_per_note / 2 {
                voice.handle_midi(&[0x80, key, 0]);
            }
            voice.render(&mut left, &mut right);
            for (l, r) in left.iter().zip(right.iter()) {
                writer.write_sample(*l)?;
                writer.write_sample(*r)?;
            }
        }
    }

    writer.finalize()?;
    log::info!("Wrote render_note.wav");

    Ok(())
}
