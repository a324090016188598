//! Tests for the sample rate converters.

use modal_host::{Converter, Error, LinearConverter, BLOCK_SIZE, INTERNAL_SAMPLE_RATE};

fn convert_blocks(
    converter: &mut LinearConverter,
    input: &[f32],
    capacity: usize,
) -> (Vec<usize>, Vec<f32>) {
    let mut out_main = vec![0.0; capacity];
    let mut out_aux = vec![0.0; capacity];
    let mut counts = Vec::new();
    let mut output = Vec::new();

    for block in input.chunks_exact(BLOCK_SIZE) {
        let n = converter.convert(block, block, &mut out_main, &mut out_aux);
        assert_eq!(out_main[..n], out_aux[..n]);
        counts.push(n);
        output.extend_from_slice(&out_main[..n]);
    }

    (counts, output)
}

#[test]
fn rejects_zero_rates() {
    assert_eq!(
        LinearConverter::new(0, 48000).unwrap_err(),
        Error::InvalidSampleRate
    );
    assert_eq!(
        LinearConverter::new(INTERNAL_SAMPLE_RATE, 0).unwrap_err(),
        Error::InvalidSampleRate
    );
}

#[test]
fn frame_counts_match_ratio() {
    for output_rate in [16000, 22050, 32000, 44100, 48000, 96000, 192000] {
        let mut converter = LinearConverter::new(INTERNAL_SAMPLE_RATE, output_rate).unwrap();
        let blocks = 2000;
        let input = vec![0.0; blocks * BLOCK_SIZE];
        let (counts, _) = convert_blocks(&mut converter, &input, 1024);

        let exact = (blocks * BLOCK_SIZE) as f64 * output_rate as f64 / INTERNAL_SAMPLE_RATE as f64;
        let total: usize = counts.iter().sum();
        assert!((total as f64 - exact).abs() <= 1.0, "{output_rate} Hz: {total} vs {exact}");

        let per_block = BLOCK_SIZE as f64 * output_rate as f64 / INTERNAL_SAMPLE_RATE as f64;
        for n in counts {
            assert!(n as f64 >= per_block.floor() && n as f64 <= per_block.ceil());
        }
    }
}

#[test]
fn unity_ratio_delays_by_one_sample() {
    let mut converter = LinearConverter::new(32000, 32000).unwrap();
    let input: Vec<f32> = (0..4 * BLOCK_SIZE).map(|i| i as f32).collect();
    let (counts, output) = convert_blocks(&mut converter, &input, 64);

    assert_eq!(counts, vec![BLOCK_SIZE; 4]);
    assert_eq!(output[0], 0.0);
    for (i, sample) in output.iter().enumerate().skip(1) {
        assert_eq!(*sample, (i - 1) as f32);
    }
}

#[test]
fn ramp_stays_continuous_across_blocks() {
    let mut converter = LinearConverter::new(INTERNAL_SAMPLE_RATE, 44100).unwrap();
    let input: Vec<f32> = (0..64 * BLOCK_SIZE).map(|i| i as f32).collect();
    let (_, output) = convert_blocks(&mut converter, &input, 64);

    // A ramp of slope 1 at the input has slope 32000 / 44100 at the output.
    let step = INTERNAL_SAMPLE_RATE as f32 / 44100.0;
    for pair in output.windows(2).skip(2) {
        assert!((pair[1] - pair[0] - step).abs() < 1e-3);
    }
}

#[test]
fn stops_at_output_capacity() {
    let mut converter = LinearConverter::new(INTERNAL_SAMPLE_RATE, 96000).unwrap();
    let block = [1.0; BLOCK_SIZE];
    let mut out_main = [0.0; 10];
    let mut out_aux = [0.0; 10];

    assert_eq!(converter.convert(&block, &block, &mut out_main, &mut out_aux), 10);

    // The frames that did not fit are dropped and the next block starts clean.
    let mut out_main = [0.0; 64];
    let mut out_aux = [0.0; 64];
    for _ in 0..4 {
        let n = converter.convert(&block, &block, &mut out_main, &mut out_aux);
        assert_eq!(n, 3 * BLOCK_SIZE);
        assert!(out_main[..n].iter().all(|s| *s == 1.0));
    }
}

#[test]
fn reset_restores_initial_state() {
    let input: Vec<f32> = (0..8 * BLOCK_SIZE).map(|i| (i as f32 * 0.1).sin()).collect();

    let mut fresh = LinearConverter::new(INTERNAL_SAMPLE_RATE, 44100).unwrap();
    let (fresh_counts, fresh_output) = convert_blocks(&mut fresh, &input, 64);

    let mut used = LinearConverter::new(INTERNAL_SAMPLE_RATE, 44100).unwrap();
    convert_blocks(&mut used, &input[..3 * BLOCK_SIZE], 64);
    used.reset();
    let (counts, output) = convert_blocks(&mut used, &input, 64);

    assert_eq!(counts, fresh_counts);
    assert_eq!(output, fresh_output);
}

#[cfg(feature = "rubato")]
#[test]
fn rubato_frame_counts_follow_ratio() {
    use modal_host::converter::RubatoConverter;
    use modal_host::host_buffer_capacity;

    for output_rate in [16000, 44100, 48000, 96000, 192000] {
        let mut converter = RubatoConverter::new(INTERNAL_SAMPLE_RATE, output_rate).unwrap();
        let capacity = host_buffer_capacity(output_rate).unwrap();
        let mut out_main = vec![0.0; capacity];
        let mut out_aux = vec![0.0; capacity];

        let blocks = 2000;
        let block: Vec<f32> = (0..BLOCK_SIZE).map(|i| (i as f32 * 0.3).sin()).collect();
        let mut total = 0;
        for _ in 0..blocks {
            let n = converter.convert(&block, &block, &mut out_main, &mut out_aux);
            assert!(n <= capacity);
            assert!(out_main[..n].iter().all(|s| s.is_finite()));
            total += n;
        }

        // Allow for the resampler's start-up delay.
        let ratio = output_rate as f64 / INTERNAL_SAMPLE_RATE as f64;
        let exact = (blocks * BLOCK_SIZE) as f64 * ratio;
        let tolerance = 4.0 * BLOCK_SIZE as f64 * ratio + 2.0;
        assert!(
            (total as f64 - exact).abs() <= tolerance,
            "{output_rate} Hz: {total} vs {exact}"
        );
    }
}
