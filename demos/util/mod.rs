#![allow(dead_code)]

use hound::{WavSpec, WavWriter};

pub fn generate_sinusoid(num_samples: usize, freq: f64, sample_rate: u32, gain: f64) -> Vec<f32> {
    use std::f64::consts::PI;

    (0..num_samples)
        .map(|i| {
            let t = (i as f64) / (sample_rate as f64);
            (gain * (2.0 * PI * freq * t).sin()) as f32
        })
        .collect()
}

/// Exponentially decaying noise, a crude room response.
pub fn generate_tail(num_samples: usize, sample_rate: u32, decay_seconds: f64) -> Vec<f32> {
    let mut state: u32 = 0x1234_5678;
    (0..num_samples)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state as f64 / u32::MAX as f64) * 2.0 - 1.0;
            let t = (i as f64) / (sample_rate as f64);
            (noise * (-t / decay_seconds).exp() * 0.05) as f32
        })
        .collect()
}

pub fn save_wav(filename: &str, samples: &[f32], sample_rate: u32) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(filename, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    println!("Saved: {}", filename);
    Ok(())
}
