mod util;

use realfft::RealFftPlanner;
use tvconv::{Control, Convolution, ConvolverConfig, TvConvolver};
use util::*;

const SAMPLE_RATE: u32 = 44100;

fn render(
    config: &ConvolverConfig,
    planner: &mut RealFftPlanner<f32>,
    input: &[f32],
    response: &[f32],
    block_size: usize,
) -> Result<(Vec<f32>, usize, f64), Box<dyn std::error::Error>> {
    let mut convolver = TvConvolver::new(config, planner)?;
    convolver.load_response(response)?;

    let silence = vec![0.0; block_size];
    let mut output = vec![0.0; input.len()];

    let time = std::time::Instant::now();
    for (block_in, block_out) in input.chunks(block_size).zip(output.chunks_mut(block_size)) {
        convolver.process(
            block_in,
            &silence,
            Control::Held(1.0),
            Control::Held(0.0),
            block_out,
        );
    }
    let elapsed = time.elapsed().as_secs_f64() * 1000.0;

    Ok((output, convolver.latency(), elapsed))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let block_size = 64;
    let n_blocks = 400;
    let response_length = 2048;

    let mut planner = RealFftPlanner::<f32>::new();
    let response = generate_tail(response_length, SAMPLE_RATE, 0.01);
    let input = generate_sinusoid(n_blocks * block_size, 1300.0, SAMPLE_RATE, 0.5);

    let direct = ConvolverConfig::new(1, response_length);
    let partitioned = ConvolverConfig::new(block_size, response_length);

    let (output_a, latency_a, time_a) =
        render(&direct, &mut planner, &input, &response, block_size)?;
    println!("Direct took = {:.2} ms", time_a);

    let (output_b, latency_b, time_b) =
        render(&partitioned, &mut planner, &input, &response, block_size)?;
    println!("Partitioned took = {:.2} ms", time_b);

    let offset = latency_b - latency_a;
    let mut max_abs_diff: f32 = 0.;
    for (a, b) in std::iter::zip(&output_a, &output_b[offset..]) {
        max_abs_diff = max_abs_diff.max((a - b).abs());
    }
    println!("latency = {} samples, max_abs_diff = {:?}", offset, max_abs_diff);

    save_wav("output_direct.wav", &output_a, SAMPLE_RATE)?;
    save_wav("output_partitioned.wav", &output_b, SAMPLE_RATE)?;

    Ok(())
}
