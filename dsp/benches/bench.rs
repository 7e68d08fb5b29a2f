use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

use pdm_mic_dsp::pipeline::{FilterPipeline, Strategy};

// Matches the capture block handed over by the PDM driver.
const BUFFER_SIZE: usize = 256;

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut input = [0_u16; BUFFER_SIZE];
    let mut output = [0_i16; BUFFER_SIZE];

    let mut group = c.benchmark_group("pipeline");
    for (name, strategy) in [
        ("filtered", Strategy::Filtered),
        ("reference", Strategy::Reference),
        ("passthrough", Strategy::Passthrough),
    ] {
        let mut pipeline = FilterPipeline::with_strategy(strategy, 12);
        group.bench_function(name, |b| {
            b.iter(|| {
                input.iter_mut().for_each(|x| *x = rng.gen_range(0..4096));
                pipeline.process_buffer(black_box(&mut output), black_box(&input));
                output
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
