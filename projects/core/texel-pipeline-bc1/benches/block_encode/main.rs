use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use texel_pipeline_bc1::{encode_bc1_block, Bc1AlphaMode, Bc1EncodeSettings};
use texel_pipeline_common::color_8888::Color8888;
use texel_pipeline_common::decoded_4x4_block::Decoded4x4Block;

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

/// 4096 blocks of smooth gradients with some noise, like typical photo content.
fn generate_blocks() -> Vec<Decoded4x4Block> {
    (0..4096u32)
        .map(|seed| {
            let mut block = Decoded4x4Block::new(Color8888::default());
            for (i, pixel) in block.pixels.iter_mut().enumerate() {
                let noise = (seed.wrapping_mul(31).wrapping_add(i as u32 * 17) % 23) as u8;
                let x = (i % 4) as u8 * 40;
                let y = (i / 4) as u8 * 30;
                *pixel = Color8888::new(
                    x.wrapping_add(noise),
                    y.wrapping_add(seed as u8),
                    noise.wrapping_mul(5),
                    if noise < 3 { 0 } else { 255 },
                );
            }
            block
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("BC1 Encode Blocks (RGBA8888 -> BC1)");
    let blocks = generate_blocks();
    group.throughput(criterion::Throughput::Elements(blocks.len() as u64));

    let settings = [
        ("opaque", Bc1EncodeSettings::default()),
        (
            "opaque_no_refine",
            Bc1EncodeSettings {
                refine: false,
                ..Default::default()
            },
        ),
        (
            "punch_through",
            Bc1EncodeSettings {
                alpha_mode: Bc1AlphaMode::PunchThrough,
                ..Default::default()
            },
        ),
    ];

    for (name, settings) in settings {
        group.bench_with_input(BenchmarkId::new("encode_bc1_block", name), &settings, |b, settings| {
            b.iter(|| {
                let mut total_error = 0u64;
                for block in &blocks {
                    total_error += encode_bc1_block(black_box(block), *settings).error as u64;
                }
                total_error
            })
        });
    }

    group.finish();
}

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
