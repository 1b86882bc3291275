use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use texel_pipeline_bc1::{decode_bc1_block, Bc1DecodeSettings, BC1_BLOCK_SIZE};
use texel_pipeline_common::color_8888::Color8888;
use texel_pipeline_common::decoded_4x4_block::Decoded4x4Block;

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("BC1 Decode Blocks (BC1 -> RGBA8888)");

    // Set up the test data - 8MB of BC1 blocks
    let bc1_size = 8388608; // 8MB
    let blocks_count = bc1_size / BC1_BLOCK_SIZE;

    // Fill with valid BC1 blocks; half of them in 3-colour mode.
    let mut input = vec![0u8; bc1_size];
    for (block_idx, block) in input.chunks_exact_mut(BC1_BLOCK_SIZE).enumerate() {
        block[0] = 0x40;
        block[1] = if block_idx % 2 == 0 { 0xF8 } else { 0x00 };
        block[2] = 0x00;
        block[3] = 0xF8;
        for (i, byte) in block[4..].iter_mut().enumerate() {
            *byte = ((block_idx * (i + 4)) % 255) as u8;
        }
    }

    let mut output = vec![Decoded4x4Block::new(Color8888::default()); blocks_count];
    group.throughput(criterion::Throughput::Bytes(bc1_size as u64));

    group.bench_function("decode_bc1_block", |b| {
        b.iter(|| {
            let settings = black_box(Bc1DecodeSettings::default());
            for (block, out) in input.chunks_exact(BC1_BLOCK_SIZE).zip(output.iter_mut()) {
                *out = unsafe { decode_bc1_block(block.as_ptr(), settings) };
            }
        })
    });

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
