use criterion::{criterion_group, criterion_main, Criterion};
use texel_pipeline_bc3::{decode_bc3_block, BC3_BLOCK_SIZE};
use texel_pipeline_common::color_8888::Color8888;
use texel_pipeline_common::decoded_4x4_block::Decoded4x4Block;

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("BC3 Decode Blocks (BC3 -> RGBA8888)");

    // Set up the test data - 8MB of BC3 blocks
    let bc3_size = 8388608; // 8MB
    let blocks_count = bc3_size / BC3_BLOCK_SIZE;

    let mut input = vec![0u8; bc3_size];
    for (block_idx, block) in input.chunks_exact_mut(BC3_BLOCK_SIZE).enumerate() {
        // Alpha half
        for (i, byte) in block[..8].iter_mut().enumerate() {
            *byte = ((block_idx * (i + 1)) % 255) as u8;
        }

        // Colour endpoints (RGB565) and indices
        block[8] = 0x40;
        block[9] = 0xF8;
        block[10] = 0x00;
        block[11] = 0xF8;
        for (i, byte) in block[12..].iter_mut().enumerate() {
            *byte = ((block_idx * (i + 4)) % 255) as u8;
        }
    }

    let mut output = vec![Decoded4x4Block::new(Color8888::default()); blocks_count];
    group.throughput(criterion::Throughput::Bytes(bc3_size as u64));

    group.bench_function("decode_bc3_block", |b| {
        b.iter(|| {
            for (block, out) in input.chunks_exact(BC3_BLOCK_SIZE).zip(output.iter_mut()) {
                *out = unsafe { decode_bc3_block(block.as_ptr()) };
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
