use criterion::{criterion_group, criterion_main, Criterion};
use texel_pipeline_bc4::{decode_bc4_block, decode_bc5_block, BC4_BLOCK_SIZE, BC5_BLOCK_SIZE};
use texel_pipeline_common::color_8888::Color8888;
use texel_pipeline_common::decoded_4x4_block::Decoded4x4Block;

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("BC4/BC5 Decode Blocks (-> RGBA8888)");

    // Set up the test data - 8MB of blocks, alternating between both ramp modes.
    let size = 8388608; // 8MB
    let mut input = vec![0u8; size];
    for (block_idx, block) in input.chunks_exact_mut(BC4_BLOCK_SIZE).enumerate() {
        block[0] = (block_idx % 251) as u8;
        block[1] = (block_idx % 241) as u8;
        for (i, byte) in block[2..].iter_mut().enumerate() {
            *byte = ((block_idx * (i + 2)) % 255) as u8;
        }
    }

    let mut output = vec![Decoded4x4Block::new(Color8888::default()); size / BC4_BLOCK_SIZE];
    group.throughput(criterion::Throughput::Bytes(size as u64));

    group.bench_function("decode_bc4_block", |b| {
        b.iter(|| {
            for (block, out) in input.chunks_exact(BC4_BLOCK_SIZE).zip(output.iter_mut()) {
                *out = unsafe { decode_bc4_block(block.as_ptr()) };
            }
        })
    });

    group.bench_function("decode_bc5_block", |b| {
        b.iter(|| {
            for (block, out) in input.chunks_exact(BC5_BLOCK_SIZE).zip(output.iter_mut()) {
                *out = unsafe { decode_bc5_block(block.as_ptr()) };
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
