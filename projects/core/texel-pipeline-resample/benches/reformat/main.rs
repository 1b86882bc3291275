use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use texel_pipeline_common::PixelFormat;
use texel_pipeline_resample::{reformat_buffer, BufferDesc, ReformatSettings};

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reformat 512x512 RGBA8");

    let size = 512;
    let src_desc = BufferDesc::tight(PixelFormat::R8G8B8A8Unorm, size, size, 1).unwrap();
    let src: Vec<u8> = (0..src_desc.slice_pitch)
        .map(|i| ((i * 7) ^ (i >> 11)) as u8)
        .collect();
    group.throughput(criterion::Throughput::Bytes(src.len() as u64));

    let targets = [
        ("to_rgba16f", PixelFormat::R16G16B16A16Float, size),
        ("half_size", PixelFormat::R8G8B8A8Unorm, size / 2),
        ("to_bc1", PixelFormat::Bc1Unorm, size),
        ("to_bc3", PixelFormat::Bc3Unorm, size),
    ];
    for (name, format, extent) in targets {
        let dst_desc = BufferDesc::tight(format, extent, extent, 1).unwrap();
        let mut dst = vec![0u8; dst_desc.slice_pitch];
        group.bench_with_input(BenchmarkId::new("reformat_buffer", name), &dst_desc, |b, dst_desc| {
            b.iter(|| {
                reformat_buffer(
                    &src_desc,
                    black_box(&src),
                    dst_desc,
                    &mut dst,
                    &ReformatSettings::default(),
                )
                .unwrap()
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
