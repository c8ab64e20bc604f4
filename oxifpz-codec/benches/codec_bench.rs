//! Performance benchmarks for oxifpz-codec.
//!
//! This suite measures:
//! - Compression/decompression throughput (MB/s) for f32 and f64 grids
//! - Behavior across data patterns (constant, smooth, noise)
//! - Achieved compression ratios per pattern

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxifpz_codec::{compress, decompress_f32, decompress_f64};
use std::hint::black_box;

/// Generate test fields for benchmarking.
mod test_data {
    /// Constant field - every sample identical (best case).
    pub fn constant(n: usize) -> Vec<f32> {
        vec![1.5; n]
    }

    /// Smooth field - integrated shaped noise, the codec's target workload.
    pub fn smooth(nx: usize, ny: usize, nz: usize) -> Vec<f32> {
        let mut seed = 1u32;
        let mut data: Vec<f32> = (0..nx * ny * nz)
            .map(|i| {
                if i == 0 {
                    return 0.0;
                }
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345) & 0x7FFF_FFFF;
                let v = 2.0 * (seed as f64 / (1u64 << 31) as f64) - 1.0;
                v.powi(9) as f32
            })
            .collect();
        for z in 0..nz {
            for y in 0..ny {
                for x in 1..nx {
                    let i = x + nx * (y + ny * z);
                    data[i] += data[i - 1];
                }
            }
        }
        for z in 0..nz {
            for y in 1..ny {
                for x in 0..nx {
                    let i = x + nx * (y + ny * z);
                    data[i] += data[x + nx * (y - 1 + ny * z)];
                }
            }
        }
        for z in 1..nz {
            for y in 0..ny {
                for x in 0..nx {
                    let i = x + nx * (y + ny * z);
                    data[i] += data[x + nx * (y + ny * (z - 1))];
                }
            }
        }
        data
    }

    /// Incompressible noise - random bit patterns (worst case).
    pub fn noise(n: usize) -> Vec<f32> {
        let mut seed = 0x1234_5678_9ABC_DEF0u64;
        (0..n)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                f32::from_bits((seed >> 24) as u32)
            })
            .collect()
    }
}

fn bench_compress_patterns(c: &mut Criterion) {
    let (nx, ny, nz) = (64usize, 64, 32);
    let n = nx * ny * nz;
    let patterns: [(&str, Vec<f32>); 3] = [
        ("constant", test_data::constant(n)),
        ("smooth", test_data::smooth(nx, ny, nz)),
        ("noise", test_data::noise(n)),
    ];

    let mut group = c.benchmark_group("compress_f32");
    group.throughput(Throughput::Bytes((n * 4) as u64));
    for (name, field) in &patterns {
        group.bench_with_input(BenchmarkId::from_parameter(name), field, |b, field| {
            b.iter(|| {
                compress(
                    black_box(field),
                    nx as u32,
                    ny as u32,
                    nz as u32,
                    1,
                )
                .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_decompress_patterns(c: &mut Criterion) {
    let (nx, ny, nz) = (64usize, 64, 32);
    let n = nx * ny * nz;
    let patterns: [(&str, Vec<f32>); 3] = [
        ("constant", test_data::constant(n)),
        ("smooth", test_data::smooth(nx, ny, nz)),
        ("noise", test_data::noise(n)),
    ];

    let mut group = c.benchmark_group("decompress_f32");
    group.throughput(Throughput::Bytes((n * 4) as u64));
    for (name, field) in &patterns {
        let compressed = compress(field, nx as u32, ny as u32, nz as u32, 1).unwrap();
        eprintln!(
            "{name}: {} -> {} bytes ({:.2} bits/value)",
            n * 4,
            compressed.len(),
            compressed.len() as f64 * 8.0 / n as f64
        );
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &compressed,
            |b, compressed| {
                b.iter(|| decompress_f32(black_box(compressed)).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_f64_roundtrip(c: &mut Criterion) {
    let (nx, ny, nz) = (48usize, 48, 24);
    let n = nx * ny * nz;
    let field: Vec<f64> = test_data::smooth(nx, ny, nz)
        .into_iter()
        .map(f64::from)
        .collect();

    let mut group = c.benchmark_group("f64");
    group.throughput(Throughput::Bytes((n * 8) as u64));
    group.bench_function("compress_smooth", |b| {
        b.iter(|| compress(black_box(&field), nx as u32, ny as u32, nz as u32, 1).unwrap());
    });
    let compressed = compress(&field, nx as u32, ny as u32, nz as u32, 1).unwrap();
    group.bench_function("decompress_smooth", |b| {
        b.iter(|| decompress_f64(black_box(&compressed)).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_compress_patterns,
    bench_decompress_patterns,
    bench_f64_roundtrip
);
criterion_main!(benches);
