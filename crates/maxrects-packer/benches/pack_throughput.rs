use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use maxrects_packer::prelude::*;

fn generate_rects(count: usize, min_size: u32, max_size: u32) -> Vec<Rectangle> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            Rectangle::new(w, h)
        })
        .collect()
}

fn bench_sort_logic(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_logic");

    let rect_counts = vec![50, 100, 200];

    for count in rect_counts {
        let rects = generate_rects(count, 16, 64);

        group.throughput(Throughput::Elements(count as u64));

        for (name, logic) in [
            ("MaxEdge", PackingLogic::MaxEdge),
            ("MaxArea", PackingLogic::MaxArea),
        ] {
            group.bench_with_input(BenchmarkId::new(name, count), &rects, |b, rects| {
                b.iter(|| {
                    let opts = PackerOptions::builder().logic(logic).build();
                    let mut packer: MaxRectsPacker =
                        MaxRectsPacker::new(2048, 2048, 2, opts).expect("packer");
                    packer.add_array(rects.clone());
                    black_box(packer)
                });
            });
        }
    }

    group.finish();
}

fn bench_incremental_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental_add");

    let rects = generate_rects(200, 16, 64);
    group.throughput(Throughput::Elements(rects.len() as u64));

    group.bench_with_input(
        BenchmarkId::new("unsorted", rects.len()),
        &rects,
        |b, rects| {
            b.iter(|| {
                let mut packer: MaxRectsPacker =
                    MaxRectsPacker::new(2048, 2048, 2, PackerOptions::default()).expect("packer");
                for rect in rects {
                    packer.add(rect.clone());
                }
                black_box(packer.bins().len())
            });
        },
    );

    group.finish();
}

fn bench_smart_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("smart_growth");

    let rects = generate_rects(100, 32, 128);
    group.throughput(Throughput::Elements(rects.len() as u64));

    for (name, smart, pot) in [
        ("fixed", false, false),
        ("smart", true, false),
        ("smart_pot", true, true),
    ] {
        group.bench_with_input(
            BenchmarkId::new(name, rects.len()),
            &rects,
            |b, rects| {
                b.iter(|| {
                    let opts = PackerOptions::builder()
                        .smart(smart)
                        .pot(pot)
                        .square(false)
                        .build();
                    let mut packer: MaxRectsPacker =
                        MaxRectsPacker::new(2048, 2048, 2, opts).expect("packer");
                    packer.add_array(rects.clone());
                    black_box(packer.bins().len())
                });
            },
        );
    }

    group.finish();
}

fn bench_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation");

    let rects = generate_rects(100, 32, 128);

    for allow_rotation in [false, true] {
        let rotation_str = if allow_rotation { "enabled" } else { "disabled" };

        group.bench_with_input(
            BenchmarkId::new(format!("rotation_{}", rotation_str), rects.len()),
            &rects,
            |b, rects| {
                b.iter(|| {
                    let opts = PackerOptions::builder()
                        .allow_rotation(allow_rotation)
                        .build();
                    let mut packer: MaxRectsPacker =
                        MaxRectsPacker::new(2048, 2048, 2, opts).expect("packer");
                    packer.add_array(rects.clone());
                    black_box(packer.bins().len())
                });
            },
        );
    }

    group.finish();
}

fn bench_save_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("save_load");

    let mut packer: MaxRectsPacker =
        MaxRectsPacker::new(2048, 2048, 2, PackerOptions::default()).expect("packer");
    packer.add_array(generate_rects(200, 16, 64));

    group.bench_function("save", |b| {
        b.iter(|| black_box(packer.save()));
    });

    let snapshots = packer.save();
    group.bench_function("load", |b| {
        b.iter(|| {
            let mut restored: MaxRectsPacker =
                MaxRectsPacker::new(2048, 2048, 2, PackerOptions::default()).expect("packer");
            restored.load(snapshots.clone());
            black_box(restored.bins().len())
        });
    });

    let json = save_to_json(&packer).expect("json");
    group.bench_function("save_to_json", |b| {
        b.iter(|| black_box(save_to_json(&packer).expect("json")));
    });
    group.bench_function("load_from_json", |b| {
        b.iter(|| {
            let mut restored: MaxRectsPacker =
                MaxRectsPacker::new(2048, 2048, 2, PackerOptions::default()).expect("packer");
            load_from_json(&mut restored, &json).expect("json");
            black_box(restored.bins().len())
        });
    });

    group.finish();
}

fn bench_repack(c: &mut Criterion) {
    let mut group = c.benchmark_group("repack");

    let rects = generate_rects(100, 16, 64);

    for quick in [true, false] {
        let mode = if quick { "quick" } else { "full" };
        group.bench_with_input(BenchmarkId::new(mode, rects.len()), &rects, |b, rects| {
            b.iter_batched(
                || {
                    let mut packer: MaxRectsPacker =
                        MaxRectsPacker::new(1024, 1024, 2, PackerOptions::default())
                            .expect("packer");
                    packer.add_array(rects.clone());
                    packer
                },
                |mut packer| {
                    packer.repack(quick);
                    black_box(packer.bins().len())
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sort_logic,
    bench_incremental_add,
    bench_smart_growth,
    bench_rotation,
    bench_save_load,
    bench_repack,
);
criterion_main!(benches);
