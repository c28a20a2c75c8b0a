// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_partition::{
    ColorMap, PartitionConfig, PartitionDatum, Shape, layout, run,
};

/// A complete tree with `fanout` children per node, `depth` levels below the root.
fn balanced(fanout: usize, depth: usize) -> PartitionDatum {
    if depth == 0 {
        return PartitionDatum::leaf("leaf", 1.0);
    }
    let name = if depth % 2 == 0 { "even" } else { "odd" };
    PartitionDatum::branch(name, (0..fanout).map(|_| balanced(fanout, depth - 1)))
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition/layout");

    for (fanout, depth) in [(2usize, 10usize), (4, 6), (16, 3), (512, 1)] {
        let tree = balanced(fanout, depth);
        let count = tree.node_count();
        group.throughput(Throughput::Elements(count as u64));

        for shape in [Shape::Linear, Shape::Angular] {
            group.bench_with_input(
                BenchmarkId::new(shape.tag(), format!("{fanout}x{depth}")),
                &tree,
                |b, tree| {
                    b.iter(|| black_box(layout(tree, shape, 1_000.0, 1_000.0)));
                },
            );
        }
    }

    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition/run");

    // Colors for half the categories; the rest take the fallback path.
    let colors = ColorMap::new().with("even", "#336699").with("leaf", "#cc9933");

    for shape in [Shape::Linear, Shape::Angular] {
        let config = PartitionConfig::new(shape, 1_000.0, 1_000.0)
            .with_colors(colors.clone())
            .with_tree(balanced(4, 6))
            .with_tree(balanced(16, 3));
        group.bench_with_input(BenchmarkId::new("batch", shape.tag()), &config, |b, config| {
            b.iter_batched(
                || config.clone(),
                |mut config| black_box(run(&mut config)),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_deserialize(c: &mut Criterion) {
    let config = PartitionConfig::new(Shape::Angular, 1_000.0, 1_000.0).with_tree(balanced(4, 6));
    let json = serde_json::to_string(&config).unwrap_or_else(|e| panic!("serialize: {e}"));

    c.bench_function("partition/deserialize_config", |b| {
        b.iter(|| {
            let config: PartitionConfig =
                serde_json::from_str(black_box(&json)).unwrap_or_else(|e| panic!("parse: {e}"));
            black_box(config)
        });
    });
}

criterion_group!(benches, bench_layout, bench_run, bench_deserialize);
criterion_main!(benches);
