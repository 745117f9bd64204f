use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nts_rs::{
    deserialize_binary, deserialize_text, random_tree_seeded, serialize_binary, serialize_text,
    NGramTree,
};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

/// Deterministic workload: same seed, graded node counts.
fn workload(size: usize) -> NGramTree {
    random_tree_seeded(42, 10, 6, size)
}

fn encoded_binary(tree: &NGramTree) -> Vec<u8> {
    let mut bytes = Vec::new();
    serialize_binary(tree, &mut bytes).unwrap();
    bytes
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in SIZES.iter() {
        let tree = workload(*size);

        group.bench_with_input(BenchmarkId::new("binary", size), &tree, |b, tree| {
            b.iter(|| {
                let mut bytes = Vec::new();
                serialize_binary(black_box(tree), &mut bytes).unwrap();
                black_box(bytes)
            });
        });

        group.bench_with_input(BenchmarkId::new("text", size), &tree, |b, tree| {
            b.iter(|| black_box(serialize_text(black_box(tree)).unwrap()));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in SIZES.iter() {
        let tree = workload(*size);
        let bytes = encoded_binary(&tree);
        let text = serialize_text(&tree).unwrap();

        group.bench_with_input(BenchmarkId::new("binary", size), &bytes, |b, bytes| {
            b.iter(|| black_box(deserialize_binary(&mut bytes.as_slice()).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("text", size), &text, |b, text| {
            b.iter(|| black_box(deserialize_text(black_box(text)).unwrap()));
        });
    }

    group.finish();
}

fn bench_tree_walks(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_walks");

    for size in SIZES.iter() {
        let tree = workload(*size);

        group.bench_with_input(BenchmarkId::new("node_count", size), &tree, |b, tree| {
            b.iter(|| black_box(tree.node_count()));
        });

        group.bench_with_input(BenchmarkId::new("deep_equals", size), &tree, |b, tree| {
            let other = tree.clone();
            b.iter(|| black_box(tree.deep_equals(&other)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_tree_walks);
criterion_main!(benches);
