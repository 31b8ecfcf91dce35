use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kdmap::kdtree::{KDTree, KDTreeBuilder, KDTreeIndex};
use kdmap::{Mapper, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;

fn generate_colors(rng: &mut StdRng, n: usize) -> Vec<[u8; 3]> {
    (0..n).map(|_| [rng.gen(), rng.gen(), rng.gen()]).collect()
}

fn construct_kdtree(colors: &[[u8; 3]]) -> KDTree<u8, 3> {
    let mut builder = KDTreeBuilder::new(colors.len());
    for color in colors {
        builder.add(*color).unwrap();
    }
    builder.finish()
}

fn construct_rstar(colors: &[[u8; 3]]) -> RTree<[f64; 3]> {
    RTree::bulk_load(
        colors
            .iter()
            .map(|c| [c[0] as f64, c[1] as f64, c[2] as f64])
            .collect(),
    )
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let queries = generate_colors(&mut rng, 10_000);

    let mut group = c.benchmark_group("construction");
    for n in [1_000, 100_000] {
        let colors = generate_colors(&mut rng, n);
        group.bench_with_input(BenchmarkId::new("kdmap", n), &colors, |b, colors| {
            b.iter(|| construct_kdtree(colors))
        });
        group.bench_with_input(BenchmarkId::new("rstar", n), &colors, |b, colors| {
            b.iter(|| construct_rstar(colors))
        });
    }
    group.finish();

    let colors = generate_colors(&mut rng, 1_000);
    let tree = construct_kdtree(&colors);
    let rstar_tree = construct_rstar(&colors);

    c.bench_function("nearest (kdmap)", |b| {
        b.iter(|| {
            for query in &queries {
                tree.nearest(&Point::new(*query)).unwrap();
            }
        })
    });

    c.bench_function("nearest (rstar)", |b| {
        b.iter(|| {
            for query in &queries {
                let query = [query[0] as f64, query[1] as f64, query[2] as f64];
                rstar_tree.nearest_neighbor(&query).unwrap();
            }
        })
    });

    let mapper = Mapper::new(colors.iter().map(|c| Point::new(*c)).zip(0..)).unwrap();
    c.bench_function("mapper lookups", |b| {
        b.iter(|| {
            mapper
                .map(queries.iter().map(|q| Point::new(*q)))
                .filter(|payload| payload.is_ok())
                .count()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
