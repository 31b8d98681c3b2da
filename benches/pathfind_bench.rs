use criterion::{black_box, criterion_group, criterion_main, Criterion};
use navfield::{BaseGrid, Decay, InfluenceMap, Point2};

fn clear_map(size: u16) -> InfluenceMap {
    let base = BaseGrid::new(size, size);
    InfluenceMap::from_grid(&base).unwrap()
}

fn threatened_map(size: u16) -> InfluenceMap {
    let base = BaseGrid::new(size, size);
    let mut map = InfluenceMap::from_grid(&base).unwrap();
    for i in 0..8 {
        let center = Point2::new((i * 4) as f64, (size / 2) as f64);
        map.add_influence(center, 4.0, 10.0, Decay::Linear { end_amount: 2.0 });
    }
    map
}

fn pathfind_direction_benchmark(c: &mut Criterion) {
    let map = clear_map(64);
    let start = Point2::new(0.5, 0.5);
    let goal = Point2::new(63.5, 63.5);

    c.bench_function("pathfind_direction_clear_64x64", |b| {
        b.iter(|| {
            black_box(map.pathfind_direction(black_box(start), black_box(goal), false));
        })
    });

    let threatened = threatened_map(64);
    c.bench_function("pathfind_direction_threatened_64x64", |b| {
        b.iter(|| {
            black_box(threatened.pathfind_direction(black_box(start), black_box(goal), false));
        })
    });
}

fn pathfind_path_benchmark(c: &mut Criterion) {
    let map = clear_map(64);
    let start = Point2::new(0.5, 0.5);
    let goal = Point2::new(63.5, 63.5);

    c.bench_function("pathfind_path_clear_64x64", |b| {
        b.iter(|| {
            black_box(map.pathfind_path(black_box(start), black_box(goal), false));
        })
    });
}

fn add_influence_benchmark(c: &mut Criterion) {
    let base = BaseGrid::new(128, 128);

    c.bench_function("add_influence_128x128", |b| {
        b.iter(|| {
            let mut map = InfluenceMap::from_grid(&base).unwrap();
            map.add_influence(
                black_box(Point2::new(64.0, 64.0)),
                black_box(30.0),
                black_box(10.0),
                Decay::Linear { end_amount: 1.0 },
            );
        })
    });
}

criterion_group!(
    benches,
    pathfind_direction_benchmark,
    pathfind_path_benchmark,
    add_influence_benchmark
);
criterion_main!(benches);
