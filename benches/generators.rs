use criterion::{criterion_group, criterion_main, Criterion};
use seeded_mazes::{MazeConfigBuilder, MazeEngine};

fn bench_maze_32(c: &mut Criterion) {
    let config = MazeConfigBuilder::new().columns(32).rows(32).seed("bench").build().unwrap();

    c.bench_function("maze_32", move |b| {
        b.iter(|| MazeEngine::create(config.clone()).unwrap())
    });
}

fn bench_maze_default(c: &mut Criterion) {
    let config = MazeConfigBuilder::new().build().unwrap();

    c.bench_function("maze_default_25", move |b| {
        b.iter(|| MazeEngine::create(config.clone()).unwrap())
    });
}

fn bench_maze_128_thin_walls(c: &mut Criterion) {
    let config = MazeConfigBuilder::new()
        .columns(128)
        .rows(128)
        .path_width(1)
        .wall_width(1)
        .outer_wall_width(1)
        .seed("bench")
        .build()
        .unwrap();

    c.bench_function("maze_128_thin_walls", move |b| {
        b.iter(|| MazeEngine::create(config.clone()).unwrap())
    });
}

criterion_group!(benches, bench_maze_32, bench_maze_default, bench_maze_128_thin_walls);
criterion_main!(benches);
