use criterion::{criterion_group, criterion_main, Criterion};
use mazegen::{
    engine,
    generators,
    renderers,
    units::{CellPixels, Height, Width},
};

fn bench_draw_grid_200(c: &mut Criterion) {
    let maze_grid = engine::generate_maze(Width(200), Height(200), &mut generators::seeded_rng(200))
        .unwrap();
    let render_options = renderers::RenderOptionsBuilder::new()
        .cell_side_pixels_length(CellPixels(8))
        .build();

    c.bench_function("draw_grid_200", move |b| {
        b.iter(|| renderers::draw_square_grid(&maze_grid, &render_options).unwrap())
    });
}

criterion_group!(benches, bench_draw_grid_200);
criterion_main!(benches);
