use std::hint::black_box;
use std::time::Instant;

use sandbox_common::{Canvas, Color, Rect};
use sandbox_kernel::{World, WorldConfig};

/// Counts rectangles without storing them.
struct CountingCanvas(usize);

impl Canvas for CountingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        black_box((rect, color));
        self.0 += 1;
    }
}

fn make_world(cols: usize, rows: usize) -> World {
    World::generate(WorldConfig {
        cols,
        rows,
        tile_size: 32,
        seed: 42,
    })
    .expect("bench world dimensions are valid")
}

fn bench_generate(cols: usize, rows: usize, iterations: usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(make_world(black_box(cols), black_box(rows)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  generate ({cols}x{rows}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_draw(cols: usize, rows: usize, iterations: usize) {
    let world = make_world(cols, rows);
    let mut canvas = CountingCanvas(0);
    let cam_y = world.pixel_height() / 2.0 - 360.0;

    let start = Instant::now();
    for i in 0..iterations {
        let cam_x = (i * 7 % (cols * 32 - 1280)) as f32;
        world.draw(&mut canvas, black_box(cam_x), black_box(cam_y), 1280.0, 720.0);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  draw 1280x720 viewport ({cols}x{rows} world, {iterations} iters): {per_iter:?}/iter, {} rects",
        canvas.0 / iterations
    );
}

fn bench_is_solid(cols: usize, rows: usize, iterations: usize) {
    let world = make_world(cols, rows);
    let w = world.pixel_width();
    let h = world.pixel_height();

    let start = Instant::now();
    let mut solid = 0usize;
    for i in 0..iterations {
        let x = (i as f32 * 13.7) % w;
        let y = (i as f32 * 5.3) % h;
        if world.is_solid_at(black_box(x), black_box(y)) {
            solid += 1;
        }
    }
    let elapsed = start.elapsed();
    println!("  is_solid_at ({iterations} queries): total {elapsed:?}, {solid} solid");
}

fn main() {
    println!("=== Tile World Benchmarks ===\n");

    println!("[Generation]");
    bench_generate(1_000, 300, 10);
    bench_generate(10_000, 300, 3);

    println!("\n[Viewport Draw]");
    // Cost should track the viewport, not the world width.
    bench_draw(1_000, 300, 1_000);
    bench_draw(10_000, 300, 1_000);

    println!("\n[Solidity Queries]");
    bench_is_solid(10_000, 300, 1_000_000);

    println!("\nDone.");
}
