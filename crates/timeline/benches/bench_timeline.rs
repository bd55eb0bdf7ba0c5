use std::hint::black_box;
use std::time::Instant;

use tileflip_timeline::{Ease, Repeat, StaggerDelay, Timeline, Tween, TweenParams};

/// One tween per row, one target per tile, the way the flip wave is built.
fn wave(side: usize) -> Timeline<usize> {
    let delays = StaggerDelay::new(side, 2.0).expect("benchmark curve is valid");
    let mut timeline = Timeline::new();
    for row in 0..side {
        let params = TweenParams {
            to: std::f32::consts::PI,
            delay: delays.for_row(row),
            stagger: 0.3,
            yoyo: true,
            repeat: Repeat::Infinite,
            ease: Ease::QuadOut,
            ..TweenParams::default()
        };
        let targets = (row * side..(row + 1) * side).collect();
        timeline.add(Tween::new(targets, params).expect("benchmark params are valid"));
    }
    timeline
}

fn bench_advance(side: usize, frames: usize) {
    let mut timeline = wave(side);
    let mut sink = vec![0.0f32; side * side];

    let start = Instant::now();
    for _ in 0..frames {
        timeline.advance(black_box(1.0 / 60.0), |target, value| sink[target] = value);
    }
    let elapsed = start.elapsed();
    black_box(&sink);
    let per_frame = elapsed / frames as u32;
    println!(
        "  advance ({side}x{side} targets, {frames} frames): {per_frame:?}/frame, total {elapsed:?}"
    );
}

fn main() {
    println!("=== timeline benchmarks ===");
    for side in [15, 64, 256] {
        bench_advance(side, 600);
    }
}
