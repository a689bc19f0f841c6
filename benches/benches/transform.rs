// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use siteplan_view::{
    CoordinateTransform, ProjectionTransform, RasterTransform, RenderingBackend, WorldBounds,
    resolve_frame,
};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_unit(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn points_in(bounds: &WorldBounds, n: usize, seed: u64) -> Vec<Point> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| {
            Point::new(
                bounds.min_x() + rng.next_unit() * bounds.width(),
                bounds.min_y() + rng.next_unit() * bounds.height(),
            )
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("siteplan_view/resolve_frame");
    let bounds = WorldBounds::new(-80.0, -40.0, 160.0, 160.0).unwrap();
    for (w, h) in [(600.0, 500.0), (1920.0, 1080.0), (320.0, 960.0)] {
        let surface = Size::new(w, h);
        group.bench_function(format!("{w}x{h}"), |b| {
            b.iter(|| resolve_frame(black_box(&bounds), black_box(surface)));
        });
    }
    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("siteplan_view/transform");
    let bounds = WorldBounds::new(-80.0, -40.0, 160.0, 160.0).unwrap();
    let frame = resolve_frame(&bounds, Size::new(1920.0, 1080.0)).unwrap();

    for n in [1_000_usize, 10_000] {
        let points = points_in(&bounds, n, 0x5eed);

        group.bench_function(format!("raster_round_trip(n={n})"), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for p in &points {
                    let px = RasterTransform.to_viewport(*p, &frame, &bounds);
                    let back = RasterTransform.to_world(px, &frame, &bounds);
                    acc += back.x;
                }
                black_box(acc)
            });
        });

        group.bench_function(format!("projection_round_trip(n={n})"), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for p in &points {
                    let ll = ProjectionTransform.to_viewport(*p, &frame, &bounds);
                    let back = ProjectionTransform.to_world(ll, &frame, &bounds);
                    acc += back.y;
                }
                black_box(acc)
            });
        });

        group.bench_function(format!("backend_dispatch(n={n})"), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for (i, p) in points.iter().enumerate() {
                    let backend = if i % 2 == 0 {
                        RenderingBackend::RasterSurface
                    } else {
                        RenderingBackend::ProjectionSurface
                    };
                    let coord = backend.to_surface(*p, &frame, &bounds);
                    acc += coord.to_world(&frame, &bounds).x;
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_transforms);
criterion_main!(benches);
