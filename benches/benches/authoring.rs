// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::f64::consts::TAU;
use std::sync::Arc;
use std::time::Instant;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use siteplan_authoring::{AuthoringSession, ZoneDraft};
use siteplan_overlay::{ActiveSurface, OverlaySurface, PolygonStyle, render_reference};
use siteplan_view::{RenderingBackend, SurfaceCoord, WorldBounds, resolve_frame};
use siteplan_zone::wire::MapData;
use siteplan_zone::{MapId, Polygon, ReferenceOverlay, Vertex, ZoneId, ZoneLevel};

fn circle_overlay(n: u32) -> ReferenceOverlay {
    let vertices = (0..n)
        .map(|i| {
            let t = TAU * f64::from(i) / f64::from(n);
            Vertex::new(40.0 + 100.0 * t.cos(), 60.0 + 90.0 * t.sin(), i + 1)
        })
        .collect();
    ReferenceOverlay::new(ZoneId(1), Polygon::from_vertices(vertices))
}

fn bench_overlay(c: &mut Criterion) {
    let mut group = c.benchmark_group("siteplan_overlay");
    let bounds = WorldBounds::new(-80.0, -40.0, 160.0, 160.0).unwrap();
    let frame = resolve_frame(&bounds, Size::new(600.0, 500.0)).unwrap();
    let style = PolygonStyle::reference();

    for n in [64_u32, 4_096] {
        let overlay = circle_overlay(n);
        for backend in [
            RenderingBackend::RasterSurface,
            RenderingBackend::ProjectionSurface,
        ] {
            group.bench_function(format!("render_reference({backend:?},n={n})"), |b| {
                let mut surface = ActiveSurface::new(backend);
                surface.fit(&frame, &bounds);
                b.iter(|| {
                    black_box(render_reference(
                        &mut surface,
                        Some(&overlay),
                        &frame,
                        &bounds,
                        &style,
                    ))
                });
            });
        }

        group.bench_function(format!("to_svg(n={n})"), |b| {
            let mut surface = ActiveSurface::new(RenderingBackend::RasterSurface);
            surface.fit(&frame, &bounds);
            render_reference(&mut surface, Some(&overlay), &frame, &bounds, &style);
            let raster = surface.as_raster().cloned().unwrap();
            b.iter(|| black_box(raster.to_svg()));
        });
    }
    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("siteplan_authoring");
    let map = MapData {
        image_ref: "floor.png".into(),
        bounds: [[-40.0, -80.0], [160.0, 160.0]],
    };
    let parent = Arc::new(circle_overlay(256));
    let draft = ZoneDraft::new("bench", ZoneLevel::Room);

    group.bench_function("draw_and_commit(points=200)", |b| {
        b.iter_batched(
            || {
                let mut session = AuthoringSession::default();
                session.open(MapId(1), &map, Instant::now()).unwrap();
                session.set_reference_overlay(Some(parent.clone()));
                session
            },
            |mut session| {
                for i in 0..200_u32 {
                    let t = TAU * f64::from(i) / 200.0;
                    let p = Point::new(300.0 + 200.0 * t.cos(), 250.0 + 200.0 * t.sin());
                    let _ = session.pointer_input(SurfaceCoord::Pixel(p));
                }
                black_box(session.begin_save(&draft).unwrap())
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_overlay, bench_session);
criterion_main!(benches);
