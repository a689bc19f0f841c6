// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for reference and authoring overlays across both backends.

use kurbo::{Point, Size};
use siteplan_overlay::{
    ActiveSurface, Layer, OverlaySurface, PolygonStyle, ShapeKind, render_authoring,
    render_reference,
};
use siteplan_view::{LatLng, RenderingBackend, ViewportFrame, WorldBounds, resolve_frame};
use siteplan_zone::{Polygon, ReferenceOverlay, Vertex, ZoneId, close_ring};

fn setup() -> (WorldBounds, ViewportFrame) {
    let bounds = WorldBounds::new(-80.0, -40.0, 160.0, 160.0).unwrap();
    let frame = resolve_frame(&bounds, Size::new(600.0, 500.0)).unwrap();
    (bounds, frame)
}

fn overlay(vertices: Vec<Vertex>) -> ReferenceOverlay {
    ReferenceOverlay::new(ZoneId(9), Polygon::from_vertices(vertices))
}

#[test]
fn non_finite_vertices_are_excluded() {
    let (bounds, frame) = setup();
    let parent = overlay(vec![
        Vertex::new(0.0, 0.0, 1),
        Vertex::new(f64::NAN, 5.0, 2),
        Vertex::new(10.0, 0.0, 3),
        Vertex::new(10.0, 10.0, 4),
    ]);
    let mut surface = ActiveSurface::new(RenderingBackend::ProjectionSurface);
    let drawn = render_reference(
        &mut surface,
        Some(&parent),
        &frame,
        &bounds,
        &PolygonStyle::reference(),
    );
    assert_eq!(drawn, 3);

    let shape = &surface.as_projection().unwrap().shapes(Layer::Reference)[0];
    assert_eq!(shape.kind, ShapeKind::Polygon);
    assert!(!shape.style.interactive);
    assert_eq!(
        shape.ring,
        [
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 10.0),
            LatLng::new(10.0, 10.0)
        ]
    );
}

#[test]
fn all_invalid_overlay_renders_nothing() {
    let (bounds, frame) = setup();
    let parent = overlay(vec![
        Vertex::new(f64::NAN, 0.0, 1),
        Vertex::new(1.0, f64::NAN, 2),
    ]);
    let mut surface = ActiveSurface::default();
    let drawn = render_reference(
        &mut surface,
        Some(&parent),
        &frame,
        &bounds,
        &PolygonStyle::reference(),
    );
    assert_eq!(drawn, 0);
    assert_eq!(surface.shape_count(Layer::Reference), 0);
}

#[test]
fn clearing_the_overlay_empties_the_layer() {
    let (bounds, frame) = setup();
    let parent = overlay(vec![
        Vertex::new(0.0, 0.0, 1),
        Vertex::new(10.0, 0.0, 2),
        Vertex::new(10.0, 10.0, 3),
    ]);
    let style = PolygonStyle::reference();
    let mut surface = ActiveSurface::default();
    render_reference(&mut surface, Some(&parent), &frame, &bounds, &style);
    assert_eq!(surface.shape_count(Layer::Reference), 1);
    render_reference(&mut surface, None, &frame, &bounds, &style);
    assert_eq!(surface.shape_count(Layer::Reference), 0);
}

#[test]
fn explicitly_closed_overlay_is_not_drawn_twice_closed() {
    let (bounds, frame) = setup();
    let ring = close_ring(&[
        Vertex::new(0.0, 0.0, 1),
        Vertex::new(10.0, 0.0, 2),
        Vertex::new(10.0, 10.0, 3),
    ]);
    let parent = overlay(ring);
    let mut surface = ActiveSurface::default();
    let drawn = render_reference(
        &mut surface,
        Some(&parent),
        &frame,
        &bounds,
        &PolygonStyle::reference(),
    );
    assert_eq!(drawn, 3);
}

#[test]
fn authoring_layer_is_open_until_finished() {
    let (bounds, frame) = setup();
    let vertices = [
        Vertex::new(0.0, 0.0, 1),
        Vertex::new(10.0, 0.0, 2),
        Vertex::new(10.0, 10.0, 3),
    ];
    let style = PolygonStyle::editable();
    let mut surface = ActiveSurface::default();
    surface.fit(&frame, &bounds);

    render_authoring(
        &mut surface,
        &vertices,
        ShapeKind::Polyline,
        &frame,
        &bounds,
        &style,
    );
    let svg = surface.as_raster().unwrap().to_svg();
    assert!(svg.contains(r#"fill="none""#));

    render_authoring(
        &mut surface,
        &vertices,
        ShapeKind::Polygon,
        &frame,
        &bounds,
        &style,
    );
    assert_eq!(surface.shape_count(Layer::Authoring), 1);
    let svg = surface.as_raster().unwrap().to_svg();
    assert!(svg.contains('Z'));
    assert!(!svg.contains(r#"pointer-events="none""#));
}

#[test]
fn switching_backend_drops_stale_shapes() {
    let (bounds, frame) = setup();
    let parent = overlay(vec![
        Vertex::new(0.0, 0.0, 1),
        Vertex::new(10.0, 0.0, 2),
        Vertex::new(10.0, 10.0, 3),
    ]);
    let style = PolygonStyle::reference();
    let mut surface = ActiveSurface::default();
    surface.set_underlay(Some("floor.png".into()));
    render_reference(&mut surface, Some(&parent), &frame, &bounds, &style);

    assert!(!surface.switch_to(RenderingBackend::RasterSurface));
    assert_eq!(surface.shape_count(Layer::Reference), 1);

    assert!(surface.switch_to(RenderingBackend::ProjectionSurface));
    assert_eq!(surface.backend(), RenderingBackend::ProjectionSurface);
    assert_eq!(surface.shape_count(Layer::Reference), 0);
    assert_eq!(surface.underlay(), Some("floor.png"));

    render_reference(&mut surface, Some(&parent), &frame, &bounds, &style);
    let p = surface.as_projection().unwrap().shapes(Layer::Reference)[0].ring[1];
    assert_eq!(p, LatLng::new(0.0, 10.0));
    assert!(surface.as_raster().is_none());
}

#[test]
fn raster_points_land_inside_the_frame() {
    let (bounds, frame) = setup();
    let mut surface = ActiveSurface::default();
    surface.draw(
        Layer::Authoring,
        &[Point::new(-80.0, -40.0), Point::new(160.0, 160.0)],
        ShapeKind::Polyline,
        &PolygonStyle::editable(),
        &frame,
        &bounds,
    );
    let shape = &surface.as_raster().unwrap().shapes(Layer::Authoring)[0];
    let rect = frame.rect().inflate(1e-9, 1e-9);
    for el in shape.path.elements() {
        if let Some(p) = el.end_point() {
            assert!(rect.contains(p), "{p:?} outside {rect:?}");
        }
    }
}
