// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection surface: shapes recorded as `(lat, lng)` rings.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use siteplan_view::{
    CoordinateTransform, LatLng, ProjectionTransform, RenderingBackend, ViewportFrame,
    WorldBounds, projection_bounds,
};

use crate::style::PolygonStyle;
use crate::surface::{Layer, OverlaySurface, ShapeKind};

/// One recorded projection shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedShape {
    /// Outline in projection coordinates. Closed shapes are not repeated
    /// at the end; the backend closes them.
    pub ring: Vec<LatLng>,
    /// Open or closed.
    pub kind: ShapeKind,
    /// Stroke and fill.
    pub style: PolygonStyle,
}

/// Surface for the projection backend.
#[derive(Clone, Debug, Default)]
pub struct ProjectionSurface {
    view: Option<[LatLng; 2]>,
    underlay: Option<String>,
    reference: Vec<ProjectedShape>,
    authoring: Vec<ProjectedShape>,
}

impl ProjectionSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes recorded on `layer`, in drawing order.
    #[must_use]
    pub fn shapes(&self, layer: Layer) -> &[ProjectedShape] {
        match layer {
            Layer::Reference => &self.reference,
            Layer::Authoring => &self.authoring,
        }
    }

    /// Corner pair the backend's view was last fitted to.
    #[must_use]
    pub fn view(&self) -> Option<[LatLng; 2]> {
        self.view
    }
}

impl OverlaySurface for ProjectionSurface {
    fn backend(&self) -> RenderingBackend {
        RenderingBackend::ProjectionSurface
    }

    fn fit(&mut self, _frame: &ViewportFrame, bounds: &WorldBounds) {
        self.view = Some(projection_bounds(bounds));
    }

    fn set_underlay(&mut self, image_ref: Option<String>) {
        self.underlay = image_ref;
    }

    fn underlay(&self) -> Option<&str> {
        self.underlay.as_deref()
    }

    fn clear_layer(&mut self, layer: Layer) {
        match layer {
            Layer::Reference => self.reference.clear(),
            Layer::Authoring => self.authoring.clear(),
        }
    }

    fn draw(
        &mut self,
        layer: Layer,
        world: &[Point],
        kind: ShapeKind,
        style: &PolygonStyle,
        frame: &ViewportFrame,
        bounds: &WorldBounds,
    ) {
        if world.is_empty() {
            return;
        }
        let ring = world
            .iter()
            .map(|p| ProjectionTransform.to_viewport(*p, frame, bounds))
            .collect();
        let shape = ProjectedShape {
            ring,
            kind,
            style: *style,
        };
        match layer {
            Layer::Reference => self.reference.push(shape),
            Layer::Authoring => self.authoring.push(shape),
        }
    }

    fn shape_count(&self, layer: Layer) -> usize {
        self.shapes(layer).len()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};
    use siteplan_view::{LatLng, WorldBounds, resolve_frame};

    use super::ProjectionSurface;
    use crate::style::PolygonStyle;
    use crate::surface::{Layer, OverlaySurface, ShapeKind};

    #[test]
    fn rings_swap_axes() {
        let b = WorldBounds::new(-80.0, -40.0, 160.0, 160.0).unwrap();
        let frame = resolve_frame(&b, Size::new(600.0, 500.0)).unwrap();
        let mut s = ProjectionSurface::new();
        s.fit(&frame, &b);
        assert_eq!(
            s.view(),
            Some([LatLng::new(-40.0, -80.0), LatLng::new(160.0, 160.0)])
        );

        s.draw(
            Layer::Reference,
            &[Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
            ShapeKind::Polygon,
            &PolygonStyle::reference(),
            &frame,
            &b,
        );
        let shape = &s.shapes(Layer::Reference)[0];
        assert_eq!(shape.ring, [LatLng::new(2.0, 1.0), LatLng::new(4.0, 3.0)]);
        assert_eq!(s.shape_count(Layer::Authoring), 0);

        s.clear_layer(Layer::Reference);
        assert_eq!(s.shape_count(Layer::Reference), 0);
    }
}
