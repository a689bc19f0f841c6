// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::ToOwned;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Point;
use siteplan_view::{RenderingBackend, ViewportFrame, WorldBounds};
use siteplan_zone::precision::retain_usable;
use siteplan_zone::{ReferenceOverlay, Vertex};

use crate::projection::ProjectionSurface;
use crate::raster::RasterSurface;
use crate::style::PolygonStyle;
use crate::surface::{Layer, OverlaySurface, ShapeKind};

/// Redraws the reference layer with `overlay`.
///
/// The layer is always cleared first. Vertices with non-finite coordinates
/// are skipped with a warning; when none remain, or `overlay` is `None`,
/// nothing is drawn. Returns the number of points drawn.
pub fn render_reference<S: OverlaySurface + ?Sized>(
    surface: &mut S,
    overlay: Option<&ReferenceOverlay>,
    frame: &ViewportFrame,
    bounds: &WorldBounds,
    style: &PolygonStyle,
) -> usize {
    surface.clear_layer(Layer::Reference);
    let Some(overlay) = overlay else {
        return 0;
    };
    let context = overlay.zone_id().to_string();
    let usable = retain_usable(overlay.polygon().open_vertices(), &context);
    if usable.is_empty() {
        log::debug!("reference overlay for {context} has no usable vertices; drawing nothing");
        return 0;
    }
    let points: Vec<Point> = usable.iter().map(Vertex::point).collect();
    surface.draw(
        Layer::Reference,
        &points,
        ShapeKind::Polygon,
        style,
        frame,
        bounds,
    );
    points.len()
}

/// Redraws the authoring layer with the polygon being edited.
///
/// Use [`ShapeKind::Polyline`] while points are still being placed and
/// [`ShapeKind::Polygon`] once the polygon is finished. Returns the number
/// of points drawn.
pub fn render_authoring<S: OverlaySurface + ?Sized>(
    surface: &mut S,
    vertices: &[Vertex],
    kind: ShapeKind,
    frame: &ViewportFrame,
    bounds: &WorldBounds,
    style: &PolygonStyle,
) -> usize {
    surface.clear_layer(Layer::Authoring);
    let usable = retain_usable(vertices, "authoring polygon");
    if usable.is_empty() {
        return 0;
    }
    let points: Vec<Point> = usable.iter().map(Vertex::point).collect();
    surface.draw(Layer::Authoring, &points, kind, style, frame, bounds);
    points.len()
}

/// The one surface a session currently draws on.
///
/// Switching backends replaces the surface outright, so nothing recorded
/// for the previous backend survives. Only the underlay is carried over.
#[derive(Clone, Debug)]
pub enum ActiveSurface {
    /// Raster backend.
    Raster(RasterSurface),
    /// Projection backend.
    Projection(ProjectionSurface),
}

impl ActiveSurface {
    /// Creates an empty surface for `backend`.
    #[must_use]
    pub fn new(backend: RenderingBackend) -> Self {
        match backend {
            RenderingBackend::RasterSurface => Self::Raster(RasterSurface::new()),
            RenderingBackend::ProjectionSurface => Self::Projection(ProjectionSurface::new()),
        }
    }

    /// Replaces the surface with an empty one for `backend`.
    ///
    /// Returns `false`, leaving everything as is, if `backend` is already
    /// active. Callers must fit and redraw both layers after a switch.
    pub fn switch_to(&mut self, backend: RenderingBackend) -> bool {
        if self.backend() == backend {
            return false;
        }
        let underlay: Option<String> = self.underlay().map(ToOwned::to_owned);
        *self = Self::new(backend);
        self.set_underlay(underlay);
        log::debug!("switched overlay surface to {backend:?}");
        true
    }

    /// The raster surface, if it is the active one.
    #[must_use]
    pub fn as_raster(&self) -> Option<&RasterSurface> {
        match self {
            Self::Raster(s) => Some(s),
            Self::Projection(_) => None,
        }
    }

    /// The projection surface, if it is the active one.
    #[must_use]
    pub fn as_projection(&self) -> Option<&ProjectionSurface> {
        match self {
            Self::Projection(s) => Some(s),
            Self::Raster(_) => None,
        }
    }

    fn inner(&self) -> &dyn OverlaySurface {
        match self {
            Self::Raster(s) => s,
            Self::Projection(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn OverlaySurface {
        match self {
            Self::Raster(s) => s,
            Self::Projection(s) => s,
        }
    }
}

impl Default for ActiveSurface {
    fn default() -> Self {
        Self::new(RenderingBackend::default())
    }
}

impl OverlaySurface for ActiveSurface {
    fn backend(&self) -> RenderingBackend {
        self.inner().backend()
    }

    fn fit(&mut self, frame: &ViewportFrame, bounds: &WorldBounds) {
        self.inner_mut().fit(frame, bounds);
    }

    fn set_underlay(&mut self, image_ref: Option<String>) {
        self.inner_mut().set_underlay(image_ref);
    }

    fn underlay(&self) -> Option<&str> {
        self.inner().underlay()
    }

    fn clear_layer(&mut self, layer: Layer) {
        self.inner_mut().clear_layer(layer);
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
        self.inner_mut()
            .draw(layer, world, kind, style, frame, bounds);
    }

    fn shape_count(&self, layer: Layer) -> usize {
        self.inner().shape_count(layer)
    }
}
