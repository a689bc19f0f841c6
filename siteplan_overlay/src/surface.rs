// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use kurbo::Point;
use siteplan_view::{RenderingBackend, ViewportFrame, WorldBounds};

use crate::style::PolygonStyle;

/// Drawing layer on a surface. The reference layer sits beneath the
/// authoring layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Read-only overlays of saved zones.
    Reference,
    /// The polygon being authored or edited.
    Authoring,
}

/// Outline form of a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Open outline; the last point is not joined to the first.
    Polyline,
    /// Closed, filled outline.
    Polygon,
}

/// A recording target for one rendering backend.
///
/// Surfaces receive world coordinates and apply their own backend's
/// transform; callers never convert points for them.
pub trait OverlaySurface {
    /// Backend this surface draws for.
    fn backend(&self) -> RenderingBackend;

    /// Adopts a new frame and bounds. Recorded shapes are kept; callers
    /// redraw after changing either.
    fn fit(&mut self, frame: &ViewportFrame, bounds: &WorldBounds);

    /// Sets or clears the base imagery drawn under every layer.
    fn set_underlay(&mut self, image_ref: Option<String>);

    /// Current base imagery reference.
    fn underlay(&self) -> Option<&str>;

    /// Removes every shape from `layer`.
    fn clear_layer(&mut self, layer: Layer);

    /// Records one shape on `layer`.
    ///
    /// `world` must contain only finite points.
    fn draw(
        &mut self,
        layer: Layer,
        world: &[Point],
        kind: ShapeKind,
        style: &PolygonStyle,
        frame: &ViewportFrame,
        bounds: &WorldBounds,
    );

    /// Number of shapes currently on `layer`.
    fn shape_count(&self, layer: Layer) -> usize;
}
