// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World ↔ surface coordinate conversion for both rendering backends.
//!
//! The two axis conventions live here and nowhere else:
//! - raster surfaces flip Y, because pixel rows grow downward while world Y
//!   grows upward;
//! - projection surfaces swap axes, because their first coordinate is world
//!   Y and their second is world X.

use kurbo::Point;

use crate::bounds::WorldBounds;
use crate::frame::ViewportFrame;

/// A coordinate on a projection surface.
///
/// This is not a geographic position. The projection backend addresses its
/// plane as `(lat, lng)`, and this engine stores world Y in `lat` and world X
/// in `lng`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatLng {
    /// First projection coordinate; carries world Y.
    pub lat: f64,
    /// Second projection coordinate; carries world X.
    pub lng: f64,
}

impl LatLng {
    /// Creates a projection coordinate.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `[lat, lng]`, the pair order used by the projection backend.
    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Bidirectional mapping between world coordinates and one surface's
/// coordinate space.
///
/// Callers must only invoke a transform with bounds that resolved
/// successfully into `frame`; the bounds type already rules out zero
/// extents.
pub trait CoordinateTransform {
    /// Surface-space coordinate type.
    type Coord: Copy;

    /// Maps a world point onto the surface.
    fn to_viewport(&self, world: Point, frame: &ViewportFrame, bounds: &WorldBounds)
    -> Self::Coord;

    /// Maps a surface coordinate back into world space.
    fn to_world(&self, coord: Self::Coord, frame: &ViewportFrame, bounds: &WorldBounds) -> Point;
}

/// Transform for the raster surface backend (pixels, Y down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterTransform;

impl RasterTransform {
    /// Converts a pointer event position into world space.
    ///
    /// `client` is the event position and `surface_origin` the position of
    /// the surface's top-left corner in the same coordinate system.
    #[must_use]
    pub fn event_to_world(
        &self,
        client: Point,
        surface_origin: Point,
        frame: &ViewportFrame,
        bounds: &WorldBounds,
    ) -> Point {
        let local = Point::new(client.x - surface_origin.x, client.y - surface_origin.y);
        self.to_world(local, frame, bounds)
    }
}

impl CoordinateTransform for RasterTransform {
    type Coord = Point;

    fn to_viewport(&self, world: Point, frame: &ViewportFrame, bounds: &WorldBounds) -> Point {
        let x = frame.offset_x + (world.x - bounds.min_x()) * frame.scale_x(bounds);
        let y = frame.offset_y + (bounds.max_y() - world.y) * frame.scale_y(bounds);
        Point::new(x, y)
    }

    fn to_world(&self, pixel: Point, frame: &ViewportFrame, bounds: &WorldBounds) -> Point {
        let x = bounds.min_x() + (pixel.x - frame.offset_x) / frame.scale_x(bounds);
        let y = bounds.max_y() - (pixel.y - frame.offset_y) / frame.scale_y(bounds);
        Point::new(x, y)
    }
}

/// Transform for the projection surface backend (axis swap, no scaling).
///
/// The projection backend fits its own view to [`projection_bounds`], so the
/// frame is not consulted; it is still part of the signature so both
/// backends are driven the same way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectionTransform;

impl CoordinateTransform for ProjectionTransform {
    type Coord = LatLng;

    fn to_viewport(&self, world: Point, _frame: &ViewportFrame, _bounds: &WorldBounds) -> LatLng {
        LatLng::new(world.y, world.x)
    }

    fn to_world(&self, coord: LatLng, _frame: &ViewportFrame, _bounds: &WorldBounds) -> Point {
        Point::new(coord.lng, coord.lat)
    }
}

/// Corner pair handed to the projection backend when fitting its view:
/// `[[min_y, min_x], [max_y, max_x]]` as [`LatLng`]s.
#[must_use]
pub fn projection_bounds(bounds: &WorldBounds) -> [LatLng; 2] {
    [
        LatLng::new(bounds.min_y(), bounds.min_x()),
        LatLng::new(bounds.max_y(), bounds.max_x()),
    ]
}

/// Distance between two world points measured in raster pixels of `frame`.
///
/// Used for pointer de-duplication, which is specified in pixels regardless
/// of the backend that produced the input.
#[must_use]
pub fn pixel_distance(a: Point, b: Point, frame: &ViewportFrame, bounds: &WorldBounds) -> f64 {
    let pa = RasterTransform.to_viewport(a, frame, bounds);
    let pb = RasterTransform.to_viewport(b, frame, bounds);
    pa.distance(pb)
}
