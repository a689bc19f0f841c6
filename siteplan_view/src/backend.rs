// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::bounds::WorldBounds;
use crate::frame::ViewportFrame;
use crate::transform::{CoordinateTransform, LatLng, ProjectionTransform, RasterTransform};

/// The rendering backend active for an authoring session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RenderingBackend {
    /// Rasterized drawing surface addressed in pixels.
    #[default]
    RasterSurface,
    /// Projection-based surface addressed in [`LatLng`].
    ProjectionSurface,
}

impl RenderingBackend {
    /// Maps a world point onto this backend's surface.
    #[must_use]
    pub fn to_surface(self, world: Point, frame: &ViewportFrame, bounds: &WorldBounds) -> SurfaceCoord {
        match self {
            Self::RasterSurface => SurfaceCoord::Pixel(RasterTransform.to_viewport(world, frame, bounds)),
            Self::ProjectionSurface => {
                SurfaceCoord::Projected(ProjectionTransform.to_viewport(world, frame, bounds))
            }
        }
    }

    /// Returns the other backend.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::RasterSurface => Self::ProjectionSurface,
            Self::ProjectionSurface => Self::RasterSurface,
        }
    }
}

/// A position reported by, or destined for, one of the two surfaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceCoord {
    /// Raster surface pixel, relative to the surface's top-left corner.
    Pixel(Point),
    /// Projection surface coordinate.
    Projected(LatLng),
}

impl SurfaceCoord {
    /// Backend that produces this kind of coordinate.
    #[must_use]
    pub fn backend(&self) -> RenderingBackend {
        match self {
            Self::Pixel(_) => RenderingBackend::RasterSurface,
            Self::Projected(_) => RenderingBackend::ProjectionSurface,
        }
    }

    /// Converts the coordinate into world space using the matching transform.
    #[must_use]
    pub fn to_world(self, frame: &ViewportFrame, bounds: &WorldBounds) -> Point {
        match self {
            Self::Pixel(p) => RasterTransform.to_world(p, frame, bounds),
            Self::Projected(ll) => ProjectionTransform.to_world(ll, frame, bounds),
        }
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Pixel(p) => p.x.is_finite() && p.y.is_finite(),
            Self::Projected(ll) => ll.lat.is_finite() && ll.lng.is_finite(),
        }
    }
}
