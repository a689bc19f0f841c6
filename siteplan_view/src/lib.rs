// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=siteplan_view --heading-base-level=0

//! Siteplan View: world bounds, letterboxed frames, and coordinate transforms.
//!
//! This crate covers the two leaf stages of the zone geometry engine:
//! - **Bounds resolution**: [`resolve_frame`] fits a [`WorldBounds`]
//!   rectangle (feet, Y up) uniformly into a fixed-size drawing surface and
//!   returns the letterboxed [`ViewportFrame`].
//! - **Coordinate transformation**: [`RasterTransform`] and
//!   [`ProjectionTransform`] convert between world space and the coordinate
//!   space of each rendering backend. [`RenderingBackend`] and
//!   [`SurfaceCoord`] dispatch between them at runtime.
//!
//! It does **not** own any polygon state or drawing surface. Callers are
//! expected to:
//! - Resolve a frame whenever bounds or surface size change, and skip
//!   rendering when that fails.
//! - Feed pointer positions through the active transform before storing
//!   them as world coordinates.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use siteplan_view::{CoordinateTransform, RasterTransform, WorldBounds, resolve_frame};
//!
//! let bounds = WorldBounds::new(-80.0, -40.0, 160.0, 160.0).unwrap();
//! let frame = resolve_frame(&bounds, Size::new(600.0, 500.0)).unwrap();
//!
//! // World Y grows upward; pixel rows grow downward.
//! let pixel = RasterTransform.to_viewport(Point::new(-80.0, -40.0), &frame, &bounds);
//! assert!((pixel.y - 500.0).abs() < 1e-9);
//!
//! let world = RasterTransform.to_world(pixel, &frame, &bounds);
//! assert!((world.x + 80.0).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod backend;
mod bounds;
mod frame;
mod modes;
mod transform;

pub use backend::{RenderingBackend, SurfaceCoord};
pub use bounds::{DegenerateBoundsError, WorldBounds};
pub use frame::{FrameError, ViewportFrame, resolve_frame, resolve_frame_with};
pub use modes::FitMode;
pub use transform::{
    CoordinateTransform, LatLng, ProjectionTransform, RasterTransform, pixel_distance,
    projection_bounds,
};
