// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=siteplan_overlay --heading-base-level=0

//! Siteplan Overlay: reference and authoring polygons on either backend.
//!
//! Each rendering backend gets a recording surface implementing
//! [`OverlaySurface`]:
//! - [`RasterSurface`] records pixel-space [`kurbo::BezPath`]s and can export
//!   them with [`RasterSurface::to_svg`];
//! - [`ProjectionSurface`] records [`LatLng`](siteplan_view::LatLng) rings.
//!
//! Surfaces keep two layers. [`Layer::Reference`] holds read-only overlays
//! of saved zones, drawn with [`PolygonStyle::reference`]; [`Layer::Authoring`]
//! holds the polygon being edited. [`render_reference`] and
//! [`render_authoring`] clear and redraw one layer each.
//!
//! [`ActiveSurface`] holds exactly one surface. Switching backend replaces it
//! wholesale, so shapes drawn under the old transform cannot linger.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kurbo::Size;
//! use siteplan_overlay::{
//!     ActiveSurface, Layer, OverlaySurface, PolygonStyle, render_reference,
//! };
//! use siteplan_view::{RenderingBackend, WorldBounds, resolve_frame};
//! use siteplan_zone::{Polygon, ReferenceOverlay, Vertex, ZoneId};
//!
//! let bounds = WorldBounds::new(0.0, 0.0, 100.0, 50.0).unwrap();
//! let frame = resolve_frame(&bounds, Size::new(400.0, 400.0)).unwrap();
//! let parent = Arc::new(ReferenceOverlay::new(
//!     ZoneId(1),
//!     Polygon::from_vertices(vec![
//!         Vertex::new(10.0, 10.0, 1),
//!         Vertex::new(90.0, 10.0, 2),
//!         Vertex::new(50.0, 40.0, 3),
//!     ]),
//! ));
//!
//! let mut surface = ActiveSurface::new(RenderingBackend::RasterSurface);
//! surface.fit(&frame, &bounds);
//! let style = PolygonStyle::reference();
//! render_reference(&mut surface, Some(parent.as_ref()), &frame, &bounds, &style);
//! assert_eq!(surface.shape_count(Layer::Reference), 1);
//!
//! surface.switch_to(RenderingBackend::ProjectionSurface);
//! assert_eq!(surface.shape_count(Layer::Reference), 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod projection;
mod raster;
mod render;
mod style;
mod surface;

pub use projection::{ProjectedShape, ProjectionSurface};
pub use raster::{RasterShape, RasterSurface};
pub use render::{ActiveSurface, render_authoring, render_reference};
pub use style::PolygonStyle;
pub use surface::{Layer, OverlaySurface, ShapeKind};
