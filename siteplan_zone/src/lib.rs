// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=siteplan_zone --heading-base-level=0

//! Siteplan Zone: zone polygons, precision rules, and collaborator payloads.
//!
//! - [`Vertex`], [`Polygon`] and [`ReferenceOverlay`] model zone geometry in
//!   world units. [`close_ring`] produces the explicitly closed form sent to
//!   persistence.
//! - [`precision`] rounds coordinates to six decimals at display and
//!   persistence boundaries and filters vertices with non-finite positions.
//! - [`wire`] holds the request and response shapes of the map, zone and
//!   vertex collaborators, with `serde` derives.
//!
//! ```rust
//! use siteplan_zone::wire::ZoneVertices;
//!
//! let json = r#"{ "vertices": [
//!     { "n_x": 0.0, "n_y": 0.0, "n_ord": 1 },
//!     { "x": 10.0, "y": 0.0, "order": 2 },
//!     { "x": 10.0, "y": 10.0, "order": 3 }
//! ] }"#;
//! let fetched: ZoneVertices = serde_json::from_str(json).unwrap();
//! let polygon = fetched.to_polygon("zone#1").to_closed();
//! assert_eq!(polygon.len(), 4);
//! assert!(polygon.is_closed());
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature
//! instead of `std` for targets without a standard library.

#![no_std]

extern crate alloc;

pub mod precision;
mod vertex;
pub mod wire;

pub use precision::{COORDINATE_DECIMALS, format_coordinate, round_coordinate};
pub use vertex::{
    MapId, Polygon, ReferenceOverlay, Vertex, VertexId, ZoneId, ZoneLevel, close_ring, open_ring,
};
