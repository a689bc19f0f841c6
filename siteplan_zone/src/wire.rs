// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload shapes exchanged with the map, zone, and vertex collaborators.
//!
//! Nothing here performs I/O. These types pin down field names, accepted
//! aliases, and the normalization applied when data crosses the boundary:
//! - map bounds arrive as `[[y_min, x_min], [y_max, x_max]]` and are
//!   transposed by [`MapData::world_bounds`];
//! - fetched vertices accept both `x`/`n_x` style field names and substitute
//!   0 for missing coordinates (with a warning);
//! - outgoing coordinates are rounded to
//!   [`COORDINATE_DECIMALS`](crate::precision::COORDINATE_DECIMALS) places.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use siteplan_view::{DegenerateBoundsError, WorldBounds};

use crate::precision::{retain_usable, round_coordinate, round_vertex};
use crate::vertex::{MapId, Polygon, Vertex, VertexId, ZoneId, ZoneLevel};

/// Response of the map-data fetch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    /// Opaque reference to the base imagery.
    pub image_ref: String,
    /// Bounds in `[[y_min, x_min], [y_max, x_max]]` order.
    pub bounds: [[f64; 2]; 2],
}

impl MapData {
    /// Transposes the `(y, x)` corner pairs into validated world bounds.
    pub fn world_bounds(&self) -> Result<WorldBounds, DegenerateBoundsError> {
        WorldBounds::from_yx_pairs(self.bounds)
    }
}

/// One vertex as returned by the zone-vertex fetch.
///
/// Both naming schemes seen in stored data are accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WireVertex {
    /// Server vertex id, present on stored vertices.
    #[serde(
        default,
        alias = "vertex_id",
        alias = "vertexId",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<VertexId>,
    /// World X.
    #[serde(default, alias = "n_x")]
    pub x: Option<f64>,
    /// World Y.
    #[serde(default, alias = "n_y")]
    pub y: Option<f64>,
    /// Elevation.
    #[serde(default, alias = "n_z")]
    pub z: Option<f64>,
    /// 1-based sequence index.
    #[serde(default, alias = "n_ord")]
    pub order: Option<u32>,
}

impl WireVertex {
    /// Converts to a [`Vertex`], substituting 0 for missing coordinates.
    ///
    /// `position` is the 0-based index of this vertex in its payload; it
    /// stands in for a missing `order`.
    #[must_use]
    pub fn to_vertex(&self, position: usize) -> Vertex {
        let fallback_order = u32::try_from(position + 1).unwrap_or(u32::MAX);
        let order = self.order.unwrap_or_else(|| {
            log::warn!("vertex at position {position} has no order; using {fallback_order}");
            fallback_order
        });
        let coord = |value: Option<f64>, field: &str| {
            value.unwrap_or_else(|| {
                log::warn!("vertex {order} is missing `{field}`; substituting 0");
                0.0
            })
        };
        Vertex {
            x: coord(self.x, "x"),
            y: coord(self.y, "y"),
            z: self.z.unwrap_or(0.0),
            order,
        }
    }
}

/// Response of the zone-vertex fetch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneVertices {
    /// Stored vertices, in any order.
    #[serde(default)]
    pub vertices: Vec<WireVertex>,
}

impl ZoneVertices {
    /// Builds a polygon from the fetched vertices, sorted by `order`.
    ///
    /// Vertices with non-finite planar coordinates are dropped and logged
    /// under `context`.
    #[must_use]
    pub fn to_polygon(&self, context: &str) -> Polygon {
        let vertices: Vec<Vertex> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, w)| w.to_vertex(i))
            .collect();
        Polygon::from_vertices(retain_usable(&vertices, context))
    }

    /// Pairs each normalized vertex with its server id, sorted by `order`.
    ///
    /// Unlike [`to_polygon`](Self::to_polygon) nothing is dropped, so that
    /// an editor can still show (and repair) unusable vertices.
    #[must_use]
    pub fn to_records(&self) -> Vec<(Option<VertexId>, Vertex)> {
        let mut records: Vec<_> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id, w.to_vertex(i)))
            .collect();
        records.sort_by_key(|(_, v)| v.order);
        records
    }
}

/// A vertex as sent to persistence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    /// World X, rounded.
    pub x: f64,
    /// World Y, rounded.
    pub y: f64,
    /// Elevation, rounded.
    pub z: f64,
    /// 1-based sequence index.
    pub order: u32,
}

impl From<&Vertex> for VertexRecord {
    fn from(v: &Vertex) -> Self {
        let r = round_vertex(v);
        Self {
            x: r.x,
            y: r.y,
            z: r.z,
            order: r.order,
        }
    }
}

/// Request body of the zone save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveZoneRequest {
    /// Operator-supplied zone name.
    pub name: String,
    /// Map the zone is drawn on.
    pub map_id: MapId,
    /// Hierarchy level.
    pub level: ZoneLevel,
    /// Enclosing zone, if any. Sent as `null` when absent.
    #[serde(default)]
    pub parent_zone_id: Option<ZoneId>,
    /// Closed ring, rounded.
    pub vertices: Vec<VertexRecord>,
}

impl SaveZoneRequest {
    /// Shapes a save request from an explicitly closed ring.
    ///
    /// Unusable vertices are skipped and the rest rounded.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        map_id: MapId,
        level: ZoneLevel,
        parent_zone_id: Option<ZoneId>,
        closed_ring: &[Vertex],
    ) -> Self {
        let vertices = retain_usable(closed_ring, "save payload")
            .iter()
            .map(VertexRecord::from)
            .collect();
        Self {
            name: name.into(),
            map_id,
            level,
            parent_zone_id,
            vertices,
        }
    }
}

/// Response of the zone save.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveZoneResponse {
    /// Id assigned to the new zone.
    pub zone_id: ZoneId,
}

/// Partial edit of one stored vertex. Omitted fields keep their value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexUpdate {
    /// Vertex being edited.
    pub vertex_id: VertexId,
    /// New world X.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New world Y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New elevation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl VertexUpdate {
    /// An update for `vertex_id` that changes nothing yet.
    #[must_use]
    pub const fn new(vertex_id: VertexId) -> Self {
        Self {
            vertex_id,
            x: None,
            y: None,
            z: None,
        }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// Returns a copy with every set field rounded for persistence.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            vertex_id: self.vertex_id,
            x: self.x.map(round_coordinate),
            y: self.y.map(round_coordinate),
            z: self.z.map(round_coordinate),
        }
    }
}

/// Acknowledgement of a vertex save. Any body fields are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAck {}
