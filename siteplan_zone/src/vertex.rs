// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertices, polygons, and reference overlays.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Server-assigned zone identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub u64);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone#{}", self.0)
    }
}

/// Server-assigned vertex identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub u64);

/// Identifier of a site map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub u64);

/// Position of a zone in the site hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneLevel {
    /// A single room.
    #[default]
    Room,
    /// One floor of a building.
    Floor,
    /// A whole building.
    Building,
    /// A group of buildings.
    Campus,
}

impl ZoneLevel {
    /// The level a parent zone is expected to have, if any.
    #[must_use]
    pub fn parent_level(self) -> Option<Self> {
        match self {
            Self::Room => Some(Self::Floor),
            Self::Floor => Some(Self::Building),
            Self::Building => Some(Self::Campus),
            Self::Campus => None,
        }
    }
}

/// A polygon vertex in world units.
///
/// `order` is a 1-based position in the owning polygon. `z` is carried for
/// the persistence layer and defaults to 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// World X.
    pub x: f64,
    /// World Y.
    pub y: f64,
    /// Elevation; 0 for flat zones.
    pub z: f64,
    /// 1-based sequence index.
    pub order: u32,
}

impl Vertex {
    /// Creates a flat vertex.
    #[must_use]
    pub const fn new(x: f64, y: f64, order: u32) -> Self {
        Self { x, y, z: 0.0, order }
    }

    /// Creates a flat vertex from a world point.
    #[must_use]
    pub const fn from_point(p: Point, order: u32) -> Self {
        Self::new(p.x, p.y, order)
    }

    /// The vertex position projected onto the XY plane.
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns `true` if both planar coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns `true` if both vertices sit at the same planar position.
    #[must_use]
    pub fn same_position(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Returns the open ring of `vertices`.
///
/// A list whose last vertex repeats the first one is already explicitly
/// closed; the repeated vertex is dropped.
#[must_use]
pub fn open_ring(vertices: &[Vertex]) -> &[Vertex] {
    match vertices {
        [first, .., last] if first.same_position(last) => {
            &vertices[..vertices.len() - 1]
        }
        _ => vertices,
    }
}

/// Produces the explicitly closed form of a ring.
///
/// Orders are renumbered `1..=n` and a copy of the first vertex is appended
/// with `order = n + 1`. The input may be open or already closed; the
/// result is closed exactly once either way.
#[must_use]
pub fn close_ring(vertices: &[Vertex]) -> Vec<Vertex> {
    let open = open_ring(vertices);
    let mut closed = Vec::with_capacity(open.len() + 1);
    for (order, v) in (1_u32..).zip(open) {
        closed.push(Vertex { order, ..*v });
    }
    if let Some(first) = closed.first().copied() {
        let order = first.order + u32::try_from(open.len()).unwrap_or(u32::MAX - 1);
        closed.push(Vertex { order, ..first });
    }
    closed
}

/// Ordered vertex list plus an explicit closed flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vertex>,
    closed: bool,
}

impl Polygon {
    /// Creates an empty, open polygon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a polygon from vertices, sorted by `order`.
    ///
    /// The polygon is marked closed when the sorted list repeats its first
    /// vertex at the end.
    #[must_use]
    pub fn from_vertices(mut vertices: Vec<Vertex>) -> Self {
        vertices.sort_by_key(|v| v.order);
        let closed = open_ring(&vertices).len() < vertices.len();
        Self { vertices, closed }
    }

    /// The vertices, in order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of stored vertices, including a closing vertex if present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if there are no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if the polygon carries an explicit closing vertex.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The vertices without a trailing closing vertex.
    #[must_use]
    pub fn open_vertices(&self) -> &[Vertex] {
        open_ring(&self.vertices)
    }

    /// Returns the explicitly closed copy of this polygon.
    #[must_use]
    pub fn to_closed(&self) -> Self {
        Self {
            vertices: close_ring(&self.vertices),
            closed: !self.vertices.is_empty(),
        }
    }
}

/// Read-only polygon of an already-saved zone, shown for spatial context.
///
/// Overlays are shared behind an `Arc` by the authoring session and swapped
/// as a whole; there is no way to mutate one after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceOverlay {
    zone_id: ZoneId,
    polygon: Polygon,
}

impl ReferenceOverlay {
    /// Creates an overlay for the given zone.
    #[must_use]
    pub fn new(zone_id: ZoneId, polygon: Polygon) -> Self {
        Self { zone_id, polygon }
    }

    /// Zone the overlay belongs to.
    #[must_use]
    pub fn zone_id(&self) -> ZoneId {
        self.zone_id
    }

    /// Overlay geometry.
    #[must_use]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}
