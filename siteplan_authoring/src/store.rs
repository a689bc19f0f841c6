// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence seam.
//!
//! [`ZoneStore`] is the synchronous face of the map, zone, and vertex
//! collaborators. Asynchronous hosts can skip it and drive
//! [`AuthoringSession::begin_save`](crate::AuthoringSession::begin_save) and
//! [`AuthoringSession::complete_save`](crate::AuthoringSession::complete_save)
//! themselves.

use std::collections::BTreeMap;
use std::fmt;

use siteplan_zone::wire::{
    MapData, SaveAck, SaveZoneRequest, SaveZoneResponse, VertexUpdate, WireVertex, ZoneVertices,
};
use siteplan_zone::{MapId, VertexId, ZoneId};

/// Source and sink of map and zone data.
pub trait ZoneStore {
    /// Error reported by the store.
    type Error: core::error::Error;

    /// Fetches bounds and imagery for a map.
    fn map_data(&mut self, map_id: MapId) -> Result<MapData, Self::Error>;

    /// Fetches the stored vertices of a zone.
    fn zone_vertices(&mut self, zone_id: ZoneId) -> Result<ZoneVertices, Self::Error>;

    /// Persists a new zone.
    fn save_zone(&mut self, request: &SaveZoneRequest) -> Result<SaveZoneResponse, Self::Error>;

    /// Applies partial vertex edits.
    fn save_vertices(&mut self, updates: &[VertexUpdate]) -> Result<SaveAck, Self::Error>;
}

/// Error from [`MemoryStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// No map with this id.
    UnknownMap(MapId),
    /// No zone with this id.
    UnknownZone(ZoneId),
    /// No vertex with this id.
    UnknownVertex(VertexId),
    /// A rejection queued with [`MemoryStore::reject_next_save`].
    Rejected(String),
}

impl fmt::Display for MemoryStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMap(id) => write!(f, "unknown map {}", id.0),
            Self::UnknownZone(id) => write!(f, "unknown {id}"),
            Self::UnknownVertex(id) => write!(f, "unknown vertex {}", id.0),
            Self::Rejected(reason) => f.write_str(reason),
        }
    }
}

impl core::error::Error for MemoryStoreError {}

/// A saved zone held by [`MemoryStore`].
#[derive(Clone, Debug, PartialEq)]
pub struct StoredZone {
    /// The request it was saved from.
    pub request: SaveZoneRequest,
    /// Vertices with assigned ids.
    pub vertices: Vec<WireVertex>,
}

/// In-memory [`ZoneStore`] for tests and offline tools.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    maps: BTreeMap<MapId, MapData>,
    zones: BTreeMap<ZoneId, StoredZone>,
    next_zone: u64,
    next_vertex: u64,
    pending_rejection: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a map.
    pub fn insert_map(&mut self, map_id: MapId, data: MapData) {
        self.maps.insert(map_id, data);
    }

    /// Makes the next zone or vertex save fail with `reason`.
    pub fn reject_next_save(&mut self, reason: impl Into<String>) {
        self.pending_rejection = Some(reason.into());
    }

    /// A saved zone, if present.
    #[must_use]
    pub fn zone(&self, zone_id: ZoneId) -> Option<&StoredZone> {
        self.zones.get(&zone_id)
    }

    /// Number of saved zones.
    #[must_use]
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    fn take_rejection(&mut self) -> Result<(), MemoryStoreError> {
        match self.pending_rejection.take() {
            Some(reason) => Err(MemoryStoreError::Rejected(reason)),
            None => Ok(()),
        }
    }
}

impl ZoneStore for MemoryStore {
    type Error = MemoryStoreError;

    fn map_data(&mut self, map_id: MapId) -> Result<MapData, Self::Error> {
        self.maps
            .get(&map_id)
            .cloned()
            .ok_or(MemoryStoreError::UnknownMap(map_id))
    }

    fn zone_vertices(&mut self, zone_id: ZoneId) -> Result<ZoneVertices, Self::Error> {
        let zone = self
            .zones
            .get(&zone_id)
            .ok_or(MemoryStoreError::UnknownZone(zone_id))?;
        Ok(ZoneVertices {
            vertices: zone.vertices.clone(),
        })
    }

    fn save_zone(&mut self, request: &SaveZoneRequest) -> Result<SaveZoneResponse, Self::Error> {
        self.take_rejection()?;
        if !self.maps.contains_key(&request.map_id) {
            return Err(MemoryStoreError::UnknownMap(request.map_id));
        }
        self.next_zone += 1;
        let zone_id = ZoneId(self.next_zone);
        let mut vertices = Vec::with_capacity(request.vertices.len());
        for v in &request.vertices {
            self.next_vertex += 1;
            vertices.push(WireVertex {
                id: Some(VertexId(self.next_vertex)),
                x: Some(v.x),
                y: Some(v.y),
                z: Some(v.z),
                order: Some(v.order),
            });
        }
        self.zones.insert(
            zone_id,
            StoredZone {
                request: request.clone(),
                vertices,
            },
        );
        Ok(SaveZoneResponse { zone_id })
    }

    fn save_vertices(&mut self, updates: &[VertexUpdate]) -> Result<SaveAck, Self::Error> {
        self.take_rejection()?;
        // Validate everything first so a bad id leaves the store untouched.
        for update in updates {
            let known = self
                .zones
                .values()
                .flat_map(|z| &z.vertices)
                .any(|v| v.id == Some(update.vertex_id));
            if !known {
                return Err(MemoryStoreError::UnknownVertex(update.vertex_id));
            }
        }
        for update in updates {
            let stored = self
                .zones
                .values_mut()
                .flat_map(|z| &mut z.vertices)
                .find(|v| v.id == Some(update.vertex_id));
            if let Some(v) = stored {
                v.x = update.x.or(v.x);
                v.y = update.y.or(v.y);
                v.z = update.z.or(v.z);
            }
        }
        Ok(SaveAck::default())
    }
}

#[cfg(test)]
mod tests {
    use siteplan_zone::wire::{MapData, SaveZoneRequest, VertexUpdate};
    use siteplan_zone::{MapId, Vertex, VertexId, ZoneId, ZoneLevel, close_ring};

    use super::{MemoryStore, MemoryStoreError, ZoneStore};

    fn store() -> MemoryStore {
        let mut s = MemoryStore::new();
        s.insert_map(
            MapId(1),
            MapData {
                image_ref: "floor.png".into(),
                bounds: [[0.0, 0.0], [100.0, 100.0]],
            },
        );
        s
    }

    fn request() -> SaveZoneRequest {
        let ring = close_ring(&[
            Vertex::new(0.0, 0.0, 1),
            Vertex::new(10.0, 0.0, 2),
            Vertex::new(10.0, 10.0, 3),
        ]);
        SaveZoneRequest::new("Lab", MapId(1), ZoneLevel::Room, None, &ring)
    }

    #[test]
    fn saved_zone_round_trips_through_fetch() {
        let mut s = store();
        let resp = s.save_zone(&request()).unwrap();
        assert_eq!(resp.zone_id, ZoneId(1));
        let fetched = s.zone_vertices(resp.zone_id).unwrap();
        let polygon = fetched.to_polygon("zone#1");
        assert!(polygon.is_closed());
        assert_eq!(polygon.open_vertices().len(), 3);
    }

    #[test]
    fn partial_vertex_updates_keep_other_fields() {
        let mut s = store();
        let zone_id = s.save_zone(&request()).unwrap().zone_id;
        let mut update = VertexUpdate::new(VertexId(2));
        update.y = Some(4.0);
        s.save_vertices(&[update]).unwrap();
        let v = s.zone(zone_id).unwrap().vertices[1];
        assert_eq!((v.x, v.y), (Some(10.0), Some(4.0)));

        let bad = VertexUpdate::new(VertexId(99));
        assert_eq!(
            s.save_vertices(&[bad]),
            Err(MemoryStoreError::UnknownVertex(VertexId(99)))
        );
    }

    #[test]
    fn queued_rejection_applies_once() {
        let mut s = store();
        s.reject_next_save("name already in use");
        assert_eq!(
            s.save_zone(&request()),
            Err(MemoryStoreError::Rejected("name already in use".into()))
        );
        assert!(s.save_zone(&request()).is_ok());
        assert_eq!(s.zone_count(), 1);
    }
}
