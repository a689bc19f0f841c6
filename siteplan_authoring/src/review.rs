// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Review and field-level editing of a saved zone.

use std::sync::Arc;

use siteplan_overlay::{
    OverlaySurface, PolygonStyle, ShapeKind, render_authoring, render_reference,
};
use siteplan_view::{ViewportFrame, WorldBounds};
use siteplan_zone::precision::{format_coordinate, parse_coordinate, round_coordinate};
use siteplan_zone::wire::{SaveAck, VertexUpdate, ZoneVertices};
use siteplan_zone::{Polygon, ReferenceOverlay, Vertex, VertexId, ZoneId, open_ring};

use crate::error::{AuthoringError, ReviewError, SaveFailure};
use crate::store::ZoneStore;

/// An editable coordinate field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexField {
    /// World X.
    X,
    /// World Y.
    Y,
    /// Elevation.
    Z,
}

impl VertexField {
    fn get(self, v: &Vertex) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }

    fn set(self, v: &mut Vertex, value: f64) {
        match self {
            Self::X => v.x = value,
            Self::Y => v.y = value,
            Self::Z => v.z = value,
        }
    }
}

#[derive(Clone, Debug)]
struct ReviewVertex {
    id: Option<VertexId>,
    stored: Vertex,
    edited: Vertex,
}

/// One saved zone opened for review.
///
/// Edits stay local until [`ZoneReview::save_with`] (or the caller, using
/// [`ZoneReview::pending_updates`]) sends them. The explicit closing vertex
/// of the stored ring is not shown as a separate row; it follows every edit
/// of the first row so the stored ring stays closed.
#[derive(Clone, Debug)]
pub struct ZoneReview {
    zone_id: ZoneId,
    vertices: Vec<ReviewVertex>,
    closing: Option<VertexId>,
    parent: Option<Arc<ReferenceOverlay>>,
}

impl ZoneReview {
    /// Opens the fetched vertices of `zone_id` for review.
    #[must_use]
    pub fn new(zone_id: ZoneId, fetched: &ZoneVertices) -> Self {
        let records = fetched.to_records();
        let open_len = {
            let plain: Vec<Vertex> = records.iter().map(|(_, v)| *v).collect();
            open_ring(&plain).len()
        };
        let closing = records
            .get(open_len..)
            .and_then(|rest| rest.first())
            .and_then(|(id, _)| *id);
        let vertices = records
            .into_iter()
            .take(open_len)
            .map(|(id, v)| ReviewVertex {
                id,
                stored: v,
                edited: v,
            })
            .collect();
        Self {
            zone_id,
            vertices,
            closing,
            parent: None,
        }
    }

    /// Zone under review.
    #[must_use]
    pub fn zone_id(&self) -> ZoneId {
        self.zone_id
    }

    /// Number of editable rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the zone has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shows `parent` beneath the zone, or nothing.
    pub fn set_parent(&mut self, parent: Option<Arc<ReferenceOverlay>>) {
        self.parent = parent;
    }

    /// Field text for row `index`, rounded to six decimals.
    #[must_use]
    pub fn display(&self, index: usize, field: VertexField) -> Option<String> {
        let row = self.vertices.get(index)?;
        Some(format_coordinate(field.get(&row.edited)))
    }

    /// Applies operator input to one field.
    pub fn edit(&mut self, index: usize, field: VertexField, input: &str) -> Result<(), ReviewError> {
        let value = parse_coordinate(input).ok_or_else(|| ReviewError::InvalidNumber {
            input: input.to_owned(),
        })?;
        let row = self
            .vertices
            .get_mut(index)
            .ok_or(ReviewError::NoSuchVertex { index })?;
        field.set(&mut row.edited, value);
        Ok(())
    }

    /// Updates for every row whose displayed value differs from storage.
    ///
    /// Only changed fields are set, rounded for persistence. Rows without a
    /// server id cannot be addressed and are skipped. An edit of the first
    /// row is repeated for the closing vertex.
    #[must_use]
    pub fn pending_updates(&self) -> Vec<VertexUpdate> {
        let mut updates = Vec::new();
        for (index, row) in self.vertices.iter().enumerate() {
            let Some(id) = row.id else {
                continue;
            };
            let mut update = VertexUpdate::new(id);
            for (field, slot) in [
                (VertexField::X, &mut update.x),
                (VertexField::Y, &mut update.y),
                (VertexField::Z, &mut update.z),
            ] {
                let before = round_coordinate(field.get(&row.stored));
                let after = round_coordinate(field.get(&row.edited));
                if before != after {
                    *slot = Some(after);
                }
            }
            if update.is_empty() {
                continue;
            }
            updates.push(update);
            if index == 0
                && let Some(closing) = self.closing
            {
                updates.push(VertexUpdate {
                    vertex_id: closing,
                    ..update
                });
            }
        }
        updates
    }

    /// Drops local edits.
    pub fn discard(&mut self) {
        for row in &mut self.vertices {
            row.edited = row.stored;
        }
    }

    /// The zone as currently edited.
    #[must_use]
    pub fn polygon(&self) -> Polygon {
        Polygon::from_vertices(self.vertices.iter().map(|r| r.edited).collect())
    }

    /// Redraws the parent overlay and the edited zone.
    pub fn render<S: OverlaySurface + ?Sized>(
        &self,
        surface: &mut S,
        frame: &ViewportFrame,
        bounds: &WorldBounds,
        reference_style: &PolygonStyle,
        zone_style: &PolygonStyle,
    ) {
        render_reference(
            surface,
            self.parent.as_deref(),
            frame,
            bounds,
            reference_style,
        );
        let polygon = self.polygon();
        render_authoring(
            surface,
            polygon.vertices(),
            ShapeKind::Polygon,
            frame,
            bounds,
            zone_style,
        );
    }

    /// Sends pending edits through `store`.
    ///
    /// Nothing is sent when there are no edits. On success the edits become
    /// the stored values; on failure they are kept for a retry.
    pub fn save_with<S: ZoneStore>(&mut self, store: &mut S) -> Result<SaveAck, AuthoringError> {
        let updates = self.pending_updates();
        if updates.is_empty() {
            return Ok(SaveAck::default());
        }
        match store.save_vertices(&updates) {
            Ok(ack) => {
                for row in &mut self.vertices {
                    row.stored = row.edited;
                }
                log::debug!("saved {} vertex updates for {}", updates.len(), self.zone_id);
                Ok(ack)
            }
            Err(err) => {
                log::warn!("vertex save for {} failed: {err}", self.zone_id);
                Err(SaveFailure::from_error(&err).into())
            }
        }
    }
}
