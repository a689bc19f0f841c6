// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygon authoring state machine.
//!
//! ## Usage
//!
//! 1) [`PolygonAuthoring::open`] starts drawing with an empty vertex list.
//! 2) Feed each pointer position, already in world units, to
//!    [`PolygonAuthoring::add_point`].
//! 3) Once [`PolygonAuthoring::can_finish`] holds, [`PolygonAuthoring::finish`]
//!    moves to `Committing`.
//! 4) [`PolygonAuthoring::commit_for_save`] yields the closed ring for the
//!    save payload; report the outcome with
//!    [`PolygonAuthoring::save_succeeded`] or
//!    [`PolygonAuthoring::save_failed`].
//!
//! ```
//! use kurbo::{Point, Size};
//! use siteplan_authoring::machine::{AuthoringState, PolygonAuthoring};
//! use siteplan_view::{WorldBounds, resolve_frame};
//!
//! let bounds = WorldBounds::new(0.0, 0.0, 100.0, 100.0).unwrap();
//! let frame = resolve_frame(&bounds, Size::new(500.0, 500.0)).unwrap();
//!
//! let mut m = PolygonAuthoring::default();
//! m.open();
//! for p in [(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)] {
//!     m.add_point(Point::new(p.0, p.1), &frame, &bounds).unwrap();
//! }
//! m.finish().unwrap();
//! assert_eq!(m.state(), AuthoringState::Committing);
//!
//! let ring = m.commit_for_save().unwrap();
//! assert_eq!(ring.len(), 4);
//! assert_eq!(ring[3].order, 4);
//! ```

use kurbo::Point;
use siteplan_view::{ViewportFrame, WorldBounds, pixel_distance};
use siteplan_zone::{Vertex, close_ring, open_ring};

use crate::config::DEFAULT_DUPLICATE_THRESHOLD_PX;
use crate::error::AuthoringError;

/// Authoring phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthoringState {
    /// No authoring in progress.
    #[default]
    Idle,
    /// Accepting points.
    Drawing,
    /// Finished; waiting for a save outcome.
    Committing,
}

/// What happened to a point passed to [`PolygonAuthoring::add_point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointOutcome {
    /// The point was appended with this `order`.
    Appended {
        /// 1-based order of the new vertex.
        order: u32,
    },
    /// The point was too close to the previous vertex.
    Suppressed,
    /// The point had non-finite coordinates.
    Rejected,
}

/// Vertex list plus authoring phase for one polygon.
#[derive(Clone, Debug)]
pub struct PolygonAuthoring {
    state: AuthoringState,
    vertices: Vec<Vertex>,
    duplicate_threshold_px: f64,
}

impl Default for PolygonAuthoring {
    fn default() -> Self {
        Self::new(DEFAULT_DUPLICATE_THRESHOLD_PX)
    }
}

impl PolygonAuthoring {
    /// Creates an idle machine with the given duplicate threshold in pixels.
    #[must_use]
    pub fn new(duplicate_threshold_px: f64) -> Self {
        Self {
            state: AuthoringState::Idle,
            vertices: Vec::new(),
            duplicate_threshold_px,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn state(&self) -> AuthoringState {
        self.state
    }

    /// Placed vertices, in order. Never explicitly closed.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of placed vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if no vertices are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Starts a new polygon, discarding any previous vertices.
    pub fn open(&mut self) {
        self.vertices.clear();
        self.state = AuthoringState::Drawing;
    }

    /// Offers a world-space point.
    pub fn add_point(
        &mut self,
        world: Point,
        frame: &ViewportFrame,
        bounds: &WorldBounds,
    ) -> Result<PointOutcome, AuthoringError> {
        if self.state != AuthoringState::Drawing {
            return Err(AuthoringError::NotDrawing);
        }
        if !(world.x.is_finite() && world.y.is_finite()) {
            log::warn!("rejecting non-finite point {world:?}");
            return Ok(PointOutcome::Rejected);
        }
        if let Some(last) = self.vertices.last()
            && pixel_distance(last.point(), world, frame, bounds) < self.duplicate_threshold_px
        {
            return Ok(PointOutcome::Suppressed);
        }
        let order = u32::try_from(self.vertices.len() + 1).unwrap_or(u32::MAX);
        self.vertices.push(Vertex::from_point(world, order));
        Ok(PointOutcome::Appended { order })
    }

    /// Removes the most recent vertex while drawing.
    pub fn undo_last(&mut self) -> Result<Option<Vertex>, AuthoringError> {
        if self.state != AuthoringState::Drawing {
            return Err(AuthoringError::NotDrawing);
        }
        Ok(self.vertices.pop())
    }

    /// Returns `true` if enough distinct vertices are placed to form a
    /// polygon.
    ///
    /// A trailing click back on the first vertex closes the ring and does
    /// not count as a vertex of its own.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.distinct_len() >= 3
    }

    /// Ends point placement. Vertices are left untouched.
    pub fn finish(&mut self) -> Result<(), AuthoringError> {
        if self.state != AuthoringState::Drawing {
            return Err(AuthoringError::NotDrawing);
        }
        self.check_vertex_count()?;
        self.state = AuthoringState::Committing;
        log::debug!("polygon finished with {} vertices", self.vertices.len());
        Ok(())
    }

    /// Produces the explicitly closed ring for the save payload.
    ///
    /// Orders are renumbered `1..=n` and a copy of the first vertex is
    /// appended with `order = n + 1`. The ring is derived from the open
    /// vertex list every time, so calling this again for a retry yields
    /// the same ring. Called while drawing, it finishes the polygon first.
    pub fn commit_for_save(&mut self) -> Result<Vec<Vertex>, AuthoringError> {
        match self.state {
            AuthoringState::Idle => return Err(AuthoringError::NotDrawing),
            AuthoringState::Drawing => self.finish()?,
            AuthoringState::Committing => {}
        }
        if let Err(err) = self.check_vertex_count() {
            // Back to drawing so the operator can add the missing points.
            self.state = AuthoringState::Drawing;
            return Err(err);
        }
        Ok(close_ring(open_ring(&self.vertices)))
    }

    /// The save went through: the polygon is discarded.
    pub fn save_succeeded(&mut self) {
        self.vertices.clear();
        self.state = AuthoringState::Idle;
    }

    /// The save was rejected: drawing resumes with the vertices intact.
    pub fn save_failed(&mut self) {
        if self.state != AuthoringState::Idle {
            self.state = AuthoringState::Drawing;
        }
    }

    /// Discards all vertices. Stays open if a polygon was being authored.
    pub fn reset(&mut self) {
        self.vertices.clear();
        if self.state != AuthoringState::Idle {
            self.state = AuthoringState::Drawing;
        }
    }

    /// Stops authoring and discards all vertices.
    pub fn close(&mut self) {
        self.vertices.clear();
        self.state = AuthoringState::Idle;
    }

    fn check_vertex_count(&self) -> Result<(), AuthoringError> {
        if self.vertices.is_empty() {
            return Err(AuthoringError::EmptyPolygon);
        }
        match self.distinct_len() {
            n if n < 3 => Err(AuthoringError::InsufficientVertices { count: n }),
            _ => Ok(()),
        }
    }

    /// Vertices of the open ring at pairwise different positions.
    fn distinct_len(&self) -> usize {
        let open = open_ring(&self.vertices);
        open.iter()
            .enumerate()
            .filter(|(i, v)| !open[..*i].iter().any(|u| u.same_position(v)))
            .count()
    }
}
