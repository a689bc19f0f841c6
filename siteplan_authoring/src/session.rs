// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;
use std::time::Instant;

use kurbo::{Point, Size};
use siteplan_overlay::{
    ActiveSurface, Layer, OverlaySurface, ShapeKind, render_authoring, render_reference,
};
use siteplan_view::{
    RasterTransform, RenderingBackend, SurfaceCoord, ViewportFrame, WorldBounds,
    resolve_frame_with,
};
use siteplan_zone::wire::{MapData, SaveZoneRequest, SaveZoneResponse};
use siteplan_zone::{MapId, ReferenceOverlay, Vertex, ZoneId, ZoneLevel};

use crate::config::AuthoringConfig;
use crate::error::{AuthoringError, ImageLoadError, SaveFailure};
use crate::imagery::{ImageLoadTicket, ImageryState, ImageryTracker};
use crate::machine::{AuthoringState, PointOutcome, PolygonAuthoring};
use crate::store::ZoneStore;

/// Operator-entered details of the zone being saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneDraft {
    /// Zone name.
    pub name: String,
    /// Hierarchy level.
    pub level: ZoneLevel,
    /// Enclosing zone, if any.
    pub parent_zone_id: Option<ZoneId>,
}

impl ZoneDraft {
    /// A draft with no parent.
    #[must_use]
    pub fn new(name: impl Into<String>, level: ZoneLevel) -> Self {
        Self {
            name: name.into(),
            level,
            parent_zone_id: None,
        }
    }

    /// Sets the enclosing zone.
    #[must_use]
    pub fn with_parent(mut self, parent: ZoneId) -> Self {
        self.parent_zone_id = Some(parent);
        self
    }
}

/// Handle for one outstanding zone save.
///
/// Every [`AuthoringSession::begin_save`] issues a fresh ticket, and
/// closing or reopening the map abandons the outstanding one, so a late
/// result can never complete a newer save.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SaveTicket {
    generation: u64,
}

impl SaveTicket {
    /// Save generation this ticket belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A save handed to the caller by [`AuthoringSession::begin_save`].
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSave {
    /// Pass back to [`AuthoringSession::complete_save`] with the result.
    pub ticket: SaveTicket,
    /// Body for the zone save collaborator.
    pub request: SaveZoneRequest,
}

#[derive(Clone, Debug)]
struct OpenMap {
    map_id: MapId,
    bounds: WorldBounds,
    frame: Option<ViewportFrame>,
}

/// Everything needed to author zones on one open map.
///
/// The session is synchronous and performs no I/O. Image loads and saves are
/// split into a request half that hands work to the caller and a completion
/// half that accepts the result.
#[derive(Clone, Debug)]
pub struct AuthoringSession {
    config: AuthoringConfig,
    map: Option<OpenMap>,
    surface: ActiveSurface,
    machine: PolygonAuthoring,
    overlay: Option<Arc<ReferenceOverlay>>,
    imagery: ImageryTracker,
    save_generation: u64,
    pending_save: Option<SaveTicket>,
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new(AuthoringConfig::default())
    }
}

impl AuthoringSession {
    /// Creates a closed session.
    #[must_use]
    pub fn new(config: AuthoringConfig) -> Self {
        Self {
            surface: ActiveSurface::new(config.backend),
            machine: PolygonAuthoring::new(config.duplicate_threshold_px),
            imagery: ImageryTracker::new(config.image_load_timeout),
            map: None,
            overlay: None,
            save_generation: 0,
            pending_save: None,
            config,
        }
    }

    /// Opens `map_id` and starts drawing.
    ///
    /// Any previously open map is closed first. On success the returned
    /// ticket identifies the base imagery load the caller should start.
    pub fn open(
        &mut self,
        map_id: MapId,
        data: &MapData,
        now: Instant,
    ) -> Result<ImageLoadTicket, AuthoringError> {
        self.close();
        let bounds = data.world_bounds()?;
        let frame = resolve_frame_with(&bounds, self.config.surface_size, self.config.fit_mode)?;
        self.map = Some(OpenMap {
            map_id,
            bounds,
            frame: Some(frame),
        });
        self.machine.open();
        let ticket = self.imagery.begin(data.image_ref.clone(), now);
        log::debug!("opened map {} with frame {:?}", map_id.0, frame.rect());
        self.redraw();
        Ok(ticket)
    }

    /// Closes the map, discarding the polygon, overlay, and imagery.
    pub fn close(&mut self) {
        self.machine.close();
        self.imagery.cancel();
        self.map = None;
        self.overlay = None;
        if let Some(ticket) = self.pending_save.take() {
            log::debug!("abandoning save generation {}", ticket.generation);
        }
        self.surface = ActiveSurface::new(self.surface.backend());
    }

    /// Returns `true` while a map is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.map.is_some()
    }

    /// The open map.
    #[must_use]
    pub fn map_id(&self) -> Option<MapId> {
        self.map.as_ref().map(|m| m.map_id)
    }

    /// World bounds of the open map.
    #[must_use]
    pub fn bounds(&self) -> Option<&WorldBounds> {
        self.map.as_ref().map(|m| &m.bounds)
    }

    /// Current frame, if the surface can be drawn on.
    #[must_use]
    pub fn frame(&self) -> Option<&ViewportFrame> {
        self.map.as_ref().and_then(|m| m.frame.as_ref())
    }

    /// Active rendering backend.
    #[must_use]
    pub fn backend(&self) -> RenderingBackend {
        self.surface.backend()
    }

    /// The active surface with everything drawn so far.
    #[must_use]
    pub fn surface(&self) -> &ActiveSurface {
        &self.surface
    }

    /// Authoring phase.
    #[must_use]
    pub fn state(&self) -> AuthoringState {
        self.machine.state()
    }

    /// Vertices placed so far, in full precision.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        self.machine.vertices()
    }

    /// Whether the polygon has enough vertices to finish.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.machine.can_finish()
    }

    /// The reference overlay currently shown.
    #[must_use]
    pub fn reference_overlay(&self) -> Option<&Arc<ReferenceOverlay>> {
        self.overlay.as_ref()
    }

    /// Base imagery load status.
    #[must_use]
    pub fn imagery(&self) -> &ImageryState {
        self.imagery.state()
    }

    /// Returns `true` while a save awaits [`complete_save`](Self::complete_save).
    #[must_use]
    pub fn save_in_flight(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Resizes the drawing surface and re-fits the frame.
    ///
    /// If the new size cannot hold a frame the surface is left blank and
    /// the error returned; a later valid size recovers.
    pub fn set_surface_size(&mut self, size: Size) -> Result<(), AuthoringError> {
        self.config.surface_size = size;
        let Some(map) = self.map.as_mut() else {
            return Ok(());
        };
        match resolve_frame_with(&map.bounds, size, self.config.fit_mode) {
            Ok(frame) => {
                map.frame = Some(frame);
                self.redraw();
                Ok(())
            }
            Err(err) => {
                map.frame = None;
                log::warn!("cannot lay out surface: {err}");
                self.surface.clear_layer(Layer::Reference);
                self.surface.clear_layer(Layer::Authoring);
                Err(err.into())
            }
        }
    }

    /// Switches the rendering backend and redraws both layers.
    ///
    /// Returns `false` if `backend` was already active.
    pub fn switch_backend(&mut self, backend: RenderingBackend) -> bool {
        if !self.surface.switch_to(backend) {
            return false;
        }
        self.config.backend = backend;
        self.redraw();
        true
    }

    /// Replaces the reference overlay, or removes it with `None`.
    pub fn set_reference_overlay(&mut self, overlay: Option<Arc<ReferenceOverlay>>) {
        self.overlay = overlay;
        if let Some((frame, bounds)) = self.layout() {
            render_reference(
                &mut self.surface,
                self.overlay.as_deref(),
                &frame,
                &bounds,
                &self.config.reference_style,
            );
        }
    }

    /// Offers a pointer position reported by the active surface.
    ///
    /// Coordinates from the inactive backend are rejected with a warning.
    pub fn pointer_input(&mut self, coord: SurfaceCoord) -> Result<PointOutcome, AuthoringError> {
        let (frame, bounds) = self.layout().ok_or(AuthoringError::NotOpen)?;
        if coord.backend() != self.backend() {
            log::warn!(
                "rejecting {:?} input while {:?} is active",
                coord.backend(),
                self.backend()
            );
            return Ok(PointOutcome::Rejected);
        }
        if !coord.is_finite() {
            log::warn!("rejecting non-finite pointer input {coord:?}");
            return Ok(PointOutcome::Rejected);
        }
        self.offer_point(coord.to_world(&frame, &bounds), &frame, &bounds)
    }

    /// Offers a raster pointer event given in client coordinates.
    ///
    /// `surface_origin` is the client position of the surface's top-left
    /// corner.
    pub fn pointer_event(
        &mut self,
        client: Point,
        surface_origin: Point,
    ) -> Result<PointOutcome, AuthoringError> {
        let (frame, bounds) = self.layout().ok_or(AuthoringError::NotOpen)?;
        let world = RasterTransform.event_to_world(client, surface_origin, &frame, &bounds);
        self.offer_point(world, &frame, &bounds)
    }

    /// Removes the last placed vertex.
    pub fn undo_last(&mut self) -> Result<Option<Vertex>, AuthoringError> {
        let removed = self.machine.undo_last()?;
        self.redraw();
        Ok(removed)
    }

    /// Ends point placement and shows the polygon closed.
    pub fn finish(&mut self) -> Result<(), AuthoringError> {
        self.machine.finish()?;
        self.redraw();
        Ok(())
    }

    /// Discards the placed vertices and keeps drawing.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.redraw();
    }

    /// Builds the save payload and marks a save as in flight.
    ///
    /// Fails with [`AuthoringError::SaveInFlight`] while an earlier save is
    /// unresolved.
    pub fn begin_save(&mut self, draft: &ZoneDraft) -> Result<PendingSave, AuthoringError> {
        if self.pending_save.is_some() {
            return Err(AuthoringError::SaveInFlight);
        }
        let map_id = self.map_id().ok_or(AuthoringError::NotOpen)?;
        let ring = match self.machine.commit_for_save() {
            Ok(ring) => ring,
            Err(err) => {
                self.redraw();
                return Err(err);
            }
        };
        self.save_generation += 1;
        let ticket = SaveTicket {
            generation: self.save_generation,
        };
        self.pending_save = Some(ticket);
        self.redraw();
        Ok(PendingSave {
            ticket,
            request: SaveZoneRequest::new(
                draft.name.clone(),
                map_id,
                draft.level,
                draft.parent_zone_id,
                &ring,
            ),
        })
    }

    /// Accepts the outcome of the save started by
    /// [`begin_save`](Self::begin_save).
    ///
    /// On success the polygon is cleared and a new one started. On failure
    /// the vertices are kept and drawing resumes, and the failure is
    /// returned for display.
    ///
    /// Results for any ticket but the outstanding one are ignored and
    /// reported as [`AuthoringError::StaleSave`] (or
    /// [`AuthoringError::NoSaveInFlight`] when nothing is outstanding).
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<SaveZoneResponse, SaveFailure>,
    ) -> Result<ZoneId, AuthoringError> {
        let Some(current) = self.pending_save else {
            log::debug!("ignoring save result for generation {}", ticket.generation);
            return Err(AuthoringError::NoSaveInFlight);
        };
        if current != ticket {
            log::debug!(
                "ignoring stale save result for generation {} (current {})",
                ticket.generation,
                current.generation
            );
            return Err(AuthoringError::StaleSave);
        }
        self.pending_save = None;
        match result {
            Ok(resp) => {
                self.machine.save_succeeded();
                if self.map.is_some() {
                    self.machine.open();
                }
                log::debug!("saved {}", resp.zone_id);
                self.redraw();
                Ok(resp.zone_id)
            }
            Err(failure) => {
                log::warn!("{failure}");
                self.machine.save_failed();
                self.redraw();
                Err(failure.into())
            }
        }
    }

    /// Saves through a synchronous store.
    pub fn save_with<S: ZoneStore>(
        &mut self,
        store: &mut S,
        draft: &ZoneDraft,
    ) -> Result<ZoneId, AuthoringError> {
        let pending = self.begin_save(draft)?;
        let result = store
            .save_zone(&pending.request)
            .map_err(|err| SaveFailure::from_error(&err));
        self.complete_save(pending.ticket, result)
    }

    /// Starts loading different base imagery for the open map.
    pub fn reload_imagery(
        &mut self,
        image_ref: impl Into<String>,
        now: Instant,
    ) -> Result<ImageLoadTicket, AuthoringError> {
        if !self.is_open() {
            return Err(AuthoringError::NotOpen);
        }
        self.surface.set_underlay(None);
        Ok(self.imagery.begin(image_ref, now))
    }

    /// Accepts the loader's result for `ticket`.
    ///
    /// Stale tickets are ignored and return `None`. A failure leaves the
    /// session drawing without an underlay.
    pub fn image_loaded(
        &mut self,
        ticket: ImageLoadTicket,
        result: Result<(), String>,
    ) -> Option<Result<(), ImageLoadError>> {
        let underlay = match self.imagery.complete(ticket, result)? {
            Ok(image_ref) => Some(image_ref.to_owned()),
            Err(err) => return Some(Err(err)),
        };
        self.surface.set_underlay(underlay);
        Some(Ok(()))
    }

    /// Checks the imagery timeout against `now`.
    pub fn poll(&mut self, now: Instant) -> Option<ImageLoadError> {
        self.imagery.poll(now)
    }

    fn offer_point(
        &mut self,
        world: Point,
        frame: &ViewportFrame,
        bounds: &WorldBounds,
    ) -> Result<PointOutcome, AuthoringError> {
        let outcome = self.machine.add_point(world, frame, bounds)?;
        if matches!(outcome, PointOutcome::Appended { .. }) {
            self.redraw_authoring(frame, bounds);
        }
        Ok(outcome)
    }

    fn layout(&self) -> Option<(ViewportFrame, WorldBounds)> {
        let map = self.map.as_ref()?;
        Some((map.frame?, map.bounds))
    }

    fn redraw(&mut self) {
        let Some((frame, bounds)) = self.layout() else {
            return;
        };
        self.surface.fit(&frame, &bounds);
        render_reference(
            &mut self.surface,
            self.overlay.as_deref(),
            &frame,
            &bounds,
            &self.config.reference_style,
        );
        self.redraw_authoring(&frame, &bounds);
    }

    fn redraw_authoring(&mut self, frame: &ViewportFrame, bounds: &WorldBounds) {
        let kind = match self.machine.state() {
            AuthoringState::Idle => {
                self.surface.clear_layer(Layer::Authoring);
                return;
            }
            AuthoringState::Drawing => ShapeKind::Polyline,
            AuthoringState::Committing => ShapeKind::Polygon,
        };
        render_authoring(
            &mut self.surface,
            self.machine.vertices(),
            kind,
            frame,
            bounds,
            &self.config.editable_style,
        );
    }
}
