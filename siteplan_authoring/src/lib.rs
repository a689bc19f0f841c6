// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=siteplan_authoring --heading-base-level=0

//! Siteplan Authoring: drawing, saving, and reviewing zone polygons.
//!
//! - [`machine`]: the polygon authoring state machine
//!   (`Idle → Drawing → Committing → Idle | Drawing`).
//! - [`AuthoringSession`]: one open map with its bounds, frame, active
//!   surface, reference overlay, imagery load, and ticketed save in flight. It
//!   converts pointer input through the active backend's transform and
//!   redraws the overlay layers after every change.
//! - [`ZoneReview`]: field-level editing of a saved zone, producing partial
//!   vertex updates.
//! - [`ZoneStore`]: the synchronous persistence seam, with an in-memory
//!   [`MemoryStore`].
//!
//! Nothing in this crate performs I/O or reads the clock. Image loads and
//! saves are split into request and completion calls, and timeouts are
//! checked against an [`Instant`](std::time::Instant) passed by the caller.
//!
//! ```rust
//! use std::time::Instant;
//!
//! use kurbo::Point;
//! use siteplan_authoring::{AuthoringSession, MemoryStore, ZoneDraft};
//! use siteplan_view::SurfaceCoord;
//! use siteplan_zone::wire::MapData;
//! use siteplan_zone::{MapId, ZoneLevel};
//!
//! let map = MapData {
//!     image_ref: "floor-2.png".into(),
//!     bounds: [[-40.0, -80.0], [160.0, 160.0]],
//! };
//! let mut store = MemoryStore::new();
//! store.insert_map(MapId(2), map.clone());
//!
//! let mut session = AuthoringSession::default();
//! session.open(MapId(2), &map, Instant::now()).unwrap();
//! for (x, y) in [(100.0, 100.0), (300.0, 100.0), (300.0, 300.0)] {
//!     session.pointer_input(SurfaceCoord::Pixel(Point::new(x, y))).unwrap();
//! }
//! session.finish().unwrap();
//!
//! let draft = ZoneDraft::new("Lab 2.14", ZoneLevel::Room);
//! let zone = session.save_with(&mut store, &draft).unwrap();
//! assert_eq!(store.zone(zone).unwrap().request.vertices.len(), 4);
//! assert!(session.vertices().is_empty());
//! ```

mod config;
mod error;
mod imagery;
pub mod machine;
mod review;
mod session;
mod store;

pub use config::{
    AuthoringConfig, DEFAULT_DUPLICATE_THRESHOLD_PX, DEFAULT_IMAGE_LOAD_TIMEOUT,
    DEFAULT_SURFACE_SIZE,
};
pub use error::{AuthoringError, ImageLoadError, ReviewError, SaveFailure};
pub use imagery::{ImageLoadTicket, ImageryState, ImageryTracker};
pub use machine::{AuthoringState, PointOutcome, PolygonAuthoring};
pub use review::{VertexField, ZoneReview};
pub use session::{AuthoringSession, PendingSave, SaveTicket, ZoneDraft};
pub use store::{MemoryStore, MemoryStoreError, StoredZone, ZoneStore};
