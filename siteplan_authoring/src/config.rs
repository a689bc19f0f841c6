// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use kurbo::Size;
use siteplan_overlay::PolygonStyle;
use siteplan_view::{FitMode, RenderingBackend};

/// Default drawing surface size in pixels.
pub const DEFAULT_SURFACE_SIZE: Size = Size::new(600.0, 500.0);

/// Default minimum pixel distance between consecutive authored points.
pub const DEFAULT_DUPLICATE_THRESHOLD_PX: f64 = 3.0;

/// Default time allowed for base imagery to load.
pub const DEFAULT_IMAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for an [`AuthoringSession`](crate::AuthoringSession).
#[derive(Clone, Debug, PartialEq)]
pub struct AuthoringConfig {
    /// Drawing surface size in pixels.
    pub surface_size: Size,
    /// Points closer than this many pixels to the previous point are dropped.
    pub duplicate_threshold_px: f64,
    /// Imagery that has not loaded after this long is given up on.
    pub image_load_timeout: Duration,
    /// How the world frame is placed inside the surface.
    pub fit_mode: FitMode,
    /// Backend active when the session starts.
    pub backend: RenderingBackend,
    /// Style of reference overlays.
    pub reference_style: PolygonStyle,
    /// Style of the polygon being authored.
    pub editable_style: PolygonStyle,
}

impl Default for AuthoringConfig {
    fn default() -> Self {
        Self {
            surface_size: DEFAULT_SURFACE_SIZE,
            duplicate_threshold_px: DEFAULT_DUPLICATE_THRESHOLD_PX,
            image_load_timeout: DEFAULT_IMAGE_LOAD_TIMEOUT,
            fit_mode: FitMode::default(),
            backend: RenderingBackend::default(),
            reference_style: PolygonStyle::reference(),
            editable_style: PolygonStyle::editable(),
        }
    }
}

impl AuthoringConfig {
    /// Sets the drawing surface size.
    #[must_use]
    pub fn with_surface_size(mut self, size: Size) -> Self {
        self.surface_size = size;
        self
    }

    /// Sets the duplicate-point threshold in pixels.
    #[must_use]
    pub fn with_duplicate_threshold(mut self, px: f64) -> Self {
        self.duplicate_threshold_px = px;
        self
    }

    /// Sets the imagery load timeout.
    #[must_use]
    pub fn with_image_load_timeout(mut self, timeout: Duration) -> Self {
        self.image_load_timeout = timeout;
        self
    }

    /// Sets the fit mode.
    #[must_use]
    pub fn with_fit_mode(mut self, mode: FitMode) -> Self {
        self.fit_mode = mode;
        self
    }

    /// Sets the initial backend.
    #[must_use]
    pub fn with_backend(mut self, backend: RenderingBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the reference overlay style.
    #[must_use]
    pub fn with_reference_style(mut self, style: PolygonStyle) -> Self {
        self.reference_style = style;
        self
    }

    /// Sets the editable polygon style.
    #[must_use]
    pub fn with_editable_style(mut self, style: PolygonStyle) -> Self {
        self.editable_style = style;
        self
    }
}
