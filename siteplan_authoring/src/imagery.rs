// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Base imagery load tracking.
//!
//! The tracker does no I/O. [`ImageryTracker::begin`] hands out a ticket for
//! the caller's loader; the loader's result comes back through
//! [`ImageryTracker::complete`], and [`ImageryTracker::poll`] enforces the
//! timeout against a caller-supplied clock. Every `begin` invalidates the
//! tickets issued before it.

use std::time::{Duration, Instant};

use crate::config::DEFAULT_IMAGE_LOAD_TIMEOUT;
use crate::error::ImageLoadError;

/// Handle for one image load request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageLoadTicket {
    generation: u64,
}

impl ImageLoadTicket {
    /// Request generation this ticket belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Load status of the base imagery.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ImageryState {
    /// Nothing requested.
    #[default]
    Idle,
    /// Waiting for the loader.
    Loading {
        /// Outstanding ticket.
        ticket: ImageLoadTicket,
        /// Image being loaded.
        image_ref: String,
        /// When the load was requested.
        started: Instant,
    },
    /// The image is available.
    Ready {
        /// Loaded image.
        image_ref: String,
    },
    /// The image will not be shown.
    Failed(ImageLoadError),
}

/// Tracks the single outstanding image load of an authoring session.
#[derive(Clone, Debug)]
pub struct ImageryTracker {
    timeout: Duration,
    generation: u64,
    state: ImageryState,
}

impl Default for ImageryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_LOAD_TIMEOUT)
    }
}

impl ImageryTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            generation: 0,
            state: ImageryState::Idle,
        }
    }

    /// Current status.
    #[must_use]
    pub fn state(&self) -> &ImageryState {
        &self.state
    }

    /// The loaded image, once ready.
    #[must_use]
    pub fn ready_image(&self) -> Option<&str> {
        match &self.state {
            ImageryState::Ready { image_ref } => Some(image_ref),
            _ => None,
        }
    }

    /// Starts loading `image_ref`, superseding any outstanding load.
    pub fn begin(&mut self, image_ref: impl Into<String>, now: Instant) -> ImageLoadTicket {
        self.generation += 1;
        let ticket = ImageLoadTicket {
            generation: self.generation,
        };
        self.state = ImageryState::Loading {
            ticket,
            image_ref: image_ref.into(),
            started: now,
        };
        ticket
    }

    /// Records the loader's result for `ticket`.
    ///
    /// Returns `None` when the ticket is stale or the load already timed
    /// out; such results are ignored. Otherwise returns the image reference
    /// on success, or the failure now recorded.
    pub fn complete(
        &mut self,
        ticket: ImageLoadTicket,
        result: Result<(), String>,
    ) -> Option<Result<&str, ImageLoadError>> {
        let ImageryState::Loading {
            ticket: current,
            image_ref,
            ..
        } = &mut self.state
        else {
            log::debug!("ignoring image completion for generation {}", ticket.generation);
            return None;
        };
        if *current != ticket {
            log::debug!(
                "ignoring stale image completion for generation {} (current {})",
                ticket.generation,
                current.generation
            );
            return None;
        }
        match result {
            Ok(()) => {
                let image_ref = core::mem::take(image_ref);
                self.state = ImageryState::Ready { image_ref };
                self.ready_image().map(Ok)
            }
            Err(reason) => {
                let err = ImageLoadError::Failure { reason };
                log::warn!("{err}");
                self.state = ImageryState::Failed(err.clone());
                Some(Err(err))
            }
        }
    }

    /// Fails the outstanding load if it has exceeded the timeout.
    ///
    /// Returns the timeout error the first time it is detected.
    pub fn poll(&mut self, now: Instant) -> Option<ImageLoadError> {
        let ImageryState::Loading { started, .. } = &self.state else {
            return None;
        };
        if now.saturating_duration_since(*started) < self.timeout {
            return None;
        }
        let err = ImageLoadError::Timeout {
            after: self.timeout,
        };
        log::warn!("{err}");
        self.state = ImageryState::Failed(err.clone());
        Some(err)
    }

    /// Abandons any outstanding load. Later completions are ignored.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.state = ImageryState::Idle;
    }
}
