// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use std::time::Duration;

use siteplan_view::{DegenerateBoundsError, FrameError};

/// Base imagery could not be shown. Authoring continues without it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageLoadError {
    /// No completion arrived within the configured timeout.
    Timeout {
        /// The timeout that elapsed.
        after: Duration,
    },
    /// The loader reported a failure.
    Failure {
        /// Loader-provided description.
        reason: String,
    },
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { after } => {
                write!(f, "base imagery did not load within {}ms", after.as_millis())
            }
            Self::Failure { reason } => write!(f, "base imagery failed to load: {reason}"),
        }
    }
}

impl core::error::Error for ImageLoadError {}

/// A zone or vertex save was rejected by the persistence collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveFailure {
    /// Server-provided reason, if any.
    pub reason: Option<String>,
}

impl SaveFailure {
    /// A failure carrying the given reason.
    #[must_use]
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    /// Wraps a store error, keeping its message as the reason.
    #[must_use]
    pub fn from_error(err: &dyn core::error::Error) -> Self {
        Self::with_reason(err.to_string())
    }
}

impl fmt::Display for SaveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "save failed: {reason}"),
            None => f.write_str("save failed"),
        }
    }
}

impl core::error::Error for SaveFailure {}

/// Errors returned by the authoring state machine and session.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthoringError {
    /// No map is open.
    NotOpen,
    /// The operation needs the `Drawing` state.
    NotDrawing,
    /// Fewer than three vertices have been placed.
    InsufficientVertices {
        /// Vertices placed so far.
        count: usize,
    },
    /// No vertices have been placed.
    EmptyPolygon,
    /// A save is already outstanding.
    SaveInFlight,
    /// A save result arrived with no save outstanding.
    NoSaveInFlight,
    /// A save result arrived for a save that has since been superseded.
    StaleSave,
    /// Bounds or surface size cannot be rendered.
    Frame(FrameError),
    /// Persistence rejected the save.
    SaveFailure(SaveFailure),
}

impl AuthoringError {
    /// Text to show the operator, for the errors that warrant it.
    ///
    /// Geometry and sequencing errors are handled by the caller and have no
    /// operator message.
    #[must_use]
    pub fn operator_message(&self) -> Option<String> {
        match self {
            Self::InsufficientVertices { count } => Some(format!(
                "A zone needs at least 3 points; {count} placed so far."
            )),
            Self::EmptyPolygon => Some("Place at least 3 points to define the zone.".to_owned()),
            Self::SaveFailure(SaveFailure {
                reason: Some(reason),
            }) => Some(format!("Could not save the zone: {reason}")),
            Self::SaveFailure(SaveFailure { reason: None }) => {
                Some("Could not save the zone.".to_owned())
            }
            _ => None,
        }
    }
}

impl fmt::Display for AuthoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOpen => f.write_str("no map is open"),
            Self::NotDrawing => f.write_str("not currently drawing"),
            Self::InsufficientVertices { count } => {
                write!(f, "polygon needs at least 3 vertices, has {count}")
            }
            Self::EmptyPolygon => f.write_str("polygon has no vertices"),
            Self::SaveInFlight => f.write_str("a save is already in flight"),
            Self::NoSaveInFlight => f.write_str("no save is in flight"),
            Self::StaleSave => f.write_str("save result belongs to an earlier save"),
            Self::Frame(err) => fmt::Display::fmt(err, f),
            Self::SaveFailure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for AuthoringError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Frame(err) => Some(err),
            Self::SaveFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FrameError> for AuthoringError {
    fn from(err: FrameError) -> Self {
        Self::Frame(err)
    }
}

impl From<DegenerateBoundsError> for AuthoringError {
    fn from(err: DegenerateBoundsError) -> Self {
        Self::Frame(FrameError::DegenerateBounds(err))
    }
}

impl From<SaveFailure> for AuthoringError {
    fn from(err: SaveFailure) -> Self {
        Self::SaveFailure(err)
    }
}

/// An edit on the review surface could not be applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReviewError {
    /// No vertex at this position.
    NoSuchVertex {
        /// Requested position.
        index: usize,
    },
    /// The field input is not a finite number.
    InvalidNumber {
        /// Rejected input.
        input: String,
    },
}

impl fmt::Display for ReviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchVertex { index } => write!(f, "no vertex at position {index}"),
            Self::InvalidNumber { input } => write!(f, "`{input}` is not a valid coordinate"),
        }
    }
}

impl core::error::Error for ReviewError {}
