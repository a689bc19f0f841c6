// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::bounds::{DegenerateBoundsError, WorldBounds};
use crate::modes::FitMode;

/// Letterboxed pixel sub-rectangle of a drawing surface.
///
/// The frame has the same aspect ratio as the [`WorldBounds`] it was resolved
/// from and lies entirely inside the surface. It is a derived value: resolve
/// it again whenever the bounds or the surface size change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportFrame {
    /// Horizontal slack left of the frame, in pixels.
    pub offset_x: f64,
    /// Vertical slack above the frame, in pixels.
    pub offset_y: f64,
    /// Drawn width in pixels.
    pub width: f64,
    /// Drawn height in pixels.
    pub height: f64,
    surface: Size,
}

impl ViewportFrame {
    /// Size of the surface this frame was resolved against.
    #[must_use]
    pub fn surface(&self) -> Size {
        self.surface
    }

    /// Top-left corner of the frame in surface pixels.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Drawn size of the frame.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The frame as a rectangle in surface pixels.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }

    /// Pixels per world unit along X for the given bounds.
    #[must_use]
    pub fn scale_x(&self, bounds: &WorldBounds) -> f64 {
        self.width / bounds.width()
    }

    /// Pixels per world unit along Y for the given bounds.
    #[must_use]
    pub fn scale_y(&self, bounds: &WorldBounds) -> f64 {
        self.height / bounds.height()
    }
}

/// Error returned by [`resolve_frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameError {
    /// The world bounds have no area.
    DegenerateBounds(DegenerateBoundsError),
    /// The surface has a zero, negative, or non-finite dimension.
    EmptySurface {
        /// Rejected surface width.
        width: f64,
        /// Rejected surface height.
        height: f64,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateBounds(err) => fmt::Display::fmt(err, f),
            Self::EmptySurface { width, height } => {
                write!(f, "cannot fit bounds into an empty {width}x{height} surface")
            }
        }
    }
}

impl core::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::DegenerateBounds(err) => Some(err),
            Self::EmptySurface { .. } => None,
        }
    }
}

impl From<DegenerateBoundsError> for FrameError {
    fn from(err: DegenerateBoundsError) -> Self {
        Self::DegenerateBounds(err)
    }
}

/// Fits `bounds` into a surface of the given size, centering the slack.
///
/// Equivalent to [`resolve_frame_with`] with [`FitMode::Center`].
pub fn resolve_frame(bounds: &WorldBounds, surface: Size) -> Result<ViewportFrame, FrameError> {
    resolve_frame_with(bounds, surface, FitMode::Center)
}

/// Fits `bounds` into a surface of the given size, preserving aspect ratio.
///
/// The wider of the two shapes decides which axis is fully used: when the
/// world is relatively wider than the surface the frame spans the full
/// width and the slack is vertical, otherwise it spans the full height and
/// the slack is horizontal. With matching aspect ratios there is no slack.
pub fn resolve_frame_with(
    bounds: &WorldBounds,
    surface: Size,
    mode: FitMode,
) -> Result<ViewportFrame, FrameError> {
    let (w, h) = (surface.width, surface.height);
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return Err(FrameError::EmptySurface {
            width: w,
            height: h,
        });
    }

    let world_aspect = bounds.aspect();
    let viewport_aspect = w / h;

    let (width, height) = if world_aspect > viewport_aspect {
        (w, (w / world_aspect).min(h))
    } else {
        ((h * world_aspect).min(w), h)
    };

    let (offset_x, offset_y) = match mode {
        FitMode::Center => ((w - width) * 0.5, (h - height) * 0.5),
        FitMode::AlignMin => (0.0, 0.0),
    };

    Ok(ViewportFrame {
        offset_x,
        offset_y,
        width,
        height,
        surface,
    })
}
