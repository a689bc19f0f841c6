// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How the letterboxed frame is positioned inside the drawing surface.
///
/// This mode is consulted by [`crate::resolve_frame_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Split the slack evenly on both sides of the fitted frame.
    #[default]
    Center,
    /// Pin the fitted frame to the surface origin; all slack goes to the
    /// right or bottom edge.
    AlignMin,
}
