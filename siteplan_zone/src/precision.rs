// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-precision rounding and vertex validation.
//!
//! Rounding happens only at the display and persistence boundaries. Authoring
//! state keeps full `f64` precision so that repeated edits do not accumulate
//! rounding error.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`

use crate::vertex::Vertex;

/// Number of decimal places kept for displayed and persisted coordinates.
pub const COORDINATE_DECIMALS: usize = 6;

const SCALE: f64 = 1e6;

/// Rounds a world coordinate to [`COORDINATE_DECIMALS`] places.
///
/// Non-finite values are returned unchanged, as are magnitudes too large to
/// scale without overflow (they have no fractional digits left anyway).
#[must_use]
pub fn round_coordinate(value: f64) -> f64 {
    let scaled = value * SCALE;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / SCALE;
    // Normalize -0.0 so that "-0.000000" never shows up in a field.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Formats a coordinate for an editable numeric field.
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    format!("{:.*}", COORDINATE_DECIMALS, round_coordinate(value))
}

/// Parses operator input from a numeric field.
///
/// Returns `None` for empty, unparsable, or non-finite input.
#[must_use]
pub fn parse_coordinate(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Returns a copy of `vertex` with `x`, `y` and `z` rounded.
#[must_use]
pub fn round_vertex(vertex: &Vertex) -> Vertex {
    Vertex {
        x: round_coordinate(vertex.x),
        y: round_coordinate(vertex.y),
        z: round_coordinate(vertex.z),
        order: vertex.order,
    }
}

/// Returns `true` if the vertex can be rendered or persisted.
#[must_use]
pub fn is_usable(vertex: &Vertex) -> bool {
    vertex.is_finite()
}

/// Copies the usable vertices of `vertices`, logging each one skipped.
///
/// `context` names the data source in the log line (for example a zone id).
#[must_use]
pub fn retain_usable(vertices: &[Vertex], context: &str) -> Vec<Vertex> {
    let mut usable = Vec::with_capacity(vertices.len());
    for v in vertices {
        if is_usable(v) {
            usable.push(*v);
        } else {
            log::warn!(
                "skipping vertex {} of {context}: non-finite coordinates ({}, {})",
                v.order,
                v.x,
                v.y
            );
        }
    }
    usable
}
