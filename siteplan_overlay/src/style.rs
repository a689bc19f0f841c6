// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Stroke and fill used to draw one polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonStyle {
    /// Outline color.
    pub stroke: Color,
    /// Outline width in surface units.
    pub stroke_width: f64,
    /// Dash pattern as `[on, off]`; `None` draws a solid outline.
    pub dash: Option<[f64; 2]>,
    /// Interior color. Only used for closed shapes.
    pub fill: Color,
    /// Whether the shape receives pointer input.
    pub interactive: bool,
}

impl PolygonStyle {
    /// Style for read-only reference overlays: dashed slate outline, faint
    /// fill, no pointer input.
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            stroke: Color::from_rgba8(71, 85, 105, 255),
            stroke_width: 1.5,
            dash: Some([6.0, 4.0]),
            fill: Color::from_rgba8(100, 116, 139, 51),
            interactive: false,
        }
    }

    /// Style for the polygon being authored: solid amber outline.
    #[must_use]
    pub const fn editable() -> Self {
        Self {
            stroke: Color::from_rgba8(217, 119, 6, 255),
            stroke_width: 2.0,
            dash: None,
            fill: Color::from_rgba8(245, 158, 11, 64),
            interactive: true,
        }
    }

    /// Returns a copy with a different outline color.
    #[must_use]
    pub const fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    /// Returns a copy with a different interior color.
    #[must_use]
    pub const fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self::editable()
    }
}

#[cfg(test)]
mod tests {
    use super::PolygonStyle;

    #[test]
    fn reference_is_distinct_and_inert() {
        let r = PolygonStyle::reference();
        let e = PolygonStyle::editable();
        assert_ne!(r.stroke, e.stroke);
        assert_ne!(r.fill, e.fill);
        assert!(!r.interactive);
        assert!(e.interactive);
        assert!(r.fill.to_rgba8().a < 255);
    }
}
