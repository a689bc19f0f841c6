// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect};

/// Axis-aligned world-space rectangle, in physical units (feet).
///
/// World Y grows upward. A `WorldBounds` can only be built through
/// [`WorldBounds::new`] (or one of the constructors delegating to it), so a
/// value of this type is never degenerate: both extents are finite and
/// strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl WorldBounds {
    /// Creates bounds from explicit minimum and maximum coordinates.
    ///
    /// Fails with [`DegenerateBoundsError`] when `max_x <= min_x`,
    /// `max_y <= min_y`, or any coordinate is not finite.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, DegenerateBoundsError> {
        let finite = min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite();
        if !finite || max_x <= min_x || max_y <= min_y {
            return Err(DegenerateBoundsError {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Creates bounds from `[[y_min, x_min], [y_max, x_max]]` pairs.
    ///
    /// Map metadata delivers its extent in `(y, x)` order; this transposes
    /// it into the `{min_x, min_y, max_x, max_y}` form used everywhere else.
    pub fn from_yx_pairs(pairs: [[f64; 2]; 2]) -> Result<Self, DegenerateBoundsError> {
        let [[y_min, x_min], [y_max, x_max]] = pairs;
        Self::new(x_min, y_min, x_max, y_max)
    }

    /// Minimum X coordinate.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Minimum Y coordinate.
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Maximum X coordinate.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Maximum Y coordinate.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Extent along X. Always positive.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Y. Always positive.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.width() / self.height()
    }

    /// Center of the bounds.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width() * 0.5,
            self.min_y + self.height() * 0.5,
        )
    }

    /// Returns `true` if `pt` lies inside or on the edge of the bounds.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.min_x && pt.x <= self.max_x && pt.y >= self.min_y && pt.y <= self.max_y
    }

    /// Returns the bounds as a kurbo rectangle (in world units).
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Returns the bounds as `[[y_min, x_min], [y_max, x_max]]`.
    #[must_use]
    pub fn to_yx_pairs(&self) -> [[f64; 2]; 2] {
        [[self.min_y, self.min_x], [self.max_y, self.max_x]]
    }
}

impl TryFrom<Rect> for WorldBounds {
    type Error = DegenerateBoundsError;

    fn try_from(rect: Rect) -> Result<Self, Self::Error> {
        Self::new(rect.x0, rect.y0, rect.x1, rect.y1)
    }
}

/// Error returned when bounds have zero or negative extent, or are not finite.
///
/// Rendering must not proceed with such bounds; the usual recovery is to
/// fetch the map metadata again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegenerateBoundsError {
    /// Rejected minimum X.
    pub min_x: f64,
    /// Rejected minimum Y.
    pub min_y: f64,
    /// Rejected maximum X.
    pub max_x: f64,
    /// Rejected maximum Y.
    pub max_y: f64,
}

impl fmt::Display for DegenerateBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "degenerate world bounds: x {}..{}, y {}..{}",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

impl core::error::Error for DegenerateBoundsError {}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::WorldBounds;

    #[test]
    fn rejects_zero_and_inverted_extents() {
        assert!(WorldBounds::new(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(WorldBounds::new(0.0, 5.0, 10.0, 5.0).is_err());
        assert!(WorldBounds::new(10.0, 0.0, 0.0, 10.0).is_err());
        assert!(WorldBounds::new(0.0, 0.0, f64::NAN, 10.0).is_err());
        assert!(WorldBounds::new(0.0, 0.0, f64::INFINITY, 10.0).is_err());
    }

    #[test]
    fn yx_pairs_are_transposed() {
        let b = WorldBounds::from_yx_pairs([[-40.0, -80.0], [160.0, 160.0]]).unwrap();
        assert_eq!(b.min_x(), -80.0);
        assert_eq!(b.min_y(), -40.0);
        assert_eq!(b.max_x(), 160.0);
        assert_eq!(b.max_y(), 160.0);
        assert_eq!(b.to_yx_pairs(), [[-40.0, -80.0], [160.0, 160.0]]);
    }

    #[test]
    fn extents_and_containment() {
        let b = WorldBounds::try_from(Rect::new(-80.0, -40.0, 160.0, 160.0)).unwrap();
        assert_eq!(b.width(), 240.0);
        assert_eq!(b.height(), 200.0);
        assert!((b.aspect() - 1.2).abs() < 1e-12);
        assert_eq!(b.center(), Point::new(40.0, 60.0));
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(-80.0, 160.0)));
        assert!(!b.contains(Point::new(-80.1, 0.0)));
    }
}
