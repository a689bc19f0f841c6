// Copyright 2025 the Siteplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster surface: shapes recorded as pixel-space paths, exportable as SVG.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use kurbo::{BezPath, PathEl, Point, Rect, Size};
use peniko::Color;
use siteplan_view::{
    CoordinateTransform, RasterTransform, RenderingBackend, ViewportFrame, WorldBounds,
};

use crate::style::PolygonStyle;
use crate::surface::{Layer, OverlaySurface, ShapeKind};

/// One recorded raster shape.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterShape {
    /// Outline in surface pixels.
    pub path: BezPath,
    /// Open or closed.
    pub kind: ShapeKind,
    /// Stroke and fill.
    pub style: PolygonStyle,
}

/// Surface for the raster backend.
#[derive(Clone, Debug, Default)]
pub struct RasterSurface {
    surface: Size,
    image_rect: Rect,
    underlay: Option<String>,
    reference: Vec<RasterShape>,
    authoring: Vec<RasterShape>,
}

impl RasterSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes recorded on `layer`, in drawing order.
    #[must_use]
    pub fn shapes(&self, layer: Layer) -> &[RasterShape] {
        match layer {
            Layer::Reference => &self.reference,
            Layer::Authoring => &self.authoring,
        }
    }

    /// Rectangle the base imagery is stretched over: the letterboxed frame.
    #[must_use]
    pub fn image_rect(&self) -> Rect {
        self.image_rect
    }

    /// Exports the surface as a standalone SVG document.
    ///
    /// Intended for inspection and snapshots. Layers become `<g>` groups,
    /// reference first, and non-interactive shapes carry
    /// `pointer-events="none"`.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let w = fmt_f64(self.surface.width);
        let h = fmt_f64(self.surface.height);
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        if let Some(href) = &self.underlay {
            let r = self.image_rect;
            let _ = write!(
                out,
                r#"<image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none"/>"#,
                escape_attr(href),
                fmt_f64(r.x0),
                fmt_f64(r.y0),
                fmt_f64(r.width()),
                fmt_f64(r.height()),
            );
        }
        for (id, shapes) in [("reference", &self.reference), ("authoring", &self.authoring)] {
            let _ = write!(out, r#"<g id="{id}">"#);
            for shape in shapes {
                write_shape(&mut out, shape);
            }
            out.push_str("</g>");
        }
        out.push_str("</svg>");
        out
    }
}

impl OverlaySurface for RasterSurface {
    fn backend(&self) -> RenderingBackend {
        RenderingBackend::RasterSurface
    }

    fn fit(&mut self, frame: &ViewportFrame, _bounds: &WorldBounds) {
        self.surface = frame.surface();
        self.image_rect = frame.rect();
    }

    fn set_underlay(&mut self, image_ref: Option<String>) {
        self.underlay = image_ref;
    }

    fn underlay(&self) -> Option<&str> {
        self.underlay.as_deref()
    }

    fn clear_layer(&mut self, layer: Layer) {
        match layer {
            Layer::Reference => self.reference.clear(),
            Layer::Authoring => self.authoring.clear(),
        }
    }

    fn draw(
        &mut self,
        layer: Layer,
        world: &[Point],
        kind: ShapeKind,
        style: &PolygonStyle,
        frame: &ViewportFrame,
        bounds: &WorldBounds,
    ) {
        let mut path = BezPath::new();
        for (i, p) in world.iter().enumerate() {
            let px = RasterTransform.to_viewport(*p, frame, bounds);
            if i == 0 {
                path.move_to(px);
            } else {
                path.line_to(px);
            }
        }
        if path.elements().is_empty() {
            return;
        }
        if kind == ShapeKind::Polygon {
            path.close_path();
        }
        let shape = RasterShape {
            path,
            kind,
            style: *style,
        };
        match layer {
            Layer::Reference => self.reference.push(shape),
            Layer::Authoring => self.authoring.push(shape),
        }
    }

    fn shape_count(&self, layer: Layer) -> usize {
        self.shapes(layer).len()
    }
}

fn write_shape(out: &mut String, shape: &RasterShape) {
    let style = &shape.style;
    let (stroke, stroke_opacity) = color_to_svg(style.stroke);
    let _ = write!(
        out,
        r#"<path d="{}" stroke="{stroke}" stroke-width="{}""#,
        bez_path_to_svg_d(&shape.path),
        fmt_f64(style.stroke_width),
    );
    if stroke_opacity < 1.0 {
        let _ = write!(out, r#" stroke-opacity="{}""#, fmt_f32(stroke_opacity));
    }
    if let Some([on, off]) = style.dash {
        let _ = write!(out, r#" stroke-dasharray="{} {}""#, fmt_f64(on), fmt_f64(off));
    }
    match shape.kind {
        ShapeKind::Polygon => {
            let (fill, fill_opacity) = color_to_svg(style.fill);
            let _ = write!(out, r#" fill="{fill}" fill-opacity="{}""#, fmt_f32(fill_opacity));
        }
        ShapeKind::Polyline => out.push_str(r#" fill="none""#),
    }
    if !style.interactive {
        out.push_str(r#" pointer-events="none""#);
    }
    out.push_str("/>");
}

fn bez_path_to_svg_d(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.iter() {
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            // Overlay outlines are straight segments only.
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                let _ = write!(d, "L{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn color_to_svg(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    let a = f32::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a scalar with at most three decimals and no trailing zeros.
fn fmt_f64(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let mut s = format!("{v:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

fn fmt_f32(v: f32) -> String {
    fmt_f64(f64::from(v))
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use kurbo::{Point, Size};
    use siteplan_view::{WorldBounds, resolve_frame};

    use super::{RasterSurface, fmt_f32, fmt_f64};
    use crate::style::PolygonStyle;
    use crate::surface::{Layer, OverlaySurface, ShapeKind};

    fn square() -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn draws_in_flipped_pixel_space() {
        let b = WorldBounds::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let frame = resolve_frame(&b, Size::new(100.0, 100.0)).unwrap();
        let mut s = RasterSurface::new();
        s.fit(&frame, &b);
        s.draw(
            Layer::Authoring,
            &square(),
            ShapeKind::Polygon,
            &PolygonStyle::editable(),
            &frame,
            &b,
        );
        let svg = s.to_svg();
        assert!(svg.contains(r#"d="M0 100L100 100L100 0L0 0Z""#), "{svg}");
        assert!(svg.contains(r##"stroke="#d97706""##));
    }

    #[test]
    fn reference_shapes_are_inert_and_dashed() {
        let b = WorldBounds::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let frame = resolve_frame(&b, Size::new(100.0, 100.0)).unwrap();
        let mut s = RasterSurface::new();
        s.fit(&frame, &b);
        s.draw(
            Layer::Reference,
            &square(),
            ShapeKind::Polygon,
            &PolygonStyle::reference(),
            &frame,
            &b,
        );
        let svg = s.to_svg();
        assert!(svg.contains(r#"pointer-events="none""#));
        assert!(svg.contains(r#"stroke-dasharray="6 4""#));
        let reference = svg.find(r#"<g id="reference">"#).unwrap();
        let authoring = svg.find(r#"<g id="authoring">"#).unwrap();
        assert!(reference < authoring);
    }

    #[test]
    fn polylines_are_not_filled() {
        let b = WorldBounds::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let frame = resolve_frame(&b, Size::new(100.0, 100.0)).unwrap();
        let mut s = RasterSurface::new();
        s.draw(
            Layer::Authoring,
            &square()[..2],
            ShapeKind::Polyline,
            &PolygonStyle::editable(),
            &frame,
            &b,
        );
        let svg = s.to_svg();
        assert!(svg.contains(r#"fill="none""#));
        assert!(!svg.contains('Z'));
    }

    #[test]
    fn underlay_covers_the_letterboxed_frame() {
        let b = WorldBounds::new(0.0, 0.0, 400.0, 100.0).unwrap();
        let frame = resolve_frame(&b, Size::new(600.0, 500.0)).unwrap();
        let mut s = RasterSurface::new();
        s.fit(&frame, &b);
        s.set_underlay(Some("maps/a&b.png".to_string()));
        let svg = s.to_svg();
        assert!(
            svg.contains(r#"<image href="maps/a&amp;b.png" x="0" y="175" width="600" height="150""#),
            "{svg}"
        );
    }

    #[test]
    fn empty_point_list_records_nothing() {
        let b = WorldBounds::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let frame = resolve_frame(&b, Size::new(100.0, 100.0)).unwrap();
        let mut s = RasterSurface::new();
        s.draw(
            Layer::Reference,
            &[],
            ShapeKind::Polygon,
            &PolygonStyle::reference(),
            &frame,
            &b,
        );
        assert_eq!(s.shape_count(Layer::Reference), 0);
    }

    #[test]
    fn scalar_formatting_is_compact() {
        assert_eq!(fmt_f32(3.0), "3");
        assert_eq!(fmt_f32(2.5), "2.5");
        assert_eq!(fmt_f32(1.23456), "1.235");
    }

    #[test]
    fn large_coordinates_keep_their_fraction() {
        assert_eq!(fmt_f64(123_456.789), "123456.789");
        assert_eq!(fmt_f64(16_777_217.25), "16777217.25");
        assert_eq!(fmt_f64(120.000_000_4), "120");
        assert_eq!(fmt_f64(-0.000_2), "0");
        assert_eq!(fmt_f64(-12.5), "-12.5");
    }
}
