//! Drawing module - replays the clock face onto nannou's Draw API
//!
//! nannou's draw transforms are affine, so the tilt's perspective divide is
//! done here: every shape is flattened and its points are mapped through the
//! canvas transform before being handed to `Draw` in window coordinates.

use miui_alarm::canvas::{oval_points, Canvas, FillRule, LineCap, Paint, PaintStyle, Path, TransformStack};
use miui_alarm::transform::local_scale;
use nannou::glam::{Mat3, Vec2};
use nannou::lyon::tessellation::FillRule as LyonFillRule;
use nannou::prelude::*;

/// Color palette for the window around the face
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 18,
        green: 18,
        blue: 20,
        standard: std::marker::PhantomData,
    };
}

/// Canvas backed by a nannou `Draw`
///
/// Canvas coordinates are view-local pixels (top-left origin, y down) over
/// `window_rect`.
pub struct NannouCanvas<'a> {
    draw: &'a Draw,
    window_rect: Rect,
    stack: TransformStack,
}

impl<'a> NannouCanvas<'a> {
    pub fn new(draw: &'a Draw, window_rect: Rect) -> Self {
        Self {
            draw,
            window_rect,
            stack: TransformStack::default(),
        }
    }

    /// Map a local point to nannou window coordinates (center origin, y up)
    fn to_window(&self, point: Vec2) -> Point2 {
        let device = self.stack.map(point);
        pt2(
            self.window_rect.left() + device.x,
            self.window_rect.top() - device.y,
        )
    }

    /// Stroke width in window units at `near`
    fn stroke_weight(&self, width: f32, near: Vec2) -> f32 {
        width * local_scale(&self.stack.current(), near)
    }
}

fn lyon_fill_rule(rule: FillRule) -> LyonFillRule {
    match rule {
        FillRule::NonZero => LyonFillRule::NonZero,
        FillRule::EvenOdd => LyonFillRule::EvenOdd,
    }
}

impl Canvas for NannouCanvas<'_> {
    fn save(&mut self) {
        self.stack.save();
    }

    fn restore(&mut self) {
        self.stack.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        self.stack.translate(offset);
    }

    fn rotate(&mut self, degrees: f32, pivot: Vec2) {
        self.stack.rotate(degrees, pivot);
    }

    fn scale(&mut self, factor: Vec2) {
        self.stack.scale(factor);
    }

    fn concat(&mut self, matrix: Mat3) {
        self.stack.concat(matrix);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint) {
        let (width, cap) = match paint.style {
            PaintStyle::Stroke { width, cap } => (width, cap),
            // a filled line has no area
            PaintStyle::Fill => return,
        };
        let weight = self.stroke_weight(width, (from + to) / 2.0);
        let line = self
            .draw
            .line()
            .start(self.to_window(from))
            .end(self.to_window(to))
            .weight(weight)
            .color(paint.color);
        if cap == LineCap::Round {
            line.caps_round();
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        let points: Vec<Point2> = oval_points(center, radius)
            .into_iter()
            .map(|p| self.to_window(p))
            .collect();

        match paint.style {
            PaintStyle::Fill => {
                self.draw.polygon().points(points).color(paint.color);
            }
            PaintStyle::Stroke { width, .. } => {
                self.draw
                    .polyline()
                    .weight(self.stroke_weight(width, center))
                    .points(points)
                    .color(paint.color);
            }
        }
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        let flattened = path.flatten();
        let Some(anchor) = flattened.first().and_then(|c| c.first()).copied() else {
            return;
        };
        let contours: Vec<Vec<Point2>> = flattened
            .iter()
            .map(|contour| contour.iter().map(|&p| self.to_window(p)).collect())
            .collect();

        match paint.style {
            PaintStyle::Fill => {
                let lyon_path = build_lyon_path(&contours, true);
                self.draw
                    .path()
                    .fill()
                    .fill_rule(lyon_fill_rule(path.fill_rule()))
                    .color(paint.color)
                    .events(lyon_path.iter());
            }
            PaintStyle::Stroke { width, .. } => {
                let lyon_path = build_lyon_path(&contours, false);
                self.draw
                    .path()
                    .stroke()
                    .weight(self.stroke_weight(width, anchor))
                    .color(paint.color)
                    .events(lyon_path.iter());
            }
        }
    }
}

/// Build a lyon path with one sub-path per contour
///
/// Every sub-path is terminated before the next one begins; `close` decides
/// whether the last point joins back to the first.
fn build_lyon_path(contours: &[Vec<Point2>], close: bool) -> nannou::geom::Path {
    let mut builder = nannou::geom::Path::builder();
    for contour in contours {
        let mut points = contour.iter().copied();
        let Some(first) = points.next() else {
            continue;
        };
        builder = builder.begin(first);
        for point in points {
            builder = builder.line_to(point);
        }
        if close {
            builder = builder.close();
        } else {
            builder.inner_mut().end(false);
        }
    }
    builder.build()
}
