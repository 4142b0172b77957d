//! ClockRenderer - draws one frame of the clock face
//!
//! Draw order matters: later elements land on top. The face is laid out on
//! the 850-unit viewport centered on the origin, tilted toward the pointer,
//! then each element is nudged by its own parallax offset.

use chrono::Timelike;
use nannou::color::Srgba;
use nannou::glam::{vec2, Vec2};
use shared::TimeAngles;

use crate::canvas::{Canvas, CommandList, FillRule, Paint, Path};
use crate::pointer::Parallax;
use crate::style::Style;
use crate::tokens::*;
use crate::trail::GradientTrail;
use crate::transform::{camera_tilt, pivot};

/// Outcome of a render call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Rendered,
    /// Degenerate viewport; nothing was drawn
    Skipped,
}

/// Placement of the logical viewport inside the view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    /// View center in pixels
    pub center: Vec2,
    /// Pixels per viewport unit
    pub scale: f32,
}

impl FrameGeometry {
    /// Fit the padded square into a `viewport`-sized view.
    ///
    /// Returns `None` for zero, negative, NaN or infinite sizes, and when the
    /// padding leaves no drawable side.
    pub fn compute(viewport: Vec2, padding: f32) -> Option<Self> {
        if !(viewport.x > 0.0 && viewport.y > 0.0) {
            return None;
        }
        let side = (viewport.x.min(viewport.y) - padding * 2.0).max(0.0);
        if !(side > 0.0) || !side.is_finite() {
            return None;
        }
        Some(Self {
            center: viewport / 2.0,
            scale: side / VIEWPORT_SIDE,
        })
    }
}

/// Draws the clock face onto any [`Canvas`]
#[derive(Debug, Clone, Default)]
pub struct ClockRenderer {
    style: Style,
}

impl ClockRenderer {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Record one frame as a command list
    pub fn render_frame<T: Timelike>(
        &self,
        time: &T,
        pointer: Option<Vec2>,
        viewport: Vec2,
    ) -> CommandList {
        let mut commands = CommandList::new();
        self.render(&mut commands, time, pointer, viewport);
        commands
    }

    /// Draw one frame.
    ///
    /// `pointer` is the latched pointer in view-local pixels and `viewport`
    /// the view size in pixels. On a degenerate viewport nothing is issued
    /// to the canvas.
    pub fn render<C, T>(
        &self,
        canvas: &mut C,
        time: &T,
        pointer: Option<Vec2>,
        viewport: Vec2,
    ) -> FrameStatus
    where
        C: Canvas + ?Sized,
        T: Timelike,
    {
        let Some(frame) = FrameGeometry::compute(viewport, self.style.padding()) else {
            log::trace!(
                "skipping frame: viewport {}x{} padding {}",
                viewport.x,
                viewport.y,
                self.style.padding()
            );
            return FrameStatus::Skipped;
        };

        let angles = TimeAngles::at(time);
        let parallax = Parallax::from_pointer(pointer, viewport, frame.scale);
        let trail = GradientTrail::compute(angles.second, self.style.light());
        let center = Vec2::ZERO;

        canvas.save();
        canvas.translate(frame.center);
        canvas.scale(vec2(frame.scale, frame.scale));
        canvas.concat(pivot(
            camera_tilt(parallax.rotate_x, parallax.rotate_y, CAMERA_DISTANCE),
            center,
        ));

        self.draw_second_track(canvas, center, &trail);
        self.draw_second_indicator(canvas, center, angles.second, parallax.second_indicator);
        self.draw_dot_orbit(canvas, center, parallax.dot_orbit);
        self.draw_dot(canvas, center, parallax.dot);
        draw_hand(
            canvas,
            center,
            &HOUR_HAND,
            self.style.light(),
            angles.hour,
            parallax.hour_hand,
        );
        draw_hand(
            canvas,
            center,
            &MINUTE_HAND,
            self.style.strong(),
            angles.minute,
            parallax.minute_hand,
        );

        canvas.restore();
        FrameStatus::Rendered
    }

    fn draw_second_track<C: Canvas + ?Sized>(&self, canvas: &mut C, c: Vec2, trail: &GradientTrail) {
        let inner = vec2(c.x, c.y - TRACK_INNER_RADIUS);
        let outer = vec2(c.x, c.y - TRACK_OUTER_RADIUS);

        canvas.save();
        for piece in 0..TRACK_PIECE_COUNT {
            let color = trail.color_at(piece).unwrap_or(self.style.light());
            canvas.draw_line(inner, outer, &Paint::stroke(color, TRACK_STROKE_WIDTH));
            canvas.rotate(TRACK_PIECE_DEGREES, c);
        }
        canvas.restore();
    }

    fn draw_second_indicator<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        c: Vec2,
        second_degrees: f32,
        offset: Vec2,
    ) {
        let half_base = INDICATOR_BASE_WIDTH / 2.0;
        let base_y = c.y - INDICATOR_BASE_RADIUS;

        let mut path = Path::new();
        path.move_to(vec2(c.x - half_base, base_y))
            .line_to(vec2(c.x, base_y - INDICATOR_HEIGHT))
            .line_to(vec2(c.x + half_base, base_y))
            .close();

        canvas.save();
        canvas.translate(offset);
        canvas.rotate(second_degrees, c);
        canvas.draw_path(&path, &Paint::fill(self.style.light()));
        canvas.restore();
    }

    fn draw_dot_orbit<C: Canvas + ?Sized>(&self, canvas: &mut C, c: Vec2, offset: Vec2) {
        canvas.save();
        canvas.translate(offset);
        canvas.draw_circle(
            c,
            DOT_ORBIT_RADIUS,
            &Paint::stroke(self.style.light(), DOT_ORBIT_STROKE_WIDTH),
        );
        canvas.restore();
    }

    fn draw_dot<C: Canvas + ?Sized>(&self, canvas: &mut C, c: Vec2, offset: Vec2) {
        canvas.save();
        canvas.translate(offset);
        canvas.rotate(DOT_ANGLE_DEGREES, c);
        canvas.draw_circle(
            vec2(c.x, c.y - DOT_VIRTUAL_ORBIT_RADIUS),
            DOT_RADIUS,
            &Paint::fill(self.style.strong()),
        );
        canvas.restore();
    }
}

/// Tapered hand body with a pointed head, plus the hollow screw at the pivot
fn draw_hand<C: Canvas + ?Sized>(
    canvas: &mut C,
    c: Vec2,
    hand: &HandSpec,
    color: Srgba<u8>,
    degrees: f32,
    offset: Vec2,
) {
    let outer = hand.screw_outer_radius;
    let half_bottom = hand.bottom_width / 2.0;
    let half_top = hand.top_width / 2.0;
    // the body starts where its bottom corners meet the screw's outer circle
    let bottom_y = c.y - (outer * outer - half_bottom * half_bottom).sqrt();
    let top_y = c.y - outer - hand.body_height;
    let tip_y = top_y - hand.head_height;

    let mut body = Path::new();
    body.move_to(vec2(c.x - half_bottom, bottom_y))
        .line_to(vec2(c.x - half_top, top_y))
        .quad_to(vec2(c.x, tip_y), vec2(c.x + half_top, top_y))
        .line_to(vec2(c.x + half_bottom, bottom_y))
        .close();

    let mut screw = Path::new();
    screw
        .set_fill_rule(FillRule::EvenOdd)
        .add_oval(c, outer)
        .add_oval(c, hand.screw_inner_radius);

    let paint = Paint::fill(color);
    canvas.save();
    canvas.translate(offset);
    canvas.rotate(degrees, c);
    canvas.draw_path(&body, &paint);
    canvas.draw_path(&screw, &paint);
    canvas.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, TransformStack};
    use crate::pointer::PointerLatch;
    use chrono::NaiveTime;
    use nannou::glam::Mat3;

    fn viewport() -> Vec2 {
        vec2(850.0, 850.0)
    }

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(h, m, s, ms).unwrap()
    }

    fn renderer() -> ClockRenderer {
        ClockRenderer::default()
    }

    /// Canvas that maps every drawn path into device space
    #[derive(Default)]
    struct DeviceRecorder {
        stack: TransformStack,
        paths: Vec<Vec<Vec<Vec2>>>,
        circles: Vec<Vec2>,
    }

    impl Canvas for DeviceRecorder {
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
        fn draw_line(&mut self, _from: Vec2, _to: Vec2, _paint: &Paint) {}
        fn draw_circle(&mut self, center: Vec2, _radius: f32, _paint: &Paint) {
            self.circles.push(self.stack.map(center));
        }
        fn draw_path(&mut self, path: &Path, _paint: &Paint) {
            let mapped = path
                .flatten()
                .into_iter()
                .map(|contour| contour.into_iter().map(|p| self.stack.map(p)).collect())
                .collect();
            self.paths.push(mapped);
        }
    }

    fn count(list: &CommandList, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        list.commands().iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_frame_geometry() {
        let frame = FrameGeometry::compute(vec2(1000.0, 1700.0), 75.0).unwrap();
        assert_eq!(frame.center, vec2(500.0, 850.0));
        assert_eq!(frame.scale, 1.0);
    }

    #[test]
    fn test_degenerate_viewport_draws_nothing() {
        let cases = [
            (vec2(0.0, 400.0), 0.0),
            (vec2(400.0, 0.0), 0.0),
            (vec2(-10.0, 400.0), 0.0),
            (vec2(f32::NAN, 400.0), 0.0),
            (vec2(f32::INFINITY, f32::INFINITY), 0.0),
            (vec2(400.0, 300.0), 150.0),
            (vec2(400.0, 300.0), 200.0),
            (vec2(400.0, 300.0), f32::NAN),
        ];
        for (viewport, padding) in cases {
            let renderer = ClockRenderer::new(Style::new(Style::default().strong(), padding));
            let mut list = CommandList::new();
            let status = renderer.render(&mut list, &at(10, 8, 30, 0), Some(vec2(5.0, 5.0)), viewport);
            assert_eq!(status, FrameStatus::Skipped, "{viewport:?} / {padding}");
            assert!(list.is_empty());
        }
    }

    #[test]
    fn test_frame_contents() {
        let list = renderer().render_frame(&at(10, 8, 42, 250), None, viewport());
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Line { .. })), TRACK_PIECE_COUNT);
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Circle { .. })), 2);
        // indicator, then body and screw for each hand
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Path { .. })), 5);
        assert_eq!(
            count(&list, |c| matches!(c, DrawCommand::Save)),
            count(&list, |c| matches!(c, DrawCommand::Restore))
        );
    }

    #[test]
    fn test_same_inputs_give_identical_frames() {
        let renderer = renderer();
        let time = at(4, 20, 13, 877);
        let pointer = Some(vec2(611.0, 97.5));
        let first = renderer.render_frame(&time, pointer, vec2(900.0, 850.0));
        let second = renderer.render_frame(&time, pointer, vec2(900.0, 850.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_pointer_means_no_tilt_and_no_offsets() {
        let mut latch = PointerLatch::new();
        latch.press(vec2(0.0, 0.0));
        latch.release();

        let list = renderer().render_frame(&at(1, 2, 3, 4), latch.snapshot(), viewport());
        let commands = list.commands();
        assert_eq!(commands[3], DrawCommand::Concat(Mat3::IDENTITY));
        // every element translate after the frame setup is zero
        let offsets: Vec<Vec2> = commands[4..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Translate(v) => Some(*v),
                _ => None,
            })
            .collect();
        assert_eq!(offsets.len(), 5);
        assert!(offsets.iter().all(|v| *v == Vec2::ZERO));
    }

    #[test]
    fn test_pointer_offsets_follow_the_gains() {
        let list = renderer().render_frame(&at(1, 2, 3, 4), Some(vec2(0.0, 0.0)), viewport());
        let offsets: Vec<Vec2> = list.commands()[4..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Translate(v) => Some(*v),
                _ => None,
            })
            .collect();
        assert_eq!(
            offsets,
            vec![
                vec2(-5.0, -5.0),
                vec2(-10.0, -10.0),
                vec2(-20.0, -20.0),
                vec2(-10.0, -10.0),
                vec2(-20.0, -20.0),
            ]
        );
        assert_ne!(list.commands()[3], DrawCommand::Concat(Mat3::IDENTITY));
    }

    #[test]
    fn test_trail_head_is_opaque() {
        let list = renderer().render_frame(&at(0, 0, 15, 0), None, viewport());
        let colors: Vec<u8> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { paint, .. } => Some(paint.color.alpha),
                _ => None,
            })
            .collect();
        // 15 s is 90°, piece 50
        assert_eq!(colors[50], 255);
        assert_eq!(colors[51], Style::default().light().alpha);
        // the tail stops just above the light alpha
        assert_eq!(colors.iter().filter(|&&a| a > 0x8F).count(), TRAIL_PIECE_COUNT);
    }

    #[test]
    fn test_second_indicator_points_at_three_oclock() {
        let mut recorder = DeviceRecorder::default();
        let status = renderer().render(&mut recorder, &at(0, 0, 15, 0), None, viewport());
        assert_eq!(status, FrameStatus::Rendered);
        assert_eq!(recorder.stack.depth(), 0);

        let indicator = &recorder.paths[0][0];
        let apex = indicator[1];
        let expected = vec2(425.0 + INDICATOR_BASE_RADIUS + INDICATOR_HEIGHT, 425.0);
        assert!(apex.distance(expected) < 1e-2, "apex at {apex:?}");
    }

    #[test]
    fn test_dot_is_static() {
        let mut morning = DeviceRecorder::default();
        let mut evening = DeviceRecorder::default();
        renderer().render(&mut morning, &at(7, 5, 0, 0), None, viewport());
        renderer().render(&mut evening, &at(19, 44, 31, 0), None, viewport());
        assert_eq!(morning.circles, evening.circles);

        // 165° clockwise from 12 o'clock on a 268 radius
        let dot = morning.circles[1];
        let angle = DOT_ANGLE_DEGREES.to_radians();
        let expected = vec2(425.0, 425.0) + vec2(angle.sin(), -angle.cos()) * DOT_VIRTUAL_ORBIT_RADIUS;
        assert!(dot.distance(expected) < 1e-2);
    }

    #[test]
    fn test_minute_hand_tip_at_six() {
        let mut recorder = DeviceRecorder::default();
        renderer().render(&mut recorder, &at(0, 30, 0, 0), None, vec2(425.0, 425.0));
        // minute hand body is the fourth path: indicator, hour body, hour screw
        let body = &recorder.paths[3][0];
        let tip = body
            .iter()
            .copied()
            .fold(f32::MIN, |bottom, p| bottom.max(p.y));
        let reach = MINUTE_HAND.screw_outer_radius + MINUTE_HAND.body_height;
        // the curve peaks halfway to its control point
        let expected = 212.5 + (reach + MINUTE_HAND.head_height / 2.0) * 0.5;
        assert!((tip - expected).abs() < 1e-2, "tip at {tip}");
    }

    #[test]
    fn test_tilt_foreshortens_the_pressed_side() {
        let mut flat = DeviceRecorder::default();
        let mut tilted = DeviceRecorder::default();
        let time = at(0, 0, 15, 0);
        renderer().render(&mut flat, &time, None, viewport());
        // press on the right edge
        renderer().render(&mut tilted, &time, Some(vec2(850.0, 425.0)), viewport());

        let flat_apex = flat.paths[0][0][1];
        let tilted_apex = tilted.paths[0][0][1];
        assert!(tilted_apex.x < flat_apex.x);
    }
}
