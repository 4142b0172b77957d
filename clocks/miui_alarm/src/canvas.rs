//! Canvas abstraction
//!
//! An immediate-mode 2D canvas with a save/restore transform stack. The
//! renderer only talks to [`Canvas`]; [`CommandList`] records a frame so it
//! can be inspected or replayed onto a real backend.

use nannou::color::Srgba;
use nannou::glam::{vec2, Mat3, Vec2};
use std::f32::consts::TAU;

use crate::transform::{map_point, rotation_about};

/// Segments used when an oval is flattened
const OVAL_SEGMENTS: usize = 96;
/// Segments used when a quadratic curve is flattened
const QUAD_SEGMENTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    Fill,
    Stroke { width: f32, cap: LineCap },
}

/// Color and style for a draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Srgba<u8>,
    pub style: PaintStyle,
}

impl Paint {
    pub fn fill(color: Srgba<u8>) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
        }
    }

    pub fn stroke(color: Srgba<u8>, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke {
                width,
                cap: LineCap::Butt,
            },
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        if let PaintStyle::Stroke { cap: ref mut c, .. } = self.style {
            *c = cap;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    /// A closed circular contour, drawn clockwise
    Oval { center: Vec2, radius: f32 },
    Close,
}

/// A vector path made of contours
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
    fill_rule: FillRule,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: Vec2) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(to));
        self
    }

    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.segments.push(PathSegment::LineTo(to));
        self
    }

    pub fn quad_to(&mut self, ctrl: Vec2, to: Vec2) -> &mut Self {
        self.segments.push(PathSegment::QuadTo { ctrl, to });
        self
    }

    pub fn add_oval(&mut self, center: Vec2, radius: f32) -> &mut Self {
        self.segments.push(PathSegment::Oval { center, radius });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) -> &mut Self {
        self.fill_rule = rule;
        self
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Flatten into polyline contours in path coordinates.
    ///
    /// Closed contours repeat their first point at the end.
    pub fn flatten(&self) -> Vec<Vec<Vec2>> {
        let mut contours = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    if current.len() > 1 {
                        contours.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathSegment::LineTo(p) => {
                    let start = current.last().copied().unwrap_or(Vec2::ZERO);
                    if current.is_empty() {
                        current.push(start);
                    }
                    current.push(p);
                }
                PathSegment::QuadTo { ctrl, to } => {
                    let start = current.last().copied().unwrap_or(Vec2::ZERO);
                    if current.is_empty() {
                        current.push(start);
                    }
                    current.extend((1..=QUAD_SEGMENTS).map(|i| {
                        let t = i as f32 / QUAD_SEGMENTS as f32;
                        let u = 1.0 - t;
                        start * (u * u) + ctrl * (2.0 * u * t) + to * (t * t)
                    }));
                }
                PathSegment::Oval { center, radius } => {
                    if current.len() > 1 {
                        contours.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    contours.push(oval_points(center, radius));
                }
                PathSegment::Close => {
                    if let Some(&first) = current.first() {
                        current.push(first);
                    }
                    if current.len() > 1 {
                        contours.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }

        if current.len() > 1 {
            contours.push(current);
        }
        contours
    }
}

/// Points around a circle starting at 12 o'clock, clockwise, closed
pub fn oval_points(center: Vec2, radius: f32) -> Vec<Vec2> {
    (0..=OVAL_SEGMENTS)
        .map(|i| {
            let angle = (i as f32 / OVAL_SEGMENTS as f32) * TAU;
            center + vec2(angle.sin(), -angle.cos()) * radius
        })
        .collect()
}

/// Immediate-mode 2D drawing surface
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    /// Clockwise rotation around `pivot`
    fn rotate(&mut self, degrees: f32, pivot: Vec2);
    fn scale(&mut self, factor: Vec2);
    /// Pre-concatenate `matrix` onto the current transform
    fn concat(&mut self, matrix: Mat3);
    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint);
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
    fn draw_path(&mut self, path: &Path, paint: &Paint);
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate { degrees: f32, pivot: Vec2 },
    Scale(Vec2),
    Concat(Mat3),
    Line { from: Vec2, to: Vec2, paint: Paint },
    Circle { center: Vec2, radius: f32, paint: Paint },
    Path { path: Path, paint: Paint },
}

/// A canvas that records every call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay the recorded calls onto another canvas
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for command in &self.commands {
            match command {
                DrawCommand::Save => canvas.save(),
                DrawCommand::Restore => canvas.restore(),
                DrawCommand::Translate(offset) => canvas.translate(*offset),
                DrawCommand::Rotate { degrees, pivot } => canvas.rotate(*degrees, *pivot),
                DrawCommand::Scale(factor) => canvas.scale(*factor),
                DrawCommand::Concat(matrix) => canvas.concat(*matrix),
                DrawCommand::Line { from, to, paint } => canvas.draw_line(*from, *to, paint),
                DrawCommand::Circle {
                    center,
                    radius,
                    paint,
                } => canvas.draw_circle(*center, *radius, paint),
                DrawCommand::Path { path, paint } => canvas.draw_path(path, paint),
            }
        }
    }
}

impl Canvas for CommandList {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, degrees: f32, pivot: Vec2) {
        self.commands.push(DrawCommand::Rotate { degrees, pivot });
    }

    fn scale(&mut self, factor: Vec2) {
        self.commands.push(DrawCommand::Scale(factor));
    }

    fn concat(&mut self, matrix: Mat3) {
        self.commands.push(DrawCommand::Concat(matrix));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            paint: *paint,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.commands.push(DrawCommand::Path {
            path: path.clone(),
            paint: *paint,
        });
    }
}

/// Current transform plus a save stack, for backends that rasterize themselves
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Mat3,
    saved: Vec<Mat3>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new(Mat3::IDENTITY)
    }
}

impl TransformStack {
    pub fn new(base: Mat3) -> Self {
        Self {
            current: base,
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> Mat3 {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Unbalanced restores are ignored
    pub fn restore(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.concat(Mat3::from_translation(offset));
    }

    pub fn rotate(&mut self, degrees: f32, pivot: Vec2) {
        self.concat(rotation_about(degrees, pivot));
    }

    pub fn scale(&mut self, factor: Vec2) {
        self.concat(Mat3::from_scale(factor));
    }

    pub fn concat(&mut self, matrix: Mat3) {
        self.current = self.current * matrix;
    }

    /// Map a point from the current local space to device space
    pub fn map(&self, point: Vec2) -> Vec2 {
        map_point(&self.current, point)
    }
}
