//! MIUI Alarm clock face
//!
//! An analog clock drawn each frame onto a 2D canvas: a 200-piece second
//! track with a fading trail, a triangular second indicator, a static orbit
//! dot and two hands with a hollow screw. The whole face tilts slightly
//! toward the last touch position.
//!
//! The renderer is backend-agnostic: it drives any [`canvas::Canvas`], and
//! [`canvas::CommandList`] records a frame as plain [`canvas::DrawCommand`]s.

pub mod canvas;
pub mod pointer;
pub mod renderer;
pub mod style;
pub mod tokens;
pub mod trail;
pub mod transform;

pub use canvas::{Canvas, CommandList, DrawCommand, FillRule, LineCap, Paint, PaintStyle, Path};
pub use pointer::{Parallax, PointerLatch};
pub use renderer::{ClockRenderer, FrameGeometry, FrameStatus};
pub use style::{parse_color, Style, StyleError};
pub use trail::GradientTrail;
