//! Pointer latch and the parallax it drives
//!
//! Input callbacks write the last pointer position into a single slot; the
//! renderer reads one snapshot at the start of each frame.

use nannou::glam::{vec2, Vec2};

use crate::tokens::{MAX_TILT_DEGREES, PARALLAX_GAINS, VIEWPORT_HALF_SIDE};

/// Last known pointer position in view-local pixels (top-left origin, y down)
///
/// A touch gesture belongs to the finger that started it; other fingers are
/// ignored until that one lifts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerLatch {
    position: Option<Vec2>,
    /// Touch id owning the gesture, `None` for the mouse
    owner: Option<u64>,
}

impl PointerLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down
    pub fn press(&mut self, position: Vec2) {
        self.position = Some(position);
        self.owner = None;
    }

    /// Pointer moved; ignored unless a press is active
    pub fn move_to(&mut self, position: Vec2) {
        if self.position.is_some() {
            self.position = Some(position);
        }
    }

    /// Pointer went up or the gesture was cancelled
    pub fn release(&mut self) {
        self.position = None;
        self.owner = None;
    }

    /// Finger `id` went down; ignored while another gesture is active
    pub fn touch_start(&mut self, id: u64, position: Vec2) {
        if self.position.is_none() {
            self.position = Some(position);
            self.owner = Some(id);
        }
    }

    pub fn touch_move(&mut self, id: u64, position: Vec2) {
        if self.owner == Some(id) {
            self.position = Some(position);
        }
    }

    /// Finger `id` lifted or was cancelled
    pub fn touch_end(&mut self, id: u64) {
        if self.owner == Some(id) {
            self.release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    pub fn snapshot(&self) -> Option<Vec2> {
        self.position
    }
}

/// Touch-driven tilt and per-element offsets for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    /// Tilt about the horizontal axis, degrees
    pub rotate_x: f32,
    /// Tilt about the vertical axis, degrees
    pub rotate_y: f32,
    pub second_indicator: Vec2,
    pub dot_orbit: Vec2,
    pub dot: Vec2,
    pub hour_hand: Vec2,
    pub minute_hand: Vec2,
}

impl Default for Parallax {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Parallax {
    /// No tilt and no offsets
    pub const NEUTRAL: Parallax = Parallax {
        rotate_x: 0.0,
        rotate_y: 0.0,
        second_indicator: Vec2::ZERO,
        dot_orbit: Vec2::ZERO,
        dot: Vec2::ZERO,
        hour_hand: Vec2::ZERO,
        minute_hand: Vec2::ZERO,
    };

    /// Parallax for a pointer over a `viewport`-sized view drawn at `scale`
    ///
    /// The pointer is mapped into the centered viewport frame and normalized
    /// by half the viewport side, then each axis is clamped to [-1, 1].
    pub fn from_pointer(pointer: Option<Vec2>, viewport: Vec2, scale: f32) -> Self {
        let Some(pointer) = pointer else {
            return Self::NEUTRAL;
        };
        if !(scale > 0.0) {
            return Self::NEUTRAL;
        }

        let local = (pointer - viewport / 2.0) / scale;
        let percent = vec2(
            clamp_unit(local.x / VIEWPORT_HALF_SIDE),
            clamp_unit(local.y / VIEWPORT_HALF_SIDE),
        );
        Self::from_percent(percent)
    }

    /// Parallax for a pointer offset already normalized to [-1, 1]
    pub fn from_percent(percent: Vec2) -> Self {
        let gains = PARALLAX_GAINS;
        Self {
            rotate_x: MAX_TILT_DEGREES * -percent.y,
            rotate_y: MAX_TILT_DEGREES * percent.x,
            second_indicator: percent * gains.second_indicator,
            dot_orbit: percent * gains.dot_orbit,
            dot: percent * gains.dot,
            hour_hand: percent * gains.hour_hand,
            minute_hand: percent * gains.minute_hand,
        }
    }
}

/// Clamp to [-1, 1], mapping NaN to 0
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
