//! Design tokens for the clock face
//!
//! All lengths are in viewport units: the face is laid out on a fixed
//! 850 x 850 square centered on the origin and scaled to the window.

/// Side of the logical viewport square
pub const VIEWPORT_SIDE: f32 = 850.0;
/// Half of [`VIEWPORT_SIDE`]; pointer offsets are normalized by this
pub const VIEWPORT_HALF_SIDE: f32 = VIEWPORT_SIDE / 2.0;

/// Largest tilt of the face in either axis, in degrees
pub const MAX_TILT_DEGREES: f32 = 10.0;
/// Camera distance for the tilt projection (8 inches at 72 units per inch)
pub const CAMERA_DISTANCE: f32 = 576.0;

// second track
pub const TRACK_PIECE_COUNT: usize = 200;
pub const TRACK_PIECE_DEGREES: f32 = 360.0 / TRACK_PIECE_COUNT as f32;
pub const TRACK_STROKE_WIDTH: f32 = 5.0;
pub const TRACK_INNER_RADIUS: f32 = 326.0;
pub const TRACK_OUTER_RADIUS: f32 = 370.0;

/// Arc covered by the fading trail behind the second position
pub const TRAIL_SWEEP_DEGREES: f32 = 90.0;
/// Track pieces in the trail (90° / 1.8°)
pub const TRAIL_PIECE_COUNT: usize = 50;

// triangle second indicator
pub const INDICATOR_BASE_RADIUS: f32 = 286.0;
pub const INDICATOR_BASE_WIDTH: f32 = 41.0;
pub const INDICATOR_HEIGHT: f32 = 33.0;

// dot orbit
pub const DOT_ORBIT_RADIUS: f32 = 268.0;
pub const DOT_ORBIT_STROKE_WIDTH: f32 = 2.0;

// dot
pub const DOT_RADIUS: f32 = 8.5;
pub const DOT_VIRTUAL_ORBIT_RADIUS: f32 = 268.0;
/// The dot is a static marker; it does not follow the time.
pub const DOT_ANGLE_DEGREES: f32 = 165.0;

/// Alpha mask applied to the strong color to derive the light color (ARGB)
pub const LIGHT_COLOR_MASK: u32 = 0x8FFF_FFFF;

/// Geometry of one clock hand and its screw ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSpec {
    pub screw_inner_radius: f32,
    pub screw_outer_radius: f32,
    pub head_height: f32,
    pub body_height: f32,
    pub top_width: f32,
    pub bottom_width: f32,
}

pub const HOUR_HAND: HandSpec = HandSpec {
    screw_inner_radius: 17.0,
    screw_outer_radius: 20.0,
    head_height: 8.0,
    body_height: 182.0,
    top_width: 10.0,
    bottom_width: 16.0,
};

pub const MINUTE_HAND: HandSpec = HandSpec {
    screw_inner_radius: 11.0,
    screw_outer_radius: 23.0,
    head_height: 4.0,
    body_height: 225.0,
    top_width: 7.0,
    bottom_width: 10.0,
};

/// Per-element translation at full pointer deflection, in viewport units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxGains {
    pub second_indicator: f32,
    pub dot_orbit: f32,
    pub dot: f32,
    pub hour_hand: f32,
    pub minute_hand: f32,
}

pub const PARALLAX_GAINS: ParallaxGains = ParallaxGains {
    second_indicator: 5.0,
    dot_orbit: 10.0,
    dot: 20.0,
    hour_hand: 10.0,
    minute_hand: 20.0,
};
