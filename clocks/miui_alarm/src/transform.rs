//! Transform math for the canvas
//!
//! Matrices are homogeneous 3x3 (`glam::Mat3`, column-major) acting on
//! `(x, y, 1)` in a y-down coordinate system, so a positive rotation turns
//! clockwise on screen. The bottom row may carry a perspective term; use
//! [`map_point`] rather than `transform_point2` to apply the divide.

use nannou::glam::{vec2, vec3, Mat3, Vec2};

/// Clockwise rotation by `degrees` around `pivot`
pub fn rotation_about(degrees: f32, pivot: Vec2) -> Mat3 {
    Mat3::from_translation(pivot)
        * Mat3::from_angle(degrees.to_radians())
        * Mat3::from_translation(-pivot)
}

/// Conjugate `matrix` so it acts around `center` instead of the origin
pub fn pivot(matrix: Mat3, center: Vec2) -> Mat3 {
    Mat3::from_translation(center) * matrix * Mat3::from_translation(-center)
}

/// Projection of the plane `z = 0` after tilting it in 3D
///
/// The plane is turned `rotate_x` degrees about the horizontal axis, then
/// `rotate_y` degrees about the vertical axis, and viewed from a camera
/// `distance` units in front of it. Positive `rotate_x` pushes the top edge
/// away from the viewer. Positive `rotate_y` pushes the right edge away.
pub fn camera_tilt(rotate_x: f32, rotate_y: f32, distance: f32) -> Mat3 {
    let (sin_x, cos_x) = rotate_x.to_radians().sin_cos();
    let (sin_y, cos_y) = rotate_y.to_radians().sin_cos();

    // (x, y, 0) maps to
    //   x' = x cos_y + y sin_x sin_y
    //   y' = y cos_x
    //   z' = x sin_y - y sin_x cos_y
    // and w = 1 + z' / distance
    Mat3::from_cols(
        vec3(cos_y, 0.0, sin_y / distance),
        vec3(sin_x * sin_y, cos_x, -sin_x * cos_y / distance),
        vec3(0.0, 0.0, 1.0),
    )
}

/// Apply `matrix` to a point, including the perspective divide
pub fn map_point(matrix: &Mat3, point: Vec2) -> Vec2 {
    let p = *matrix * vec3(point.x, point.y, 1.0);
    if p.z.abs() <= f32::EPSILON {
        return vec2(p.x, p.y);
    }
    vec2(p.x / p.z, p.y / p.z)
}

/// How much `matrix` stretches lengths near `point`
///
/// Used to scale stroke widths. Averages the stretch of unit steps in x and y.
pub fn local_scale(matrix: &Mat3, point: Vec2) -> f32 {
    let origin = map_point(matrix, point);
    let along_x = map_point(matrix, point + Vec2::X).distance(origin);
    let along_y = map_point(matrix, point + Vec2::Y).distance(origin);
    (along_x + along_y) / 2.0
}
