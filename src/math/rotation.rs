//! Point rotation and projection helpers used to orient tube rings and branch tips
//!
//! All functions are pure. Inputs that would require normalizing a zero-length vector
//! return an error instead of producing NaNs.

use crate::core::types::{DMat3, DVec3, GEOMETRY_EPSILON, Result};
use crate::core::Error;

/// Rotate `point` by `theta` radians about the line through `axis_a` and `axis_b`
///
/// The rotation follows the right-hand rule around the direction `axis_a → axis_b` and is
/// computed with the matrix form of Rodrigues' rotation formula.
pub fn rotate_point_about_axis(
    axis_a: DVec3,
    axis_b: DVec3,
    point: DVec3,
    theta: f64,
) -> Result<DVec3> {
    let axis = axis_b - axis_a;
    let magnitude = axis.length();
    if magnitude <= GEOMETRY_EPSILON {
        return Err(Error::DegenerateAxis);
    }
    let n = axis / magnitude;

    let (s, c) = theta.sin_cos();
    let t = 1.0 - c;

    // Columns of c*I + s*[n]x + t*n*n^T
    let m = DMat3::from_cols(
        DVec3::new(t * n.x * n.x + c, t * n.x * n.y + s * n.z, t * n.x * n.z - s * n.y),
        DVec3::new(t * n.x * n.y - s * n.z, t * n.y * n.y + c, t * n.y * n.z + s * n.x),
        DVec3::new(t * n.x * n.z + s * n.y, t * n.y * n.z - s * n.x, t * n.z * n.z + c),
    );

    Ok(m * (point - axis_a) + axis_a)
}

/// Return the point at `distance` from `b` on a line through `b` perpendicular to `a → b`
///
/// The perpendicular direction is `(b - a) × (1, 0, 0)`, or `(b - a) × (0, 1, 0)` when
/// `a → b` has no y or z component. Tube rings are seeded from this point, so the
/// helper choice fixes where ring vertex 0 sits.
pub fn perpendicular_offset_point(a: DVec3, b: DVec3, distance: f64) -> Result<DVec3> {
    let ab = b - a;
    let helper = if ab.y != 0.0 || ab.z != 0.0 { DVec3::X } else { DVec3::Y };

    let cross = ab.cross(helper);
    let magnitude = cross.length();
    if magnitude <= GEOMETRY_EPSILON {
        return Err(Error::ZeroMagnitude);
    }

    Ok(b + cross * (distance / magnitude))
}

/// Orthogonal projection of `c` onto the infinite line through `a` and `b`
pub fn project_point_onto_line(a: DVec3, b: DVec3, c: DVec3) -> Result<DVec3> {
    let direction = b - a;
    let magnitude = direction.length();
    if magnitude <= GEOMETRY_EPSILON {
        return Err(Error::ZeroMagnitude);
    }
    let unit = direction / magnitude;

    Ok(a + unit * unit.dot(c - a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < EPS, "expected {:?}, got {:?}", b, a);
    }

    /// Distance from `p` to the line through `a` and `b`
    fn distance_to_axis(a: DVec3, b: DVec3, p: DVec3) -> f64 {
        let foot = project_point_onto_line(a, b, p).unwrap();
        (p - foot).length()
    }

    #[test]
    fn test_rotate_right_hand_rule() {
        // Quarter turn about +Z takes +X to +Y
        let p = rotate_point_about_axis(DVec3::ZERO, DVec3::Z, DVec3::X, FRAC_PI_2).unwrap();
        assert_close(p, DVec3::Y);
    }

    #[test]
    fn test_rotate_about_offset_axis() {
        // Axis parallel to Y through (1, 0, 0); half turn mirrors x around 1
        let a = DVec3::new(1.0, 0.0, 0.0);
        let b = DVec3::new(1.0, 5.0, 0.0);
        let p = rotate_point_about_axis(a, b, DVec3::new(3.0, 2.0, 0.0), PI).unwrap();
        assert_close(p, DVec3::new(-1.0, 2.0, 0.0));
    }

    #[test]
    fn test_rotate_inverse_returns_original() {
        let a = DVec3::new(0.3, -1.2, 2.0);
        let b = DVec3::new(-0.7, 0.4, 1.1);
        let p = DVec3::new(4.0, 1.5, -3.0);
        for theta in [0.1, 0.5, 1.7, PI, 5.9] {
            let rotated = rotate_point_about_axis(a, b, p, theta).unwrap();
            let back = rotate_point_about_axis(a, b, rotated, -theta).unwrap();
            assert_close(back, p);
        }
    }

    #[test]
    fn test_rotate_preserves_axis_distance() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(2.0, 0.5, 3.5);
        let p = DVec3::new(-2.0, 1.0, 0.0);
        let before = distance_to_axis(a, b, p);
        let rotated = rotate_point_about_axis(a, b, p, 2.3).unwrap();
        let after = distance_to_axis(a, b, rotated);
        assert!((before - after).abs() < EPS);
    }

    #[test]
    fn test_rotate_zero_angle_is_identity() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        let q = rotate_point_about_axis(DVec3::ZERO, DVec3::ONE, p, 0.0).unwrap();
        assert_close(q, p);
    }

    #[test]
    fn test_rotate_degenerate_axis() {
        let a = DVec3::new(1.0, 1.0, 1.0);
        let result = rotate_point_about_axis(a, a, DVec3::ZERO, 1.0);
        assert!(matches!(result, Err(Error::DegenerateAxis)));
    }

    #[test]
    fn test_perpendicular_offset_vertical_segment() {
        // (0,1,0) x (1,0,0) = (0,0,-1)
        let p = perpendicular_offset_point(DVec3::ZERO, DVec3::Y, 2.0).unwrap();
        assert_close(p, DVec3::new(0.0, 1.0, -2.0));
    }

    #[test]
    fn test_perpendicular_offset_x_aligned_uses_y_helper() {
        // (3,0,0) x (0,1,0) = (0,0,3)
        let b = DVec3::new(3.0, 0.0, 0.0);
        let p = perpendicular_offset_point(DVec3::ZERO, b, 0.5).unwrap();
        assert_close(p, DVec3::new(3.0, 0.0, 0.5));
    }

    #[test]
    fn test_perpendicular_offset_is_perpendicular() {
        let a = DVec3::new(0.2, 0.1, -0.4);
        let b = DVec3::new(1.0, 2.0, 0.5);
        let p = perpendicular_offset_point(a, b, 1.5).unwrap();
        assert!((p - b).dot(b - a).abs() < EPS);
        assert!(((p - b).length() - 1.5).abs() < EPS);
    }

    #[test]
    fn test_perpendicular_offset_zero_segment() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let result = perpendicular_offset_point(a, a, 1.0);
        assert!(matches!(result, Err(Error::ZeroMagnitude)));
    }

    #[test]
    fn test_project_point_onto_line() {
        let b = DVec3::new(0.0, 2.0, 0.0);
        let p = project_point_onto_line(DVec3::ZERO, b, DVec3::new(3.0, 5.0, -1.0)).unwrap();
        assert_close(p, DVec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_project_point_on_line_is_fixed() {
        let a = DVec3::new(1.0, 1.0, 0.0);
        let b = DVec3::new(2.0, 3.0, 1.0);
        let on_line = a + (b - a) * 0.25;
        assert_close(project_point_onto_line(a, b, on_line).unwrap(), on_line);
    }

    #[test]
    fn test_project_zero_line() {
        let result = project_point_onto_line(DVec3::ONE, DVec3::ONE, DVec3::ZERO);
        assert!(matches!(result, Err(Error::ZeroMagnitude)));
    }
}
