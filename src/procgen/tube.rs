//! Quad-faced tube segments joining two circular cross-sections

use std::f64::consts::TAU;

use crate::core::types::{DVec3, Result};
use crate::core::Error;
use crate::math::rotation::{perpendicular_offset_point, rotate_point_about_axis};
use crate::mesh::Quad;

/// Build the side faces of one segment running from `base` to `tip`
///
/// The base ring lies perpendicular to the parent axis `prev → base` and the tip ring
/// perpendicular to `base → tip`, so a bent segment joins its parent without a gap.
/// Ring vertex `k` is the ring's seed point rotated by `-k * 2π / polygon_count`.
/// Quad `i` is `(tip_i, base_i, base_i+1, tip_i+1)`.
pub fn build_tube(
    base: DVec3,
    tip: DVec3,
    prev: DVec3,
    base_radius: f64,
    tip_radius: f64,
    polygon_count: u32,
) -> Result<Vec<Quad>> {
    if polygon_count < 3 {
        return Err(Error::InvalidPolygonCount(polygon_count));
    }

    let base_ring = ring(prev, base, base_radius, polygon_count)?;
    let tip_ring = ring(base, tip, tip_radius, polygon_count)?;

    let quads = base_ring
        .windows(2)
        .zip(tip_ring.windows(2))
        .map(|(b, t)| Quad::new(t[0], b[0], b[1], t[1]))
        .collect();

    Ok(quads)
}

/// `polygon_count + 1` points around `center`; the last one closes the loop
fn ring(axis_start: DVec3, center: DVec3, radius: f64, polygon_count: u32) -> Result<Vec<DVec3>> {
    let step = TAU / f64::from(polygon_count);
    let seed = perpendicular_offset_point(axis_start, center, radius)?;

    (0..=polygon_count)
        .map(|k| rotate_point_about_axis(axis_start, center, seed, -(step * f64::from(k))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn straight_tube(polygon_count: u32) -> Vec<Quad> {
        let tip = DVec3::new(0.0, 4.0, 0.0);
        build_tube(DVec3::Y, tip, DVec3::ZERO, 1.0, 0.5, polygon_count).unwrap()
    }

    #[test]
    fn test_quad_count_matches_polygon_count() {
        for n in [3, 4, 7, 20] {
            assert_eq!(straight_tube(n).len(), n as usize);
        }
    }

    #[test]
    fn test_rejects_fewer_than_three_sides() {
        let result = build_tube(DVec3::Y, DVec3::new(0.0, 2.0, 0.0), DVec3::ZERO, 1.0, 1.0, 2);
        assert!(matches!(result, Err(Error::InvalidPolygonCount(2))));
    }

    #[test]
    fn test_quads_are_non_degenerate() {
        for quad in straight_tube(5) {
            let corners = quad.corners();
            for i in 0..4 {
                for j in (i + 1)..4 {
                    let gap = (corners[i] - corners[j]).length();
                    assert!(gap > EPS, "duplicate corner in {:?}", quad);
                }
            }
        }
    }

    #[test]
    fn test_corners_lie_on_rings() {
        let base = DVec3::Y;
        let tip = DVec3::new(0.0, 4.0, 0.0);
        for quad in straight_tube(6) {
            // Tip corners
            for p in [quad.p0, quad.p3] {
                assert!(((p - tip).length() - 0.5).abs() < EPS);
                assert!((p.y - tip.y).abs() < EPS);
            }
            // Base corners
            for p in [quad.p1, quad.p2] {
                assert!(((p - base).length() - 1.0).abs() < EPS);
                assert!((p.y - base.y).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_adjacent_quads_share_edges() {
        let quads = straight_tube(4);
        for pair in quads.windows(2) {
            assert_eq!(pair[0].p2, pair[1].p1);
            assert_eq!(pair[0].p3, pair[1].p0);
        }
        let first = quads.first().unwrap();
        let last = quads.last().unwrap();
        assert!((last.p2 - first.p1).length() < EPS);
        assert!((last.p3 - first.p0).length() < EPS);
    }

    #[test]
    fn test_bent_segment_rings_follow_their_axes() {
        let prev = DVec3::ZERO;
        let base = DVec3::Y;
        let tip = DVec3::new(2.0, 3.0, 0.0);
        let axis = (tip - base).normalize();
        for quad in build_tube(base, tip, prev, 1.0, 1.0, 8).unwrap() {
            // Base ring is horizontal (parent axis is Y)
            assert!((quad.p1.y - base.y).abs() < EPS);
            // Tip ring is perpendicular to the bent axis
            assert!((quad.p0 - tip).dot(axis).abs() < EPS);
        }
    }

    #[test]
    fn test_zero_radius_collapses_ring() {
        let tip = DVec3::new(0.0, 3.0, 0.0);
        let quads = build_tube(DVec3::Y, tip, DVec3::ZERO, 1.0, 0.0, 4).unwrap();
        for quad in quads {
            assert!((quad.p0 - DVec3::new(0.0, 3.0, 0.0)).length() < EPS);
        }
    }

    #[test]
    fn test_degenerate_segment_fails() {
        let result = build_tube(DVec3::Y, DVec3::Y, DVec3::ZERO, 1.0, 1.0, 4);
        assert!(matches!(result, Err(Error::ZeroMagnitude)));
    }
}
