//! # Intersection Kernels
//!
//! Stateless tests of spheres, segments and points against boxes, planar
//! convex polygons and vertical cylinders. Every input is in one frame;
//! nothing here knows about buildings.

use cornice_shared::{Axis, Cube, Vec3};

/// Denominators below this are treated as parallel.
const PARALLEL_EPS: f32 = 1e-8;

const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

// ============================================================================
// SPHERE TESTS
// ============================================================================

/// True when a sphere overlaps a box. With `xy_only` the sphere is treated
/// as a vertical cylinder of infinite height.
#[must_use]
pub fn sphere_intersects_cube(pos: Vec3, radius: f32, c: &Cube, xy_only: bool) -> bool {
    let axes: &[Axis] = if xy_only { &AXES[..2] } else { &AXES };
    let mut d2 = 0.0;
    for &axis in axes {
        let v = pos.get(axis);
        let q = v.clamp(c.lo(axis), c.hi(axis));
        d2 += (v - q) * (v - q);
    }
    d2 <= radius * radius
}

/// Pushes a sphere out of a box.
///
/// The sphere leaves through the face it came in by, judged from `prev`.
/// A sphere that was already inside leaves through the nearest face.
/// With `skip_z` only the four vertical faces are candidates and the box
/// only needs to overlap the sphere's Z extent.
///
/// Returns the contact normal when `pos` was moved.
pub fn sphere_cube_push_out(pos: &mut Vec3, radius: f32, c: &Cube, prev: Vec3, skip_z: bool) -> Option<Vec3> {
    let axes: &[Axis] = if skip_z { &AXES[..2] } else { &AXES };

    if skip_z && (pos.z + radius <= c.z1() || pos.z - radius >= c.z2()) {
        return None;
    }
    let mut d2 = 0.0;
    for &axis in axes {
        let v = pos.get(axis);
        let q = v.clamp(c.lo(axis), c.hi(axis));
        d2 += (v - q) * (v - q);
    }
    let touching = if radius > 0.0 { d2 < radius * radius } else { d2 == 0.0 };
    if !touching {
        return None;
    }

    // Entry face: the axis along which `prev` sat furthest outside
    let mut entry: Option<(Axis, bool, f32)> = None;
    for &axis in axes {
        let v = prev.get(axis);
        let outside = if v < c.lo(axis) {
            Some((false, c.lo(axis) - v))
        } else if v > c.hi(axis) {
            Some((true, v - c.hi(axis)))
        } else {
            None
        };
        if let Some((hi, dist)) = outside {
            match entry {
                Some((_, _, best)) if best >= dist => {}
                _ => entry = Some((axis, hi, dist)),
            }
        }
    }
    let (axis, hi) = match entry {
        Some((axis, hi, _)) => (axis, hi),
        None => nearest_face(*pos, c, axes),
    };
    let offset = if hi { radius } else { -radius };
    pos.set(axis, c.bound(axis, hi) + offset);
    Some(Vec3::axis_dir(axis, hi))
}

fn nearest_face(pos: Vec3, c: &Cube, axes: &[Axis]) -> (Axis, bool) {
    let mut best = (Axis::X, false);
    let mut best_depth = f32::MAX;

    for &axis in axes {
        for hi in [false, true] {
            let depth = (pos.get(axis) - c.bound(axis, hi)).abs();
            if depth < best_depth {
                best_depth = depth;
                best = (axis, hi);
            }
        }
    }
    best
}

/// True when a sphere touches a planar convex polygon.
///
/// `rdist` is the signed distance of the center from the polygon's plane
/// along `normal`.
#[must_use]
pub fn sphere_poly_intersect(pts: &[Vec3], normal: Vec3, pos: Vec3, rdist: f32, radius: f32) -> bool {
    if rdist.abs() > radius {
        return false;
    }
    let proj = pos - normal * rdist;
    if point_in_convex_polygon(proj, pts, normal) {
        return true;
    }
    // Rim of the sphere's cross-section in the plane
    let r2 = radius * radius - rdist * rdist;
    if r2 <= 0.0 {
        return false;
    }
    (0..pts.len()).any(|i| point_segment_distance_squared(proj, pts[i], pts[(i + 1) % pts.len()]) < r2)
}

// ============================================================================
// SEGMENT TESTS
// ============================================================================

/// Parametric point where the segment `p1 -> p2` crosses a planar convex
/// polygon.
#[must_use]
pub fn line_poly_intersect(p1: Vec3, p2: Vec3, pts: &[Vec3], normal: Vec3) -> Option<f32> {
    let delta = p2 - p1;
    let denom = normal.dot(delta);
    if denom.abs() < PARALLEL_EPS {
        return None;
    }
    let t = normal.dot(pts[0] - p1) / denom;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    point_in_convex_polygon(p1 + delta * t, pts, normal).then_some(t)
}

/// First parametric point where the segment `p1 -> p2` touches a vertical
/// circular cylinder spanning `z1..z2` around the XY of `center`.
///
/// A segment starting inside reports `t = 0`.
#[must_use]
pub fn line_int_vertical_cylinder(p1: Vec3, p2: Vec3, center: Vec3, z1: f32, z2: f32, radius: f32) -> Option<f32> {
    let r2 = radius * radius;
    let inside = |p: Vec3| p.xy_distance_squared(center) <= r2 && p.z >= z1 && p.z <= z2;
    if inside(p1) {
        return Some(0.0);
    }
    let delta = p2 - p1;
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if (0.0..=1.0).contains(&t) && !best.is_some_and(|b| b <= t) {
            best = Some(t);
        }
    };

    // Curved side
    let (ox, oy) = (p1.x - center.x, p1.y - center.y);
    let a = delta.x * delta.x + delta.y * delta.y;
    if a > PARALLEL_EPS {
        let b = 2.0 * (ox * delta.x + oy * delta.y);
        let c = ox * ox + oy * oy - r2;
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let s = disc.sqrt();
            for t in [(-b - s) / (2.0 * a), (-b + s) / (2.0 * a)] {
                let z = p1.z + t * delta.z;
                if z >= z1 && z <= z2 {
                    consider(t);
                }
            }
        }
    }
    // End caps
    if delta.z.abs() > PARALLEL_EPS {
        for z in [z1, z2] {
            let t = (z - p1.z) / delta.z;
            if (p1 + delta * t).xy_distance_squared(center) <= r2 {
                consider(t);
            }
        }
    }
    best
}

// ============================================================================
// POINT TESTS
// ============================================================================

/// XY containment in an axis-aligned ellipse.
#[inline]
#[must_use]
pub fn point_in_ellipse(p: Vec3, center: Vec3, rx: f32, ry: f32) -> bool {
    let dx = (p.x - center.x) / rx;
    let dy = (p.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Containment of a point lying in the plane of a convex polygon, for
/// either winding.
#[must_use]
pub fn point_in_convex_polygon(p: Vec3, pts: &[Vec3], normal: Vec3) -> bool {
    let mut pos = false;
    let mut neg = false;

    for (i, &a) in pts.iter().enumerate() {
        let b = pts[(i + 1) % pts.len()];
        let side = (b - a).cross(p - a).dot(normal);
        pos |= side > 0.0;
        neg |= side < 0.0;
        if pos && neg {
            return false;
        }
    }
    true
}

/// Squared distance from `p` to the segment `a..b`.
#[must_use]
pub fn point_segment_distance_squared(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Cube {
        Cube::from_ranges([0.0, 1.0], [0.0, 1.0], [0.0, 1.0])
    }

    fn square_at_z(z: f32) -> [Vec3; 4] {
        [
            Vec3::new(0.0, 0.0, z),
            Vec3::new(1.0, 0.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(0.0, 1.0, z),
        ]
    }

    #[test]
    fn test_push_out_through_entry_face() {
        let mut pos = Vec3::new(-0.1, 0.5, 0.5);
        let prev = Vec3::new(-1.0, 0.5, 0.5);
        let n = sphere_cube_push_out(&mut pos, 0.25, &unit_box(), prev, false);
        assert_eq!(n, Some(Vec3::new(-1.0, 0.0, 0.0)));
        assert!((pos.x + 0.25).abs() < 1e-6);
        assert_eq!(pos.y, 0.5);
    }

    #[test]
    fn test_push_out_from_inside_uses_nearest_face() {
        let mut pos = Vec3::new(0.5, 0.5, 0.9);
        let prev = pos;
        let n = sphere_cube_push_out(&mut pos, 0.2, &unit_box(), prev, false);
        assert_eq!(n, Some(Vec3::new(0.0, 0.0, 1.0)));
        assert!((pos.z - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_push_out_skip_z_keeps_height() {
        let mut pos = Vec3::new(0.5, 0.5, 0.95);
        let prev = Vec3::new(0.5, 1.5, 0.95);
        let n = sphere_cube_push_out(&mut pos, 0.2, &unit_box(), prev, true);
        assert_eq!(n, Some(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(pos.z, 0.95);
        assert!((pos.y - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_clear_sphere_is_untouched() {
        let mut pos = Vec3::new(2.0, 2.0, 2.0);
        let prev = pos;
        assert!(sphere_cube_push_out(&mut pos, 0.5, &unit_box(), prev, false).is_none());
        assert_eq!(pos, Vec3::new(2.0, 2.0, 2.0));
        assert!(!sphere_intersects_cube(pos, 0.5, &unit_box(), false));
        assert!(sphere_intersects_cube(Vec3::new(0.5, 0.5, 9.0), 0.1, &unit_box(), true));
    }

    #[test]
    fn test_sphere_poly_center_and_rim() {
        let quad = square_at_z(0.0);
        let n = Vec3::Z;
        assert!(sphere_poly_intersect(&quad, n, Vec3::new(0.5, 0.5, 0.3), 0.3, 0.5));
        // Projects outside the square but the rim reaches the edge
        assert!(sphere_poly_intersect(&quad, n, Vec3::new(1.2, 0.5, 0.1), 0.1, 0.5));
        assert!(!sphere_poly_intersect(&quad, n, Vec3::new(2.0, 0.5, 0.1), 0.1, 0.5));
        assert!(!sphere_poly_intersect(&quad, n, Vec3::new(0.5, 0.5, 0.8), 0.8, 0.5));
    }

    #[test]
    fn test_line_poly_hits_inside_only() {
        let quad = square_at_z(1.0);
        let t = line_poly_intersect(Vec3::new(0.5, 0.5, 3.0), Vec3::new(0.5, 0.5, -1.0), &quad, Vec3::Z);
        assert_eq!(t, Some(0.5));
        assert!(line_poly_intersect(Vec3::new(1.5, 0.5, 3.0), Vec3::new(1.5, 0.5, -1.0), &quad, Vec3::Z).is_none());
        assert!(line_poly_intersect(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 1.0), &quad, Vec3::Z).is_none());
    }

    #[test]
    fn test_line_cylinder_side_and_cap() {
        let c = Vec3::new(0.0, 0.0, 0.0);
        let side = line_int_vertical_cylinder(Vec3::new(-4.0, 0.0, 1.0), Vec3::new(4.0, 0.0, 1.0), c, 0.0, 2.0, 1.0);
        assert!((side.unwrap_or(-1.0) - 0.375).abs() < 1e-5);

        let cap = line_int_vertical_cylinder(Vec3::new(0.2, 0.0, 6.0), Vec3::new(0.2, 0.0, -2.0), c, 0.0, 2.0, 1.0);
        assert!((cap.unwrap_or(-1.0) - 0.5).abs() < 1e-5);

        assert!(line_int_vertical_cylinder(Vec3::new(-4.0, 3.0, 1.0), Vec3::new(4.0, 3.0, 1.0), c, 0.0, 2.0, 1.0).is_none());
        assert!(line_int_vertical_cylinder(Vec3::new(-4.0, 0.0, 3.0), Vec3::new(4.0, 0.0, 3.0), c, 0.0, 2.0, 1.0).is_none());
        assert_eq!(line_int_vertical_cylinder(c.with_z(1.0), Vec3::new(9.0, 0.0, 1.0), c, 0.0, 2.0, 1.0), Some(0.0));
    }

    #[test]
    fn test_point_in_ellipse() {
        let c = Vec3::new(10.0, 10.0, 0.0);
        assert!(point_in_ellipse(Vec3::new(13.9, 10.0, 5.0), c, 4.0, 1.0));
        assert!(!point_in_ellipse(Vec3::new(10.0, 11.5, 0.0), c, 4.0, 1.0));
    }

    #[test]
    fn test_convex_polygon_either_winding() {
        let mut quad = square_at_z(0.0);
        assert!(point_in_convex_polygon(Vec3::new(0.3, 0.7, 0.0), &quad, Vec3::Z));
        quad.reverse();
        assert!(point_in_convex_polygon(Vec3::new(0.3, 0.7, 0.0), &quad, Vec3::Z));
        assert!(!point_in_convex_polygon(Vec3::new(1.3, 0.7, 0.0), &quad, Vec3::Z));
    }

    #[test]
    fn test_point_segment_distance() {
        let (a, b) = (Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(point_segment_distance_squared(Vec3::new(1.0, 3.0, 0.0), a, b), 9.0);
        assert_eq!(point_segment_distance_squared(Vec3::new(4.0, 0.0, 0.0), a, b), 4.0);
        assert_eq!(point_segment_distance_squared(Vec3::new(1.0, 1.0, 0.0), a, a), 2.0);
    }
}
