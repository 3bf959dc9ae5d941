//! Point and vertical-cylinder containment.

use cornice_procedural::Building;
use cornice_shared::{point_in_polygon_xy, Vec3};

use crate::frame::LocalFrame;
use crate::intersect::point_in_ellipse;

/// With `xy_radius == 0` this is an exact point test; otherwise it tests a
/// vertical cylinder of that radius through `pos`, approximately.
pub(crate) fn check_point_or_cylin_contained(b: &Building, pos: Vec3, xlate: Vec3, xy_radius: f32) -> bool {
    if !b.is_valid() {
        return false;
    }
    if xy_radius == 0.0 && !b.bcube().translated(xlate).contains_pt(pos) {
        return false;
    }
    let p = LocalFrame::new(b, xlate).to_local(pos);
    let mut points = Vec::new();

    for part in b.parts() {
        if p.z > part.z2() || p.z < part.z1() {
            continue;
        }
        if b.footprint().uses_cylinder_collision() {
            let cc = part.center();
            if point_in_ellipse(p, cc, 0.5 * part.dx() + xy_radius, 0.5 * part.dy() + xy_radius) {
                return true;
            }
        } else if !b.is_cube() {
            // Outlines are convex, so growing every vertex radially grows the polygon
            b.part_poly_points(part, 0.0, &mut points);
            if xy_radius > 0.0 {
                let cc = part.center();
                for v in &mut points {
                    let dir = Vec3::new(v.x - cc.x, v.y - cc.y, 0.0);
                    *v += dir * (xy_radius / dir.xy_length());
                }
            }
            if point_in_polygon_xy(p.x, p.y, &points) {
                return true;
            }
        } else if part.expanded_xy(xy_radius).contains_pt(p) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornice_procedural::{BuildingGenerator, BuildingKind, BuildingMaterial, BuildingSeed};
    use cornice_shared::Cube;

    fn single_part(round_prob: f32, cube_prob: f32) -> Building {
        let mat = BuildingMaterial {
            round_prob,
            cube_prob,
            min_sides: 5,
            min_levels: 1,
            max_levels: 1,
            split_prob: 0.0,
            ..BuildingMaterial::default()
        };
        let base = Cube::from_ranges([0.0, 20.0], [0.0, 10.0], [0.0, 6.0]);
        BuildingGenerator::new(mat).generate(&base, BuildingKind::Office, BuildingSeed::new(4, 2))
    }

    #[test]
    fn test_point_in_cuboid() {
        let b = single_part(0.0, 1.0);
        assert!(check_point_or_cylin_contained(&b, Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO, 0.0));
        assert!(!check_point_or_cylin_contained(&b, Vec3::new(-1.0, 1.0, 1.0), Vec3::ZERO, 0.0));
        assert!(check_point_or_cylin_contained(&b, Vec3::new(-1.0, 1.0, 1.0), Vec3::ZERO, 1.5));
        assert!(check_point_or_cylin_contained(&b, Vec3::new(51.0, 1.0, 1.0), Vec3::new(50.0, 0.0, 0.0), 0.0));
    }

    #[test]
    fn test_cylinder_uses_ellipse() {
        let b = single_part(1.0, 0.0);
        assert!(b.footprint().uses_cylinder_collision());
        // Box corner lies outside the inscribed ellipse
        assert!(!check_point_or_cylin_contained(&b, Vec3::new(0.5, 0.5, 1.0), Vec3::ZERO, 0.0));
        assert!(check_point_or_cylin_contained(&b, Vec3::new(10.0, 5.0, 1.0), Vec3::ZERO, 0.0));
        assert!(check_point_or_cylin_contained(&b, Vec3::new(-0.5, 5.0, 1.0), Vec3::ZERO, 1.0));
    }

    #[test]
    fn test_polygon_radius_grows_outline() {
        let b = single_part(0.0, 0.0);
        assert!(!b.is_cube());
        assert!(!check_point_or_cylin_contained(&b, Vec3::new(10.0, -2.0, 1.0), Vec3::ZERO, 0.0));
        assert!(check_point_or_cylin_contained(&b, Vec3::new(10.0, 5.0, 1.0), Vec3::ZERO, 0.0));
        assert!(check_point_or_cylin_contained(&b, Vec3::new(10.0, -0.5, 1.0), Vec3::ZERO, 100.0));
    }

    #[test]
    fn test_invalid_building_contains_nothing() {
        assert!(!check_point_or_cylin_contained(&Building::default(), Vec3::ZERO, Vec3::ZERO, 10.0));
    }
}
