//! # Collision Query Tests
//!
//! Exercises the public query surface against whole generated buildings:
//! clear spheres stay untouched, push-outs settle, rotated buildings answer
//! in world space, and placement overlap respects footprints.

use cornice_collision::{check_bcube_overlap_xy, BuildingCollider, LineCollKind, LineQuery, SphereQuery};
use cornice_procedural::{Building, BuildingGenerator, BuildingKind, BuildingMaterial, BuildingSeed};
use cornice_shared::{Cube, Vec3};

fn city_material() -> BuildingMaterial {
    BuildingMaterial { max_rot_angle: 0.5, ..BuildingMaterial::default() }
}

fn batch(count: i32) -> Vec<Building> {
    let generator = BuildingGenerator::new(city_material());
    (0..count)
        .map(|i| {
            let x = (i % 10) as f32 * 100.0;
            let y = (i / 10) as f32 * 100.0;
            let base = Cube::from_ranges([x, x + 30.0], [y, y + 20.0], [0.0, 24.0]);
            let kind = if i % 3 == 0 { BuildingKind::House } else { BuildingKind::Office };
            generator.generate(&base, kind, BuildingSeed::new(i, 77))
        })
        .collect()
}

fn bare_box(max_rot_angle: f32) -> Building {
    let mat = BuildingMaterial {
        round_prob: 0.0,
        cube_prob: 1.0,
        min_levels: 1,
        max_levels: 1,
        split_prob: 0.0,
        max_rot_angle,
        ..BuildingMaterial::default()
    };
    let base = Cube::from_ranges([0.0, 20.0], [0.0, 12.0], [0.0, 9.0]);
    let generator = BuildingGenerator::new(mat);
    (0..2000)
        .map(|s| generator.generate(&base, BuildingKind::Office, BuildingSeed::new(s, 21)))
        .find(|b| b.parts().len() == 1 && b.details().is_empty() && b.roof_surfaces().is_empty())
        .expect("some seed yields a bare box")
}

fn part_center_world(b: &Building, part: &Cube) -> Vec3 {
    b.rotation().rotate_about(b.rotation_center(), part.center())
}

/// Test: A sphere clear of the bounding box is never reported or moved
#[test]
fn test_clear_sphere_is_untouched() {
    for b in batch(60) {
        let bc = *b.bcube();
        let far = Vec3::new(bc.max.x + 5.0, bc.center().y, bc.center().z);
        let q = SphereQuery::new(far, far, 2.0).with_interior();
        assert!(b.check_sphere_coll(&q).is_none());
        assert_eq!(q.pos, far);
    }
}

/// Test: Feeding a corrected position back in reports no further contact
#[test]
fn test_push_out_settles() {
    let b = bare_box(0.0);
    let q = SphereQuery::new(Vec3::new(20.3, 6.0, 4.0), Vec3::new(22.0, 6.0, 4.0), 0.5);
    let c = b.check_sphere_coll(&q).expect("sphere overlaps the east wall");
    assert_eq!(c.normal, Vec3::X);
    assert!((c.pos.x - 20.5).abs() < 1e-5);

    let again = SphereQuery::new(c.pos, c.pos, 0.5);
    assert!(b.check_sphere_coll(&again).is_none());
}

/// Test: Vertical ray down a cylinder's axis lands on its top as a roof hit
#[test]
fn test_vertical_ray_down_cylinder_is_roof() {
    let mat = BuildingMaterial {
        round_prob: 1.0,
        min_levels: 1,
        max_levels: 1,
        split_prob: 0.0,
        ..BuildingMaterial::default()
    };
    let base = Cube::from_ranges([0.0, 16.0], [0.0, 16.0], [0.0, 12.0]);
    let generator = BuildingGenerator::new(mat);
    let b = (0..2000)
        .map(|s| generator.generate(&base, BuildingKind::Office, BuildingSeed::new(s, 3)))
        .find(|b| b.parts().len() == 1 && b.details().is_empty() && b.roof_surfaces().is_empty())
        .expect("some seed yields a bare cylinder");
    assert!(b.footprint().uses_cylinder_collision());

    let part = b.parts()[0];
    let top = part.z2();
    let ray = LineQuery::new(part.center().with_z(top + 20.0), part.center().with_z(top - 20.0));
    let hit = b.check_line_coll(&ray).expect("ray meets the cylinder");
    assert_eq!(hit.kind, LineCollKind::Roof);
    assert!((hit.t - 0.5).abs() < 1e-5);
}

/// Test: Every part center, taken to world space, is inside its building
#[test]
fn test_part_centers_are_contained() {
    for b in batch(60) {
        for part in b.parts() {
            let p = part_center_world(&b, part);
            assert!(b.check_point_or_cylin_contained(p, Vec3::ZERO, 0.0), "{p:?} not inside its building");
        }
    }
}

/// Test: A ray dropped onto any part stops no later than that part's top
#[test]
fn test_vertical_rays_stop_at_part_tops() {
    for b in batch(40) {
        let z_hi = b.bcube().z2() + 5.0;
        for part in b.parts() {
            let c = part_center_world(&b, part);
            let (p1, p2) = (c.with_z(z_hi), c.with_z(part.z1() - 1.0));
            let hit = b.check_line_coll(&LineQuery::new(p1, p2)).expect("ray above a part hits something");
            let t_top = (z_hi - part.z2()) / (z_hi - p2.z);
            assert!(hit.t <= t_top + 1e-4, "hit at {} after the part top at {t_top}", hit.t);
        }
    }
}

/// Test: Rotated buildings answer in world space
#[test]
fn test_rotated_box_queries() {
    let b = bare_box(1.0);
    assert!(b.is_rotated());
    let world = |x: f32, y: f32, z: f32| b.rotation().rotate_about(b.rotation_center(), Vec3::new(x, y, z));

    assert!(b.check_point_or_cylin_contained(world(0.5, 6.0, 3.0), Vec3::ZERO, 0.0));
    assert!(!b.check_point_or_cylin_contained(world(-0.5, 6.0, 3.0), Vec3::ZERO, 0.0));
    assert!(b.check_point_or_cylin_contained(world(-0.5, 6.0, 3.0), Vec3::ZERO, 1.0));

    // West wall pushes along the rotated -X axis
    let q = SphereQuery::new(world(-0.2, 6.0, 3.0), world(-3.0, 6.0, 3.0), 0.5);
    let c = b.check_sphere_coll(&q).expect("sphere overlaps the rotated wall");
    let expected = b.rotation().rotate_vector(Vec3::new(-1.0, 0.0, 0.0));
    assert!(c.normal.distance(expected) < 1e-5);
    assert!(c.pos.distance(world(-0.5, 6.0, 3.0)) < 1e-3);
}

/// Test: Occlusion and translation on the trait surface
#[test]
fn test_line_occlusion_with_xlate() {
    let b = bare_box(0.0);
    let xlate = Vec3::new(0.0, 500.0, 0.0);
    let ray = LineQuery::new(Vec3::new(-10.0, 506.0, 4.0), Vec3::new(30.0, 506.0, 4.0)).with_xlate(xlate);
    assert!(b.check_line_coll(&ray.occlusion()).is_some());
    assert!(b.check_line_coll(&ray.with_xlate(Vec3::ZERO)).is_none());

    let hit = b.check_line_coll(&ray).expect("translated box is hit");
    assert_eq!(hit.kind, LineCollKind::Side);
    assert!((hit.t - 0.25).abs() < 1e-5);
}

/// Test: Buildings on separate lots never overlap; a building overlaps itself
#[test]
fn test_overlap_between_lots() {
    let city = batch(30);
    for (i, a) in city.iter().enumerate() {
        assert!(check_bcube_overlap_xy(a, a, 0.0, 0.0));
        for b in &city[i + 1..] {
            assert!(!check_bcube_overlap_xy(a, b, 0.0, 0.0));
        }
    }
}
