//! # Roof Synthesizer
//!
//! Three roof styles plus rooftop details:
//!
//! - **Peaked**: two sloped quads meeting at a ridge, with gable triangles
//!   at the ends unless another part already covers that face.
//! - **Sloped**: four triangles meeting at an apex, or a flat top quad with
//!   four skirt quads down to the top edges. Simple cuboids only.
//! - **Details**: small boxes and an antenna on the top part.
//!
//! Every step grows the local bounding box so it always encloses the final
//! silhouette.

use cornice_shared::{Axis, Cube, SurfaceKind, TaggedQuad, Vec3};

use crate::building::Building;
use crate::seed::BuildingRng;

/// Blend factor below which a sloped roof comes to a single point.
const POINTED_ROOF_THRESH: f32 = 0.2;

/// Most rooftop blocks (exclusive upper bound of the draw).
const MAX_ROOF_BLOCKS: u32 = 9;

/// Adds a gable roof on `top` with the ridge along `dim`.
///
/// Returns the height of the ridge above the top of `top`.
pub(crate) fn gen_peaked_roof(b: &mut Building, top: &Cube, peak_height: f32, dim: Axis) -> f32 {
    let width = top.len(dim.other());
    let roof_dz = (peak_height * width).min(top.dz());
    let (z1, z2) = (top.z2(), top.z2() + roof_dz);
    let (x1, y1, x2, y2) = (top.min.x, top.min.y, top.max.x, top.max.y);

    let mut pts = [
        Vec3::new(x1, y1, z1),
        Vec3::new(x1, y2, z1),
        Vec3::new(x2, y2, z1),
        Vec3::new(x2, y1, z1),
        Vec3::new(x1, y1, z2),
        Vec3::new(x2, y2, z2),
    ];
    // Ridge endpoints sit on the center line
    if dim == Axis::X {
        let yc = 0.5 * (y1 + y2);
        pts[4].y = yc;
        pts[5].y = yc;
    } else {
        let xc = 0.5 * (x1 + x2);
        pts[4].x = xc;
        pts[5].x = xc;
    }
    let (quads, tris): ([[usize; 4]; 2], [[usize; 3]; 2]) = if dim == Axis::X {
        ([[0, 3, 5, 4], [4, 5, 2, 1]], [[1, 0, 4], [3, 2, 5]])
    } else {
        ([[0, 4, 5, 1], [4, 3, 2, 5]], [[0, 3, 4], [2, 1, 5]])
    };

    for q in quads {
        b.roof_tquads.push(TaggedQuad::quad(
            SurfaceKind::RoofSlope,
            [pts[q[0]], pts[q[1]], pts[q[2]], pts[q[3]]],
        ));
    }
    for (n, t) in tris.into_iter().enumerate() {
        let end = n == 1;
        let odim = dim.other();
        // Skip gables hidden against an adjacent part
        let occluded = b.parts.iter().any(|p| {
            p.bound(dim, !end) == top.bound(dim, end)
                && p.z1() <= z1
                && p.z2() >= z2
                && p.lo(odim) <= top.lo(odim)
                && p.hi(odim) >= top.hi(odim)
        });
        if occluded {
            continue;
        }
        b.roof_tquads
            .push(TaggedQuad::triangle(SurfaceKind::RoofWall, [pts[t[0]], pts[t[1]], pts[t[2]]]));
    }
    roof_dz
}

/// Adds a hipped or flat-with-skirt roof on the top part of a simple cuboid.
pub(crate) fn gen_sloped_roof(b: &mut Building, rng: &mut BuildingRng) {
    assert!(!b.parts.is_empty(), "sloped roof needs a top part");
    if !b.is_simple_cube() {
        return;
    }
    let top = b.parts[b.parts.len() - 1];
    let peak_height = rng.rand_uniform(0.2, 0.5);
    let wmin = top.dx().min(top.dy());
    let (z1, z2) = (top.z2(), top.z2() + peak_height * wmin);
    let (x1, y1, x2, y2) = (top.min.x, top.min.y, top.max.x, top.max.y);
    let pts = [
        Vec3::new(x1, y1, z1),
        Vec3::new(x1, y2, z1),
        Vec3::new(x2, y2, z1),
        Vec3::new(x2, y1, z1),
        Vec3::new(0.5 * (x1 + x2), 0.5 * (y1 + y2), z2),
    ];
    let d1 = rng.rand_uniform(0.0, 0.8);

    if d1 < POINTED_ROOF_THRESH {
        for t in [[1, 0, 4], [3, 2, 4], [0, 3, 4], [2, 1, 4]] {
            b.roof_tquads
                .push(TaggedQuad::triangle(SurfaceKind::RoofSlope, [pts[t[0]], pts[t[1]], pts[t[2]]]));
        }
    } else {
        let mut pts2 = [Vec3::ZERO; 8];
        for (n, p) in pts[..4].iter().enumerate() {
            pts2[n] = *p;
            pts2[n + 4] = pts[4].lerp(*p, d1);
        }
        // Flat quad first: sphere queries stop at the first roof hit
        let quads = [[4, 7, 6, 5], [0, 4, 5, 1], [3, 2, 6, 7], [0, 3, 7, 4], [2, 1, 5, 6]];
        for (n, q) in quads.into_iter().enumerate() {
            let kind = if n == 0 { SurfaceKind::RoofCap } else { SurfaceKind::RoofSlope };
            b.roof_tquads
                .push(TaggedQuad::quad(kind, [pts2[q[0]], pts2[q[1]], pts2[q[2]], pts2[q[3]]]));
        }
    }
    b.add_roof_to_bcube();
    b.detail_tint = Some(rng.rand_uniform(0.4, 0.8));
}

/// Adds rooftop blocks (roofless buildings only) and maybe an antenna.
pub(crate) fn gen_details(b: &mut Building, rng: &mut BuildingRng) {
    assert!(!b.parts.is_empty(), "details need a top part");
    let num_blocks = if b.roof_tquads.is_empty() {
        rng.rand_below(MAX_ROOF_BLOCKS)
    } else {
        0
    };
    b.has_antenna = rng.rand_bool();
    if num_blocks == 0 && !b.has_antenna {
        return;
    }
    let top = b.parts[b.parts.len() - 1];

    if num_blocks > 0 {
        let xy_sz = top.xy_diagonal();
        let height_scale = 0.0035 * (top.dz() + b.local_bcube.dz());
        let simple = b.is_simple_cube();
        let mut points = Vec::new();

        for _ in 0..num_blocks {
            let height = height_scale * rng.rand_uniform(1.0, 4.0);

            // Unbounded: the top always has room for the smallest block
            let mut c = loop {
                let center = Vec3::new(
                    rng.rand_uniform(top.min.x, top.max.x),
                    rng.rand_uniform(top.min.y, top.max.y),
                    0.0,
                );
                let hx = xy_sz * rng.rand_uniform(0.01, 0.08);
                let hy = xy_sz * rng.rand_uniform(0.01, 0.06);
                let c = Cube::new(center - Vec3::new(hx, hy, 0.0), center + Vec3::new(hx, hy, 0.0));

                if !top.contains_cube_xy(&c) {
                    continue;
                }
                if simple {
                    break c;
                }
                let contained = (0..4).all(|j| {
                    let pt = Vec3::new(c.bound(Axis::X, j & 1 == 1), c.bound(Axis::Y, j >> 1 == 1), 0.0);
                    b.footprint.part_contains_pt_xy(&top, pt, &mut points)
                });
                if contained {
                    break c;
                }
            };
            c.min.z = top.z2();
            c.max.z = top.z2() + height;
            b.details.push(c);
        }
    }
    if b.has_antenna {
        let radius = 0.003 * rng.rand_uniform(1.0, 2.0) * (top.dx() + top.dy());
        let height = rng.rand_uniform(0.25, 0.5) * top.dz();
        let center = top.center();
        let mut antenna = Cube::new(
            center - Vec3::new(radius, radius, 0.0),
            center + Vec3::new(radius, radius, 0.0),
        );
        antenna.min.z = top.z2();
        // Above the sloped roof, if any
        antenna.max.z = b.local_bcube.z2() + height;
        b.details.push(antenna);
    }
    b.add_details_to_bcube();

    if b.roof_tquads.is_empty() {
        b.detail_tint = Some(rng.rand_uniform(0.2, 0.6));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::BuildingKind;
    use crate::seed::BuildingSeed;
    use crate::shape::{FootprintShape, Shape};

    fn building_with(parts: &[Cube]) -> Building {
        let mut b = Building::shell(parts[0], BuildingKind::House);
        b.parts.extend_from_slice(parts);
        b.calc_bcube_from_parts();
        b
    }

    #[test]
    fn test_peaked_roof_height_and_gables() {
        let top = Cube::from_ranges([0.0, 10.0], [0.0, 6.0], [0.0, 5.0]);
        let mut b = building_with(&[top]);
        let dz = gen_peaked_roof(&mut b, &top, 0.3, Axis::X);
        assert!((dz - 1.8).abs() < 1e-5, "ridge height is 0.3 * 6");

        let slopes = b.roof_tquads.iter().filter(|q| q.kind == SurfaceKind::RoofSlope).count();
        let gables = b.roof_tquads.iter().filter(|q| q.kind == SurfaceKind::RoofWall).count();
        assert_eq!(slopes, 2);
        assert_eq!(gables, 2);
        // Ridge runs along X at the Y center
        let ridge_y: Vec<f32> = b.roof_tquads[0].points().iter().filter(|p| p.z > 5.0).map(|p| p.y).collect();
        assert!(ridge_y.iter().all(|y| (*y - 3.0).abs() < 1e-6));
    }

    #[test]
    fn test_peaked_roof_height_capped_by_box() {
        let top = Cube::from_ranges([0.0, 10.0], [0.0, 10.0], [0.0, 1.0]);
        let mut b = building_with(&[top]);
        assert_eq!(gen_peaked_roof(&mut b, &top, 0.5, Axis::Y), 1.0);
    }

    #[test]
    fn test_occluded_gable_is_skipped() {
        let low = Cube::from_ranges([0.0, 6.0], [0.0, 6.0], [0.0, 3.0]);
        let tall = Cube::from_ranges([6.0, 12.0], [-1.0, 7.0], [0.0, 9.0]);
        let mut b = building_with(&[low, tall]);
        gen_peaked_roof(&mut b, &low, 0.3, Axis::X);
        let gables: Vec<&TaggedQuad> = b.roof_tquads.iter().filter(|q| q.kind == SurfaceKind::RoofWall).collect();
        assert_eq!(gables.len(), 1, "the gable against the tall part is hidden");
        assert!(gables[0].points().iter().all(|p| p.x == 0.0));
    }

    #[test]
    fn test_sloped_roof_styles() {
        let top = Cube::from_ranges([0.0, 8.0], [0.0, 8.0], [0.0, 6.0]);
        let mut saw_pointed = false;
        let mut saw_flat = false;

        for s in 0..40 {
            let mut b = building_with(&[top]);
            b.footprint = FootprintShape::new(Shape::Cuboid);
            let mut rng = BuildingRng::new(BuildingSeed::new(s, 0));
            gen_sloped_roof(&mut b, &mut rng);

            match b.roof_tquads.len() {
                4 => {
                    saw_pointed = true;
                    assert!(b.roof_tquads.iter().all(TaggedQuad::is_triangle));
                }
                5 => {
                    saw_flat = true;
                    assert_eq!(b.roof_tquads[0].kind, SurfaceKind::RoofCap);
                    assert!(b.roof_tquads[0].normal().z > 0.99, "flat cap faces up");
                }
                n => panic!("unexpected roof surface count {n}"),
            }
            for q in &b.roof_tquads {
                for p in q.points() {
                    assert!(b.local_bcube.contains_pt(*p));
                }
            }
            assert!(b.detail_tint.is_some());
        }
        assert!(saw_pointed && saw_flat, "both roof styles should appear over 40 seeds");
    }

    #[test]
    fn test_sloped_roof_skips_polygons() {
        let top = Cube::from_ranges([0.0, 8.0], [0.0, 8.0], [0.0, 6.0]);
        let mut b = building_with(&[top]);
        b.footprint = FootprintShape::new(Shape::Polygon(6));
        let mut rng = BuildingRng::new(BuildingSeed::new(1, 2));
        gen_sloped_roof(&mut b, &mut rng);
        assert!(b.roof_tquads.is_empty());
    }

    #[test]
    fn test_details_sit_on_top_inside_footprint() {
        let top = Cube::from_ranges([0.0, 20.0], [0.0, 16.0], [0.0, 30.0]);
        for shape in [Shape::Cuboid, Shape::Cylinder, Shape::Polygon(5)] {
            for s in 0..10 {
                let mut b = building_with(&[top]);
                b.footprint = FootprintShape::new(shape);
                let mut rng = BuildingRng::new(BuildingSeed::new(s, 7));
                gen_details(&mut b, &mut rng);
                let mut pts = Vec::new();

                for (i, d) in b.details.iter().enumerate() {
                    assert_eq!(d.z1(), top.z2());
                    assert!(d.z2() > d.z1());
                    assert!(b.local_bcube.contains_cube(d));
                    let is_antenna = b.has_antenna && i + 1 == b.details.len();
                    if !is_antenna {
                        for j in 0..4usize {
                            let pt = Vec3::new(d.bound(Axis::X, j & 1 == 1), d.bound(Axis::Y, j >> 1 == 1), 0.0);
                            assert!(b.footprint.part_contains_pt_xy(&top, pt, &mut pts), "{shape:?} detail corner outside outline");
                        }
                    }
                }
            }
        }
    }
}
