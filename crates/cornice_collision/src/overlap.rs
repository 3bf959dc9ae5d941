//! # Placement Overlap
//!
//! Footprint overlap between two buildings, for a city placer deciding
//! whether a new building fits. Unrotated buildings are decided by their
//! boxes alone. Rotated ones sample each part of one building (center,
//! corners and edge midpoints of its grown box) against the outline of
//! every part of the other, in both directions.
//!
//! Works on partially generated buildings as long as they have parts.

use cornice_procedural::Building;
use cornice_shared::{Cube, Vec3};

/// True when the XY footprints of `a` and `b` overlap.
///
/// Each part of the sampled building is first grown by `expand_rel` times
/// its size plus `expand_abs`, so a non-zero expansion keeps buildings
/// apart by a margin.
#[must_use]
pub fn check_bcube_overlap_xy(a: &Building, b: &Building, expand_rel: f32, expand_abs: f32) -> bool {
    if a.parts().is_empty() || b.parts().is_empty() {
        return false;
    }
    let grown = grow_xy(a.bcube(), expand_rel, expand_abs);
    if !grown.intersects_xy(b.bcube()) {
        return false;
    }
    if !a.is_rotated() && !b.is_rotated() {
        return true;
    }
    if b.bcube().contains_pt_xy(a.bcube().center()) || a.bcube().contains_pt_xy(b.bcube().center()) {
        return true;
    }
    let mut scratch = Vec::new();
    overlap_one_dir(a, b, expand_rel, expand_abs, &mut scratch)
        || overlap_one_dir(b, a, expand_rel, expand_abs, &mut scratch)
}

fn grow_xy(c: &Cube, expand_rel: f32, expand_abs: f32) -> Cube {
    let sz = c.size();
    let e = Vec3::new(expand_rel * sz.x + expand_abs, expand_rel * sz.y + expand_abs, 0.0);
    Cube::new(c.min - e, c.max + e)
}

/// Samples the parts of `other` against the outlines of `this`.
fn overlap_one_dir(this: &Building, other: &Building, expand_rel: f32, expand_abs: f32, scratch: &mut Vec<Vec3>) -> bool {
    let to_world = |p: Vec3| other.rotation().rotate_about(other.rotation_center(), p);
    let to_this = |p: Vec3| this.rotation().inverse().rotate_about(this.rotation_center(), p);

    for p1 in other.parts() {
        let c = grow_xy(p1, expand_rel, expand_abs);
        // {center, 00, 10, 01, 11, x0, x1, y0, y1}
        let mut pts = [Vec3::ZERO; 9];
        pts[0] = to_this(to_world(p1.center().with_z(0.0)));
        for i in 0..4 {
            let corner = Vec3::new(
                if i & 1 == 1 { c.max.x } else { c.min.x },
                if i >> 1 == 1 { c.max.y } else { c.min.y },
                0.0,
            );
            pts[i + 1] = to_this(to_world(corner));
        }
        let rotated = Cube::from_points(&pts[1..5]);
        pts[5] = pts[1].lerp(pts[3], 0.5);
        pts[6] = pts[2].lerp(pts[4], 0.5);
        pts[7] = pts[1].lerp(pts[2], 0.5);
        pts[8] = pts[3].lerp(pts[4], 0.5);

        for p2 in this.parts() {
            // Heavy overlap
            if rotated.contains_pt_xy(p2.center()) {
                return true;
            }
            if pts.iter().any(|&pt| this.part_contains_pt_xy(p2, pt, scratch)) {
                return true;
            }
        }
    }
    false
}
