//! # Sphere Queries
//!
//! Pushes a moving sphere out of a building. Parts are tested first, by
//! footprint class:
//!
//! - **Cylinders**: radial push-out, or the polygon test when the ellipse
//!   is clearly non-circular
//! - **N-gon prisms**: each side quad, then the top polygon
//! - **Cuboids**: box push-out, continuing over the remaining parts so
//!   inside corners resolve on both axes
//!
//! Details and roof surfaces follow unless the query is XY-only. A cuboid
//! hit on a building with an interior can hand the query over to the
//! interior walls, floors and furniture instead.

use cornice_procedural::Building;
use cornice_shared::{point_in_polygon_xy, polygon_normal, Axis, Cube, Vec3};

use crate::frame::LocalFrame;
use crate::intersect::{sphere_cube_push_out, sphere_intersects_cube, sphere_poly_intersect};

/// A sphere moving from `prev` to `pos`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereQuery {
    /// Current center (world).
    pub pos: Vec3,
    /// Center on the previous step (world).
    pub prev: Vec3,
    /// Offset from building coordinates to world coordinates.
    pub xlate: Vec3,
    /// Sphere radius. Zero tests a point.
    pub radius: f32,
    /// Only test the ground-level parts, without vertical push-out.
    pub xy_only: bool,
    /// Collide with interior walls and floors once inside a cuboid part.
    pub check_interior: bool,
}

impl SphereQuery {
    /// Query without translation, height-aware, exterior only.
    #[must_use]
    pub fn new(pos: Vec3, prev: Vec3, radius: f32) -> Self {
        Self {
            pos,
            prev,
            xlate: Vec3::ZERO,
            radius,
            xy_only: false,
            check_interior: false,
        }
    }

    /// Sets the building-to-world offset.
    #[must_use]
    pub fn with_xlate(mut self, xlate: Vec3) -> Self {
        self.xlate = xlate;
        self
    }

    /// Restricts the test to the ground-level footprint.
    #[must_use]
    pub fn xy_only(mut self) -> Self {
        self.xy_only = true;
        self
    }

    /// Enables the interior test.
    #[must_use]
    pub fn with_interior(mut self) -> Self {
        self.check_interior = true;
        self
    }
}

/// Corrected sphere center and contact normal, both in world orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereContact {
    /// Sphere center after push-out.
    pub pos: Vec3,
    /// Unit normal of the last surface hit.
    pub normal: Vec3,
}

pub(crate) fn check_sphere_coll(b: &Building, q: &SphereQuery) -> Option<SphereContact> {
    if !b.is_valid() {
        return None;
    }
    let radius = q.radius;
    if radius > 0.0 && !sphere_intersects_cube(q.pos, radius, &b.bcube().translated(q.xlate), q.xy_only) {
        return None;
    }
    let frame = LocalFrame::new(b, q.xlate);
    let start = frame.to_local(q.pos);
    let prev = frame.to_local(q.prev);
    let mut pos = start;
    let mut normal = None;
    let mut enter_interior = false;
    let mut scratch = Vec::new();
    let ground = b.local_bcube().z1();

    for part in b.parts() {
        // Upper levels lie inside the ground footprint
        if q.xy_only && part.z1() > ground {
            break;
        }
        if !q.xy_only && (pos.z + radius < part.z1() || pos.z - radius > part.z2()) {
            continue;
        }
        if radius == 0.0 && !(if q.xy_only { part.contains_pt_xy(pos) } else { part.contains_pt(pos) }) {
            continue;
        }
        let hit = if b.footprint().uses_cylinder_collision() {
            collide_cylinder(b, part, &mut pos, prev, radius, &mut scratch)
        } else if !b.is_cube() {
            collide_sides(b, part, &mut pos, prev, radius, &mut scratch)
        } else {
            let n = sphere_cube_push_out(&mut pos, radius, part, prev, q.xy_only);
            enter_interior |= n.is_some() && q.check_interior && b.interior().is_some();
            n
        };
        if hit.is_some() {
            normal = hit;
        }
    }
    if !q.xy_only {
        for d in b.details() {
            if let Some(n) = sphere_cube_push_out(&mut pos, radius, d, prev, false) {
                normal = Some(n);
            }
        }
        for tq in b.roof_surfaces() {
            let n = tq.normal();
            // Roof planes push upward
            let n = if n.z < 0.0 { -n } else { n };
            let rdist = n.dot(pos - tq.points()[0]);
            if rdist.abs() < radius && sphere_poly_intersect(tq.points(), n, pos, rdist, radius) {
                pos += n * (radius - rdist);
                normal = Some(n);
                break;
            }
        }
    }
    if enter_interior {
        tracing::trace!("Sphere at {:?} entered a building interior", q.pos);
        pos = start;
        normal = collide_interior(b, &mut pos, prev, radius, q.xy_only);
    }
    let normal = normal?;

    Some(SphereContact {
        pos: frame.to_world(pos),
        normal: frame.dir_to_world(normal),
    })
}

fn collide_cylinder(
    b: &Building,
    part: &Cube,
    pos: &mut Vec3,
    prev: Vec3,
    radius: f32,
    scratch: &mut Vec<Vec3>,
) -> Option<Vec3> {
    let cc = part.center();
    let (crx, cry) = (0.5 * part.dx(), 0.5 * part.dy());
    let rmax = crx.max(cry);
    let r_sum = radius + rmax;
    let d2 = pos.xy_distance_squared(cc);
    if d2 >= r_sum * r_sum {
        return None;
    }
    if (crx - cry).abs() >= radius {
        return collide_sides(b, part, pos, prev, radius, scratch);
    }
    if prev.z > part.z2() && d2 < rmax * rmax {
        pos.z = part.z2() + radius;
        return Some(Vec3::Z);
    }
    let (dx, dy) = (pos.x - cc.x, pos.y - cc.y);
    let dist = d2.sqrt();
    // On the axis there is no radial direction
    if dist == 0.0 {
        pos.x = cc.x + r_sum;
        return Some(Vec3::X);
    }
    let mult = r_sum / dist;
    pos.x = cc.x + mult * dx;
    pos.y = cc.y + mult * dy;
    Some(Vec3::new(dx, dy, 0.0).normalized())
}

/// Side quads of an N-gon part, then its top face.
fn collide_sides(
    b: &Building,
    part: &Cube,
    pos: &mut Vec3,
    prev: Vec3,
    radius: f32,
    scratch: &mut Vec<Vec3>,
) -> Option<Vec3> {
    b.part_poly_points(part, 0.0, scratch);
    let cc = part.center();
    let n_sides = scratch.len();
    let mut normal = None;

    for s in 0..n_sides {
        let (a, c) = (scratch[s], scratch[(s + 1) % n_sides]);
        let quad = [
            a.with_z(part.z1()),
            a.with_z(part.z2()),
            c.with_z(part.z2()),
            c.with_z(part.z1()),
        ];
        let mut n = polygon_normal(&quad);
        if n.dot(a.with_z(cc.z) - cc) < 0.0 {
            n = -n;
        }
        let rdist = n.dot(*pos - quad[0]);
        if rdist < 0.0 || rdist >= radius || !sphere_poly_intersect(&quad, n, *pos, rdist, radius) {
            continue;
        }
        *pos += n * (radius - rdist);
        normal = Some(n);
    }
    if normal.is_some() {
        return normal;
    }
    if pos.z.max(prev.z) > part.z2() && point_in_polygon_xy(pos.x, pos.y, scratch) {
        pos.z = part.z2() + radius;
        return Some(Vec3::Z);
    }
    None
}

/// Walls and furniture push in XY only; floors push on every axis.
fn collide_interior(b: &Building, pos: &mut Vec3, prev: Vec3, radius: f32, xy_only: bool) -> Option<Vec3> {
    let interior = b.interior()?;
    let mut normal = None;

    for axis in Axis::HORIZONTAL {
        for w in interior.walls(axis) {
            if let Some(n) = sphere_cube_push_out(pos, radius, w, prev, true) {
                normal = Some(n);
            }
        }
    }
    if !xy_only {
        for f in &interior.floors {
            if let Some(n) = sphere_cube_push_out(pos, radius, f, prev, false) {
                normal = Some(n);
            }
        }
    }
    for c in &interior.furniture {
        if let Some(n) = sphere_cube_push_out(pos, radius, c, prev, true) {
            normal = Some(n);
        }
    }
    normal
}
