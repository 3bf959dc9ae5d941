//! # Line Queries
//!
//! Finds the earliest point where a segment meets a building and says
//! what it met. Parts are tested by footprint class, then detail boxes and
//! roof surfaces, each of which only wins if strictly earlier.
//!
//! A part hit whose Z lands on the part's top is reported as `Roof`,
//! anything lower as `Side`. Vertical segments always hit part tops.

use cornice_procedural::Building;
use cornice_shared::{point_in_polygon_xy, polygon_normal, Vec3};

use crate::frame::LocalFrame;
use crate::intersect::{line_int_vertical_cylinder, line_poly_intersect, point_in_ellipse};

/// Refinement steps for segments against non-circular cylinders.
const ELLIPSE_REFINE_STEPS: u32 = 10;

/// Hits within this fraction of a part's height from its top are roof hits.
const ROOF_Z_TOLERANCE: f32 = 1e-4;

/// What a segment hit first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineCollKind {
    /// Wall of a part
    Side,
    /// Top of a part or a roof surface
    Roof,
    /// Rooftop detail box
    Detail,
}

/// Earliest hit along a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineHit {
    /// Surface class
    pub kind: LineCollKind,
    /// Parametric position in `[0, 1]` from `p1` to `p2`
    pub t: f32,
}

/// A segment query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineQuery {
    /// Segment start (world).
    pub p1: Vec3,
    /// Segment end (world).
    pub p2: Vec3,
    /// Offset from building coordinates to world coordinates.
    pub xlate: Vec3,
    /// Only ask whether the parts block the segment.
    pub occlusion_only: bool,
    /// Return the first part hit found rather than the earliest.
    pub any_hit: bool,
    /// Vertical segments still test roof surfaces for an exact `t`.
    pub need_exact_t: bool,
}

impl LineQuery {
    /// Earliest-hit query with an exact `t`.
    #[must_use]
    pub fn new(p1: Vec3, p2: Vec3) -> Self {
        Self {
            p1,
            p2,
            xlate: Vec3::ZERO,
            occlusion_only: false,
            any_hit: false,
            need_exact_t: true,
        }
    }

    /// Sets the building-to-world offset.
    #[must_use]
    pub fn with_xlate(mut self, xlate: Vec3) -> Self {
        self.xlate = xlate;
        self
    }

    /// Turns the query into an occlusion test.
    #[must_use]
    pub fn occlusion(mut self) -> Self {
        self.occlusion_only = true;
        self
    }

    /// Stops at the first part hit.
    #[must_use]
    pub fn any_hit(mut self) -> Self {
        self.any_hit = true;
        self
    }
}

pub(crate) fn check_line_coll(b: &Building, q: &LineQuery) -> Option<LineHit> {
    if !b.is_valid() {
        return None;
    }
    if b.bcube().translated(q.xlate).line_clip(q.p1, q.p2).is_none() {
        return None;
    }

    let frame = LocalFrame::new(b, q.xlate);
    let p1 = frame.to_local(q.p1);
    let p2 = frame.to_local(q.p2);
    let delta = p2 - p1;
    let (pzmin, pzmax) = (p1.z.min(p2.z), p1.z.max(p2.z));
    let vert = p1.x == p2.x && p1.y == p2.y;
    let cylinder = b.footprint().uses_cylinder_collision();
    let mut scratch = Vec::new();
    let mut t = 1.0f32;
    let mut found = None;

    for part in b.parts() {
        if pzmin > part.z2() || pzmax < part.z1() {
            continue;
        }
        let mut hit = false;

        if cylinder {
            let cc = part.center();
            let sz = part.size();

            if vert {
                if delta.z == 0.0 || !point_in_ellipse(p1, cc, 0.5 * sz.x, 0.5 * sz.y) {
                    continue;
                }
                let tz = (part.z2() - p1.z) / delta.z;
                if tz >= 0.0 && tz < t {
                    t = tz;
                    hit = true;
                }
            } else {
                // Conservative radius unless only occlusion matters
                let radius = 0.5 * if q.occlusion_only { sz.x.min(sz.y) } else { sz.x.max(sz.y) };
                let Some(mut tmin) = line_int_vertical_cylinder(p1, p2, cc, part.z1(), part.z2(), radius) else {
                    continue;
                };
                if tmin > t {
                    continue;
                }
                if !q.occlusion_only && sz.x != sz.y {
                    // Walk onto the ellipse, halving the step once inside
                    let mut step = 0.1 * sz.x.max(sz.y) / delta.length();
                    let mut inside = false;
                    for _ in 0..ELLIPSE_REFINE_STEPS {
                        if point_in_ellipse(p1 + delta * tmin, cc, 0.5 * sz.x, 0.5 * sz.y) {
                            inside = true;
                            tmin -= step;
                        } else {
                            tmin += step;
                        }
                        if inside {
                            step *= 0.5;
                        }
                    }
                    if !inside || tmin >= t {
                        continue;
                    }
                }
                t = tmin.max(0.0);
                hit = true;
            }
        } else if !b.is_cube() {
            b.part_poly_points(part, 0.0, &mut scratch);

            if delta.z != 0.0 {
                let tz = (part.z2() - p1.z) / delta.z;
                if tz >= 0.0 && tz < t {
                    let p = p1 + delta * tz;
                    if point_in_polygon_xy(p.x, p.y, &scratch) {
                        t = tz;
                        hit = true;
                    }
                }
            }
            if !vert {
                let n = scratch.len();
                for s in 0..n {
                    let (a, c) = (scratch[s], scratch[(s + 1) % n]);
                    let quad = [
                        a.with_z(part.z1()),
                        a.with_z(part.z2()),
                        c.with_z(part.z2()),
                        c.with_z(part.z1()),
                    ];
                    if let Some(tq) = line_poly_intersect(p1, p2, &quad, polygon_normal(&quad)) {
                        if tq < t {
                            t = tq;
                            hit = true;
                        }
                    }
                }
            }
        } else if let Some((tmin, _)) = part.line_clip(p1, p2) {
            if tmin < t {
                t = tmin;
                hit = true;
            }
        }

        if hit {
            let kind = if vert {
                LineCollKind::Roof
            } else {
                let z = p1.z + t * delta.z;
                if (z - part.z2()).abs() < ROOF_Z_TOLERANCE * part.dz() {
                    LineCollKind::Roof
                } else {
                    LineCollKind::Side
                }
            };
            found = Some(LineHit { kind, t });
            if q.occlusion_only || q.any_hit {
                return found;
            }
        }
    }
    if q.occlusion_only {
        return None;
    }
    for d in b.details() {
        if let Some((tmin, _)) = d.line_clip(p1, p2) {
            if tmin < t {
                t = tmin;
                found = Some(LineHit { kind: LineCollKind::Detail, t });
            }
        }
    }
    // A vertical segment already met the part tops
    if q.need_exact_t || !vert {
        for tq in b.roof_surfaces() {
            if let Some(tr) = line_poly_intersect(p1, p2, tq.points(), tq.normal()) {
                if tr < t {
                    t = tr;
                    found = Some(LineHit { kind: LineCollKind::Roof, t });
                }
            }
        }
    }
    found
}
