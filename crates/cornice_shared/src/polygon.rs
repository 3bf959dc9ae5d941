//! # Polygons and Tagged Surfaces
//!
//! Roof planes, gable walls, chimney caps and doors are all handed to the
//! renderer as a `TaggedQuad`: three or four points plus a surface tag.

use serde::{Deserialize, Serialize};

use crate::cube::Cube;
use crate::math::Vec3;

/// What a tagged surface represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Sloped roof plane
    RoofSlope,
    /// Vertical gable-end triangle under a peaked roof
    RoofWall,
    /// Flat top of a roof
    RoofCap,
    /// Flat cap on top of a chimney
    ChimneyCap,
    /// Door of a house
    HouseDoor,
    /// Door of an office building
    BuildingDoor,
}

impl SurfaceKind {
    /// True for the door tags.
    #[must_use]
    pub const fn is_door(self) -> bool {
        matches!(self, Self::HouseDoor | Self::BuildingDoor)
    }
}

/// Triangle or quad with a surface tag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaggedQuad {
    /// Surface tag
    pub kind: SurfaceKind,
    pts: [Vec3; 4],
    npts: u8,
}

impl TaggedQuad {
    /// Creates a triangle.
    #[must_use]
    pub const fn triangle(kind: SurfaceKind, pts: [Vec3; 3]) -> Self {
        Self {
            kind,
            pts: [pts[0], pts[1], pts[2], pts[2]],
            npts: 3,
        }
    }

    /// Creates a quad.
    #[must_use]
    pub const fn quad(kind: SurfaceKind, pts: [Vec3; 4]) -> Self {
        Self { kind, pts, npts: 4 }
    }

    /// The 3 or 4 points, in winding order.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.pts[..usize::from(self.npts)]
    }

    /// True for a triangle.
    #[must_use]
    pub const fn is_triangle(&self) -> bool {
        self.npts == 3
    }

    /// Unit normal following the winding order.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        polygon_normal(self.points())
    }

    /// Bounding box of the points.
    #[must_use]
    pub fn bounding_cube(&self) -> Cube {
        Cube::from_points(self.points())
    }

    /// Copy shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec3) -> Self {
        let mut q = *self;
        for p in &mut q.pts {
            *p += delta;
        }
        q
    }
}

/// Unit normal of a planar polygon (Newell's method).
///
/// Degenerate polygons yield the zero vector.
#[must_use]
pub fn polygon_normal(pts: &[Vec3]) -> Vec3 {
    let mut n = Vec3::ZERO;
    for (i, a) in pts.iter().enumerate() {
        let b = pts[(i + 1) % pts.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n.normalized()
}

/// Even-odd point-in-polygon test on the XY projection.
#[must_use]
pub fn point_in_polygon_xy(x: f32, y: f32, pts: &[Vec3]) -> bool {
    let mut inside = false;
    let mut j = pts.len().wrapping_sub(1);

    for (i, pi) in pts.iter().enumerate() {
        let pj = pts[j];
        if (pi.y > y) != (pj.y > y) && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
