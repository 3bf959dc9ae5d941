//! # Axis-Aligned Boxes
//!
//! Every part, wall, slab, room and detail of a building is a `Cube`.
//! Sides are addressed as `(axis, hi)`: `hi = false` is the low face,
//! `hi = true` the high face.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::{Axis, Vec3};

// ============================================================================
// CUBE (Axis-Aligned Bounding Box)
// ============================================================================

/// Axis-aligned box given by its minimum and maximum corners.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Cube {
    /// Minimum corner of the box (x, y, z).
    pub min: Vec3,
    /// Maximum corner of the box (x, y, z).
    pub max: Vec3,
}

impl Cube {
    /// Creates a new box from its corners.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box from per-axis ranges.
    #[must_use]
    pub const fn from_ranges(x: [f32; 2], y: [f32; 2], z: [f32; 2]) -> Self {
        Self::new(Vec3::new(x[0], y[0], z[0]), Vec3::new(x[1], y[1], z[1]))
    }

    /// Degenerate box containing a single point.
    #[must_use]
    pub const fn from_point(p: Vec3) -> Self {
        Self::new(p, p)
    }

    /// Smallest box containing every point.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Self {
        assert!(!points.is_empty(), "bounding box of zero points");
        let mut c = Self::from_point(points[0]);
        for p in &points[1..] {
            c.union_with_pt(*p);
        }
        c
    }

    /// Low (`hi = false`) or high (`hi = true`) bound along `axis`.
    #[inline]
    #[must_use]
    pub const fn bound(&self, axis: Axis, hi: bool) -> f32 {
        if hi {
            self.max.get(axis)
        } else {
            self.min.get(axis)
        }
    }

    /// Sets one bound.
    #[inline]
    pub fn set_bound(&mut self, axis: Axis, hi: bool, value: f32) {
        if hi {
            self.max.set(axis, value);
        } else {
            self.min.set(axis, value);
        }
    }

    /// Low bound along `axis`.
    #[inline]
    #[must_use]
    pub const fn lo(&self, axis: Axis) -> f32 {
        self.min.get(axis)
    }

    /// High bound along `axis`.
    #[inline]
    #[must_use]
    pub const fn hi(&self, axis: Axis) -> f32 {
        self.max.get(axis)
    }

    /// Bottom Z.
    #[inline]
    #[must_use]
    pub const fn z1(&self) -> f32 {
        self.min.z
    }

    /// Top Z.
    #[inline]
    #[must_use]
    pub const fn z2(&self) -> f32 {
        self.max.z
    }

    /// Extent along `axis`.
    #[inline]
    #[must_use]
    pub fn len(&self, axis: Axis) -> f32 {
        self.hi(axis) - self.lo(axis)
    }

    /// Extent along X.
    #[inline]
    #[must_use]
    pub fn dx(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    #[inline]
    #[must_use]
    pub fn dy(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Extent along Z.
    #[inline]
    #[must_use]
    pub fn dz(&self) -> f32 {
        self.max.z - self.min.z
    }

    /// Extents on all three axes.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Volume.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.dx() * self.dy() * self.dz()
    }

    /// Length of the XY diagonal.
    #[must_use]
    pub fn xy_diagonal(&self) -> f32 {
        self.size().xy_length()
    }

    /// True when every extent is strictly positive.
    #[must_use]
    pub fn is_strictly_normalized(&self) -> bool {
        self.min.x < self.max.x && self.min.y < self.max.y && self.min.z < self.max.z
    }

    /// Swaps reversed bounds so that `min <= max` on every axis.
    pub fn normalize(&mut self) {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let (a, b) = (self.lo(axis), self.hi(axis));
            if a > b {
                self.min.set(axis, b);
                self.max.set(axis, a);
            }
        }
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains_pt(&self, p: Vec3) -> bool {
        self.contains_pt_xy(p) && p.z >= self.min.z && p.z <= self.max.z
    }

    /// Inclusive point containment, ignoring Z.
    #[must_use]
    pub fn contains_pt_xy(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Inclusive box containment.
    #[must_use]
    pub fn contains_cube(&self, c: &Self) -> bool {
        self.contains_cube_xy(c) && c.min.z >= self.min.z && c.max.z <= self.max.z
    }

    /// Inclusive box containment, ignoring Z.
    #[must_use]
    pub fn contains_cube_xy(&self, c: &Self) -> bool {
        c.min.x >= self.min.x && c.max.x <= self.max.x && c.min.y >= self.min.y && c.max.y <= self.max.y
    }

    /// Strict overlap test (touching faces do not intersect).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersects_xy(other) && self.min.z < other.max.z && self.max.z > other.min.z
    }

    /// Strict overlap test, ignoring Z.
    #[must_use]
    pub fn intersects_xy(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// True when the Z ranges overlap (closed intervals).
    #[must_use]
    pub fn z_overlaps(&self, z1: f32, z2: f32) -> bool {
        z1 <= self.max.z && z2 >= self.min.z
    }

    /// Grows the box to include `other`.
    pub fn union_with_cube(&mut self, other: &Self) {
        self.min = Vec3::new(
            self.min.x.min(other.min.x),
            self.min.y.min(other.min.y),
            self.min.z.min(other.min.z),
        );
        self.max = Vec3::new(
            self.max.x.max(other.max.x),
            self.max.y.max(other.max.y),
            self.max.z.max(other.max.z),
        );
    }

    /// Grows the box to include `p`.
    pub fn union_with_pt(&mut self, p: Vec3) {
        self.union_with_cube(&Self::from_point(p));
    }

    /// Copy grown by `amount` on every side of every axis.
    #[must_use]
    pub fn expanded(&self, amount: f32) -> Self {
        let e = Vec3::new(amount, amount, amount);
        Self::new(self.min - e, self.max + e)
    }

    /// Copy grown by `amount` on X and Y only.
    #[must_use]
    pub fn expanded_xy(&self, amount: f32) -> Self {
        let e = Vec3::new(amount, amount, 0.0);
        Self::new(self.min - e, self.max + e)
    }

    /// Copy shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec3) -> Self {
        Self::new(self.min + delta, self.max + delta)
    }

    /// Clips the segment `p1 -> p2` against the box (slab method).
    ///
    /// Returns the parametric entry/exit interval, or `None` if the
    /// segment misses the box.
    #[must_use]
    pub fn line_clip(&self, p1: Vec3, p2: Vec3) -> Option<(f32, f32)> {
        let delta = p2 - p1;
        let mut tmin = 0.0f32;
        let mut tmax = 1.0f32;

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let d = delta.get(axis);
            let o = p1.get(axis);
            let (lo, hi) = (self.lo(axis), self.hi(axis));

            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            tmin = tmin.max(t1);
            tmax = tmax.min(t2);
            if tmin > tmax {
                return None;
            }
        }
        Some((tmin, tmax))
    }
}

/// Raw byte view of a slice of boxes for GPU upload.
#[must_use]
pub fn cubes_as_bytes(cubes: &[Cube]) -> &[u8] {
    bytemuck::cast_slice(cubes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Cube {
        Cube::from_ranges([0.0, 1.0], [0.0, 1.0], [0.0, 1.0])
    }

    #[test]
    fn test_bounds_and_size() {
        let mut c = Cube::from_ranges([1.0, 4.0], [2.0, 3.0], [0.0, 8.0]);
        assert_eq!(c.len(Axis::X), 3.0);
        assert_eq!(c.bound(Axis::Y, true), 3.0);
        c.set_bound(Axis::Z, false, 2.0);
        assert_eq!(c.dz(), 6.0);
        assert_eq!(c.center(), Vec3::new(2.5, 2.5, 5.0));
        assert!(c.is_strictly_normalized());
    }

    #[test]
    fn test_normalize_swaps_reversed_bounds() {
        let mut c = Cube::from_ranges([4.0, 1.0], [0.0, 1.0], [0.0, 1.0]);
        assert!(!c.is_strictly_normalized());
        c.normalize();
        assert_eq!(c.min.x, 1.0);
        assert_eq!(c.max.x, 4.0);
    }

    #[test]
    fn test_touching_boxes_do_not_intersect() {
        let a = unit();
        let b = a.translated(Vec3::new(1.0, 0.0, 0.0));
        assert!(!a.intersects(&b), "shared face must not count as overlap");
        let c = a.translated(Vec3::new(0.5, 0.5, 0.5));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_union_and_containment() {
        let mut a = unit();
        let b = unit().translated(Vec3::new(2.0, 0.0, 0.0));
        a.union_with_cube(&b);
        assert!(a.contains_cube(&b));
        assert!(a.contains_pt(Vec3::new(1.5, 0.5, 0.5)));
        assert!(!a.contains_pt(Vec3::new(1.5, 0.5, 1.5)));
        assert!(a.contains_pt_xy(Vec3::new(1.5, 0.5, 1.5)));
    }

    #[test]
    fn test_line_clip() {
        let c = unit();
        let (t0, t1) = c
            .line_clip(Vec3::new(-1.0, 0.5, 0.5), Vec3::new(3.0, 0.5, 0.5))
            .expect("segment crosses the box");
        assert!((t0 - 0.25).abs() < 1e-6);
        assert!((t1 - 0.5).abs() < 1e-6);

        assert!(c
            .line_clip(Vec3::new(-1.0, 2.0, 0.5), Vec3::new(3.0, 2.0, 0.5))
            .is_none());
        // Vertical segment straight down through the box
        let (t0, _) = c
            .line_clip(Vec3::new(0.5, 0.5, 2.0), Vec3::new(0.5, 0.5, -2.0))
            .expect("vertical hit");
        assert!((t0 - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_cubes_as_bytes() {
        let cubes = [unit(), unit()];
        assert_eq!(cubes_as_bytes(&cubes).len(), 2 * 24);
    }
}
