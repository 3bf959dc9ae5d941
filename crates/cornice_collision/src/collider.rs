//! The query surface physics and movement code talks to.

use cornice_procedural::Building;
use cornice_shared::Vec3;

use crate::contain::check_point_or_cylin_contained;
use crate::line::{check_line_coll, LineHit, LineQuery};
use crate::sphere::{check_sphere_coll, SphereContact, SphereQuery};

/// Collision queries against something built from parts.
///
/// Queries are read-only and reentrant. Anything that cannot collide
/// (an empty or never generated building) answers `None`/`false`.
pub trait BuildingCollider {
    /// Pushes a moving sphere out of the geometry.
    ///
    /// Returns the corrected position and the normal of the last surface
    /// hit, both in world orientation, or `None` when nothing was touched.
    fn check_sphere_coll(&self, query: &SphereQuery) -> Option<SphereContact>;

    /// Earliest hit along a segment.
    fn check_line_coll(&self, query: &LineQuery) -> Option<LineHit>;

    /// Containment of a point (`xy_radius == 0`) or of a vertical cylinder.
    fn check_point_or_cylin_contained(&self, pos: Vec3, xlate: Vec3, xy_radius: f32) -> bool;
}

impl BuildingCollider for Building {
    #[inline]
    fn check_sphere_coll(&self, query: &SphereQuery) -> Option<SphereContact> {
        check_sphere_coll(self, query)
    }

    #[inline]
    fn check_line_coll(&self, query: &LineQuery) -> Option<LineHit> {
        check_line_coll(self, query)
    }

    #[inline]
    fn check_point_or_cylin_contained(&self, pos: Vec3, xlate: Vec3, xy_radius: f32) -> bool {
        check_point_or_cylin_contained(self, pos, xlate, xy_radius)
    }
}
