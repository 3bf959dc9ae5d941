//! World <-> building-local transforms.

use cornice_procedural::Building;
use cornice_shared::{Rotation, Vec3};

/// Moves query points into a building's unrotated frame and results back.
///
/// World coordinates are local coordinates rotated about the building's
/// rotation center, then shifted by `xlate`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LocalFrame {
    rotation: Rotation,
    center: Vec3,
    xlate: Vec3,
}

impl LocalFrame {
    pub(crate) fn new(b: &Building, xlate: Vec3) -> Self {
        Self {
            rotation: b.rotation(),
            center: b.rotation_center(),
            xlate,
        }
    }

    #[inline]
    pub(crate) fn to_local(self, p: Vec3) -> Vec3 {
        let p = p - self.xlate;
        if self.rotation.is_identity() {
            p
        } else {
            self.rotation.inverse().rotate_about(self.center, p)
        }
    }

    #[inline]
    pub(crate) fn to_world(self, p: Vec3) -> Vec3 {
        let p = if self.rotation.is_identity() {
            p
        } else {
            self.rotation.rotate_about(self.center, p)
        };
        p + self.xlate
    }

    #[inline]
    pub(crate) fn dir_to_world(self, v: Vec3) -> Vec3 {
        self.rotation.rotate_vector(v)
    }
}
