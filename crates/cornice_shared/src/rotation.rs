//! Rotation about the vertical axis.
//!
//! A building carries one rotation for all of its parts. Parts are stored
//! unrotated; queries move points into the local frame with `inverse()`.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Rotation in the XY plane, stored as sine and cosine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Sine of the angle
    pub sin: f32,
    /// Cosine of the angle
    pub cos: f32,
}

impl Rotation {
    /// No rotation.
    pub const IDENTITY: Self = Self { sin: 0.0, cos: 1.0 };

    /// Rotation by `angle` radians (counter-clockwise seen from +Z).
    #[must_use]
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { sin, cos }
    }

    /// True for the identity rotation.
    #[inline]
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.sin == 0.0
    }

    /// Rotation by the opposite angle.
    #[inline]
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            sin: -self.sin,
            cos: self.cos,
        }
    }

    /// Rotates `p` about `center` in the XY plane. Z is unchanged.
    #[must_use]
    pub fn rotate_about(self, center: Vec3, p: Vec3) -> Vec3 {
        let x = p.x - center.x;
        let y = p.y - center.y;
        Vec3::new(
            self.cos * x - self.sin * y + center.x,
            self.sin * x + self.cos * y + center.y,
            p.z,
        )
    }

    /// Rotates a direction vector. Z is unchanged.
    #[must_use]
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        self.rotate_about(Vec3::ZERO, v)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
