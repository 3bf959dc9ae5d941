//! # Footprint Shapes
//!
//! Buildings are cuboids, cylinders or N-gon prisms. The shape is stored
//! once per building and applies to every part: each part's outline is the
//! shape inscribed in the part's XY extent.

use std::f32::consts::TAU;

use cornice_shared::{point_in_polygon_xy, Cube, Vec3};

/// Side count used to approximate a cylinder outline.
pub const CYLINDER_SIDES: u32 = 36;

/// Cross-section class of a building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Four axis-aligned sides
    Cuboid,
    /// Round (elliptical when the part is not square)
    Cylinder,
    /// Regular polygon with this many sides
    Polygon(u32),
}

impl Shape {
    /// Number of outline vertices.
    #[must_use]
    pub const fn num_sides(self) -> u32 {
        match self {
            Self::Cuboid => 4,
            Self::Cylinder => CYLINDER_SIDES,
            Self::Polygon(n) => n,
        }
    }

    /// True for axis-aligned boxes.
    #[must_use]
    pub const fn is_cube(self) -> bool {
        matches!(self, Self::Cuboid)
    }
}

/// Shape plus the modifiers that bend a regular outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootprintShape {
    /// Cross-section class
    pub shape: Shape,
    /// Fraction of the radius clipped off to make one flat side, in [0, 0.45]
    pub flat_side_amt: f32,
    /// Pull-in of every other vertex, in [0, 0.99]
    pub alt_step_factor: f32,
    /// Angle of the first vertex, radians
    pub start_angle: f32,
    /// Start half a step around instead of at `start_angle`
    pub half_offset: bool,
}

impl Default for FootprintShape {
    fn default() -> Self {
        Self::new(Shape::Cuboid)
    }
}

impl FootprintShape {
    /// Unmodified outline of the given class.
    #[must_use]
    pub const fn new(shape: Shape) -> Self {
        Self {
            shape,
            flat_side_amt: 0.0,
            alt_step_factor: 0.0,
            start_angle: 0.0,
            half_offset: false,
        }
    }

    /// True for axis-aligned boxes.
    #[must_use]
    pub const fn is_cube(&self) -> bool {
        self.shape.is_cube()
    }

    /// Collision treats the part as an ellipse instead of a polygon.
    #[must_use]
    pub fn uses_cylinder_collision(&self) -> bool {
        matches!(self.shape, Shape::Cylinder) && self.flat_side_amt == 0.0
    }

    /// Writes the XY outline of `part` into `out`, grown by `expand`.
    ///
    /// Points are wound clockwise seen from +Z and have `z = 0`.
    pub fn poly_points(&self, part: &Cube, expand: f32, out: &mut Vec<Vec3>) {
        out.clear();

        if self.is_cube() {
            let c = part.expanded_xy(expand);
            out.extend_from_slice(&[
                Vec3::new(c.min.x, c.max.y, 0.0),
                Vec3::new(c.max.x, c.max.y, 0.0),
                Vec3::new(c.max.x, c.min.y, 0.0),
                Vec3::new(c.min.x, c.min.y, 0.0),
            ]);
            return;
        }
        let num = self.shape.num_sides();
        let step = TAU / num as f32;
        let angle0 = if self.half_offset { 0.5 * step } else { self.start_angle };
        // Every other vertex moves toward the chord of its neighbours, never past it
        let odd_radius = 1.0 - self.alt_step_factor * (1.0 - step.cos());
        let (fs, fc) = angle0.sin_cos();
        let flat_dir = Vec3::new(fs, fc, 0.0);
        let flat_limit = 1.0 - self.flat_side_amt;

        let cc = part.center();
        let rx = 0.5 * part.dx() + expand;
        let ry = 0.5 * part.dy() + expand;

        for i in 0..num {
            let (s, c) = (angle0 + i as f32 * step).sin_cos();
            let r = if self.alt_step_factor > 0.0 && i % 2 == 1 { odd_radius } else { 1.0 };
            let mut u = Vec3::new(r * s, r * c, 0.0);

            if self.flat_side_amt > 0.0 {
                let proj = u.dot(flat_dir);
                if proj > flat_limit {
                    u -= flat_dir * (proj - flat_limit);
                }
            }
            out.push(Vec3::new(cc.x + rx * u.x, cc.y + ry * u.y, 0.0));
        }
    }

    /// XY containment of `pt` in the outline of `part`.
    ///
    /// `scratch` is reused for the outline points.
    #[must_use]
    pub fn part_contains_pt_xy(&self, part: &Cube, pt: Vec3, scratch: &mut Vec<Vec3>) -> bool {
        if !part.contains_pt_xy(pt) {
            return false;
        }
        if self.is_cube() {
            return true;
        }
        self.poly_points(part, 0.0, scratch);
        point_in_polygon_xy(pt.x, pt.y, scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornice_shared::polygon_normal;

    fn part() -> Cube {
        Cube::from_ranges([0.0, 10.0], [0.0, 6.0], [0.0, 3.0])
    }

    #[test]
    fn test_cuboid_outline_is_box() {
        let mut pts = Vec::new();
        FootprintShape::new(Shape::Cuboid).poly_points(&part(), 1.0, &mut pts);
        assert_eq!(pts.len(), 4);
        assert!(pts.contains(&Vec3::new(-1.0, -1.0, 0.0)));
        assert!(pts.contains(&Vec3::new(11.0, 7.0, 0.0)));
    }

    #[test]
    fn test_outlines_are_clockwise_and_inside_part() {
        let mut pts = Vec::new();
        for shape in [Shape::Cuboid, Shape::Cylinder, Shape::Polygon(3), Shape::Polygon(5)] {
            FootprintShape::new(shape).poly_points(&part(), 0.0, &mut pts);
            assert_eq!(pts.len() as u32, shape.num_sides());
            assert!(polygon_normal(&pts).z < 0.0, "{shape:?} outline must wind clockwise");
            for p in &pts {
                assert!(part().expanded(1e-4).contains_pt_xy(*p), "{shape:?} point {p:?} escapes the part");
            }
        }
    }

    #[test]
    fn test_alt_step_keeps_convexity() {
        let mut fp = FootprintShape::new(Shape::Polygon(8));
        fp.alt_step_factor = 0.99;
        fp.half_offset = true;
        let mut pts = Vec::new();
        fp.poly_points(&Cube::from_ranges([-1.0, 1.0], [-1.0, 1.0], [0.0, 1.0]), 0.0, &mut pts);

        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            let c = pts[(i + 2) % pts.len()];
            let turn = (b - a).cross(c - b).z;
            assert!(turn <= 1e-5, "reflex vertex at {i}: turn {turn}");
        }
    }

    #[test]
    fn test_flat_side_clips_outline() {
        let mut fp = FootprintShape::new(Shape::Polygon(12));
        fp.flat_side_amt = 0.3;
        let unit = Cube::from_ranges([-1.0, 1.0], [-1.0, 1.0], [0.0, 1.0]);
        let mut pts = Vec::new();
        fp.poly_points(&unit, 0.0, &mut pts);
        // First vertex points along +Y at start angle 0 and is clamped to 0.7
        assert!(pts.iter().all(|p| p.y <= 0.7 + 1e-5));
        assert!(fp.part_contains_pt_xy(&unit, Vec3::new(0.0, 0.6, 0.0), &mut pts));
        assert!(!fp.part_contains_pt_xy(&unit, Vec3::new(0.0, 0.8, 0.0), &mut pts));
    }

    #[test]
    fn test_cylinder_collision_mode() {
        assert!(FootprintShape::new(Shape::Cylinder).uses_cylinder_collision());
        let mut fp = FootprintShape::new(Shape::Cylinder);
        fp.flat_side_amt = 0.1;
        assert!(!fp.uses_cylinder_collision());
        assert!(!FootprintShape::new(Shape::Polygon(12)).uses_cylinder_collision());
    }
}
