//! # Footprint & Massing
//!
//! Chooses the cross-section, rotation and level count of a building and
//! produces its parts.
//!
//! ## Footprint letters
//!
//! A seed box can be split into 2 or 3 parts shaped like one of the
//! letters L, T, U, H or +. The letter is picked by one of nine shape
//! codes: four orientations of L, two of T, and one each of U, H and +.
//!
//! ## Levels
//!
//! Multi-level buildings use one of two policies: overlapping levels that
//! all start at the ground with random insets, or a stack where each level
//! sits on the previous one and is shifted inward from it.

use std::f32::consts::TAU;

use cornice_shared::{Axis, Cube, Rotation, Vec3};

use crate::building::Building;
use crate::material::BuildingMaterial;
use crate::seed::BuildingRng;
use crate::shape::{FootprintShape, Shape};

/// Maximum containment attempts per overlapping level.
const LEVEL_PLACEMENT_ATTEMPTS: u32 = 10;

// ============================================================================
// FOOTPRINT SPLIT
// ============================================================================

/// Letter shape of a split footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitShape {
    /// L shape; orientation 0..4 picks which corner is cut away
    L(u8),
    /// T shape; orientation 0..2
    T(u8),
    /// U shape
    U,
    /// H shape
    H,
    /// Plus shape
    Plus,
}

impl SplitShape {
    /// All nine shape codes in order.
    pub const ALL: [Self; 9] = [
        Self::L(0),
        Self::L(1),
        Self::L(2),
        Self::L(3),
        Self::T(0),
        Self::T(1),
        Self::U,
        Self::H,
        Self::Plus,
    ];

    /// Shape for a code in `0..9`.
    ///
    /// # Panics
    ///
    /// Panics for codes of 9 or more.
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        assert!(code < 9, "split shape code {code} out of range");
        Self::ALL[code as usize]
    }

    /// Code in `0..9`.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::L(o) => o as u32,
            Self::T(o) => 4 + o as u32,
            Self::U => 6,
            Self::H => 7,
            Self::Plus => 8,
        }
    }

    /// Number of parts the split produces.
    #[must_use]
    pub const fn num_parts(self) -> usize {
        match self {
            Self::L(_) | Self::T(_) => 2,
            Self::U | Self::H | Self::Plus => 3,
        }
    }

    /// H and + are symmetric about the split axis.
    #[must_use]
    pub const fn is_symmetric(self) -> bool {
        matches!(self, Self::H | Self::Plus)
    }
}

/// Everything a footprint split depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitParams {
    /// Letter shape
    pub shape: SplitShape,
    /// Axis of the main division
    pub dim: Axis,
    /// Side of the main division the full-width part sits on
    pub dir: bool,
    /// Main division as a fraction along `dim`
    pub div: f32,
    /// First secondary division as a fraction along the other axis
    pub s1: f32,
    /// Second secondary division as a fraction along the other axis
    pub s2: f32,
}

impl SplitParams {
    /// Draws split parameters.
    pub fn random(rng: &mut BuildingRng) -> Self {
        let shape = SplitShape::from_code(rng.rand_below(9));
        let symmetric = shape.is_symmetric();
        let dim = Axis::from_bool(rng.rand_bool());
        let dir = symmetric || rng.rand_bool();
        let div = if symmetric {
            rng.rand_uniform(0.2, 0.4)
        } else {
            rng.rand_uniform(0.3, 0.7)
        };
        let s1 = rng.rand_uniform(0.2, 0.4);
        let s2 = rng.rand_uniform(0.6, 0.8);
        Self { shape, dim, dir, div, s1, s2 }
    }
}

/// Splits `seed` into 2 or 3 parts forming the requested letter.
///
/// The union of the parts spans exactly the seed box; parts only touch
/// along the division lines.
#[must_use]
pub fn split_footprint(seed: &Cube, params: &SplitParams) -> Vec<Cube> {
    let SplitParams { shape, dim, dir, div, s1, s2 } = *params;
    let odim = dim.other();
    let dpos = seed.lo(dim) + div * seed.len(dim);
    let dpos2 = seed.lo(dim) + (1.0 - div) * seed.len(dim);
    let spos1 = seed.lo(odim) + s1 * seed.len(odim);
    let spos2 = seed.lo(odim) + s2 * seed.len(odim);

    let mut parts = vec![*seed; shape.num_parts()];
    // Full-width part (except +) and partial-width part (except +)
    parts[0].set_bound(dim, dir, dpos);
    parts[1].set_bound(dim, !dir, dpos);

    match shape {
        SplitShape::L(o) => {
            let v = if o & 1 == 1 { spos2 } else { spos1 };
            parts[1].set_bound(odim, (o >> 1) == 1, v);
        }
        SplitShape::T(_) => {
            parts[1].set_bound(odim, false, spos1);
            parts[1].set_bound(odim, true, spos2);
        }
        SplitShape::U => {
            parts[2].set_bound(dim, !dir, dpos);
            parts[1].set_bound(odim, true, spos1);
            parts[2].set_bound(odim, false, spos2);
        }
        SplitShape::H => {
            parts[1].set_bound(dim, dir, dpos2);
            parts[1].set_bound(odim, false, spos1);
            parts[1].set_bound(odim, true, spos2);
            parts[2].set_bound(dim, !dir, dpos2);
        }
        SplitShape::Plus => {
            for ix in [0, 2] {
                parts[ix].set_bound(odim, false, spos1);
                parts[ix].set_bound(odim, true, spos2);
            }
            parts[1].set_bound(dim, dir, dpos2);
            parts[2].set_bound(dim, !dir, dpos2);
        }
    }
    parts
}

/// Splits `seed` with random parameters and appends the parts.
pub(crate) fn split_in_xy(b: &mut Building, seed: &Cube, rng: &mut BuildingRng) {
    let params = SplitParams::random(rng);
    b.parts.extend(split_footprint(seed, &params));
}

// ============================================================================
// ROTATION & FLOOR SNAPPING
// ============================================================================

/// Draws a rotation and grows the world box to the rotated footprint.
pub(crate) fn gen_rotation(b: &mut Building, mat: &BuildingMaterial, rng: &mut BuildingRng) {
    if mat.max_rot_angle == 0.0 {
        return;
    }
    let angle = rng.rand_uniform(0.0, mat.max_rot_angle);
    b.rotation = Rotation::from_angle(angle);
    b.rot_center = b.base.center();

    let bc = b.base;
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 == 1 { bc.max.x } else { bc.min.x },
            if i & 2 == 2 { bc.max.y } else { bc.min.y },
            if i & 1 == 1 { bc.max.z } else { bc.min.z },
        )
    };
    let mut rotated = Cube::from_point(b.rotation.rotate_about(b.rot_center, corner(0)));
    for i in 1..4 {
        rotated.union_with_pt(b.rotation.rotate_about(b.rot_center, corner(i)));
    }
    b.bcube = rotated;
}

/// Moves the top of `c` so its height is a whole number of floors (at least one).
pub(crate) fn adjust_part_zvals_for_floor_spacing(c: &mut Cube, mat: &BuildingMaterial) {
    if !mat.exact_floor_multiple {
        return;
    }
    let spacing = mat.floor_spacing;
    let dz = c.dz();
    assert!(dz > 0.0 && spacing > 0.0, "cannot snap a part of height {dz}");
    let num_floors = dz / spacing;
    let target = num_floors.round().max(1.0);
    c.max.z += spacing * (target - num_floors);
}

// ============================================================================
// SHAPE & LEVELS
// ============================================================================

/// Picks the cross-section. Returns `true` if the building was a cuboid
/// before any chamfer doubled its side count.
pub(crate) fn choose_shape(b: &mut Building, mat: &BuildingMaterial, rng: &mut BuildingRng) -> bool {
    let mut num_sides = if rng.rand_probability(mat.round_prob) {
        0
    } else if rng.rand_probability(mat.cube_prob) {
        4
    } else {
        mat.min_sides + rng.rand_below(1 + mat.max_sides.abs_diff(mat.min_sides))
    };
    let mut fp = FootprintShape::new(match num_sides {
        0 => Shape::Cylinder,
        4 => Shape::Cuboid,
        n => Shape::Polygon(n),
    });
    if num_sides == 0 {
        num_sides = fp.shape.num_sides();
    }
    let was_cube = fp.is_cube();

    if num_sides >= 6 && mat.max_flat_side_amt > 0.0 {
        fp.flat_side_amt = rng
            .rand_uniform(mat.min_flat_side_amt, mat.max_flat_side_amt)
            .clamp(0.0, 0.45);
        if fp.flat_side_amt > 0.0 && !b.is_rotated() {
            fp.start_angle = rng.rand_uniform(0.0, TAU);
        }
    }
    if matches!(num_sides, 3 | 4 | 6)
        && mat.max_alt_step_factor > 0.0
        && rng.rand_probability(mat.alt_step_factor_prob)
    {
        fp.alt_step_factor = rng
            .rand_uniform(mat.min_alt_step_factor, mat.max_alt_step_factor)
            .clamp(0.0, 0.99);
        if fp.alt_step_factor > 0.0 {
            fp.half_offset = num_sides % 2 == 0;
            fp.shape = Shape::Polygon(num_sides * 2);
        }
    }
    b.footprint = fp;
    was_cube
}

/// Level count for a building of height `height`.
pub(crate) fn choose_num_levels(
    mat: &BuildingMaterial,
    height: f32,
    was_cube: bool,
    rng: &mut BuildingRng,
) -> u32 {
    let mut num_levels = mat.min_levels;

    // Only half of non-cuboid buildings get more than the minimum
    if mat.min_levels < mat.max_levels && (was_cube || rng.rand_bool()) {
        num_levels += rng.rand_below(mat.max_levels - mat.min_levels + 1);
    }
    if mat.min_level_height > 0.0 {
        let fit = (height / mat.min_level_height) as u32;
        num_levels = mat.min_levels.max(num_levels.min(fit));
    }
    num_levels.max(1)
}

/// Levels that all start at ground level with random XY insets.
pub(crate) fn gen_overlapping_levels(
    b: &mut Building,
    base: &Cube,
    num_levels: u32,
    mat: &BuildingMaterial,
    rng: &mut BuildingRng,
) {
    let dz = base.dz() / num_levels as f32;
    let sz = base.size();

    for i in 0..num_levels {
        let mut bc = *base;
        bc.max.z = base.z1() + (i + 1) as f32 * dz;
        if i > 0 {
            bc.max.z = (bc.max.z + dz * rng.rand_uniform(-0.5, 0.5)).min(base.z2());
        }
        adjust_part_zvals_for_floor_spacing(&mut bc, mat);
        let min_edge = if mat.no_city { 0.04 * i as f32 } else { 0.0 };

        for _ in 0..LEVEL_PLACEMENT_ATTEMPTS {
            for d in Axis::HORIZONTAL {
                let lo = base.lo(d) + rng.rand_uniform(-0.2, 0.45).max(min_edge) * sz.get(d);
                let hi = base.hi(d) - rng.rand_uniform(-0.2, 0.45).max(min_edge) * sz.get(d);
                bc.set_bound(d, false, lo);
                bc.set_bound(d, true, hi);
            }
            debug_assert!(bc.is_strictly_normalized());
            if !b.parts.iter().any(|p| bc.contains_cube(p)) {
                break;
            }
        }
        b.parts.push(bc);
    }
}

/// Levels stacked on each other, each shifted inward from the one below.
pub(crate) fn gen_stacked_levels(
    b: &mut Building,
    base: &Cube,
    num_levels: u32,
    was_cube: bool,
    mat: &BuildingMaterial,
    rng: &mut BuildingRng,
) {
    let dz = base.dz() / num_levels as f32;
    let shift_mult = if was_cube { 1.0 } else { 0.5 };

    for i in 0..num_levels as usize {
        let mut bc = *base;

        if i > 0 {
            let prev = b.parts[i - 1];
            bc = prev;

            for d in Axis::HORIZONTAL {
                let len = prev.len(d);
                let min_edge_len = (0.2 / shift_mult) * base.len(d);
                let inv = rng.rand_bool();

                for e in [false, true] {
                    let mut delta = 0.0;
                    if rng.rand_u32() & 3 != 0 {
                        delta = shift_mult * rng.rand_uniform(0.1, 0.4);
                    }
                    let signed = if e { -delta } else { delta };
                    bc.set_bound(d, e, prev.bound(d, e) + signed * len);
                }
                for e in [inv, !inv] {
                    // Revert if narrower than 20% of the footprint
                    if bc.len(d) < min_edge_len {
                        bc.set_bound(d, e, prev.bound(d, e));
                    }
                }
            }
            bc.min.z = prev.z2();
        }
        bc.max.z = bc.min.z + dz;
        bc.normalize();
        b.parts.push(bc);
    }
    for i in 1..num_levels as usize {
        let ddz = rng.rand_uniform(-0.35 * dz, 0.35 * dz);
        b.parts[i - 1].max.z += ddz;
        adjust_part_zvals_for_floor_spacing(&mut b.parts[i - 1], mat);
        let z = b.parts[i - 1].z2();
        let part = &mut b.parts[i];
        part.min.z = z;
        // Keep the level upright if the one below grew past its top
        part.max.z = part.max.z.max(z + 0.5 * dz);
    }
    if let Some(last) = b.parts.last_mut() {
        adjust_part_zvals_for_floor_spacing(last, mat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::BuildingSeed;

    fn seed_box() -> Cube {
        Cube::from_ranges([0.0, 10.0], [0.0, 10.0], [0.0, 8.0])
    }

    fn params(shape: SplitShape, dim: Axis, dir: bool) -> SplitParams {
        SplitParams { shape, dim, dir, div: 0.3, s1: 0.25, s2: 0.7 }
    }

    #[test]
    fn test_l_shape_scenario() {
        let parts = split_footprint(&seed_box(), &params(SplitShape::L(0), Axis::X, true));
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], Cube::from_ranges([0.0, 3.0], [0.0, 10.0], [0.0, 8.0]));
        assert_eq!(parts[1], Cube::from_ranges([3.0, 10.0], [2.5, 10.0], [0.0, 8.0]));
    }

    #[test]
    fn test_all_codes_tile_the_seed() {
        let seed = seed_box();
        for shape in SplitShape::ALL {
            for dim in Axis::HORIZONTAL {
                for dir in [false, true] {
                    if shape.is_symmetric() && !dir {
                        continue; // H and + are always drawn with dir = true
                    }
                    let parts = split_footprint(&seed, &params(shape, dim, dir));
                    assert_eq!(parts.len(), shape.num_parts());

                    let mut union = parts[0];
                    for p in &parts {
                        assert!(p.is_strictly_normalized(), "{shape:?} produced degenerate part {p:?}");
                        union.union_with_cube(p);
                    }
                    assert_eq!(union, seed, "{shape:?} dim={dim:?} dir={dir} union mismatch");

                    for i in 0..parts.len() {
                        for j in i + 1..parts.len() {
                            assert!(
                                !parts[i].intersects(&parts[j]),
                                "{shape:?} parts {i} and {j} overlap"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_shape_codes_round_trip() {
        for code in 0..9 {
            assert_eq!(SplitShape::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_adjust_zvals_rounds_to_floors() {
        let mat = BuildingMaterial::default();
        let mut c = Cube::from_ranges([0.0, 1.0], [0.0, 1.0], [0.0, 10.0]);
        adjust_part_zvals_for_floor_spacing(&mut c, &mat);
        assert!((c.dz() - 9.0).abs() < 1e-4);

        let mut c = Cube::from_ranges([0.0, 1.0], [0.0, 1.0], [2.0, 13.0]);
        adjust_part_zvals_for_floor_spacing(&mut c, &mat);
        assert!((c.dz() - 12.0).abs() < 1e-4);

        let mut c = Cube::from_ranges([0.0, 1.0], [0.0, 1.0], [0.0, 0.5]);
        adjust_part_zvals_for_floor_spacing(&mut c, &mat);
        assert!((c.dz() - 3.0).abs() < 1e-4, "at least one floor");
    }

    #[test]
    fn test_num_levels_respects_min_height() {
        let mat = BuildingMaterial {
            min_levels: 1,
            max_levels: 10,
            min_level_height: 4.0,
            ..BuildingMaterial::default()
        };
        let mut rng = BuildingRng::new(BuildingSeed::new(1, 1));
        for _ in 0..50 {
            let n = choose_num_levels(&mat, 12.0, true, &mut rng);
            assert!((1..=3).contains(&n), "{n} levels do not fit in 12 units");
        }
    }

    #[test]
    fn test_stacked_levels_are_contiguous_floor_multiples() {
        let mat = BuildingMaterial::default();
        let base = Cube::from_ranges([0.0, 30.0], [0.0, 20.0], [0.0, 10.0]);
        for s in 0..20 {
            let mut rng = BuildingRng::new(BuildingSeed::new(s, 3));
            let mut b = Building::default();
            gen_stacked_levels(&mut b, &base, 3, true, &mat, &mut rng);
            assert_eq!(b.parts.len(), 3);

            for (i, p) in b.parts.iter().enumerate() {
                assert!(p.is_strictly_normalized(), "level {i} degenerate: {p:?}");
                let floors = p.dz() / mat.floor_spacing;
                assert!((floors - floors.round()).abs() < 1e-3, "level {i} height {} not a floor multiple", p.dz());
                if i > 0 {
                    assert_eq!(p.z1(), b.parts[i - 1].z2(), "levels must stack without gaps");
                }
            }
            let total = b.parts[2].z2() - base.z1();
            let floors = total / mat.floor_spacing;
            assert!((floors - floors.round()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_rotation_grows_world_box() {
        let mat = BuildingMaterial {
            max_rot_angle: 1.0,
            ..BuildingMaterial::default()
        };
        let base = Cube::from_ranges([0.0, 10.0], [0.0, 4.0], [0.0, 6.0]);
        let mut b = Building::shell(base, crate::building::BuildingKind::Office);
        let mut rng = BuildingRng::new(BuildingSeed::new(5, 5));
        gen_rotation(&mut b, &mat, &mut rng);
        assert!(b.is_rotated());
        assert!(b.bcube.dy() >= base.dy() - 1e-4, "rotated footprint must widen along Y");
        assert_eq!(b.bcube.z1(), base.z1());
        assert_eq!(b.bcube.z2(), base.z2());
    }
}
