//! # Door Placement
//!
//! Doors are zero-thickness quads standing just outside one side of a part.
//! Houses get a single door from the house layout; office buildings get
//! doors at both hallway ends, or 1-4 doors spread over exterior sides of
//! the ground-floor parts.

use cornice_shared::{Axis, Cube, SurfaceKind, TaggedQuad, Vec3};

use crate::building::{Building, Door};
use crate::material::BuildingMaterial;
use crate::seed::BuildingRng;

/// Office doors are taller than house doors.
const BUILDING_DOOR_HEIGHT_SCALE: f32 = 1.1;
/// Office door width as a fraction of its height.
const BUILDING_DOOR_WIDTH_SCALE: f32 = 0.7;
/// Random offset of office doors from the side center.
const BUILDING_DOOR_CENTER_SHIFT: f32 = 0.1;
/// Only the first four parts track door sides.
const MAX_DOOR_PARTS: usize = 4;

/// Where a door goes along its side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum DoorSpot {
    /// Choose a spot on the chosen side, near its center
    Auto {
        /// Maximum random offset from the center, as a fraction of the side
        center_shift: f32,
    },
    /// Explicit center along the other axis and face position along the door axis
    At {
        /// Door center along the other horizontal axis
        center: f32,
        /// Face coordinate along the door axis
        pos: f32,
    },
}

/// Computes the door box on side `(dim, dir)` of `part`.
///
/// The returned box has zero size along `dim` and sits slightly outside the
/// face.
#[allow(clippy::too_many_arguments)]
pub(crate) fn place_door(
    b: &Building,
    part: &Cube,
    dim: Axis,
    dir: bool,
    door_height: f32,
    spot: DoorSpot,
    width_scale: f32,
    rng: &mut BuildingRng,
) -> Cube {
    let odim = dim.other();
    let (center, pos) = match spot {
        DoorSpot::At { center, pos } => (center, pos),
        DoorSpot::Auto { center_shift } => {
            // Doors on the main hallway axis line up with the hallway
            let centered = center_shift == 0.0 || b.hallway_dim == Some(dim);
            let offset = if centered {
                0.5
            } else {
                rng.rand_uniform(0.5 - center_shift, 0.5 + center_shift)
            };
            let center = offset * part.lo(odim) + (1.0 - offset) * part.hi(odim);
            (center, part.bound(dim, dir))
        }
    };
    let half_width = 0.5 * width_scale * door_height;
    let shift = if b.is_house() { 0.005 } else { 0.001 } * part.dz();
    let face = pos + if dir { shift } else { -shift };

    let mut door = Cube::default();
    door.min.z = part.z1();
    door.max.z = part.z1() + door_height;
    door.set_bound(dim, false, face);
    door.set_bound(dim, true, face);
    door.set_bound(odim, false, center - half_width);
    door.set_bound(odim, true, center + half_width);
    door
}

/// Turns a door box into a door quad facing out of side `(dim, dir)`.
///
/// # Panics
///
/// Panics if `c` is not flat along `dim` or has no width or height.
pub(crate) fn add_door(b: &mut Building, c: &Cube, part: usize, dim: Axis, dir: bool, for_building: bool) {
    let odim = dim.other();
    assert!(
        c.len(dim) == 0.0 && c.len(odim) > 0.0 && c.dz() > 0.0,
        "door box must be a vertical rectangle"
    );
    let kind = if for_building { SurfaceKind::BuildingDoor } else { SurfaceKind::HouseDoor };
    // Pulled slightly off the wall
    let face = c.lo(dim) + 0.01 * c.len(odim) * if dir { 1.0 } else { -1.0 };

    let corner = |side: bool, z: f32| {
        let mut p = Vec3::new(0.0, 0.0, z);
        p.set(odim, c.bound(odim, side));
        p.set(dim, face);
        p
    };
    let mut pts = [
        corner(dir, c.z1()),
        corner(!dir, c.z1()),
        corner(!dir, c.z2()),
        corner(dir, c.z2()),
    ];
    if dim == Axis::X {
        // Keep the normal facing out of the part
        pts.swap(0, 1);
        pts.swap(2, 3);
    }
    b.doors.push(Door { quad: TaggedQuad::quad(kind, pts), part, axis: dim, dir });

    if part < MAX_DOOR_PARTS {
        b.door_sides[part] |= 1 << (2 * dim.index() + usize::from(dir));
    }
}

/// Adds office doors to cuboid buildings.
pub(crate) fn gen_building_doors_if_needed(b: &mut Building, mat: &BuildingMaterial, rng: &mut BuildingRng) {
    if !b.is_cube() {
        return;
    }
    assert!(!b.parts.is_empty(), "doors need at least one part");
    let door_height = BUILDING_DOOR_HEIGHT_SCALE * mat.door_height();
    let wscale = BUILDING_DOOR_WIDTH_SCALE;

    if let Some(hdim) = b.hallway_dim {
        let first = b.parts[0];
        for dir in [false, true] {
            let spot = DoorSpot::Auto { center_shift: 0.0 };
            let door = place_door(b, &first, hdim, dir, door_height, spot, wscale, rng);
            add_door(b, &door, 0, hdim, dir, true);
        }
        return;
    }
    let pref_dim = rng.rand_bool();
    let pref_dir = rng.rand_bool();
    let has_windows = mat.add_windows;
    let num_doors = 1 + rng.rand_below(if has_windows { 3 } else { 4 });
    let mut used = [false; 4];
    let bc = b.local_bcube;

    for _ in 0..num_doors {
        let mut placed = false;

        for part_ix in 0..b.parts.len() {
            if placed || (has_windows && part_ix >= MAX_DOOR_PARTS) {
                break;
            }
            let part = b.parts[part_ix];
            if part.z1() > bc.z1() {
                break;
            }
            for n in 0..4u8 {
                let dim = Axis::from_bool(pref_dim ^ (n >> 1 == 1));
                let dir = pref_dir ^ (n & 1 == 1);
                let side = 2 * dim.index() + usize::from(dir);
                // Exterior sides only, so nothing blocks the door
                if part.bound(dim, dir) != bc.bound(dim, dir) || used[side] {
                    continue;
                }
                used[side] = true;
                let spot = DoorSpot::Auto { center_shift: BUILDING_DOOR_CENTER_SHIFT };
                let door = place_door(b, &part, dim, dir, door_height, spot, wscale, rng);
                add_door(b, &door, part_ix, dim, dir, true);
                placed = true;
                break;
            }
        }
        if !placed {
            tracing::trace!("No free exterior side for door {} of {}", b.doors.len() + 1, num_doors);
        }
    }
}
