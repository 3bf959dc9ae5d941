//! # House Synthesis
//!
//! Houses are cuboids in one of three layouts: a single box, an L-shape or
//! two wings side by side. L-shapes may carry a porch (roof slab on a
//! support post) or a shed in the corner of the L. Every wing gets a
//! peaked roof with one shared peak fraction, and two thirds of houses get
//! a chimney at a gable end.

use cornice_shared::{Axis, Cube, SurfaceKind, TaggedQuad, Vec3};

use crate::building::Building;
use crate::doors::{add_door, place_door, DoorSpot};
use crate::interior::{gen_interior, RoomFurnisher};
use crate::massing::adjust_part_zvals_for_floor_spacing;
use crate::material::BuildingMaterial;
use crate::roof::gen_peaked_roof;
use crate::seed::BuildingRng;

/// Random offset of a house door from the side center.
const HOUSE_DOOR_CENTER_SHIFT: f32 = 0.25;
/// House door width as a fraction of its height.
const HOUSE_DOOR_WIDTH_SCALE: f32 = 0.5;

/// House floorplan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HouseLayout {
    Single,
    LShape,
    TwoPart,
}

/// Extra structure in the corner of an L-shaped house.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HouseDetail {
    None,
    Porch,
    Shed,
}

/// Axis along the longer horizontal side (Y wins only when strictly longer).
#[inline]
fn largest_xy_dim(c: &Cube) -> Axis {
    if c.dy() > c.dx() {
        Axis::Y
    } else {
        Axis::X
    }
}

#[inline]
fn sign(neg: bool) -> f32 {
    if neg {
        -1.0
    } else {
        1.0
    }
}

/// Generates the parts, interior, door, roofs and chimney of a house.
pub(crate) fn gen_house(
    b: &mut Building,
    base: &Cube,
    mat: &BuildingMaterial,
    furnisher: Option<&dyn RoomFurnisher>,
    rng: &mut BuildingRng,
) {
    assert!(b.parts.is_empty(), "house generation starts from an empty part list");
    let layout = match rng.rand_below(3) {
        0 => HouseLayout::Single,
        1 => HouseLayout::LShape,
        _ => HouseLayout::TwoPart,
    };
    let two_parts = layout != HouseLayout::Single;
    let mut force_dim: [Option<Axis>; 2] = [None, None];
    let mut skip_last_roof = false;
    b.parts.push(*base);

    let gen_door = mat.add_windows;
    let mut door_height = mat.door_height();
    let mut door_spot = DoorSpot::Auto { center_shift: HOUSE_DOOR_CENTER_SHIFT };
    let door_dim = Axis::from_bool(rng.rand_bool());
    let mut door_dir = false;
    let mut door_part = 0;

    if two_parts {
        b.parts.push(*base);
        let dir = rng.rand_bool();
        let split = rng.rand_uniform(0.4, 0.6) * sign(dir);
        let mut shrink = [0.0f32; 2];

        let (dim, dir2, delta_height) = if layout == HouseLayout::LShape {
            let dir2 = rng.rand_bool();
            let dim = Axis::from_bool(rng.rand_bool());
            shrink[usize::from(dir2)] = rng.rand_uniform(0.4, 0.6) * sign(dir2);
            (dim, dir2, rng.rand_uniform(-0.1, 0.5).max(0.0))
        } else {
            let delta_height = rng.rand_uniform(0.1, 0.5);
            for (d, s) in shrink.iter_mut().enumerate() {
                if rng.rand_bool() {
                    *s = rng.rand_uniform(0.2, 0.35) * sign(d == 1);
                }
            }
            (largest_xy_dim(base), false, delta_height)
        };
        let odim = dim.other();
        let sz = base.size();
        let split_pos = b.parts[0].bound(dim, dir) + split * sz.get(dim);
        b.parts[0].set_bound(dim, dir, split_pos);
        b.parts[1].set_bound(dim, !dir, split_pos);
        let pre_shrunk = b.parts[1];

        for (d, s) in shrink.iter().enumerate() {
            let hi = d == 1;
            let v = b.parts[1].bound(odim, hi) + s * sz.get(odim);
            b.parts[1].set_bound(odim, hi, v);
        }
        let wing_dz = b.parts[1].dz();
        b.parts[1].max.z -= delta_height * wing_dz;
        adjust_part_zvals_for_floor_spacing(&mut b.parts[1], mat);

        if layout == HouseLayout::LShape && rng.rand_bool() {
            force_dim = [Some(odim), Some(dim)];
        } else if layout == HouseLayout::TwoPart {
            force_dim = [Some(dim), Some(dim)];
        }
        let detail = if layout == HouseLayout::LShape {
            match rng.rand_below(3) {
                0 => HouseDetail::None,
                1 => HouseDetail::Porch,
                _ => HouseDetail::Shed,
            }
        } else {
            HouseDetail::None
        };
        // Door goes on the porch or shed side; otherwise away from the second wing
        door_dir = if door_dim == dim { dir } else { dir2 };
        if door_dim == dim && detail == HouseDetail::None {
            door_dir = !door_dir;
        }

        if detail != HouseDetail::None {
            let wing = b.parts[1];
            let mut c = pre_shrunk;
            c.set_bound(odim, !dir2, wing.bound(odim, dir2));
            let dist1 = (c.bound(odim, !dir2) - base.bound(odim, dir2)) * rng.rand_uniform(0.4, 0.6);
            let dist2 = (c.bound(dim, !dir) - base.bound(dim, dir)) * rng.rand_uniform(0.4, 0.6);
            let height = rng.rand_uniform(0.55, 0.7) * wing.dz();

            if gen_door {
                // Centered under the porch roof, or where it would be
                let ddim = door_dim.other();
                let shift = if door_dim == dim { dist1 } else { dist2 };
                door_spot = DoorSpot::At {
                    center: 0.5 * (c.lo(ddim) + c.hi(ddim) + shift),
                    pos: c.bound(door_dim, !door_dir),
                };
                door_part = if door_dim == dim { 0 } else { 1 };
                door_height = door_height.min(0.95 * height);
            }
            if detail == HouseDetail::Porch {
                let width = 0.05 * (dist1.abs() + dist2.abs());
                c.set_bound(odim, dir2, c.bound(odim, dir2) + dist1);
                c.set_bound(dim, dir, c.bound(dim, dir) + dist2);
                // Not quite flush with the house
                c.set_bound(odim, !dir2, c.bound(odim, !dir2) - 0.001 * dist1);
                c.set_bound(dim, !dir, c.bound(dim, !dir) - 0.001 * dist2);
                c.min.z += height;
                c.max.z = c.min.z + 0.05 * wing.dz();
                b.parts.push(c);

                // Support post under the outer corner of the porch roof
                c.max.z = c.min.z;
                c.min.z = pre_shrunk.z1();
                c.set_bound(odim, !dir2, c.bound(odim, dir2) + sign(dir2) * width);
                c.set_bound(dim, !dir, c.bound(dim, dir) + sign(dir) * width);
                c.normalize();
                skip_last_roof = true;
            } else {
                // Shed pushed into the free corner of the L
                c.set_bound(odim, dir2, base.bound(odim, dir2));
                c.set_bound(dim, dir, base.bound(dim, dir));
                c.set_bound(odim, !dir2, c.bound(odim, !dir2) - dist1);
                c.set_bound(dim, !dir, c.bound(dim, !dir) - dist2);
                c.normalize();
                c.max.z = c.min.z + c.dx().min(c.dy()).min(height);
            }
            b.parts.push(c);
        }
        b.calc_bcube_from_parts();
    } else if gen_door {
        door_dir = rng.rand_bool();
    }
    gen_interior(b, mat, furnisher, rng);

    if gen_door {
        let part = b.parts[door_part];
        let door = place_door(b, &part, door_dim, door_dir, door_height, door_spot, HOUSE_DOOR_WIDTH_SCALE, rng);
        add_door(b, &door, door_part, door_dim, door_dir, false);
    }
    let peak_height = rng.rand_uniform(0.15, 0.5);
    let mut roof_dz = [0.0f32; 3];
    let num_roofs = b.parts.len() - usize::from(skip_last_roof);

    for ix in 0..num_roofs {
        let top = b.parts[ix];
        let fdim = force_dim.get(ix).copied().flatten();
        let dim = fdim.unwrap_or_else(|| largest_xy_dim(&top));
        roof_dz[ix] = gen_peaked_roof(b, &top, peak_height, dim);
    }
    if rng.rand_below(3) != 0 {
        add_chimney(b, two_parts, &force_dim, &roof_dz, rng);
    }
    b.add_roof_to_bcube();
    b.detail_tint = Some(rng.rand_uniform(0.4, 0.8));
}

/// Adds a chimney at a gable end of the larger wing, capped with a quad.
fn add_chimney(
    b: &mut Building,
    two_parts: bool,
    force_dim: &[Option<Axis>; 2],
    roof_dz: &[f32; 3],
    rng: &mut BuildingRng,
) {
    let mut part_ix = 0;
    if two_parts {
        let (v0, v1) = (b.parts[0].volume(), b.parts[1].volume());
        part_ix = if v0 > 2.0 * v1 {
            0
        } else if v1 > 2.0 * v0 {
            1
        } else {
            usize::from(rng.rand_bool())
        };
    }
    let part = b.parts[part_ix];
    let dim = force_dim[part_ix].unwrap_or_else(|| largest_xy_dim(&part));
    let odim = dim.other();
    let mut dir = rng.rand_bool();
    // Keep it on the outside edge of the house
    if two_parts && part.bound(dim, dir) != b.local_bcube.bound(dim, dir) {
        dir = !dir;
    }
    let sz1 = part.len(odim);
    let sz2 = sz1;
    let mut shift = 0.0f32;
    if rng.rand_below(3) != 0 {
        shift = sz1 * rng.rand_uniform(0.1, 0.25);
        if rng.rand_bool() {
            shift = -shift;
        }
    }
    let center = 0.5 * (part.lo(odim) + part.hi(odim)) + shift;
    let mut c = part;
    let edge = c.bound(dim, dir);
    c.set_bound(dim, !dir, edge + sign(dir) * 0.03 * (sz1 + sz2));
    c.set_bound(dim, dir, edge + sign(dir) * 0.01 * sz2);
    c.set_bound(odim, false, center - 0.05 * sz1);
    c.set_bound(odim, true, center + 0.05 * sz1);
    c.min.z = c.z2();
    let rise = rng.rand_uniform(1.25, 1.5) * roof_dz[part_ix] - 0.4 * shift.abs();
    c.max.z += rise.max(0.25 * roof_dz[part_ix]);
    b.parts.push(c);

    let z = c.z2();
    b.roof_tquads.push(TaggedQuad::quad(
        SurfaceKind::ChimneyCap,
        [
            Vec3::new(c.min.x, c.min.y, z),
            Vec3::new(c.max.x, c.min.y, z),
            Vec3::new(c.max.x, c.max.y, z),
            Vec3::new(c.min.x, c.max.y, z),
        ],
    ));
    b.has_chimney = true;
}
