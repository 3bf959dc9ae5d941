//! # Interior Partitioner
//!
//! Builds walls, floor and ceiling slabs and room volumes for every
//! cuboid part. The layout of a part is shared by all of its floors, so
//! walls span the full part height minus the slab thickness.
//!
//! ## Layouts
//!
//! - **Hallway**: tall office slices get a central hallway along their long
//!   axis, flanked by two rows of rooms sized to the window grid.
//! - **Partition**: everything else is cut by a work stack of regions.
//!   Each split places one wall with one doorway, adds T-junction stubs
//!   where the wall meets an adjacent part, and pushes both halves back
//!   while they are still long enough to split again.
//!
//! A post-pass cuts extra doorways into long partition walls so the plan
//! has fewer dead ends.

use std::ops::Range;

use cornice_shared::{Axis, Cube};

use crate::building::{Building, Interior};
use crate::material::BuildingMaterial;
use crate::seed::BuildingRng;

/// Attempts to find a wall position clear of windows and doorways.
const WALL_POS_ATTEMPTS: u32 = 20;
/// Extra doorways cut into one long wall by the post-pass.
const MAX_EXTRA_DOORWAYS: u32 = 4;
/// Attempts per extra doorway.
const EXTRA_DOORWAY_ATTEMPTS: u32 = 4;
/// Aspect ratio above which the long side of a region is always split.
const SPLIT_ASPECT: f32 = 1.25;

/// Places objects inside generated rooms.
///
/// The default generator has no furnisher and leaves every room empty.
pub trait RoomFurnisher: Send + Sync {
    /// Appends furniture boxes for `room` to `out`.
    ///
    /// `room` spans every floor of its part; floors are `floor_spacing`
    /// apart starting at `room.min.z`.
    fn furnish(&self, room: &Cube, floor_spacing: f32, rng: &mut BuildingRng, out: &mut Vec<Cube>);
}

// ============================================================================
// DIMENSIONS
// ============================================================================

/// Wall, slab and doorway sizes derived from the floor spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteriorDims {
    /// Distance between floors
    pub floor_spacing: f32,
    /// Floor plus ceiling slab thickness
    pub floor_thick: f32,
    /// Thickness of one floor or ceiling slab
    pub fc_thick: f32,
    /// Doorway width
    pub doorway_width: f32,
    /// Wall thickness
    pub wall_thick: f32,
    /// Gap between interior walls and exterior walls
    pub wall_edge_spacing: f32,
    /// Shortest region side that can take a wall
    pub min_wall_len: f32,
    /// Fraction of each window bay on either side of the window
    pub window_border: f32,
}

impl InteriorDims {
    /// Sizes for the given material.
    #[must_use]
    pub fn new(mat: &BuildingMaterial) -> Self {
        let floor_spacing = mat.floor_spacing;
        let floor_thick = 0.1 * floor_spacing;
        let doorway_width = 0.5 * floor_spacing;
        let wall_thick = 0.5 * floor_thick;
        Self {
            floor_spacing,
            floor_thick,
            fc_thick: 0.5 * floor_thick,
            doorway_width,
            wall_thick,
            wall_edge_spacing: 0.05 * wall_thick,
            min_wall_len: 4.0 * doorway_width,
            window_border: mat.window_border(),
        }
    }

    #[inline]
    fn doorway_half_width(&self) -> f32 {
        0.5 * self.doorway_width
    }

    #[inline]
    fn wall_half_thick(&self) -> f32 {
        0.5 * self.wall_thick
    }

    /// Number of floors that fit in a part, rounded to the nearest whole floor.
    #[must_use]
    pub fn num_floors(&self, part: &Cube) -> u32 {
        let span = part.dz() - self.floor_thick;
        if span <= 0.0 {
            return 0;
        }
        (span / self.floor_spacing).round() as u32
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Cuts `[v1, v2]` out of `c` along `axis`.
///
/// `c` keeps the low side and the high side is returned.
///
/// # Panics
///
/// Panics unless `v1 < v2` both lie strictly inside `c`.
pub fn remove_section(c: &mut Cube, v1: f32, v2: f32, axis: Axis) -> Cube {
    assert!(
        v1 > c.lo(axis) && v1 < v2 && v2 < c.hi(axis),
        "doorway [{v1}, {v2}] must lie inside [{}, {}]",
        c.lo(axis),
        c.hi(axis)
    );
    let mut hi = *c;
    c.set_bound(axis, true, v1);
    hi.set_bound(axis, false, v2);
    hi
}

/// Random position along `axis` at least `max(min_abs, min_frac * len)` from both ends.
fn cube_rand_side_pos(c: &Cube, axis: Axis, min_frac: f32, min_abs: f32, rng: &mut BuildingRng) -> f32 {
    debug_assert!(min_frac < 0.5);
    let (lo, hi) = (c.lo(axis), c.hi(axis));
    let gap = min_abs.max(min_frac * (hi - lo));
    rng.rand_uniform(lo + gap, hi - gap)
}

/// Shrinks a region copy to a wall at `pos`, thin along `axis`.
fn create_wall(region: &Cube, axis: Axis, pos: f32, dims: &InteriorDims) -> Cube {
    let mut wall = *region;
    wall.min.z += dims.fc_thick;
    wall.max.z -= dims.fc_thick;
    wall.set_bound(axis, false, pos - dims.wall_half_thick());
    wall.set_bound(axis, true, pos + dims.wall_half_thick());
    let other = axis.other();
    wall.set_bound(other, false, wall.lo(other) + dims.wall_edge_spacing);
    wall.set_bound(other, true, wall.hi(other) - dims.wall_edge_spacing);
    wall
}

/// True when `val` falls inside a window of a facade starting at `part.lo(axis)`.
fn is_val_inside_window(part: &Cube, axis: Axis, val: f32, window_spacing: f32, border: f32) -> bool {
    let uv = ((val - part.lo(axis)) / window_spacing).fract();
    uv > border && uv < 1.0 - border
}

/// A region waiting to be split, with doorway spans its walls must avoid.
#[derive(Clone, Copy, Debug)]
struct SplitRegion {
    cube: Cube,
    /// Doorway span per `[axis][side]`, in coordinates along `axis`
    doors: [[Option<(f32, f32)>; 2]; 2],
}

impl SplitRegion {
    fn new(cube: Cube) -> Self {
        Self { cube, doors: [[None; 2]; 2] }
    }

    fn bad_pos(&self, val: f32, axis: Axis) -> bool {
        self.doors[axis.index()]
            .iter()
            .flatten()
            .any(|&(lo, hi)| val > lo && val < hi)
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Generates the interior of a cuboid building.
///
/// Leaves `b.interior` empty for non-cuboid buildings and for materials
/// without windows or interiors.
pub(crate) fn gen_interior(
    b: &mut Building,
    mat: &BuildingMaterial,
    furnisher: Option<&dyn RoomFurnisher>,
    rng: &mut BuildingRng,
) {
    if !mat.gen_interiors || !mat.add_windows || !b.is_cube() {
        return;
    }
    let dims = InteriorDims::new(mat);
    let mut interior = Interior::default();
    // Per part, per wall axis and side: a junction stub already covers that face
    let mut seps_placed = vec![[[false; 2]; 2]; b.parts.len()];
    let mut hallway_walls: [Vec<Range<usize>>; 2] = [Vec::new(), Vec::new()];
    let num_parts = b.parts.len() - usize::from(b.has_chimney);

    for pix in 0..num_parts {
        // Houses only partition the two wings
        if b.is_house() && pix > 1 {
            break;
        }
        let part = b.parts[pix];
        let num_floors = dims.num_floors(&part);
        if num_floors == 0 {
            continue;
        }
        let hall_dim = if part.dy() < part.dx() { Axis::Y } else { Axis::X };
        let is_top = pix + 1 == b.parts.len() || b.parts[pix + 1].z1() > part.z1();

        let mut used_hallway = false;
        if !b.is_house() && is_top && part.len(hall_dim) > 4.0 * dims.min_wall_len {
            let starts = [interior.walls[0].len(), interior.walls[1].len()];
            used_hallway = gen_hallway_layout(&part, hall_dim, mat, &dims, &mut interior);
            if used_hallway {
                b.hallway_dim = Some(hall_dim.other());
                for (axis, start) in starts.into_iter().enumerate() {
                    hallway_walls[axis].push(start..interior.walls[axis].len());
                }
            }
        }
        if !used_hallway {
            partition_part(&b.parts, pix, mat, &dims, &mut seps_placed, &mut interior, rng);
        }
        add_floors_and_ceilings(&part, num_floors, &dims, &mut interior);
    }
    add_extra_doorways(&mut interior, &hallway_walls, &dims, rng);

    if let Some(f) = furnisher {
        let mut furniture = Vec::new();
        for room in &interior.rooms {
            f.furnish(room, dims.floor_spacing, rng, &mut furniture);
        }
        interior.furniture = furniture;
    }
    b.interior = Some(Box::new(interior));
}

/// Central hallway along the long axis with a row of rooms on each side.
///
/// `min_dim` is the short axis of the part. Returns `false` without touching
/// `interior` when the window grid leaves no room for the layout.
fn gen_hallway_layout(
    part: &Cube,
    min_dim: Axis,
    mat: &BuildingMaterial,
    dims: &InteriorDims,
    interior: &mut Interior,
) -> bool {
    let long_dim = min_dim.other();
    let num_windows = mat.windows_on_side(part.lo(long_dim), part.hi(long_dim));
    let num_windows_od = mat.windows_on_side(part.lo(min_dim), part.hi(min_dim));
    let windows_per_room = if num_windows > 5 { 2 } else { 1 };
    let num_rooms = num_windows.div_ceil(windows_per_room);
    let partial_room = num_windows % windows_per_room != 0;

    let window_hspacing = part.len(long_dim) / num_windows as f32;
    let room_len = window_hspacing * windows_per_room as f32;
    // One window wide for odd counts, two for even
    let hall_windows = if num_windows_od % 2 == 1 { 1.0 } else { 2.0 };
    let hall_width = hall_windows * part.len(min_dim) / num_windows_od as f32;
    let room_width = 0.5 * (part.len(min_dim) - hall_width);
    let hwall_extend = 0.5 * (room_len - dims.doorway_width - dims.wall_thick);

    if room_width <= dims.wall_thick || hwall_extend <= 0.0 {
        tracing::trace!(
            "Hallway layout does not fit {} x {} windows, partitioning instead",
            num_windows,
            num_windows_od
        );
        return false;
    }
    let hall_wall_pos = [part.lo(min_dim) + room_width, part.hi(min_dim) - room_width];
    let half_thick = dims.wall_half_thick();
    let mut rwall = create_wall(part, long_dim, part.lo(long_dim) + room_len, dims);
    let mut room_walls = Vec::new();
    let mut hall_walls = Vec::new();

    for i in 0..num_rooms.saturating_sub(1) {
        for (d, &hpos) in hall_wall_pos.iter().enumerate() {
            let mut wall = rwall;
            wall.set_bound(min_dim, d == 0, hpos);
            room_walls.push(wall);

            // Long hall section forming a T-junction with the room wall
            let mut hwall = wall;
            hwall.set_bound(min_dim, false, hpos - half_thick);
            hwall.set_bound(min_dim, true, hpos + half_thick);
            hwall.set_bound(long_dim, false, hwall.lo(long_dim) - hwall_extend);
            hwall.set_bound(long_dim, true, hwall.hi(long_dim) + hwall_extend);
            if partial_room && i + 2 == num_rooms {
                // Leave a doorway into the short end room
                hwall.set_bound(long_dim, true, hwall.hi(long_dim) - 1.5 * dims.doorway_width);
            }
            hall_walls.push(hwall);
        }
        rwall.set_bound(long_dim, false, rwall.lo(long_dim) + room_len);
        rwall.set_bound(long_dim, true, rwall.hi(long_dim) + room_len);
    }
    // Half-length hall walls at both ends of the hallway
    for s in [false, true] {
        let hwall_len = if partial_room && s { dims.doorway_width } else { hwall_extend };
        let sign = if s { -1.0 } else { 1.0 };
        let end = part.bound(long_dim, s) + sign * dims.wall_edge_spacing;
        let mut hwall = rwall;
        hwall.set_bound(long_dim, s, end);
        hwall.set_bound(long_dim, !s, end + sign * hwall_len);

        for hpos in hall_wall_pos {
            hwall.set_bound(min_dim, false, hpos - half_thick);
            hwall.set_bound(min_dim, true, hpos + half_thick);
            hall_walls.push(hwall);
        }
    }
    interior.walls[long_dim.index()].extend(room_walls);
    interior.walls[min_dim.index()].extend(hall_walls);

    let mut pos = part.lo(long_dim);
    for _ in 0..num_rooms {
        // The last row may be a partial room
        let next_pos = part.hi(long_dim).min(pos + room_len);
        for (d, &hpos) in hall_wall_pos.iter().enumerate() {
            let mut room = *part;
            room.set_bound(min_dim, d == 0, hpos);
            room.set_bound(long_dim, false, pos);
            room.set_bound(long_dim, true, next_pos);
            interior.rooms.push(room);
        }
        pos = next_pos;
    }
    true
}

/// Splits one part into rooms with a work stack of regions.
fn partition_part(
    parts: &[Cube],
    pix: usize,
    mat: &BuildingMaterial,
    dims: &InteriorDims,
    seps_placed: &mut [[[bool; 2]; 2]],
    interior: &mut Interior,
    rng: &mut BuildingRng,
) {
    let p = parts[pix];
    let mut window_hspacing = [0.0f32; 2];
    for axis in Axis::HORIZONTAL {
        let num_windows = mat.windows_on_side(p.lo(axis), p.hi(axis));
        window_hspacing[axis.index()] = p.len(axis) / num_windows as f32;
    }
    let split_len = mat.wall_split_thresh.max(1.0) * dims.min_wall_len;
    let mut to_split = vec![SplitRegion::new(p)];

    while let Some(mut region) = to_split.pop() {
        let c = region.cube;
        let (sx, sy) = (c.dx(), c.dy());
        let wall_dim = if sy > dims.min_wall_len && sx > SPLIT_ASPECT * sy {
            Axis::X
        } else if sx > dims.min_wall_len && sy > SPLIT_ASPECT * sx {
            Axis::Y
        } else {
            Axis::from_bool(rng.rand_bool())
        };
        if sx.min(sy) < dims.min_wall_len {
            interior.rooms.push(c);
            continue;
        }
        // Walls meeting the facade must not cut through a window
        let on_edge = c.lo(wall_dim) == p.lo(wall_dim) || c.hi(wall_dim) == p.hi(wall_dim);
        let mut wall_pos = None;

        for _ in 0..WALL_POS_ATTEMPTS {
            let pos = cube_rand_side_pos(&c, wall_dim, 0.25, dims.doorway_width + dims.wall_thick, rng);
            let spacing = window_hspacing[wall_dim.index()];
            if on_edge && is_val_inside_window(&p, wall_dim, pos, spacing, dims.window_border) {
                continue;
            }
            if region.bad_pos(pos, wall_dim) {
                continue;
            }
            wall_pos = Some(pos);
            break;
        }
        let Some(wall_pos) = wall_pos else {
            tracing::trace!("No clear wall position in {:?}, keeping it as one room", c);
            interior.rooms.push(c);
            continue;
        };
        let mut wall = create_wall(&c, wall_dim, wall_pos, dims);
        add_junction_walls(parts, pix, &mut region, wall_dim, wall_pos, dims, seps_placed, interior);

        let odim = wall_dim.other();
        let doorway_pos = cube_rand_side_pos(&c, odim, 0.25, dims.doorway_width, rng);
        let lo_pos = doorway_pos - dims.doorway_half_width();
        let hi_pos = doorway_pos + dims.doorway_half_width();
        let wall2 = remove_section(&mut wall, lo_pos, hi_pos, odim);
        interior.walls[wall_dim.index()].push(wall);
        interior.walls[wall_dim.index()].push(wall2);

        if c.len(wall_dim) > split_len {
            for d in [false, true] {
                let mut sub = region;
                sub.cube.set_bound(wall_dim, d, wall.bound(wall_dim, !d));
                sub.doors[odim.index()][usize::from(d)] =
                    Some((lo_pos - dims.wall_half_thick(), hi_pos + dims.wall_half_thick()));
                to_split.push(sub);
            }
        } else {
            interior.rooms.push(c);
        }
    }
}

/// Adds T-junction stubs where a new wall at `wall_pos` meets another part.
#[allow(clippy::too_many_arguments)]
fn add_junction_walls(
    parts: &[Cube],
    pix: usize,
    region: &mut SplitRegion,
    wall_dim: Axis,
    wall_pos: f32,
    dims: &InteriorDims,
    seps_placed: &mut [[[bool; 2]; 2]],
    interior: &mut Interior,
) {
    let c = region.cube;
    let odim = wall_dim.other();
    let wd = wall_dim.index();

    for (p2ix, p2) in parts.iter().enumerate() {
        if p2ix == pix {
            continue;
        }
        for dir in [false, true] {
            let val = c.bound(odim, dir);
            if p2.bound(odim, !dir) != val {
                continue;
            }
            if p2.z1() >= c.z2() || p2.z2() <= c.z1() {
                continue;
            }
            if p2.lo(wall_dim) >= wall_pos || p2.hi(wall_dim) <= wall_pos {
                continue;
            }
            if seps_placed[p2ix][wd][usize::from(!dir)] {
                continue;
            }
            let mut wall3 = Cube::default();
            wall3.min.z = c.z1().max(p2.z1()) + dims.fc_thick;
            wall3.max.z = c.z2().min(p2.z2()) - dims.fc_thick;
            if wall3.max.z <= wall3.min.z {
                continue;
            }
            wall3.set_bound(wall_dim, false, c.lo(wall_dim).max(p2.lo(wall_dim)) + dims.wall_edge_spacing);
            wall3.set_bound(wall_dim, true, c.hi(wall_dim).min(p2.hi(wall_dim)) - dims.wall_edge_spacing);
            wall3.set_bound(odim, dir, val);
            wall3.set_bound(odim, !dir, val + if dir { -dims.wall_thick } else { dims.wall_thick });

            // Doorways on either side of the new wall, high side first
            for s in [false, true] {
                let end = wall3.bound(wall_dim, !s);
                if (end - wall_pos).abs() > 1.5 * dims.doorway_width {
                    let doorway_pos = 0.5 * (wall_pos + end);
                    let lo_pos = doorway_pos - dims.doorway_half_width();
                    let hi_pos = doorway_pos + dims.doorway_half_width();
                    let wall2 = remove_section(&mut wall3, lo_pos, hi_pos, wall_dim);
                    interior.walls[odim.index()].push(wall2);
                    region.doors[wd][usize::from(dir)] =
                        Some((lo_pos - dims.wall_half_thick(), hi_pos + dims.wall_half_thick()));
                }
            }
            interior.walls[odim.index()].push(wall3);
            seps_placed[pix][wd][usize::from(dir)] = true;
            seps_placed[p2ix][wd][usize::from(!dir)] = true;
        }
    }
}

/// `num_floors + 1` slab boundaries: floor only at the bottom, ceiling only at the top.
fn add_floors_and_ceilings(part: &Cube, num_floors: u32, dims: &InteriorDims, interior: &mut Interior) {
    for f in 0..=num_floors {
        let z = part.z1() + f as f32 * dims.floor_spacing;
        if f > 0 {
            let mut c = *part;
            c.min.z = z - dims.fc_thick;
            c.max.z = z;
            interior.ceilings.push(c);
        }
        if f < num_floors {
            let mut c = *part;
            c.min.z = z;
            c.max.z = z + dims.fc_thick;
            interior.floors.push(c);
        }
    }
}

/// Cuts up to four more doorways into each long partition wall.
///
/// Fragments produced by a cut are appended and visited in turn.
fn add_extra_doorways(
    interior: &mut Interior,
    skip: &[Vec<Range<usize>>; 2],
    dims: &InteriorDims,
    rng: &mut BuildingRng,
) {
    let min_split_len = 1.5 * dims.min_wall_len;
    let (dhw, wt) = (dims.doorway_half_width(), dims.wall_thick);

    for d in Axis::HORIZONTAL {
        let od = d.other();
        let [walls_x, walls_y] = &mut interior.walls;
        let (walls, perp_walls) = if d == Axis::X { (walls_x, &*walls_y) } else { (walls_y, &*walls_x) };
        let mut w = 0;

        while w < walls.len() {
            if skip[d.index()].iter().any(|r| r.contains(&w)) {
                w += 1;
                continue;
            }
            for _ in 0..MAX_EXTRA_DOORWAYS {
                let wall = walls[w];
                if wall.len(od) < min_split_len {
                    break;
                }
                let mut cut = None;
                for _ in 0..EXTRA_DOORWAY_ATTEMPTS {
                    let doorway_pos = cube_rand_side_pos(&wall, od, 0.25, dims.doorway_width, rng);
                    let (lo_pos, hi_pos) = (doorway_pos - dhw, doorway_pos + dhw);
                    let blocked = perp_walls.iter().any(|p| {
                        p.hi(od) >= lo_pos - wt
                            && p.lo(od) <= hi_pos + wt
                            && p.hi(d) > wall.lo(d) - wt
                            && p.lo(d) < wall.hi(d) + wt
                    });
                    if !blocked {
                        cut = Some((lo_pos, hi_pos));
                        break;
                    }
                }
                let Some((lo_pos, hi_pos)) = cut else { break };
                let wall2 = remove_section(&mut walls[w], lo_pos, hi_pos, od);
                walls.push(wall2);
            }
            w += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::BuildingKind;
    use crate::seed::BuildingSeed;

    fn building(kind: BuildingKind, parts: &[Cube]) -> Building {
        let mut b = Building::shell(parts[0], kind);
        b.parts.extend_from_slice(parts);
        b.calc_bcube_from_parts();
        b
    }

    fn rng(s: i32) -> BuildingRng {
        BuildingRng::new(BuildingSeed::new(s, 99))
    }

    #[test]
    fn test_num_floors_rounds() {
        let dims = InteriorDims::new(&BuildingMaterial::default());
        let part = |h: f32| Cube::from_ranges([0.0, 1.0], [0.0, 1.0], [0.0, h]);
        assert_eq!(dims.num_floors(&part(12.0)), 4);
        assert_eq!(dims.num_floors(&part(10.0)), 3, "(10 - 0.3) / 3 rounds to 3");
        assert_eq!(dims.num_floors(&part(0.3)), 0);
        assert_eq!(dims.num_floors(&part(1.0)), 0);
    }

    #[test]
    fn test_remove_section_splits_in_two() {
        let mut wall = Cube::from_ranges([0.0, 10.0], [0.0, 0.15], [0.0, 3.0]);
        let hi = remove_section(&mut wall, 4.0, 5.5, Axis::X);
        assert_eq!(wall.hi(Axis::X), 4.0);
        assert_eq!(hi.lo(Axis::X), 5.5);
        assert_eq!(hi.hi(Axis::X), 10.0);
        assert!((wall.dx() + hi.dx() + 1.5 - 10.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "must lie inside")]
    fn test_remove_section_rejects_outside_span() {
        let mut wall = Cube::from_ranges([0.0, 10.0], [0.0, 0.15], [0.0, 3.0]);
        let _ = remove_section(&mut wall, -1.0, 2.0, Axis::X);
    }

    #[test]
    fn test_window_test() {
        let part = Cube::from_ranges([0.0, 10.0], [0.0, 10.0], [0.0, 3.0]);
        assert!(is_val_inside_window(&part, Axis::X, 2.5, 2.0, 0.2));
        assert!(!is_val_inside_window(&part, Axis::X, 2.1, 2.0, 0.2));
    }

    #[test]
    fn test_slabs_do_not_overlap() {
        let part = Cube::from_ranges([0.0, 12.0], [0.0, 9.0], [0.0, 12.0]);
        let mut b = building(BuildingKind::Office, &[part]);
        gen_interior(&mut b, &BuildingMaterial::default(), None, &mut rng(1));
        let interior = b.interior().expect("cuboid office has an interior");

        assert_eq!(interior.floors.len(), 4);
        assert_eq!(interior.ceilings.len(), 4);
        let mut slabs: Vec<Cube> = interior.floors.iter().chain(&interior.ceilings).copied().collect();
        slabs.sort_by(|a, b| a.z1().total_cmp(&b.z1()));
        for pair in slabs.windows(2) {
            assert!(pair[0].z2() <= pair[1].z1() + 1e-5, "slabs overlap: {pair:?}");
        }
    }

    #[test]
    fn test_partition_walls_stay_inside_part() {
        let part = Cube::from_ranges([0.0, 24.0], [0.0, 18.0], [0.0, 9.0]);
        for s in 0..20 {
            let mut b = building(BuildingKind::House, &[part]);
            gen_interior(&mut b, &BuildingMaterial::default(), None, &mut rng(s));
            let interior = b.interior().expect("house interior");

            assert!(b.hallway_dim().is_none(), "houses never get hallways");
            assert!(interior.num_walls() >= 2, "one split gives two wall fragments");
            assert!(!interior.rooms.is_empty());
            for axis in Axis::HORIZONTAL {
                for w in interior.walls(axis) {
                    assert!(w.is_strictly_normalized(), "degenerate wall {w:?}");
                    assert!(part.contains_cube(w));
                    assert!((w.len(axis) - 0.15).abs() < 1e-4, "wall is thin along its axis");
                }
            }
            for r in &interior.rooms {
                assert!(part.contains_cube(r));
            }
        }
    }

    #[test]
    fn test_hallway_layout_for_office_slab() {
        let part = Cube::from_ranges([0.0, 60.0], [0.0, 30.0], [0.0, 15.0]);
        let mut b = building(BuildingKind::Office, &[part]);
        gen_interior(&mut b, &BuildingMaterial::default(), None, &mut rng(3));
        let interior = b.interior().expect("office interior");

        assert_eq!(b.hallway_dim(), Some(Axis::X));
        // 24 windows along X at two per room
        assert_eq!(interior.rooms.len(), 24);
        assert_eq!(interior.walls(Axis::X).len(), 2 * 11);
        assert_eq!(interior.walls(Axis::Y).len(), 2 * 11 + 4);
        for r in &interior.rooms {
            assert!(part.contains_cube(r));
            assert!(r.dy() < 15.0, "rooms sit beside the hallway");
        }
    }

    #[test]
    fn test_junction_stub_between_parts() {
        let a = Cube::from_ranges([0.0, 12.0], [0.0, 12.0], [0.0, 6.0]);
        let b2 = Cube::from_ranges([12.0, 24.0], [2.0, 10.0], [0.0, 6.0]);
        let mut found = false;

        for s in 0..20 {
            let mut b = building(BuildingKind::House, &[a, b2]);
            gen_interior(&mut b, &BuildingMaterial::default(), None, &mut rng(s));
            let interior = b.interior().expect("house interior");
            // Stubs are thin along X and touch the shared face at x = 12
            found |= interior
                .walls(Axis::X)
                .iter()
                .any(|w| (w.hi(Axis::X) - 12.0).abs() < 1e-5 || (w.lo(Axis::X) - 12.0).abs() < 1e-5);
        }
        assert!(found, "a Y wall reaching the shared face should add a junction stub");
    }

    #[test]
    fn test_no_interior_without_windows() {
        let part = Cube::from_ranges([0.0, 12.0], [0.0, 12.0], [0.0, 6.0]);
        let mut b = building(BuildingKind::Office, &[part]);
        let mat = BuildingMaterial { add_windows: false, ..BuildingMaterial::default() };
        gen_interior(&mut b, &mat, None, &mut rng(1));
        assert!(b.interior().is_none());
    }

    struct OneBoxPerRoom;

    impl RoomFurnisher for OneBoxPerRoom {
        fn furnish(&self, room: &Cube, floor_spacing: f32, _rng: &mut BuildingRng, out: &mut Vec<Cube>) {
            let c = room.center();
            let z = room.z1();
            out.push(Cube::from_ranges([c.x - 0.5, c.x + 0.5], [c.y - 0.5, c.y + 0.5], [z, z + 0.25 * floor_spacing]));
        }
    }

    #[test]
    fn test_furnisher_fills_rooms() {
        let part = Cube::from_ranges([0.0, 12.0], [0.0, 12.0], [0.0, 6.0]);
        let mut b = building(BuildingKind::House, &[part]);
        gen_interior(&mut b, &BuildingMaterial::default(), Some(&OneBoxPerRoom), &mut rng(5));
        let interior = b.interior().expect("house interior");
        assert_eq!(interior.furniture.len(), interior.rooms.len());
    }
}
