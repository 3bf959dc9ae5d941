//! # Building Generator
//!
//! Runs the full synthesis pass for one building:
//!
//! 1. Snap the seed box to whole floors and draw a rotation.
//! 2. Houses go through the house layout. Offices pick a cross-section,
//!    a level count and one of three massing policies (single block,
//!    overlapping levels, stacked levels), optionally splitting the top
//!    into an L/T/U/H/+ footprint.
//! 3. Roof, rooftop details, interior and doors.
//! 4. Final bounding boxes.
//!
//! The generator holds only immutable configuration, so one instance can
//! serve any number of threads.

use std::fmt;

use cornice_shared::Cube;

use crate::building::{Building, BuildingKind};
use crate::doors::gen_building_doors_if_needed;
use crate::house::gen_house;
use crate::interior::{gen_interior, RoomFurnisher};
use crate::massing::{
    adjust_part_zvals_for_floor_spacing, choose_num_levels, choose_shape, gen_overlapping_levels,
    gen_rotation, gen_stacked_levels, split_in_xy,
};
use crate::material::BuildingMaterial;
use crate::roof::{gen_details, gen_sloped_roof};
use crate::seed::{BuildingRng, BuildingSeed};

/// Buildings with this many levels or more are never split.
const MAX_SPLIT_LEVELS: u32 = 4;
/// Stacked buildings above this many levels get no rooftop details.
const MAX_DETAIL_LEVELS: u32 = 3;

/// Generates buildings from a material.
pub struct BuildingGenerator {
    /// Shape, massing, window and interior parameters.
    material: BuildingMaterial,
    /// Optional room contents.
    furnisher: Option<Box<dyn RoomFurnisher>>,
}

impl fmt::Debug for BuildingGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildingGenerator")
            .field("material", &self.material)
            .field("furnisher", &self.furnisher.is_some())
            .finish()
    }
}

impl Default for BuildingGenerator {
    fn default() -> Self {
        Self::new(BuildingMaterial::default())
    }
}

impl BuildingGenerator {
    /// Creates a generator without a room furnisher.
    #[must_use]
    pub fn new(material: BuildingMaterial) -> Self {
        Self { material, furnisher: None }
    }

    /// Places room contents with `furnisher` after each interior is built.
    #[must_use]
    pub fn with_furnisher(mut self, furnisher: Box<dyn RoomFurnisher>) -> Self {
        self.furnisher = Some(furnisher);
        self
    }

    /// The material every building is generated from.
    #[must_use]
    pub fn material(&self) -> &BuildingMaterial {
        &self.material
    }

    /// Generates a building inside `base`.
    ///
    /// # Panics
    ///
    /// Panics if `base` is not strictly normalized (positive size on every axis).
    #[must_use]
    pub fn generate(&self, base: &Cube, kind: BuildingKind, seed: BuildingSeed) -> Building {
        assert!(base.is_strictly_normalized(), "building seed box {base:?} is degenerate");
        let mat = &self.material;
        let mut rng = BuildingRng::new(seed);
        let mut base = *base;
        adjust_part_zvals_for_floor_spacing(&mut base, mat);

        let mut b = Building::shell(base, kind);
        gen_rotation(&mut b, mat, &mut rng);

        match kind {
            BuildingKind::House => gen_house(&mut b, &base, mat, self.furnisher.as_deref(), &mut rng),
            BuildingKind::Office => self.gen_office(&mut b, &base, &mut rng),
        }
        b.finalize_bcube();

        tracing::debug!(
            "Generated {:?} {:?}: {} parts, {} roof surfaces, {} details, {} doors, {} walls, {} rooms",
            kind,
            seed.values(),
            b.parts.len(),
            b.roof_tquads.len(),
            b.details.len(),
            b.doors.len(),
            b.interior().map_or(0, |i| i.num_walls()),
            b.interior().map_or(0, |i| i.rooms.len()),
        );
        b
    }

    /// Rebuilds `b` from its own seed box and kind with a new seed.
    ///
    /// The old geometry is dropped only once the new building is complete.
    pub fn regenerate(&self, b: &mut Building, seed: BuildingSeed) {
        let fresh = self.generate(&b.base, b.kind, seed);
        *b = fresh;
    }

    fn gen_office(&self, b: &mut Building, base: &Cube, rng: &mut BuildingRng) {
        let mat = &self.material;
        let was_cube = choose_shape(b, mat, rng);
        let num_levels = choose_num_levels(mat, base.dz(), was_cube, rng);
        let do_split = num_levels < MAX_SPLIT_LEVELS && b.is_cube() && rng.rand_probability(mat.split_prob);
        // Overlapping levels: half of cuboids, three quarters of the rest
        let overlap_odds = if was_cube { 2 } else { 3 };

        if num_levels == 1 {
            if do_split {
                split_in_xy(b, base, rng);
                b.calc_bcube_from_parts();
            } else {
                b.parts.push(*base);
                b.calc_bcube_from_parts();
                if rng.rand_u32() & 3 != 0 {
                    gen_sloped_roof(b, rng);
                }
                gen_details(b, rng);
            }
        } else if !do_split && rng.rand_u32() & 3 < overlap_odds {
            gen_overlapping_levels(b, base, num_levels, mat, rng);
            b.calc_bcube_from_parts();
            gen_details(b, rng);
        } else {
            gen_stacked_levels(b, base, num_levels, was_cube, mat, rng);

            if do_split {
                if let Some(top) = b.parts.pop() {
                    split_in_xy(b, &top, rng);
                }
                b.calc_bcube_from_parts();
            } else {
                b.calc_bcube_from_parts();
                if rng.rand_u32() & 3 != 0 {
                    gen_sloped_roof(b, rng);
                }
                if num_levels <= MAX_DETAIL_LEVELS {
                    gen_details(b, rng);
                }
            }
        }
        gen_interior(b, mat, self.furnisher.as_deref(), rng);
        gen_building_doors_if_needed(b, mat, rng);
    }
}
