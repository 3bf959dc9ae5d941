//! # Building Data Model
//!
//! A `Building` is produced in one synthesis pass by
//! [`BuildingGenerator`](crate::generator::BuildingGenerator) and is
//! read-only afterwards. Everything is stored in the building's local,
//! unrotated frame; only `bcube()` reflects the rotation.
//!
//! ## Ownership
//!
//! The building exclusively owns its parts, roof surfaces, details, doors
//! and interior. Regeneration replaces the whole value.

use cornice_shared::{Axis, Cube, Rotation, TaggedQuad, Vec3};

use crate::shape::FootprintShape;

/// House or office building. Houses get peaked roofs and chimneys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BuildingKind {
    /// Detached house
    House,
    /// Office or apartment building
    #[default]
    Office,
}

/// A door: a zero-thickness quad bound to one side of one part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Door {
    /// Door surface, tagged `HouseDoor` or `BuildingDoor`
    pub quad: TaggedQuad,
    /// Index of the owning part
    pub part: usize,
    /// Axis the door faces along
    pub axis: Axis,
    /// `true` for the high side of the part
    pub dir: bool,
}

/// Interior floorplan of a building.
///
/// The layout of one part is shared by all of its floors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interior {
    /// Walls thin along X (index 0) and thin along Y (index 1)
    pub walls: [Vec<Cube>; 2],
    /// Floor slabs
    pub floors: Vec<Cube>,
    /// Ceiling slabs
    pub ceilings: Vec<Cube>,
    /// Room volumes, one per room per part (spanning all floors)
    pub rooms: Vec<Cube>,
    /// Furniture boxes placed by a room furnisher
    pub furniture: Vec<Cube>,
}

impl Interior {
    /// Walls thin along `axis`.
    #[must_use]
    pub fn walls(&self, axis: Axis) -> &[Cube] {
        &self.walls[axis.index()]
    }

    /// Total wall count across both axes.
    #[must_use]
    pub fn num_walls(&self) -> usize {
        self.walls[0].len() + self.walls[1].len()
    }
}

/// A generated building.
#[derive(Clone, Debug, Default)]
pub struct Building {
    pub(crate) kind: BuildingKind,
    pub(crate) base: Cube,
    pub(crate) bcube: Cube,
    pub(crate) local_bcube: Cube,
    pub(crate) rotation: Rotation,
    pub(crate) rot_center: Vec3,
    pub(crate) footprint: FootprintShape,
    pub(crate) parts: Vec<Cube>,
    pub(crate) details: Vec<Cube>,
    pub(crate) roof_tquads: Vec<TaggedQuad>,
    pub(crate) doors: Vec<Door>,
    pub(crate) interior: Option<Box<Interior>>,
    pub(crate) hallway_dim: Option<Axis>,
    pub(crate) has_chimney: bool,
    pub(crate) has_antenna: bool,
    pub(crate) detail_tint: Option<f32>,
    pub(crate) door_sides: [u8; 4],
}

impl Building {
    /// Empty shell over a seed box. Not valid until generated.
    pub(crate) fn shell(base: Cube, kind: BuildingKind) -> Self {
        Self {
            kind,
            base,
            bcube: base,
            local_bcube: base,
            rot_center: base.center(),
            ..Self::default()
        }
    }

    /// True once the building has been generated from a proper seed box.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.parts.is_empty() && self.base.is_strictly_normalized()
    }

    /// House or office.
    #[must_use]
    pub fn kind(&self) -> BuildingKind {
        self.kind
    }

    /// True for houses.
    #[must_use]
    pub fn is_house(&self) -> bool {
        self.kind == BuildingKind::House
    }

    /// The seed box the building was generated from.
    #[must_use]
    pub fn base(&self) -> &Cube {
        &self.base
    }

    /// World-space bounding box (encloses the rotated building).
    #[must_use]
    pub fn bcube(&self) -> &Cube {
        &self.bcube
    }

    /// Tight bounding box of all geometry in the local frame.
    #[must_use]
    pub fn local_bcube(&self) -> &Cube {
        &self.local_bcube
    }

    /// Rotation about [`Self::rotation_center`].
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// True when the building is rotated.
    #[must_use]
    pub fn is_rotated(&self) -> bool {
        !self.rotation.is_identity()
    }

    /// Pivot of the rotation (horizontal center of the seed box).
    #[must_use]
    pub fn rotation_center(&self) -> Vec3 {
        self.rot_center
    }

    /// Footprint shape shared by all parts.
    #[must_use]
    pub fn footprint(&self) -> &FootprintShape {
        &self.footprint
    }

    /// Cuboid building.
    #[must_use]
    pub fn is_cube(&self) -> bool {
        self.footprint.is_cube()
    }

    /// Cuboid and unrotated.
    #[must_use]
    pub fn is_simple_cube(&self) -> bool {
        self.is_cube() && !self.is_rotated()
    }

    /// Vertical massing blocks.
    #[must_use]
    pub fn parts(&self) -> &[Cube] {
        &self.parts
    }

    /// Rooftop blocks and antenna.
    #[must_use]
    pub fn details(&self) -> &[Cube] {
        &self.details
    }

    /// Roof planes, gable walls and caps.
    #[must_use]
    pub fn roof_surfaces(&self) -> &[TaggedQuad] {
        &self.roof_tquads
    }

    /// Doors.
    #[must_use]
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Interior floorplan, when generated.
    #[must_use]
    pub fn interior(&self) -> Option<&Interior> {
        self.interior.as_deref()
    }

    /// Axis of the central hallway, when the hallway layout was used.
    #[must_use]
    pub fn hallway_dim(&self) -> Option<Axis> {
        self.hallway_dim
    }

    /// The last part is a chimney.
    #[must_use]
    pub fn has_chimney(&self) -> bool {
        self.has_chimney
    }

    /// The last detail is an antenna.
    #[must_use]
    pub fn has_antenna(&self) -> bool {
        self.has_antenna
    }

    /// Grayscale tint of roof details, when assigned.
    #[must_use]
    pub fn detail_tint(&self) -> Option<f32> {
        self.detail_tint
    }

    /// Sides of the first four parts that carry a door, as bit `2 * axis + dir`.
    #[must_use]
    pub fn door_sides(&self) -> [u8; 4] {
        self.door_sides
    }

    /// XY outline of `part` in the local frame, grown by `expand`.
    pub fn part_poly_points(&self, part: &Cube, expand: f32, out: &mut Vec<Vec3>) {
        self.footprint.poly_points(part, expand, out);
    }

    /// XY containment of a local-frame point in the outline of `part`.
    #[must_use]
    pub fn part_contains_pt_xy(&self, part: &Cube, pt: Vec3, scratch: &mut Vec<Vec3>) -> bool {
        self.footprint.part_contains_pt_xy(part, pt, scratch)
    }

    // ------------------------------------------------------------------
    // Bounding box bookkeeping
    // ------------------------------------------------------------------

    /// Resets the local box to the union of the parts.
    ///
    /// # Panics
    ///
    /// Panics if there are no parts.
    pub(crate) fn calc_bcube_from_parts(&mut self) {
        assert!(!self.parts.is_empty(), "building has no parts");
        let mut bc = self.parts[0];
        for p in &self.parts[1..] {
            bc.union_with_cube(p);
        }
        self.local_bcube = bc;
    }

    /// Grows the local box to include every roof vertex.
    pub(crate) fn add_roof_to_bcube(&mut self) {
        for q in &self.roof_tquads {
            for p in q.points() {
                self.local_bcube.union_with_pt(*p);
            }
        }
    }

    /// Grows the local box to include every detail box.
    pub(crate) fn add_details_to_bcube(&mut self) {
        for d in &self.details {
            self.local_bcube.union_with_cube(d);
        }
    }

    /// Recomputes the tight local box and the world-space box.
    pub(crate) fn finalize_bcube(&mut self) {
        self.calc_bcube_from_parts();
        self.add_roof_to_bcube();
        self.add_details_to_bcube();

        if !self.is_rotated() {
            self.bcube = self.local_bcube;
            return;
        }
        let lb = self.local_bcube;
        let corners = [
            Vec3::new(lb.min.x, lb.min.y, lb.min.z),
            Vec3::new(lb.max.x, lb.min.y, lb.min.z),
            Vec3::new(lb.max.x, lb.max.y, lb.max.z),
            Vec3::new(lb.min.x, lb.max.y, lb.max.z),
        ];
        let mut bc = Cube::from_point(self.rotation.rotate_about(self.rot_center, corners[0]));
        for c in &corners[1..] {
            bc.union_with_pt(self.rotation.rotate_about(self.rot_center, *c));
        }
        self.bcube = bc;
    }
}
