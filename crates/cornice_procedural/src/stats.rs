//! Geometry counts across a set of generated buildings.

use std::ops::AddAssign;

use crate::building::Building;

/// Running totals of generated geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildingStats {
    /// Buildings added.
    pub buildings: u64,
    /// Houses among them.
    pub houses: u64,
    /// Massing parts (including porches, sheds and chimneys).
    pub parts: u64,
    /// Roof planes, gables and caps.
    pub roof_surfaces: u64,
    /// Rooftop blocks and antennas.
    pub details: u64,
    /// Doors.
    pub doors: u64,
    /// Interior wall segments.
    pub walls: u64,
    /// Floor slabs.
    pub floors: u64,
    /// Ceiling slabs.
    pub ceilings: u64,
    /// Rooms.
    pub rooms: u64,
    /// Furniture boxes.
    pub furniture: u64,
}

impl BuildingStats {
    /// Totals for one building.
    #[must_use]
    pub fn of(b: &Building) -> Self {
        let mut stats = Self {
            buildings: 1,
            houses: u64::from(b.is_house()),
            parts: b.parts().len() as u64,
            roof_surfaces: b.roof_surfaces().len() as u64,
            details: b.details().len() as u64,
            doors: b.doors().len() as u64,
            ..Self::default()
        };
        if let Some(interior) = b.interior() {
            stats.walls = interior.num_walls() as u64;
            stats.floors = interior.floors.len() as u64;
            stats.ceilings = interior.ceilings.len() as u64;
            stats.rooms = interior.rooms.len() as u64;
            stats.furniture = interior.furniture.len() as u64;
        }
        stats
    }

    /// Adds one building to the totals.
    pub fn add(&mut self, b: &Building) {
        *self += Self::of(b);
    }

    /// Mean parts per building, or zero when empty.
    #[must_use]
    pub fn parts_per_building(&self) -> f64 {
        if self.buildings == 0 {
            0.0
        } else {
            self.parts as f64 / self.buildings as f64
        }
    }
}

impl AddAssign for BuildingStats {
    fn add_assign(&mut self, o: Self) {
        self.buildings += o.buildings;
        self.houses += o.houses;
        self.parts += o.parts;
        self.roof_surfaces += o.roof_surfaces;
        self.details += o.details;
        self.doors += o.doors;
        self.walls += o.walls;
        self.floors += o.floors;
        self.ceilings += o.ceilings;
        self.rooms += o.rooms;
        self.furniture += o.furniture;
    }
}

impl<'a> FromIterator<&'a Building> for BuildingStats {
    fn from_iter<I: IntoIterator<Item = &'a Building>>(iter: I) -> Self {
        let mut stats = Self::default();
        for b in iter {
            stats.add(b);
        }
        stats
    }
}
