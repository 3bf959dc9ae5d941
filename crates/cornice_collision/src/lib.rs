//! # CORNICE Collision
//!
//! Read-only queries against generated buildings, for physics, movement,
//! picking and city placement.
//!
//! ## Query Families
//!
//! - **Spheres**: push a moving sphere out of parts, roofs and details,
//!   optionally continuing into interior walls and floors
//! - **Lines**: earliest hit along a segment, classified as side, roof or detail
//! - **Containment**: point or vertical-cylinder inside a building
//! - **Overlap**: do two building footprints overlap (placement)
//!
//! All math runs in the building's unrotated frame. Callers pass a
//! world offset (`xlate`); rotation is undone and reapplied internally.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cornice_collision::{BuildingCollider, LineQuery, SphereQuery};
//! use cornice_shared::Vec3;
//!
//! let q = SphereQuery::new(player_pos, last_pos, 0.4).with_interior();
//! if let Some(contact) = building.check_sphere_coll(&q) {
//!     player_pos = contact.pos;
//! }
//!
//! let ray = LineQuery::new(eye, eye + look * 100.0);
//! let hit = building.check_line_coll(&ray);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod collider;
mod contain;
mod frame;
pub mod intersect;
pub mod line;
pub mod overlap;
pub mod sphere;

pub use collider::BuildingCollider;
pub use line::{LineCollKind, LineHit, LineQuery};
pub use overlap::check_bcube_overlap_xy;
pub use sphere::{SphereContact, SphereQuery};
