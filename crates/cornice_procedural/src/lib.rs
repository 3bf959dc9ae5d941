//! # CORNICE Procedural Buildings
//!
//! Deterministic synthesis of building geometry from a seed box, two
//! integer seeds and a material record.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seeds and material always produce the same building
//! 2. **One pass**: A building is generated whole and never edited afterwards
//! 3. **Local frame**: Parts, roofs and interiors are stored unrotated
//! 4. **Graceful**: Placement that runs out of attempts falls back to a simpler layout
//!
//! ## Core Components
//!
//! - `BuildingMaterial`: TOML-backed shape, massing, window and interior parameters
//! - `BuildingGenerator`: Runs massing, roofs, details, interior and doors
//! - `Building`: Read-only result consumed by renderers and the collision engine
//! - `split_footprint`: The nine L/T/U/H/+ footprint splits
//! - `BuildingStats`: Geometry totals across many buildings
//!
//! ## Example
//!
//! ```rust,ignore
//! use cornice_procedural::{BuildingGenerator, BuildingKind, BuildingMaterial, BuildingSeed};
//! use cornice_shared::Cube;
//!
//! let material = BuildingMaterial::load("materials/office.toml")?;
//! let generator = BuildingGenerator::new(material);
//!
//! let base = Cube::from_ranges([0.0, 30.0], [0.0, 20.0], [0.0, 24.0]);
//! let building = generator.generate(&base, BuildingKind::Office, BuildingSeed::new(12, 345));
//!
//! assert!(building.bcube().contains_cube(&building.parts()[0]));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod building;
mod doors;
pub mod error;
pub mod generator;
mod house;
pub mod interior;
pub mod massing;
pub mod material;
mod roof;
pub mod seed;
pub mod shape;
pub mod stats;

pub use building::{Building, BuildingKind, Door, Interior};
pub use error::{MaterialError, MaterialResult};
pub use generator::BuildingGenerator;
pub use interior::{remove_section, InteriorDims, RoomFurnisher};
pub use massing::{split_footprint, SplitParams, SplitShape};
pub use material::BuildingMaterial;
pub use seed::{BuildingRng, BuildingSeed};
pub use shape::{FootprintShape, Shape, CYLINDER_SIDES};
pub use stats::BuildingStats;
