//! # CORNICE Shared
//!
//! Geometry vocabulary used by both the building generator and the
//! collision engine.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER contain:
//! - random sources
//! - generation policy
//! - anything that mutates a building
//!
//! If you need synthesis logic, put it in `cornice_procedural`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod cube;
pub mod math;
pub mod polygon;
pub mod rotation;

pub use cube::{cubes_as_bytes, Cube};
pub use math::{Axis, Vec3};
pub use polygon::{point_in_polygon_xy, polygon_normal, SurfaceKind, TaggedQuad};
pub use rotation::Rotation;
