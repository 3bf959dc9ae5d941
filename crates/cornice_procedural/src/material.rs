//! # Building Materials
//!
//! A material is the immutable configuration record that drives synthesis:
//! shape probabilities, level ranges, floor spacing, window layout and the
//! rotation bound. Materials are loaded once from TOML and shared by every
//! building generated with them.
//!
//! Every field has a default, so a material file only needs to list what it
//! changes:
//!
//! ```toml
//! cube_prob = 0.9
//! max_levels = 3
//! floor_spacing = 3.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MaterialError, MaterialResult};

/// Shape, massing, window and interior parameters for one building type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingMaterial {
    /// Probability that a building is round (cylinder).
    pub round_prob: f32,
    /// Probability that a non-round building is a cuboid.
    pub cube_prob: f32,
    /// Fewest sides of an N-gon building.
    pub min_sides: u32,
    /// Most sides of an N-gon building.
    pub max_sides: u32,
    /// Lower bound of the flat-side fraction for buildings with 6+ sides.
    pub min_flat_side_amt: f32,
    /// Upper bound of the flat-side fraction. Zero disables flat sides.
    pub max_flat_side_amt: f32,
    /// Lower bound of the alternating-step factor.
    pub min_alt_step_factor: f32,
    /// Upper bound of the alternating-step factor. Zero disables chamfers.
    pub max_alt_step_factor: f32,
    /// Probability of applying an alternating-step factor when allowed.
    pub alt_step_factor_prob: f32,
    /// Fewest vertical levels.
    pub min_levels: u32,
    /// Most vertical levels.
    pub max_levels: u32,
    /// Minimum height of one level. Zero disables the clamp.
    pub min_level_height: f32,
    /// Probability that a low cuboid building gets an L/T/U/H/+ footprint.
    pub split_prob: f32,
    /// Largest rotation angle in radians. Zero disables rotation.
    pub max_rot_angle: f32,
    /// Buildings placed outside a city grid keep a minimum level inset.
    pub no_city: bool,
    /// Vertical distance between floors.
    pub floor_spacing: f32,
    /// Window columns per unit of facade length.
    pub window_density: f32,
    /// Fraction of a window bay taken by the window itself, in (0, 1].
    pub window_width_fract: f32,
    /// Facades have generated windows. Interiors and doors need windows.
    pub add_windows: bool,
    /// Snap part heights to an exact multiple of the floor spacing.
    pub exact_floor_multiple: bool,
    /// Generate interior walls, floors, ceilings and rooms.
    pub gen_interiors: bool,
    /// Regions longer than this many minimum wall lengths keep splitting.
    pub wall_split_thresh: f32,
    /// House door height as a fraction of the floor spacing.
    pub door_height_fract: f32,
}

impl Default for BuildingMaterial {
    fn default() -> Self {
        Self {
            round_prob: 0.05,
            cube_prob: 0.7,
            min_sides: 3,
            max_sides: 8,
            min_flat_side_amt: 0.0,
            max_flat_side_amt: 0.0,
            min_alt_step_factor: 0.0,
            max_alt_step_factor: 0.0,
            alt_step_factor_prob: 0.0,
            min_levels: 1,
            max_levels: 5,
            min_level_height: 6.0,
            split_prob: 0.4,
            max_rot_angle: 0.0,
            no_city: false,
            floor_spacing: 3.0,
            window_density: 0.4,
            window_width_fract: 0.6,
            add_windows: true,
            exact_floor_multiple: true,
            gen_interiors: true,
            wall_split_thresh: 4.0,
            door_height_fract: 0.8,
        }
    }
}

impl BuildingMaterial {
    /// Parses and validates a material from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `MaterialError::Parse` for malformed TOML and
    /// `MaterialError::InvalidField` for out-of-range values.
    pub fn from_toml_str(text: &str) -> MaterialResult<Self> {
        let material: Self = toml::from_str(text).map_err(|e| MaterialError::Parse(e.to_string()))?;
        material.validate()?;
        Ok(material)
    }

    /// Reads, parses and validates a material file.
    ///
    /// # Errors
    ///
    /// Returns `MaterialError::Io` if the file cannot be read, otherwise the
    /// errors of [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> MaterialResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MaterialError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let material = Self::from_toml_str(&text)?;
        tracing::info!("Loaded building material from {}", path.display());
        Ok(material)
    }

    /// Checks every field the generator relies on.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> MaterialResult<()> {
        for (field, p) in [
            ("round_prob", self.round_prob),
            ("cube_prob", self.cube_prob),
            ("alt_step_factor_prob", self.alt_step_factor_prob),
            ("split_prob", self.split_prob),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("probability {p} outside [0, 1]")));
            }
        }
        if self.min_sides < 3 {
            return Err(invalid("min_sides", format!("{} is fewer than 3 sides", self.min_sides)));
        }
        if self.max_sides < self.min_sides {
            return Err(invalid(
                "max_sides",
                format!("{} is below min_sides {}", self.max_sides, self.min_sides),
            ));
        }
        if self.min_levels == 0 {
            return Err(invalid("min_levels", "must be at least 1".to_string()));
        }
        if self.max_levels < self.min_levels {
            return Err(invalid(
                "max_levels",
                format!("{} is below min_levels {}", self.max_levels, self.min_levels),
            ));
        }
        for (field, v) in [
            ("floor_spacing", self.floor_spacing),
            ("window_density", self.window_density),
            ("door_height_fract", self.door_height_fract),
        ] {
            if v.is_nan() || v <= 0.0 {
                return Err(invalid(field, format!("{v} must be positive")));
            }
        }
        if !(self.window_width_fract > 0.0 && self.window_width_fract <= 1.0) {
            return Err(invalid(
                "window_width_fract",
                format!("{} outside (0, 1]", self.window_width_fract),
            ));
        }
        if self.max_rot_angle.is_nan() || self.max_rot_angle < 0.0 {
            return Err(invalid("max_rot_angle", format!("{} is negative", self.max_rot_angle)));
        }
        if self.min_level_height.is_nan() || self.min_level_height < 0.0 {
            return Err(invalid(
                "min_level_height",
                format!("{} is negative", self.min_level_height),
            ));
        }
        Ok(())
    }

    /// Height of a house door.
    #[must_use]
    pub fn door_height(&self) -> f32 {
        self.door_height_fract * self.floor_spacing
    }

    /// Number of window columns on a facade spanning `lo..hi`. Never zero.
    #[must_use]
    pub fn windows_on_side(&self, lo: f32, hi: f32) -> u32 {
        debug_assert!(lo < hi, "facade span must be positive");
        (((hi - lo) * self.window_density).round() as u32).max(1)
    }

    /// Fraction of each window bay on either side of the window.
    #[must_use]
    pub fn window_border(&self) -> f32 {
        0.5 * (1.0 - self.window_width_fract)
    }
}

fn invalid(field: &'static str, reason: String) -> MaterialError {
    MaterialError::InvalidField { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(BuildingMaterial::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let m = BuildingMaterial::from_toml_str("cube_prob = 0.9\nmax_levels = 3\n")
            .expect("partial material parses");
        assert_eq!(m.cube_prob, 0.9);
        assert_eq!(m.max_levels, 3);
        assert_eq!(m.floor_spacing, BuildingMaterial::default().floor_spacing);
    }

    #[test]
    fn test_bad_probability_rejected() {
        let err = BuildingMaterial::from_toml_str("split_prob = 1.5").unwrap_err();
        assert!(matches!(err, MaterialError::InvalidField { field: "split_prob", .. }));
    }

    #[test]
    fn test_bad_ranges_rejected() {
        let err = BuildingMaterial::from_toml_str("min_sides = 5\nmax_sides = 4").unwrap_err();
        assert!(matches!(err, MaterialError::InvalidField { field: "max_sides", .. }));

        let err = BuildingMaterial::from_toml_str("floor_spacing = 0.0").unwrap_err();
        assert!(matches!(err, MaterialError::InvalidField { field: "floor_spacing", .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = BuildingMaterial::from_toml_str("cube_prob = ").unwrap_err();
        assert!(matches!(err, MaterialError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("cornice_material_that_does_not_exist.toml");
        let err = BuildingMaterial::load(&path).unwrap_err();
        assert!(matches!(err, MaterialError::Io { .. }));
    }

    #[test]
    fn test_window_helpers() {
        let m = BuildingMaterial::default();
        assert_eq!(m.windows_on_side(0.0, 10.0), 4);
        assert_eq!(m.windows_on_side(0.0, 0.1), 1, "never zero windows");
        assert!((m.window_border() - 0.2).abs() < 1e-6);
        assert!((m.door_height() - 2.4).abs() < 1e-5);
    }
}
