//! Scalar design parameters of the magnetic skin.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mask::Mask;

/// Every scalar the model is built from. Lengths are in millimetres.
///
/// Deserialization is partial: fields missing from a document keep their
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinParameters {
    // Slab geometry
    pub length: f64,
    pub width: f64,
    pub height: f64,

    // Elasticity
    pub poisson_ratio: f64,
    pub youngs_modulus: f64,

    // Magnets
    pub magnet_side: f64,
    pub mu_magnitude: f64,

    // Meshing
    pub surface_mesh_characteristic_length: f64,
    pub volume_mesh_characteristic_length: f64,

    // Layout
    pub grid_margin: f64,
    pub grid_rows_magnets: usize,
    pub grid_cols_magnets: usize,
    pub grid_rows_sensors: usize,
    pub grid_cols_sensors: usize,
    pub box_tolerance: f64,

    pub indenter_radius: f64,
    pub articulation_angle_deg: f64,

    /// Keep-mask over the magnet grid; all positions when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_magnets: Option<Mask>,
}

impl Default for SkinParameters {
    fn default() -> Self {
        Self {
            length: 40.0,
            width: 20.0,
            height: 3.0,
            poisson_ratio: 0.4,
            youngs_modulus: 60000.0,
            magnet_side: 1.0,
            mu_magnitude: 4.627195188680999e-08,
            surface_mesh_characteristic_length: 0.8,
            volume_mesh_characteristic_length: 1.13,
            grid_margin: 10.0,
            grid_rows_magnets: 2,
            grid_cols_magnets: 3,
            grid_rows_sensors: 2,
            grid_cols_sensors: 3,
            box_tolerance: 0.1,
            indenter_radius: 2.0,
            articulation_angle_deg: 0.0,
            mask_magnets: None,
        }
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn require_count(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::InvalidParameter {
            name,
            reason: "grid count must be at least 1".to_string(),
        })
    } else {
        Ok(())
    }
}

impl SkinParameters {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn articulation_angle_rad(&self) -> f64 {
        self.articulation_angle_deg.to_radians()
    }

    /// The magnet mask in effect: the configured one, or all-ones over the
    /// magnet grid.
    pub fn effective_mask(&self) -> Mask {
        self.mask_magnets
            .clone()
            .unwrap_or_else(|| Mask::ones(self.grid_rows_magnets, self.grid_cols_magnets))
    }

    /// Reject parameter sets no layout can be derived from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("length", self.length)?;
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_positive("magnet_side", self.magnet_side)?;
        require_count("grid_rows_magnets", self.grid_rows_magnets)?;
        require_count("grid_cols_magnets", self.grid_cols_magnets)?;
        require_count("grid_rows_sensors", self.grid_rows_sensors)?;
        require_count("grid_cols_sensors", self.grid_cols_sensors)?;

        if !(self.grid_margin >= 0.0 && self.grid_margin <= self.length.min(self.width)) {
            return Err(ConfigError::InvalidParameter {
                name: "grid_margin",
                reason: format!(
                    "must lie in [0, {}], got {}",
                    self.length.min(self.width),
                    self.grid_margin
                ),
            });
        }
        if !(self.box_tolerance >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "box_tolerance",
                reason: format!("must be non-negative, got {}", self.box_tolerance),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let p = SkinParameters::default();
        p.validate().unwrap();
        assert_eq!(p.articulation_angle_rad(), 0.0);
        assert_eq!(p.effective_mask().shape(), (2, 3));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let p = SkinParameters::from_json_str(r#"{ "length": 50, "grid_cols_magnets": 4 }"#).unwrap();
        assert_eq!(p.length, 50.0);
        assert_eq!(p.grid_cols_magnets, 4);
        assert_eq!(p.width, 20.0);
        assert_eq!(p.box_tolerance, 0.1);
    }

    #[test]
    fn test_mask_read_from_document() {
        let p = SkinParameters::from_json_str(r#"{ "mask_magnets": [[1, 0, 1], [0, 1, 0]] }"#)
            .unwrap();
        assert_eq!(p.effective_mask().count_kept(), 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = SkinParameters::from_json_str(r#"{ "height": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "height", .. }));

        let err = SkinParameters::from_json_str(r#"{ "grid_margin": 25 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "grid_margin", .. }));

        let err = SkinParameters::from_json_str(r#"{ "grid_rows_sensors": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { .. }));
    }

    #[test]
    fn test_margin_may_equal_smaller_side() {
        let p = SkinParameters::from_json_str(r#"{ "width": 10, "grid_margin": 10 }"#).unwrap();
        assert_eq!(p.grid_margin, p.width);
        let err = SkinParameters::from_json_str(r#"{ "width": 10, "grid_margin": 10.5 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "grid_margin", .. }));
    }

    #[test]
    fn test_unreadable_file_reports_path() {
        let err = SkinParameters::from_json_file("/nonexistent/skin.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/skin.json"));
    }
}
