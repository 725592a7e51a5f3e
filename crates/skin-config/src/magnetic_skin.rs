use std::collections::BTreeMap;

use skin_types::{DesignVariable, Objective};
use tracing::info;

use crate::design::DesignModel;
use crate::error::ConfigError;
use crate::layout::Layout;
use crate::params::SkinParameters;

pub const MODEL_NAME: &str = "MagneticSkin";

pub const MAGNETIC_SENSITIVITY: &str = "MagneticSensitivity";
pub const DEFORMATION: &str = "Deformation";

/// Optimizer-visible variables with their bounds.
const DESIGN_BOUNDS: [(&str, f64, f64); 4] = [
    ("Length", 20.0, 60.0),
    ("Width", 10.0, 30.0),
    ("Height", 2.0, 5.0),
    ("MagnetSide", 0.5, 2.0),
];

fn design_slot<'a>(params: &'a mut SkinParameters, name: &str) -> Option<&'a mut f64> {
    match name {
        "Length" => Some(&mut params.length),
        "Width" => Some(&mut params.width),
        "Height" => Some(&mut params.height),
        "MagnetSide" => Some(&mut params.magnet_side),
        _ => None,
    }
}

fn design_value(params: &SkinParameters, name: &str) -> Option<f64> {
    match name {
        "Length" => Some(params.length),
        "Width" => Some(params.width),
        "Height" => Some(params.height),
        "MagnetSide" => Some(params.magnet_side),
        _ => None,
    }
}

/// Magnetic skin sensor configuration: parameters plus the layout derived
/// from them.
///
/// The layout is derived on construction and again after every successful
/// `set_design_variables`. Code that edits `params_mut()` directly must call
/// `rederive()` itself.
#[derive(Debug, Clone)]
pub struct MagneticSkinConfig {
    params: SkinParameters,
    layout: Layout,
}

impl MagneticSkinConfig {
    /// Default parameters with an all-ones magnet mask.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_parameters(SkinParameters::default())
    }

    pub fn from_parameters(params: SkinParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        let layout = Layout::derive(&params, &params.effective_mask())?;
        Ok(Self { params, layout })
    }

    pub fn params(&self) -> &SkinParameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SkinParameters {
        &mut self.params
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Re-derive the layout from the current parameters.
    pub fn rederive(&mut self) -> Result<(), ConfigError> {
        self.params.validate()?;
        self.layout = Layout::derive(&self.params, &self.params.effective_mask())?;
        Ok(())
    }
}

impl DesignModel for MagneticSkinConfig {
    fn name(&self) -> &str {
        MODEL_NAME
    }

    fn init_model_parameters(&mut self) -> Result<(), ConfigError> {
        *self = Self::new()?;
        Ok(())
    }

    fn design_variables(&self) -> BTreeMap<String, DesignVariable> {
        DESIGN_BOUNDS
            .iter()
            .filter_map(|&(name, min, max)| {
                design_value(&self.params, name)
                    .map(|v| (name.to_string(), DesignVariable::new(v, min, max)))
            })
            .collect()
    }

    fn objectives(&self) -> BTreeMap<String, Objective> {
        BTreeMap::from([
            (MAGNETIC_SENSITIVITY.to_string(), Objective::maximize(100.0)),
            (DEFORMATION.to_string(), Objective::minimize(80.0)),
        ])
    }

    fn assessed_together_objectives(&self) -> Vec<Vec<String>> {
        vec![vec![MAGNETIC_SENSITIVITY.to_string(), DEFORMATION.to_string()]]
    }

    fn set_design_variables(&mut self, values: &BTreeMap<String, f64>) -> Result<(), ConfigError> {
        let mut params = self.params.clone();
        for (name, &value) in values {
            let &(_, min, max) = DESIGN_BOUNDS
                .iter()
                .find(|(n, _, _)| n == name)
                .ok_or_else(|| ConfigError::UnknownDesignVariable(name.clone()))?;
            if !(value >= min && value <= max) {
                return Err(ConfigError::OutOfBounds {
                    name: name.clone(),
                    value,
                    min,
                    max,
                });
            }
            if let Some(slot) = design_slot(&mut params, name) {
                *slot = value;
            }
        }

        params.validate()?;
        let layout = Layout::derive(&params, &params.effective_mask())?;
        info!(?values, "design variables updated, layout re-derived");
        self.params = params;
        self.layout = layout;
        Ok(())
    }
}
