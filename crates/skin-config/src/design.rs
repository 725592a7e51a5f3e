use std::collections::BTreeMap;

use skin_types::{DesignVariable, Objective};

use crate::error::ConfigError;

/// What an optimization driver needs from a physical model configuration.
///
/// One implementation per physical model.
pub trait DesignModel {
    /// Model name, used by the driver to locate scenes and results.
    fn name(&self) -> &str;

    /// Reset every parameter to the model's defaults and re-derive the layout.
    fn init_model_parameters(&mut self) -> Result<(), ConfigError>;

    /// Variables the optimizer may vary: name → (current value, min, max).
    fn design_variables(&self) -> BTreeMap<String, DesignVariable>;

    /// Objectives: name → (direction, target).
    fn objectives(&self) -> BTreeMap<String, Objective>;

    /// Groups of objectives that can only be evaluated together, e.g. because
    /// they come out of a single simulation run.
    fn assessed_together_objectives(&self) -> Vec<Vec<String>>;

    /// Apply new design-variable values. Implementations validate every name
    /// and bound before changing anything.
    fn set_design_variables(&mut self, values: &BTreeMap<String, f64>) -> Result<(), ConfigError>;
}
