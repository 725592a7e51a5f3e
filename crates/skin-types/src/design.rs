use serde::{Deserialize, Serialize};

/// Which way an objective should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Maximize,
    Minimize,
}

/// An optimizer-controlled parameter with its declared bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignVariable {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl DesignVariable {
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        Self { value, min, max }
    }

    /// Whether `v` lies inside `[min, max]`.
    pub fn admits(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// A scalar metric with its optimization direction and target value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub direction: Direction,
    pub target: f64,
}

impl Objective {
    pub fn maximize(target: f64) -> Self {
        Self {
            direction: Direction::Maximize,
            target,
        }
    }

    pub fn minimize(target: f64) -> Self {
        Self {
            direction: Direction::Minimize,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Objective::maximize(100.0)).unwrap();
        assert_eq!(json, r#"{"direction":"maximize","target":100.0}"#);
    }

    #[test]
    fn test_design_variable_bounds_are_inclusive() {
        let dv = DesignVariable::new(3.0, 2.0, 5.0);
        assert!(dv.admits(2.0));
        assert!(dv.admits(5.0));
        assert!(!dv.admits(5.0001));
    }
}
