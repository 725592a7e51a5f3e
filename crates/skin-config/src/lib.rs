//! Design parameters and derived layout for the magnetic skin sensor.
//!
//! `MagneticSkinConfig` owns the scalar parameters and eagerly derives every
//! layout artifact (grids, magnet and sensor centers, rigid-object grouping,
//! ROI boxes, sensor zones) that the geometry generator and the downstream
//! simulation consume.

pub mod design;
pub mod error;
pub mod grid;
pub mod layout;
pub mod magnetic_skin;
pub mod mask;
pub mod params;

pub use design::DesignModel;
pub use error::ConfigError;
pub use grid::{generate_grid, linspace};
pub use layout::{sensor_zone, Layout};
pub use magnetic_skin::MagneticSkinConfig;
pub use mask::Mask;
pub use params::SkinParameters;
