pub mod design;
pub mod roi;

pub use design::*;
pub use roi::*;

/// A point in the XY plane, `[x, y]`.
pub type Point2 = [f64; 2];

/// A point in model space, `[x, y, z]`.
pub type Point3 = [f64; 3];
