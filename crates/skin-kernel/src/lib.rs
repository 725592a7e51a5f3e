pub mod geo_script;
pub mod mesh_field;
pub mod mock_kernel;
pub mod primitives;
pub mod session;
pub mod traits;
pub mod truck_kernel;
pub mod types;

pub use geo_script::GeoScriptKernel;
pub use mesh_field::*;
pub use mock_kernel::MockKernel;
pub use session::Session;
pub use traits::*;
pub use truck_kernel::TruckKernel;
pub use types::*;
