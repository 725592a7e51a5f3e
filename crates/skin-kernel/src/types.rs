use serde::{Deserialize, Serialize};

/// Topological dimension of a kernel entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dim {
    Point = 0,
    Curve = 1,
    Surface = 2,
    Volume = 3,
}

impl Dim {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Kernel entity tag, unique within its dimension for one kernel session.
pub type Tag = u32;

/// `(dimension, tag)` pair identifying one entity in the kernel model.
/// NEVER persisted. Valid only for the kernel session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DimTag {
    pub dim: Dim,
    pub tag: Tag,
}

impl DimTag {
    pub fn new(dim: Dim, tag: Tag) -> Self {
        Self { dim, tag }
    }

    pub fn volume(tag: Tag) -> Self {
        Self::new(Dim::Volume, tag)
    }

    pub fn surface(tag: Tag) -> Self {
        Self::new(Dim::Surface, tag)
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("entity not found: {0:?}")]
    EntityNotFound(DimTag),

    #[error("expected a {expected:?} entity, got {got:?}")]
    WrongDimension { expected: Dim, got: DimTag },

    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("export failed: {reason}")]
    ExportFailed { reason: String },

    #[error("mesh field error: {reason}")]
    MeshField { reason: String },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },
}

pub(crate) fn expect_dim(dt: DimTag, dim: Dim) -> Result<Tag, KernelError> {
    if dt.dim == dim {
        Ok(dt.tag)
    } else {
        Err(KernelError::WrongDimension {
            expected: dim,
            got: dt,
        })
    }
}
