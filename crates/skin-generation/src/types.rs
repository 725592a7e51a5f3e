/// Errors from geometry generation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenError {
    #[error("kernel error: {0}")]
    Kernel(#[from] skin_kernel::KernelError),

    #[error("extrusion did not create a volume")]
    ExtrusionWithoutVolume,

    #[error("cut left no volume")]
    CutWithoutVolume,

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), GenError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GenError::InvalidParameter {
            reason: format!("{name} must be positive, got {value}"),
        })
    }
}
