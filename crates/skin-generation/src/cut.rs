use skin_kernel::{Dim, DimTag, Kernel};
use tracing::debug;

use crate::types::GenError;

/// Subtract every magnet box from the base volume in one boolean operation.
///
/// With no magnet boxes the base is returned as is and the kernel is not
/// touched.
pub fn cut_magnets_from_base(
    kernel: &mut dyn Kernel,
    base: DimTag,
    magnets: &[DimTag],
) -> Result<DimTag, GenError> {
    if magnets.is_empty() {
        return Ok(base);
    }
    let out = kernel.cut(&[base], magnets)?;
    kernel.synchronize()?;
    let result = out
        .into_iter()
        .find(|dt| dt.dim == Dim::Volume)
        .ok_or(GenError::CutWithoutVolume)?;
    debug!(?result, cavities = magnets.len(), "magnet cavities cut");
    Ok(result)
}
