use skin_kernel::{DimTag, Kernel};
use tracing::{debug, warn};

use crate::types::GenError;

/// Create one box per magnet.
///
/// Each entry is `[xmin, ymin, zmin, xmax, ymax, zmax]` in absolute
/// coordinates. Entries with any other number of values are skipped.
pub fn create_magnet_boxes<B: AsRef<[f64]>>(
    kernel: &mut dyn Kernel,
    magnet_boxes: &[B],
) -> Result<Vec<DimTag>, GenError> {
    let mut tags = Vec::with_capacity(magnet_boxes.len());
    for (i, b) in magnet_boxes.iter().enumerate() {
        let &[x, y, z, x_max, y_max, z_max] = b.as_ref() else {
            warn!(index = i, len = b.as_ref().len(), "skipping magnet box without 6 coordinates");
            continue;
        };
        let tag = kernel.add_box(x, y, z, x_max - x, y_max - y, z_max - z)?;
        tags.push(DimTag::volume(tag));
    }
    kernel.synchronize()?;
    debug!(count = tags.len(), "magnet boxes created");
    Ok(tags)
}
