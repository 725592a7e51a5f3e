use skin_kernel::{Dim, DimTag, Kernel};
use tracing::{debug, instrument};

use crate::types::{require_positive, GenError};

/// Create the slab: a `length × width` rectangle centered on the origin in
/// the XY plane, extruded along +z by `height`.
///
/// Returns the volume. An extrusion that yields no volume is an error.
#[instrument(skip(kernel))]
pub fn create_base_box(
    kernel: &mut dyn Kernel,
    length: f64,
    width: f64,
    height: f64,
) -> Result<DimTag, GenError> {
    require_positive("length", length)?;
    require_positive("width", width)?;

    let x_half = length / 2.0;
    let y_half = width / 2.0;

    let p1 = kernel.add_point(x_half, y_half, 0.0)?;
    let p2 = kernel.add_point(-x_half, y_half, 0.0)?;
    let p3 = kernel.add_point(-x_half, -y_half, 0.0)?;
    let p4 = kernel.add_point(x_half, -y_half, 0.0)?;

    let l1 = kernel.add_line(p1, p2)?;
    let l2 = kernel.add_line(p2, p3)?;
    let l3 = kernel.add_line(p3, p4)?;
    let l4 = kernel.add_line(p4, p1)?;

    let wire = kernel.add_wire(&[l1, l2, l3, l4])?;
    let surf = kernel.add_plane_surface(&[wire])?;

    let extruded = kernel.extrude(&[DimTag::surface(surf)], 0.0, 0.0, height)?;
    let vol = extruded
        .into_iter()
        .find(|dt| dt.dim == Dim::Volume)
        .ok_or(GenError::ExtrusionWithoutVolume)?;

    kernel.synchronize()?;
    debug!(?vol, "base volume created");
    Ok(vol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skin_kernel::MockKernel;

    #[test]
    fn test_base_box_spans_slab() {
        let mut kernel = MockKernel::new();
        let vol = create_base_box(&mut kernel, 40.0, 20.0, 3.0).unwrap();
        assert_eq!(
            kernel.bounding_box(vol).unwrap(),
            [-20.0, -10.0, 0.0, 20.0, 10.0, 3.0]
        );
        assert_eq!(kernel.entities(Dim::Volume), vec![vol]);
        assert!((kernel.volume(vol.tag).unwrap() - 2400.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_height_has_no_volume() {
        let mut kernel = MockKernel::new();
        let err = create_base_box(&mut kernel, 40.0, 20.0, 0.0).unwrap_err();
        assert!(matches!(err, GenError::ExtrusionWithoutVolume));
    }

    #[test]
    fn test_degenerate_profile_rejected() {
        let mut kernel = MockKernel::new();
        let err = create_base_box(&mut kernel, 0.0, 20.0, 3.0).unwrap_err();
        assert!(matches!(err, GenError::InvalidParameter { .. }));
    }
}
