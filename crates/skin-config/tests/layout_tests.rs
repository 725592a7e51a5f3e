use std::collections::BTreeMap;

use proptest::prelude::*;
use skin_config::{DesignModel, Layout, MagneticSkinConfig, Mask, SkinParameters};
use skin_types::BoxRoi;

// ── ROI properties ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn roi_extent_and_centroid(
        cx in -50.0f64..50.0,
        cy in -50.0f64..50.0,
        cz in -50.0f64..50.0,
        lx in 0.0f64..20.0,
        ly in 0.0f64..20.0,
        lz in 0.0f64..20.0,
        t in 0.0f64..2.0,
    ) {
        let b = BoxRoi::around([cx, cy, cz], [lx, ly, lz], t);
        let ext = b.extent();
        prop_assert!((ext[0] - (lx + 2.0 * t)).abs() < 1e-9);
        prop_assert!((ext[1] - (ly + 2.0 * t)).abs() < 1e-9);
        prop_assert!((ext[2] - (lz + 2.0 * t)).abs() < 1e-9);
        let c = b.centroid();
        prop_assert!((c[0] - cx).abs() < 1e-9);
        prop_assert!((c[1] - cy).abs() < 1e-9);
        prop_assert!((c[2] - cz).abs() < 1e-9);
    }

    #[test]
    fn grouping_lengths_follow_mask(bits in proptest::collection::vec(any::<bool>(), 6)) {
        let p = SkinParameters::default();
        let mask = Mask::from_rows(vec![bits[..3].to_vec(), bits[3..].to_vec()]).unwrap();
        let kept = bits.iter().filter(|b| **b).count();
        let layout = Layout::derive(&p, &mask).unwrap();

        prop_assert_eq!(layout.magnet_count(), kept);
        prop_assert_eq!(layout.rigid_objects.len(), 1 + kept);
        prop_assert_eq!(layout.index_pairs.len(), 2 + 2 * kept);
        prop_assert_eq!(layout.rigid_object_rois.len(), layout.rigid_objects.len());
        for (roi, center) in layout.rigid_object_rois.iter().zip(&layout.rigid_objects) {
            let c = roi.centroid();
            for i in 0..3 {
                prop_assert!((c[i] - center[i]).abs() < 1e-9);
            }
        }
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────────

#[test]
fn all_ones_mask_on_two_by_three_grid() {
    let cfg = MagneticSkinConfig::new().unwrap();
    let layout = cfg.layout();

    assert_eq!(layout.magnet_centers.len(), 6);
    assert_eq!(layout.magnet_rois.len(), 6);
    assert_eq!(layout.rigid_objects.len(), 7);
    assert_eq!(layout.index_pairs.len(), 14);
}

#[test]
fn document_drives_layout() {
    let params = SkinParameters::from_json_str(
        r#"{
            "grid_rows_magnets": 3,
            "grid_cols_magnets": 4,
            "mask_magnets": [[1, 1, 1, 1], [1, 0, 0, 1], [1, 1, 1, 1]],
            "grid_rows_sensors": 1,
            "grid_cols_sensors": 5
        }"#,
    )
    .unwrap();
    let cfg = MagneticSkinConfig::from_parameters(params).unwrap();
    let layout = cfg.layout();

    assert_eq!(layout.magnet_grid.len(), 12);
    assert_eq!(layout.magnet_count(), 10);
    assert_eq!(layout.sensor_centers.len(), 5);
    // A single sensor row sits on the lower inset edge.
    assert!(layout.sensor_centers.iter().all(|c| (c[1] + 5.0).abs() < 1e-9));
    // Sensor x: -15, -7.5, 0, 7.5, 15.
    assert_eq!(layout.sensor_zones, vec![1, 1, 1, 0, 0]);
}

#[test]
fn mask_shape_must_match_grid() {
    let params = SkinParameters::from_json_str(r#"{ "mask_magnets": [[1, 1], [1, 1]] }"#).unwrap();
    assert!(MagneticSkinConfig::from_parameters(params).is_err());
}

#[test]
fn layout_serializes_boxes_flat() {
    let cfg = MagneticSkinConfig::new().unwrap();
    let json = serde_json::to_value(cfg.layout()).unwrap();
    let rois = json["rigid_object_rois"].as_array().unwrap();
    assert_eq!(rois.len(), 7);
    assert_eq!(rois[0].as_array().unwrap().len(), 6);
    assert_eq!(json["index_pairs"][0], 0);
}

#[test]
fn optimizer_round_trip_through_trait_object() {
    let mut cfg = MagneticSkinConfig::new().unwrap();
    let model: &mut dyn DesignModel = &mut cfg;

    let mut values: BTreeMap<String, f64> = model
        .design_variables()
        .into_iter()
        .map(|(name, dv)| (name, dv.max))
        .collect();
    values.insert("Width".to_string(), 10.0);
    model.set_design_variables(&values).unwrap();

    let dv = model.design_variables();
    assert_eq!(dv["Length"].value, 60.0);
    assert_eq!(dv["Width"].value, 10.0);
    assert_eq!(dv["Height"].value, 5.0);
    assert_eq!(dv["MagnetSide"].value, 2.0);
    assert_eq!(cfg.layout().magnet_centers[0][2], 2.5);
}
