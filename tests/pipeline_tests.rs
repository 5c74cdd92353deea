//! End-to-end properties of the scale pipeline, exercised without HTTP:
//! load (from a constructed scene) → normalize → scale → serialize →
//! re-load.

mod support;

use doorscale::asset::ReferenceAsset;
use doorscale::dims::{DimensionLimits, RawDimensions, TargetDimensions};
use doorscale::io::glb;
use doorscale::Transformable;
use support::panel_scene;

fn target(hf: f64, hi: f64, wf: f64, wi: f64) -> TargetDimensions {
    TargetDimensions::from_feet_inches(
        &RawDimensions {
            height_ft: hf,
            height_in: hi,
            width_ft: wf,
            width_in: wi,
        },
        &DimensionLimits::default(),
    )
    .unwrap()
}

#[test]
fn normalization_grounds_the_reference() {
    let asset = ReferenceAsset::from_scene(panel_scene(0.9, 2.0, 0.04)).unwrap();
    let aabb = asset.scene().bounding_box();

    assert!(aabb.mins.y.abs() < 1e-9);
    assert!((aabb.mins.x + aabb.maxs.x).abs() < 1e-9);
    assert!((aabb.mins.z + aabb.maxs.z).abs() < 1e-9);
}

#[test]
fn documented_scenario_hits_the_expected_factors() {
    // reference 2.0 m tall, 0.9 m wide; target 6 ft 8 in by 2 ft 6 in
    let asset = ReferenceAsset::from_scene(panel_scene(0.9, 2.0, 0.04)).unwrap();
    let dims = target(6.0, 8.0, 2.0, 6.0);
    let (_, factors) = asset.scaled(&dims);

    let round4 = |v: f64| (v * 10_000.0).round() / 10_000.0;
    assert_eq!(round4(factors.sy), 1.0160);
    assert_eq!(round4(factors.sx), 0.8467);
    assert_eq!(round4(factors.sz), 0.8467);
}

#[test]
fn scaling_twice_is_bit_identical() {
    let asset = ReferenceAsset::from_scene(panel_scene(0.9, 2.0, 0.04)).unwrap();
    let dims = target(6.0, 8.0, 2.0, 6.0);

    let (scene_a, factors_a) = asset.scaled(&dims);
    let (scene_b, factors_b) = asset.scaled(&dims);

    assert_eq!(factors_a, factors_b);
    assert_eq!(scene_a.parts.len(), scene_b.parts.len());
    for (pa, pb) in scene_a.parts.iter().zip(&scene_b.parts) {
        assert_eq!(pa.polygons.len(), pb.polygons.len());
        for (qa, qb) in pa.polygons.iter().zip(&pb.polygons) {
            for (va, vb) in qa.vertices.iter().zip(&qb.vertices) {
                assert_eq!(va.pos, vb.pos);
                assert_eq!(va.normal, vb.normal);
            }
        }
    }
}

#[test]
fn repeated_scaling_never_touches_the_reference() {
    let asset = ReferenceAsset::from_scene(panel_scene(0.9, 2.0, 0.04)).unwrap();
    let before = asset.scene().bounding_box();
    let size_before = *asset.size();

    for inches in 1..6 {
        let dims = target(6.0, inches as f64, 2.0, 6.0);
        let (scaled, _) = asset.scaled(&dims);
        // the copy really is scaled
        assert!((scaled.size().y - dims.height_m()).abs() < 1e-9);
    }

    let after = asset.scene().bounding_box();
    assert_eq!(before.mins, after.mins);
    assert_eq!(before.maxs, after.maxs);
    assert_eq!(size_before, *asset.size());
}

#[test]
fn glb_round_trip_reproduces_target_dimensions() {
    let asset = ReferenceAsset::from_scene(panel_scene(0.9, 2.0, 0.04)).unwrap();
    let dims = target(6.0, 8.0, 2.0, 6.0);
    let (scaled, _) = asset.scaled(&dims);

    let buffer = glb::to_glb(&scaled, "door").unwrap();
    let reloaded = glb::from_glb(&buffer).unwrap();
    let size = reloaded.size();

    // within a millimeter after the f64 -> f32 -> f64 trip
    assert!((size.y - 2.0320).abs() < 1e-3);
    assert!((size.x - 0.7620).abs() < 1e-3);

    // materials survive the trip
    assert_eq!(reloaded.materials.len(), 1);
    assert_eq!(reloaded.materials[0].name.as_deref(), Some("oak"));
}

#[test]
fn scaled_copy_keeps_standing_on_the_floor() {
    let asset = ReferenceAsset::from_scene(panel_scene(0.9, 2.0, 0.04)).unwrap();
    let (scaled, _) = asset.scaled(&target(7.0, 0.0, 3.0, 0.0));
    let aabb = scaled.bounding_box();

    assert!(aabb.mins.y.abs() < 1e-9);
    assert!((aabb.mins.x + aabb.maxs.x).abs() < 1e-9);
}

#[test]
fn depth_follows_width_not_height() {
    let asset = ReferenceAsset::from_scene(panel_scene(0.9, 2.0, 0.04)).unwrap();
    let dims = target(6.0, 8.0, 2.0, 6.0);
    let (scaled, factors) = asset.scaled(&dims);

    let expected_depth = 0.04 * factors.sx;
    assert!((scaled.size().z - expected_depth).abs() < 1e-9);
    assert_ne!(factors.sx, factors.sy);
}
