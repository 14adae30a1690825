use std::{path::PathBuf, sync::Arc, time::Duration};

use cutplane_lib::{
    classify,
    common::HalfSpace,
    editor::{CuttingPlaneEditor, EditorEvent, EditorFront, EditorMessage, EditorSettings, Slider},
    histogram::Histogram,
    test_helpers,
    volumetric::{self, parse::dat_bytes, VoxelGrid},
    Axis, Plane,
};
use nalgebra::vector;

pub const SIZE: [u16; 3] = [16, 12, 8];

/// Write small `.dat` volume into temp dir
fn write_volume(name: &str) -> PathBuf {
    let [w, h, d] = SIZE;
    let n = w as usize * h as usize * d as usize;
    let samples: Vec<u16> = (0..n).map(|i| (i % 4096) as u16).collect();

    let path = std::env::temp_dir().join(format!("cutplane_{}_{}.dat", name, std::process::id()));
    std::fs::write(&path, dat_bytes(vector![w, h, d], &samples)).unwrap();
    path
}

#[test]
fn load_classify_bin() {
    let path = write_volume("load");
    let grid = volumetric::load_dat(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(grid.get_size(), vector![16, 12, 8]);
    assert_eq!(grid.value_range().high, 1.0);

    let mut editor = CuttingPlaneEditor::default();
    editor.set_volume(Arc::new(grid.clone()));
    editor.slider_event(Slider::X, 0.1);
    editor.slider_event(Slider::Translate, 0.05);

    let plane = editor.plane();
    let above = classify::classify(&grid, &plane, HalfSpace::Above);
    let below = classify::classify(&grid, &plane, HalfSpace::Below);
    assert!(above.len() + below.len() <= grid.voxel_count());

    let histogram = editor.histogram().unwrap();
    assert_eq!(histogram.n_bins(), 100);
    assert_eq!(histogram.total(), above.len());
    assert_eq!(histogram, Histogram::from_samples(histogram.domain(), 100, above));
}

#[test]
fn missing_file() {
    let res = volumetric::load_dat("definitely/not/here.dat");
    assert!(res.is_err());
}

#[test]
fn in_memory_source() {
    let ds = test_helpers::dat_source(vector![4, 4, 4]);
    let grid = volumetric::from_data_source(&ds, volumetric::parse::dat_parser).unwrap();
    assert_eq!(grid.voxel_count(), 64);
    assert_eq!(grid.get_data(3, 3, 3), Some(1.0));
}

#[test]
fn editor_thread_roundtrip() {
    let settings = EditorSettings::builder()
        .plane_delay(Duration::from_millis(5))
        .histogram_delay(Duration::from_millis(20))
        .build()
        .unwrap();
    let mut front = EditorFront::new(CuttingPlaneEditor::new(settings));
    front.start();

    front.send_message(EditorMessage::SetVolume(Arc::new(test_helpers::counting_grid(
        vector![8, 8, 8],
    ))));
    front.send_message(EditorMessage::Slider(Slider::Y, 0.5));

    // wait for the rotated plane, histogram comes after it
    let mut rotated = false;
    let mut histogram_seen = false;
    while !(rotated && histogram_seen) {
        match front.receive_event_timeout(Duration::from_secs(5)) {
            Some(EditorEvent::PlaneUpdated { uniforms, indicator }) => {
                assert_eq!(indicator.unwrap().side, 12.0);
                rotated = uniforms.plane.x > 0.99;
            }
            Some(EditorEvent::HistogramUpdated(_)) => histogram_seen = rotated,
            None => panic!("editor thread went silent"),
        }
    }

    let handle = front.get_editor_handle();
    let plane: Plane = handle.lock().plane();
    assert!((plane.normal.x - 1.0).abs() < 1e-5);

    front.finish();
    assert!(!front.is_active());
}

#[test]
fn orientation_path_matters() {
    let mut a = CuttingPlaneEditor::default();
    a.rotate(Axis::X, 0.7);
    a.rotate(Axis::Y, 0.3);

    let mut b = CuttingPlaneEditor::default();
    b.rotate(Axis::Y, 0.3);
    b.rotate(Axis::X, 0.7);

    let (na, nb) = (a.plane().normal, b.plane().normal);
    assert!((na.into_inner() - nb.into_inner()).norm() > 1e-3);
}
