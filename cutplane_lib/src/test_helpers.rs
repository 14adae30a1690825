//! Module with helper functions
//! Saves repetition in unit tests and benchmarks

use nalgebra::{vector, Vector3};

use crate::volumetric::{parse::dat_bytes, DataSource, LinearGrid};

/// Grid whose samples equal their linear index
pub fn counting_grid(size: Vector3<usize>) -> LinearGrid {
    let n = size.x * size.y * size.z;
    let data = (0..n).map(|v| v as f32).collect();
    LinearGrid::new(size, data).expect("positive dimensions")
}

/// 2x2x2 grid with samples 1 to 8
pub fn eight_voxels() -> LinearGrid {
    let data = (1..=8).map(|v| v as f32).collect();
    LinearGrid::new(vector![2, 2, 2], data).expect("matching length")
}

/// In-memory `.dat` volume, sample `i` holds `i % 4096`
pub fn dat_source(size: Vector3<u16>) -> DataSource {
    let n = size.x as usize * size.y as usize * size.z as usize;
    let samples: Vec<u16> = (0..n).map(|i| (i % 4096) as u16).collect();
    DataSource::from_vec(dat_bytes(size, &samples))
}
