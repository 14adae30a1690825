//! Half-space voxel classification
//!
//! Every voxel is placed into the unit cube centered at origin,
//! `(x/width - 0.5, y/height - 0.5, z/depth - 0.5)`, and kept when its signed
//! distance `normal . position` lies strictly on the selected side of `offset`.
//! Voxels exactly on the plane are dropped from both sides.
//!
//! Output order is the linear scan order, `z` outer, `y` middle, `x` inner.

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::{
    common::{HalfSpace, Plane},
    error::VolumeError,
    volumetric::{normalized_coord, GridView, VoxelGrid},
};

/// Normalized coordinates along one axis
fn axis_coords(len: usize) -> Vec<f32> {
    (0..len).map(|i| normalized_coord(i, len)).collect()
}

/// Precomputed per-axis coordinates of a grid
struct Coords {
    x: Vec<f32>,
    y: Vec<f32>,
    z: Vec<f32>,
}

impl Coords {
    fn new(size: Vector3<usize>) -> Coords {
        Coords {
            x: axis_coords(size.x),
            y: axis_coords(size.y),
            z: axis_coords(size.z),
        }
    }
}

/// Visit one z-slice, pushing kept samples into `out`
#[inline]
fn scan_slice(
    samples: &[f32],
    coords: &Coords,
    z: usize,
    normal: &Vector3<f32>,
    offset: f32,
    side: HalfSpace,
    out: &mut Vec<f32>,
) {
    let width = coords.x.len();
    let height = coords.y.len();
    let slice_base = z * width * height;
    let pz = coords.z[z];

    for (y, &py) in coords.y.iter().enumerate() {
        let row = &samples[slice_base + y * width..slice_base + (y + 1) * width];
        for (&px, &value) in coords.x.iter().zip(row) {
            let distance = normal.x * px + normal.y * py + normal.z * pz;
            if side.contains(distance, offset) {
                out.push(value);
            }
        }
    }
}

/// Samples of `grid` on the `side` of the plane.
///
/// `normal` is used as given, callers keep it unit length.
pub fn classify_raw<G>(grid: &G, normal: &Vector3<f32>, offset: f32, side: HalfSpace) -> Vec<f32>
where
    G: VoxelGrid + ?Sized,
{
    let size = grid.get_size();
    let samples = grid.get_samples();
    let coords = Coords::new(size);

    let mut out = Vec::new();
    for z in 0..size.z {
        scan_slice(samples, &coords, z, normal, offset, side, &mut out);
    }
    out
}

/// Samples of `grid` visible with the cutting `plane`
pub fn classify<G>(grid: &G, plane: &Plane, side: HalfSpace) -> Vec<f32>
where
    G: VoxelGrid + ?Sized,
{
    classify_raw(grid, &plane.normal, plane.offset, side)
}

/// Slice-level entry point, checks that `voxels` fill `dims`.
pub fn classify_slice(
    voxels: &[f32],
    dims: Vector3<usize>,
    normal: &Vector3<f32>,
    offset: f32,
    keep_above: bool,
) -> Result<Vec<f32>, VolumeError> {
    let view = GridView::new(dims, voxels)?;
    Ok(classify_raw(
        &view,
        normal,
        offset,
        HalfSpace::from_keep_above(keep_above),
    ))
}

/// Same result as [`classify`], z-slices are scanned in parallel
pub fn classify_par<G>(grid: &G, plane: &Plane, side: HalfSpace) -> Vec<f32>
where
    G: VoxelGrid + Sync + ?Sized,
{
    let size = grid.get_size();
    let samples = grid.get_samples();
    let coords = Coords::new(size);
    let normal = plane.normal.into_inner();

    let slices: Vec<Vec<f32>> = (0..size.z)
        .into_par_iter()
        .map(|z| {
            let mut out = Vec::new();
            scan_slice(samples, &coords, z, &normal, plane.offset, side, &mut out);
            out
        })
        .collect();

    slices.concat()
}

/// Number of voxels on the `side` of the plane, no allocation of samples
pub fn count_visible<G>(grid: &G, plane: &Plane, side: HalfSpace) -> usize
where
    G: VoxelGrid + ?Sized,
{
    let size = grid.get_size();
    let coords = Coords::new(size);
    let normal = plane.normal;

    let mut n = 0;
    for &pz in &coords.z {
        for &py in &coords.y {
            for &px in &coords.x {
                let distance = normal.x * px + normal.y * py + normal.z * pz;
                if side.contains(distance, plane.offset) {
                    n += 1;
                }
            }
        }
    }
    n
}
