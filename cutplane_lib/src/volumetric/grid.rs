use nalgebra::{vector, Point3, Vector3};

use crate::{common::ValueRange, error::VolumeError};

/// Coordinate of voxel `index` on an axis of `len` voxels, in `<-0.5;0.5)`
#[inline]
pub fn normalized_coord(index: usize, len: usize) -> f32 {
    index as f32 / len as f32 - 0.5
}

/// Read-only regular grid of scalar samples.
///
/// Samples are stored linearly, `x` is the fastest growing axis.
pub trait VoxelGrid {
    /// Dimensions in voxels (width, height, depth)
    fn get_size(&self) -> Vector3<usize>;

    /// All samples, index of voxel `(x,y,z)` is `x + y*width + z*width*height`
    fn get_samples(&self) -> &[f32];

    fn get_index(&self, x: usize, y: usize, z: usize) -> usize {
        let size = self.get_size();
        x + y * size.x + z * size.x * size.y
    }

    /// Sample at integer coordinates, `None` if outside
    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        let size = self.get_size();
        if x >= size.x || y >= size.y || z >= size.z {
            return None;
        }
        self.get_samples().get(self.get_index(x, y, z)).copied()
    }

    /// Position of voxel inside the unit cube centered at origin.
    /// Each axis spans `<-0.5;0.5)` regardless of aspect ratio.
    fn normalized_position(&self, x: usize, y: usize, z: usize) -> Point3<f32> {
        let size = self.get_size();
        Point3::new(
            normalized_coord(x, size.x),
            normalized_coord(y, size.y),
            normalized_coord(z, size.z),
        )
    }

    fn voxel_count(&self) -> usize {
        let size = self.get_size();
        size.x * size.y * size.z
    }

    /// Largest of the three dimensions
    fn max_dim(&self) -> usize {
        let size = self.get_size();
        size.x.max(size.y).max(size.z)
    }

    /// Extent of every axis relative to the largest one
    fn scale(&self) -> Vector3<f32> {
        let max = self.max_dim() as f32;
        self.get_size().map(|v| v as f32 / max)
    }
}

/// Check that `len` samples fill a grid of `size`
pub fn validate_dims(size: Vector3<usize>, len: usize) -> Result<(), VolumeError> {
    if size.iter().any(|&d| d == 0) {
        return Err(VolumeError::ZeroDimension(size));
    }
    let expected = size.x * size.y * size.z;
    if expected != len {
        return Err(VolumeError::LengthMismatch {
            dims: size,
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Grid owning its samples
#[derive(Clone, PartialEq)]
pub struct LinearGrid {
    size: Vector3<usize>,
    data: Vec<f32>,
    range: ValueRange,
}

impl std::fmt::Debug for LinearGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearGrid")
            .field("size", &self.size)
            .field("range", &self.range)
            .field("data len", &self.data.len())
            .finish()
    }
}

impl LinearGrid {
    pub fn new(size: Vector3<usize>, data: Vec<f32>) -> Result<LinearGrid, VolumeError> {
        validate_dims(size, data.len())?;
        let range = ValueRange::from_samples(data.iter().copied());
        Ok(LinearGrid { size, data, range })
    }

    /// Grid from width, height and depth
    pub fn from_dims(
        width: usize,
        height: usize,
        depth: usize,
        data: Vec<f32>,
    ) -> Result<LinearGrid, VolumeError> {
        LinearGrid::new(vector![width, height, depth], data)
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn depth(&self) -> usize {
        self.size.z
    }

    /// Smallest and largest sample
    pub fn value_range(&self) -> ValueRange {
        self.range
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.data
    }
}

impl VoxelGrid for LinearGrid {
    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn get_samples(&self) -> &[f32] {
        &self.data
    }
}

/// Borrowed samples with dimensions, for callers owning the data elsewhere
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    size: Vector3<usize>,
    data: &'a [f32],
}

impl<'a> GridView<'a> {
    pub fn new(size: Vector3<usize>, data: &'a [f32]) -> Result<GridView<'a>, VolumeError> {
        validate_dims(size, data.len())?;
        Ok(GridView { size, data })
    }
}

impl VoxelGrid for GridView<'_> {
    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn get_samples(&self) -> &[f32] {
        self.data
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;
    use crate::test_helpers::counting_grid;

    #[test]
    fn x_grows_fastest() {
        let grid = counting_grid(vector![2, 3, 4]);

        assert_eq!(grid.get_data(1, 0, 0), Some(1.0));
        assert_eq!(grid.get_data(0, 1, 0), Some(2.0));
        assert_eq!(grid.get_data(0, 0, 1), Some(6.0));
        assert_eq!(grid.get_data(1, 2, 3), Some(23.0));
        assert_eq!(grid.get_data(2, 0, 0), None);
        assert_eq!(grid.get_data(0, 0, 4), None);
    }

    #[test]
    fn rejects_bad_length() {
        let res = LinearGrid::from_dims(2, 2, 2, vec![0.0; 7]);
        assert_eq!(
            res,
            Err(VolumeError::LengthMismatch {
                dims: vector![2, 2, 2],
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn rejects_zero_dimension() {
        let res = LinearGrid::from_dims(0, 2, 2, vec![]);
        assert_eq!(res, Err(VolumeError::ZeroDimension(vector![0, 2, 2])));
    }

    #[test]
    fn normalized_positions() {
        let grid = counting_grid(vector![2, 4, 1]);

        assert_eq!(grid.normalized_position(0, 0, 0), point![-0.5, -0.5, -0.5]);
        assert_eq!(grid.normalized_position(1, 3, 0), point![0.0, 0.25, -0.5]);
    }

    #[test]
    fn scale_and_range() {
        let grid = counting_grid(vector![8, 4, 2]);

        assert_eq!(grid.max_dim(), 8);
        assert_eq!(grid.scale(), vector![1.0, 0.5, 0.25]);
        assert_eq!(grid.value_range(), ValueRange::new(0.0, 63.0));
        assert_eq!(grid.voxel_count(), 64);
    }

    #[test]
    fn view_matches_owned() {
        let grid = counting_grid(vector![3, 2, 2]);
        let view = GridView::new(grid.get_size(), grid.get_samples()).unwrap();

        assert_eq!(view.get_data(2, 1, 1), grid.get_data(2, 1, 1));
        assert!(GridView::new(vector![3, 3, 3], grid.get_samples()).is_err());
    }
}
