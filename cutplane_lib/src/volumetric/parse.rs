//! Parser of `.dat` volumes
//!
//! Layout, all values little-endian `u16`:
//! 1. width, height, depth
//! 2. `width * height * depth` samples, `x` growing fastest
//!
//! Samples are usually 12-bit, the parser normalizes them into `<0;1>`
//! by the largest sample found.

use nalgebra::{vector, Vector3};
use nom::{multi::count, number::complete::le_u16, sequence::tuple, IResult};
use tracing::{debug, warn};

use super::{grid::validate_dims, DataSource, LinearGrid};
use crate::error::VolumeError;

pub const HEADER_LEN: usize = 3 * 2;

fn dat_header(s: &[u8]) -> IResult<&[u8], Vector3<usize>> {
    let (rest, (w, h, d)) = tuple((le_u16, le_u16, le_u16))(s)?;
    Ok((rest, vector![w as usize, h as usize, d as usize]))
}

/// Read only the dimensions
pub fn dat_dims(slice: &[u8]) -> Result<Vector3<usize>, VolumeError> {
    let (_rest, size) = dat_header(slice).map_err(|_| VolumeError::Header)?;
    Ok(size)
}

/// Parse header and samples, samples stay raw
pub fn dat_raw(slice: &[u8]) -> Result<(Vector3<usize>, Vec<u16>), VolumeError> {
    let (rest, size) = dat_header(slice).map_err(|_| VolumeError::Header)?;
    let n = size.x * size.y * size.z;
    validate_dims(size, n)?;

    let available = rest.len() / 2;
    if available < n {
        return Err(VolumeError::LengthMismatch {
            dims: size,
            expected: n,
            actual: available,
        });
    }
    if available > n {
        warn!(extra = available - n, "Ignoring trailing samples");
    }

    let parse_res: IResult<_, _> = count(le_u16, n)(rest);
    let (_rest, samples) = parse_res.map_err(|_| VolumeError::Header)?;
    Ok((size, samples))
}

/// Parse `.dat` volume, normalizing samples into `<0;1>`
pub fn dat_parser(data_source: &DataSource) -> Result<LinearGrid, VolumeError> {
    let (size, samples) = dat_raw(data_source.get_slice())?;

    let max = samples.iter().copied().max().unwrap_or(0);
    debug!(?size, max, "Parsed dat volume");

    let data: Vec<f32> = if max == 0 {
        vec![0.0; samples.len()]
    } else {
        let max = max as f32;
        samples.iter().map(|&s| s as f32 / max).collect()
    };

    LinearGrid::new(size, data)
}

/// Serialize samples into `.dat` layout.
/// Inverse of [`dat_raw`].
pub fn dat_bytes(size: Vector3<u16>, samples: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + 2 * samples.len());
    for v in size.iter().chain(samples.iter()) {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;
    use crate::volumetric::VoxelGrid;

    #[test]
    fn parse_small_volume() {
        let bytes = dat_bytes(vector![2, 1, 2], &[0, 1000, 2000, 4000]);
        let ds = DataSource::from_vec(bytes);

        let grid = dat_parser(&ds).unwrap();

        assert_eq!(grid.get_size(), vector![2, 1, 2]);
        assert_eq!(grid.get_samples(), &[0.0, 0.25, 0.5, 1.0]);
    }

    #[test]
    fn zero_volume_stays_zero() {
        let bytes = dat_bytes(vector![1, 1, 3], &[0, 0, 0]);
        let grid = dat_parser(&DataSource::from_vec(bytes)).unwrap();
        assert_eq!(grid.get_samples(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn missing_samples() {
        let bytes = dat_bytes(vector![2, 2, 2], &[1, 2, 3]);
        let res = dat_parser(&DataSource::from_vec(bytes));
        assert_eq!(
            res.unwrap_err(),
            VolumeError::LengthMismatch {
                dims: vector![2, 2, 2],
                expected: 8,
                actual: 3
            }
        );
    }

    #[test]
    fn trailing_samples_ignored() {
        let bytes = dat_bytes(vector![1, 1, 2], &[5, 10, 99, 99]);
        let (size, samples) = dat_raw(&bytes).unwrap();
        assert_eq!(size, vector![1, 1, 2]);
        assert_eq!(samples, vec![5, 10]);
    }

    #[test]
    fn short_header() {
        assert_eq!(dat_dims(&[1, 0, 2]), Err(VolumeError::Header));
        assert_eq!(dat_dims(&[4, 0, 2, 0, 1, 0]), Ok(vector![4, 2, 1]));
    }

    #[test]
    fn zero_dimension_in_header() {
        let bytes = dat_bytes(vector![0, 4, 4], &[]);
        assert_eq!(
            dat_raw(&bytes).unwrap_err(),
            VolumeError::ZeroDimension(vector![0, 4, 4])
        );
    }
}
