use nalgebra::Vector3;

use super::SampleGenerator;

/// Empty margin around the box, in voxels
pub const PAD: u32 = 5;

/// Generate solid volume
/// All samples inside the box are the same
pub struct SolidGenerator {
    /// The sample value
    sample: u16,
    pad: u32,
    dims: Vector3<u32>,
}

impl SolidGenerator {
    pub fn new(dims: Vector3<u32>, sample: u16, pad: u32) -> SolidGenerator {
        SolidGenerator { sample, pad, dims }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        let inside = coords
            .iter()
            .zip(self.dims.iter())
            .all(|(&c, &d)| c >= self.pad && c + self.pad < d);
        if inside {
            self.sample
        } else {
            0
        }
    }
}
