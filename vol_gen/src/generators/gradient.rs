use nalgebra::Vector3;

use crate::args::MAX_SAMPLE;

use super::SampleGenerator;

/// Samples grow linearly along one axis, from 0 to [`MAX_SAMPLE`]
pub struct GradientGenerator {
    axis: usize,
    len: u32,
}

impl GradientGenerator {
    pub fn new(dims: Vector3<u32>, axis: usize) -> GradientGenerator {
        GradientGenerator {
            axis,
            len: dims[axis],
        }
    }
}

impl SampleGenerator for GradientGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        if self.len <= 1 {
            return MAX_SAMPLE;
        }
        let t = coords[self.axis] as f32 / (self.len - 1) as f32;
        (t * MAX_SAMPLE as f32).round() as u16
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn ramp_along_axis() {
        let gen = GradientGenerator::new(vector![3, 4, 5], 2);

        assert_eq!(gen.sample_at(vector![2, 3, 0]), 0);
        assert_eq!(gen.sample_at(vector![0, 0, 4]), MAX_SAMPLE);
        assert_eq!(gen.sample_at(vector![1, 1, 2]), 2048);
    }

    #[test]
    fn flat_axis() {
        let gen = GradientGenerator::new(vector![3, 1, 5], 1);
        assert_eq!(gen.sample_at(vector![0, 0, 0]), MAX_SAMPLE);
    }
}
