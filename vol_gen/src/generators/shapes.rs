use std::ops::RangeBounds;

use nalgebra::{vector, Vector3};

use crate::args::MAX_SAMPLE;

use super::SampleGenerator;

/// Generate volume with a number of randomly placed shapes
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    pub fn new(
        dims: Vector3<u32>,
        n_of_shapes: usize,
        sample: u16,
        obj_size: u32,
        seed: Option<u64>,
    ) -> ShapesGenerator {
        let size = vector![obj_size, obj_size, obj_size];
        let variance = size / 5;
        let random_shape_gen =
            ShapeInfoGenerator::new(dims, size, variance, sample, sample / 20, seed);
        let shapes = random_shape_gen.get_shapes(n_of_shapes);
        ShapesGenerator { shapes }
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, coords: Vector3<u32>) -> u16 {
        // Earlier shapes are on top
        for shape in &self.shapes {
            if shape.contains(coords) {
                let offset = coords - shape.position_low;
                let sample = shape.render_at(offset);
                if sample != 0 {
                    return sample;
                }
            }
        }
        0
    }
}

// # of enum ShapeType variants
const N_OF_SHAPE_KINDS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Cuboid,
    Sphere,
}

/// One shape in volume, occupies box `<position_low;position_high>`
#[derive(Debug, Clone)]
pub struct ShapeInfo {
    pub position_low: Vector3<u32>,
    pub position_high: Vector3<u32>,
    pub shape_type: ShapeType,
    pub sample: u16,
}

impl ShapeInfo {
    #[must_use]
    pub fn new(
        position_low: Vector3<u32>,
        position_high: Vector3<u32>,
        shape_type: ShapeType,
        sample: u16,
    ) -> Self {
        Self {
            position_low,
            position_high,
            shape_type,
            sample,
        }
    }

    fn contains(&self, coords: Vector3<u32>) -> bool {
        (0..3).all(|i| coords[i] >= self.position_low[i] && coords[i] <= self.position_high[i])
    }

    fn render_at(&self, offset: Vector3<u32>) -> u16 {
        match self.shape_type {
            ShapeType::Cuboid => self.sample,
            ShapeType::Sphere => self.render_sphere(offset),
        }
    }

    fn render_sphere(&self, offset: Vector3<u32>) -> u16 {
        let offset_f = offset.map(|v| v as f32);
        let extent = (self.position_high - self.position_low).map(|v| v as f32);

        let center = extent / 2.0;
        let r = extent.x / 2.0;

        if (offset_f - center).magnitude() <= r {
            self.sample
        } else {
            0
        }
    }
}

/// Generate shapes
/// Helper type
pub struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<u32>,
    size: Vector3<u32>,
    size_variance: Vector3<u32>,
    sample: u16,
    sample_variance: u16,
}

impl ShapeInfoGenerator {
    #[must_use]
    pub fn new(
        vol_dims: Vector3<u32>,
        size: Vector3<u32>,
        size_variance: Vector3<u32>,
        sample: u16,
        sample_variance: u16,
        seed: Option<u64>,
    ) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        Self {
            rng,
            vol_dims,
            size,
            size_variance,
            sample,
            sample_variance,
        }
    }

    fn random_shape(&self) -> ShapeType {
        match self.rng.u8(0..N_OF_SHAPE_KINDS) {
            0 => ShapeType::Cuboid,
            _ => ShapeType::Sphere,
        }
    }

    fn random_vector<R>(&self, ranges: [R; 3]) -> Vector3<u32>
    where
        R: RangeBounds<u32>,
    {
        let [x, y, z] = ranges;
        vector![self.rng.u32(x), self.rng.u32(y), self.rng.u32(z)]
    }

    pub fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    pub fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        // Shapes never exceed the volume
        let max_size = self.vol_dims.map(|d| d.saturating_sub(1));
        let size_min = self
            .size
            .zip_map(&self.size_variance, |s, v| s - v.min(s));
        let size_max = self.size + self.size_variance;
        let size_ranges =
            [0, 1, 2].map(|i| size_min[i].min(max_size[i])..=size_max[i].min(max_size[i]));
        let mut size = self.random_vector(size_ranges);
        if shape_type == ShapeType::Sphere {
            // Spheres use the x extent in every direction
            size = max_size.map(|m| size.x.min(m));
        }

        // Spawn shape in positions it fits
        let pos_ranges = [0, 1, 2].map(|i| 0..=(max_size[i] - size[i]));
        let position_low = self.random_vector(pos_ranges);

        let position_high = position_low + size;

        let sample = self.random_sample();

        ShapeInfo::new(position_low, position_high, shape_type, sample)
    }

    fn random_sample(&self) -> u16 {
        // Saturating, so there is no overflow
        let low = self.sample.saturating_sub(self.sample_variance);
        let high = self.sample.saturating_add(self.sample_variance).min(MAX_SAMPLE);
        self.rng.u16(low..=high)
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn generator(seed: u64) -> ShapeInfoGenerator {
        ShapeInfoGenerator::new(
            vector![40, 30, 20],
            vector![8, 8, 8],
            vector![2, 2, 2],
            1000,
            50,
            Some(seed),
        )
    }

    #[test]
    fn shapes_fit_in_volume() {
        let gen = generator(3);
        for shape in gen.get_shapes(50) {
            assert!(shape.position_high.x < 40);
            assert!(shape.position_high.y < 30);
            assert!(shape.position_high.z < 20);
            assert!((950..=1050).contains(&shape.sample));
        }
    }

    #[test]
    fn seed_replicates_shapes() {
        let a = generator(42).get_shapes(5);
        let b = generator(42).get_shapes(5);
        for (a, b) in a.iter().zip(b.iter()) {
            assert_eq!(a.position_low, b.position_low);
            assert_eq!(a.shape_type, b.shape_type);
            assert_eq!(a.sample, b.sample);
        }
    }

    #[test]
    fn sphere_is_round() {
        let sphere = ShapeInfo::new(vector![0, 0, 0], vector![10, 10, 10], ShapeType::Sphere, 9);

        assert_eq!(sphere.render_at(vector![5, 5, 5]), 9);
        assert_eq!(sphere.render_at(vector![0, 0, 0]), 0);
        assert_eq!(sphere.render_at(vector![5, 5, 0]), 9);
    }

    #[test]
    fn background_is_zero() {
        let gen = ShapesGenerator {
            shapes: vec![ShapeInfo::new(
                vector![2, 2, 2],
                vector![4, 4, 4],
                ShapeType::Cuboid,
                7,
            )],
        };
        assert_eq!(gen.sample_at(vector![3, 3, 3]), 7);
        assert_eq!(gen.sample_at(vector![5, 3, 3]), 0);
    }
}
