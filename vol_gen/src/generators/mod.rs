use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::{vector, Vector3};
use rayon::prelude::*;
use tracing::info;

use crate::{
    config::{Config, GeneratorConfig},
    file::open_create_file,
    header::{write_header, write_samples},
};

mod gradient;
mod shapes;
mod solid;

pub use gradient::GradientGenerator;
pub use shapes::ShapesGenerator;
pub use solid::SolidGenerator;

// Generates one sample at a time, at any location
pub trait SampleGenerator: Sync {
    fn sample_at(&self, coords: Vector3<u32>) -> u16;
}

pub fn get_sample_generator(config: &Config) -> Box<dyn SampleGenerator> {
    let dims = config.dims.map(u32::from);
    match config.generator {
        GeneratorConfig::Shapes {
            n_of_shapes,
            sample,
            obj_size,
        } => Box::new(ShapesGenerator::new(
            dims,
            n_of_shapes,
            sample,
            obj_size,
            config.seed,
        )),
        GeneratorConfig::Solid { sample } => {
            Box::new(SolidGenerator::new(dims, sample, solid::PAD))
        }
        GeneratorConfig::Gradient { axis } => Box::new(GradientGenerator::new(dims, axis)),
    }
}

/// Samples in linear order, `x` growing fastest.
/// Z-slices are generated in parallel.
pub fn generate_samples(
    sg: &dyn SampleGenerator,
    dims: Vector3<u16>,
    progress: &ProgressBar,
) -> Vec<u16> {
    let dims = dims.map(u32::from);

    let slices: Vec<Vec<u16>> = (0..dims.z)
        .into_par_iter()
        .map(|z| {
            let mut slice = Vec::with_capacity((dims.x * dims.y) as usize);
            for y in 0..dims.y {
                for x in 0..dims.x {
                    slice.push(sg.sample_at(vector![x, y, z]));
                }
            }
            progress.inc(1);
            slice
        })
        .collect();

    slices.concat()
}

pub fn generate_vol(config: &Config) -> Result<()> {
    let gen = get_sample_generator(config);

    let progress = ProgressBar::new(config.dims.z as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} slices"),
    );

    let samples = generate_samples(gen.as_ref(), config.dims, &progress);
    progress.finish_and_clear();

    let file = open_create_file(&config.file_name)
        .with_context(|| format!("cannot create {:?}", config.file_name))?;
    let mut writer = BufWriter::new(file);
    write_header(&mut writer, config.dims)?;
    write_samples(&mut writer, &samples)?;
    writer.flush()?;

    info!(file = ?config.file_name, samples = samples.len(), "Generating finished");
    Ok(())
}

#[cfg(test)]
mod test {

    use super::*;

    struct IndexGenerator;

    impl SampleGenerator for IndexGenerator {
        fn sample_at(&self, coords: Vector3<u32>) -> u16 {
            (coords.x + 10 * coords.y + 100 * coords.z) as u16
        }
    }

    #[test]
    fn linear_order() {
        let samples = generate_samples(&IndexGenerator, vector![2, 3, 2], &ProgressBar::hidden());

        #[rustfmt::skip]
        let expected = vec![
            0, 1, 10, 11, 20, 21,
            // next slice
            100, 101, 110, 111, 120, 121,
        ];
        assert_eq!(samples, expected);
    }

    #[test]
    fn written_volume_loads() {
        let path = std::env::temp_dir().join(format!("vol_gen_{}.dat", std::process::id()));
        let config = Config {
            dims: vector![12, 12, 12],
            generator: GeneratorConfig::Solid { sample: 1000 },
            file_name: path.clone().into_os_string(),
            seed: None,
        };

        generate_vol(&config).unwrap();
        let grid = cutplane_lib::volumetric::load_dat(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        use cutplane_lib::volumetric::VoxelGrid;
        assert_eq!(grid.get_size(), vector![12, 12, 12]);
        assert_eq!(grid.get_data(0, 0, 0), Some(0.0));
        assert_eq!(grid.get_data(6, 6, 6), Some(1.0));
    }
}
