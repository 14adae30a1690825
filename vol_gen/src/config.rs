use std::{ffi::OsString, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use nalgebra::{vector, Vector3};

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>>
where
    T: FromStr + Copy,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let vals = args
        .values_of(key)
        .ok_or_else(|| anyhow!("missing argument {key}"))?
        .map(|v| v.parse::<T>().with_context(|| format!("bad value {v} of {key}")))
        .collect::<Result<Vec<T>>>()?;
    if vals.len() != 3 {
        bail!("{key} needs 3 values, got {}", vals.len());
    }
    Ok(vector![vals[0], vals[1], vals[2]])
}

fn parse_value<T>(args: &ArgMatches, key: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .value_of(key)
        .ok_or_else(|| anyhow!("missing argument {key}"))?;
    raw.parse()
        .with_context(|| format!("bad value {raw} of {key}"))
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<u16>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    // Output file name
    pub file_name: OsString,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: &ArgMatches) -> Result<Config> {
        let dims = values_to_vector3(args, "dims")?;
        let generator = GeneratorConfig::from_args(args)?;
        let file_name = args
            .value_of_os("output-file")
            .ok_or_else(|| anyhow!("missing output file"))?
            .into();
        let seed = match args.value_of("seed") {
            Some(_) => Some(parse_value(args, "seed")?),
            None => None,
        };

        Ok(Config {
            dims,
            generator,
            file_name,
            seed,
        })
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorConfig {
    /// Randomly placed spheres and cuboids
    Shapes {
        n_of_shapes: usize,
        sample: u16,
        obj_size: u32,
    },
    /// Box with empty margin
    Solid { sample: u16 },
    /// Linear ramp from 0 to maximum sample along `axis`
    Gradient { axis: usize },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig> {
        let name = args
            .value_of("generator")
            .ok_or_else(|| anyhow!("missing generator"))?;

        let cfg = match name {
            "shapes" => GeneratorConfig::Shapes {
                n_of_shapes: parse_value(args, "n-of-shapes")?,
                sample: parse_value(args, "sample")?,
                obj_size: parse_value(args, "object-size")?,
            },
            "solid" => GeneratorConfig::Solid {
                sample: parse_value(args, "sample")?,
            },
            "gradient" => {
                let axis = match args.value_of("axis") {
                    Some("x") => 0,
                    Some("y") => 1,
                    _ => 2,
                };
                GeneratorConfig::Gradient { axis }
            }
            other => bail!("unknown generator {other}"),
        };
        Ok(cfg)
    }
}
