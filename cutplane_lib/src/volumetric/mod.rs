//! Volume data, loading and access

mod data_source;
mod grid;
pub mod parse;

pub use data_source::DataSource;
pub use grid::{normalized_coord, validate_dims, GridView, LinearGrid, VoxelGrid};

use std::path::Path;

use tracing::info;

use crate::error::VolumeError;

/// Signature of volume parsers
pub type ParserFn = fn(&DataSource) -> Result<LinearGrid, VolumeError>;

/// Load volume from file using `parser`
pub fn from_file<P>(path: P, parser: ParserFn) -> Result<LinearGrid, VolumeError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let ds = DataSource::from_file(path)?;
    let grid = from_data_source(&ds, parser)?;
    info!(path = %path.display(), size = ?grid.get_size(), "Volume loaded");
    Ok(grid)
}

pub fn from_data_source(ds: &DataSource, parser: ParserFn) -> Result<LinearGrid, VolumeError> {
    parser(ds)
}

/// Load `.dat` volume
pub fn load_dat<P>(path: P) -> Result<LinearGrid, VolumeError>
where
    P: AsRef<Path>,
{
    from_file(path, parse::dat_parser)
}
