use std::{fs::File, path::Path};

use memmap::{Mmap, MmapOptions};

use crate::error::VolumeError;

/// Raw bytes of a volume file
pub enum DataSource {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl DataSource {
    pub fn get_slice(&self) -> &[u8] {
        match self {
            DataSource::Vec(v) => v.as_slice(),
            DataSource::Mmap(m) => &m[..],
        }
    }

    pub fn from_vec(vec: Vec<u8>) -> DataSource {
        DataSource::Vec(vec)
    }

    /// Memory map file at `path`
    pub fn from_file<P>(path: P) -> Result<DataSource, VolumeError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(VolumeError::NotAFile);
        }

        let file = File::open(path).map_err(|e| VolumeError::Io(e.to_string()))?;

        // Empty files cannot be mapped
        if file
            .metadata()
            .map_err(|e| VolumeError::Io(e.to_string()))?
            .len()
            == 0
        {
            return Err(VolumeError::NoData);
        }

        let mmap = unsafe { MmapOptions::new().map(&file) };
        let mmap = mmap.map_err(|e| VolumeError::Io(e.to_string()))?;

        Ok(DataSource::Mmap(mmap))
    }
}

impl std::fmt::Debug for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            DataSource::Vec(_) => "Vec",
            DataSource::Mmap(_) => "Mmap",
        };
        f.debug_struct("DataSource")
            .field("kind", &kind)
            .field("len", &self.get_slice().len())
            .finish()
    }
}
