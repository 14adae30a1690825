//! Error types of the library

use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VolumeError {
    #[error("volume dimensions must be positive, got {0:?}")]
    ZeroDimension(Vector3<usize>),
    #[error("volume {dims:?} needs {expected} samples, got {actual}")]
    LengthMismatch {
        dims: Vector3<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("cannot parse volume header")]
    Header,
    #[error("path does not lead to a file")]
    NotAFile,
    #[error("cannot open file: {0}")]
    Io(String),
    #[error("no data inside data source")]
    NoData,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlaneError {
    #[error("plane normal has zero length")]
    DegenerateNormal,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LayerError {
    #[error("maximum number of layers ({0}) reached")]
    Full(usize),
    #[error("no layers to delete")]
    Empty,
    #[error("invalid color: {0}")]
    Color(ColorErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorErrorKind {
    Length,
    Digit,
}

impl std::fmt::Display for ColorErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorErrorKind::Length => write!(f, "expected 3 or 6 hex digits"),
            ColorErrorKind::Digit => write!(f, "not a hex digit"),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    #[error("histogram needs at least one bin")]
    NoBins,
    #[error("angle scale must be finite and non-zero")]
    AngleScale,
}
