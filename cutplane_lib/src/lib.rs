//! Cutting plane for volume exploration
//!
//! Keeps orientation of a plane driven by two rotation sliders and a
//! translation slider, splits volume voxels by the plane and bins the
//! visible ones into a histogram.
//!
//! # Example
//! ```
//! use cutplane_lib::{
//!     common::HalfSpace,
//!     editor::{CuttingPlaneEditor, Slider},
//!     volumetric::LinearGrid,
//! };
//! use nalgebra::vector;
//! use std::sync::Arc;
//!
//! let grid = LinearGrid::new(vector![2, 2, 2], (1..=8).map(|v| v as f32).collect()).unwrap();
//!
//! let mut editor = CuttingPlaneEditor::default();
//! editor.set_volume(Arc::new(grid));
//! editor.slider_event(Slider::Translate, -0.25);
//! editor.set_half_space(HalfSpace::Above);
//!
//! assert_eq!(editor.visible_voxels(), Some(vec![5.0, 6.0, 7.0, 8.0]));
//! ```

pub mod classify;
pub mod color;
pub mod common;
pub mod editor;
pub mod error;
pub mod histogram;
pub mod orientation;
pub mod test_helpers;
pub mod transfer;
pub mod volumetric;

pub use classify::{classify, classify_par};
pub use common::{HalfSpace, Plane, PlaneIndicator};
pub use editor::{CuttingPlaneEditor, EditorFront};
pub use histogram::Histogram;
pub use orientation::{Axis, OrientationAccumulator};
pub use transfer::IsoLayers;
