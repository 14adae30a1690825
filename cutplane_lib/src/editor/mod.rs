//! Cutting plane editor
//!
//! [`CuttingPlaneEditor`] holds the plane state, [`EditorFront`] runs it in
//! its own thread and debounces incoming changes.

mod cutting_plane;
pub mod defaults;
mod front;
mod settings;

pub use cutting_plane::{CuttingPlaneEditor, PlaneUniforms, Slider};
pub use front::{EditorEvent, EditorFront, EditorMessage};
pub use settings::{EditorSettings, EditorSettingsBuilder, ResetPolicy};
