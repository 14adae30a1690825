//! # Default values
//!
//! Used as initial values of [`EditorSettings`](super::EditorSettings)
//! and [`CuttingPlaneEditor`](super::CuttingPlaneEditor).

use std::{f32::consts::PI, time::Duration};

use super::ResetPolicy;
use crate::common::HalfSpace;

/// Quiescence window before slider changes reach the plane
pub const PLANE_DELAY: Duration = Duration::from_millis(10);
/// Quiescence window before the histogram is recomputed
pub const HISTOGRAM_DELAY: Duration = Duration::from_millis(700);

/// Sliders report `<-1;1>`, one unit is half a turn
pub const ANGLE_SCALE: f32 = PI;

pub const HISTOGRAM_BINS: usize = crate::histogram::DEFAULT_BINS;

pub const RESET_POLICY: ResetPolicy = ResetPolicy::Reset;

pub const HALF_SPACE: HalfSpace = HalfSpace::Above;

pub const PLANE_COLOR: &str = "#ff0000";

pub const SHOW_INDICATOR: bool = true;
