use std::sync::Arc;

use nalgebra::{UnitQuaternion, Vector4};
use tracing::{debug, info};

use super::{defaults, EditorSettings, ResetPolicy};
use crate::{
    classify,
    color::{self, RGB},
    common::{HalfSpace, Plane, PlaneIndicator, ValueRange},
    error::LayerError,
    histogram::Histogram,
    orientation::{Axis, OrientationAccumulator},
    volumetric::{LinearGrid, VoxelGrid},
};

/// Controls of the cutting plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    /// Rotation around local X, `<-1;1>`
    X,
    /// Rotation around local Y, `<-1;1>`
    Y,
    /// Translation along the normal
    Translate,
}

/// Values for the volume shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneUniforms {
    /// `uPlane`, see [`Plane::descriptor`]
    pub plane: Vector4<f32>,
    /// `uPlaneColor`
    pub color: RGB,
    /// `uRenderAbove`
    pub render_above: f32,
}

/// State of the cutting plane editor.
///
/// Owns the orientation, turns absolute slider readings into
/// rotation increments and hands the resulting plane to its consumers.
#[derive(Debug, Clone)]
pub struct CuttingPlaneEditor {
    settings: EditorSettings,
    accumulator: OrientationAccumulator,
    // last slider readings, rotations are their differences
    prev_x: f32,
    prev_y: f32,
    translation: f32,
    side: HalfSpace,
    color: RGB,
    show_indicator: bool,
    volume: Option<Arc<LinearGrid>>,
}

impl CuttingPlaneEditor {
    pub fn new(settings: EditorSettings) -> CuttingPlaneEditor {
        // Constant is known to be valid
        let color = color::parse_hex(defaults::PLANE_COLOR).unwrap_or_else(|_| color::white());
        CuttingPlaneEditor {
            settings,
            accumulator: OrientationAccumulator::new(),
            prev_x: 0.0,
            prev_y: 0.0,
            translation: 0.0,
            side: defaults::HALF_SPACE,
            color,
            show_indicator: defaults::SHOW_INDICATOR,
            volume: None,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Set a new volume.
    /// With [`ResetPolicy::Reset`] the orientation returns to identity.
    pub fn set_volume(&mut self, volume: Arc<LinearGrid>) {
        info!(size = ?volume.get_size(), policy = ?self.settings.reset_policy, "New volume");
        if self.settings.reset_policy == ResetPolicy::Reset {
            self.accumulator.reset();
        }
        self.volume = Some(volume);
    }

    pub fn volume(&self) -> Option<&Arc<LinearGrid>> {
        self.volume.as_ref()
    }

    /// Take current slider positions as the reference for the next deltas,
    /// without rotating
    pub fn sync_sliders(&mut self, x: f32, y: f32) {
        self.prev_x = x;
        self.prev_y = y;
    }

    /// Handle new slider reading.
    /// Returns `true` if the plane changed.
    pub fn slider_event(&mut self, slider: Slider, value: f32) -> bool {
        let (axis, prev) = match slider {
            Slider::X => (Axis::X, &mut self.prev_x),
            Slider::Y => (Axis::Y, &mut self.prev_y),
            Slider::Translate => {
                let changed = self.translation != value;
                self.translation = value;
                return changed;
            }
        };

        let delta = (value - *prev) * self.settings.angle_scale;
        *prev = value;

        if delta == 0.0 {
            return false;
        }

        debug!(?axis, delta, "Rotating plane");
        self.accumulator.apply_axis_delta(axis, delta);
        true
    }

    /// Rotate by an already scaled angle, bypassing slider readings
    pub fn rotate(&mut self, axis: Axis, delta: f32) {
        self.accumulator.apply_axis_delta(axis, delta);
    }

    /// Orientation back to identity, slider readings stay
    pub fn reset_orientation(&mut self) {
        self.accumulator.reset();
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.accumulator.orientation()
    }

    pub fn translation(&self) -> f32 {
        self.translation
    }

    pub fn set_half_space(&mut self, side: HalfSpace) {
        self.side = side;
    }

    pub fn half_space(&self) -> HalfSpace {
        self.side
    }

    pub fn set_color(&mut self, color: RGB) {
        self.color = color;
    }

    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), LayerError> {
        self.color = color::parse_hex(hex)?;
        Ok(())
    }

    pub fn color(&self) -> RGB {
        self.color
    }

    pub fn set_indicator_visible(&mut self, visible: bool) {
        self.show_indicator = visible;
    }

    pub fn indicator_visible(&self) -> bool {
        self.show_indicator
    }

    pub fn plane(&self) -> Plane {
        Plane::new(self.accumulator.current_normal(), self.translation)
    }

    pub fn descriptor(&self) -> Vector4<f32> {
        self.plane().descriptor()
    }

    pub fn uniforms(&self) -> PlaneUniforms {
        PlaneUniforms {
            plane: self.descriptor(),
            color: self.color,
            render_above: self.side.uniform_flag(),
        }
    }

    /// Quad sized after the current volume, `None` without volume
    pub fn indicator(&self) -> Option<PlaneIndicator> {
        let volume = self.volume.as_ref()?;
        Some(PlaneIndicator::new(
            &self.plane(),
            self.orientation(),
            volume.max_dim(),
            self.show_indicator,
        ))
    }

    /// Samples on the visible side of the plane, `None` without volume
    pub fn visible_voxels(&self) -> Option<Vec<f32>> {
        let volume = self.volume.as_ref()?;
        Some(classify::classify_par(
            volume.as_ref(),
            &self.plane(),
            self.side,
        ))
    }

    /// Histogram of visible samples, `None` without volume
    pub fn histogram(&self) -> Option<Histogram> {
        let volume = self.volume.as_ref()?;
        let domain = histogram_domain(volume.value_range());
        let visible = self.visible_voxels()?;
        Some(Histogram::from_samples(
            domain,
            self.settings.histogram_bins,
            visible,
        ))
    }
}

impl Default for CuttingPlaneEditor {
    fn default() -> Self {
        CuttingPlaneEditor::new(EditorSettings::default())
    }
}

/// Normalized volumes use `<0;1>`, anything else its own range
fn histogram_domain(range: ValueRange) -> ValueRange {
    let unit = ValueRange::unit();
    if range.is_empty() || (unit.contains(range.low) && unit.contains(range.high)) {
        unit
    } else if range.span() == 0.0 {
        ValueRange::new(range.low - 0.5, range.high + 0.5)
    } else {
        range
    }
}
