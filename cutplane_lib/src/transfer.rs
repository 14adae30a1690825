//! Iso-surface layers of the first-hit transfer function
//!
//! Up to [`MAX_LAYERS`] committed layers plus one live layer following the
//! editor cursor. The live layer always occupies the next free slot.

use nalgebra::{vector, Vector2};
use tracing::debug;

use crate::{
    color::{self, RGB, RGBA},
    error::LayerError,
};

pub const MAX_LAYERS: usize = 4;

/// Marks unused slot in uniform arrays
pub const UNUSED: f32 = -1.0;

/// Where the cursor returns after saving a layer, (iso value, opacity)
pub const CURSOR_HOME: Vector2<f32> = vector![0.5, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoLayer {
    pub iso_value: f32,
    pub opacity: f32,
    pub color: RGB,
}

impl IsoLayer {
    pub fn rgba(&self) -> RGBA {
        color::with_alpha(self.color, self.opacity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsoLayers {
    layers: Vec<IsoLayer>,
    /// (iso value, opacity) of the live layer
    cursor: Vector2<f32>,
    live_color: RGB,
}

impl IsoLayers {
    pub fn new() -> IsoLayers {
        IsoLayers {
            layers: Vec::with_capacity(MAX_LAYERS),
            cursor: CURSOR_HOME,
            live_color: color::white(),
        }
    }

    pub fn layers(&self) -> &[IsoLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.layers.len() == MAX_LAYERS
    }

    /// Move the live layer. Both coordinates are clamped into `<0;1>`.
    /// Ignored when all slots are taken.
    pub fn move_cursor(&mut self, iso_value: f32, opacity: f32) {
        if self.is_full() {
            return;
        }
        self.cursor = vector![iso_value.clamp(0.0, 1.0), opacity.clamp(0.0, 1.0)];
    }

    pub fn cursor(&self) -> Vector2<f32> {
        self.cursor
    }

    pub fn set_live_color(&mut self, color: RGB) {
        self.live_color = color;
    }

    /// Live layer, `None` when full
    pub fn live_layer(&self) -> Option<IsoLayer> {
        if self.is_full() {
            return None;
        }
        Some(IsoLayer {
            iso_value: self.cursor.x,
            opacity: self.cursor.y,
            color: self.live_color,
        })
    }

    /// Commit live layer with `color`.
    /// Cursor and live color return to their defaults.
    pub fn save_layer(&mut self, color: RGB) -> Result<&IsoLayer, LayerError> {
        if self.is_full() {
            return Err(LayerError::Full(MAX_LAYERS));
        }

        let layer = IsoLayer {
            iso_value: self.cursor.x,
            opacity: self.cursor.y,
            color,
        };
        debug!(?layer, index = self.layers.len(), "Saving iso layer");
        self.layers.push(layer);

        self.cursor = CURSOR_HOME;
        self.live_color = color::white();

        Ok(&self.layers[self.layers.len() - 1])
    }

    /// Remove the last committed layer
    pub fn delete_layer(&mut self) -> Result<IsoLayer, LayerError> {
        self.layers.pop().ok_or(LayerError::Empty)
    }

    /// Committed layers followed by the live one
    fn active(&self) -> impl Iterator<Item = IsoLayer> + '_ {
        self.layers.iter().copied().chain(self.live_layer())
    }

    /// Iso values for the shader, unused slots hold [`UNUSED`]
    pub fn iso_values(&self) -> [f32; MAX_LAYERS] {
        let mut out = [UNUSED; MAX_LAYERS];
        for (slot, layer) in out.iter_mut().zip(self.active()) {
            *slot = layer.iso_value;
        }
        out
    }

    /// Opacities for the shader, unused slots hold [`UNUSED`]
    pub fn opacities(&self) -> [f32; MAX_LAYERS] {
        let mut out = [UNUSED; MAX_LAYERS];
        for (slot, layer) in out.iter_mut().zip(self.active()) {
            *slot = layer.opacity;
        }
        out
    }

    /// Surface colors for the shader, unused slots are white
    pub fn surface_colors(&self) -> [RGB; MAX_LAYERS] {
        let mut out = [color::white(); MAX_LAYERS];
        for (slot, layer) in out.iter_mut().zip(self.active()) {
            *slot = layer.color;
        }
        out
    }

    /// Layer whose surface encloses `sample`, the one with the highest
    /// iso value not above it
    pub fn layer_at(&self, sample: f32) -> Option<IsoLayer> {
        self.active()
            .filter(|l| l.iso_value <= sample)
            .max_by(|a, b| a.iso_value.total_cmp(&b.iso_value))
    }

    /// Color of the first committed layer, in slot order, whose surface
    /// the sample reaches. This is the layer a first-hit ray stops at.
    pub fn first_hit(&self, sample: f32) -> Option<RGBA> {
        self.layers
            .iter()
            .find(|l| sample >= l.iso_value)
            .map(IsoLayer::rgba)
    }

    /// Transfer function over all active layers
    pub fn tf(&self, sample: f32) -> RGBA {
        match self.layer_at(sample) {
            Some(layer) => layer.rgba(),
            None => color::transparent(),
        }
    }
}

impl Default for IsoLayers {
    fn default() -> Self {
        Self::new()
    }
}
