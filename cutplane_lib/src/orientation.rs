//! Accumulated orientation of the cutting plane
//!
//! Rotations come in as small per-axis increments, each one pivoting around the
//! plane's *current* local axis.

use nalgebra::{Unit, UnitQuaternion, Vector3};

use crate::common::reference_normal;

/// Rotation axis exposed to the user.
/// The third local axis is the plane normal, it only translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Axis in the plane's local coordinates
    pub fn local(&self) -> Unit<Vector3<f32>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrientationAccumulator {
    orientation: UnitQuaternion<f32>,
}

impl OrientationAccumulator {
    /// Starts at identity
    pub fn new() -> OrientationAccumulator {
        OrientationAccumulator {
            orientation: UnitQuaternion::identity(),
        }
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.orientation
    }

    /// Rotate by `delta` radians around current local `axis`.
    ///
    /// The new rotation is applied after all previous ones (left multiplication),
    /// around the axis as it is oriented now.
    pub fn apply_axis_delta(&mut self, axis: Axis, delta: f32) -> UnitQuaternion<f32> {
        if delta == 0.0 {
            return self.orientation;
        }

        let world_axis = Unit::new_normalize(self.orientation * axis.local().into_inner());
        let rotation = UnitQuaternion::from_axis_angle(&world_axis, delta);

        let mut orientation = rotation * self.orientation;
        // drift from repeated products
        orientation.renormalize();
        self.orientation = orientation;

        self.orientation
    }

    /// Reference normal rotated by current orientation
    pub fn current_normal(&self) -> Unit<Vector3<f32>> {
        Unit::new_normalize(self.orientation * reference_normal().into_inner())
    }

    pub fn reset(&mut self) {
        self.orientation = UnitQuaternion::identity();
    }
}

impl Default for OrientationAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
