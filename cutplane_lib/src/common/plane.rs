use nalgebra::{point, vector, Point3, Unit, UnitQuaternion, Vector3, Vector4};

use crate::error::PlaneError;

/// Normal of the cutting plane before any rotation.
/// Local Z axis of the plane.
pub fn reference_normal() -> Unit<Vector3<f32>> {
    Vector3::z_axis()
}

/// Selects which side of the plane stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HalfSpace {
    /// Keep points with signed distance greater than the offset
    Above,
    /// Keep points with signed distance less than the offset
    Below,
}

impl HalfSpace {
    pub fn from_keep_above(keep_above: bool) -> HalfSpace {
        if keep_above {
            HalfSpace::Above
        } else {
            HalfSpace::Below
        }
    }

    pub fn keeps_above(&self) -> bool {
        matches!(self, HalfSpace::Above)
    }

    pub fn opposite(&self) -> HalfSpace {
        match self {
            HalfSpace::Above => HalfSpace::Below,
            HalfSpace::Below => HalfSpace::Above,
        }
    }

    /// Strict comparison, points lying exactly on the plane
    /// belong to neither side.
    #[inline]
    pub fn contains(&self, distance: f32, offset: f32) -> bool {
        match self {
            HalfSpace::Above => distance > offset,
            HalfSpace::Below => distance < offset,
        }
    }

    /// Value of the `uRenderAbove` shader uniform
    pub fn uniform_flag(&self) -> f32 {
        match self {
            HalfSpace::Above => 1.0,
            HalfSpace::Below => 0.0,
        }
    }

    pub fn from_uniform_flag(flag: f32) -> HalfSpace {
        HalfSpace::from_keep_above(flag == 1.0)
    }
}

impl Default for HalfSpace {
    fn default() -> Self {
        HalfSpace::Above
    }
}

/// Cutting plane, unit normal and offset along it.
///
/// Point `p` lies on the plane when `normal . p == offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Unit<Vector3<f32>>,
    pub offset: f32,
}

impl Plane {
    pub fn new(normal: Unit<Vector3<f32>>, offset: f32) -> Plane {
        Plane { normal, offset }
    }

    /// Construct plane from arbitrary vector, renormalizing it.
    pub fn from_vector(normal: Vector3<f32>, offset: f32) -> Result<Plane, PlaneError> {
        let normal = Unit::try_new(normal, f32::EPSILON).ok_or(PlaneError::DegenerateNormal)?;
        Ok(Plane { normal, offset })
    }

    /// Inverse of [`Plane::descriptor`].
    pub fn from_descriptor(descriptor: Vector4<f32>) -> Result<Plane, PlaneError> {
        Plane::from_vector(descriptor.xyz(), -descriptor.w)
    }

    pub fn signed_distance(&self, point: &Point3<f32>) -> f32 {
        self.normal.dot(&point.coords)
    }

    /// Plane in the `Ax + By + Cz + D = 0` form,
    /// packed as `(A, B, C, D)` for a shader uniform.
    pub fn descriptor(&self) -> Vector4<f32> {
        vector![self.normal.x, self.normal.y, self.normal.z, -self.offset]
    }

    /// Closest point of the plane to origin
    pub fn origin_projection(&self) -> Point3<f32> {
        Point3::from(self.normal.into_inner() * self.offset)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::new(reference_normal(), 0.0)
    }
}

/// Square quad visualising the cutting plane.
///
/// Second consumer of [`Plane`], next to the shader descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneIndicator {
    pub center: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
    pub side: f32,
    pub visible: bool,
}

impl PlaneIndicator {
    /// Quad is larger than the volume so it stays visible around it
    pub const SIZE_FACTOR: f32 = 1.5;

    /// # Params
    /// * `plane` - plane to visualise, its normal must match `orientation`
    /// * `orientation` - rotation of the quad, local Z is the normal
    /// * `max_dim` - largest dimension of the volume
    pub fn new(
        plane: &Plane,
        orientation: UnitQuaternion<f32>,
        max_dim: usize,
        visible: bool,
    ) -> PlaneIndicator {
        PlaneIndicator {
            center: plane.origin_projection(),
            orientation,
            side: max_dim as f32 * Self::SIZE_FACTOR,
            visible,
        }
    }

    /// Corners in counter-clockwise order, seen from the normal side
    pub fn corners(&self) -> [Point3<f32>; 4] {
        let h = self.side / 2.0;
        let local = [
            point![-h, -h, 0.0],
            point![h, -h, 0.0],
            point![h, h, 0.0],
            point![-h, h, 0.0],
        ];
        local.map(|p| self.center + self.orientation * p.coords)
    }

    pub fn normal(&self) -> Unit<Vector3<f32>> {
        self.orientation * reference_normal()
    }
}
