mod plane;
mod value_range;

pub use plane::{reference_normal, HalfSpace, Plane, PlaneIndicator};
pub use value_range::ValueRange;
