pub mod spatial;
pub mod transform;

pub use spatial::{Point2, PointSet};
pub use transform::{TransformModel, WarpMatrix, WarpShape};
