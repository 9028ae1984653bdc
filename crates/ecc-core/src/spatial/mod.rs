//! Spatial types for point correspondences.
//!
//! Points are plain nalgebra points; point sets keep the 2xM column layout
//! used for correspondence lists.

pub mod point_set;

pub use point_set::PointSet;

use nalgebra::DMatrix;
use serde::ser::{SerializeSeq, Serializer};

/// A point in the image plane.
pub type Point2 = nalgebra::Point2<f64>;

/// Serialize a matrix as a list of rows.
pub(crate) fn serialize_rows<S: Serializer>(
    matrix: &DMatrix<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(matrix.nrows()))?;
    for row in matrix.row_iter() {
        let values: Vec<f64> = row.iter().copied().collect();
        seq.serialize_element(&values)?;
    }
    seq.end()
}
