//! Ordered set of 2-D points stored as a 2xM matrix.

use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use nalgebra::DMatrix;
use serde::{Serialize, Serializer};

use super::{serialize_rows, Point2};

/// Ordered 2-D points, one per column: row 0 holds x, row 1 holds y.
///
/// An empty set (2x0) is valid and distinct from "no points".
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    coords: DMatrix<f64>,
}

impl Serialize for PointSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_rows(&self.coords, serializer)
    }
}

impl PointSet {
    /// Wrap a 2xM matrix. Returns `None` if the matrix does not have 2 rows.
    pub fn from_matrix(coords: DMatrix<f64>) -> Option<Self> {
        if coords.nrows() != 2 {
            return None;
        }
        Some(Self { coords })
    }

    /// Build a point set from a slice of points.
    pub fn from_points(points: &[Point2]) -> Self {
        let coords = DMatrix::from_fn(2, points.len(), |r, c| points[c][r]);
        Self { coords }
    }

    /// Number of points (M).
    pub fn len(&self) -> usize {
        self.coords.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.ncols() == 0
    }

    /// Shape as `(2, M)`.
    pub fn shape(&self) -> (usize, usize) {
        self.coords.shape()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.coords
    }

    /// Get the `index`-th point, if any.
    pub fn point(&self, index: usize) -> Option<Point2> {
        (index < self.len()).then(|| Point2::new(self.coords[(0, index)], self.coords[(1, index)]))
    }

    pub fn iter(&self) -> impl Iterator<Item = Point2> + '_ {
        self.coords.column_iter().map(|c| Point2::new(c[0], c[1]))
    }

    /// Copy the points into a `[M, 2]` tensor, one row per point.
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 2> {
        // Column-major 2xM storage is already [x0, y0, x1, y1, ...].
        let values: Vec<f32> = self.coords.iter().map(|v| *v as f32).collect();
        Tensor::<B, 2>::from_data(TensorData::new(values, [self.len(), 2]), device)
    }
}
