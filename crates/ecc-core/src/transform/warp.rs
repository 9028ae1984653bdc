//! Warp matrix implementation.
//!
//! A warp matrix stores the parameters of a [`TransformModel`] in the matrix
//! layout ECC optimizers work with:
//!
//! ```text
//! translation   euclidean / affine    homography
//! | tx |        | a  b  tx |          | a  b  tx |
//! | ty |        | c  d  ty |          | c  d  ty |
//!                                     | g  h  1  |
//! ```

use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use nalgebra::{DMatrix, Matrix3};
use serde::Serialize;

use super::model::{TransformModel, WarpShape};
use crate::spatial::serialize_rows;

/// Warp matrix whose shape always matches its transform model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarpMatrix {
    model: TransformModel,
    #[serde(serialize_with = "serialize_rows")]
    matrix: DMatrix<f64>,
}

impl WarpMatrix {
    /// Wrap `matrix` as the warp of `model`.
    ///
    /// Returns `None` if the matrix shape differs from `model.warp_shape()`.
    pub fn new(model: TransformModel, matrix: DMatrix<f64>) -> Option<Self> {
        let shape = model.warp_shape();
        if matrix.shape() != (shape.rows, shape.cols) {
            return None;
        }
        Some(Self { model, matrix })
    }

    /// Default warp of `model`.
    pub fn identity(model: TransformModel) -> Self {
        Self {
            model,
            matrix: model.default_warp(),
        }
    }

    pub fn model(&self) -> TransformModel {
        self.model
    }

    pub fn shape(&self) -> WarpShape {
        WarpShape::new(self.matrix.nrows(), self.matrix.ncols())
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Consume the warp and return the raw matrix.
    pub fn into_matrix(self) -> DMatrix<f64> {
        self.matrix
    }

    /// Force the bottom-right entry of a homography to 1.
    ///
    /// Only that entry is rewritten; the rest of the matrix is left as is.
    /// Returns the previous value when a rewrite happened, `None` otherwise
    /// (including for every non-homography model).
    pub fn normalize_homography(&mut self) -> Option<f64> {
        if self.model != TransformModel::Homography {
            return None;
        }
        let corner = self.matrix[(2, 2)];
        if corner == 1.0 {
            return None;
        }
        self.matrix[(2, 2)] = 1.0;
        Some(corner)
    }

    /// Lift the warp to a 3x3 homogeneous matrix.
    pub fn to_homogeneous(&self) -> Matrix3<f64> {
        let m = &self.matrix;
        match self.model {
            TransformModel::Translation => {
                let mut h = Matrix3::identity();
                h[(0, 2)] = m[(0, 0)];
                h[(1, 2)] = m[(1, 0)];
                h
            }
            TransformModel::Euclidean | TransformModel::Affine => {
                let mut h = Matrix3::identity();
                h.fixed_view_mut::<2, 3>(0, 0).copy_from(&m.fixed_view::<2, 3>(0, 0));
                h
            }
            TransformModel::Homography => Matrix3::from_fn(|r, c| m[(r, c)]),
        }
    }

    /// Copy the warp into a tensor of the same shape.
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 2> {
        let (rows, cols) = self.matrix.shape();
        // DMatrix is column-major, tensors are row-major.
        let values: Vec<f32> = self
            .matrix
            .transpose()
            .iter()
            .map(|v| *v as f32)
            .collect();
        Tensor::<B, 2>::from_data(TensorData::new(values, [rows, cols]), device)
    }
}
