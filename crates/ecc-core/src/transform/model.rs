//! Geometric transform models.
//!
//! Every per-model fact (warp shape, default warp, parameter count) is kept in
//! a single `match` per property so the table stays exhaustive.

use std::fmt;

use nalgebra::DMatrix;
use serde::Serialize;

/// Geometric model estimated by the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformModel {
    /// Translation only (2 parameters: tx, ty).
    Translation,
    /// Rotation + translation (3 parameters: theta, tx, ty).
    Euclidean,
    /// Full affine (6 parameters).
    Affine,
    /// Projective transform (8 parameters, defined up to scale).
    Homography,
}

/// Row/column shape of a warp matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarpShape {
    pub rows: usize,
    pub cols: usize,
}

impl WarpShape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Shape as a `[rows, cols]` vector.
    pub fn to_vec(&self) -> Vec<usize> {
        vec![self.rows, self.cols]
    }
}

impl fmt::Display for WarpShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl TransformModel {
    /// All supported models, in order of increasing freedom.
    pub const ALL: [TransformModel; 4] = [
        TransformModel::Translation,
        TransformModel::Euclidean,
        TransformModel::Affine,
        TransformModel::Homography,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            TransformModel::Translation => "translation",
            TransformModel::Euclidean => "euclidean",
            TransformModel::Affine => "affine",
            TransformModel::Homography => "homography",
        }
    }

    /// Look up a model by name, ignoring ASCII case.
    ///
    /// Only the four canonical names are accepted; surrounding whitespace is
    /// not stripped.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|model| model.name() == lowered)
    }

    /// Number of free parameters of the model.
    pub fn parameter_count(&self) -> usize {
        match self {
            TransformModel::Translation => 2,
            TransformModel::Euclidean => 3,
            TransformModel::Affine => 6,
            TransformModel::Homography => 8,
        }
    }

    /// Shape the warp matrix of this model must have.
    pub fn warp_shape(&self) -> WarpShape {
        match self {
            TransformModel::Translation => WarpShape::new(2, 1),
            TransformModel::Euclidean | TransformModel::Affine => WarpShape::new(2, 3),
            TransformModel::Homography => WarpShape::new(3, 3),
        }
    }

    /// Warp used when no initial warp is supplied.
    ///
    /// Zero translation for `Translation`, `[I | 0]` for `Euclidean` and
    /// `Affine`, and the 3x3 identity for `Homography`.
    pub fn default_warp(&self) -> DMatrix<f64> {
        let shape = self.warp_shape();
        match self {
            TransformModel::Translation => DMatrix::zeros(shape.rows, shape.cols),
            TransformModel::Euclidean | TransformModel::Affine | TransformModel::Homography => {
                DMatrix::identity(shape.rows, shape.cols)
            }
        }
    }
}

impl fmt::Display for TransformModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
