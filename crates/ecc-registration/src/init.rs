//! Initialization extensions of a configuration.
//!
//! Two independent extensions can be switched on by the mode flags, each
//! consuming a fixed number of tail arguments:
//!
//! * manual initialization: one argument, the initial warp;
//! * feature initialization: three arguments, the image points, the template
//!   points and the initialization method.

use std::fmt;

use ecc_core::{PointSet, TransformModel, WarpMatrix};
use serde::Serialize;

use crate::args::ArgValue;
use crate::config::Notice;
use crate::error::{ConfigError, Result};
use crate::validation::{
    validate_init_method, validate_point_pairing, validate_point_set, validate_warp,
};

/// Tail arguments consumed by manual initialization.
pub const MANUAL_INIT_ARITY: usize = 1;

/// Tail arguments consumed by feature initialization.
pub const FEATURE_INIT_ARITY: usize = 3;

/// Method used to fit the warm-start warp to the correspondences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InitMethod {
    #[serde(rename = "LS")]
    LeastSquares,
    #[serde(rename = "RANSAC")]
    Ransac,
}

impl InitMethod {
    /// Canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InitMethod::LeastSquares => "LS",
            InitMethod::Ransac => "RANSAC",
        }
    }

    /// Look up a method by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "LS" => Some(InitMethod::LeastSquares),
            "RANSAC" => Some(InitMethod::Ransac),
            _ => None,
        }
    }
}

impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse the manual-initialization slice into a validated warp.
///
/// A homography whose bottom-right entry is not 1 has that entry rewritten to
/// 1; the rewrite is reported as a [`Notice`] rather than an error.
pub fn parse_manual_init(
    model: TransformModel,
    args: &[ArgValue],
) -> Result<(WarpMatrix, Option<Notice>)> {
    let [warp_arg] = args else {
        return Err(ConfigError::arity(
            "manual initialization",
            MANUAL_INIT_ARITY,
            args.len(),
        ));
    };

    let mut warp = validate_warp(model, warp_arg)?;
    let notice = warp.normalize_homography().map(|original| {
        tracing::warn!(
            "Homography initial warp has bottom-right entry {}; set to 1",
            original
        );
        Notice::HomographyNormalized { original }
    });

    Ok((warp, notice))
}

/// Correspondences and fitting method for a feature-based warm start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureInit {
    image_points: PointSet,
    template_points: PointSet,
    method: InitMethod,
}

impl FeatureInit {
    /// Parse the feature-initialization slice.
    ///
    /// Both point sets must be 2xM with the same M.
    pub fn parse(args: &[ArgValue]) -> Result<Self> {
        let [image, template, method] = args else {
            return Err(ConfigError::arity(
                "feature initialization",
                FEATURE_INIT_ARITY,
                args.len(),
            ));
        };

        let image_points = validate_point_set("image points", image)?;
        let template_points = validate_point_set("template points", template)?;
        validate_point_pairing(&image_points, &template_points)?;
        let method = validate_init_method(method)?;

        tracing::debug!(
            "Feature initialization: {} correspondences, method {}",
            image_points.len(),
            method
        );

        Ok(Self {
            image_points,
            template_points,
            method,
        })
    }

    pub fn image_points(&self) -> &PointSet {
        &self.image_points
    }

    pub fn template_points(&self) -> &PointSet {
        &self.template_points
    }

    pub fn method(&self) -> InitMethod {
        self.method
    }

    /// Number of correspondences.
    pub fn len(&self) -> usize {
        self.image_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn points(cols: usize) -> ArgValue {
        ArgValue::Matrix(DMatrix::from_fn(2, cols, |r, c| (r * 10 + c) as f64))
    }

    #[test]
    fn test_init_method_names() {
        assert_eq!(InitMethod::from_name("ls"), Some(InitMethod::LeastSquares));
        assert_eq!(InitMethod::from_name("LS"), Some(InitMethod::LeastSquares));
        assert_eq!(InitMethod::from_name("rAnSaC"), Some(InitMethod::Ransac));
        assert_eq!(InitMethod::from_name("lsq"), None);
        assert_eq!(InitMethod::Ransac.to_string(), "RANSAC");
    }

    #[test]
    fn test_manual_init_keeps_canonical_homography() {
        let args = [ArgValue::Matrix(DMatrix::identity(3, 3))];
        let (warp, notice) = parse_manual_init(TransformModel::Homography, &args).unwrap();
        assert_eq!(warp.matrix(), &DMatrix::identity(3, 3));
        assert!(notice.is_none());
    }

    #[test]
    fn test_manual_init_normalizes_homography() {
        let mut matrix = DMatrix::identity(3, 3);
        matrix[(2, 2)] = 2.0;
        let (warp, notice) =
            parse_manual_init(TransformModel::Homography, &[ArgValue::Matrix(matrix)]).unwrap();

        assert_eq!(warp.matrix()[(2, 2)], 1.0);
        assert_eq!(notice, Some(Notice::HomographyNormalized { original: 2.0 }));
    }

    #[test]
    fn test_manual_init_shape_error() {
        let err = parse_manual_init(
            TransformModel::Affine,
            &[ArgValue::Matrix(DMatrix::identity(3, 3))],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_manual_init_wrong_slice_length() {
        let err = parse_manual_init(TransformModel::Affine, &[]).unwrap_err();
        assert_eq!(err, ConfigError::arity("manual initialization", 1, 0));

        let two = [ArgValue::Matrix(DMatrix::identity(2, 3)), ArgValue::from(1)];
        let err = parse_manual_init(TransformModel::Affine, &two).unwrap_err();
        assert_eq!(err, ConfigError::arity("manual initialization", 1, 2));
    }

    #[test]
    fn test_feature_init_short_slice() {
        assert_eq!(
            FeatureInit::parse(&[]).unwrap_err(),
            ConfigError::arity("feature initialization", 3, 0)
        );
        assert_eq!(
            FeatureInit::parse(&[ArgValue::from("ls")]).unwrap_err(),
            ConfigError::arity("feature initialization", 3, 1)
        );
        assert_eq!(
            FeatureInit::parse(&[points(2), points(2)]).unwrap_err(),
            ConfigError::arity("feature initialization", 3, 2)
        );
    }

    #[test]
    fn test_feature_init_parses() {
        let args = [points(4), points(4), ArgValue::from("ransac")];
        let feature = FeatureInit::parse(&args).unwrap();
        assert_eq!(feature.len(), 4);
        assert_eq!(feature.method(), InitMethod::Ransac);
        assert_eq!(feature.image_points().shape(), (2, 4));
    }

    #[test]
    fn test_feature_init_count_mismatch() {
        let args = [points(4), points(3), ArgValue::from("ls")];
        let err = FeatureInit::parse(&args).unwrap_err();
        assert_eq!(
            err,
            ConfigError::shape_mismatch("template points", vec![2, 4], vec![2, 3])
        );
    }

    #[test]
    fn test_feature_init_checks_template_rows() {
        let transposed = ArgValue::Matrix(DMatrix::zeros(4, 2));
        let args = [points(2), transposed, ArgValue::from("ls")];
        let err = FeatureInit::parse(&args).unwrap_err();
        assert_eq!(
            err,
            ConfigError::shape_mismatch("template points", vec![2, 2], vec![4, 2])
        );
    }

    #[test]
    fn test_feature_init_unknown_method() {
        let args = [points(2), points(2), ArgValue::from("lmeds")];
        assert_eq!(
            FeatureInit::parse(&args).unwrap_err(),
            ConfigError::unknown_init_method("lmeds")
        );
    }
}
