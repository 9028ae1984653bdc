//! Validation utilities for configuration arguments.
//!
//! Each function checks one argument (or one pairing of arguments) and turns
//! it into its typed form, failing fast with a [`ConfigError`] that names the
//! field.

use ecc_core::{PointSet, TransformModel, WarpMatrix};

use crate::args::ArgValue;
use crate::error::{ConfigError, Result};
use crate::init::InitMethod;

/// Largest count accepted; every whole number up to it is exact in `f64`.
pub const MAX_COUNT: usize = (1 << 53) - 1;

/// Deepest pyramid accepted; one more level would overflow the shrink factor.
pub const MAX_LEVELS: usize = usize::BITS as usize;

/// Validate a positive whole-number count such as `levels` or `iterations`.
pub fn validate_count(field: &str, value: &ArgValue) -> Result<usize> {
    let scalar = value
        .as_scalar()
        .ok_or_else(|| ConfigError::type_error(field, "a numeric scalar", value.kind()))?;

    if !scalar.is_finite() {
        return Err(ConfigError::invalid_value(
            field,
            format!("must be finite, got {}", scalar),
        ));
    }
    if scalar.fract() != 0.0 {
        return Err(ConfigError::invalid_value(
            field,
            format!("must be a whole number, got {}", scalar),
        ));
    }
    if scalar < 1.0 {
        return Err(ConfigError::invalid_value(
            field,
            format!("must be positive, got {}", scalar),
        ));
    }
    if scalar > MAX_COUNT as f64 || scalar >= usize::MAX as f64 {
        return Err(ConfigError::invalid_value(
            field,
            format!("too large: {}", scalar),
        ));
    }

    Ok(scalar as usize)
}

/// Validate the pyramid depth.
pub fn validate_levels(value: &ArgValue) -> Result<usize> {
    let levels = validate_count("levels", value)?;
    if levels > MAX_LEVELS {
        return Err(ConfigError::invalid_value(
            "levels",
            format!("at most {} supported, got {}", MAX_LEVELS, levels),
        ));
    }
    Ok(levels)
}

/// Validate a mode flag.
pub fn validate_flag(field: &str, value: &ArgValue) -> Result<bool> {
    value
        .as_flag()
        .ok_or_else(|| ConfigError::type_error(field, "a boolean-coercible scalar", value.kind()))
}

/// Validate the transform name.
pub fn validate_transform(value: &ArgValue) -> Result<TransformModel> {
    let name = value
        .as_text()
        .ok_or_else(|| ConfigError::type_error("transform", "a string", value.kind()))?;

    TransformModel::from_name(name).ok_or_else(|| ConfigError::unknown_transform(name))
}

/// Validate a candidate initial warp against the shape `model` requires.
///
/// The homography corner is not touched here.
pub fn validate_warp(model: TransformModel, value: &ArgValue) -> Result<WarpMatrix> {
    let field = format!("initial warp ({})", model);
    let matrix = value
        .as_matrix()
        .ok_or_else(|| ConfigError::type_error(field.as_str(), "a matrix", value.kind()))?;

    let expected = model.warp_shape();
    let actual = vec![matrix.nrows(), matrix.ncols()];
    WarpMatrix::new(model, matrix)
        .ok_or_else(|| ConfigError::shape_mismatch(field, expected.to_vec(), actual))
}

/// Validate one correspondence set: a matrix with exactly 2 rows.
pub fn validate_point_set(field: &str, value: &ArgValue) -> Result<PointSet> {
    let matrix = value
        .as_matrix()
        .ok_or_else(|| ConfigError::type_error(field, "a 2xM matrix", value.kind()))?;

    let (rows, cols) = matrix.shape();
    PointSet::from_matrix(matrix)
        .ok_or_else(|| ConfigError::shape_mismatch(field, vec![2, cols], vec![rows, cols]))
}

/// Validate that the template points pair up with the image points.
pub fn validate_point_pairing(image: &PointSet, template: &PointSet) -> Result<()> {
    if image.shape() != template.shape() {
        let (ir, ic) = image.shape();
        let (tr, tc) = template.shape();
        return Err(ConfigError::shape_mismatch(
            "template points",
            vec![ir, ic],
            vec![tr, tc],
        ));
    }
    Ok(())
}

/// Validate the initialization method name.
pub fn validate_init_method(value: &ArgValue) -> Result<InitMethod> {
    let name = value
        .as_text()
        .ok_or_else(|| ConfigError::type_error("initialization method", "a string", value.kind()))?;

    InitMethod::from_name(name).ok_or_else(|| ConfigError::unknown_init_method(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    #[test]
    fn test_validate_count() {
        assert_eq!(validate_count("levels", &ArgValue::from(4)), Ok(4));
        assert_eq!(validate_count("levels", &ArgValue::from(1.0)), Ok(1));
        assert!(validate_count("levels", &ArgValue::from(0)).is_err());
        assert!(validate_count("levels", &ArgValue::from(-3)).is_err());
        assert!(validate_count("levels", &ArgValue::from(2.5)).is_err());
        assert!(validate_count("levels", &ArgValue::from(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_validate_count_upper_bound() {
        assert_eq!(validate_count("iterations", &ArgValue::from(MAX_COUNT)), Ok(MAX_COUNT));
        assert!(validate_count("iterations", &ArgValue::from(2f64.powi(53))).is_err());
        assert!(validate_count("iterations", &ArgValue::from(2f64.powi(64))).is_err());
        assert!(validate_count("iterations", &ArgValue::from(1e19)).is_err());
    }

    #[test]
    fn test_validate_levels_cap() {
        assert_eq!(validate_levels(&ArgValue::from(MAX_LEVELS)), Ok(MAX_LEVELS));
        let err = validate_levels(&ArgValue::from(MAX_LEVELS + 1)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "levels"));
        assert!(validate_levels(&ArgValue::from(1e19)).is_err());
    }

    #[test]
    fn test_validate_count_rejects_non_scalars() {
        let err = validate_count("iterations", &ArgValue::Matrix(DMatrix::zeros(1, 2))).unwrap_err();
        assert!(matches!(err, ConfigError::Type { .. }));

        let err = validate_count("iterations", &ArgValue::from("30")).unwrap_err();
        assert!(matches!(err, ConfigError::Type { .. }));
    }

    #[test]
    fn test_validate_transform() {
        assert_eq!(validate_transform(&ArgValue::from("Euclidean")), Ok(TransformModel::Euclidean));
        assert_eq!(
            validate_transform(&ArgValue::from("rigid")),
            Err(ConfigError::unknown_transform("rigid"))
        );
        assert!(matches!(
            validate_transform(&ArgValue::from(1)),
            Err(ConfigError::Type { .. })
        ));
    }

    #[test]
    fn test_validate_warp_shapes() {
        let ok = validate_warp(TransformModel::Translation, &ArgValue::Matrix(DMatrix::zeros(2, 1)));
        assert!(ok.is_ok());

        let err = validate_warp(TransformModel::Euclidean, &ArgValue::Matrix(DMatrix::zeros(3, 3)))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::shape_mismatch("initial warp (euclidean)", vec![2, 3], vec![3, 3])
        );
    }

    #[test]
    fn test_validate_warp_scalar_is_one_by_one() {
        let err = validate_warp(TransformModel::Translation, &ArgValue::from(0.0)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::shape_mismatch("initial warp (translation)", vec![2, 1], vec![1, 1])
        );
    }

    #[test]
    fn test_validate_point_set_checks_rows() {
        assert!(validate_point_set("image points", &ArgValue::Matrix(DMatrix::zeros(2, 7))).is_ok());

        // A 7x2 layout is rejected even though it has two columns
        let err = validate_point_set("template points", &ArgValue::Matrix(DMatrix::zeros(7, 2)))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::shape_mismatch("template points", vec![2, 2], vec![7, 2])
        );
    }

    #[test]
    fn test_validate_point_pairing() {
        let a = PointSet::from_matrix(DMatrix::zeros(2, 4)).unwrap();
        let b = PointSet::from_matrix(DMatrix::zeros(2, 4)).unwrap();
        let c = PointSet::from_matrix(DMatrix::zeros(2, 5)).unwrap();
        assert!(validate_point_pairing(&a, &b).is_ok());
        assert!(validate_point_pairing(&a, &c).is_err());
    }

    #[test]
    fn test_validate_init_method() {
        assert_eq!(validate_init_method(&ArgValue::from("ls")), Ok(InitMethod::LeastSquares));
        assert_eq!(validate_init_method(&ArgValue::from("Ransac")), Ok(InitMethod::Ransac));
        assert_eq!(
            validate_init_method(&ArgValue::from("svd")),
            Err(ConfigError::unknown_init_method("svd"))
        );
        assert!(matches!(
            validate_init_method(&ArgValue::from(1)),
            Err(ConfigError::Type { .. })
        ));
    }
}
