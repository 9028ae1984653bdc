//! Configuration record and its builders.
//!
//! A [`Configuration`] is assembled once by [`build`] (or the typed
//! [`ConfigurationBuilder`]) and never mutated afterwards. Construction is a
//! single validate-then-assemble pass:
//!
//! 1. validate the five leading arguments;
//! 2. if manual initialization is on, consume one tail argument as the
//!    initial warp, otherwise use the model's default warp;
//! 3. if feature initialization is on, consume three tail arguments as the
//!    image points, template points and initialization method.
//!
//! Surplus tail arguments are ignored.

use ecc_core::{PointSet, TransformModel, WarpMatrix};
use nalgebra::DMatrix;
use serde::Serialize;

use crate::args::{ArgValue, TailCursor};
use crate::error::{ConfigError, Result};
use crate::init::{parse_manual_init, FeatureInit, InitMethod, FEATURE_INIT_ARITY, MANUAL_INIT_ARITY};
use crate::multires::PyramidSchedule;
use crate::validation::{validate_count, validate_flag, validate_levels, validate_transform};

/// Number of required leading arguments.
pub const LEADING_ARITY: usize = 5;

/// Non-fatal condition recorded while building a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The bottom-right entry of a supplied homography was rewritten to 1.
    HomographyNormalized { original: f64 },
}

/// Validated settings for one multi-level ECC alignment run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    levels: usize,
    iterations: usize,
    transform: TransformModel,
    initial_warp: WarpMatrix,
    parameter_count: usize,
    manual_init: bool,
    feature_init: Option<FeatureInit>,
    notices: Vec<Notice>,
}

impl Configuration {
    /// Number of pyramid levels.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Iterations per pyramid level.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn transform(&self) -> TransformModel {
        self.transform
    }

    pub fn initial_warp(&self) -> &WarpMatrix {
        &self.initial_warp
    }

    /// Number of free parameters of the transform model.
    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    /// Whether the initial warp was supplied rather than defaulted.
    pub fn is_manual_init(&self) -> bool {
        self.manual_init
    }

    pub fn feature_init(&self) -> Option<&FeatureInit> {
        self.feature_init.as_ref()
    }

    pub fn image_points(&self) -> Option<&PointSet> {
        self.feature_init.as_ref().map(FeatureInit::image_points)
    }

    pub fn template_points(&self) -> Option<&PointSet> {
        self.feature_init.as_ref().map(FeatureInit::template_points)
    }

    pub fn init_method(&self) -> Option<InitMethod> {
        self.feature_init.as_ref().map(FeatureInit::method)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Coarse-to-fine schedule for the optimizer.
    pub fn schedule(&self) -> PyramidSchedule {
        PyramidSchedule::new(self.levels, self.iterations)
    }
}

/// Build a configuration from positional arguments.
///
/// `tail` holds the mode-dependent arguments: one for manual initialization
/// followed by three for feature initialization, each block present only when
/// its flag is set.
pub fn build(
    levels: &ArgValue,
    iterations: &ArgValue,
    transform: &ArgValue,
    manual_init: &ArgValue,
    feature_init: &ArgValue,
    tail: &[ArgValue],
) -> Result<Configuration> {
    let levels = validate_levels(levels)?;
    let iterations = validate_count("iterations", iterations)?;
    let transform = validate_transform(transform)?;
    let manual = validate_flag("manual initialization flag", manual_init)?;
    let feature = validate_flag("feature initialization flag", feature_init)?;

    tracing::debug!(
        "Building {} configuration: levels={}, iterations={}, manual={}, feature={}",
        transform,
        levels,
        iterations,
        manual,
        feature
    );

    let mut cursor = TailCursor::new(tail);
    let mut notices = Vec::new();

    let initial_warp = if manual {
        let args = cursor.take("manual initialization", MANUAL_INIT_ARITY)?;
        let (warp, notice) = parse_manual_init(transform, args)?;
        notices.extend(notice);
        warp
    } else {
        WarpMatrix::identity(transform)
    };

    let feature_init = if feature {
        let args = cursor.take("feature initialization", FEATURE_INIT_ARITY)?;
        Some(FeatureInit::parse(args)?)
    } else {
        None
    };

    if cursor.remaining() > 0 {
        tracing::debug!("Ignoring {} surplus tail argument(s)", cursor.remaining());
    }

    Ok(Configuration {
        levels,
        iterations,
        transform,
        initial_warp,
        parameter_count: transform.parameter_count(),
        manual_init: manual,
        feature_init,
        notices,
    })
}

/// Build a configuration from the full argument list.
///
/// The first [`LEADING_ARITY`] arguments are `levels`, `iterations`,
/// `transform`, the manual-initialization flag and the feature-initialization
/// flag; the rest is the tail passed to [`build`].
pub fn build_from_args(args: &[ArgValue]) -> Result<Configuration> {
    if args.len() < LEADING_ARITY {
        return Err(ConfigError::arity("configuration", LEADING_ARITY, args.len()));
    }
    let (leading, tail) = args.split_at(LEADING_ARITY);
    build(&leading[0], &leading[1], &leading[2], &leading[3], &leading[4], tail)
}

/// Typed front end to [`build`].
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    levels: usize,
    iterations: usize,
    transform: TransformModel,
    initial_warp: Option<DMatrix<f64>>,
    feature_init: Option<(DMatrix<f64>, DMatrix<f64>, String)>,
}

impl ConfigurationBuilder {
    /// Create a builder with default warp and no feature initialization.
    pub fn new(levels: usize, iterations: usize, transform: TransformModel) -> Self {
        Self {
            levels,
            iterations,
            transform,
            initial_warp: None,
            feature_init: None,
        }
    }

    /// Supply the initial warp.
    pub fn with_initial_warp(mut self, warp: DMatrix<f64>) -> Self {
        self.initial_warp = Some(warp);
        self
    }

    /// Request feature-based initialization from point correspondences.
    pub fn with_feature_init(
        mut self,
        image_points: DMatrix<f64>,
        template_points: DMatrix<f64>,
        method: impl Into<String>,
    ) -> Self {
        self.feature_init = Some((image_points, template_points, method.into()));
        self
    }

    /// Validate and assemble the configuration.
    pub fn build(self) -> Result<Configuration> {
        let mut args = vec![
            ArgValue::from(self.levels),
            ArgValue::from(self.iterations),
            ArgValue::from(self.transform.name()),
            ArgValue::from(self.initial_warp.is_some()),
            ArgValue::from(self.feature_init.is_some()),
        ];
        if let Some(warp) = self.initial_warp {
            args.push(ArgValue::Matrix(warp));
        }
        if let Some((image, template, method)) = self.feature_init {
            args.push(ArgValue::Matrix(image));
            args.push(ArgValue::Matrix(template));
            args.push(ArgValue::Text(method));
        }
        build_from_args(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let config = build_from_args(&vec![
            4.into(),
            30.into(),
            "affine".into(),
            false.into(),
            false.into(),
        ])
        .unwrap();

        assert_eq!(config.levels(), 4);
        assert_eq!(config.iterations(), 30);
        assert_eq!(config.transform(), TransformModel::Affine);
        assert_eq!(config.parameter_count(), 6);
        assert_eq!(config.initial_warp().matrix(), &TransformModel::Affine.default_warp());
        assert!(!config.is_manual_init());
        assert!(config.feature_init().is_none());
        assert!(config.notices().is_empty());
    }

    #[test]
    fn test_leading_arity() {
        let err = build_from_args(&vec![4.into(), 30.into(), "affine".into()]).unwrap_err();
        assert_eq!(err, ConfigError::arity("configuration", 5, 3));
    }

    #[test]
    fn test_manual_init_requires_tail() {
        let err = build_from_args(&vec![
            2.into(),
            10.into(),
            "translation".into(),
            true.into(),
            false.into(),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::arity("manual initialization", 1, 0));
    }

    #[test]
    fn test_feature_init_after_manual() {
        let warp = DMatrix::from_column_slice(2, 1, &[1.0, 2.0]);
        let pts = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 1.0]);
        let config = build_from_args(&vec![
            3.into(),
            15.into(),
            "TRANSLATION".into(),
            1.into(),
            1.into(),
            warp.clone().into(),
            pts.clone().into(),
            pts.into(),
            "ls".into(),
        ])
        .unwrap();

        assert_eq!(config.initial_warp().matrix(), &warp);
        assert!(config.is_manual_init());
        assert_eq!(config.init_method(), Some(InitMethod::LeastSquares));
        assert_eq!(config.image_points().map(PointSet::len), Some(2));
    }

    #[test]
    fn test_builder_matches_positional() {
        let from_builder = ConfigurationBuilder::new(2, 20, TransformModel::Euclidean)
            .build()
            .unwrap();
        let positional = build(
            &2.into(),
            &20.into(),
            &"euclidean".into(),
            &false.into(),
            &false.into(),
            &[],
        )
        .unwrap();
        assert_eq!(from_builder, positional);
    }

    #[test]
    fn test_oversized_counts_rejected() {
        let err = build_from_args(&vec![
            1e19.into(),
            1.into(),
            "affine".into(),
            false.into(),
            false.into(),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = ConfigurationBuilder::new((1 << 53) + 1, 10, TransformModel::Affine)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_deepest_schedule_is_usable() {
        let config = ConfigurationBuilder::new(
            crate::validation::MAX_LEVELS,
            crate::validation::MAX_COUNT,
            TransformModel::Translation,
        )
        .build()
        .unwrap();
        let schedule = config.schedule();
        assert_eq!(schedule.len(), crate::validation::MAX_LEVELS);
        assert_eq!(schedule.finest().unwrap().shrink_factor, 1);
        assert!(schedule.total_iterations().is_some());
    }

    #[test]
    fn test_schedule_follows_levels() {
        let config = ConfigurationBuilder::new(3, 25, TransformModel::Homography)
            .build()
            .unwrap();
        let schedule = config.schedule();
        assert_eq!(schedule.len(), 3);
        assert!(schedule.levels().iter().all(|l| l.iterations == 25));
    }
}
