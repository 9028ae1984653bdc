pub mod args;
pub mod config;
pub mod error;
pub mod init;
pub mod multires;
pub mod validation;

pub use args::{ArgValue, TailCursor};
pub use config::{build, build_from_args, Configuration, ConfigurationBuilder, Notice};
pub use error::{ConfigError, Result};
pub use init::{FeatureInit, InitMethod};
pub use multires::{PyramidLevel, PyramidSchedule};

pub use ecc_core::{Point2, PointSet, TransformModel, WarpMatrix, WarpShape};
