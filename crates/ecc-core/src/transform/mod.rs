//! Transform models and warp matrices.
//!
//! This module provides the closed set of geometric models an ECC alignment
//! can estimate, together with the warp matrix encoding each model uses.

pub mod model;
pub mod warp;

pub use model::{TransformModel, WarpShape};
pub use warp::WarpMatrix;
