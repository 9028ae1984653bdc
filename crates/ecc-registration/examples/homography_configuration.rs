//! Homography Configuration Example
//!
//! This example builds the configuration for a 3-level homography alignment
//! warm-started from a supplied warp and four point correspondences:
//!
//! 1. Supply an initial warp whose bottom-right entry is not 1
//! 2. Attach image/template correspondences for a RANSAC warm start
//! 3. Build and inspect the configuration and its pyramid schedule
//!
//! Usage:
//!   RUST_LOG=debug cargo run --example homography_configuration

use ecc_registration::{ConfigurationBuilder, TransformModel};
use nalgebra::DMatrix;

fn main() -> anyhow::Result<()> {
    println!("ECC Homography Configuration Example");
    println!("====================================\n");

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // =======================================================================
    // Step 1: Initial warp (scaled by 2, corner will be normalized)
    // =======================================================================
    let warp = DMatrix::from_row_slice(
        3,
        3,
        &[2.0, 0.0, 10.0, 0.0, 2.0, -4.0, 0.0, 0.0, 2.0],
    );

    // =======================================================================
    // Step 2: Correspondences, one point per column
    // =======================================================================
    let image_points = DMatrix::from_row_slice(
        2,
        4,
        &[10.0, 200.0, 200.0, 10.0, 10.0, 10.0, 150.0, 150.0],
    );
    let template_points = DMatrix::from_row_slice(
        2,
        4,
        &[12.0, 203.0, 198.0, 9.0, 11.0, 8.0, 152.0, 149.0],
    );

    // =======================================================================
    // Step 3: Build
    // =======================================================================
    let config = ConfigurationBuilder::new(3, 40, TransformModel::Homography)
        .with_initial_warp(warp)
        .with_feature_init(image_points, template_points, "ransac")
        .build()?;

    println!("Transform:     {}", config.transform());
    println!("Parameters:    {}", config.parameter_count());
    println!("Initial warp:  {}", config.initial_warp().matrix());
    for notice in config.notices() {
        println!("Notice:        {:?}", notice);
    }
    if let Some(feature) = config.feature_init() {
        println!("Warm start:    {} correspondences, {}", feature.len(), feature.method());
    }

    println!("\nSchedule:");
    for level in config.schedule().levels() {
        println!(
            "  level {}: shrink x{}, {} iterations",
            level.level, level.shrink_factor, level.iterations
        );
    }

    Ok(())
}
