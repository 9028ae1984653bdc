use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ecc_registration::{build_from_args, ArgValue, Configuration, TransformModel};
use tracing::info;

mod matrix;

use matrix::parse_matrix;

#[derive(Parser)]
#[command(name = "ecc-config")]
#[command(about = "Build and validate ECC image-alignment configurations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate arguments and print the resulting configuration as JSON
    Build {
        /// Number of pyramid levels
        #[arg(short, long, default_value_t = 1.0)]
        levels: f64,

        /// Iterations per pyramid level
        #[arg(short, long, default_value_t = 50.0)]
        iterations: f64,

        /// Transform model (translation, euclidean, affine, homography)
        #[arg(short, long, default_value = "affine")]
        transform: String,

        /// Initial warp, rows separated by ';' (e.g. "1,0,0;0,1,0")
        #[arg(long, allow_hyphen_values = true)]
        init_warp: Option<String>,

        /// Image points as a 2xM matrix (x row; y row)
        #[arg(long, allow_hyphen_values = true, requires_all = ["template_points", "init_method"])]
        image_points: Option<String>,

        /// Template points as a 2xM matrix (x row; y row)
        #[arg(long, allow_hyphen_values = true, requires_all = ["image_points", "init_method"])]
        template_points: Option<String>,

        /// Feature initialization method (LS or RANSAC)
        #[arg(long, requires_all = ["image_points", "template_points"])]
        init_method: Option<String>,

        /// Include the coarse-to-fine pyramid schedule in the output
        #[arg(long)]
        schedule: bool,
    },

    /// List supported transform models
    Models,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            levels,
            iterations,
            transform,
            init_warp,
            image_points,
            template_points,
            init_method,
            schedule,
        } => {
            let mut args = vec![
                ArgValue::Scalar(levels),
                ArgValue::Scalar(iterations),
                ArgValue::Text(transform),
                ArgValue::Bool(init_warp.is_some()),
                ArgValue::Bool(image_points.is_some()),
            ];
            if let Some(warp) = init_warp {
                let warp = parse_matrix(&warp).context("Failed to parse --init-warp")?;
                args.push(ArgValue::Matrix(warp));
            }
            if let (Some(image), Some(template), Some(method)) =
                (image_points, template_points, init_method)
            {
                let image = parse_matrix(&image).context("Failed to parse --image-points")?;
                let template =
                    parse_matrix(&template).context("Failed to parse --template-points")?;
                args.push(ArgValue::Matrix(image));
                args.push(ArgValue::Matrix(template));
                args.push(ArgValue::Text(method));
            }

            let config = build_from_args(&args)?;
            print_configuration(&config, schedule)?;
        }
        Commands::Models => {
            list_models();
        }
    }

    Ok(())
}

fn print_configuration(config: &Configuration, with_schedule: bool) -> Result<()> {
    info!(
        "Built {} configuration with {} parameter(s)",
        config.transform(),
        config.parameter_count()
    );

    let output = if with_schedule {
        serde_json::json!({
            "configuration": config,
            "schedule": config.schedule(),
        })
    } else {
        serde_json::to_value(config)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn list_models() {
    println!("Supported transform models:");
    println!();
    for model in TransformModel::ALL {
        let default: Vec<String> = model
            .default_warp()
            .row_iter()
            .map(|row| {
                row.iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();
        println!(
            "  {:<12} parameters: {}  warp: {}  default: {}",
            model.name(),
            model.parameter_count(),
            model.warp_shape(),
            default.join(";")
        );
    }
}
