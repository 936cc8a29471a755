// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! hddsmsg - inspect ROS message types and convert JSON payloads.
//!
//! # Usage
//!
//! ```bash
//! # Show the fields of a message or service type
//! hddsmsg show geometry_msgs/PoseStamped
//! hddsmsg show std_srvs/SetBool --service
//!
//! # Print a default instance as JSON
//! hddsmsg template sensor_msgs/Imu -p /opt/ros/noetic/share
//!
//! # Validate and normalize a JSON payload
//! echo '{"linear": {"x": 0.5}}' | hddsmsg convert geometry_msgs/Twist --compact
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use hdds_msgconv::{ConverterConfig, MessageConverter, TypeDescriptor};
use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hddsmsg")]
#[command(about = "Inspect ROS message types and convert JSON payloads")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra package root, searched first (repeatable)
    #[arg(short = 'p', long = "package-path", global = true, value_name = "DIR")]
    package_paths: Vec<PathBuf>,

    /// Ignore ROS_PACKAGE_PATH
    #[arg(long, global = true)]
    no_ros_package_path: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show fields and constants of a type
    Show {
        /// Type name (package/Type)
        type_name: String,

        /// Treat the name as a service type
        #[arg(long)]
        service: bool,
    },

    /// Print a default instance of a message type as JSON
    Template {
        /// Type name (package/Type)
        type_name: String,
    },

    /// Read a JSON payload, convert it to the type and print it back
    Convert {
        /// Type name (package/Type)
        type_name: String,

        /// Input JSON file (stdin if omitted)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("package roots: {:?}", config.search_roots());
    let converter = config
        .build_converter()
        .context("failed to build message converter")?;

    match cli.command {
        Commands::Show { type_name, service } => cmd_show(&converter, &type_name, service),
        Commands::Template { type_name } => cmd_template(&converter, &type_name),
        Commands::Convert {
            type_name,
            input,
            compact,
        } => cmd_convert(&converter, &type_name, input.as_deref(), compact),
    }
}

/// Config file (or environment defaults), then command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<ConverterConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ConverterConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            config.apply_env();
            config
        }
        None => ConverterConfig::from_env(),
    };

    for path in &cli.package_paths {
        config.add_package_path(path);
    }
    if cli.no_ros_package_path {
        config.use_ros_package_path = false;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.to_lowercase();
    }
    config.validate()?;
    Ok(config)
}

fn cmd_show(converter: &MessageConverter, type_name: &str, service: bool) -> anyhow::Result<()> {
    if service {
        let srv = converter.resolve_service_type(type_name)?;
        println!("# {}", srv.name());
        print!("{}", render_descriptor(srv.request()));
        println!("---");
        print!("{}", render_descriptor(srv.response()));
    } else {
        let desc = converter.resolve_message_type(type_name)?;
        println!("# {}", desc.name());
        print!("{}", render_descriptor(&desc));
    }
    Ok(())
}

fn cmd_template(converter: &MessageConverter, type_name: &str) -> anyhow::Result<()> {
    let record = converter.registry().instantiate(type_name)?;
    println!("{}", serde_json::to_string_pretty(&converter.serialize(&record))?);
    Ok(())
}

fn cmd_convert(
    converter: &MessageConverter,
    type_name: &str,
    input: Option<&Path>,
    compact: bool,
) -> anyhow::Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    let payload: serde_json::Value = serde_json::from_str(&text).context("input is not valid JSON")?;

    let record = converter.deserialize(&payload, type_name)?;
    info!("converted payload into {}", record.type_name());

    let output = converter.serialize(&record);
    let rendered = if compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{}", rendered);
    Ok(())
}

/// Definition-style listing: constants first, then fields.
fn render_descriptor(desc: &TypeDescriptor) -> String {
    let mut out = String::new();
    for constant in desc.constants() {
        let _ = writeln!(out, "{} {}={}", constant.type_string, constant.name, constant.value);
    }
    for field in desc.fields() {
        let _ = writeln!(out, "{} {}", field.type_string, field.name);
    }
    out
}
