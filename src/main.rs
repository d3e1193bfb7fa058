//! droid-deps - Android SDK dependency calculation and installation
//!
//! Command-line entry point: computes which SDK components a project
//! requires and installs the missing ones.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use droid_deps::commands::{CheckCommand, InstallCommand, PipelineOptions};

#[derive(Parser)]
#[command(name = "droid-deps", version, about)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct PipelineArgs {
    /// Build-property file with Key=Value lines
    #[arg(long)]
    project: Option<PathBuf>,

    /// Property override, KEY=VALUE (repeatable)
    #[arg(short = 'p', long = "property")]
    properties: Vec<String>,

    /// Android SDK root (overrides project properties and environment)
    #[arg(long)]
    sdk_root: Option<PathBuf>,

    /// Build-defaults TOML file
    #[arg(long)]
    defaults: Option<PathBuf>,
}

impl From<PipelineArgs> for PipelineOptions {
    fn from(args: PipelineArgs) -> Self {
        Self {
            project_file: args.project,
            properties: args.properties,
            sdk_root: args.sdk_root,
            defaults_file: args.defaults,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the required SDK components and whether each is installed
    Check {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Emit JSON instead of one path per line
        #[arg(long)]
        json: bool,
    },
    /// Install the missing SDK components
    Install {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Accept Android SDK licenses for the components being installed
        #[arg(long)]
        accept_licenses: bool,

        /// Per-component installer timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    match cli.command {
        Command::Check { pipeline, json } => {
            CheckCommand {
                options: pipeline.into(),
                json,
            }
            .execute()
            .await
        }
        Command::Install {
            pipeline,
            accept_licenses,
            timeout_secs,
        } => {
            InstallCommand {
                options: pipeline.into(),
                accept_licenses,
                timeout_secs,
            }
            .execute()
            .await
        }
    }
}
