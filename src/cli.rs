use clap::{Args, Parser, Subcommand};
use shortform::preset::PresetName;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shortform")]
#[command(author, version, about = "Batch-convert videos into vertical short-form encodes")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub batch: BatchArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for the default batch run.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory [default: input]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory, created if missing [default: output]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Video preset [default: tiktok]
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetName>,

    /// Show the encoder commands without executing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available encoding presets
    Presets,

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}
