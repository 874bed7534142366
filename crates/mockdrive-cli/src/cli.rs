use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mockdrive",
    about = "mockdrive — in-memory cloud-drive backend for tests",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with store settings (root_id, root_name)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Id for the root folder; overrides the config file
    #[arg(long, global = true)]
    pub root_id: Option<String>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Execute a TOML script of drive operations against a fresh store
    Run(RunArgs),
    /// Build a sample tree and show it after each operation
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
    /// Report failing steps and continue instead of stopping
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Args)]
pub struct DemoArgs {}
