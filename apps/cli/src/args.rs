use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "workout-tracker", version)]
#[command(about = "Load workout history into a local store and chart it")]
pub struct CliArgs {
    /// Settings file; defaults to <data-dir>/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the store and the default settings file
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store every new workout from an exported workout list
    Ingest(IngestArgs),
    /// Serve the dashboard on 127.0.0.1
    Serve(ServeArgs),
    /// Write the dashboard to a static HTML file
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Exported workout list, or `-` for stdin
    #[arg(long, short, value_name = "FILE|-")]
    pub input: String,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the configured port for this run only
    #[arg(long)]
    pub port: Option<u16>,

    /// Do not open the browser automatically
    #[arg(long)]
    pub no_open: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[arg(long, short, value_name = "FILE")]
    pub output: PathBuf,
}
