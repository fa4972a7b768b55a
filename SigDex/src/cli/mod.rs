//! SigDex CLI - Command-line interface for merged signature dumps

pub mod commands;
pub mod progress;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::{Settings, SignatureSet, Toolkit};

#[derive(Parser)]
#[command(name = "sigdex")]
#[command(about = "SigDex: merged CS:GO signature dumps", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/sigdex/sigdex.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress spinners
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

impl GlobalArgs {
    /// Settings from `--config`, the default location, or defaults
    pub fn settings(&self) -> anyhow::Result<Settings> {
        Settings::load_or_default(self.config.as_deref()).with_context(|| match &self.config {
            Some(path) => format!("Failed to load settings from {}", path.display()),
            None => "Failed to load settings".to_string(),
        })
    }

    /// Run the pipeline behind a spinner
    pub fn load_signatures(&self, settings: Settings) -> anyhow::Result<SignatureSet> {
        let started = Instant::now();
        let pb = progress::spinner("Loading signature dumps...", self.quiet);

        let toolkit = Toolkit::new(settings);
        let result = toolkit.load();
        pb.finish_and_clear();

        let set = result.context("Failed to load signature dumps")?;
        if !self.quiet {
            progress::print_done(started.elapsed());
        }
        Ok(set)
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the SigDex CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let global = GlobalArgs {
        config: cli.config,
        quiet: cli.quiet,
    };
    cli.command.execute(&global)?;

    Ok(())
}
