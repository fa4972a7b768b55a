//! Command execution implementations

use super::{Commands, ConfigCommands};
use super::{compact, config, list, offsets, show, stats};
use crate::cli::GlobalArgs;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match self {
            Commands::List {
                query,
                page,
                page_size,
                json,
            } => list::execute(global, query.as_deref(), *page, *page_size, *json),
            Commands::Show { name, json } => show::execute(global, name, *json),
            Commands::Compact {
                text,
                depth,
                min,
                placeholder,
                pair,
            } => compact::execute(global, text, *depth, *min, placeholder.as_deref(), *pair),
            Commands::Stats { json } => stats::execute(global, *json),
            Commands::Offsets { query } => offsets::execute(global, query.as_deref()),
            Commands::Config { command } => command.execute(global),
        }
    }
}

impl ConfigCommands {
    /// Execute the selected settings command.
    ///
    /// # Errors
    /// Returns an error if the settings file cannot be read or written.
    pub fn execute(&self, global: &GlobalArgs) -> anyhow::Result<()> {
        match self {
            ConfigCommands::Init { path, force } => config::init(global, path.as_deref(), *force),
            ConfigCommands::Show => config::show(global),
        }
    }
}
