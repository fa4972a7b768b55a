use clap::Subcommand;
use std::path::PathBuf;

use sigcore::compact::BracketPair;

pub mod compact;
pub mod config;
pub mod execute;
pub mod list;
pub mod offsets;
pub mod show;
pub mod stats;

#[derive(Subcommand)]
pub enum Commands {
    /// List merged signatures, one page at a time
    List {
        /// Only list signatures matching this text (any field, any case)
        #[arg(long)]
        query: Option<String>,

        /// Page to show (one-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Signatures per page (default from settings)
        #[arg(short = 'n', long)]
        page_size: Option<usize>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every record with this exact name
    Show {
        /// Full signature name
        name: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compact the brackets in a name
    Compact {
        /// Text to compact
        text: String,

        /// Nesting depth to compact (1 = outermost)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Minimum inner length to compact
        #[arg(short, long)]
        min: Option<usize>,

        /// Replacement text
        #[arg(long)]
        placeholder: Option<String>,

        /// Bracket pair (angle, round, curly, square)
        #[arg(long)]
        pair: Option<BracketPair>,
    },

    /// Show load counts
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show hazedumper offsets and scan patterns
    Offsets {
        /// Only show entries matching this text
        #[arg(long)]
        query: Option<String>,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Settings file commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write default settings
    Init {
        /// Where to write (default: <config dir>/sigdex/sigdex.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the settings in effect
    Show,
}
