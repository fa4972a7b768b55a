//! # SigCore
//!
//! A pure-Rust engine for reverse-engineered signature dumps: named
//! memory-scan patterns with optional class and virtual-table metadata.
//!
//! ## Supported Sources
//!
//! - **Site dumps** - `name=pattern[=source[=class=vtable_index]]`, one per line
//! - **Repo headers** - `namespace "<module>" { name = "pattern"; ... }` blocks
//! - **Hazedumper** - `config.json` / `csgo.json` offset dumps
//!
//! ## Quick Start
//!
//! ### Parsing and Merging
//!
//! ```
//! use sigcore::prelude::*;
//!
//! let compactor = NameCompactor::default();
//! let site = SourceFormat::Site.parse("client_funcs.c", "Foo=AA BB=client.dll\n", &compactor);
//! let repo = SourceFormat::Repo.parse(
//!     "function_signatures.h",
//!     "namespace \"client\" {\n  Bar = \"CC DD\";\n}\n",
//!     &compactor,
//! );
//!
//! let merged = merge_signatures(site, repo, SourceFormat::Repo.marker());
//! assert_eq!(merged.signatures.len(), 2);
//! ```
//!
//! ### Compacting Template Names
//!
//! ```
//! use sigcore::compact::{compact_brackets, BracketPair};
//!
//! let short = compact_brackets("pair<string,int>", BracketPair::Angle, 1, "[...]", 5);
//! assert_eq!(short.as_deref(), Some("pair<[...]>"));
//! ```
//!
//! ### Running the Whole Pipeline
//!
//! ```no_run
//! use sigcore::pipeline::{run_pipeline, PipelineOptions};
//! use sigcore::sources::DirectoryFetcher;
//!
//! let site = DirectoryFetcher::new("rawsigdata");
//! let repo = DirectoryFetcher::new(".");
//! let output = run_pipeline(&site, &repo, &PipelineOptions::default())?;
//! println!("{} signatures", output.signatures.len());
//! # Ok::<(), sigcore::Error>(())
//! ```

pub mod compact;
pub mod error;
pub mod formats;
pub mod merge;
pub mod paging;
pub mod pipeline;
pub mod search;
pub mod sources;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::compact::{BracketPair, NameCompactor, compact_brackets};
    pub use crate::error::{Error, Result};
    pub use crate::formats::{ClassInfo, Signature, SourceFormat};
    pub use crate::merge::{MergeResult, merge_signatures};
    pub use crate::paging::{Paging, paging};
    pub use crate::pipeline::{PipelineOptions, PipelineOutput, run_pipeline};
    pub use crate::search::{filter_signatures, matches_search};
    pub use crate::sources::{DirectoryFetcher, MemoryFetcher, ResourceFetcher};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
