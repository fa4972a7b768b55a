//! Signature dump formats
//!
//! Two independently maintained dumps describe the same game modules:
//!
//! - [`site`]: one `name=pattern=...` file per module, with provenance and
//!   class metadata
//! - [`repo`]: a single header of `namespace "<module>" { ... }` blocks
//!
//! [`SourceFormat`] selects the parser for a resource so callers can treat
//! both the same way. [`hazedumper`] holds the JSON offset dumps shown next
//! to the signature list.

pub mod hazedumper;
pub mod repo;
pub mod site;
mod types;

pub use types::{ClassInfo, Signature};

use serde::{Deserialize, Serialize};

use crate::compact::NameCompactor;

/// The layout of a signature dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Per-module `name=pattern[=source[=class=index]]` lines
    Site,
    /// `namespace "<module>" { name = "pattern"; }` blocks
    Repo,
}

impl SourceFormat {
    /// Parse one resource of this format.
    ///
    /// `resource` names the fetched file. Site dumps derive the module
    /// name from it; repo headers carry module names inline.
    #[must_use]
    pub fn parse(self, resource: &str, text: &str, compactor: &NameCompactor) -> Vec<Signature> {
        match self {
            SourceFormat::Site => {
                site::parse_file(&site::file_name_from_resource(resource), text, compactor)
            }
            SourceFormat::Repo => repo::parse_file(text, compactor),
        }
    }

    /// Literal stored in `Signature::source` for merged-in records.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            SourceFormat::Site => "site",
            SourceFormat::Repo => repo::SOURCE_MARKER,
        }
    }

    /// Get display name for UI
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            SourceFormat::Site => "Site dump",
            SourceFormat::Repo => "Repo header",
        }
    }
}
