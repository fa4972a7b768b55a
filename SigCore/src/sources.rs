//! Getting dump text into the pipeline
//!
//! The parsers only need `(resource, text)` pairs. Where the text comes
//! from is behind [`ResourceFetcher`]: a directory of downloaded dumps, or
//! an in-memory map for tests and embedding.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::formats::site::RESOURCE_SUFFIX;

/// Supplies raw dump text by resource name.
///
/// Implementations must be `Sync`: resources are fetched from a thread pool.
pub trait ResourceFetcher: Sync {
    /// Fetch the full text of `resource`.
    fn fetch(&self, resource: &str) -> Result<String>;
}

/// A fetched resource and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    pub resource: String,
    pub text: String,
}

/// Reads resources as files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the site dumps (`*_funcs.c`) directly below the root, sorted.
    pub fn discover_site_resources(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(Error::InvalidPath {
                path: self.root.clone(),
            });
        }

        let mut resources = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if name.ends_with(RESOURCE_SUFFIX) {
                resources.push(name.into_owned());
            }
        }
        resources.sort();

        tracing::debug!(
            "Discovered {} site dumps in {}",
            resources.len(),
            self.root.display()
        );
        Ok(resources)
    }
}

impl ResourceFetcher for DirectoryFetcher {
    fn fetch(&self, resource: &str) -> Result<String> {
        let path = self.root.join(resource);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::ResourceNotFound {
                    resource: resource.to_string(),
                });
            }
            Err(err) => {
                tracing::warn!("Failed to read {}: {}", path.display(), err);
                return Err(err.into());
            }
        };
        tracing::trace!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(String::from_utf8(bytes)?)
    }
}

/// Serves resources from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, String>,
}

impl MemoryFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, resource: impl Into<String>, text: impl Into<String>) {
        self.resources.insert(resource.into(), text.into());
    }

    /// Builder-style [`MemoryFetcher::insert`].
    #[must_use]
    pub fn with(mut self, resource: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(resource, text);
        self
    }
}

impl ResourceFetcher for MemoryFetcher {
    fn fetch(&self, resource: &str) -> Result<String> {
        self.resources
            .get(resource)
            .cloned()
            .ok_or_else(|| Error::ResourceNotFound {
                resource: resource.to_string(),
            })
    }
}

/// Fetch every resource in parallel, keeping input order.
///
/// Fails as a whole if any single fetch fails; no partial results.
pub fn fetch_all(
    fetcher: &dyn ResourceFetcher,
    resources: &[String],
) -> Result<Vec<FetchedResource>> {
    resources
        .par_iter()
        .map(|resource| {
            fetcher.fetch(resource).map(|text| FetchedResource {
                resource: resource.clone(),
                text,
            })
        })
        .collect()
}
