//! SigDex - Browse merged signature dumps
//!
//! Runs the `sigcore` pipeline from a settings file and pages through the
//! result.
use serde::{Deserialize, Serialize};

// Re-export sigcore
pub use sigcore;

pub mod config;
pub mod error;

// Feature-gated modules
#[cfg(feature = "cli")]
pub mod cli;

pub use config::Settings;
pub use error::{Error, Result};

use sigcore::formats::Signature;
use sigcore::formats::hazedumper::{self, CONFIG_RESOURCE, Config, OFFSETS_RESOURCE, Offsets};
use sigcore::paging::paging;
use sigcore::pipeline::{PipelineOutput, run_pipeline};
use sigcore::search::filter_signatures;
use sigcore::sources::{DirectoryFetcher, ResourceFetcher};

/// Counts from one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub site_count: usize,
    pub repo_count: usize,
    pub duplicates_removed: usize,
    pub unmatched: usize,
    pub total: usize,
}

/// The canonical collection from one load
#[derive(Debug, Clone)]
pub struct SignatureSet {
    pub signatures: Vec<Signature>,
    pub stats: LoadStats,
    page_size: usize,
}

/// One page of a (possibly filtered) listing
#[derive(Debug, Clone, Serialize)]
pub struct SignaturePage<'a> {
    pub items: Vec<&'a Signature>,
    /// One-based page actually shown, 0 when nothing matched
    pub page: usize,
    pub pages: usize,
    /// Matches across all pages
    pub total: usize,
}

impl SignatureSet {
    fn from_output(output: PipelineOutput, page_size: usize) -> Self {
        let stats = LoadStats {
            site_count: output.site_count,
            repo_count: output.repo_count,
            duplicates_removed: output.duplicates_removed,
            unmatched: output.unmatched,
            total: output.signatures.len(),
        };
        Self {
            signatures: output.signatures,
            stats,
            page_size,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Records matching `query` in any case
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Signature> {
        filter_signatures(&self.signatures, query)
    }

    /// Page `page` (one-based, clamped) of the records matching `query`
    #[must_use]
    pub fn page(&self, query: &str, page: usize) -> SignaturePage<'_> {
        let matches = self.search(query);
        let total = matches.len();
        let bounds = paging(total, self.page_size, page);

        SignaturePage {
            items: matches[bounds.start..bounds.end].to_vec(),
            page: if bounds.pages == 0 { 0 } else { page.clamp(1, bounds.pages) },
            pages: bounds.pages,
            total,
        }
    }

    /// Every record named exactly `name`
    #[must_use]
    pub fn by_name(&self, name: &str) -> Vec<&Signature> {
        self.signatures.iter().filter(|s| s.sig_name == name).collect()
    }

    /// Records named exactly `name`, grouped by signature identity
    ///
    /// Records of one group share their module and owning class; only the
    /// pattern or provenance differs between them.
    #[must_use]
    pub fn identities(&self, name: &str) -> Vec<Vec<&Signature>> {
        let mut groups: Vec<Vec<&Signature>> = Vec::new();
        for sig in self.by_name(name) {
            match groups.iter_mut().find(|group| group[0].is_same_signature(sig)) {
                Some(group) => group.push(sig),
                None => groups.push(vec![sig]),
            }
        }
        groups
    }
}

/// Hazedumper's scan configuration and resolved offsets
#[derive(Debug, Clone)]
pub struct HazedumperData {
    pub config: Config,
    pub offsets: Offsets,
}

/// Main toolkit interface
pub struct Toolkit {
    settings: Settings,
}

impl Toolkit {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetch, parse and merge both dumps
    pub fn load(&self) -> Result<SignatureSet> {
        let options = self.settings.pipeline_options()?;
        let site = DirectoryFetcher::new(&self.settings.sources.site_dir);
        let repo = DirectoryFetcher::new(&self.settings.sources.repo_dir);

        let output = run_pipeline(&site, &repo, &options)?;
        Ok(SignatureSet::from_output(output, self.settings.display.page_size))
    }

    /// Read hazedumper's JSON files from `hazedumper_dir`
    pub fn load_hazedumper(&self) -> Result<HazedumperData> {
        let Some(dir) = &self.settings.sources.hazedumper_dir else {
            return Err(Error::Config("sources.hazedumper_dir is not set".to_string()));
        };
        let fetcher = DirectoryFetcher::new(dir);

        let config = hazedumper::parse_config(&fetcher.fetch(CONFIG_RESOURCE)?)?;
        let offsets = hazedumper::parse_offsets(&fetcher.fetch(OFFSETS_RESOURCE)?)?;
        tracing::debug!(
            "Loaded {} hazedumper patterns and {} offsets",
            config.signatures.len(),
            offsets.signatures.len() + offsets.netvars.len()
        );
        Ok(HazedumperData { config, offsets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(name: &str) -> Signature {
        Signature {
            file_name: "client".to_string(),
            line_nr: 0,
            sig_name: name.to_string(),
            sig_name_compact: None,
            pattern: "AA".to_string(),
            source: None,
            class_info: None,
        }
    }

    fn set(names: &[&str], page_size: usize) -> SignatureSet {
        let output = PipelineOutput {
            signatures: names.iter().map(|n| sig(n)).collect(),
            site_count: names.len(),
            ..PipelineOutput::default()
        };
        SignatureSet::from_output(output, page_size)
    }

    #[test]
    fn test_stats_total() {
        let set = set(&["A", "B", "C"], 10);
        assert_eq!(set.stats.total, 3);
        assert_eq!(set.stats.site_count, 3);
    }

    #[test]
    fn test_page_through_matches() {
        let set = set(&["Alpha", "Beta", "Gamma", "Delta", "Epsilon"], 2);
        let page = set.page("", 3);
        assert_eq!(page.pages, 3);
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].sig_name, "Epsilon");

        let filtered = set.page("ta", 9);
        assert_eq!(filtered.total, 2);
        assert_eq!(filtered.page, 1);
        let names: Vec<&str> = filtered.items.iter().map(|s| s.sig_name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Delta"]);
    }

    #[test]
    fn test_page_without_matches() {
        let set = set(&["Alpha"], 10);
        let page = set.page("zzz", 1);
        assert_eq!(page.page, 0);
        assert_eq!(page.pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_with_page_size() {
        let set = set(&["A", "B", "C"], 10).with_page_size(1);
        assert_eq!(set.page_size(), 1);
        assert_eq!(set.page("", 1).pages, 3);
    }

    #[test]
    fn test_by_name_is_exact() {
        let set = set(&["Foo", "foo", "Foobar"], 10);
        assert_eq!(set.by_name("Foo").len(), 1);
    }

    #[test]
    fn test_identities_group_by_module() {
        let mut set = set(&["Foo", "Foo", "Foo", "Bar"], 10);
        set.signatures[1].pattern = "BB".to_string();
        set.signatures[2].file_name = "engine".to_string();

        let groups = set.identities("Foo");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1][0].file_name, "engine");
        assert!(set.identities("Baz").is_empty());
    }

    #[test]
    fn test_hazedumper_requires_directory() {
        let toolkit = Toolkit::new(Settings::default());
        assert!(matches!(toolkit.load_hazedumper(), Err(Error::Config(_))));
    }
}
