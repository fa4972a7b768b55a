//! Fetch, parse and merge both dumps in one call
//!
//! The two sources are independent until the merge, so they are fetched and
//! parsed on separate rayon tasks and joined before merging. Nothing is
//! cached between runs.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compact::NameCompactor;
use crate::error::Result;
use crate::formats::{Signature, SourceFormat, repo, site};
use crate::merge::merge_signatures;
use crate::sources::{ResourceFetcher, fetch_all};

/// What to fetch and how to compact names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Site dump resources, one per module
    pub site_resources: Vec<String>,
    /// The repo header resource
    pub repo_resource: String,
    pub compactor: NameCompactor,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            site_resources: site::DEFAULT_RESOURCES
                .iter()
                .map(ToString::to_string)
                .collect(),
            repo_resource: repo::DEFAULT_RESOURCE.to_string(),
            compactor: NameCompactor::default(),
        }
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// The canonical collection
    pub signatures: Vec<Signature>,
    /// Records parsed from the site dumps
    pub site_count: usize,
    /// Records parsed from the repo header
    pub repo_count: usize,
    pub duplicates_removed: usize,
    pub unmatched: usize,
}

fn load_site(fetcher: &dyn ResourceFetcher, options: &PipelineOptions) -> Result<Vec<Signature>> {
    let format = SourceFormat::Site;
    let fetched = fetch_all(fetcher, &options.site_resources)?;
    tracing::debug!("{}: fetched {} resources", format.display_name(), fetched.len());
    Ok(fetched
        .par_iter()
        .flat_map_iter(|res| format.parse(&res.resource, &res.text, &options.compactor))
        .collect())
}

fn load_repo(fetcher: &dyn ResourceFetcher, options: &PipelineOptions) -> Result<Vec<Signature>> {
    let format = SourceFormat::Repo;
    let text = fetcher.fetch(&options.repo_resource)?;
    tracing::debug!(
        "{}: fetched {} ({} bytes)",
        format.display_name(),
        options.repo_resource,
        text.len()
    );
    Ok(format.parse(&options.repo_resource, &text, &options.compactor))
}

/// Run the whole pipeline.
///
/// Any fetch failure aborts the run; parse problems inside the text never
/// do (malformed lines and blocks are skipped).
///
/// # Errors
/// Returns the first fetch error from either source.
pub fn run_pipeline(
    site_fetcher: &dyn ResourceFetcher,
    repo_fetcher: &dyn ResourceFetcher,
    options: &PipelineOptions,
) -> Result<PipelineOutput> {
    let (site, repo) = rayon::join(
        || load_site(site_fetcher, options),
        || load_repo(repo_fetcher, options),
    );
    let site = site?;
    let repo = repo?;

    let site_count = site.len();
    let repo_count = repo.len();
    tracing::debug!("Parsed {site_count} site records and {repo_count} repo records");

    let merged = merge_signatures(site, repo, SourceFormat::Repo.marker());

    tracing::info!(
        "Loaded {} signatures ({} duplicates removed)",
        merged.signatures.len(),
        merged.duplicates_removed
    );

    Ok(PipelineOutput {
        signatures: merged.signatures,
        site_count,
        repo_count,
        duplicates_removed: merged.duplicates_removed,
        unmatched: merged.unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::sources::MemoryFetcher;
    use pretty_assertions::assert_eq;

    fn options(site_resources: &[&str]) -> PipelineOptions {
        PipelineOptions {
            site_resources: site_resources.iter().map(ToString::to_string).collect(),
            ..PipelineOptions::default()
        }
    }

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::default();
        assert_eq!(options.site_resources.len(), 6);
        assert_eq!(options.site_resources[0], "client_funcs.c");
        assert_eq!(options.repo_resource, "function_signatures.h");
    }

    #[test]
    fn test_duplicate_across_sources_keeps_site_record() {
        let site = MemoryFetcher::new().with("client_funcs.c", "Foo=AA\n");
        let repo = MemoryFetcher::new()
            .with("function_signatures.h", "namespace \"client\" {\n  Foo = \"AA\";\n}\n");

        let output = run_pipeline(&site, &repo, &options(&["client_funcs.c"])).unwrap();
        assert_eq!(output.signatures.len(), 1);
        assert_eq!(output.signatures[0].source, None);
        assert_eq!(output.site_count, 1);
        assert_eq!(output.repo_count, 1);
        assert_eq!(output.duplicates_removed, 1);
        assert_eq!(output.unmatched, 0);
    }

    #[test]
    fn test_repo_only_record_is_tagged() {
        let site = MemoryFetcher::new().with("client_funcs.c", "Foo=AA\n");
        let repo = MemoryFetcher::new()
            .with("function_signatures.h", "namespace \"engine\" {\n  Bar = \"BB\";\n}\n");

        let output = run_pipeline(&site, &repo, &options(&["client_funcs.c"])).unwrap();
        let names: Vec<(&str, Option<&str>)> = output
            .signatures
            .iter()
            .map(|s| (s.sig_name.as_str(), s.source.as_deref()))
            .collect();
        assert_eq!(names, vec![("Bar", Some("repo")), ("Foo", None)]);
        assert_eq!(output.unmatched, 1);
    }

    #[test]
    fn test_multiple_site_resources() {
        let site = MemoryFetcher::new()
            .with("client_funcs.c", "B=11\n")
            .with("engine_funcs.c", "A=22\n");
        let repo = MemoryFetcher::new().with("function_signatures.h", "");

        let output =
            run_pipeline(&site, &repo, &options(&["client_funcs.c", "engine_funcs.c"])).unwrap();
        let files: Vec<&str> = output.signatures.iter().map(|s| s.file_name.as_str()).collect();
        assert_eq!(files, vec!["engine", "client"]);
    }

    #[test]
    fn test_missing_site_resource_aborts() {
        let site = MemoryFetcher::new().with("client_funcs.c", "Foo=AA\n");
        let repo = MemoryFetcher::new().with("function_signatures.h", "");

        let result = run_pipeline(&site, &repo, &options(&["client_funcs.c", "engine_funcs.c"]));
        assert!(matches!(
            result,
            Err(Error::ResourceNotFound { resource }) if resource == "engine_funcs.c"
        ));
    }

    #[test]
    fn test_missing_repo_resource_aborts() {
        let site = MemoryFetcher::new().with("client_funcs.c", "Foo=AA\n");
        let repo = MemoryFetcher::new();

        let result = run_pipeline(&site, &repo, &options(&["client_funcs.c"]));
        assert!(matches!(result, Err(Error::ResourceNotFound { .. })));
    }

    #[test]
    fn test_runs_are_independent() {
        let site = MemoryFetcher::new().with("client_funcs.c", "Foo=AA\nBar=BB\n");
        let repo = MemoryFetcher::new()
            .with("function_signatures.h", "namespace \"client\" {\n  Baz = \"CC\";\n}\n");
        let options = options(&["client_funcs.c"]);

        let first = run_pipeline(&site, &repo, &options).unwrap();
        let second = run_pipeline(&site, &repo, &options).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.signatures.len(), 3);
    }
}
