//! Merging the site and repo dumps into one canonical list
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! The site dump is authoritative; the repo header only supplements it.
//! Repo records are appended and tagged, the combined list is sorted by
//! name, and each run of same-named records (a window) is deduplicated on
//! `(file_name, pattern)`. Equivalence only ever applies inside a window,
//! so unrelated signatures that happen to share a pattern never collapse.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::formats::Signature;

/// Outcome of a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    /// The canonical collection, sorted by name
    pub signatures: Vec<Signature>,
    /// Records dropped as duplicates of an earlier record in their window
    pub duplicates_removed: usize,
    /// Repo records whose name does not occur in the site dump at all
    pub unmatched: usize,
}

/// Case-insensitive ordinal comparison.
fn compare_names(lhs: &str, rhs: &str) -> Ordering {
    lhs.chars()
        .flat_map(char::to_lowercase)
        .cmp(rhs.chars().flat_map(char::to_lowercase))
}

/// Ordering inside a window. `sig_name` is last so that names differing
/// only in case still sort next to their exact duplicates.
fn compare_in_window(lhs: &Signature, rhs: &Signature) -> Ordering {
    lhs.file_name
        .cmp(&rhs.file_name)
        .then_with(|| lhs.pattern.cmp(&rhs.pattern))
        .then_with(|| lhs.sig_name.cmp(&rhs.sig_name))
}

fn is_duplicate(lhs: &Signature, rhs: &Signature) -> bool {
    lhs.file_name == rhs.file_name && lhs.pattern == rhs.pattern && lhs.sig_name == rhs.sig_name
}

/// Merge site and repo records into one sorted, deduplicated list.
///
/// Every repo record gets `source = marker`. Sorting is stable and site
/// records come first, so when a duplicate pair is collapsed the site
/// record is the one kept. Running the merge twice on equal inputs gives
/// identical output.
///
/// # Example
/// ```
/// use sigcore::formats::SourceFormat;
/// use sigcore::merge::merge_signatures;
/// use sigcore::compact::NameCompactor;
///
/// let compactor = NameCompactor::default();
/// let site = SourceFormat::Site.parse("client_funcs.c", "Foo=AA\nFoo=AA\n", &compactor);
/// let repo = SourceFormat::Repo.parse("h", "namespace \"client\" {\nFoo = \"AA\";\n}", &compactor);
///
/// let merged = merge_signatures(site, repo, "repo");
/// assert_eq!(merged.signatures.len(), 1);
/// assert_eq!(merged.signatures[0].source, None);
/// assert_eq!(merged.duplicates_removed, 2);
/// ```
#[must_use]
pub fn merge_signatures(site: Vec<Signature>, repo: Vec<Signature>, marker: &str) -> MergeResult {
    let unmatched = {
        let site_names: HashSet<&str> = site.iter().map(|s| s.sig_name.as_str()).collect();
        repo.iter()
            .filter(|r| !site_names.contains(r.sig_name.as_str()))
            .count()
    };

    let mut sigs = site;
    sigs.reserve(repo.len());
    sigs.extend(repo.into_iter().map(|mut sig| {
        sig.source = Some(marker.to_string());
        sig
    }));

    sigs.sort_by(|lhs, rhs| compare_names(&lhs.sig_name, &rhs.sig_name));

    // Neighbours across a window boundary differ in name, so a single dedup
    // pass only collapses records within one window.
    let before = sigs.len();
    for window in sigs.chunk_by_mut(|lhs, rhs| {
        compare_names(&lhs.sig_name, &rhs.sig_name) == Ordering::Equal
    }) {
        if window.len() > 1 {
            window.sort_by(compare_in_window);
        }
    }
    sigs.dedup_by(|later, kept| is_duplicate(later, kept));
    let duplicates_removed = before - sigs.len();

    tracing::debug!(
        "Merged {} signatures ({} duplicates removed, {} unmatched repo records)",
        sigs.len(),
        duplicates_removed,
        unmatched
    );

    MergeResult {
        signatures: sigs,
        duplicates_removed,
        unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sig(file_name: &str, sig_name: &str, pattern: &str) -> Signature {
        Signature {
            file_name: file_name.to_string(),
            line_nr: 0,
            sig_name: sig_name.to_string(),
            sig_name_compact: None,
            pattern: pattern.to_string(),
            source: None,
            class_info: None,
        }
    }

    fn keys(sigs: &[Signature]) -> Vec<(&str, &str, &str, Option<&str>)> {
        sigs.iter()
            .map(|s| {
                (
                    s.sig_name.as_str(),
                    s.file_name.as_str(),
                    s.pattern.as_str(),
                    s.source.as_deref(),
                )
            })
            .collect()
    }

    #[test]
    fn test_duplicates_across_and_within_sources_collapse() {
        let site = vec![sig("client", "Foo", "AA"), sig("client", "Foo", "AA")];
        let repo = vec![sig("client", "Foo", "AA")];
        let merged = merge_signatures(site, repo, "repo");
        assert_eq!(keys(&merged.signatures), vec![("Foo", "client", "AA", None)]);
        assert_eq!(merged.duplicates_removed, 2);
        assert_eq!(merged.unmatched, 0);
    }

    #[test]
    fn test_unmatched_repo_record_is_kept_and_tagged() {
        let site = vec![sig("client", "Foo", "AA")];
        let repo = vec![sig("engine", "Bar", "BB")];
        let merged = merge_signatures(site, repo, "repo");
        assert_eq!(
            keys(&merged.signatures),
            vec![("Bar", "engine", "BB", Some("repo")), ("Foo", "client", "AA", None)]
        );
        assert_eq!(merged.unmatched, 1);
        assert_eq!(merged.duplicates_removed, 0);
    }

    #[test]
    fn test_sorted_case_insensitively() {
        let site = vec![sig("c", "beta", "1"), sig("c", "Alpha", "2"), sig("c", "gamma", "3")];
        let repo = vec![sig("c", "Delta", "4")];
        let merged = merge_signatures(site, repo, "repo");
        let names: Vec<&str> = merged.signatures.iter().map(|s| s.sig_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "Delta", "gamma"]);
    }

    #[test]
    fn test_window_sorted_by_file_then_pattern() {
        let site = vec![sig("server", "Foo", "AA"), sig("client", "Foo", "CC")];
        let repo = vec![sig("client", "Foo", "BB"), sig("server", "Foo", "AA")];
        let merged = merge_signatures(site, repo, "repo");
        assert_eq!(
            keys(&merged.signatures),
            vec![
                ("Foo", "client", "BB", Some("repo")),
                ("Foo", "client", "CC", None),
                ("Foo", "server", "AA", None),
            ]
        );
    }

    #[test]
    fn test_same_pattern_under_different_names_is_kept() {
        let site = vec![sig("client", "Foo", "AA"), sig("client", "Bar", "AA")];
        let merged = merge_signatures(site, Vec::new(), "repo");
        assert_eq!(merged.signatures.len(), 2);
    }

    #[test]
    fn test_case_variants_are_distinct_signatures() {
        let site = vec![sig("c", "Foo", "AA"), sig("c", "foo", "AA")];
        let repo = vec![sig("c", "Foo", "AA"), sig("c", "FOO", "AA")];
        let merged = merge_signatures(site, repo, "repo");
        assert_eq!(
            keys(&merged.signatures),
            vec![
                ("FOO", "c", "AA", Some("repo")),
                ("Foo", "c", "AA", None),
                ("foo", "c", "AA", None),
            ]
        );
        assert_eq!(merged.unmatched, 1);
    }

    #[test]
    fn test_site_records_survive() {
        let site = vec![
            sig("client", "A", "1"),
            sig("engine", "A", "1"),
            sig("client", "B", "2"),
            sig("client", "B", "3"),
        ];
        let repo = vec![sig("client", "A", "1"), sig("client", "B", "2"), sig("client", "C", "9")];
        let merged = merge_signatures(site.clone(), repo, "repo");
        for original in &site {
            assert!(
                merged.signatures.iter().any(|m| m == original),
                "site record {original:?} missing"
            );
        }
        assert_eq!(merged.signatures.len(), 5);
    }

    #[test]
    fn test_no_duplicate_triples_remain() {
        let mut site = Vec::new();
        let mut repo = Vec::new();
        for i in 0..40 {
            let name = ["Foo", "foo", "Bar", "Baz"][i % 4];
            let file = ["client", "engine"][i % 3 % 2];
            let pattern = ["AA", "BB", "CC"][i % 5 % 3];
            site.push(sig(file, name, pattern));
            repo.push(sig(file, name, pattern));
        }
        let merged = merge_signatures(site, repo, "repo");
        let mut seen = HashSet::new();
        for s in &merged.signatures {
            assert!(
                seen.insert((s.sig_name.clone(), s.file_name.clone(), s.pattern.clone())),
                "duplicate {s:?}"
            );
        }
        // Everything in the repo list duplicated a site record
        assert!(merged.signatures.iter().all(|s| s.source.is_none()));
    }

    #[test]
    fn test_merge_is_deterministic() {
        let site = vec![
            sig("client", "b", "2"),
            sig("client", "B", "1"),
            sig("engine", "a", "3"),
        ];
        let repo = vec![sig("client", "A", "3"), sig("client", "b", "2")];
        let first = merge_signatures(site.clone(), repo.clone(), "repo");
        let second = merge_signatures(site, repo, "repo");
        assert_eq!(first, second);
    }

    #[test]
    fn test_large_overlapping_merge() {
        let n = 50_000;
        let site: Vec<Signature> =
            (0..n).map(|i| sig("client", &format!("Name{i}"), "AA")).collect();
        let repo = site.clone();

        let started = std::time::Instant::now();
        let merged = merge_signatures(site, repo, "repo");
        let elapsed = started.elapsed();

        assert_eq!(merged.signatures.len(), n);
        assert_eq!(merged.duplicates_removed, n);
        assert!(merged.signatures.iter().all(|s| s.source.is_none()));
        assert!(
            merged
                .signatures
                .windows(2)
                .all(|pair| compare_names(&pair[0].sig_name, &pair[1].sig_name).is_le())
        );
        assert!(elapsed.as_secs() < 20, "merge of {n} records took {elapsed:?}");
    }

    #[test]
    fn test_empty_inputs() {
        let merged = merge_signatures(Vec::new(), Vec::new(), "repo");
        assert!(merged.signatures.is_empty());
        assert_eq!(merged.duplicates_removed, 0);
    }
}
