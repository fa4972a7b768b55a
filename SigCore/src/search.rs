//! Search over the canonical collection
//!
//! Applied after the pipeline has run, never inside it.

use crate::formats::Signature;

/// Whether `sig` matches an already lower-cased query.
///
/// Matches when the query is empty or a substring of the name, pattern,
/// file name, source, class name, or vtable index.
#[must_use]
pub fn matches_search(sig: &Signature, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    sig.sig_name.to_lowercase().contains(query)
        || sig.pattern.to_lowercase().contains(query)
        || sig.file_name.to_lowercase().contains(query)
        || sig
            .source
            .as_ref()
            .is_some_and(|source| source.to_lowercase().contains(query))
        || sig.class_info.as_ref().is_some_and(|class| {
            class.name.to_lowercase().contains(query)
                || class.vtable_index.to_string().contains(query)
        })
}

/// Filter `sigs` by a query in any case.
#[must_use]
pub fn filter_signatures<'a>(sigs: &'a [Signature], query: &str) -> Vec<&'a Signature> {
    let query = query.to_lowercase();
    sigs.iter().filter(|sig| matches_search(sig, &query)).collect()
}
