//! Merge provider batches into one deduplicated result list.
//!
//! Hits are visited batch by batch in caller order, then in provider order
//! within each batch. The first occurrence of a URL wins its position;
//! later occurrences are dropped silently. Two different URLs on the same
//! domain are both kept.

use std::collections::HashSet;

use crate::types::{NormalizedResult, SearchHit};

use super::url_normalize::validate_url;

/// Normalise and deduplicate one or more batches of search hits.
///
/// Hits whose URL is empty or unusable are skipped. The output holds one
/// entry per distinct URL, in first-seen order across all batches.
pub fn normalize_and_dedupe(batches: &[Vec<SearchHit>]) -> Vec<NormalizedResult> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut results = Vec::new();

    for hit in batches.iter().flatten() {
        let Some((url, domain)) = validate_url(&hit.url) else {
            tracing::trace!(url = %hit.url, "skipping hit without usable URL");
            continue;
        };
        if !seen.insert(url) {
            continue;
        }
        results.push(NormalizedResult {
            url: url.to_owned(),
            domain,
            title: hit.title.trim().to_owned(),
            snippet: hit.snippet.trim().to_owned(),
        });
    }

    results
}
