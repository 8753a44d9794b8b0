//! Whole-column codec operations.
//!
//! Each function takes the overflow column of a collection (one optional
//! blob per record) and returns results aligned with it by index. With the
//! `parallel` feature and `parallel = true`, records are scanned with rayon;
//! results are identical either way.

use super::blob::{decode, KeyPattern};
use std::collections::{HashMap, HashSet};

/// For every record, does its blob contain `key`?
pub fn has_key_batch(blobs: &[Option<String>], key: &str, parallel: bool) -> Vec<bool> {
    let pattern = KeyPattern::new(key);
    map_records(blobs.len(), parallel, |i| {
        blobs[i].as_deref().is_some_and(|b| pattern.is_in(b))
    })
}

/// Extracts the value of `key` for every record flagged in `present`.
///
/// Records not flagged are `None` without being scanned. `present` is
/// normally the output of [`has_key_batch`] for the same key.
///
/// # Panics
///
/// Panics if `present` and `blobs` differ in length.
pub fn extract_batch<'a>(
    blobs: &'a [Option<String>],
    present: &[bool],
    key: &str,
    parallel: bool,
) -> Vec<Option<&'a str>> {
    assert_eq!(blobs.len(), present.len(), "present mask must align with blobs");
    let pattern = KeyPattern::new(key);
    map_records(blobs.len(), parallel, |i| {
        if !present[i] {
            return None;
        }
        blobs[i].as_deref().and_then(|b| pattern.extract(b))
    })
}

/// Convenience: [`has_key_batch`] followed by [`extract_batch`].
pub fn resolve_batch<'a>(
    blobs: &'a [Option<String>],
    key: &str,
    parallel: bool,
) -> Vec<Option<&'a str>> {
    let present = has_key_batch(blobs, key, parallel);
    extract_batch(blobs, &present, key, parallel)
}

/// Counts, for each key, the records whose blob contains it.
///
/// A key repeated inside one blob counts once for that record. Sorted by
/// descending count, then by key.
///
/// This is the one codec operation that fully decodes every blob.
pub fn key_frequencies(blobs: &[Option<String>]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for blob in blobs {
        let Some(pairs) = decode(blob.as_deref(), false) else {
            continue;
        };
        seen.clear();
        for pair in pairs {
            if seen.insert(pair.key) {
                *counts.entry(pair.key).or_insert(0) += 1;
            }
        }
    }

    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Maps `f` over record indices `0..len`, optionally in parallel.
fn map_records<T, F>(len: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            return (0..len).into_par_iter().map(f).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..len).map(f).collect()
}
