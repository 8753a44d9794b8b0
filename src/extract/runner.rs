//! Flat tag table extraction.

use super::config::ExtractConfig;
use crate::codec::{key_frequencies, resolve_batch};
use crate::error::Result;
use crate::table::{Column, FeatureCollection};
use std::collections::HashSet;
use tracing::debug;

/// Builds a flat table with one column per requested tag.
///
/// Each tag is read from its dedicated column when the collection has one,
/// otherwise from the overflow blobs (first value per key). Tags whose fill
/// rate is below [`ExtractConfig::min_fill_rate`], or that have no values at
/// all, are dropped.
///
/// # Usage
///
/// ```
/// use u_tagclass::extract::TagExtractor;
/// use u_tagclass::table::FeatureCollection;
///
/// let fc = FeatureCollection::from_rows(
///     &["name", "other_tags"],
///     &[
///         vec![Some("Mill"), Some(r#""shop"=>"bakery""#)],
///         vec![None, Some(r#""cuisine"=>"pizza""#)],
///     ],
/// )
/// .unwrap();
///
/// let table = TagExtractor::extract(&fc, &["name", "shop", "wheelchair"])
///     .unwrap()
///     .unwrap();
/// assert_eq!(table.column_names(), vec!["name", "shop"]);
/// ```
pub struct TagExtractor;

impl TagExtractor {
    /// Extracts with the default [`ExtractConfig`].
    pub fn extract<S: AsRef<str>>(
        collection: &FeatureCollection,
        tags: &[S],
    ) -> Result<Option<FeatureCollection>> {
        Self::extract_with_config(collection, tags, &ExtractConfig::default())
    }

    /// Extracts `tags` with an explicit configuration.
    ///
    /// Repeated tag names are extracted once. Returns `Ok(None)` when no tag
    /// is kept.
    pub fn extract_with_config<S: AsRef<str>>(
        collection: &FeatureCollection,
        tags: &[S],
        config: &ExtractConfig,
    ) -> Result<Option<FeatureCollection>> {
        config.validate()?;

        let blobs = collection.overflow(&config.overflow_column);
        let mut requested = HashSet::with_capacity(tags.len());
        let mut columns = Vec::new();

        for tag in tags.iter().map(AsRef::as_ref) {
            if !requested.insert(tag) {
                continue;
            }

            let column = match (collection.tag_column(tag, &config.overflow_column), blobs) {
                (Some(dedicated), _) => dedicated.clone(),
                (None, Some(blobs)) => Column::new(
                    tag,
                    resolve_batch(blobs, tag, config.parallel)
                        .into_iter()
                        .map(|v| v.map(str::to_string))
                        .collect(),
                ),
                (None, None) => {
                    debug!(tag, "no dedicated column and no overflow column");
                    continue;
                }
            };

            let fill_rate = column.fill_rate();
            if column.non_missing() == 0 || fill_rate < config.min_fill_rate {
                debug!(tag, fill_rate, "tag dropped");
                continue;
            }
            columns.push(column);
        }

        if columns.is_empty() {
            return Ok(None);
        }
        debug!(kept = columns.len(), requested = requested.len(), "tags extracted");
        FeatureCollection::new(columns).map(Some)
    }

    /// Extracts every overflow key that reaches the fill-rate threshold.
    ///
    /// Keys are found by decoding all blobs and counting, per key, the
    /// records that carry it; columns come out most frequent first.
    pub fn extract_frequent(
        collection: &FeatureCollection,
        config: &ExtractConfig,
    ) -> Result<Option<FeatureCollection>> {
        config.validate()?;

        let Some(blobs) = collection.overflow(&config.overflow_column) else {
            return Ok(None);
        };
        if collection.is_empty() {
            return Ok(None);
        }

        let total = collection.len() as f64;
        let keys: Vec<String> = key_frequencies(blobs)
            .into_iter()
            .filter(|(_, count)| *count as f64 / total >= config.min_fill_rate)
            .map(|(key, _)| key)
            .collect();

        Self::extract_with_config(collection, &keys, config)
    }
}
