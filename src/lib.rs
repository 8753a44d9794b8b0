//! Rule-table classification of tagged geospatial features.
//!
//! Features (points, lines, polygons) arrive as a table: common tags have
//! dedicated columns, rare ones are packed into an `other_tags` blob per
//! record. This crate assigns each feature to analyst-defined categories:
//!
//! - **Codec**: Selective reading of `"key"=>"value"` blobs. Single-key
//!   lookups never decode a whole blob.
//! - **Matching**: Value specifications (match-all, match-set,
//!   match-all-except) and their evaluation over a column.
//! - **Classification**: Ordered rule tables. The first matching category in
//!   priority order becomes a record's primary; every other match is kept as
//!   an alternate with its triggering tag and value.
//! - **Extraction**: Flat per-tag tables built from dedicated columns and
//!   blobs, with a fill-rate threshold.
//!
//! # Example
//!
//! ```
//! use u_tagclass::classify::{Category, Classification, ClassificationEngine};
//! use u_tagclass::matching::ValueSpec;
//! use u_tagclass::table::FeatureCollection;
//!
//! let features = FeatureCollection::from_rows(
//!     &["amenity", "landuse", "other_tags"],
//!     &[
//!         vec![Some("school"), Some("military"), None],
//!         vec![None, None, Some(r#""shop"=>"bakery""#)],
//!     ],
//! )
//! .unwrap();
//!
//! let classification = Classification::new(vec![
//!     Category::new("military").rule("landuse", ValueSpec::MatchAll),
//!     Category::new("education").parse_rule("amenity", &["school"]).unwrap(),
//!     Category::new("shopping").rule("shop", ValueSpec::MatchAll),
//! ])
//! .unwrap();
//!
//! let result = ClassificationEngine::run(&features, &classification).unwrap();
//! let rows = result.rows();
//! assert_eq!(rows[0].main_category.as_deref(), Some("military"));
//! assert_eq!(rows[0].alt_categories.as_deref(), Some("education"));
//! assert_eq!(rows[0].alt_tag_values.as_deref(), Some(r#"amenity:"school""#));
//! assert_eq!(rows[1].main_tag_value.as_deref(), Some("bakery"));
//! ```
//!
//! # Features
//!
//! - `serde` (default): JSON classification loading and `Serialize` on
//!   result rows and summaries.
//! - `parallel`: rayon-backed blob scanning.

pub mod classify;
pub mod codec;
pub mod error;
pub mod extract;
pub mod matching;
pub mod table;

pub use error::{Error, Result, SpecError};
