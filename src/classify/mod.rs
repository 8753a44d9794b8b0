//! Rule-table classification.
//!
//! Assigns every record of a [`FeatureCollection`](crate::table::FeatureCollection)
//! to at most one primary category and any number of alternates, by
//! evaluating an ordered rule table.
//!
//! # Key Types
//!
//! - [`Category`]: a named, ordered list of `tag -> value spec` rules
//! - [`Classification`]: validated categories in priority order
//! - [`EngineConfig`]: run parameters (overflow column, parallel scanning)
//! - [`ClassificationEngine`]: executes a run
//! - [`ClassificationResult`]: per-record primary/alternate matches
//!
//! # Priority
//!
//! The first rule to match a record, walking categories in priority order
//! and rules in insertion order, sets its primary category. Every later
//! match, including a later rule of the same category, is appended as an
//! alternate. A primary is never overwritten.

mod config;
mod engine;
#[cfg(feature = "serde")]
mod load;
mod result;

pub use config::{Category, Classification, EngineConfig, Rule};
pub use engine::ClassificationEngine;
pub use result::{
    CategoryCount, ClassificationRecord, ClassificationResult, ClassificationSummary, ResultRow,
    TagMatch, LIST_SEPARATOR,
};
