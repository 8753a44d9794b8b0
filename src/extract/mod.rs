//! Flat tag tables for downstream enrichment.
//!
//! [`TagExtractor`] turns a list of tag names into one column per tag,
//! reading dedicated columns where they exist and the overflow blobs
//! otherwise. It shares the codec with the classification engine but is
//! independent of it.

mod config;
mod runner;

pub use config::ExtractConfig;
pub use runner::TagExtractor;
