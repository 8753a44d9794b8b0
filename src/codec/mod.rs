//! Packed tag blob codec.
//!
//! Tags that were not promoted to dedicated columns travel in one overflow
//! string per record (`other_tags`), formatted as `"key"=>"value"` pairs.
//! This module reads those blobs.
//!
//! # Key Components
//!
//! - [`KeyPattern`]: precompiled single-key lookup (`is_in`, `extract`)
//! - [`has_key`], [`extract_value`]: single-blob lookups
//! - [`decode`]: full enumeration of a blob's pairs
//! - [`has_key_batch`], [`extract_batch`]: whole-column lookups, index-aligned
//! - [`key_frequencies`]: per-key record counts across a column
//!
//! # Design
//!
//! Lookups scan for the literal `"key"=>` only. Blobs are never parsed in
//! full to answer a single-key query, so the cost of a rule is one substring
//! search per record regardless of how many tags a blob carries.

mod batch;
mod blob;

pub use batch::{extract_batch, has_key_batch, key_frequencies, resolve_batch};
pub use blob::{decode, encode, extract_value, has_key, KeyPattern, TagPair};
