//! Value specifications and their evaluation.
//!
//! - [`ValueSpec`]: match-all, match-set, or match-all-except, validated at
//!   construction
//! - [`ValueMatcher`]: turns a spec and a column of observed values into the
//!   index set of matching records

mod matcher;
mod types;

pub use matcher::ValueMatcher;
pub use types::{ValueSpec, NEGATION};
