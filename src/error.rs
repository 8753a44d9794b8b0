//! Error types.
//!
//! Two layers:
//!
//! - [`SpecError`]: a single value specification is malformed.
//! - [`Error`]: schema, configuration, and extraction failures. Rule-level
//!   failures wrap a [`SpecError`] together with the category and tag that
//!   produced it.
//!
//! Data-quality issues (malformed blobs, unmatched tags, empty categories)
//! are not errors; they simply contribute no matches.

/// A value specification could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// A match-set or match-all-except set with no literals.
    #[error("value set is empty")]
    EmptySet,

    /// Positive and `!`-negated literals in the same set.
    #[error("value set mixes positive and negated literals: {}", values.join(", "))]
    MixedMarkers { values: Vec<String> },

    /// A negation marker with nothing after it (`"!"`).
    #[error("negated literal is empty")]
    EmptyNegation,

    /// The serialized form was neither a string nor a list of strings.
    #[error("value specification must be a string or a list of strings, got {found}")]
    NotCharacter { found: String },
}

/// Errors raised before a classification or extraction run touches any record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Two columns share a name.
    #[error("duplicate column name `{name}`")]
    DuplicateColumn { name: String },

    /// A column's length disagrees with the collection's record count.
    #[error("column `{name}` has {found} values, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A row has a different number of cells than there are columns.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A rule needs the overflow column but the collection has none.
    #[error(
        "category `{category}`, tag `{tag}`: no dedicated column and overflow column `{column}` is absent"
    )]
    MissingOverflowColumn {
        column: String,
        category: String,
        tag: String,
    },

    /// The classification has no categories.
    #[error("classification has no categories")]
    EmptyClassification,

    /// A category name is empty.
    #[error("category at position {position} has an empty name")]
    UnnamedCategory { position: usize },

    /// Two categories share a name.
    #[error("duplicate category `{name}`")]
    DuplicateCategory { name: String },

    /// A category has no rules.
    #[error("category `{category}` has no rules")]
    EmptyCategory { category: String },

    /// A rule has an empty tag name.
    #[error("category `{category}`: rule {position} has an empty tag name")]
    EmptyTag { category: String, position: usize },

    /// A rule's value specification is malformed.
    #[error("category `{category}`, tag `{tag}`: {source}")]
    InvalidRule {
        category: String,
        tag: String,
        #[source]
        source: SpecError,
    },

    /// No category with this name exists.
    #[error("unknown category `{name}`")]
    UnknownCategory { name: String },

    /// A configuration struct failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The serialized classification could not be parsed.
    #[error("cannot parse classification: {0}")]
    Parse(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
