//! Value specifications.

use super::matcher::ValueMatcher;
use crate::error::SpecError;
use std::collections::BTreeSet;
use std::fmt;

/// Marker prefix for negated literals in the serialized form.
pub const NEGATION: char = '!';

/// Which values of a tag qualify a record for a category.
///
/// A missing tag value never matches, whatever the form.
///
/// # Serialized Form
///
/// | Serialized              | Variant                         |
/// |-------------------------|---------------------------------|
/// | `""`                    | `MatchAll`                      |
/// | `["a", "b"]`            | `MatchSet({a, b})`              |
/// | `["!a", "!b"]`          | `MatchAllExcept({a, b})`        |
/// | `["a", "!b"]`           | rejected ([`SpecError::MixedMarkers`]) |
///
/// # Examples
///
/// ```
/// use u_tagclass::matching::ValueSpec;
///
/// let spec = ValueSpec::parse(&["!no", "!vacant"]).unwrap();
/// assert!(spec.matches(Some("shop")));
/// assert!(!spec.matches(Some("no")));
/// assert!(!spec.matches(None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSpec {
    /// Any present value.
    MatchAll,

    /// A present value that is one of the literals.
    MatchSet(BTreeSet<String>),

    /// A present value that is none of the literals.
    MatchAllExcept(BTreeSet<String>),
}

impl ValueSpec {
    /// A match-set over `values`. Fails on an empty set.
    pub fn match_set<I, S>(values: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            return Err(SpecError::EmptySet);
        }
        Ok(Self::MatchSet(set))
    }

    /// A match-all-except over `values` (given without `!`). Fails on an empty set.
    pub fn match_all_except<I, S>(values: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            return Err(SpecError::EmptySet);
        }
        Ok(Self::MatchAllExcept(set))
    }

    /// Parses a serialized literal list.
    ///
    /// All literals must carry the `!` marker or none may.
    pub fn parse<S: AsRef<str>>(literals: &[S]) -> Result<Self, SpecError> {
        if literals.is_empty() {
            return Err(SpecError::EmptySet);
        }

        let negated = literals
            .iter()
            .filter(|l| l.as_ref().starts_with(NEGATION))
            .count();

        if negated == 0 {
            return Self::match_set(literals.iter().map(|l| l.as_ref()));
        }
        if negated != literals.len() {
            return Err(SpecError::MixedMarkers {
                values: literals.iter().map(|l| l.as_ref().to_string()).collect(),
            });
        }

        let mut set = BTreeSet::new();
        for literal in literals {
            let value = &literal.as_ref()[NEGATION.len_utf8()..];
            if value.is_empty() {
                return Err(SpecError::EmptyNegation);
            }
            set.insert(value.to_string());
        }
        Ok(Self::MatchAllExcept(set))
    }

    /// Parses the single-string serialized form.
    ///
    /// The empty string means match-all; any other string is a one-literal
    /// list.
    pub fn parse_str(s: &str) -> Result<Self, SpecError> {
        if s.is_empty() {
            Ok(Self::MatchAll)
        } else {
            Self::parse(&[s])
        }
    }

    /// Returns `true` for [`ValueSpec::MatchAll`].
    pub fn is_match_all(&self) -> bool {
        matches!(self, Self::MatchAll)
    }

    /// Checks the invariants the constructors enforce.
    ///
    /// The variants are public, so a spec built directly may carry an empty
    /// literal set.
    pub fn validate(&self) -> Result<(), SpecError> {
        match self {
            Self::MatchAll => Ok(()),
            Self::MatchSet(set) | Self::MatchAllExcept(set) if set.is_empty() => {
                Err(SpecError::EmptySet)
            }
            Self::MatchSet(_) | Self::MatchAllExcept(_) => Ok(()),
        }
    }

    /// Tests a single observed value.
    pub fn matches(&self, value: Option<&str>) -> bool {
        ValueMatcher::new(self).is_match(value)
    }
}

impl fmt::Display for ValueSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (set, marker) = match self {
            Self::MatchAll => return f.write_str("\"\""),
            Self::MatchSet(set) => (set, ""),
            Self::MatchAllExcept(set) => (set, "!"),
        };
        f.write_str("[")?;
        for (i, v) in set.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{marker}{v}\"")?;
        }
        f.write_str("]")
    }
}
