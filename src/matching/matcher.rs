//! Index-set evaluation of a value specification.

use super::types::ValueSpec;
use std::collections::BTreeSet;

/// A value specification prepared for evaluation over a column.
///
/// One-literal sets compare by equality instead of a set lookup.
///
/// # Examples
///
/// ```
/// use u_tagclass::matching::{ValueMatcher, ValueSpec};
///
/// let spec = ValueSpec::parse(&["!no", "!vacant"]).unwrap();
/// let values = [Some("no"), Some("vacant"), Some("shop"), None];
/// assert_eq!(ValueMatcher::new(&spec).match_indices(&values), vec![2]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValueMatcher<'s> {
    kind: Kind<'s>,
}

#[derive(Debug, Clone, Copy)]
enum Kind<'s> {
    Present,
    Equals(&'s str),
    In(&'s BTreeSet<String>),
    NotIn(&'s BTreeSet<String>),
}

impl<'s> ValueMatcher<'s> {
    /// Prepares `spec` for evaluation.
    pub fn new(spec: &'s ValueSpec) -> Self {
        let kind = match spec {
            ValueSpec::MatchAll => Kind::Present,
            ValueSpec::MatchSet(set) if set.len() == 1 => match set.first() {
                Some(only) => Kind::Equals(only.as_str()),
                None => Kind::In(set),
            },
            ValueSpec::MatchSet(set) => Kind::In(set),
            ValueSpec::MatchAllExcept(set) => Kind::NotIn(set),
        };
        Self { kind }
    }

    /// Tests one observed value. Missing never matches.
    pub fn is_match(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self.kind {
            Kind::Present => true,
            Kind::Equals(only) => value == only,
            Kind::In(set) => set.contains(value),
            Kind::NotIn(set) => !set.contains(value),
        }
    }

    /// Indices of matching records, ascending.
    pub fn match_indices(&self, values: &[Option<&str>]) -> Vec<usize> {
        values
            .iter()
            .enumerate()
            .filter(|(_, v)| self.is_match(**v))
            .map(|(i, _)| i)
            .collect()
    }
}
