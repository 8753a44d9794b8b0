//! Rule tables and engine configuration.

use crate::error::{Error, Result};
use crate::matching::ValueSpec;
use crate::table::OVERFLOW_COLUMN;
use std::collections::HashSet;

/// One `tag -> value specification` rule of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub tag: String,
    pub spec: ValueSpec,
}

/// A named category and its ordered rules.
///
/// Rules are applied in insertion order. The same tag may appear in more
/// than one rule; each is evaluated on its own.
///
/// # Examples
///
/// ```
/// use u_tagclass::classify::Category;
/// use u_tagclass::matching::ValueSpec;
///
/// let shopping = Category::new("shopping")
///     .rule("shop", ValueSpec::MatchAll)
///     .parse_rule("amenity", &["marketplace"])
///     .unwrap();
/// assert_eq!(shopping.rules().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    priority: Option<i64>,
    position: usize,
    rules: Vec<Rule>,
}

impl Category {
    /// Creates a category with no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: None,
            position: 0,
            rules: Vec::new(),
        }
    }

    /// Appends a rule.
    pub fn rule(mut self, tag: impl Into<String>, spec: ValueSpec) -> Self {
        self.rules.push(Rule {
            tag: tag.into(),
            spec,
        });
        self
    }

    /// Appends a rule from its serialized literal list.
    ///
    /// An empty list means match-all, the same as the serialized `""`.
    pub fn parse_rule<S: AsRef<str>>(
        self,
        tag: impl Into<String>,
        literals: &[S],
    ) -> Result<Self> {
        let tag = tag.into();
        let spec = if literals.is_empty() {
            Ok(ValueSpec::MatchAll)
        } else {
            ValueSpec::parse(literals)
        };
        match spec {
            Ok(spec) => Ok(self.rule(tag, spec)),
            Err(source) => Err(Error::InvalidRule {
                category: self.name,
                tag,
                source,
            }),
        }
    }

    /// Sets an explicit priority. Lower runs first.
    ///
    /// Without one, a category's priority is its position in the
    /// classification.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective priority; always `Some` once part of a [`Classification`].
    pub fn priority(&self) -> Option<i64> {
        self.priority
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// An ordered, validated set of categories.
///
/// Categories are kept sorted by `(priority, insertion position)`. A record
/// matched by several categories is assigned to the first one in this order.
///
/// # Examples
///
/// ```
/// use u_tagclass::classify::{Category, Classification};
/// use u_tagclass::matching::ValueSpec;
///
/// let mut classification = Classification::new(vec![
///     Category::new("education").parse_rule("amenity", &["school"]).unwrap(),
///     Category::new("shopping").rule("shop", ValueSpec::MatchAll),
/// ])
/// .unwrap();
/// assert_eq!(classification.names(), vec!["education", "shopping"]);
///
/// classification.set_priority("shopping", -1).unwrap();
/// assert_eq!(classification.names(), vec!["shopping", "education"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    categories: Vec<Category>,
}

impl Classification {
    /// Validates and orders `categories`.
    ///
    /// Fails if there are no categories, a name is empty or repeated, a
    /// category has no rules, a rule has an empty tag, or a rule's value
    /// specification has an empty literal set.
    pub fn new(mut categories: Vec<Category>) -> Result<Self> {
        if categories.is_empty() {
            return Err(Error::EmptyClassification);
        }

        let mut names = HashSet::with_capacity(categories.len());
        for (position, category) in categories.iter_mut().enumerate() {
            if category.name.trim().is_empty() {
                return Err(Error::UnnamedCategory { position });
            }
            if !names.insert(category.name.clone()) {
                return Err(Error::DuplicateCategory {
                    name: category.name.clone(),
                });
            }
            if category.rules.is_empty() {
                return Err(Error::EmptyCategory {
                    category: category.name.clone(),
                });
            }
            if let Some(i) = category.rules.iter().position(|r| r.tag.is_empty()) {
                return Err(Error::EmptyTag {
                    category: category.name.clone(),
                    position: i,
                });
            }
            for rule in &category.rules {
                if let Err(source) = rule.spec.validate() {
                    return Err(Error::InvalidRule {
                        category: category.name.clone(),
                        tag: rule.tag.clone(),
                        source,
                    });
                }
            }
            category.position = position;
            category.priority.get_or_insert(position as i64);
        }

        let mut classification = Self { categories };
        classification.sort();
        Ok(classification)
    }

    /// Categories in evaluation order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Looks up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Total number of rules across all categories.
    pub fn rule_count(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }

    /// Changes a category's priority and reorders.
    ///
    /// Ties keep insertion order.
    pub fn set_priority(&mut self, name: &str, priority: i64) -> Result<()> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownCategory {
                name: name.to_string(),
            })?;
        category.priority = Some(priority);
        self.sort();
        Ok(())
    }

    fn sort(&mut self) {
        self.categories
            .sort_by_key(|c| (c.priority.unwrap_or(c.position as i64), c.position));
    }
}

/// Configuration for a classification run.
///
/// # Examples
///
/// ```
/// use u_tagclass::classify::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_overflow_column("tags")
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Name of the column holding packed tag blobs.
    pub overflow_column: String,

    /// Whether to scan blobs in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overflow_column: OVERFLOW_COLUMN.to_string(),
            parallel: true,
        }
    }
}

impl EngineConfig {
    /// Sets the overflow column name.
    pub fn with_overflow_column(mut self, name: impl Into<String>) -> Self {
        self.overflow_column = name.into();
        self
    }

    /// Enables or disables parallel blob scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.overflow_column.is_empty() {
            return Err(Error::Config("overflow_column must not be empty".into()));
        }
        Ok(())
    }
}
