//! Classification execution.
//!
//! [`ClassificationEngine`] walks the categories in priority order and, within
//! each category, its rules in order:
//!
//! resolve tag values → match → assign primary or append alternate → next rule

use super::config::{Category, Classification, EngineConfig, Rule};
use super::result::{ClassificationRecord, ClassificationResult, TagMatch};
use crate::codec::{extract_batch, has_key_batch};
use crate::error::{Error, Result};
use crate::matching::ValueMatcher;
use crate::table::{Column, FeatureCollection};
use tracing::{debug, info};

/// Where a rule reads its tag values from.
enum Source<'a> {
    /// The tag has its own column.
    Column(&'a Column),
    /// The tag lives in the overflow blobs.
    Overflow(&'a [Option<String>]),
}

/// A rule with its value source resolved against a collection.
struct PlannedRule<'a> {
    category: &'a Category,
    rule: &'a Rule,
    source: Source<'a>,
}

/// Mutable state of one run, indexed by record position.
struct RunState {
    classified: Vec<bool>,
    records: Vec<ClassificationRecord>,
}

impl RunState {
    fn new(len: usize) -> Self {
        Self {
            classified: vec![false; len],
            records: vec![ClassificationRecord::default(); len],
        }
    }

    /// Records a match; returns `true` if it became the record's primary.
    fn assign(&mut self, index: usize, tag_match: TagMatch) -> bool {
        if self.classified[index] {
            self.records[index].alternates.push(tag_match);
            false
        } else {
            self.classified[index] = true;
            self.records[index].main = Some(tag_match);
            true
        }
    }
}

/// Executes a classification over a feature collection.
///
/// # Usage
///
/// ```
/// use u_tagclass::classify::{Category, Classification, ClassificationEngine};
/// use u_tagclass::matching::ValueSpec;
/// use u_tagclass::table::FeatureCollection;
///
/// let fc = FeatureCollection::from_rows(
///     &["amenity", "other_tags"],
///     &[
///         vec![Some("school"), None],
///         vec![None, Some(r#""shop"=>"bakery""#)],
///         vec![None, None],
///     ],
/// )
/// .unwrap();
/// let classification = Classification::new(vec![
///     Category::new("education").parse_rule("amenity", &["school"]).unwrap(),
///     Category::new("shopping").rule("shop", ValueSpec::MatchAll),
/// ])
/// .unwrap();
///
/// let result = ClassificationEngine::run(&fc, &classification).unwrap();
/// assert_eq!(result.records()[0].main_category(), Some("education"));
/// assert_eq!(result.records()[1].main_tag_value(), Some("bakery"));
/// assert!(!result.records()[2].classified());
/// ```
pub struct ClassificationEngine;

impl ClassificationEngine {
    /// Runs with the default [`EngineConfig`].
    pub fn run(
        collection: &FeatureCollection,
        classification: &Classification,
    ) -> Result<ClassificationResult> {
        Self::run_with_config(collection, classification, &EngineConfig::default())
    }

    /// Runs with an explicit configuration.
    ///
    /// Every rule is resolved against the collection before any record is
    /// touched, so a failing run has no partial output.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `config` is invalid
    /// - [`Error::MissingOverflowColumn`] if a rule's tag has no dedicated
    ///   column and the collection has no overflow column
    pub fn run_with_config(
        collection: &FeatureCollection,
        classification: &Classification,
        config: &EngineConfig,
    ) -> Result<ClassificationResult> {
        config.validate()?;
        let plan = plan_rules(collection, classification, config)?;

        let mut state = RunState::new(collection.len());
        for step in &plan {
            apply_rule(step, &mut state, config.parallel);
        }

        let result = ClassificationResult {
            records: state.records,
            categories: classification
                .names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        };

        info!(
            records = result.len(),
            classified = result.classified_count(),
            categories = classification.categories().len(),
            rules = plan.len(),
            "classification finished"
        );
        Ok(result)
    }
}

/// Resolves each rule's value source, in evaluation order.
fn plan_rules<'a>(
    collection: &'a FeatureCollection,
    classification: &'a Classification,
    config: &EngineConfig,
) -> Result<Vec<PlannedRule<'a>>> {
    let overflow = collection.overflow(&config.overflow_column);
    let mut plan = Vec::with_capacity(classification.rule_count());

    for category in classification.categories() {
        for rule in category.rules() {
            let source = match collection.tag_column(&rule.tag, &config.overflow_column) {
                Some(column) => Source::Column(column),
                None => match overflow {
                    Some(blobs) => Source::Overflow(blobs),
                    None => {
                        return Err(Error::MissingOverflowColumn {
                            column: config.overflow_column.clone(),
                            category: category.name().to_string(),
                            tag: rule.tag.clone(),
                        })
                    }
                },
            };
            plan.push(PlannedRule {
                category,
                rule,
                source,
            });
        }
    }

    Ok(plan)
}

/// Evaluates one rule and folds its matches into `state`.
fn apply_rule(step: &PlannedRule<'_>, state: &mut RunState, parallel: bool) {
    let (matched, values) = resolve(step, parallel);

    let mut new = 0usize;
    for &i in &matched {
        let tag_match = TagMatch {
            category: step.category.name().to_string(),
            tag: step.rule.tag.clone(),
            value: values[i].map(str::to_string),
        };
        if state.assign(i, tag_match) {
            new += 1;
        }
    }

    debug!(
        category = step.category.name(),
        tag = %step.rule.tag,
        spec = %step.rule.spec,
        matched = matched.len(),
        new,
        seen = matched.len() - new,
        "rule applied"
    );
}

/// Matching record indices and the observed value of every record.
fn resolve<'a>(step: &PlannedRule<'a>, parallel: bool) -> (Vec<usize>, Vec<Option<&'a str>>) {
    let matcher = ValueMatcher::new(&step.rule.spec);
    match step.source {
        Source::Column(column) => {
            let values = column.as_strs();
            (matcher.match_indices(&values), values)
        }
        Source::Overflow(blobs) => {
            let present = has_key_batch(blobs, &step.rule.tag, parallel);
            let values = extract_batch(blobs, &present, &step.rule.tag, parallel);
            let matched = if step.rule.spec.is_match_all() {
                // Key presence alone decides; the value is provenance only.
                present
                    .iter()
                    .enumerate()
                    .filter(|&(_, &p)| p)
                    .map(|(i, _)| i)
                    .collect()
            } else {
                matcher.match_indices(&values)
            };
            (matched, values)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
