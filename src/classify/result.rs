//! Classification results.

/// Separator used when alternates are flattened into one string.
pub const LIST_SEPARATOR: &str = ",";

/// Provenance of one category match: which tag and value triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub category: String,
    pub tag: String,
    /// `None` when a match-all rule hit a key whose value is not quoted.
    pub value: Option<String>,
}

impl TagMatch {
    /// Renders as `tag:"value"` (or `tag:NULL` without a value).
    pub fn tag_value(&self) -> String {
        match &self.value {
            Some(v) => format!("{}:\"{}\"", self.tag, v),
            None => format!("{}:NULL", self.tag),
        }
    }
}

/// The classification of one record.
///
/// A record gets at most one primary match, set by the first rule (in
/// category priority order) that matched it. Every later matching rule
/// appends an alternate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationRecord {
    pub main: Option<TagMatch>,
    pub alternates: Vec<TagMatch>,
}

impl ClassificationRecord {
    pub fn classified(&self) -> bool {
        self.main.is_some()
    }

    pub fn main_category(&self) -> Option<&str> {
        self.main.as_ref().map(|m| m.category.as_str())
    }

    pub fn main_tag(&self) -> Option<&str> {
        self.main.as_ref().map(|m| m.tag.as_str())
    }

    pub fn main_tag_value(&self) -> Option<&str> {
        self.main.as_ref().and_then(|m| m.value.as_deref())
    }

    /// Alternate category names in match order; `None` if there are none.
    pub fn alt_categories(&self) -> Option<Vec<&str>> {
        (!self.alternates.is_empty())
            .then(|| self.alternates.iter().map(|m| m.category.as_str()).collect())
    }

    /// Alternate `tag:"value"` entries, aligned with [`Self::alt_categories`].
    pub fn alt_tag_values(&self) -> Option<Vec<String>> {
        (!self.alternates.is_empty())
            .then(|| self.alternates.iter().map(TagMatch::tag_value).collect())
    }

    /// Flattens into the tabular output form.
    pub fn to_row(&self) -> ResultRow {
        ResultRow {
            classified: self.classified(),
            main_category: self.main_category().map(str::to_string),
            main_tag: self.main_tag().map(str::to_string),
            main_tag_value: self.main_tag_value().map(str::to_string),
            alt_categories: self.alt_categories().map(|v| v.join(LIST_SEPARATOR)),
            alt_tag_values: self.alt_tag_values().map(|v| v.join(LIST_SEPARATOR)),
        }
    }
}

/// One row of the tabular result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResultRow {
    pub classified: bool,
    pub main_category: Option<String>,
    pub main_tag: Option<String>,
    pub main_tag_value: Option<String>,
    /// Comma-joined.
    pub alt_categories: Option<String>,
    /// Comma-joined `tag:"value"` entries.
    pub alt_tag_values: Option<String>,
}

/// Match counts for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CategoryCount {
    pub category: String,
    /// Records with this category as primary.
    pub primary: usize,
    /// Alternate entries naming this category.
    pub alternate: usize,
}

/// Aggregate statistics of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassificationSummary {
    pub records: usize,
    pub classified: usize,
    pub classified_fraction: f64,
    /// In category evaluation order.
    pub categories: Vec<CategoryCount>,
}

/// Per-record results of one run, in input record order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub(crate) records: Vec<ClassificationRecord>,
    pub(crate) categories: Vec<String>,
}

impl ClassificationResult {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the input had no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, aligned with the input collection.
    pub fn records(&self) -> &[ClassificationRecord] {
        &self.records
    }

    /// The record at `index`.
    pub fn get(&self, index: usize) -> Option<&ClassificationRecord> {
        self.records.get(index)
    }

    /// Number of classified records.
    pub fn classified_count(&self) -> usize {
        self.records.iter().filter(|r| r.classified()).count()
    }

    /// Fraction of classified records; 0 for an empty input.
    pub fn classified_fraction(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.classified_count() as f64 / self.records.len() as f64
        }
    }

    /// The tabular output form.
    pub fn rows(&self) -> Vec<ResultRow> {
        self.records.iter().map(ClassificationRecord::to_row).collect()
    }

    /// Per-category counts and overall coverage.
    pub fn summary(&self) -> ClassificationSummary {
        let mut categories: Vec<CategoryCount> = self
            .categories
            .iter()
            .map(|name| CategoryCount {
                category: name.clone(),
                primary: 0,
                alternate: 0,
            })
            .collect();

        let slot = |name: &str| self.categories.iter().position(|c| c == name);
        for record in &self.records {
            if let Some(i) = record.main_category().and_then(slot) {
                categories[i].primary += 1;
            }
            for alt in &record.alternates {
                if let Some(i) = slot(alt.category.as_str()) {
                    categories[i].alternate += 1;
                }
            }
        }

        ClassificationSummary {
            records: self.len(),
            classified: self.classified_count(),
            classified_fraction: self.classified_fraction(),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_match(category: &str, tag: &str, value: Option<&str>) -> TagMatch {
        TagMatch {
            category: category.into(),
            tag: tag.into(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_unclassified_record() {
        let r = ClassificationRecord::default();
        assert!(!r.classified());
        assert!(r.main_category().is_none());
        assert!(r.main_tag().is_none());
        assert!(r.main_tag_value().is_none());
        assert!(r.alt_categories().is_none());
        assert!(r.alt_tag_values().is_none());
    }

    #[test]
    fn test_to_row_joins_alternates() {
        let r = ClassificationRecord {
            main: Some(tag_match("military", "landuse", Some("military"))),
            alternates: vec![
                tag_match("education", "amenity", Some("school")),
                tag_match("leisure", "leisure", None),
            ],
        };
        let row = r.to_row();
        assert!(row.classified);
        assert_eq!(row.main_category.as_deref(), Some("military"));
        assert_eq!(row.main_tag.as_deref(), Some("landuse"));
        assert_eq!(row.main_tag_value.as_deref(), Some("military"));
        assert_eq!(row.alt_categories.as_deref(), Some("education,leisure"));
        assert_eq!(
            row.alt_tag_values.as_deref(),
            Some(r#"amenity:"school",leisure:NULL"#)
        );
    }

    #[test]
    fn test_summary() {
        let result = ClassificationResult {
            records: vec![
                ClassificationRecord {
                    main: Some(tag_match("a", "x", Some("1"))),
                    alternates: vec![tag_match("b", "y", Some("2"))],
                },
                ClassificationRecord::default(),
                ClassificationRecord {
                    main: Some(tag_match("b", "y", Some("3"))),
                    alternates: vec![],
                },
                ClassificationRecord::default(),
            ],
            categories: vec!["a".into(), "b".into(), "c".into()],
        };
        let summary = result.summary();
        assert_eq!(summary.records, 4);
        assert_eq!(summary.classified, 2);
        assert!((summary.classified_fraction - 0.5).abs() < 1e-12);
        assert_eq!(
            summary.categories,
            vec![
                CategoryCount {
                    category: "a".into(),
                    primary: 1,
                    alternate: 0
                },
                CategoryCount {
                    category: "b".into(),
                    primary: 1,
                    alternate: 1
                },
                CategoryCount {
                    category: "c".into(),
                    primary: 0,
                    alternate: 0
                },
            ]
        );
    }

    #[test]
    fn test_empty_result() {
        let result = ClassificationResult {
            records: vec![],
            categories: vec![],
        };
        assert!(result.is_empty());
        assert!(result.classified_fraction().abs() < 1e-12);
        assert!(result.rows().is_empty());
    }
}
