//! Feature collection and columns.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Conventional name of the overflow column in GIS exports.
pub const OVERFLOW_COLUMN: &str = "other_tags";

/// A named column of optional string values, one per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<String>>,
}

impl Column {
    /// Creates a column from owned values.
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a column from borrowed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tagclass::table::Column;
    ///
    /// let col = Column::from_strs("amenity", &[Some("school"), None]);
    /// assert_eq!(col.len(), 2);
    /// assert_eq!(col.non_missing(), 1);
    /// ```
    pub fn from_strs(name: impl Into<String>, values: &[Option<&str>]) -> Self {
        Self::new(
            name,
            values.iter().map(|v| v.map(str::to_string)).collect(),
        )
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the column has no records.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-missing values.
    pub fn non_missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Fraction of non-missing values. An empty column has rate 0.
    pub fn fill_rate(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.non_missing() as f64 / self.values.len() as f64
        }
    }

    /// Values as borrowed strings.
    pub fn as_strs(&self) -> Vec<Option<&str>> {
        self.values.iter().map(|v| v.as_deref()).collect()
    }
}

/// An ordered set of records stored column-wise.
///
/// Column names are unique and every column has the same length. Column
/// order carries no meaning; record order does, and every result produced
/// from a collection is aligned with it.
///
/// # Examples
///
/// ```
/// use u_tagclass::table::{Column, FeatureCollection};
///
/// let fc = FeatureCollection::new(vec![
///     Column::from_strs("amenity", &[Some("school"), None]),
///     Column::from_strs("other_tags", &[None, Some(r#""shop"=>"bakery""#)]),
/// ])
/// .unwrap();
/// assert_eq!(fc.len(), 2);
/// assert!(fc.has_column("amenity"));
/// ```
#[derive(Debug, Clone)]
pub struct FeatureCollection {
    len: usize,
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl FeatureCollection {
    /// Builds a collection, rejecting duplicate names and ragged columns.
    ///
    /// The record count is taken from the first column; a collection with
    /// no columns has no records.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let len = columns.first().map_or(0, Column::len);
        let mut index = HashMap::with_capacity(columns.len());

        for (i, col) in columns.iter().enumerate() {
            if index.insert(col.name.clone(), i).is_some() {
                return Err(Error::DuplicateColumn {
                    name: col.name.clone(),
                });
            }
            if col.len() != len {
                return Err(Error::ColumnLength {
                    name: col.name.clone(),
                    expected: len,
                    found: col.len(),
                });
            }
        }

        Ok(Self {
            len,
            columns,
            index,
        })
    }

    /// Builds a collection from row-major data.
    ///
    /// Each row lists one cell per name in `names`, in the same order.
    pub fn from_rows(names: &[&str], rows: &[Vec<Option<&str>>]) -> Result<Self> {
        let mut values: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(rows.len()); names.len()];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != names.len() {
                return Err(Error::RowLength {
                    row: r,
                    expected: names.len(),
                    found: row.len(),
                });
            }
            for (c, cell) in row.iter().enumerate() {
                values[c].push(cell.map(str::to_string));
            }
        }

        Self::new(
            names
                .iter()
                .zip(values)
                .map(|(name, vals)| Column::new(*name, vals))
                .collect(),
        )
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All columns, in construction order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names, in construction order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Returns `true` if a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The dedicated column for `tag`, excluding the overflow column itself.
    pub fn tag_column(&self, tag: &str, overflow: &str) -> Option<&Column> {
        if tag == overflow {
            return None;
        }
        self.column(tag)
    }

    /// The blobs of the overflow column named `overflow`, if present.
    pub fn overflow(&self, overflow: &str) -> Option<&[Option<String>]> {
        self.column(overflow).map(|c| c.values.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ok() {
        let fc = FeatureCollection::new(vec![
            Column::from_strs("a", &[Some("1"), None, Some("3")]),
            Column::from_strs("b", &[None, None, None]),
        ])
        .unwrap();
        assert_eq!(fc.len(), 3);
        assert_eq!(fc.column_names(), vec!["a", "b"]);
        assert_eq!(fc.column("a").unwrap().non_missing(), 2);
        assert!(fc.column("c").is_none());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = FeatureCollection::new(vec![
            Column::from_strs("a", &[Some("1")]),
            Column::from_strs("a", &[Some("2")]),
        ])
        .unwrap_err();
        assert_eq!(err, Error::DuplicateColumn { name: "a".into() });
    }

    #[test]
    fn test_ragged_column_rejected() {
        let err = FeatureCollection::new(vec![
            Column::from_strs("a", &[Some("1"), Some("2")]),
            Column::from_strs("b", &[Some("1")]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::ColumnLength {
                name: "b".into(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_empty_collection() {
        let fc = FeatureCollection::new(vec![]).unwrap();
        assert!(fc.is_empty());
        assert!(fc.overflow(OVERFLOW_COLUMN).is_none());
    }

    #[test]
    fn test_from_rows() {
        let fc = FeatureCollection::from_rows(
            &["amenity", OVERFLOW_COLUMN],
            &[
                vec![Some("school"), None],
                vec![None, Some(r#""shop"=>"bakery""#)],
            ],
        )
        .unwrap();
        assert_eq!(fc.len(), 2);
        assert_eq!(
            fc.column("amenity").unwrap().as_strs(),
            vec![Some("school"), None]
        );
        assert_eq!(fc.overflow(OVERFLOW_COLUMN).unwrap().len(), 2);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = FeatureCollection::from_rows(&["a", "b"], &[vec![Some("1")]]).unwrap_err();
        assert!(matches!(err, Error::RowLength { row: 0, .. }));
    }

    #[test]
    fn test_tag_column_excludes_overflow() {
        let fc = FeatureCollection::from_rows(&["shop", OVERFLOW_COLUMN], &[vec![Some("x"), None]])
            .unwrap();
        assert!(fc.tag_column("shop", OVERFLOW_COLUMN).is_some());
        assert!(fc.tag_column(OVERFLOW_COLUMN, OVERFLOW_COLUMN).is_none());
    }

    #[test]
    fn test_fill_rate() {
        let col = Column::from_strs("a", &[Some("1"), None, None, Some("")]);
        assert!((col.fill_rate() - 0.5).abs() < 1e-12);
        assert!((Column::new("e", vec![]).fill_rate()).abs() < 1e-12);
    }
}
