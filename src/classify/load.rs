//! Loading classifications from JSON.
//!
//! The document is an object of categories, each an object of
//! `tag: value_spec` rules:
//!
//! ```json
//! {
//!   "military":  { "landuse": "" },
//!   "education": { "amenity": ["school", "college"] },
//!   "built":     { "building": ["!no", "!vacant"] }
//! }
//! ```
//!
//! Document order is evaluation order. Repeated tag keys inside one category
//! are kept as separate rules.

use super::config::{Category, Classification};
use crate::error::{Error, Result, SpecError};
use crate::matching::ValueSpec;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// A JSON object read as a list of entries in document order.
struct Ordered<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

impl Classification {
    /// Parses a classification from JSON.
    ///
    /// # Errors
    ///
    /// - [`Error::Parse`] if the text is not an object of objects
    /// - [`Error::InvalidRule`] naming the category and tag whose value
    ///   specification is malformed
    /// - any validation error of [`Classification::new`]
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tagclass::classify::Classification;
    ///
    /// let c = Classification::from_json(r#"{
    ///     "military": { "landuse": "" },
    ///     "education": { "amenity": ["school"] }
    /// }"#).unwrap();
    /// assert_eq!(c.names(), vec!["military", "education"]);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Ordered<Ordered<Value>> =
            serde_json::from_str(json).map_err(|e| Error::Parse(e.to_string()))?;

        let mut categories = Vec::with_capacity(raw.0.len());
        for (name, rules) in raw.0 {
            let mut category = Category::new(name.as_str());
            for (tag, value) in rules.0 {
                match spec_from_json(&value) {
                    Ok(spec) => category = category.rule(tag, spec),
                    Err(source) => {
                        return Err(Error::InvalidRule {
                            category: name,
                            tag,
                            source,
                        })
                    }
                }
            }
            categories.push(category);
        }

        Classification::new(categories)
    }
}

/// Reads one serialized value specification.
fn spec_from_json(value: &Value) -> std::result::Result<ValueSpec, SpecError> {
    match value {
        Value::String(s) => ValueSpec::parse_str(s),
        Value::Array(items) => {
            let literals = items
                .iter()
                .map(|item| {
                    item.as_str().ok_or_else(|| SpecError::NotCharacter {
                        found: json_kind(item).to_string(),
                    })
                })
                .collect::<std::result::Result<Vec<&str>, _>>()?;
            ValueSpec::parse(&literals)
        }
        other => Err(SpecError::NotCharacter {
            found: json_kind(other).to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
