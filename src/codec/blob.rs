//! Scanning of a single packed tag blob.
//!
//! A blob is a sequence of `"key"=>"value"` pairs separated by commas,
//! optionally wrapped in one extra pair of quote characters by the
//! exporting tool:
//!
//! ```text
//! "amenity"=>"cafe","cuisine"=>"coffee_shop"
//! '"amenity"=>"cafe","cuisine"=>"coffee_shop"'
//! ```
//!
//! Lookups never decode the whole blob. A [`KeyPattern`] searches for the
//! literal `"key"=>` needle and reads one quoted value after it. Escaped
//! quotes inside values are not unescaped: a value containing `"` is cut
//! at that quote.

const ARROW: &str = "=>";

/// A precompiled lookup for one tag key.
///
/// Building the needle once and reusing it across every record of a batch
/// keeps per-record work to a single substring search.
///
/// # Examples
///
/// ```
/// use u_tagclass::codec::KeyPattern;
///
/// let shop = KeyPattern::new("shop");
/// let blob = r#""name"=>"Mill","shop"=>"bakery""#;
/// assert!(shop.is_in(blob));
/// assert_eq!(shop.extract(blob), Some("bakery"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPattern {
    key_len: usize,
    needle: String,
}

impl KeyPattern {
    /// Creates the pattern `"key"=>`.
    pub fn new(key: &str) -> Self {
        Self {
            key_len: key.len(),
            needle: format!("\"{key}\"{ARROW}"),
        }
    }

    /// The key this pattern looks for.
    pub fn key(&self) -> &str {
        &self.needle[1..1 + self.key_len]
    }

    /// Returns `true` if the blob contains the literal `"key"=>`.
    pub fn is_in(&self, blob: &str) -> bool {
        blob.contains(self.needle.as_str())
    }

    /// Returns the value of the first occurrence of the key.
    ///
    /// The value is the text between the quote following `=>` and the next
    /// quote. Returns `None` if the key is absent or its value is not quoted
    /// (e.g. an unquoted `NULL`).
    pub fn extract<'b>(&self, blob: &'b str) -> Option<&'b str> {
        let start = blob.find(self.needle.as_str())? + self.needle.len();
        let rest = blob[start..].trim_start().strip_prefix('"')?;
        let end = rest.find('"')?;
        Some(&rest[..end])
    }
}

/// Returns `true` if `blob` contains `"key"=>`. A missing blob has no keys.
pub fn has_key(blob: Option<&str>, key: &str) -> bool {
    blob.is_some_and(|b| KeyPattern::new(key).is_in(b))
}

/// Extracts the value of the first occurrence of `key` in `blob`.
///
/// # Examples
///
/// ```
/// use u_tagclass::codec::extract_value;
///
/// let blob = r#""a"=>"1","b"=>"2""#;
/// assert_eq!(extract_value(Some(blob), "b"), Some("2"));
/// assert_eq!(extract_value(Some(blob), "c"), None);
/// assert_eq!(extract_value(None, "a"), None);
/// ```
pub fn extract_value<'b>(blob: Option<&'b str>, key: &str) -> Option<&'b str> {
    blob.and_then(|b| KeyPattern::new(key).extract(b))
}

/// One decoded entry of a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPair<'a> {
    pub key: &'a str,
    /// `None` when decoding keys only.
    pub value: Option<&'a str>,
}

/// Decodes every pair of a blob, in order.
///
/// Returns `None` for a missing blob or when no well-formed pair is found.
/// Wrapper quotes and stray text between pairs are skipped; pairs whose value
/// is not quoted are dropped. Duplicate keys are all returned.
///
/// # Examples
///
/// ```
/// use u_tagclass::codec::decode;
///
/// let pairs = decode(Some(r#"'"a"=>"1","b"=>"2"'"#), true).unwrap();
/// assert_eq!(pairs.len(), 2);
/// assert_eq!((pairs[1].key, pairs[1].value), ("b", Some("2")));
/// ```
pub fn decode(blob: Option<&str>, include_values: bool) -> Option<Vec<TagPair<'_>>> {
    let blob = blob?;
    let mut pairs = Vec::new();
    let mut pos = 0;

    while let Some(offset) = blob[pos..].find('"') {
        let key_start = pos + offset + 1;
        let Some(key_len) = blob[key_start..].find('"') else {
            break;
        };
        let key_end = key_start + key_len;

        let Some(after_arrow) = blob[key_end + 1..].strip_prefix(ARROW) else {
            // Not a key; the closing quote may open the real one.
            pos = key_start;
            continue;
        };
        let Some(value_part) = after_arrow.trim_start().strip_prefix('"') else {
            pos = blob.len() - after_arrow.len();
            continue;
        };
        let value_start = blob.len() - value_part.len();
        let Some(value_len) = value_part.find('"') else {
            break;
        };
        let value_end = value_start + value_len;

        pairs.push(TagPair {
            key: &blob[key_start..key_end],
            value: include_values.then(|| &blob[value_start..value_end]),
        });
        pos = value_end + 1;
    }

    (!pairs.is_empty()).then_some(pairs)
}

/// Builds a canonical blob from key/value pairs.
///
/// No escaping is performed; keys and values containing `"` produce a blob
/// that does not scan back to the same pairs.
pub fn encode<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (i, (key, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(key);
        out.push('"');
        out.push_str(ARROW);
        out.push('"');
        out.push_str(value);
        out.push('"');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BLOB: &str = r#""a"=>"1","b"=>"2""#;

    #[test]
    fn test_has_key() {
        assert!(has_key(Some(BLOB), "a"));
        assert!(has_key(Some(BLOB), "b"));
        assert!(!has_key(Some(BLOB), "c"));
        assert!(!has_key(None, "a"));
    }

    #[test]
    fn test_has_key_requires_arrow() {
        // "1" appears quoted, but only as a value.
        assert!(!has_key(Some(BLOB), "1"));
    }

    #[test]
    fn test_has_key_no_prefix_match() {
        let blob = r#""shop:type"=>"x""#;
        assert!(!has_key(Some(blob), "shop"));
        assert!(has_key(Some(blob), "shop:type"));
    }

    #[test]
    fn test_extract_value() {
        assert_eq!(extract_value(Some(BLOB), "a"), Some("1"));
        assert_eq!(extract_value(Some(BLOB), "b"), Some("2"));
        assert_eq!(extract_value(Some(BLOB), "c"), None);
    }

    #[test]
    fn test_extract_first_occurrence_wins() {
        let blob = r#""k"=>"first","k"=>"second""#;
        assert_eq!(extract_value(Some(blob), "k"), Some("first"));
    }

    #[test]
    fn test_extract_empty_value() {
        let blob = r#""note"=>"","b"=>"2""#;
        assert_eq!(extract_value(Some(blob), "note"), Some(""));
    }

    #[test]
    fn test_extract_wrapped_blob() {
        let blob = r#"'"a"=>"1","b"=>"2"'"#;
        assert_eq!(extract_value(Some(blob), "b"), Some("2"));
    }

    #[test]
    fn test_extract_unquoted_value() {
        let blob = r#""a"=>NULL,"b"=>"2""#;
        assert!(has_key(Some(blob), "a"));
        assert_eq!(extract_value(Some(blob), "a"), None);
        assert_eq!(extract_value(Some(blob), "b"), Some("2"));
    }

    #[test]
    fn test_extract_unterminated_value() {
        let blob = r#""a"=>"1"#;
        assert_eq!(extract_value(Some(blob), "a"), None);
    }

    #[test]
    fn test_extract_non_ascii() {
        let blob = r#""name"=>"Bäckerei Müller","shop"=>"bakery""#;
        assert_eq!(extract_value(Some(blob), "name"), Some("Bäckerei Müller"));
    }

    #[test]
    fn test_escaped_quote_is_cut() {
        // Known limitation: no unescaping.
        let blob = r#""name"=>"The \"Anchor\"","pub"=>"yes""#;
        assert_eq!(extract_value(Some(blob), "name"), Some(r"The \"));
    }

    #[test]
    fn test_key_pattern_key() {
        let p = KeyPattern::new("addr:street");
        assert_eq!(p.key(), "addr:street");
    }

    #[test]
    fn test_decode_keys_only() {
        let pairs = decode(Some(BLOB), false).unwrap();
        let keys: Vec<&str> = pairs.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(pairs.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn test_decode_with_values() {
        let pairs = decode(Some(BLOB), true).unwrap();
        assert_eq!(
            pairs,
            vec![
                TagPair {
                    key: "a",
                    value: Some("1")
                },
                TagPair {
                    key: "b",
                    value: Some("2")
                },
            ]
        );
    }

    #[test]
    fn test_decode_double_quote_wrapper() {
        let blob = r#"""a"=>"1","b"=>"2"""#;
        let pairs = decode(Some(blob), true).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].key, "a");
        assert_eq!(pairs[1].value, Some("2"));
    }

    #[test]
    fn test_decode_skips_unquoted_value() {
        let blob = r#""a"=>NULL,"b"=>"2""#;
        let pairs = decode(Some(blob), true).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].key, "b");
    }

    #[test]
    fn test_decode_missing_or_empty() {
        assert!(decode(None, true).is_none());
        assert!(decode(Some(""), true).is_none());
        assert!(decode(Some("garbage without pairs"), false).is_none());
        assert!(decode(Some(r#""a"=>"#), true).is_none());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode([("a", "1"), ("b", "2")]), BLOB);
        assert_eq!(encode(std::iter::empty()), "");
    }

    fn pairs_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::btree_map("[a-z][a-z0-9_]{0,8}", "[A-Za-z0-9 ]{0,12}", 1..8)
            .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_extract_recovers_every_value(pairs in pairs_strategy()) {
            let blob = encode(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            for (k, v) in &pairs {
                prop_assert!(has_key(Some(&blob), k));
                prop_assert_eq!(extract_value(Some(&blob), k), Some(v.as_str()));
            }
        }

        #[test]
        fn prop_decode_recovers_pairs_in_order(pairs in pairs_strategy(), wrap in any::<bool>()) {
            let mut blob = encode(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            if wrap {
                blob = format!("'{blob}'");
            }
            let decoded: Vec<(String, String)> = decode(Some(&blob), true)
                .unwrap()
                .into_iter()
                .map(|p| (p.key.to_string(), p.value.unwrap().to_string()))
                .collect();
            prop_assert_eq!(decoded, pairs);
        }
    }
}
