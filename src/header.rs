//! Character frequency table and its textual header form.
//!
//! The header is compact JSON, `{"T":2,"h":2,...}`, with entries in the order
//! their characters first occurred in the text. JSON escapes every control
//! character, so the serialized table never contains the `0x00` delimiter.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Unexpected, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(char, u64)>,
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every character of `text`.
    pub fn from_text(text: &str) -> Self {
        text.chars().map(|c| (c, 1)).collect()
    }

    /// Adds `count` occurrences of `symbol`, appending it if unseen. Counts
    /// saturate at `u64::MAX`.
    pub fn add(&mut self, symbol: char, count: u64) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 = self.entries[i].1.saturating_add(count),
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, count));
            }
        }
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.index.get(&symbol).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length in characters of the encoded text.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, &(_, count)| acc.saturating_add(count))
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn to_header(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    pub fn from_header(header: &[u8]) -> Result<Self> {
        let table: Self = serde_json::from_slice(header).map_err(|e| Error::MalformedHeader {
            message: "frequency table does not parse".into(),
            source: Some(e),
        })?;
        if table.is_empty() {
            return Err(Error::malformed("frequency table has no symbols"));
        }
        Ok(table)
    }
}

impl FromIterator<(char, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.add(symbol, count);
        }
        table
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        let mut buf = [0u8; 4];
        for &(symbol, count) in &self.entries {
            map.serialize_entry(&*symbol.encode_utf8(&mut buf), &count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FrequencyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = FrequencyTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from single characters to positive counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut table = FrequencyTable::new();
        while let Some((key, count)) = access.next_entry::<String, u64>()? {
            let mut chars = key.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(de::Error::invalid_value(
                        Unexpected::Str(&key),
                        &"a single character",
                    ))
                }
            };
            if count == 0 {
                return Err(de::Error::invalid_value(
                    Unexpected::Unsigned(0),
                    &"a positive count",
                ));
            }
            if table.get(symbol).is_some() {
                return Err(de::Error::custom(format_args!("duplicate symbol {symbol:?}")));
            }
            table.add(symbol, count);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_first_occurrence_order() {
        let t = FrequencyTable::from_text("banana");
        assert_eq!(t.iter().collect::<Vec<_>>(), vec![('b', 1), ('a', 3), ('n', 2)]);
        assert_eq!(t.total(), 6);
        assert_eq!(t.get('z'), None);
    }

    #[test]
    fn duplicate_counts_saturate() {
        let t: FrequencyTable = [('a', u64::MAX), ('b', 2), ('a', 1)].into_iter().collect();
        assert_eq!(t.get('a'), Some(u64::MAX));
        assert_eq!(t.len(), 2);
        assert_eq!(t.total(), u64::MAX);
    }

    #[test]
    fn header_is_compact_json() {
        let t = FrequencyTable::from_text("banana");
        assert_eq!(t.to_header().unwrap(), br#"{"b":1,"a":3,"n":2}"#);
    }

    #[test]
    fn header_never_holds_delimiter() {
        let t = FrequencyTable::from_text("a\0b\u{1}\"\\\n\u{e9}");
        let header = t.to_header().unwrap();
        assert!(!header.contains(&0));
        assert_eq!(FrequencyTable::from_header(&header).unwrap(), t);
    }

    #[test]
    fn parse_keeps_order() {
        let t = FrequencyTable::from_header(br#"{"z":1,"a":5}"#).unwrap();
        assert_eq!(t.iter().collect::<Vec<_>>(), vec![('z', 1), ('a', 5)]);
    }

    #[test]
    fn rejects_bad_headers() {
        for header in [
            "{}",
            "",
            r#"{"a":0}"#,
            r#"{"a":-1}"#,
            r#"{"a":1.5}"#,
            r#"{"ab":1}"#,
            r#"{"":1}"#,
            r#"{"a":1,"a":2}"#,
            "[1,2]",
            r#"{"a":1"#,
        ] {
            let err = FrequencyTable::from_header(header.as_bytes()).unwrap_err();
            assert!(matches!(err, Error::MalformedHeader { .. }), "{header}: {err}");
        }
    }
}
