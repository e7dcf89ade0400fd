//! Insertion-ordered symbol frequency table.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Maps a symbol (key name, button name) to how often it was seen.
///
/// Entries keep first-occurrence order, which is also the order they are
/// serialized in and the tie-break used by [`FrequencyTable::top`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `symbol`.
    pub fn increment(&mut self, symbol: &str) {
        self.add(symbol, 1);
    }

    fn add(&mut self, symbol: &str, count: u64) {
        match self.index.get(symbol) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                self.index.insert(symbol.to_string(), self.entries.len());
                self.entries.push((symbol.to_string(), count));
            }
        }
    }

    pub fn get(&self, symbol: &str) -> u64 {
        self.index
            .get(symbol)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all symbols.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(s, c)| (s.as_str(), *c))
    }

    /// The `n` most frequent symbols, highest count first. Equal counts keep
    /// first-occurrence order (stable sort).
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for (symbol, count) in iter {
            table.add(symbol.as_ref(), count);
        }
        table
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (symbol, count) in &self.entries {
            map.serialize_entry(symbol, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FrequencyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = FrequencyTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of symbol to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = FrequencyTable::new();
                while let Some((symbol, count)) = access.next_entry::<String, u64>()? {
                    table.add(&symbol, count);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
