//! Frequency tables and top-K selection.

use crate::error::{PulseError, Result};
use crate::frequency::TokenFilter;
use crate::text::Token;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Token text to occurrence count.
///
/// Entries are kept in the order each key was first counted, which is what
/// makes [`FrequencyTable::top_k`] tie-breaking deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<(String, usize)>", try_from = "Vec<(String, usize)>")]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: FxHashMap<String, usize>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts token texts, case-sensitively, in iteration order.
    pub fn count<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a Token>,
    {
        let mut table = Self::new();
        for token in tokens {
            table.add(&token.text);
        }
        table
    }

    /// Counts the tokens that pass `filter`.
    pub fn from_tokens<'a, I>(tokens: I, filter: TokenFilter) -> Self
    where
        I: IntoIterator<Item = &'a Token>,
    {
        Self::count(tokens.into_iter().filter(|t| filter.matches(t)))
    }

    /// Adds one occurrence of `text`.
    pub fn add(&mut self, text: &str) {
        match self.index.get(text) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(text.to_string(), self.entries.len());
                self.entries.push((text.to_string(), 1));
            }
        }
    }

    /// Count for `text`, if present.
    pub fn get(&self, text: &str) -> Option<usize> {
        self.index.get(text).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Iterates `(text, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// The `k` most frequent entries.
    ///
    /// Sorted by descending count; equal counts keep first-seen order. A `k`
    /// larger than the table returns every entry.
    pub fn top_k(&self, k: usize) -> TopKResult {
        let mut ranked: Vec<&(String, usize)> = self.entries.iter().collect();
        // sort_by is stable, so ties stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        TopKResult {
            entries: ranked
                .into_iter()
                .take(k)
                .map(|(text, count)| (text.clone(), *count))
                .collect(),
        }
    }

    /// [`FrequencyTable::top_k`] for signed input; negative `k` is rejected.
    pub fn top_k_checked(&self, k: i64) -> Result<TopKResult> {
        let k = usize::try_from(k).map_err(|_| {
            PulseError::InvalidArgument(format!("k must be non-negative, got {}", k))
        })?;
        Ok(self.top_k(k))
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(slot, (text, _))| (text.clone(), slot))
            .collect();
    }

    /// Builds a table from `(text, count)` pairs in first-seen order.
    pub fn from_entries(entries: Vec<(String, usize)>) -> Result<Self> {
        let mut table = Self {
            entries,
            index: FxHashMap::default(),
        };
        table.rebuild_index();
        if table.index.len() != table.entries.len() {
            return Err(PulseError::InvalidArgument(
                "frequency table entries contain duplicate keys".into(),
            ));
        }
        if let Some((text, _)) = table.entries.iter().find(|(_, c)| *c == 0) {
            return Err(PulseError::InvalidArgument(format!(
                "frequency table entry '{}' has a zero count",
                text
            )));
        }
        Ok(table)
    }
}

impl From<FrequencyTable> for Vec<(String, usize)> {
    fn from(table: FrequencyTable) -> Self {
        table.entries
    }
}

impl TryFrom<Vec<(String, usize)>> for FrequencyTable {
    type Error = PulseError;

    fn try_from(entries: Vec<(String, usize)>) -> Result<Self> {
        Self::from_entries(entries)
    }
}

/// Ranked `(text, count)` pairs returned by [`FrequencyTable::top_k`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopKResult {
    entries: Vec<(String, usize)>,
}

impl TopKResult {
    /// Entries, highest count first.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// The top entry, if any.
    pub fn first(&self) -> Option<(&str, usize)> {
        self.entries.first().map(|(t, c)| (t.as_str(), *c))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(text, count)` in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }
}
