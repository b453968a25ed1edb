//! Word valence lexicons.

use crate::error::{PulseError, Result};
use log::info;
use rustc_hash::FxHashMap;
use std::path::Path;

const VALENCE_EN_TSV: &str = include_str!("valence_en.tsv");

/// Maps terms to signed integer valences.
pub trait Lexicon: Send + Sync {
    /// Valence of a lowercase term, or `None` if it is not listed.
    ///
    /// Multi-word terms are single-space separated.
    fn valence(&self, term: &str) -> Option<i32>;

    /// Longest listed term, in words.
    fn max_phrase_len(&self) -> usize {
        1
    }
}

impl<L: Lexicon + ?Sized> Lexicon for std::sync::Arc<L> {
    fn valence(&self, term: &str) -> Option<i32> {
        (**self).valence(term)
    }

    fn max_phrase_len(&self) -> usize {
        (**self).max_phrase_len()
    }
}

/// In-memory valence lexicon in the tab-separated `term<TAB>valence` format.
#[derive(Debug, Clone, Default)]
pub struct ValenceLexicon {
    entries: FxHashMap<String, i32>,
    max_phrase_len: usize,
}

impl ValenceLexicon {
    /// The built-in English lexicon.
    pub fn builtin() -> Result<Self> {
        Self::parse(VALENCE_EN_TSV, "built-in lexicon")
    }

    /// Loads a lexicon file.
    ///
    /// Any read or parse failure is a [`PulseError::Configuration`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PulseError::Configuration(format!(
                "unable to load sentiment lexicon '{}': {}",
                path.display(),
                e
            ))
        })?;
        let lexicon = Self::parse(&raw, &path.display().to_string())?;
        info!("Loaded {} lexicon terms from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Parses `term<TAB>valence` lines. Blank lines and `#` comments are skipped.
    pub fn parse(raw: &str, origin: &str) -> Result<Self> {
        let mut lexicon = Self::default();

        for (line_no, line) in raw.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let (term, value) = line.rsplit_once('\t').ok_or_else(|| {
                PulseError::Configuration(format!(
                    "{}:{}: expected 'term<TAB>valence'",
                    origin,
                    line_no + 1
                ))
            })?;
            let valence: i32 = value.trim().parse().map_err(|_| {
                PulseError::Configuration(format!(
                    "{}:{}: valence '{}' is not an integer",
                    origin,
                    line_no + 1,
                    value.trim()
                ))
            })?;

            lexicon.insert(term, valence);
        }

        Ok(lexicon)
    }

    /// Builds a lexicon from `(term, valence)` pairs.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, i32)]) -> Self {
        let mut lexicon = Self::default();
        for (term, valence) in pairs {
            lexicon.insert(term.as_ref(), *valence);
        }
        lexicon
    }

    /// Adds or replaces a term. Whitespace inside the term is collapsed.
    pub fn insert(&mut self, term: &str, valence: i32) {
        let words: Vec<String> = term.split_whitespace().map(|w| w.to_lowercase()).collect();
        if words.is_empty() {
            return;
        }
        self.max_phrase_len = self.max_phrase_len.max(words.len());
        self.entries.insert(words.join(" "), valence);
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the lexicon has no terms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lexicon for ValenceLexicon {
    fn valence(&self, term: &str) -> Option<i32> {
        self.entries.get(term).copied()
    }

    fn max_phrase_len(&self) -> usize {
        self.max_phrase_len.max(1)
    }
}
