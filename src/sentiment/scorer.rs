//! Lexicon-based document scoring and polarity buckets.

use crate::sentiment::Lexicon;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+(?:'[\p{L}\p{N}_]+)*").unwrap());

/// Summed valence of one document.
pub type SentimentScore = f64;

/// Polarity class of a [`SentimentScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SentimentBucket {
    /// Score below zero.
    Negative,
    /// Score of exactly zero.
    Neutral,
    /// Score above zero.
    Positive,
}

impl SentimentBucket {
    /// Buckets a score: `> 0` positive, `< 0` negative, anything else neutral.
    ///
    /// NaN compares false both ways and lands in `Neutral`.
    pub fn from_score(score: SentimentScore) -> Self {
        if score > 0.0 {
            SentimentBucket::Positive
        } else if score < 0.0 {
            SentimentBucket::Negative
        } else {
            SentimentBucket::Neutral
        }
    }

    /// `+1`, `0` or `-1`.
    pub fn value(&self) -> i8 {
        match self {
            SentimentBucket::Negative => -1,
            SentimentBucket::Neutral => 0,
            SentimentBucket::Positive => 1,
        }
    }

    /// Lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            SentimentBucket::Negative => "negative",
            SentimentBucket::Neutral => "neutral",
            SentimentBucket::Positive => "positive",
        }
    }
}

impl From<SentimentBucket> for i8 {
    fn from(bucket: SentimentBucket) -> Self {
        bucket.value()
    }
}

impl TryFrom<i8> for SentimentBucket {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(SentimentBucket::Negative),
            0 => Ok(SentimentBucket::Neutral),
            1 => Ok(SentimentBucket::Positive),
            other => Err(format!("sentiment bucket must be -1, 0 or 1, got {}", other)),
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Buckets a score. See [`SentimentBucket::from_score`].
pub fn bucket(score: SentimentScore) -> SentimentBucket {
    SentimentBucket::from_score(score)
}

/// A lexicon term found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconMatch {
    /// Matched term, single-space separated.
    pub term: String,
    /// Its valence.
    pub valence: i32,
}

/// Bucket counts and mean score for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Documents with a positive score.
    pub positive: usize,
    /// Documents with a zero score.
    pub neutral: usize,
    /// Documents with a negative score.
    pub negative: usize,
    /// Mean score, 0.0 for an empty batch.
    pub mean_score: f64,
}

impl SentimentSummary {
    /// Summarizes a batch of scores.
    pub fn from_scores(scores: &[SentimentScore]) -> Self {
        let mut summary = Self::default();
        for &score in scores {
            match bucket(score) {
                SentimentBucket::Positive => summary.positive += 1,
                SentimentBucket::Neutral => summary.neutral += 1,
                SentimentBucket::Negative => summary.negative += 1,
            }
        }
        if !scores.is_empty() {
            summary.mean_score = scores.iter().sum::<f64>() / scores.len() as f64;
        }
        summary
    }

    /// Total number of documents.
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Scores documents by summing the valences of the lexicon terms they contain.
#[derive(Debug, Clone)]
pub struct SentimentScorer<L> {
    lexicon: L,
}

impl<L: Lexicon> SentimentScorer<L> {
    /// Creates a scorer over a loaded lexicon.
    pub fn new(lexicon: L) -> Self {
        Self { lexicon }
    }

    /// The underlying lexicon.
    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    /// Lexicon terms in the document, left to right.
    ///
    /// At each word the longest listed phrase starting there wins; matched
    /// words are consumed.
    pub fn matches(&self, document: &str) -> Vec<LexiconMatch> {
        let text = document.to_lowercase().replace('\u{2019}', "'");
        let words: Vec<&str> = WORD.find_iter(&text).map(|m| m.as_str()).collect();
        let max_len = self.lexicon.max_phrase_len().max(1);

        let mut found = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let longest = max_len.min(words.len() - i);
            let hit = (1..=longest).rev().find_map(|len| {
                let term = words[i..i + len].join(" ");
                self.lexicon
                    .valence(&term)
                    .map(|valence| (len, LexiconMatch { term, valence }))
            });

            match hit {
                Some((len, m)) => {
                    found.push(m);
                    i += len;
                }
                None => i += 1,
            }
        }

        found
    }

    /// Sum of valences; unlisted words contribute zero.
    pub fn score(&self, document: &str) -> SentimentScore {
        self.matches(document)
            .iter()
            .fold(0.0, |acc, m| acc + f64::from(m.valence))
    }

    /// Scores every document, same length and order as the input.
    pub fn score_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SentimentScore> {
        documents.iter().map(|d| self.score(d.as_ref())).collect()
    }

    /// [`SentimentScorer::score_all`] on the rayon pool. Order is preserved.
    pub fn score_all_parallel<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Vec<SentimentScore> {
        documents.par_iter().map(|d| self.score(d.as_ref())).collect()
    }
}
