//! Output of one pipeline run.

use crate::frequency::{FrequencyTable, TopKResult};
use crate::sentiment::{SentimentBucket, SentimentScore, SentimentSummary};
use crate::text::Token;
use serde::{Deserialize, Serialize};

/// Everything a completed run produces. Per-document vectors share the
/// order of the input batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Ids of the analyzed documents.
    pub document_ids: Vec<String>,
    /// Counts of non-stopword, non-punctuation tokens.
    pub word_frequencies: FrequencyTable,
    /// Counts of non-stopword nouns.
    pub noun_frequencies: FrequencyTable,
    /// Most frequent words.
    pub top_words: TopKResult,
    /// Most frequent nouns.
    pub top_nouns: TopKResult,
    /// Sentiment score per document.
    pub scores: Vec<SentimentScore>,
    /// Sentiment bucket per document.
    pub buckets: Vec<SentimentBucket>,
    /// Annotated tokens per document.
    #[serde(skip)]
    pub tokens: Vec<Vec<Token>>,
}

impl PipelineResult {
    /// Number of analyzed documents.
    pub fn document_count(&self) -> usize {
        self.document_ids.len()
    }

    /// Buckets as `-1`, `0`, `1`, the form handed to a renderer.
    pub fn bucket_values(&self) -> Vec<i8> {
        self.buckets.iter().map(SentimentBucket::value).collect()
    }

    /// Bucket counts and mean score.
    pub fn summary(&self) -> SentimentSummary {
        SentimentSummary::from_scores(&self.scores)
    }
}
