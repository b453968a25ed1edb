//! Documents and the sources that produce them.

mod file;

pub use file::{LineFileSource, ListingFileSource};

use crate::config::SourceConfig;
use crate::error::{PulseError, Result};
use serde::{Deserialize, Serialize};

/// An immutable document with its source-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_utc: Option<f64>,
}

impl Document {
    /// Creates a document.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            score: None,
            created_utc: None,
        }
    }

    /// Attaches the source's popularity score.
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    /// Attaches the creation timestamp (seconds since the Unix epoch).
    pub fn with_created_utc(mut self, created_utc: f64) -> Self {
        self.created_utc = Some(created_utc);
        self
    }

    /// Source-assigned identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Popularity score, if the source reported one.
    pub fn score(&self) -> Option<i64> {
        self.score
    }

    /// Creation timestamp, if the source reported one.
    pub fn created_utc(&self) -> Option<f64> {
        self.created_utc
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Listing order requested from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Highest score of all time first.
    Top,
    /// Newest first.
    New,
}

/// What to fetch from a [`DocumentSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceQuery {
    /// Collection (subreddit-like) name.
    pub collection: String,
    /// Maximum number of documents. Sources may return fewer.
    pub count: usize,
    /// Listing order.
    pub order: SortOrder,
}

impl SourceQuery {
    /// Creates a query.
    pub fn new(collection: impl Into<String>, count: usize, order: SortOrder) -> Self {
        Self {
            collection: collection.into(),
            count,
            order,
        }
    }

    /// Builds the query described by a source configuration.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let count = usize::try_from(config.document_count).map_err(|_| {
            PulseError::InvalidArgument(format!(
                "document_count must be non-negative, got {}",
                config.document_count
            ))
        })?;
        let order = if config.sort_by_top {
            SortOrder::Top
        } else {
            SortOrder::New
        };
        Ok(Self::new(config.subject_collection.clone(), count, order))
    }
}

/// Produces a batch of documents.
///
/// Failures are reported as [`PulseError::SourceUnavailable`].
pub trait DocumentSource {
    /// Fetches at most `query.count` documents.
    fn fetch(&self, query: &SourceQuery) -> Result<Vec<Document>>;
}

/// A source over documents already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: Vec<Document>,
}

impl StaticSource {
    /// Wraps a fixed batch.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Wraps plain texts, assigning ids `"0"`, `"1"`, ...
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self::new(
            texts
                .iter()
                .enumerate()
                .map(|(i, t)| Document::new(i.to_string(), t.as_ref()))
                .collect(),
        )
    }
}

impl DocumentSource for StaticSource {
    fn fetch(&self, query: &SourceQuery) -> Result<Vec<Document>> {
        Ok(self.documents.iter().take(query.count).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_from_config() {
        let config = SourceConfig::default();
        let query = SourceQuery::from_config(&config).unwrap();
        assert_eq!(query, SourceQuery::new("gradschool", 100, SortOrder::Top));

        let config = SourceConfig {
            sort_by_top: false,
            ..Default::default()
        };
        assert_eq!(SourceQuery::from_config(&config).unwrap().order, SortOrder::New);
    }

    #[test]
    fn test_negative_count_rejected() {
        let config = SourceConfig {
            document_count: -1,
            ..Default::default()
        };
        assert!(matches!(
            SourceQuery::from_config(&config),
            Err(PulseError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_static_source_truncates() {
        let source = StaticSource::from_texts(&["a", "b", "c"]);
        let docs = source.fetch(&SourceQuery::new("x", 2, SortOrder::Top)).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].id(), "1");
        assert_eq!(docs[1].text(), "b");

        let none = source.fetch(&SourceQuery::new("x", 0, SortOrder::New)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_document_metadata() {
        let doc = Document::new("t3_abc", "Title").with_score(42).with_created_utc(1.5e9);
        assert_eq!(doc.score(), Some(42));
        assert_eq!(doc.created_utc(), Some(1.5e9));
        assert_eq!(doc.as_ref(), "Title");
    }
}
