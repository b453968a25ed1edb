//! # threadpulse - Post Title Analytics
//!
//! threadpulse derives word statistics and sentiment polarity from a batch
//! of short documents such as forum post titles.
//!
//! ## Overview
//!
//! Each document is lowercased, split into annotated tokens (stopword,
//! punctuation and part-of-speech flags), and counted. The most frequent
//! words and nouns are reported with a deterministic tie-break. Separately,
//! every document receives a lexicon sentiment score that is bucketed into
//! positive, neutral or negative.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use threadpulse::{Config, Document, Pipeline};
//!
//! let pipeline = Pipeline::from_config(&Config::default())?;
//! let documents = vec![
//!     Document::new("1", "I love grad school"),
//!     Document::new("2", "grad school is stressful"),
//! ];
//! let result = pipeline.analyze(&documents)?;
//!
//! for (word, count) in result.top_words.iter() {
//!     println!("{word}: {count}");
//! }
//! println!("{:?}", result.bucket_values());
//! # Ok::<(), threadpulse::PulseError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`text`] - Normalization, annotation model and tokenization
//! - [`frequency`] - Token filters, frequency tables and top-K selection
//! - [`sentiment`] - Valence lexicons, scoring and polarity buckets
//! - [`source`] - Documents and document sources
//! - [`render`] - Renderers for the sentiment distribution
//! - [`pipeline`] - The orchestrator tying the stages together

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod frequency;
pub mod pipeline;
pub mod render;
pub mod sentiment;
pub mod source;
pub mod text;

// Re-export commonly used types
pub use config::{AnalysisConfig, Config, ModelConfig, SourceConfig, TextConfig, BUILTIN_MODEL};
pub use error::{PulseError, Result};
pub use frequency::{filter_tokens, FrequencyTable, TokenFilter, TopKResult};
pub use pipeline::{Pipeline, PipelineResult, PipelineStage};
pub use render::{JsonRenderer, PngHistogramRenderer, Renderer, TextHistogramRenderer};
pub use sentiment::{
    bucket, Lexicon, LexiconMatch, SentimentBucket, SentimentScore, SentimentScorer,
    SentimentSummary, ValenceLexicon,
};
pub use source::{
    Document, DocumentSource, LineFileSource, ListingFileSource, SortOrder, SourceQuery,
    StaticSource,
};
pub use text::{AnnotatingTokenizer, AnnotationModel, Normalizer, PartOfSpeech, Token, Tokenizer};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of top words and nouns reported.
pub const DEFAULT_TOP_K: usize = 10;
