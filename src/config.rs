//! Configuration for the threadpulse analysis pipeline.

use crate::error::{PulseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the annotation model compiled into the crate.
pub const BUILTIN_MODEL: &str = "en_core";

/// Main configuration for a pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where documents come from.
    pub source: SourceConfig,

    /// Annotation model and lexicon locations.
    pub model: ModelConfig,

    /// Text normalization configuration.
    pub text: TextConfig,

    /// Frequency and sentiment analysis configuration.
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PulseError::FileNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| {
            PulseError::Configuration(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.source.document_count < 0 {
            return Err(PulseError::InvalidArgument(format!(
                "document_count must be non-negative, got {}",
                self.source.document_count
            )));
        }
        if self.analysis.top_k < 0 {
            return Err(PulseError::InvalidArgument(format!(
                "top_k must be non-negative, got {}",
                self.analysis.top_k
            )));
        }
        if self.model.annotation_model_path.trim().is_empty() {
            return Err(PulseError::Configuration(
                "annotation_model_path is empty; use a built-in model name or a model path".into(),
            ));
        }
        Ok(())
    }
}

/// Document source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Opaque credentials handed to the source. Local sources ignore them.
    /// Default: None.
    pub credentials: Option<String>,

    /// Collection (subreddit-like) to pull documents from.
    /// Default: "gradschool".
    pub subject_collection: String,

    /// Order by top of all time instead of newest first.
    /// Default: true.
    pub sort_by_top: bool,

    /// Maximum number of documents requested.
    /// Default: 100.
    pub document_count: i64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            subject_collection: "gradschool".to_string(),
            sort_by_top: true,
            document_count: 100,
        }
    }
}

/// Annotation model and lexicon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Built-in model name or path to a JSON annotation model.
    /// Default: "en_core".
    pub annotation_model_path: String,

    /// Path to a tab-separated valence lexicon.
    /// Default: None (built-in English lexicon).
    pub lexicon_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            annotation_model_path: BUILTIN_MODEL.to_string(),
            lexicon_path: None,
        }
    }
}

/// Text normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Convert all text to lowercase.
    /// Default: true.
    pub lowercase: bool,

    /// Apply Unicode NFKC normalization before lowercasing.
    /// Default: false.
    pub unicode_normalize: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            unicode_normalize: false,
        }
    }
}

/// Frequency and sentiment analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of most frequent words and nouns to report.
    /// Default: 10.
    pub top_k: i64,

    /// Tokenize and score documents on the rayon pool.
    /// Output order is identical to the sequential run.
    /// Default: false.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    /// Returns `top_k` as a count, rejecting negative values.
    pub fn top_k(&self) -> Result<usize> {
        usize::try_from(self.top_k).map_err(|_| {
            PulseError::InvalidArgument(format!("top_k must be non-negative, got {}", self.top_k))
        })
    }
}
