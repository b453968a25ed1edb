//! Text normalization for preprocessing.

use crate::config::TextConfig;
use unicode_normalization::UnicodeNormalization;

/// Text normalizer that lowercases (and optionally NFKC-folds) raw text.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: TextConfig,
}

impl Normalizer {
    /// Creates a new normalizer with the given configuration.
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Creates a normalizer with default configuration.
    pub fn default_config() -> Self {
        Self::new(TextConfig::default())
    }

    /// Normalizes a document.
    ///
    /// Lowercasing uses Unicode case mapping and does not depend on the
    /// process locale.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = if self.config.unicode_normalize {
            text.nfkc().collect()
        } else {
            text.to_string()
        };

        if self.config.lowercase {
            result = result.to_lowercase();
        }

        result
    }

    /// Normalizes every document, preserving order.
    pub fn normalize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        texts.iter().map(|t| self.normalize(t.as_ref())).collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::default_config()
    }
}
