//! Linguistic annotation model: stopwords, a part-of-speech lexicon and
//! suffix rules for words the lexicon does not cover.
//!
//! A model is either the built-in English model (`en_core`) or a JSON file
//! with the same layout:
//!
//! ```json
//! {
//!   "name": "my_model",
//!   "version": "0.1.0",
//!   "stopwords": ["the", "is"],
//!   "possessives": ["my"],
//!   "lexicon": { "school": "NOUN" },
//!   "suffix_rules": [{ "suffix": "ness", "pos": "NOUN", "min_stem": 3 }]
//! }
//! ```

use crate::config::BUILTIN_MODEL;
use crate::error::{PulseError, Result};
use crate::text::PartOfSpeech;
use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::Path;
use stop_words::{get, LANGUAGE};

/// File name looked up when a model path points at a directory.
pub const MODEL_FILE_NAME: &str = "model.json";

const EN_CORE_JSON: &str = include_str!("en_core.json");

/// A suffix heuristic for out-of-lexicon words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    /// Word ending, lowercase.
    pub suffix: String,
    /// Tag assigned when the rule fires.
    pub pos: PartOfSpeech,
    /// Minimum number of characters that must precede the suffix.
    #[serde(default = "default_min_stem")]
    pub min_stem: usize,
}

fn default_min_stem() -> usize {
    2
}

impl SuffixRule {
    fn applies_to(&self, word: &str) -> bool {
        word.strip_suffix(self.suffix.as_str())
            .map(|stem| stem.chars().count() >= self.min_stem)
            .unwrap_or(false)
    }
}

/// On-disk model layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelFile {
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    stopwords: Vec<String>,
    #[serde(default)]
    possessives: Vec<String>,
    #[serde(default)]
    lexicon: FxHashMap<String, PartOfSpeech>,
    #[serde(default)]
    suffix_rules: Vec<SuffixRule>,
}

/// A loaded annotation model. Immutable once built.
#[derive(Debug, Clone)]
pub struct AnnotationModel {
    name: String,
    version: String,
    stopwords: FxHashSet<String>,
    possessives: FxHashSet<String>,
    lexicon: FxHashMap<String, PartOfSpeech>,
    /// Sorted longest suffix first.
    suffix_rules: Vec<SuffixRule>,
}

impl AnnotationModel {
    /// Loads a model by built-in name or from a path.
    ///
    /// A directory path resolves to `<dir>/model.json`. Any failure is a
    /// [`PulseError::Configuration`] carrying a hint about valid values.
    pub fn load(name_or_path: &str) -> Result<Self> {
        if name_or_path == BUILTIN_MODEL {
            return Self::builtin();
        }

        let path = Path::new(name_or_path);
        let file = if path.is_dir() {
            path.join(MODEL_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let raw = std::fs::read_to_string(&file).map_err(|e| {
            PulseError::Configuration(format!(
                "unable to load annotation model '{}': {}. The model must be the name of a \
                 built-in model ('{}') or the path to a model file or folder",
                name_or_path, e, BUILTIN_MODEL
            ))
        })?;

        let model = Self::from_json(&raw).map_err(|e| {
            PulseError::Configuration(format!(
                "annotation model '{}' is malformed: {}",
                file.display(),
                e
            ))
        })?;
        info!(
            "Loaded annotation model {} {} ({} lexicon entries)",
            model.name,
            model.version,
            model.lexicon.len()
        );
        Ok(model)
    }

    /// The built-in English model.
    ///
    /// Its stopword list is the model's own function-word list (clitics
    /// included) merged with the `stop-words` NLTK English list. The larger
    /// ISO list is not used: it marks content words such as "research" and
    /// "work" as stopwords.
    pub fn builtin() -> Result<Self> {
        let mut model = Self::from_json(EN_CORE_JSON).map_err(|e| {
            PulseError::Configuration(format!("built-in model {} is corrupt: {}", BUILTIN_MODEL, e))
        })?;
        model.stopwords.extend(
            get(LANGUAGE::English)
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string()),
        );
        debug!("Built-in model has {} stopwords", model.stopwords.len());
        Ok(model)
    }

    /// Parses a model from its JSON representation.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ModelFile = serde_json::from_str(raw)?;
        Ok(Self::from_file_layout(file))
    }

    fn from_file_layout(file: ModelFile) -> Self {
        let mut suffix_rules = file.suffix_rules;
        // Stable: equal-length suffixes keep file order.
        suffix_rules.sort_by(|a, b| b.suffix.len().cmp(&a.suffix.len()));

        Self {
            name: file.name,
            version: file.version,
            stopwords: file.stopwords.iter().map(|w| w.to_lowercase()).collect(),
            possessives: file.possessives.iter().map(|w| w.to_lowercase()).collect(),
            lexicon: file
                .lexicon
                .into_iter()
                .map(|(w, pos)| (w.to_lowercase(), pos))
                .collect(),
            suffix_rules,
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model version string (may be empty).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// True if the word is a stopword. Curly apostrophes match straight ones.
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.stopwords.contains(word) {
            return true;
        }
        word.contains('\u{2019}') && self.stopwords.contains(&word.replace('\u{2019}', "'"))
    }

    /// True if the word is a possessive determiner-like pronoun.
    pub fn is_possessive(&self, word: &str) -> bool {
        self.possessives.contains(word)
    }

    /// Lexicon tag for the word, if listed.
    pub fn lookup(&self, word: &str) -> Option<PartOfSpeech> {
        self.lexicon.get(word).copied().or_else(|| {
            if word.contains('\u{2019}') {
                self.lexicon.get(&word.replace('\u{2019}', "'")).copied()
            } else {
                None
            }
        })
    }

    /// Tag from the first (longest) matching suffix rule.
    pub fn guess_by_suffix(&self, word: &str) -> Option<PartOfSpeech> {
        self.suffix_rules
            .iter()
            .find(|rule| rule.applies_to(word))
            .map(|rule| rule.pos)
    }

    /// Number of stopwords.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Number of lexicon entries.
    pub fn lexicon_len(&self) -> usize {
        self.lexicon.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_model_loads() {
        let model = AnnotationModel::load(BUILTIN_MODEL).unwrap();
        assert_eq!(model.name(), "en_core");
        assert!(model.is_stopword("the"));
        assert!(model.is_stopword("is"));
        assert!(model.is_stopword("i"));
        assert!(model.is_stopword("n't"));
        assert!(!model.is_stopword("love"));
        assert!(!model.is_stopword("school"));
        assert_eq!(model.lookup("school"), Some(PartOfSpeech::Noun));
    }

    #[test]
    fn test_content_words_are_not_stopwords() {
        let model = AnnotationModel::builtin().unwrap();
        for word in [
            "research", "problem", "work", "year", "help", "good", "best", "new", "first",
            "information", "world", "home", "advisor", "thesis",
        ] {
            assert!(!model.is_stopword(word), "{word} should not be a stopword");
        }
        assert!(!model.is_stopword(""));
    }

    #[test]
    fn test_curly_apostrophe_stopword() {
        let model = AnnotationModel::builtin().unwrap();
        assert!(model.is_stopword("n\u{2019}t"));
        assert_eq!(model.lookup("\u{2019}m"), Some(PartOfSpeech::Auxiliary));
    }

    #[test]
    fn test_suffix_rules_longest_first() {
        let model = AnnotationModel::from_json(
            r#"{"name": "t", "suffix_rules": [
                {"suffix": "s", "pos": "NOUN", "min_stem": 1},
                {"suffix": "ness", "pos": "ADJ", "min_stem": 2}
            ]}"#,
        )
        .unwrap();
        assert_eq!(model.guess_by_suffix("kindness"), Some(PartOfSpeech::Adjective));
        assert_eq!(model.guess_by_suffix("cats"), Some(PartOfSpeech::Noun));
    }

    #[test]
    fn test_min_stem_respected() {
        let model = AnnotationModel::builtin().unwrap();
        // "red" is too short for the -ed rule
        assert_eq!(model.guess_by_suffix("red"), None);
        assert_eq!(model.guess_by_suffix("stressful"), Some(PartOfSpeech::Adjective));
        assert_eq!(model.guess_by_suffix("procrastinating"), Some(PartOfSpeech::Verb));
    }

    #[test]
    fn test_load_from_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MODEL_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"name": "tiny", "version": "0.1", "stopwords": ["The"], "lexicon": {{"Cat": "NOUN"}}}}"#
        )
        .unwrap();

        let from_file = AnnotationModel::load(path.to_str().unwrap()).unwrap();
        assert_eq!(from_file.name(), "tiny");
        assert!(from_file.is_stopword("the"));
        assert_eq!(from_file.lookup("cat"), Some(PartOfSpeech::Noun));

        let from_dir = AnnotationModel::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(from_dir.lexicon_len(), 1);
    }

    #[test]
    fn test_missing_model_is_configuration_error() {
        let err = AnnotationModel::load("/no/such/model").unwrap_err();
        match err {
            PulseError::Configuration(msg) => assert!(msg.contains("built-in model")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_model_is_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "bad", "lexicon": {{"cat": "FELINE"}}}}"#).unwrap();
        let err = AnnotationModel::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PulseError::Configuration(_)));
    }
}
