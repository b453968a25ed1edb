//! Tokenization and per-token annotation.

use crate::text::{AnnotationModel, PartOfSpeech};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}+$").unwrap());
static SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{S}\p{P}]+$").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{N}+(?:[.,]\p{N}+)*%?$").unwrap());

/// Trailing clitics split off a word, longest first.
const CLITICS: [&str; 7] = ["n't", "'re", "'ve", "'ll", "'s", "'m", "'d"];

/// An annotated token with its position in the tokenized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text exactly as it appears in the input.
    pub text: String,
    /// Listed in the model's stopword set.
    pub is_stopword: bool,
    /// Made up entirely of punctuation characters.
    pub is_punctuation: bool,
    /// Coarse part-of-speech tag.
    pub pos: PartOfSpeech,
    /// Start position in the input text (byte offset).
    pub start: usize,
    /// End position in the input text (byte offset).
    pub end: usize,
    /// Token index in the sequence.
    pub index: usize,
}

impl Token {
    /// Creates a new token.
    pub fn new(
        text: impl Into<String>,
        is_stopword: bool,
        is_punctuation: bool,
        pos: PartOfSpeech,
        start: usize,
        end: usize,
        index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            is_stopword,
            is_punctuation,
            pos,
            start,
            end,
            index,
        }
    }
}

/// Splits text into annotated tokens.
///
/// Implementations must be deterministic: the same text yields the same
/// sequence for the lifetime of the implementation.
pub trait Tokenizer: Send + Sync {
    /// Tokenizes text into a sequence of annotated tokens.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Tokenizes each text separately, preserving order.
    fn tokenize_each(&self, texts: &[String]) -> Vec<Vec<Token>> {
        texts.iter().map(|t| self.tokenize(t)).collect()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Arc<T> {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }
}

/// Joins normalized documents into one text, separated by a single space.
///
/// Kept for callers that want whole-batch tokenization. The pipeline
/// tokenizes documents one at a time instead, so tokens never span two
/// documents.
pub fn join_documents<S: AsRef<str>>(documents: &[S]) -> String {
    documents
        .iter()
        .map(|d| d.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rule-based tokenizer driven by an [`AnnotationModel`].
#[derive(Debug, Clone)]
pub struct AnnotatingTokenizer {
    model: Arc<AnnotationModel>,
}

impl AnnotatingTokenizer {
    /// Creates a tokenizer over a loaded model.
    pub fn new(model: AnnotationModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Creates a tokenizer sharing an already loaded model.
    pub fn with_shared_model(model: Arc<AnnotationModel>) -> Self {
        Self { model }
    }

    /// The underlying model.
    pub fn model(&self) -> &AnnotationModel {
        &self.model
    }

    /// Splits text into `(start, end)` spans: UAX #29 word boundaries,
    /// whitespace dropped, trailing clitics separated.
    fn spans(text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();

        for (start, segment) in text.split_word_bound_indices() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }
            let end = start + segment.len();
            match Self::clitic_split(segment) {
                Some(at) => {
                    spans.push((start, start + at));
                    spans.push((start + at, end));
                }
                None => spans.push((start, end)),
            }
        }

        spans
    }

    /// Byte position where a trailing clitic starts, if any.
    fn clitic_split(segment: &str) -> Option<usize> {
        if !segment.contains('\'') && !segment.contains('\u{2019}') {
            return None;
        }
        let straight = segment.replace('\u{2019}', "'");
        for clitic in CLITICS {
            if straight.len() > clitic.len() && straight.ends_with(clitic) {
                // Locate the same split point in the original bytes; the curly
                // apostrophe is three bytes wide, the straight one is one.
                let clitic_chars = clitic.chars().count();
                let at = segment
                    .char_indices()
                    .rev()
                    .nth(clitic_chars - 1)
                    .map(|(i, _)| i)?;
                if at == 0 {
                    return None;
                }
                return Some(at);
            }
        }
        None
    }

    /// Context-free tag for a single word.
    fn intrinsic_pos(&self, word: &str) -> Option<PartOfSpeech> {
        if PUNCTUATION.is_match(word) {
            return Some(PartOfSpeech::Punctuation);
        }
        if NUMBER.is_match(word) {
            return Some(PartOfSpeech::Numeral);
        }
        if SYMBOL.is_match(word) {
            return Some(PartOfSpeech::Symbol);
        }
        self.model.lookup(word)
    }

    /// Tag for a word that may depend on the preceding token.
    fn tag(&self, word: &str, prev: Option<(&str, PartOfSpeech)>) -> PartOfSpeech {
        let straight = word.replace('\u{2019}', "'");
        if straight == "'s" {
            // "it's" contracts "is"; "advisor's" is possessive
            return match prev {
                Some((_, PartOfSpeech::Pronoun)) => PartOfSpeech::Auxiliary,
                _ => PartOfSpeech::Particle,
            };
        }

        let after_nominal_modifier = match prev {
            Some((w, PartOfSpeech::Pronoun)) => self.model.is_possessive(w),
            // possessive clitic: "advisor's feedback"
            Some((w, PartOfSpeech::Particle)) => is_clitic_s(w),
            Some((_, pos)) => matches!(
                pos,
                PartOfSpeech::Determiner
                    | PartOfSpeech::Adjective
                    | PartOfSpeech::Numeral
                    | PartOfSpeech::Adposition
            ),
            None => false,
        };
        let after_verbal_context = match prev {
            Some((w, PartOfSpeech::Pronoun)) => !self.model.is_possessive(w),
            Some((_, PartOfSpeech::Auxiliary)) => true,
            Some((w, _)) => is_verbal_particle(w),
            None => false,
        };

        match self.intrinsic_pos(word) {
            // Verbs listed in the lexicon read as nouns after a determiner
            // or modifier ("the love", "my defense").
            Some(PartOfSpeech::Verb) if after_nominal_modifier => PartOfSpeech::Noun,
            Some(pos) => pos,
            None => match self.model.guess_by_suffix(word) {
                Some(PartOfSpeech::Verb) if after_nominal_modifier => PartOfSpeech::Noun,
                Some(pos) => pos,
                None if after_verbal_context => PartOfSpeech::Verb,
                None if word.chars().any(char::is_alphabetic) => PartOfSpeech::Noun,
                None => PartOfSpeech::Other,
            },
        }
    }
}

fn is_clitic_s(word: &str) -> bool {
    matches!(word, "'s" | "\u{2019}s")
}

/// Words after which an unknown word reads as a verb: infinitive "to" and
/// negation.
fn is_verbal_particle(word: &str) -> bool {
    matches!(
        word.replace('\u{2019}', "'").as_str(),
        "to" | "not" | "n't"
    )
}

impl Tokenizer for AnnotatingTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let spans = Self::spans(text);
        let mut tokens: Vec<Token> = Vec::with_capacity(spans.len());

        for (index, (start, end)) in spans.into_iter().enumerate() {
            let word = &text[start..end];
            let prev = tokens.last().map(|t| (t.text.as_str(), t.pos));
            let pos = self.tag(word, prev);

            tokens.push(Token::new(
                word,
                self.model.is_stopword(word),
                PUNCTUATION.is_match(word),
                pos,
                start,
                end,
                index,
            ));
        }

        tokens
    }
}
