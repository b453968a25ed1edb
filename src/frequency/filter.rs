//! Token filter predicates.

use crate::text::{PartOfSpeech, Token};

/// Predicate selecting which tokens are counted.
#[derive(Debug, Clone, Copy)]
pub enum TokenFilter {
    /// Every token.
    All,
    /// Tokens that are neither stopwords nor punctuation.
    Words,
    /// [`TokenFilter::Words`] restricted to common nouns.
    Nouns,
    /// Caller-supplied predicate.
    Custom(fn(&Token) -> bool),
}

impl TokenFilter {
    /// Returns true if the token passes the filter.
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            TokenFilter::All => true,
            TokenFilter::Words => !token.is_stopword && !token.is_punctuation,
            TokenFilter::Nouns => {
                TokenFilter::Words.matches(token) && token.pos == PartOfSpeech::Noun
            }
            TokenFilter::Custom(predicate) => predicate(token),
        }
    }
}

/// Keeps the tokens that pass the filter, in input order.
pub fn filter_tokens<'a, I>(tokens: I, filter: TokenFilter) -> Vec<&'a Token>
where
    I: IntoIterator<Item = &'a Token>,
{
    tokens.into_iter().filter(|t| filter.matches(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, stop: bool, punct: bool, pos: PartOfSpeech) -> Token {
        Token::new(text, stop, punct, pos, 0, text.len(), 0)
    }

    #[test]
    fn test_words_filter() {
        assert!(TokenFilter::Words.matches(&token("school", false, false, PartOfSpeech::Noun)));
        assert!(TokenFilter::Words.matches(&token("love", false, false, PartOfSpeech::Verb)));
        assert!(!TokenFilter::Words.matches(&token("the", true, false, PartOfSpeech::Determiner)));
        assert!(!TokenFilter::Words.matches(&token("!", false, true, PartOfSpeech::Punctuation)));
    }

    #[test]
    fn test_nouns_filter() {
        assert!(TokenFilter::Nouns.matches(&token("school", false, false, PartOfSpeech::Noun)));
        assert!(!TokenFilter::Nouns.matches(&token("love", false, false, PartOfSpeech::Verb)));
        assert!(!TokenFilter::Nouns.matches(&token("thing", true, false, PartOfSpeech::Noun)));
        assert!(!TokenFilter::Nouns.matches(&token("reddit", false, false, PartOfSpeech::ProperNoun)));
    }

    #[test]
    fn test_custom_filter() {
        let long_words = TokenFilter::Custom(|t| t.text.chars().count() > 5);
        let tokens = vec![
            token("thesis", false, false, PartOfSpeech::Noun),
            token("lab", false, false, PartOfSpeech::Noun),
        ];
        let kept = filter_tokens(&tokens, long_words);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "thesis");
    }

    #[test]
    fn test_filter_preserves_order() {
        let tokens = vec![
            token("b", false, false, PartOfSpeech::Noun),
            token("the", true, false, PartOfSpeech::Determiner),
            token("a", false, false, PartOfSpeech::Noun),
        ];
        let kept: Vec<&str> = filter_tokens(&tokens, TokenFilter::Words)
            .into_iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(kept, vec!["b", "a"]);
    }
}
