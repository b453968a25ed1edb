//! Coarse part-of-speech tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Universal Dependencies coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    /// Adjective.
    #[serde(rename = "ADJ")]
    Adjective,
    /// Adposition (preposition or postposition).
    #[serde(rename = "ADP")]
    Adposition,
    /// Adverb.
    #[serde(rename = "ADV")]
    Adverb,
    /// Auxiliary verb.
    #[serde(rename = "AUX")]
    Auxiliary,
    /// Coordinating conjunction.
    #[serde(rename = "CCONJ")]
    CoordinatingConjunction,
    /// Determiner.
    #[serde(rename = "DET")]
    Determiner,
    /// Interjection.
    #[serde(rename = "INTJ")]
    Interjection,
    /// Common noun.
    #[serde(rename = "NOUN")]
    Noun,
    /// Numeral.
    #[serde(rename = "NUM")]
    Numeral,
    /// Particle.
    #[serde(rename = "PART")]
    Particle,
    /// Pronoun.
    #[serde(rename = "PRON")]
    Pronoun,
    /// Proper noun.
    #[serde(rename = "PROPN")]
    ProperNoun,
    /// Punctuation.
    #[serde(rename = "PUNCT")]
    Punctuation,
    /// Subordinating conjunction.
    #[serde(rename = "SCONJ")]
    SubordinatingConjunction,
    /// Symbol.
    #[serde(rename = "SYM")]
    Symbol,
    /// Verb.
    #[serde(rename = "VERB")]
    Verb,
    /// Anything else.
    #[serde(rename = "X")]
    Other,
}

impl PartOfSpeech {
    /// All tags, in tag-name order.
    pub const ALL: [PartOfSpeech; 17] = [
        PartOfSpeech::Adjective,
        PartOfSpeech::Adposition,
        PartOfSpeech::Adverb,
        PartOfSpeech::Auxiliary,
        PartOfSpeech::CoordinatingConjunction,
        PartOfSpeech::Determiner,
        PartOfSpeech::Interjection,
        PartOfSpeech::Noun,
        PartOfSpeech::Numeral,
        PartOfSpeech::Particle,
        PartOfSpeech::Pronoun,
        PartOfSpeech::ProperNoun,
        PartOfSpeech::Punctuation,
        PartOfSpeech::SubordinatingConjunction,
        PartOfSpeech::Symbol,
        PartOfSpeech::Verb,
        PartOfSpeech::Other,
    ];

    /// Returns the upper-case tag name, e.g. `"NOUN"`.
    pub fn as_tag(&self) -> &'static str {
        match self {
            PartOfSpeech::Adjective => "ADJ",
            PartOfSpeech::Adposition => "ADP",
            PartOfSpeech::Adverb => "ADV",
            PartOfSpeech::Auxiliary => "AUX",
            PartOfSpeech::CoordinatingConjunction => "CCONJ",
            PartOfSpeech::Determiner => "DET",
            PartOfSpeech::Interjection => "INTJ",
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Numeral => "NUM",
            PartOfSpeech::Particle => "PART",
            PartOfSpeech::Pronoun => "PRON",
            PartOfSpeech::ProperNoun => "PROPN",
            PartOfSpeech::Punctuation => "PUNCT",
            PartOfSpeech::SubordinatingConjunction => "SCONJ",
            PartOfSpeech::Symbol => "SYM",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Other => "X",
        }
    }

    /// True for tags that can head a noun phrase.
    pub fn is_nominal(&self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_tag())
    }
}

impl FromStr for PartOfSpeech {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        PartOfSpeech::ALL
            .iter()
            .copied()
            .find(|pos| pos.as_tag() == upper)
            .ok_or_else(|| format!("unknown part-of-speech tag '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for pos in PartOfSpeech::ALL {
            assert_eq!(pos.as_tag().parse::<PartOfSpeech>().unwrap(), pos);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("noun".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Noun);
        assert_eq!(" Verb ".parse::<PartOfSpeech>().unwrap(), PartOfSpeech::Verb);
        assert!("NOUNISH".parse::<PartOfSpeech>().is_err());
    }

    #[test]
    fn test_serde_uses_tag_names() {
        let json = serde_json::to_string(&PartOfSpeech::CoordinatingConjunction).unwrap();
        assert_eq!(json, "\"CCONJ\"");
        let pos: PartOfSpeech = serde_json::from_str("\"PROPN\"").unwrap();
        assert_eq!(pos, PartOfSpeech::ProperNoun);
    }
}
