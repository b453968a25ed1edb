//! Lexicon-based sentiment scoring.

mod lexicon;
mod scorer;

pub use lexicon::{Lexicon, ValenceLexicon};
pub use scorer::{
    bucket, LexiconMatch, SentimentBucket, SentimentScore, SentimentScorer, SentimentSummary,
};
