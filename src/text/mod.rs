//! Text processing module for normalization, annotation and tokenization.

mod model;
mod normalizer;
mod pos;
mod tokenizer;

pub use model::{AnnotationModel, SuffixRule, MODEL_FILE_NAME};
pub use normalizer::Normalizer;
pub use pos::PartOfSpeech;
pub use tokenizer::{join_documents, AnnotatingTokenizer, Token, Tokenizer};
