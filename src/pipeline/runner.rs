//! The pipeline orchestrator.

use crate::config::{AnalysisConfig, Config, TextConfig};
use crate::error::{PulseError, Result};
use crate::frequency::{FrequencyTable, TokenFilter};
use crate::pipeline::{PipelineResult, PipelineStage};
use crate::render::Renderer;
use crate::sentiment::{bucket, Lexicon, SentimentScorer, ValenceLexicon};
use crate::source::{Document, DocumentSource, SourceQuery};
use crate::text::{AnnotatingTokenizer, AnnotationModel, Normalizer, Token, Tokenizer};
use log::{debug, info, warn};
use rayon::prelude::*;

/// Runs normalization, tokenization, frequency counting and sentiment scoring
/// over a batch of documents.
///
/// The tokenizer and lexicon are injected and only read; a pipeline can run
/// any number of independent batches.
pub struct Pipeline<T, L> {
    normalizer: Normalizer,
    tokenizer: T,
    scorer: SentimentScorer<L>,
    top_k: usize,
    parallel: bool,
}

impl Pipeline<AnnotatingTokenizer, ValenceLexicon> {
    /// Loads the configured annotation model and lexicon.
    ///
    /// Fails with [`PulseError::Configuration`] before any document is read
    /// if either dependency cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let model = AnnotationModel::load(&config.model.annotation_model_path)?;
        let lexicon = match &config.model.lexicon_path {
            Some(path) => ValenceLexicon::load(path)?,
            None => ValenceLexicon::builtin()?,
        };
        info!(
            "Pipeline ready: model {} ({} stopwords), {} lexicon terms",
            model.name(),
            model.stopword_count(),
            lexicon.len()
        );

        Self::new(
            AnnotatingTokenizer::new(model),
            lexicon,
            config.text.clone(),
            config.analysis.clone(),
        )
    }
}

impl<T: Tokenizer, L: Lexicon> Pipeline<T, L> {
    /// Creates a pipeline over injected dependencies.
    pub fn new(tokenizer: T, lexicon: L, text: TextConfig, analysis: AnalysisConfig) -> Result<Self> {
        let top_k = analysis.top_k()?;
        Ok(Self {
            normalizer: Normalizer::new(text),
            tokenizer,
            scorer: SentimentScorer::new(lexicon),
            top_k,
            parallel: analysis.parallel,
        })
    }

    /// The tokenizer.
    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// The sentiment scorer.
    pub fn scorer(&self) -> &SentimentScorer<L> {
        &self.scorer
    }

    /// Number of entries reported in the top word and noun lists.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Analyzes a batch that is already collected.
    ///
    /// Documents are tokenized one at a time and their token sequences
    /// concatenated in batch order for counting. Scores are computed on the
    /// normalized text.
    pub fn analyze(&self, documents: &[Document]) -> Result<PipelineResult> {
        let texts: Vec<String> = documents
            .iter()
            .map(|d| self.normalizer.normalize(d.text()))
            .collect();

        let tokens: Vec<Vec<Token>> = if self.parallel {
            texts.par_iter().map(|t| self.tokenizer.tokenize(t)).collect()
        } else {
            self.tokenizer.tokenize_each(&texts)
        };

        let all_tokens = || tokens.iter().flatten();
        let word_frequencies = FrequencyTable::from_tokens(all_tokens(), TokenFilter::Words);
        let noun_frequencies = FrequencyTable::from_tokens(all_tokens(), TokenFilter::Nouns);
        debug!(
            "{} tokens, {} distinct words, {} distinct nouns",
            tokens.iter().map(Vec::len).sum::<usize>(),
            word_frequencies.len(),
            noun_frequencies.len()
        );

        let scores = if self.parallel {
            self.scorer.score_all_parallel(&texts)
        } else {
            self.scorer.score_all(&texts)
        };
        debug_assert_eq!(scores.len(), documents.len());
        let buckets = scores.iter().copied().map(bucket).collect();

        Ok(PipelineResult {
            document_ids: documents.iter().map(|d| d.id().to_string()).collect(),
            top_words: word_frequencies.top_k(self.top_k),
            top_nouns: noun_frequencies.top_k(self.top_k),
            word_frequencies,
            noun_frequencies,
            scores,
            buckets,
            tokens,
        })
    }

    /// Runs a full batch: fetch, analyze, render.
    ///
    /// A source failure is reported as [`PulseError::SourceUnavailable`].
    /// Nothing is rendered unless analysis completes.
    pub fn run(
        &self,
        source: &dyn DocumentSource,
        query: &SourceQuery,
        renderer: &mut dyn Renderer,
    ) -> Result<PipelineResult> {
        let mut stage = PipelineStage::Idle;

        info!(
            "Fetching up to {} documents from {} ({:?})",
            query.count, query.collection, query.order
        );
        let mut documents = source.fetch(query).map_err(|e| match e {
            PulseError::SourceUnavailable(_) => e,
            other => PulseError::SourceUnavailable(other.to_string()),
        })?;
        if documents.len() > query.count {
            documents.truncate(query.count);
        } else if documents.len() < query.count {
            warn!(
                "Source returned {} of {} requested documents",
                documents.len(),
                query.count
            );
        }
        stage = advance(stage);

        let result = self.analyze(&documents)?;
        stage = advance(stage);

        renderer.render(&result.bucket_values())?;
        advance(stage);

        info!("Analyzed {} documents", result.document_count());
        Ok(result)
    }
}

fn advance(stage: PipelineStage) -> PipelineStage {
    let next = stage.next();
    debug!("Pipeline stage {} -> {}", stage, next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::JsonRenderer;
    use crate::source::{SortOrder, StaticSource};
    use crate::text::PartOfSpeech;

    /// Whitespace tokenizer that marks "the" as a stopword and tags
    /// words ending in "x" as nouns.
    struct StubTokenizer;

    impl Tokenizer for StubTokenizer {
        fn tokenize(&self, text: &str) -> Vec<Token> {
            text.split_whitespace()
                .enumerate()
                .map(|(i, w)| {
                    let pos = if w.ends_with('x') {
                        PartOfSpeech::Noun
                    } else {
                        PartOfSpeech::Verb
                    };
                    Token::new(w, w == "the", false, pos, 0, w.len(), i)
                })
                .collect()
        }
    }

    struct FailingSource;

    impl DocumentSource for FailingSource {
        fn fetch(&self, _query: &SourceQuery) -> Result<Vec<Document>> {
            Err(PulseError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "listing endpoint down",
            )))
        }
    }

    struct CountingRenderer {
        calls: usize,
        last: Vec<i8>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, values: &[i8]) -> Result<()> {
            self.calls += 1;
            self.last = values.to_vec();
            Ok(())
        }
    }

    fn stub_pipeline(top_k: i64) -> Result<Pipeline<StubTokenizer, ValenceLexicon>> {
        let lexicon = ValenceLexicon::from_pairs(&[("good", 2), ("bad", -2)]);
        let analysis = AnalysisConfig {
            top_k,
            ..Default::default()
        };
        Pipeline::new(StubTokenizer, lexicon, TextConfig::default(), analysis)
    }

    fn docs(texts: &[&str]) -> Vec<Document> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Document::new(format!("d{}", i), *t))
            .collect()
    }

    #[test]
    fn test_analyze_with_stub() {
        let pipeline = stub_pipeline(2).unwrap();
        let result = pipeline
            .analyze(&docs(&["The box is GOOD", "the fox box", "bad"]))
            .unwrap();

        assert_eq!(result.word_frequencies.get("the"), None);
        assert_eq!(result.word_frequencies.get("box"), Some(2));
        assert_eq!(result.top_nouns.first(), Some(("box", 2)));
        assert_eq!(result.noun_frequencies.len(), 2);
        assert_eq!(result.scores, vec![2.0, 0.0, -2.0]);
        assert_eq!(result.bucket_values(), vec![1, 0, -1]);
        assert_eq!(result.document_ids, vec!["d0", "d1", "d2"]);
        assert_eq!(result.tokens.len(), 3);
    }

    #[test]
    fn test_no_token_spans_documents() {
        let pipeline = stub_pipeline(10).unwrap();
        let result = pipeline.analyze(&docs(&["alpha", "beta"])).unwrap();
        assert_eq!(result.word_frequencies.get("alpha beta"), None);
        assert_eq!(result.word_frequencies.len(), 2);
    }

    #[test]
    fn test_negative_top_k_rejected_at_construction() {
        assert!(matches!(stub_pipeline(-1), Err(PulseError::InvalidArgument(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = stub_pipeline(5).unwrap();
        let parallel = Pipeline::new(
            StubTokenizer,
            ValenceLexicon::from_pairs(&[("good", 2), ("bad", -2)]),
            TextConfig::default(),
            AnalysisConfig {
                top_k: 5,
                parallel: true,
            },
        )
        .unwrap();

        let batch = docs(&["a b c", "c b good", "bad a", "x", "", "b b"]);
        assert_eq!(
            sequential.analyze(&batch).unwrap(),
            parallel.analyze(&batch).unwrap()
        );
    }

    #[test]
    fn test_run_renders_buckets() {
        let pipeline = stub_pipeline(3).unwrap();
        let source = StaticSource::from_texts(&["good", "bad", "meh", "extra"]);
        let mut renderer = CountingRenderer {
            calls: 0,
            last: Vec::new(),
        };

        let result = pipeline
            .run(&source, &SourceQuery::new("test", 3, SortOrder::Top), &mut renderer)
            .unwrap();

        assert_eq!(result.document_count(), 3);
        assert_eq!(renderer.calls, 1);
        assert_eq!(renderer.last, vec![1, -1, 0]);
    }

    #[test]
    fn test_source_failure_is_source_unavailable() {
        let pipeline = stub_pipeline(3).unwrap();
        let mut renderer = JsonRenderer::new(Vec::new());

        let err = pipeline
            .run(&FailingSource, &SourceQuery::new("x", 3, SortOrder::New), &mut renderer)
            .unwrap_err();

        assert!(matches!(err, PulseError::SourceUnavailable(_)));
        assert!(renderer.into_inner().is_empty());
    }

    #[test]
    fn test_from_config_bad_model_fails_fast() {
        let mut config = Config::default();
        config.model.annotation_model_path = "/no/such/model.json".to_string();
        let err = Pipeline::from_config(&config).err().unwrap();
        assert!(matches!(err, PulseError::Configuration(_)));
    }

    #[test]
    fn test_from_config_bad_lexicon_fails_fast() {
        let mut config = Config::default();
        config.model.lexicon_path = Some("/no/such/lexicon.tsv".into());
        let err = Pipeline::from_config(&config).err().unwrap();
        assert!(matches!(err, PulseError::Configuration(_)));
    }
}
