//! threadpulse CLI - Post Title Analytics
//!
//! Command-line interface for word statistics and sentiment over post titles.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};
use std::path::PathBuf;
use std::time::Instant;
use threadpulse::{
    AnnotatingTokenizer, AnnotationModel, Config, DocumentSource, LineFileSource,
    ListingFileSource, Normalizer, Pipeline, PipelineResult, PngHistogramRenderer, Renderer,
    Result, SentimentScorer, SourceQuery, TextHistogramRenderer, Tokenizer, ValenceLexicon,
};

#[derive(Parser)]
#[command(name = "threadpulse")]
#[command(version)]
#[command(about = "Word statistics and sentiment for batches of post titles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    /// Guess from the file extension (.json is a listing)
    Auto,
    /// One title per line
    Lines,
    /// JSON listing export
    Listing,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a batch of titles: top words, top nouns and sentiment
    Analyze {
        /// Input file ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, value_enum, default_value = "auto")]
        format: InputFormat,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Collection to analyze (default: gradschool)
        #[arg(short, long)]
        subreddit: Option<String>,

        /// Order by newest instead of top of all time
        #[arg(long)]
        new: bool,

        /// Number of documents to read (default: 100)
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Number of top words and nouns to show (default: 10)
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        top: Option<i64>,

        /// Annotation model name or path (default: en_core)
        #[arg(short, long)]
        model: Option<String>,

        /// Valence lexicon file (term<TAB>valence)
        #[arg(short, long)]
        lexicon: Option<PathBuf>,

        /// Save the sentiment distribution as a PNG chart
        #[arg(long)]
        plot: Option<PathBuf>,

        /// Print the full result as JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Tokenize and score on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// Show the annotated tokens of a text
    Tokens {
        /// Text to tokenize
        text: String,

        /// Annotation model name or path
        #[arg(short, long, default_value = threadpulse::BUILTIN_MODEL)]
        model: String,
    },

    /// Score the sentiment of a text
    Score {
        /// Text to score
        text: String,

        /// Valence lexicon file (term<TAB>valence)
        #[arg(short, long)]
        lexicon: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Analyze {
            input,
            format,
            config,
            subreddit,
            new,
            count,
            top,
            model,
            lexicon,
            plot,
            json,
            parallel,
        } => {
            let overrides = Overrides {
                subreddit,
                new,
                count,
                top,
                model,
                lexicon,
                parallel,
            };
            analyze(input, format, config, overrides, plot, json)
        }

        Commands::Tokens { text, model } => show_tokens(text, model),

        Commands::Score { text, lexicon } => score_text(text, lexicon),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        if e.is_fatal_configuration() {
            eprintln!(
                "hint: --model takes a built-in model name ({}) or a model file or folder; \
                 --lexicon takes a term<TAB>valence file",
                threadpulse::BUILTIN_MODEL
            );
        }
        std::process::exit(1);
    }
}

/// Command-line values that take precedence over the configuration file.
struct Overrides {
    subreddit: Option<String>,
    new: bool,
    count: Option<i64>,
    top: Option<i64>,
    model: Option<String>,
    lexicon: Option<PathBuf>,
    parallel: bool,
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if let Some(subreddit) = self.subreddit {
            config.source.subject_collection = subreddit;
        }
        if self.new {
            config.source.sort_by_top = false;
        }
        if let Some(count) = self.count {
            config.source.document_count = count;
        }
        if let Some(top) = self.top {
            config.analysis.top_k = top;
        }
        if let Some(model) = self.model {
            config.model.annotation_model_path = model;
        }
        if let Some(lexicon) = self.lexicon {
            config.model.lexicon_path = Some(lexicon);
        }
        if self.parallel {
            config.analysis.parallel = true;
        }
    }
}

fn analyze(
    input: PathBuf,
    format: InputFormat,
    config_path: Option<PathBuf>,
    overrides: Overrides,
    plot: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let start_time = Instant::now();

    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    if config.source.credentials.is_some() {
        debug!("Credentials are not used by file sources");
    }

    // Dependencies load before anything is read.
    let pipeline = Pipeline::from_config(&config)?;
    let query = SourceQuery::from_config(&config.source)?;

    let is_listing = match format {
        InputFormat::Listing => true,
        InputFormat::Lines => false,
        InputFormat::Auto => input
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false),
    };
    let source: Box<dyn DocumentSource> = if is_listing {
        Box::new(ListingFileSource::new(input))
    } else {
        Box::new(LineFileSource::new(input))
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Analyzing {}...", query.collection));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut histogram = TextHistogramRenderer::new(Vec::new(), 40);
    let outcome = match &plot {
        Some(path) => pipeline.run(source.as_ref(), &query, &mut PngHistogramRenderer::new(path)),
        None => pipeline.run(source.as_ref(), &query, &mut histogram),
    };
    pb.finish_and_clear();
    let result = outcome?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut chart = histogram.into_inner();
    if chart.is_empty() {
        TextHistogramRenderer::new(&mut chart, 40).render(&result.bucket_values())?;
    }
    print_report(&result, &query, &String::from_utf8_lossy(&chart));
    if let Some(path) = plot {
        println!("✓ Saved sentiment distribution to {}", path.display());
    }
    println!("  Completed in {:.2?}", start_time.elapsed());
    Ok(())
}

fn print_report(result: &PipelineResult, query: &SourceQuery, chart: &str) {
    println!(
        "threadpulse: {} documents from {} ({:?})",
        result.document_count(),
        query.collection,
        query.order
    );
    println!();

    println!("Most common nouns:");
    for (noun, count) in result.top_nouns.iter() {
        println!("  {:<20} {:>5}", noun, count);
    }
    println!();

    println!("Most common words:");
    for (word, count) in result.top_words.iter() {
        println!("  {:<20} {:>5}", word, count);
    }
    println!();

    let summary = result.summary();
    println!("Sentiment (mean score {:.2}):", summary.mean_score);
    print!("{}", chart);
}

fn show_tokens(text: String, model: String) -> Result<()> {
    let model = AnnotationModel::load(&model)?;
    let tokenizer = AnnotatingTokenizer::new(model);
    let normalized = Normalizer::default_config().normalize(&text);

    println!("{:<4} {:<20} {:<6} {:<5} {:<5}", "#", "text", "pos", "stop", "punct");
    for token in tokenizer.tokenize(&normalized) {
        println!(
            "{:<4} {:<20} {:<6} {:<5} {:<5}",
            token.index, token.text, token.pos, token.is_stopword, token.is_punctuation
        );
    }
    Ok(())
}

fn score_text(text: String, lexicon: Option<PathBuf>) -> Result<()> {
    let lexicon = match lexicon {
        Some(path) => ValenceLexicon::load(path)?,
        None => ValenceLexicon::builtin()?,
    };
    let scorer = SentimentScorer::new(lexicon);

    let matches = scorer.matches(&text);
    if matches.is_empty() {
        println!("No lexicon terms found");
    }
    for m in &matches {
        println!("  {:<20} {:>+3}", m.term, m.valence);
    }

    let score = scorer.score(&text);
    println!("Score: {} ({})", score, threadpulse::bucket(score));
    Ok(())
}
