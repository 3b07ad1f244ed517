use std::fmt::Display;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::text::NormalizerConfig;

/// Naive Bayes sentiment classifier for movie reviews.
#[derive(Parser, Debug)]
#[command(name = "review_sentiment", version)]
pub struct Options {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Corpus root holding train/ and test/ splits
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Model parameter file
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by both commands. They must match between training and use.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelFlags {
    /// Retrain even if saved parameters exist
    #[arg(long)]
    pub retrain: bool,

    /// Keep stopwords
    #[arg(long)]
    pub no_stopwords: bool,

    /// Skip lemmatization
    #[arg(long)]
    pub no_lemmatize: bool,
}

impl ModelFlags {
    pub fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            stopwords: !self.no_stopwords,
            lemmatize: !self.no_lemmatize,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print 1 for a positive review, -1 for a negative one
    Classify {
        text: String,
        #[command(flatten)]
        flags: ModelFlags,
    },
    /// Report precision, recall, F-measure and accuracy on the test split
    Evaluate {
        #[command(flatten)]
        flags: ModelFlags,
    },
}

impl Command {
    pub fn flags(&self) -> ModelFlags {
        match self {
            Command::Classify { flags, .. } | Command::Evaluate { flags } => *flags,
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Classify { .. } => "classify",
            Self::Evaluate { .. } => "evaluate",
        };
        write!(f, "{}", name)
    }
}
