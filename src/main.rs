use anyhow::{Context, Result};
use clap::Parser;

use review_sentiment::app::{run_classify, run_evaluate, Settings};
use review_sentiment::config::Config;
use review_sentiment::logging::{setup_logger, Logger};
use review_sentiment::options::{Command, Options};

fn main() -> Result<()> {
    let options = Options::parse();

    let config = Config::new(options.config.as_deref()).context("failed to load configuration")?;
    setup_logger(options.log_level.as_deref().unwrap_or(&config.logging.level));
    tracing::debug!("Configuration: {}", config);

    let flags = options.command.flags();
    let settings = Settings {
        corpus_root: options.corpus.unwrap_or(config.corpus.root),
        model_path: options.model.unwrap_or(config.model.path),
        retrain: flags.retrain,
        normalizer: flags.normalizer_config(),
    };

    Logger::with_span(&options.command.to_string(), || match &options.command {
        Command::Classify { text, .. } => {
            let label = run_classify(&settings, text).context("classification failed")?;
            println!("{}", label);
            Ok(())
        }
        Command::Evaluate { .. } => {
            let metrics = run_evaluate(&settings).context("evaluation failed")?;
            println!("{}", metrics);
            Ok(())
        }
    })
}
