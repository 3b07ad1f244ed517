//! Load-or-train lifecycle behind the two commands.

use std::path::PathBuf;

use tracing::info;

use crate::classifiers::{train, NaiveBayesClassifier, NaiveBayesError};
use crate::corpus::{CorpusLayout, Split};
use crate::evaluation::{evaluate, EvaluationError, Metrics};
use crate::generic_types::Label;
use crate::text::{Normalizer, NormalizerConfig};

/// Everything a command needs to obtain a classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub corpus_root: PathBuf,
    pub model_path: PathBuf,
    pub retrain: bool,
    pub normalizer: NormalizerConfig,
}

impl Settings {
    pub fn layout(&self) -> CorpusLayout {
        CorpusLayout::new(&self.corpus_root)
    }
}

/// Load saved parameters, or train from `<root>/train` and save them when
/// there are none or `retrain` is set.
pub fn load_or_train(settings: &Settings) -> Result<NaiveBayesClassifier, NaiveBayesError> {
    if settings.model_path.is_file() && !settings.retrain {
        return NaiveBayesClassifier::load_from_file(&settings.model_path, settings.normalizer);
    }

    info!("No saved model parameters or retrain requested. Model will be retrained.");
    let layout = settings.layout();
    let normalizer = Normalizer::new(settings.normalizer);
    let params = train(
        &layout.dir(Split::Train, Label::Positive),
        &layout.dir(Split::Train, Label::Negative),
        &normalizer,
    )?;

    let classifier = NaiveBayesClassifier::new(params, normalizer);
    classifier.save_to_file(&settings.model_path)?;
    Ok(classifier)
}

pub fn run_classify(settings: &Settings, text: &str) -> Result<Label, NaiveBayesError> {
    load_or_train(settings)?.classify(text)
}

pub fn run_evaluate(settings: &Settings) -> Result<Metrics, EvaluationError> {
    let classifier = load_or_train(settings)?;
    let layout = settings.layout();
    evaluate(
        &layout.dir(Split::Test, Label::Positive),
        &layout.dir(Split::Test, Label::Negative),
        &classifier,
    )
}
