use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::corpus::{CorpusError, SampleSource};
use crate::generic_types::Label;
use crate::text::{Normalizer, NormalizerConfig};


#[derive(Error, Debug)]
pub enum NaiveBayesError {
    #[error("Failed to save the model: {0}")]
    SaveError(io::Error),

    #[error("Failed to load the model: {0}")]
    LoadError(io::Error),

    #[error("Failed to serialize or deserialize the model: {0}")]
    SerializationError(serde_json::Error),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("Degenerate log-probabilities: positive {positive}, negative {negative}")]
    InvariantViolation { positive: f64, negative: f64 },
}


// ************* Parameters *************** | START
/// Trained state of the classifier.
///
/// Built once by [`train`] or read back from disk, never modified afterwards.
/// Every vocabulary word has an entry in both likelihood maps.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelParameters {
    pos_prior: f64,
    neg_prior: f64,
    n_pos_words: u64,
    n_neg_words: u64,
    n_vocab: u64,
    pos_likelihood: HashMap<String, f64>,
    neg_likelihood: HashMap<String, f64>,
}

impl ModelParameters {
    /// `ln P(positive)`
    pub fn pos_prior(&self) -> f64 {
        self.pos_prior
    }

    /// `ln P(negative)`
    pub fn neg_prior(&self) -> f64 {
        self.neg_prior
    }

    pub fn n_pos_words(&self) -> u64 {
        self.n_pos_words
    }

    pub fn n_neg_words(&self) -> u64 {
        self.n_neg_words
    }

    pub fn n_vocab(&self) -> u64 {
        self.n_vocab
    }

    pub fn pos_likelihood(&self) -> &HashMap<String, f64> {
        &self.pos_likelihood
    }

    pub fn neg_likelihood(&self) -> &HashMap<String, f64> {
        &self.neg_likelihood
    }

    pub fn prior(&self, class: Label) -> f64 {
        match class {
            Label::Positive => self.pos_prior,
            Label::Negative => self.neg_prior,
        }
    }

    /// Smoothed log-likelihood of a vocabulary word, `None` when unseen.
    pub fn log_likelihood(&self, class: Label, word: &str) -> Option<f64> {
        let table = match class {
            Label::Positive => &self.pos_likelihood,
            Label::Negative => &self.neg_likelihood,
        };
        table.get(word).copied()
    }
}

/// Log-likelihood given to words outside the training vocabulary: an add-one
/// count of zero, `ln(1 / (n_words + n_vocab))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultLikelihoods {
    pub def_pos_ll: f64,
    pub def_neg_ll: f64,
}

impl DefaultLikelihoods {
    pub fn from_params(params: &ModelParameters) -> Self {
        let pos_d = (params.n_pos_words + params.n_vocab) as f64;
        let neg_d = (params.n_neg_words + params.n_vocab) as f64;
        Self {
            def_pos_ll: (1.0 / pos_d).ln(),
            def_neg_ll: (1.0 / neg_d).ln(),
        }
    }

    pub fn get(&self, class: Label) -> f64 {
        match class {
            Label::Positive => self.def_pos_ll,
            Label::Negative => self.def_neg_ll,
        }
    }
}
// ************* Parameters *************** | END


// ************* Training *************** | START
/// Word counts of one class, with the number of documents they came from.
struct BagOfWords {
    counts: HashMap<String, u64>,
    n_docs: u64,
}

impl BagOfWords {
    fn n_words(&self) -> u64 {
        self.counts.values().sum()
    }

    fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }
}

fn progress_spinner(class: Label) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} documents {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("({} samples)", class.name()));
    pb
}

fn bag_of_words<S>(
    source: &S,
    normalizer: &Normalizer,
    class: Label,
) -> Result<BagOfWords, NaiveBayesError>
where
    S: SampleSource + ?Sized,
{
    info!("Generating BOW for {} training samples", class.name());

    let pb = progress_spinner(class);
    let mut bag = BagOfWords { counts: HashMap::new(), n_docs: 0 };

    for sample in source.samples()? {
        let sample = sample?;
        bag.n_docs += 1;
        for token in normalizer.normalize(&sample.text) {
            *bag.counts.entry(token).or_insert(0) += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if bag.n_docs == 0 {
        return Err(CorpusError::Empty(class).into());
    }
    debug!("{} {} documents, {} distinct words", bag.n_docs, class.name(), bag.counts.len());
    Ok(bag)
}

fn smoothed_log_likelihoods(
    bag: &BagOfWords,
    vocabulary: &HashSet<&str>,
    denominator: u64,
) -> HashMap<String, f64> {
    let denominator = denominator as f64;
    vocabulary
        .iter()
        .map(|word| {
            let frequency = (bag.count(word) + 1) as f64;
            (word.to_string(), (frequency / denominator).ln())
        })
        .collect()
}

/// Estimate priors and add-one smoothed word likelihoods from the positive
/// and negative training samples.
///
/// Fails with a corpus error when either class yields no documents or no
/// document yields a token.
pub fn train<P, N>(
    positive: &P,
    negative: &N,
    normalizer: &Normalizer,
) -> Result<ModelParameters, NaiveBayesError>
where
    P: SampleSource + ?Sized,
    N: SampleSource + ?Sized,
{
    let pos_bow = bag_of_words(positive, normalizer, Label::Positive)?;
    let neg_bow = bag_of_words(negative, normalizer, Label::Negative)?;

    let n_samples = (pos_bow.n_docs + neg_bow.n_docs) as f64;
    let pos_prior = (pos_bow.n_docs as f64 / n_samples).ln();
    let neg_prior = (neg_bow.n_docs as f64 / n_samples).ln();

    let n_pos_words = pos_bow.n_words();
    let n_neg_words = neg_bow.n_words();

    info!("Collating vocabulary of unique words");
    let vocabulary: HashSet<&str> = pos_bow
        .counts
        .keys()
        .chain(neg_bow.counts.keys())
        .map(String::as_str)
        .collect();
    let n_vocab = vocabulary.len() as u64;
    if n_vocab == 0 {
        return Err(CorpusError::EmptyVocabulary.into());
    }

    info!("Calculating word likelihoods over {} words", n_vocab);
    let pos_likelihood = smoothed_log_likelihoods(&pos_bow, &vocabulary, n_pos_words + n_vocab);
    let neg_likelihood = smoothed_log_likelihoods(&neg_bow, &vocabulary, n_neg_words + n_vocab);

    Ok(ModelParameters {
        pos_prior,
        neg_prior,
        n_pos_words,
        n_neg_words,
        n_vocab,
        pos_likelihood,
        neg_likelihood,
    })
}
// ************* Training *************** | END


// ************* Classifier *************** | START
#[derive(Serialize)]
struct SavedModelRef<'a> {
    normalizer: NormalizerConfig,
    params: &'a ModelParameters,
}

#[derive(Deserialize)]
struct SavedModel {
    normalizer: NormalizerConfig,
    params: ModelParameters,
}

/// Trained parameters bound to the normalizer that feeds them.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    params: ModelParameters,
    defaults: DefaultLikelihoods,
    normalizer: Normalizer,
}

impl NaiveBayesClassifier {
    pub fn new(params: ModelParameters, normalizer: Normalizer) -> Self {
        let defaults = DefaultLikelihoods::from_params(&params);
        Self { params, defaults, normalizer }
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn defaults(&self) -> DefaultLikelihoods {
        self.defaults
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Log-likelihood of `word`, falling back to the unseen-word default.
    pub fn log_likelihood(&self, class: Label, word: &str) -> f64 {
        self.params
            .log_likelihood(class, word)
            .unwrap_or_else(|| self.defaults.get(class))
    }

    /// Unnormalized `(positive, negative)` log-posterior of `text`.
    pub fn scores(&self, text: &str) -> (f64, f64) {
        let mut positive = self.params.prior(Label::Positive);
        let mut negative = self.params.prior(Label::Negative);

        for word in self.normalizer.normalize(text) {
            positive += self.log_likelihood(Label::Positive, &word);
            negative += self.log_likelihood(Label::Negative, &word);
        }

        (positive, negative)
    }

    /// Classify the given text as a positive or negative review.
    ///
    /// A zero or tied score pair means the parameters or the tokenization are
    /// degenerate and is reported as an error rather than guessed.
    pub fn classify(&self, text: &str) -> Result<Label, NaiveBayesError> {
        let (positive, negative) = self.scores(text);

        if positive == 0.0 || negative == 0.0 || positive == negative {
            return Err(NaiveBayesError::InvariantViolation { positive, negative });
        }

        Ok(if positive > negative { Label::Positive } else { Label::Negative })
    }

    /// Save the model to a file.
    ///
    /// The file is written next to its destination and renamed into place, so
    /// a failed save never leaves a partial model behind.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), NaiveBayesError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let record = SavedModelRef { normalizer: self.normalizer.config(), params: &self.params };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(NaiveBayesError::SaveError)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, &record)
                .map_err(NaiveBayesError::SerializationError)?;
            writer.flush().map_err(NaiveBayesError::SaveError)?;
        }
        tmp.as_file().sync_all().map_err(NaiveBayesError::SaveError)?;
        tmp.persist(path).map_err(|e| NaiveBayesError::SaveError(e.error))?;

        info!("Saved model parameters to {}", path.display());
        Ok(())
    }

    /// Load the model from a file and bind it to `config`.
    ///
    /// A model trained under a different normalizer config still loads, but
    /// accuracy will suffer, so the mismatch is logged.
    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
        config: NormalizerConfig,
    ) -> Result<Self, NaiveBayesError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(NaiveBayesError::LoadError)?;
        let saved: SavedModel = serde_json::from_reader(BufReader::new(file))
            .map_err(NaiveBayesError::SerializationError)?;

        if saved.normalizer != config {
            warn!(
                "Model in {} was trained with {:?} but {:?} was requested; pass --retrain to rebuild it",
                path.display(),
                saved.normalizer,
                config
            );
        }

        info!("Loaded model parameters from {}", path.display());
        Ok(Self::new(saved.params, Normalizer::new(config)))
    }
}
// ************* Classifier *************** | END
