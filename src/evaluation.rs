use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::classifiers::{NaiveBayesClassifier, NaiveBayesError};
use crate::corpus::{CorpusError, SampleSource};
use crate::generic_types::Label;

#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("{0} is undefined: its denominator is zero")]
    UndefinedMetric(&'static str),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Classifier(#[from] NaiveBayesError),
}

/// Confusion matrix with `Positive` as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub tp: u64,
    pub tn: u64,
    pub fp: u64,
    pub fn_: u64,
}

impl ConfusionCounts {
    pub fn record(&mut self, actual: Label, predicted: Label) {
        match (actual, predicted) {
            (Label::Positive, Label::Positive) => self.tp += 1,
            (Label::Positive, Label::Negative) => self.fn_ += 1,
            (Label::Negative, Label::Positive) => self.fp += 1,
            (Label::Negative, Label::Negative) => self.tn += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.tp + self.tn + self.fp + self.fn_
    }

    pub fn metrics(&self) -> Result<Metrics, EvaluationError> {
        let precision = ratio("precision", self.tp, self.tp + self.fp)?;
        let recall = ratio("recall", self.tp, self.tp + self.fn_)?;
        let accuracy = ratio("accuracy", self.tp + self.tn, self.total())?;

        let pr_sum = precision + recall;
        if pr_sum == 0.0 {
            return Err(EvaluationError::UndefinedMetric("f-measure"));
        }
        let f_measure = 2.0 * precision * recall / pr_sum;

        Ok(Metrics { precision, recall, f_measure, accuracy })
    }
}

fn ratio(name: &'static str, numerator: u64, denominator: u64) -> Result<f64, EvaluationError> {
    if denominator == 0 {
        return Err(EvaluationError::UndefinedMetric(name));
    }
    Ok(numerator as f64 / denominator as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f_measure: f64,
    pub accuracy: f64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "EVALUATION - Precision: {:.4}", self.precision)?;
        writeln!(f, "EVALUATION - Recall: {:.4}", self.recall)?;
        writeln!(f, "EVALUATION - F-measure: {:.4}", self.f_measure)?;
        write!(f, "EVALUATION - Accuracy: {:.4}", self.accuracy)
    }
}

/// Classify every test sample and tally the outcome against its own label.
pub fn confusion_counts<P, N>(
    positive: &P,
    negative: &N,
    classifier: &NaiveBayesClassifier,
) -> Result<ConfusionCounts, EvaluationError>
where
    P: SampleSource + ?Sized,
    N: SampleSource + ?Sized,
{
    info!("Testing classifier against test samples...");
    let mut counts = ConfusionCounts::default();
    for sample in positive.samples()?.chain(negative.samples()?) {
        let sample = sample?;
        let predicted = classifier.classify(&sample.text)?;
        counts.record(sample.label, predicted);
    }
    info!("Classified {} test samples", counts.total());
    Ok(counts)
}

/// Precision, recall, F-measure and accuracy of `classifier` on the test samples.
pub fn evaluate<P, N>(
    positive: &P,
    negative: &N,
    classifier: &NaiveBayesClassifier,
) -> Result<Metrics, EvaluationError>
where
    P: SampleSource + ?Sized,
    N: SampleSource + ?Sized,
{
    confusion_counts(positive, negative, classifier)?.metrics()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::train;
    use crate::generic_types::LabeledSample;
    use crate::text::{Normalizer, NormalizerConfig};

    fn samples(texts: &[&str], label: Label) -> Vec<LabeledSample> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| LabeledSample::new(i as u64, *text, label))
            .collect()
    }

    fn balanced_classifier() -> NaiveBayesClassifier {
        let normalizer = Normalizer::new(NormalizerConfig::raw());
        let pos = samples(&["good movie good", "great film"], Label::Positive);
        let neg = samples(&["bad movie", "terrible film"], Label::Negative);
        let params = train(&pos, &neg, &normalizer).unwrap();
        NaiveBayesClassifier::new(params, normalizer)
    }

    #[test]
    fn metrics_from_counts() {
        let counts = ConfusionCounts { tp: 8, fp: 2, tn: 7, fn_: 3 };
        let metrics = counts.metrics().unwrap();
        assert!((metrics.precision - 0.8).abs() < 1e-9);
        assert!((metrics.recall - 0.7273).abs() < 1e-3);
        assert!((metrics.accuracy - 0.75).abs() < 1e-9);
        let expected_f = 2.0 * 0.8 * (8.0 / 11.0) / (0.8 + 8.0 / 11.0);
        assert!((metrics.f_measure - expected_f).abs() < 1e-9);
    }

    #[test]
    fn no_predicted_positives_is_undefined() {
        let counts = ConfusionCounts { tp: 0, fp: 0, tn: 5, fn_: 5 };
        assert!(matches!(counts.metrics(), Err(EvaluationError::UndefinedMetric("precision"))));
    }

    #[test]
    fn no_true_positives_leaves_f_measure_undefined() {
        let counts = ConfusionCounts { tp: 0, fp: 3, tn: 1, fn_: 2 };
        assert!(matches!(counts.metrics(), Err(EvaluationError::UndefinedMetric("f-measure"))));
    }

    #[test]
    fn empty_evaluation_is_undefined() {
        assert!(matches!(
            ConfusionCounts::default().metrics(),
            Err(EvaluationError::UndefinedMetric(_))
        ));
    }

    #[test]
    fn record_fills_matrix() {
        let mut counts = ConfusionCounts::default();
        counts.record(Label::Positive, Label::Positive);
        counts.record(Label::Positive, Label::Negative);
        counts.record(Label::Negative, Label::Positive);
        counts.record(Label::Negative, Label::Negative);
        counts.record(Label::Negative, Label::Negative);
        assert_eq!(counts, ConfusionCounts { tp: 1, fn_: 1, fp: 1, tn: 2 });
    }

    #[test]
    fn report_format() {
        let metrics = Metrics { precision: 0.8, recall: 0.72727, f_measure: 0.7619, accuracy: 0.75 };
        let report = metrics.to_string();
        assert!(report.starts_with("EVALUATION - Precision: 0.8000\n"));
        assert!(report.contains("EVALUATION - Recall: 0.7273"));
        assert!(report.ends_with("EVALUATION - Accuracy: 0.7500"));
    }

    #[test]
    fn evaluates_in_memory_samples() {
        let classifier = balanced_classifier();
        let pos = samples(&["good movie", "great"], Label::Positive);
        let neg = samples(&["terrible film", "bad"], Label::Negative);
        let metrics = evaluate(&pos, &neg, &classifier).unwrap();
        assert_eq!(metrics.accuracy, 1.0);
    }

    #[test]
    fn tied_sample_aborts_evaluation() {
        let classifier = balanced_classifier();
        let pos = samples(&["good movie"], Label::Positive);
        let neg = samples(&["!!! 42", "bad film"], Label::Negative);

        let err = evaluate(&pos, &neg, &classifier).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Classifier(NaiveBayesError::InvariantViolation { .. })
        ));
    }
}
