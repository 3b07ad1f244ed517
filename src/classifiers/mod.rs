pub mod naive_bayes;

pub use naive_bayes::{
    train, DefaultLikelihoods, ModelParameters, NaiveBayesClassifier, NaiveBayesError,
};
