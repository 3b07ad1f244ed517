//! Text normalization shared by training and classification.

pub mod lemmatizer;
pub mod normalizer;
pub mod stopwords;

pub use normalizer::{normalize, Normalizer, NormalizerConfig};
