//! Binary sentiment classification of movie reviews with a bag-of-words
//! Naive Bayes model and add-one smoothing.
//!
//! - [`text`] turns review text into tokens
//! - [`classifiers::naive_bayes`] trains parameters and classifies text
//! - [`evaluation`] scores a classifier against a labeled test split
//! - [`corpus`] reads `<id>_<rating>.txt` review directories
//! - [`app`] ties them into the load-or-train lifecycle used by the binary

pub mod app;
pub mod classifiers;
pub mod config;
pub mod corpus;
pub mod evaluation;
pub mod generic_types;
pub mod logging;
pub mod options;
pub mod text;
