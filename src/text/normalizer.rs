use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::lemmatizer::lemmatize;
use super::stopwords::is_stopword;

lazy_static! {
    // Word-like runs; inner hyphens and apostrophes stay attached.
    static ref WORD_RE: Regex = Regex::new(r"\w+(?:[-']\w+)*").expect("valid word pattern");
    // English clitics split off the way a Treebank tokenizer does.
    static ref CLITIC_RE: Regex = Regex::new(r"^(.+?)(n't|'s|'ve|'re|'ll|'d|'m)$").expect("valid clitic pattern");
}

/// Switches that change the token stream. Training and classification must
/// use the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizerConfig {
    pub stopwords: bool,
    pub lemmatize: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self { stopwords: true, lemmatize: true }
    }
}

impl NormalizerConfig {
    /// No filtering and no lemmatization.
    pub fn raw() -> Self {
        Self { stopwords: false, lemmatize: false }
    }
}

/// Turns raw review text into the token sequence fed to the bag-of-words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> NormalizerConfig {
        self.config
    }

    pub fn normalize(&self, text: &str) -> Vec<String> {
        normalize(text, self.config.stopwords, self.config.lemmatize)
    }
}

/// Lower-case, tokenize, drop tokens without letters, then optionally
/// lemmatize and filter stopwords. Order and duplicates are preserved.
pub fn normalize(text: &str, use_stopwords: bool, use_lemmatization: bool) -> Vec<String> {
    let text = text.trim().to_lowercase().replace('\u{2019}', "'");

    let mut tokens: Vec<String> = tokenize(&text)
        .into_iter()
        .filter(|token| token.chars().any(|c| c.is_ascii_lowercase()))
        .collect();

    if use_lemmatization {
        tokens = tokens.iter().map(|token| lemmatize(token)).collect();
    }

    if use_stopwords {
        tokens.retain(|token| !is_stopword(token));
    }

    tokens
}

/// Split already lower-cased text into word tokens, punctuation acting as a
/// separator.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in WORD_RE.find_iter(text) {
        match CLITIC_RE.captures(word.as_str()) {
            Some(caps) => {
                tokens.push(caps[1].to_string());
                tokens.push(caps[2].to_string());
            }
            None => tokens.push(word.as_str().to_string()),
        }
    }
    tokens
}
