use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Sentiment of a review. There is no neutral outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
}
impl Label {
    /// `+1` for positive, `-1` for negative.
    pub fn value(&self) -> i8 {
        match self {
            Label::Positive => 1,
            Label::Negative => -1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
        }
    }

    pub fn from_rating(rating: u32) -> Self {
        if rating >= 7 {
            Label::Positive
        } else {
            Label::Negative
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One review read from a corpus. Consumed once, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub id: u64,
    pub text: String,
    pub label: Label,
}

impl LabeledSample {
    pub fn new(id: u64, text: impl Into<String>, label: Label) -> Self {
        Self { id, text: text.into(), label }
    }
}
