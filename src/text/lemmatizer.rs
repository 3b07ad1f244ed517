//! English lemmatizer backed by a bundled list of base forms.
//!
//! Inflected nouns are reduced by suffix rules (`movies` -> `movie`,
//! `stories` -> `story`, `boxes` -> `box`), but a rule only applies when it
//! lands on a word from `base_forms.txt`. Irregular nouns and the common
//! irregular verb forms come from a fixed table. Anything else is returned
//! unchanged, so lemmatization never fails.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

const IRREGULAR: &[(&str, &str)] = &[
    // nouns
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("wolves", "wolf"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    // verbs
    ("is", "be"),
    ("am", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("doing", "do"),
    ("done", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("going", "go"),
    ("ran", "run"),
    ("running", "run"),
    ("made", "make"),
    ("making", "make"),
    ("saw", "see"),
    ("seen", "see"),
    ("took", "take"),
    ("taken", "take"),
    ("got", "get"),
    ("gotten", "get"),
    ("gave", "give"),
    ("given", "give"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("told", "tell"),
    ("found", "find"),
    ("came", "come"),
    ("felt", "feel"),
    ("watched", "watch"),
    ("watching", "watch"),
    ("loved", "love"),
    ("loving", "love"),
    ("hated", "hate"),
    ("acted", "act"),
    ("acting", "act"),
];

/// Noun inflection rules, tried in order. A rule only applies when its
/// result is a known base form.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("s", ""),
];

lazy_static! {
    static ref IRREGULAR_MAP: HashMap<&'static str, &'static str> =
        IRREGULAR.iter().copied().collect();
    // One base form per line.
    static ref BASE_FORMS: HashSet<&'static str> = include_str!("base_forms.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
}

/// Map `token` to its base form; unknown shapes pass through unchanged.
pub fn lemmatize(token: &str) -> String {
    if let Some(lemma) = IRREGULAR_MAP.get(token) {
        return (*lemma).to_string();
    }
    if BASE_FORMS.contains(token) || !token.chars().all(|c| c.is_ascii_lowercase()) {
        return token.to_string();
    }

    SUFFIX_RULES
        .iter()
        .copied()
        .filter_map(|(suffix, replacement)| {
            let stem = token.strip_suffix(suffix)?;
            let candidate = format!("{}{}", stem, replacement);
            BASE_FORMS.contains(candidate.as_str()).then_some(candidate)
        })
        .next()
        .unwrap_or_else(|| token.to_string())
}
