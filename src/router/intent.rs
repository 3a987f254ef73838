//! Keyword signals that decide which pipeline handles a message.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CALCULATOR_TRIGGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(посчитай|рассчитай|расч[её]т|сколько\s+нужно|как\s+рассчитать|calculate|compute|how\s+much\s+is\s+needed)",
    )
    .expect("invalid regex")
});

static MATERIAL_TRIGGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(сколько\s+стоит|цена|стоимость|купить|материал|price|cost|buy|material|how\s+much\s+does)",
    )
    .expect("invalid regex")
});

/// Shortest standalone word tried on its own in a material search.
const MIN_TERM_CHARS: usize = 4;

/// Which trigger families a message contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSignals {
    pub calculator: bool,
    pub material: bool,
}

impl IntentSignals {
    pub fn from_text(text: &str) -> Self {
        Self {
            calculator: CALCULATOR_TRIGGER.is_match(text),
            material: MATERIAL_TRIGGER.is_match(text),
        }
    }
}

/// `text` with calculator trigger phrases removed.
pub fn strip_calculator_triggers(text: &str) -> String {
    strip(&CALCULATOR_TRIGGER, text)
}

/// Search terms for a material query, most specific first: the message
/// without trigger phrases, then each remaining word long enough to stand
/// on its own.
pub fn material_search_terms(text: &str) -> Vec<String> {
    let phrase = strip(&MATERIAL_TRIGGER, text);
    let mut terms = Vec::new();
    if !phrase.is_empty() {
        terms.push(phrase.clone());
    }
    for word in phrase.split_whitespace() {
        let word = trim_punctuation(word);
        if word.chars().count() >= MIN_TERM_CHARS && !terms.iter().any(|t| t == word) {
            terms.push(word.to_string());
        }
    }
    terms
}

fn strip(pattern: &Regex, text: &str) -> String {
    let replaced = pattern.replace_all(text, " ");
    let joined = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    trim_punctuation(&joined).to_string()
}

fn trim_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | ',' | '.' | '?' | '!' | ';'))
}
