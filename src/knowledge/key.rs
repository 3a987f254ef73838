//! Exact-match lookup keys for questions.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 of a question's normalized text, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionKey(pub String);

impl QuestionKey {
    /// Key for `question`: lowercased, surrounding whitespace trimmed and
    /// inner runs of whitespace collapsed to one space before hashing.
    pub fn from_question(question: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(normalize(question).as_bytes());
        let hash = hasher.finalize();
        QuestionKey(format!("{:x}", hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.get(..16).unwrap_or(&self.0))
    }
}

/// Lowercase and collapse whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
