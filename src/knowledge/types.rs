//! Core types for the knowledge base.

use serde::{Deserialize, Serialize};

/// Store-assigned row id.
pub type EntryId = i64;

/// A question-answer pair from the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QAEntry {
    /// Store-assigned id, `0` before insertion
    #[serde(default)]
    pub id: EntryId,
    pub question: String,
    pub answer: String,
    pub category: String,
    /// 1 (basic) to 5 (expert)
    pub difficulty: u8,
    /// Only ever incremented
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl QAEntry {
    /// Create a new entry with difficulty 1 and no tags.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
            difficulty: 1,
            usage_count: 0,
            tags: Vec::new(),
        }
    }

    /// Set the difficulty, clamped to 1..=5.
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty.clamp(1, 5);
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_usage_count(mut self, usage_count: u64) -> Self {
        self.usage_count = usage_count;
        self
    }
}

/// A priced building material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    #[serde(default)]
    pub id: EntryId,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub price_min: f64,
    /// Never below `price_min`
    pub price_max: f64,
    /// kg/m³
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub properties: String,
    #[serde(default)]
    pub applications: String,
    #[serde(default)]
    pub advantages: String,
    #[serde(default)]
    pub disadvantages: String,
    /// Comma-separated supplier names
    #[serde(default)]
    pub suppliers: String,
    /// 0 to 5
    #[serde(default)]
    pub eco_rating: u8,
}

impl MaterialEntry {
    /// Create a new material; a reversed price range is swapped into order.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit: impl Into<String>,
        price_min: f64,
        price_max: f64,
    ) -> Self {
        let (price_min, price_max) = if price_min <= price_max {
            (price_min, price_max)
        } else {
            (price_max, price_min)
        };
        Self {
            id: 0,
            name: name.into(),
            category: category.into(),
            unit: unit.into(),
            price_min,
            price_max,
            density: None,
            properties: String::new(),
            applications: String::new(),
            advantages: String::new(),
            disadvantages: String::new(),
            suppliers: String::new(),
            eco_rating: 0,
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_properties(mut self, properties: impl Into<String>) -> Self {
        self.properties = properties.into();
        self
    }

    pub fn with_applications(mut self, applications: impl Into<String>) -> Self {
        self.applications = applications.into();
        self
    }

    pub fn with_advantages(mut self, advantages: impl Into<String>) -> Self {
        self.advantages = advantages.into();
        self
    }

    pub fn with_disadvantages(mut self, disadvantages: impl Into<String>) -> Self {
        self.disadvantages = disadvantages.into();
        self
    }

    pub fn with_suppliers(mut self, suppliers: impl Into<String>) -> Self {
        self.suppliers = suppliers.into();
        self
    }

    /// Set the eco rating, capped at 5.
    pub fn with_eco_rating(mut self, eco_rating: u8) -> Self {
        self.eco_rating = eco_rating.min(5);
        self
    }

    /// Midpoint of the price range.
    pub fn price_avg(&self) -> f64 {
        (self.price_min + self.price_max) / 2.0
    }

    /// Supplier names, trimmed, without empty items.
    pub fn supplier_list(&self) -> Vec<&str> {
        self.suppliers
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Number of Q&A pairs in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub qa_count: u64,
}

/// Statistics about the knowledge store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub qa_pairs: u64,
    pub materials: u64,
    pub users: u64,
    pub queries: u64,
    /// Sum of every Q&A usage counter
    pub total_usage: u64,
    /// Largest categories first
    pub popular_categories: Vec<CategoryCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_avg_and_order() {
        let brick = MaterialEntry::new("Кирпич", "стены", "шт", 35.0, 25.0);
        assert_eq!(brick.price_min, 25.0);
        assert_eq!(brick.price_max, 35.0);
        assert_eq!(brick.price_avg(), 30.0);
    }

    #[test]
    fn test_supplier_list() {
        let wool = MaterialEntry::new("Минвата", "утеплители", "м²", 300.0, 400.0)
            .with_suppliers("Леруа Мерлен, Петрович,, ОБИ ");
        assert_eq!(wool.supplier_list(), vec!["Леруа Мерлен", "Петрович", "ОБИ"]);
        assert!(MaterialEntry::new("x", "y", "z", 1.0, 1.0)
            .supplier_list()
            .is_empty());
    }

    #[test]
    fn test_builders_clamp() {
        let qa = QAEntry::new("q", "a", "c").with_difficulty(9);
        assert_eq!(qa.difficulty, 5);
        assert_eq!(QAEntry::new("q", "a", "c").with_difficulty(0).difficulty, 1);
        let m = MaterialEntry::new("x", "y", "z", 1.0, 2.0).with_eco_rating(7);
        assert_eq!(m.eco_rating, 5);
    }

    #[test]
    fn test_qa_deserialize_defaults() {
        let qa: QAEntry = serde_json::from_str(
            r#"{"question":"Q","answer":"A","category":"стены","difficulty":2,"extra":1}"#,
        )
        .unwrap();
        assert_eq!(qa.id, 0);
        assert_eq!(qa.usage_count, 0);
        assert!(qa.tags.is_empty());
    }
}
