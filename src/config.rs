//! Assistant configuration.

use serde::{Deserialize, Serialize};

use crate::calc::PriceBook;
use crate::error::{Error, Result};

/// Tunables for the router and the knowledge lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Substring matches returned by a knowledge search (default: 5)
    pub qa_search_limit: usize,
    /// Materials fetched per material query (default: 10)
    pub material_search_limit: usize,
    /// Materials rendered in a reply (default: 5)
    pub material_display_limit: usize,
    /// Characters of an answer shown in result lists (default: 80)
    pub preview_chars: usize,
    /// Unit prices used by the calculators
    pub prices: PriceBook,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            qa_search_limit: 5,
            material_search_limit: 10,
            material_display_limit: 5,
            preview_chars: 80,
            prices: PriceBook::default(),
        }
    }
}

impl AssistantConfig {
    pub const ENV_QA_LIMIT: &'static str = "STROYKA_QA_LIMIT";
    pub const ENV_MATERIAL_LIMIT: &'static str = "STROYKA_MATERIAL_LIMIT";
    pub const ENV_MATERIAL_SHOWN: &'static str = "STROYKA_MATERIAL_SHOWN";
    pub const ENV_PREVIEW_CHARS: &'static str = "STROYKA_PREVIEW_CHARS";

    pub fn with_qa_search_limit(mut self, limit: usize) -> Self {
        self.qa_search_limit = limit;
        self
    }

    pub fn with_material_search_limit(mut self, limit: usize) -> Self {
        self.material_search_limit = limit;
        self
    }

    pub fn with_material_display_limit(mut self, limit: usize) -> Self {
        self.material_display_limit = limit;
        self
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    pub fn with_prices(mut self, prices: PriceBook) -> Self {
        self.prices = prices;
        self
    }

    /// Defaults overridden by `STROYKA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let read = |name: &str, target: &mut usize| -> Result<()> {
            if let Some(raw) = lookup(name) {
                *target = raw.trim().parse().map_err(|_| {
                    Error::Config(format!("{} must be a non-negative integer, got '{}'", name, raw))
                })?;
            }
            Ok(())
        };
        read(Self::ENV_QA_LIMIT, &mut config.qa_search_limit)?;
        read(Self::ENV_MATERIAL_LIMIT, &mut config.material_search_limit)?;
        read(Self::ENV_MATERIAL_SHOWN, &mut config.material_display_limit)?;
        read(Self::ENV_PREVIEW_CHARS, &mut config.preview_chars)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every search come back empty, and
    /// prices that would turn estimates negative.
    pub fn validate(&self) -> Result<()> {
        if self.qa_search_limit == 0 {
            return Err(Error::Config("qa_search_limit must be at least 1".into()));
        }
        if self.material_search_limit == 0 {
            return Err(Error::Config(
                "material_search_limit must be at least 1".into(),
            ));
        }
        if self.material_display_limit == 0 {
            return Err(Error::Config(
                "material_display_limit must be at least 1".into(),
            ));
        }
        self.prices.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.qa_search_limit, 5);
        assert_eq!(config.material_search_limit, 10);
        assert_eq!(config.material_display_limit, 5);
        assert_eq!(config.preview_chars, 80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            (AssistantConfig::ENV_QA_LIMIT, "3"),
            (AssistantConfig::ENV_PREVIEW_CHARS, " 120 "),
        ]
        .into_iter()
        .collect();
        let config =
            AssistantConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.qa_search_limit, 3);
        assert_eq!(config.preview_chars, 120);
        assert_eq!(config.material_search_limit, 10);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let err = AssistantConfig::from_lookup(|name| {
            (name == AssistantConfig::ENV_MATERIAL_SHOWN).then(|| "пять".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let zero = AssistantConfig::from_lookup(|name| {
            (name == AssistantConfig::ENV_QA_LIMIT).then(|| "0".to_string())
        });
        assert!(zero.is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = AssistantConfig::from_json(
            r#"{"preview_chars": 40, "prices": {"concrete_m3": 5000.0}}"#,
        )
        .unwrap();
        assert_eq!(config.preview_chars, 40);
        assert_eq!(config.prices.concrete_m3, 5000.0);
        assert_eq!(config.prices.brick_piece, PriceBook::default().brick_piece);
        assert_eq!(config.qa_search_limit, 5);
    }

    #[test]
    fn test_from_json_rejects_negative_price() {
        let err = AssistantConfig::from_json(r#"{"prices": {"concrete_m3": -5000}}"#).unwrap_err();
        match err {
            Error::Config(message) => assert!(message.contains("concrete_m3")),
            other => panic!("unexpected: {:?}", other),
        }

        let config = AssistantConfig::default().with_prices(PriceBook {
            metal_tile_m2: f64::NAN,
            ..PriceBook::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            AssistantConfig::from_json("{not json"),
            Err(Error::Serialization(_))
        ));
    }
}
