//! Fixed lookup tables and the overridable unit price book.
//!
//! Everything here is immutable after startup: enumerated mappings are
//! `match` tables on closed enums, and the [`PriceBook`] is loaded once into
//! the [`FormulaLibrary`](super::FormulaLibrary).

use serde::{Deserialize, Serialize};

use super::params::Categorical;
use super::types::Category;
use crate::error::{Error, Result};

/// Unit prices (roubles) that operators may override through configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceBook {
    /// Ready-mix concrete, per m³
    pub concrete_m3: f64,
    /// Strip foundation labour, per m³
    pub strip_foundation_m3: f64,
    /// Slab foundation labour, per m³
    pub slab_foundation_m3: f64,
    /// Aerated block masonry labour, per m²
    pub aerated_walls_m2: f64,
    /// Brick masonry labour, per m²
    pub brick_walls_m2: f64,
    /// Timber wall assembly labour, per m²
    pub timber_walls_m2: f64,
    /// Facing brick, per piece
    pub brick_piece: f64,
    /// Metal tile covering, per m²
    pub metal_tile_m2: f64,
    /// Bitumen shingle covering, per m²
    pub soft_roof_m2: f64,
    /// Insulation upgrade to "good", per m² of floor
    pub insulation_upgrade_m2: f64,
}

impl Default for PriceBook {
    fn default() -> Self {
        Self {
            concrete_m3: 4500.0,
            strip_foundation_m3: 3500.0,
            slab_foundation_m3: 4500.0,
            aerated_walls_m2: 1800.0,
            brick_walls_m2: 2500.0,
            timber_walls_m2: 3000.0,
            brick_piece: 35.0,
            metal_tile_m2: 450.0,
            soft_roof_m2: 550.0,
            insulation_upgrade_m2: 1500.0,
        }
    }
}

impl PriceBook {
    fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("concrete_m3", self.concrete_m3),
            ("strip_foundation_m3", self.strip_foundation_m3),
            ("slab_foundation_m3", self.slab_foundation_m3),
            ("aerated_walls_m2", self.aerated_walls_m2),
            ("brick_walls_m2", self.brick_walls_m2),
            ("timber_walls_m2", self.timber_walls_m2),
            ("brick_piece", self.brick_piece),
            ("metal_tile_m2", self.metal_tile_m2),
            ("soft_roof_m2", self.soft_roof_m2),
            ("insulation_upgrade_m2", self.insulation_upgrade_m2),
        ]
    }

    /// Every price must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        match self
            .entries()
            .into_iter()
            .find(|(_, price)| !price.is_finite() || *price < 0.0)
        {
            Some((name, price)) => Err(Error::Config(format!(
                "prices.{} must be a finite non-negative number, got {}",
                name, price
            ))),
            None => Ok(()),
        }
    }
}

/// Rebar price per kg, all calculators.
pub const REBAR_PER_KG: f64 = 45.0;
/// Mineral wool insulation, per m².
pub const INSULATION_PER_M2: f64 = 350.0;
/// Cement-sand mortar, per m³.
pub const MORTAR_PER_M3: f64 = 3500.0;

/// Finish quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Economy,
    Standard,
    Premium,
}

impl Quality {
    /// Price multiplier.
    pub fn coefficient(self) -> f64 {
        match self {
            Quality::Economy => 0.7,
            Quality::Standard => 1.0,
            Quality::Premium => 1.5,
        }
    }

    /// Multiplier for a raw token; unrecognised tiers count as standard.
    pub fn coefficient_for(token: &str) -> f64 {
        Self::parse(token).unwrap_or(Quality::Standard).coefficient()
    }
}

impl Categorical for Quality {
    const CATEGORY: Category = Category::Quality;
    const ALL: &'static [Self] = &[Quality::Economy, Quality::Standard, Quality::Premium];

    fn name(self) -> &'static str {
        match self {
            Quality::Economy => "эконом",
            Quality::Standard => "стандарт",
            Quality::Premium => "премиум",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Quality::Economy => &["economy", "econom"],
            Quality::Standard => &["standard"],
            Quality::Premium => &["premium"],
        }
    }
}

/// Concrete grade with its per-m³ dry mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcreteGrade {
    M100,
    M150,
    M200,
    M250,
    M300,
    M350,
}

/// Mix proportions for one cubic metre of concrete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixDesign {
    pub cement_kg: f64,
    pub sand_kg: f64,
    pub gravel_kg: f64,
    pub water_l: f64,
}

impl ConcreteGrade {
    pub fn mix(self) -> MixDesign {
        let (cement_kg, sand_kg, gravel_kg, water_l) = match self {
            ConcreteGrade::M100 => (180.0, 840.0, 1050.0, 210.0),
            ConcreteGrade::M150 => (220.0, 780.0, 1080.0, 190.0),
            ConcreteGrade::M200 => (280.0, 740.0, 1100.0, 180.0),
            ConcreteGrade::M250 => (330.0, 700.0, 1120.0, 170.0),
            ConcreteGrade::M300 => (380.0, 645.0, 1080.0, 190.0),
            ConcreteGrade::M350 => (420.0, 590.0, 1090.0, 180.0),
        };
        MixDesign {
            cement_kg,
            sand_kg,
            gravel_kg,
            water_l,
        }
    }
}

impl Categorical for ConcreteGrade {
    const CATEGORY: Category = Category::Grade;
    const ALL: &'static [Self] = &[
        ConcreteGrade::M100,
        ConcreteGrade::M150,
        ConcreteGrade::M200,
        ConcreteGrade::M250,
        ConcreteGrade::M300,
        ConcreteGrade::M350,
    ];

    fn name(self) -> &'static str {
        match self {
            ConcreteGrade::M100 => "М100",
            ConcreteGrade::M150 => "М150",
            ConcreteGrade::M200 => "М200",
            ConcreteGrade::M250 => "М250",
            ConcreteGrade::M300 => "М300",
            ConcreteGrade::M350 => "М350",
        }
    }

    // Latin "m" spellings
    fn aliases(self) -> &'static [&'static str] {
        match self {
            ConcreteGrade::M100 => &["m100"],
            ConcreteGrade::M150 => &["m150"],
            ConcreteGrade::M200 => &["m200"],
            ConcreteGrade::M250 => &["m250"],
            ConcreteGrade::M300 => &["m300"],
            ConcreteGrade::M350 => &["m350"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_coefficients() {
        assert_eq!(Quality::coefficient_for("эконом"), 0.7);
        assert_eq!(Quality::coefficient_for("Standard"), 1.0);
        assert_eq!(Quality::coefficient_for("премиум"), 1.5);
        assert_eq!(Quality::coefficient_for("люкс"), 1.0);
    }

    #[test]
    fn test_grade_accepts_latin_and_cyrillic() {
        assert_eq!(ConcreteGrade::parse("M300"), Some(ConcreteGrade::M300));
        assert_eq!(ConcreteGrade::parse("м300"), Some(ConcreteGrade::M300));
        assert_eq!(ConcreteGrade::parse("М300"), Some(ConcreteGrade::M300));
        assert_eq!(ConcreteGrade::parse("M400"), None);
    }

    #[test]
    fn test_m300_mix() {
        let mix = ConcreteGrade::M300.mix();
        assert_eq!(mix.cement_kg, 380.0);
        assert_eq!(mix.sand_kg, 645.0);
        assert_eq!(mix.gravel_kg, 1080.0);
        assert_eq!(mix.water_l, 190.0);
    }

    #[test]
    fn test_price_book_partial_override() {
        let prices: PriceBook = serde_json::from_str(r#"{"concrete_m3": 5000}"#).unwrap();
        assert_eq!(prices.concrete_m3, 5000.0);
        assert_eq!(prices.brick_walls_m2, 2500.0);
    }

    #[test]
    fn test_price_book_validate() {
        assert!(PriceBook::default().validate().is_ok());

        let free = PriceBook {
            brick_piece: 0.0,
            ..PriceBook::default()
        };
        assert!(free.validate().is_ok());

        let infinite = PriceBook {
            soft_roof_m2: f64::INFINITY,
            ..PriceBook::default()
        };
        assert!(matches!(infinite.validate(), Err(Error::Config(_))));
    }
}
