//! Gable roof covering estimates.

use super::params::{Categorical, Params};
use super::tables::{PriceBook, INSULATION_PER_M2};
use super::types::{CalcError, CalculationReport, CalculationResult, Category, Fields};
use crate::display::format_money;

const FORMAT: &str = "длина ширина уклон материал";

const WATERPROOFING_PER_M2: f64 = 40.0;
const OSB_PER_M2: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoofMaterial {
    MetalTile,
    Soft,
}

impl RoofMaterial {
    /// Overlap waste multiplier for the covering.
    pub fn waste_factor(self) -> f64 {
        match self {
            RoofMaterial::MetalTile => 1.10,
            RoofMaterial::Soft => 1.15,
        }
    }

    fn work_rate(self) -> f64 {
        match self {
            RoofMaterial::MetalTile => 800.0,
            RoofMaterial::Soft => 1000.0,
        }
    }

    /// Waterproofing membrane for tile, OSB decking for shingles.
    fn substrate_rate(self) -> f64 {
        match self {
            RoofMaterial::MetalTile => WATERPROOFING_PER_M2,
            RoofMaterial::Soft => OSB_PER_M2,
        }
    }
}

impl Categorical for RoofMaterial {
    const CATEGORY: Category = Category::RoofMaterial;
    const ALL: &'static [Self] = &[RoofMaterial::MetalTile, RoofMaterial::Soft];

    fn name(self) -> &'static str {
        match self {
            RoofMaterial::MetalTile => "металлочерепица",
            RoofMaterial::Soft => "мягкая",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            RoofMaterial::MetalTile => &["metal-tile", "metal"],
            RoofMaterial::Soft => &["soft", "bitumen", "битумная"],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoofEstimate {
    pub material: RoofMaterial,
    pub slope_length: f64,
    pub area: f64,
    pub covering_m2: f64,
    pub covering_cost: f64,
    pub substrate_cost: f64,
    pub insulation_cost: f64,
    pub work_cost: f64,
}

impl RoofEstimate {
    pub fn total_cost(&self) -> f64 {
        self.covering_cost + self.substrate_cost + self.insulation_cost + self.work_cost
    }
}

/// Two equal pitches over a `length × width` plan, `angle` in degrees.
pub fn estimate(
    length: f64,
    width: f64,
    angle: f64,
    material: RoofMaterial,
    prices: &PriceBook,
) -> RoofEstimate {
    let slope_length = width / (2.0 * angle.to_radians().cos());
    let area = length * slope_length * 2.0;
    let covering_m2 = area * material.waste_factor();
    let covering_price = match material {
        RoofMaterial::MetalTile => prices.metal_tile_m2,
        RoofMaterial::Soft => prices.soft_roof_m2,
    };

    RoofEstimate {
        material,
        slope_length,
        area,
        covering_m2,
        covering_cost: covering_m2 * covering_price,
        substrate_cost: area * material.substrate_rate(),
        insulation_cost: area * INSULATION_PER_M2,
        work_cost: area * material.work_rate(),
    }
}

/// `length width angle material`
pub fn compute(params: &[String], prices: &PriceBook) -> CalculationResult {
    run(Params::new(params), prices).into()
}

fn run(params: Params<'_>, prices: &PriceBook) -> Result<CalculationReport, CalcError> {
    params.require(4, FORMAT)?;
    let length = params.number(0, "длина")?;
    let width = params.number(1, "ширина")?;
    let angle = params.number(2, "уклон")?;
    // cos(90°) = 0 makes the slope infinite
    if angle >= 90.0 {
        return Err(CalcError::invalid_number(
            "уклон",
            params.text(2).unwrap_or_default(),
        ));
    }
    let material: RoofMaterial = params.category(3)?;
    let est = estimate(length, width, angle, material, prices);

    let mut parameters = Fields::new()
        .with("Длина", format!("{} м", length))
        .with("Ширина", format!("{} м", width))
        .with("Уклон", format!("{}°", angle))
        .with("Площадь крыши", format!("{:.1} м²", est.area));

    let report = match material {
        RoofMaterial::MetalTile => {
            parameters.push("Длина ската", format!("{:.1} м", est.slope_length));
            CalculationReport::new("Крыша из металлочерепицы", parameters)
                .with_materials(
                    Fields::new()
                        .with("Металлочерепица", format!("{:.1} м²", est.covering_m2))
                        .with("Гидроизоляция", format!("{:.1} м²", est.area))
                        .with("Утеплитель 200 мм", format!("{:.1} м²", est.area))
                        .with("Обрешетка", format!("{:.1} м²", est.area * 1.2)),
                )
                .with_cost(
                    Fields::new()
                        .with("Металлочерепица", format_money(est.covering_cost))
                        .with("Гидроизоляция", format_money(est.substrate_cost))
                        .with("Утеплитель", format_money(est.insulation_cost))
                        .with("Работа", format_money(est.work_cost))
                        .with("Итого", format_money(est.total_cost())),
                )
                .with_formula("S = Д × (Ш / (2 × cos(α))) × 2, где α - угол уклона")
        }
        RoofMaterial::Soft => CalculationReport::new("Мягкая кровля (битумная черепица)", parameters)
            .with_materials(
                Fields::new()
                    .with("Битумная черепица", format!("{:.1} м²", est.covering_m2))
                    .with("ОСП-3 9мм", format!("{:.1} м²", est.area))
                    .with("Утеплитель", format!("{:.1} м²", est.area)),
            )
            .with_cost(
                Fields::new()
                    .with("Черепица", format_money(est.covering_cost))
                    .with("ОСП", format_money(est.substrate_cost))
                    .with("Утеплитель", format_money(est.insulation_cost))
                    .with("Работа", format_money(est.work_cost))
                    .with("Итого", format_money(est.total_cost())),
            )
            .with_formula("Мягкая кровля требует сплошного основания из ОСП"),
    };

    Ok(report)
}
