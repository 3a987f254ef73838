//! Wall masonry and timber estimates.

use super::params::{Categorical, Params};
use super::tables::{PriceBook, INSULATION_PER_M2, MORTAR_PER_M3};
use super::types::{CalcError, CalculationReport, CalculationResult, Category, Fields};
use crate::display::format_money;

const FORMAT: &str = "периметр высота толщина материал";

/// Aerated block 600×300×200: blocks per m² of wall at 300 mm thickness.
const AERATED_BLOCK_THICKNESS: f64 = 0.3;
const AERATED_BLOCK_PRICE: f64 = 150.0;
const AERATED_GLUE_KG_PER_M2: f64 = 0.03;
const GLUE_PER_KG: f64 = 25.0;
/// Bricks per m² of a 510 mm (two-brick) wall.
const BRICKS_PER_M2: f64 = 102.0;
const BRICK_WALL_THICKNESS: f64 = 0.51;
const MORTAR_M3_PER_M2: f64 = 0.25;
/// 150×150 beam cross-section and stock length.
const BEAM_SECTION: f64 = 0.15;
const BEAM_LENGTH: f64 = 6.0;
const BEAM_PRICE: f64 = 6000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallMaterial {
    AeratedBlock,
    Brick,
    Timber,
}

impl Categorical for WallMaterial {
    const CATEGORY: Category = Category::WallMaterial;
    const ALL: &'static [Self] = &[
        WallMaterial::AeratedBlock,
        WallMaterial::Brick,
        WallMaterial::Timber,
    ];

    fn name(self) -> &'static str {
        match self {
            WallMaterial::AeratedBlock => "газобетон",
            WallMaterial::Brick => "кирпич",
            WallMaterial::Timber => "дерево",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            WallMaterial::AeratedBlock => &["газоблок", "aerated-block", "aerated"],
            WallMaterial::Brick => &["brick"],
            WallMaterial::Timber => &["брус", "timber", "wood"],
        }
    }
}

/// Quantities and costs for the walls of one building.
#[derive(Debug, Clone, PartialEq)]
pub struct WallEstimate {
    pub material: WallMaterial,
    pub area: f64,
    /// Blocks, bricks or 6 m beams
    pub units: f64,
    pub material_cost: f64,
    /// Glue, mortar or insulation
    pub auxiliary_cost: f64,
    pub work_cost: f64,
}

impl WallEstimate {
    pub fn total_cost(&self) -> f64 {
        self.material_cost + self.auxiliary_cost + self.work_cost
    }
}

/// Wall area = perimeter × height, then per-material consumption.
pub fn estimate(
    perimeter: f64,
    height: f64,
    thickness: f64,
    material: WallMaterial,
    prices: &PriceBook,
) -> WallEstimate {
    let area = perimeter * height;
    let (units, material_cost, auxiliary_cost, work_rate) = match material {
        WallMaterial::AeratedBlock => {
            let blocks = area * thickness / AERATED_BLOCK_THICKNESS;
            let glue = area * AERATED_GLUE_KG_PER_M2;
            (
                blocks,
                blocks * AERATED_BLOCK_PRICE,
                glue * GLUE_PER_KG,
                prices.aerated_walls_m2,
            )
        }
        WallMaterial::Brick => {
            let ratio = thickness / BRICK_WALL_THICKNESS;
            let bricks = area * BRICKS_PER_M2 * ratio;
            let mortar = area * MORTAR_M3_PER_M2 * ratio;
            (
                bricks,
                bricks * prices.brick_piece,
                mortar * MORTAR_PER_M3,
                prices.brick_walls_m2,
            )
        }
        WallMaterial::Timber => {
            let beams = area / (BEAM_SECTION * BEAM_SECTION) / BEAM_LENGTH;
            (
                beams,
                beams * BEAM_PRICE,
                area * INSULATION_PER_M2,
                prices.timber_walls_m2,
            )
        }
    };

    WallEstimate {
        material,
        area,
        units,
        material_cost,
        auxiliary_cost,
        work_cost: area * work_rate,
    }
}

/// `perimeter height thickness material`
pub fn compute(params: &[String], prices: &PriceBook) -> CalculationResult {
    run(Params::new(params), prices).into()
}

fn run(params: Params<'_>, prices: &PriceBook) -> Result<CalculationReport, CalcError> {
    params.require(4, FORMAT)?;
    let perimeter = params.number(0, "периметр")?;
    let height = params.number(1, "высота")?;
    let thickness = params.number(2, "толщина")?;
    let material: WallMaterial = params.category(3)?;

    let est = estimate(perimeter, height, thickness, material, prices);
    let parameters = Fields::new()
        .with("Периметр", format!("{} м", perimeter))
        .with("Высота", format!("{} м", height))
        .with("Толщина", format!("{} м", thickness))
        .with("Площадь", format!("{:.1} м²", est.area));

    let report = match material {
        WallMaterial::AeratedBlock => {
            let rebar_m = perimeter / 0.5 * 4.0 * height;
            CalculationReport::new("Стены из газобетона", parameters)
                .with_materials(
                    Fields::new()
                        .with("Газоблок D500 600×300×200", format!("{:.0} шт", est.units))
                        .with(
                            "Клей для газобетона",
                            format!("{:.0} кг", est.area * AERATED_GLUE_KG_PER_M2),
                        )
                        .with("Арматура Ø8", format!("{:.0} м", rebar_m)),
                )
                .with_cost(
                    Fields::new()
                        .with("Газоблоки", format_money(est.material_cost))
                        .with("Клей", format_money(est.auxiliary_cost))
                        .with("Работа", format_money(est.work_cost))
                        .with("Итого", format_money(est.total_cost())),
                )
                .with_formula("Кол-во = S × (Т / 0.3), где S - площадь, Т - толщина")
        }
        WallMaterial::Brick => {
            let mortar = est.area * MORTAR_M3_PER_M2 * (thickness / BRICK_WALL_THICKNESS);
            CalculationReport::new("Кирпичные стены", parameters)
                .with_materials(
                    Fields::new()
                        .with("Кирпич М150", format!("{:.0} шт", est.units))
                        .with("Раствор М100", format!("{:.1} м³", mortar)),
                )
                .with_cost(
                    Fields::new()
                        .with("Кирпич", format_money(est.material_cost))
                        .with("Раствор", format_money(est.auxiliary_cost))
                        .with("Работа", format_money(est.work_cost))
                        .with("Итого", format_money(est.total_cost())),
                )
                .with_formula(
                    "Кол-во = S × 102 × (Т / 0.51), где 102 - кирпичей в м² при толщине 510 мм",
                )
        }
        WallMaterial::Timber => CalculationReport::new("Деревянные стены (брус)", parameters)
            .with_materials(
                Fields::new()
                    .with("Брус 150×150×6000", format!("{:.0} шт", est.units))
                    .with("Утеплитель 150 мм", format!("{:.0} м²", est.area))
                    .with("Ветрозащита", format!("{:.0} м²", est.area)),
            )
            .with_cost(
                Fields::new()
                    .with("Брус", format_money(est.material_cost))
                    .with("Утеплитель", format_money(est.auxiliary_cost))
                    .with("Работа", format_money(est.work_cost))
                    .with("Итого", format_money(est.total_cost())),
            )
            .with_formula("Кол-во = (П × В) / (0.15 × 0.15) / 6, где 0.15 - сечение бруса, 6 - длина бруса"),
    };

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_brick_two_brick_wall() {
        let est = estimate(40.0, 3.0, 0.51, WallMaterial::Brick, &PriceBook::default());
        assert_eq!(est.area, 120.0);
        assert!((est.units - 120.0 * 102.0).abs() < 1e-6);
        assert!((est.work_cost - 120.0 * 2500.0).abs() < 1e-6);
        assert!((est.auxiliary_cost - 120.0 * 0.25 * 3500.0).abs() < 1e-6);
    }

    #[test]
    fn test_aerated_block_count_scales_with_thickness() {
        let prices = PriceBook::default();
        let thin = estimate(40.0, 3.0, 0.3, WallMaterial::AeratedBlock, &prices);
        let thick = estimate(40.0, 3.0, 0.6, WallMaterial::AeratedBlock, &prices);
        assert!((thin.units - 120.0).abs() < 1e-9);
        assert!((thick.units - 240.0).abs() < 1e-9);
        assert!((thin.work_cost - 120.0 * 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_timber_beams() {
        let est = estimate(36.0, 3.0, 0.15, WallMaterial::Timber, &PriceBook::default());
        let beams = 108.0 / (0.15 * 0.15) / 6.0;
        assert!((est.units - beams).abs() < 1e-6);
        assert!((est.total_cost() - (beams * 6000.0 + 108.0 * 350.0 + 108.0 * 3000.0)).abs() < 1e-3);
    }

    #[test]
    fn test_compute_report_sections() {
        let result = compute(&args(&["40", "3", "0.4", "газобетон"]), &PriceBook::default());
        let report = result.report().unwrap();
        assert_eq!(report.type_label, "Стены из газобетона");
        assert_eq!(report.parameters.get("Площадь"), Some("120.0 м²"));
        assert!(report.cost.as_ref().unwrap().get("Итого").is_some());
    }

    #[test]
    fn test_unknown_material() {
        let result = compute(&args(&["40", "3", "0.4", "пенобетон"]), &PriceBook::default());
        let message = result.error_message().unwrap();
        assert!(message.starts_with("Неизвестный материал стен: пенобетон"));
        assert!(message.contains("газобетон, кирпич, дерево"));
    }
}
