//! Strip and slab foundation estimates.

use super::params::{Categorical, Params};
use super::tables::{PriceBook, INSULATION_PER_M2, REBAR_PER_KG};
use super::types::{CalcError, CalculationReport, CalculationResult, Category, Fields};
use crate::display::format_money;

/// Strip footing width, m.
pub const STRIP_WIDTH: f64 = 0.5;
/// Slab thickness, m.
pub const SLAB_THICKNESS: f64 = 0.3;
/// Concrete waste factor.
pub const CONCRETE_WASTE: f64 = 1.05;

const FORMAT: &str = "длина ширина глубина тип";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoundationType {
    Strip,
    Slab,
}

impl Categorical for FoundationType {
    const CATEGORY: Category = Category::FoundationType;
    const ALL: &'static [Self] = &[FoundationType::Strip, FoundationType::Slab];

    fn name(self) -> &'static str {
        match self {
            FoundationType::Strip => "ленточный",
            FoundationType::Slab => "плитный",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            FoundationType::Strip => &["strip", "лента"],
            FoundationType::Slab => &["slab", "плита", "ушп"],
        }
    }
}

/// Quantities and costs for one foundation.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundationEstimate {
    pub foundation_type: FoundationType,
    /// Strip: outer perimeter. Slab: plan area.
    pub footprint: f64,
    pub volume: f64,
    pub concrete_m3: f64,
    pub rebar_kg: f64,
    /// Strip only: formwork area, m²
    pub formwork_m2: f64,
    /// Slab only: insulation area, m²
    pub insulation_m2: f64,
    pub concrete_cost: f64,
    pub rebar_cost: f64,
    pub insulation_cost: f64,
    pub work_cost: f64,
}

impl FoundationEstimate {
    pub fn total_cost(&self) -> f64 {
        self.concrete_cost + self.rebar_cost + self.insulation_cost + self.work_cost
    }
}

/// Strip footing: volume = perimeter × 0.5 × depth.
pub fn strip(length: f64, width: f64, depth: f64, prices: &PriceBook) -> FoundationEstimate {
    let perimeter = (length + width) * 2.0;
    let volume = perimeter * STRIP_WIDTH * depth;
    let concrete_m3 = volume * CONCRETE_WASTE;
    let rebar_kg = volume * 100.0;

    FoundationEstimate {
        foundation_type: FoundationType::Strip,
        footprint: perimeter,
        volume,
        concrete_m3,
        rebar_kg,
        formwork_m2: perimeter * depth * 2.0,
        insulation_m2: 0.0,
        concrete_cost: concrete_m3 * prices.concrete_m3,
        rebar_cost: rebar_kg * REBAR_PER_KG,
        insulation_cost: 0.0,
        work_cost: volume * prices.strip_foundation_m3,
    }
}

/// Insulated slab: volume = length × width × 0.3.
pub fn slab(length: f64, width: f64, prices: &PriceBook) -> FoundationEstimate {
    let area = length * width;
    let volume = area * SLAB_THICKNESS;
    let concrete_m3 = volume * CONCRETE_WASTE;
    let rebar_kg = volume * 120.0;

    FoundationEstimate {
        foundation_type: FoundationType::Slab,
        footprint: area,
        volume,
        concrete_m3,
        rebar_kg,
        formwork_m2: 0.0,
        insulation_m2: area,
        concrete_cost: concrete_m3 * prices.concrete_m3,
        rebar_cost: rebar_kg * REBAR_PER_KG,
        insulation_cost: area * INSULATION_PER_M2,
        work_cost: volume * prices.slab_foundation_m3,
    }
}

/// `length width depth type`
pub fn compute(params: &[String], prices: &PriceBook) -> CalculationResult {
    run(Params::new(params), prices).into()
}

fn run(params: Params<'_>, prices: &PriceBook) -> Result<CalculationReport, CalcError> {
    params.require(4, FORMAT)?;
    let length = params.number(0, "длина")?;
    let width = params.number(1, "ширина")?;
    let depth = params.number(2, "глубина")?;
    let foundation_type: FoundationType = params.category(3)?;

    let report = match foundation_type {
        FoundationType::Strip => {
            let est = strip(length, width, depth, prices);
            CalculationReport::new(
                "Ленточный фундамент",
                Fields::new()
                    .with("Длина", format!("{} м", length))
                    .with("Ширина", format!("{} м", width))
                    .with("Глубина", format!("{} м", depth))
                    .with("Периметр", format!("{} м", est.footprint)),
            )
            .with_materials(
                Fields::new()
                    .with("Бетон М300", format!("{:.1} м³", est.concrete_m3))
                    .with("Арматура Ø12", format!("{:.0} кг", est.rebar_kg))
                    .with("Опалубка", format!("{:.1} м²", est.formwork_m2)),
            )
            .with_cost(
                Fields::new()
                    .with("Бетон", format_money(est.concrete_cost))
                    .with("Арматура", format_money(est.rebar_cost))
                    .with("Работа", format_money(est.work_cost))
                    .with("Итого", format_money(est.total_cost())),
            )
            .with_formula("V = П × Ш × Г, где П - периметр, Ш - ширина ленты (0.5 м), Г - глубина")
        }
        FoundationType::Slab => {
            let est = slab(length, width, prices);
            CalculationReport::new(
                "Плитный фундамент (УШП)",
                Fields::new()
                    .with("Длина", format!("{} м", length))
                    .with("Ширина", format!("{} м", width))
                    .with("Толщина", format!("{} м", SLAB_THICKNESS))
                    .with("Площадь", format!("{:.1} м²", est.footprint)),
            )
            .with_materials(
                Fields::new()
                    .with("Бетон М300", format!("{:.1} м³", est.concrete_m3))
                    .with("Арматура Ø12-16", format!("{:.0} кг", est.rebar_kg))
                    .with("Утеплитель 100 мм", format!("{:.1} м²", est.insulation_m2)),
            )
            .with_cost(
                Fields::new()
                    .with("Бетон", format_money(est.concrete_cost))
                    .with("Арматура", format_money(est.rebar_cost))
                    .with("Утеплитель", format_money(est.insulation_cost))
                    .with("Работа", format_money(est.work_cost))
                    .with("Итого", format_money(est.total_cost())),
            )
            .with_formula("V = Д × Ш × Т, где Т - толщина плиты")
        }
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
    fn test_strip_volume_and_concrete() {
        let est = strip(10.0, 8.0, 1.5, &PriceBook::default());
        assert_eq!(est.footprint, 36.0);
        assert!((est.volume - 36.0 * 0.5 * 1.5).abs() < 1e-9);
        assert!((est.concrete_m3 - est.volume * 1.05).abs() < 1e-9);
        assert!((est.rebar_kg - 2700.0).abs() < 1e-9);
        assert!((est.formwork_m2 - 108.0).abs() < 1e-9);
    }

    #[test]
    fn test_strip_cost_terms() {
        let est = strip(10.0, 8.0, 1.5, &PriceBook::default());
        // 27 m³: 28.35 × 4500 + 2700 × 45 + 27 × 3500
        let expected = 28.35 * 4500.0 + 2700.0 * 45.0 + 27.0 * 3500.0;
        assert!((est.total_cost() - expected).abs() < 1e-6);
        assert_eq!(est.insulation_cost, 0.0);
    }

    #[test]
    fn test_slab_adds_insulation_term() {
        let est = slab(10.0, 10.0, &PriceBook::default());
        assert!((est.volume - 30.0).abs() < 1e-9);
        assert!((est.rebar_kg - 3600.0).abs() < 1e-9);
        assert!((est.insulation_cost - 100.0 * 350.0).abs() < 1e-9);
        assert!((est.work_cost - 30.0 * 4500.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_book_override_applies() {
        let prices = PriceBook {
            concrete_m3: 5000.0,
            ..PriceBook::default()
        };
        let est = strip(10.0, 8.0, 1.5, &prices);
        assert!((est.concrete_cost - est.concrete_m3 * 5000.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_strip_report() {
        let result = compute(&args(&["10", "8", "1", "ленточный"]), &PriceBook::default());
        let report = result.report().expect("success");
        assert_eq!(report.type_label, "Ленточный фундамент");
        assert_eq!(report.parameters.get("Периметр"), Some("36 м"));
        let materials = report.materials.as_ref().unwrap();
        assert_eq!(materials.get("Бетон М300"), Some("18.9 м³"));
        assert_eq!(materials.get("Арматура Ø12"), Some("1800 кг"));
    }

    #[test]
    fn test_compute_accepts_english_type() {
        let result = compute(&args(&["10", "10", "0.3", "Slab"]), &PriceBook::default());
        assert_eq!(result.report().unwrap().type_label, "Плитный фундамент (УШП)");
    }

    #[test]
    fn test_compute_errors() {
        let prices = PriceBook::default();
        assert_eq!(
            compute(&args(&["10", "8", "1.5"]), &prices).error(),
            Some(&CalcError::insufficient(FORMAT))
        );
        assert_eq!(
            compute(&args(&["10", "восемь", "1.5", "ленточный"]), &prices).error(),
            Some(&CalcError::invalid_number("ширина", "восемь"))
        );
        match compute(&args(&["10", "8", "1.5", "свайный"]), &prices).error() {
            Some(CalcError::UnknownCategory { category, valid, .. }) => {
                assert_eq!(*category, Category::FoundationType);
                assert_eq!(valid, &vec!["ленточный".to_string(), "плитный".to_string()]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
