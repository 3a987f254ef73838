//! Generic material quantity calculator.

use super::params::{Categorical, Params};
use super::tables::{ConcreteGrade, MORTAR_PER_M3, INSULATION_PER_M2};
use super::types::{CalcError, CalculationReport, CalculationResult, Category, Fields};
use crate::display::format_money;

const FORMAT: &str = "материал количество единица [толщина]";

/// Mineral wool density, kg/m³.
const WOOL_DENSITY: f64 = 30.0;
const BRICK_PRICE: f64 = 30.0;
const VAPOUR_BARRIER_PER_M2: f64 = 40.0;
const PAINT_PER_LITRE: f64 = 300.0;
const PRIMER_PER_LITRE: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Concrete,
    Brick,
    Insulation,
    Paint,
}

impl Material {
    /// Unit the quantity must be given in.
    pub fn unit(self) -> Unit {
        match self {
            Material::Concrete => Unit::CubicMetre,
            _ => Unit::SquareMetre,
        }
    }

    /// Genitive form used in unit errors.
    fn genitive(self) -> &'static str {
        match self {
            Material::Concrete => "бетона",
            Material::Brick => "кирпича",
            Material::Insulation => "утеплителя",
            Material::Paint => "краски",
        }
    }
}

impl Categorical for Material {
    const CATEGORY: Category = Category::Material;
    const ALL: &'static [Self] = &[
        Material::Concrete,
        Material::Brick,
        Material::Insulation,
        Material::Paint,
    ];

    fn name(self) -> &'static str {
        match self {
            Material::Concrete => "бетон",
            Material::Brick => "кирпич",
            Material::Insulation => "утеплитель",
            Material::Paint => "краска",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Material::Concrete => &["concrete"],
            Material::Brick => &["brick"],
            Material::Insulation => &["insulation", "минвата"],
            Material::Paint => &["paint"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    SquareMetre,
    CubicMetre,
}

impl Categorical for Unit {
    const CATEGORY: Category = Category::Unit;
    const ALL: &'static [Self] = &[Unit::SquareMetre, Unit::CubicMetre];

    fn name(self) -> &'static str {
        match self {
            Unit::SquareMetre => "м²",
            Unit::CubicMetre => "м³",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Unit::SquareMetre => &["м2", "m2", "m²", "кв.м"],
            Unit::CubicMetre => &["м3", "m3", "m³", "куб.м"],
        }
    }
}

/// `material quantity unit [thickness]`
pub fn compute(params: &[String]) -> CalculationResult {
    run(Params::new(params)).into()
}

fn run(params: Params<'_>) -> Result<CalculationReport, CalcError> {
    params.require(3, FORMAT)?;
    let quantity = params.number(1, "количество")?;
    let material: Material = params.category(0)?;
    let expected = material.unit();
    if Unit::parse(params.text(2).unwrap_or_default()) != Some(expected) {
        return Err(CalcError::wrong_unit(material.genitive(), expected.name()));
    }

    let report = match material {
        Material::Concrete => {
            let mix = ConcreteGrade::M300.mix();
            CalculationReport::new(
                "Расчет материалов для бетона М300",
                Fields::new()
                    .with("Объем", format!("{} м³", quantity))
                    .with("Марка", ConcreteGrade::M300.name()),
            )
            .with_materials(
                Fields::new()
                    .with("Цемент М500", format!("{:.0} кг", quantity * mix.cement_kg))
                    .with("Песок", format!("{:.0} кг", quantity * mix.sand_kg))
                    .with("Щебень 20-40", format!("{:.0} кг", quantity * mix.gravel_kg))
                    .with("Вода", format!("{:.0} л", quantity * mix.water_l)),
            )
            .with_cost(
                Fields::new()
                    .with("Материалы", format_money(quantity * 2500.0))
                    .with("Работа", format_money(quantity * 1500.0))
                    .with("Итого", format_money(quantity * 4000.0)),
            )
        }
        Material::Brick => {
            // two-brick (510 mm) wall
            let bricks = quantity * 102.0;
            let mortar = quantity * 0.05;
            CalculationReport::new(
                "Расчет кирпича для стен",
                Fields::new()
                    .with("Площадь стен", format!("{} м²", quantity))
                    .with("Толщина", "510 мм (2 кирпича)"),
            )
            .with_materials(
                Fields::new()
                    .with("Кирпич М150", format!("{:.0} шт", bricks))
                    .with("Раствор М100", format!("{:.2} м³", mortar)),
            )
            .with_cost(
                Fields::new()
                    .with("Кирпич", format_money(bricks * BRICK_PRICE))
                    .with("Раствор", format_money(mortar * MORTAR_PER_M3))
                    .with(
                        "Итого",
                        format_money(bricks * BRICK_PRICE + mortar * MORTAR_PER_M3),
                    ),
            )
        }
        Material::Insulation => {
            if params.text(3).is_none() {
                return Err(CalcError::MissingThickness);
            }
            let thickness_mm = params.number(3, "толщина")?;
            let volume = quantity * thickness_mm / 1000.0;
            CalculationReport::new(
                "Расчет утеплителя",
                Fields::new()
                    .with("Площадь", format!("{} м²", quantity))
                    .with("Толщина", format!("{} мм", thickness_mm))
                    .with("Объем", format!("{:.2} м³", volume)),
            )
            .with_materials(
                Fields::new()
                    .with("Минеральная вата", format!("{:.0} кг", volume * WOOL_DENSITY))
                    .with("Пароизоляция", format!("{:.0} м²", quantity))
                    .with("Крепеж", format!("{:.0} шт дюбелей", quantity * 6.0)),
            )
            .with_cost(
                Fields::new()
                    .with("Утеплитель", format_money(quantity * INSULATION_PER_M2))
                    .with("Пароизоляция", format_money(quantity * VAPOUR_BARRIER_PER_M2))
                    .with("Работа", format_money(quantity * 250.0))
                    .with("Итого", format_money(quantity * 640.0)),
            )
        }
        Material::Paint => {
            // 1 l per 10 m², two coats
            let paint = quantity * 0.2;
            let primer = quantity * 0.1;
            CalculationReport::new(
                "Расчет краски для стен",
                Fields::new()
                    .with("Площадь", format!("{} м²", quantity))
                    .with("Слоев", 2),
            )
            .with_materials(
                Fields::new()
                    .with("Водоэмульсионная краска", format!("{:.1} л", paint))
                    .with("Грунтовка", format!("{:.1} л", primer))
                    .with("Валики, кисти", "1 набор"),
            )
            .with_cost(
                Fields::new()
                    .with("Краска", format_money(paint * PAINT_PER_LITRE))
                    .with("Грунтовка", format_money(primer * PRIMER_PER_LITRE))
                    .with(
                        "Итого",
                        format_money(paint * PAINT_PER_LITRE + primer * PRIMER_PER_LITRE),
                    ),
            )
        }
    };

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_concrete_uses_m300_mix() {
        let report = compute(&args(&["бетон", "30", "м³"])).report().cloned().unwrap();
        let materials = report.materials.unwrap();
        assert_eq!(materials.get("Цемент М500"), Some("11400 кг"));
        assert_eq!(materials.get("Вода"), Some("5700 л"));
        assert_eq!(report.cost.unwrap().get("Итого"), Some("120 000 руб"));
    }

    #[test]
    fn test_unit_spellings() {
        assert!(compute(&args(&["бетон", "1", "m3"])).is_success());
        assert!(compute(&args(&["бетон", "1", "м3"])).is_success());
        assert!(compute(&args(&["кирпич", "100", "м2"])).is_success());
    }

    #[test]
    fn test_wrong_unit() {
        let message = compute(&args(&["кирпич", "100", "м³"])).error_message().unwrap();
        assert_eq!(message, "Для кирпича используйте м²");
        let message = compute(&args(&["бетон", "3", "шт"])).error_message().unwrap();
        assert_eq!(message, "Для бетона используйте м³");
    }

    #[test]
    fn test_insulation_requires_thickness() {
        let result = compute(&args(&["утеплитель", "50", "м²"]));
        assert_eq!(result.error(), Some(&CalcError::MissingThickness));

        let report = compute(&args(&["утеплитель", "50", "м²", "100"]))
            .report()
            .cloned()
            .unwrap();
        assert_eq!(report.parameters.get("Объем"), Some("5.00 м³"));
        let materials = report.materials.unwrap();
        assert_eq!(materials.get("Минеральная вата"), Some("150 кг"));
        assert_eq!(report.cost.unwrap().get("Итого"), Some("32 000 руб"));
    }

    #[test]
    fn test_paint() {
        let report = compute(&args(&["краска", "100", "м²"])).report().cloned().unwrap();
        let materials = report.materials.unwrap();
        assert_eq!(materials.get("Водоэмульсионная краска"), Some("20.0 л"));
        assert_eq!(report.cost.unwrap().get("Итого"), Some("7 500 руб"));
    }

    #[test]
    fn test_unknown_material() {
        let message = compute(&args(&["гипс", "10", "м²"])).error_message().unwrap();
        assert_eq!(
            message,
            "Неизвестный материал: гипс. Доступно: бетон, кирпич, утеплитель, краска"
        );
    }

    #[test]
    fn test_bad_quantity_reported_before_unknown_material() {
        match compute(&args(&["стекло", "abc", "м²"])).error() {
            Some(CalcError::InvalidNumericValue { value, .. }) => assert_eq!(value, "abc"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
