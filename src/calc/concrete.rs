//! Concrete mix quantities by grade.

use super::params::{Categorical, Params};
use super::tables::{ConcreteGrade, MixDesign};
use super::types::{CalcError, CalculationReport, CalculationResult, Fields};
use crate::display::format_money;

const FORMAT: &str = "объем марка [добавки]";

const CEMENT_PER_KG: f64 = 12.5;
const SAND_PER_KG: f64 = 0.8;
const GRAVEL_PER_KG: f64 = 1.2;
const WORK_PER_M3: f64 = 1500.0;

/// Admixture surcharge, matched by substring of the free-text additive field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Additive {
    Plasticizer,
    AntiFrost,
}

impl Additive {
    /// First admixture whose marker occurs in `text`.
    pub fn detect(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if ["пластификатор", "plasticizer"].iter().any(|m| text.contains(m)) {
            Some(Additive::Plasticizer)
        } else if ["противоморозн", "anti-frost", "antifrost"]
            .iter()
            .any(|m| text.contains(m))
        {
            Some(Additive::AntiFrost)
        } else {
            None
        }
    }

    /// Surcharge per m³.
    pub fn price_per_m3(self) -> f64 {
        match self {
            Additive::Plasticizer => 500.0,
            Additive::AntiFrost => 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteEstimate {
    pub grade: ConcreteGrade,
    /// Mix scaled to the requested volume
    pub quantities: MixDesign,
    pub cement_cost: f64,
    pub sand_cost: f64,
    pub gravel_cost: f64,
    pub additive_cost: f64,
    pub work_cost: f64,
}

impl ConcreteEstimate {
    pub fn total_cost(&self) -> f64 {
        self.cement_cost + self.sand_cost + self.gravel_cost + self.additive_cost + self.work_cost
    }
}

pub fn estimate(volume: f64, grade: ConcreteGrade, additive: Option<Additive>) -> ConcreteEstimate {
    let per_m3 = grade.mix();
    let quantities = MixDesign {
        cement_kg: per_m3.cement_kg * volume,
        sand_kg: per_m3.sand_kg * volume,
        gravel_kg: per_m3.gravel_kg * volume,
        water_l: per_m3.water_l * volume,
    };

    ConcreteEstimate {
        grade,
        cement_cost: quantities.cement_kg * CEMENT_PER_KG,
        sand_cost: quantities.sand_kg * SAND_PER_KG,
        gravel_cost: quantities.gravel_kg * GRAVEL_PER_KG,
        additive_cost: additive.map_or(0.0, |a| a.price_per_m3() * volume),
        work_cost: volume * WORK_PER_M3,
        quantities,
    }
}

/// `volume grade [additive]`
pub fn compute(params: &[String]) -> CalculationResult {
    run(Params::new(params)).into()
}

fn run(params: Params<'_>) -> Result<CalculationReport, CalcError> {
    params.require(2, FORMAT)?;
    // price per m³ divides by the volume
    let volume = params.positive(0, "объем")?;
    let grade: ConcreteGrade = params.category(1)?;
    let additive_text = params.text(2);
    let est = estimate(volume, grade, additive_text.and_then(Additive::detect));
    let grade_name = grade.name();

    Ok(CalculationReport::new(
        format!("Расчет бетона {}", grade_name),
        Fields::new()
            .with("Объем", format!("{} м³", volume))
            .with("Марка", grade_name)
            .with("Добавки", additive_text.unwrap_or("нет")),
    )
    .with_materials(
        Fields::new()
            .with("Цемент М500", format!("{:.0} кг", est.quantities.cement_kg))
            .with("Песок", format!("{:.0} кг", est.quantities.sand_kg))
            .with("Щебень 20-40", format!("{:.0} кг", est.quantities.gravel_kg))
            .with("Вода", format!("{:.0} л", est.quantities.water_l)),
    )
    .with_cost(
        Fields::new()
            .with("Цемент", format_money(est.cement_cost))
            .with("Песок", format_money(est.sand_cost))
            .with("Щебень", format_money(est.gravel_cost))
            .with("Добавки", format_money(est.additive_cost))
            .with("Работа", format_money(est.work_cost))
            .with("Итого", format_money(est.total_cost()))
            .with("Цена за м³", format_money(est.total_cost() / volume)),
    )
    .with_notes([
        "Все пропорции указаны в кг на 1 м³ готового бетона",
        "Для точного расчета нужны лабораторные испытания",
        "Готовый товарный бетон стоит 4500-5500 руб/м³",
    ]))
}
