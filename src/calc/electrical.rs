//! Load current, cable gauge and breaker selection.

use super::params::Params;
use super::types::{CalcError, CalculationReport, CalculationResult, Fields};
use crate::display::format_money;

const FORMAT: &str = "мощность напряжение фазы";

const SINGLE_PHASE_POWER_FACTOR: f64 = 0.9;
const THREE_PHASE_POWER_FACTOR: f64 = 0.85;
const SQRT_3: f64 = 1.732;

const CABLE_PER_KW: f64 = 800.0;
const PANEL_PER_KW: f64 = 600.0;
const WORK_PER_KW: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phases {
    Single,
    Three,
}

/// Ascending current thresholds: `(max amps, cable, breaker)`.
const CABLE_TABLE: &[(f64, &str, &str)] = &[
    (10.0, "3×1.5 мм²", "10А"),
    (16.0, "3×1.5 мм²", "16А"),
    (25.0, "3×2.5 мм²", "20А"),
    (32.0, "3×4 мм²", "32А"),
    (40.0, "3×6 мм²", "32А"),
];
const CABLE_OVERFLOW: (&str, &str) = ("3×10 мм²", "40А");

/// Cable cross-section and breaker rating for a load current.
pub fn select_cable(current: f64) -> (&'static str, &'static str) {
    CABLE_TABLE
        .iter()
        .find(|(limit, _, _)| current <= *limit)
        .map(|(_, cable, breaker)| (*cable, *breaker))
        .unwrap_or(CABLE_OVERFLOW)
}

/// Load current in amperes.
pub fn current(power_kw: f64, voltage: f64, phases: Phases) -> f64 {
    let watts = power_kw * 1000.0;
    match phases {
        Phases::Single => watts / (voltage * SINGLE_PHASE_POWER_FACTOR),
        Phases::Three => watts / (SQRT_3 * voltage * THREE_PHASE_POWER_FACTOR),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElectricalEstimate {
    pub current: f64,
    pub cable: &'static str,
    pub breaker: &'static str,
    pub cable_cost: f64,
    pub panel_cost: f64,
    pub work_cost: f64,
}

impl ElectricalEstimate {
    pub fn total_cost(&self) -> f64 {
        self.cable_cost + self.panel_cost + self.work_cost
    }
}

pub fn estimate(power_kw: f64, voltage: f64, phases: Phases) -> ElectricalEstimate {
    let current = current(power_kw, voltage, phases);
    let (cable, breaker) = select_cable(current);
    ElectricalEstimate {
        current,
        cable,
        breaker,
        cable_cost: power_kw * CABLE_PER_KW,
        panel_cost: power_kw * PANEL_PER_KW,
        work_cost: power_kw * WORK_PER_KW,
    }
}

/// `power_kw voltage phases`
pub fn compute(params: &[String]) -> CalculationResult {
    run(Params::new(params)).into()
}

fn run(params: Params<'_>) -> Result<CalculationReport, CalcError> {
    params.require(3, FORMAT)?;
    let power = params.number(0, "мощность")?;
    let voltage = params.positive(1, "напряжение")?;
    let phase_count = params.count(2, "фазы")?;
    let phases = match phase_count {
        1 => Phases::Single,
        3 => Phases::Three,
        _ => {
            return Err(CalcError::invalid_number(
                "фазы",
                params.text(2).unwrap_or_default(),
            ))
        }
    };

    let est = estimate(power, voltage, phases);
    Ok(CalculationReport::new(
        "Расчет электрики",
        Fields::new()
            .with("Мощность", format!("{} кВт", power))
            .with("Напряжение", format!("{} В", voltage))
            .with("Фаз", phase_count),
    )
    .with_results(
        Fields::new()
            .with("Расчетный ток", format!("{:.1} А", est.current))
            .with("Сечение кабеля", est.cable)
            .with("Автоматический выключатель", est.breaker)
            .with("Рекомендуемый счетчик", format!("{:.0} А", power * 1.5)),
    )
    .with_cost(
        Fields::new()
            .with("Кабели и провода", format_money(est.cable_cost))
            .with("Щиток и автоматы", format_money(est.panel_cost))
            .with("Работа", format_money(est.work_cost))
            .with("Итого", format_money(est.total_cost())),
    )
    .with_formula("I = P / (U × cosφ) для 1 фазы, I = P / (√3 × U × cosφ) для 3 фаз"))
}
