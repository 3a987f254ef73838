//! Water supply and sewage sizing for a household.

use super::params::Params;
use super::types::{CalcError, CalculationReport, CalculationResult, Fields};
use crate::display::format_money;

const FORMAT: &str = "люди сантехника расход";

/// Septic retention, days.
pub const SEPTIC_RETENTION_DAYS: f64 = 3.0;
pub const MIN_HEATER_LITRES: u32 = 50;
pub const HEATER_LITRES_PER_PERSON: u32 = 20;

const SEPTIC_PER_M3: f64 = 30_000.0;
const HEATER_PER_LITRE: f64 = 50.0;
const PIPING_PER_PERSON: f64 = 15_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WaterEstimate {
    /// Litres per day
    pub daily_total: f64,
    pub septic_m3: f64,
    pub heater_litres: u32,
    pub septic_cost: f64,
    pub heater_cost: f64,
    pub piping_cost: f64,
}

impl WaterEstimate {
    pub fn total_cost(&self) -> f64 {
        self.septic_cost + self.heater_cost + self.piping_cost
    }
}

pub fn estimate(occupants: u32, litres_per_person: f64) -> WaterEstimate {
    let daily_total = f64::from(occupants) * litres_per_person;
    let septic_m3 = daily_total * SEPTIC_RETENTION_DAYS / 1000.0;
    let heater_litres = MIN_HEATER_LITRES.max(occupants.saturating_mul(HEATER_LITRES_PER_PERSON));

    WaterEstimate {
        daily_total,
        septic_m3,
        heater_litres,
        septic_cost: septic_m3 * SEPTIC_PER_M3,
        heater_cost: f64::from(heater_litres) * HEATER_PER_LITRE,
        piping_cost: f64::from(occupants) * PIPING_PER_PERSON,
    }
}

/// Pump station recommendation by household size.
pub fn pump_for(occupants: u32) -> &'static str {
    if occupants <= 4 {
        "Насосная станция 60-80 Вт"
    } else {
        "Насосная станция 100-150 Вт"
    }
}

/// `occupants fixtures litres_per_person`
pub fn compute(params: &[String]) -> CalculationResult {
    run(Params::new(params)).into()
}

fn run(params: Params<'_>) -> Result<CalculationReport, CalcError> {
    params.require(3, FORMAT)?;
    let occupants = params.count(0, "люди")?;
    let fixtures = params.text(1).unwrap_or_default().to_lowercase();
    let daily_use = params.number(2, "расход")?;
    let est = estimate(occupants, daily_use);

    Ok(CalculationReport::new(
        "Расчет водоснабжения и канализации",
        Fields::new()
            .with("Количество человек", occupants)
            .with("Сантехника", &fixtures)
            .with("Норма расхода", format!("{} л/чел/сутки", daily_use)),
    )
    .with_results(
        Fields::new()
            .with("Суточное потребление", format!("{} л/сутки", est.daily_total))
            .with("Объем септика", format!("{:.1} м³", est.septic_m3))
            .with("Объем водонагревателя", format!("{} л", est.heater_litres))
            .with("Рекомендуемый насос", pump_for(occupants)),
    )
    .with_cost(
        Fields::new()
            .with("Септик", format_money(est.septic_cost))
            .with("Водонагреватель", format_money(est.heater_cost))
            .with("Разводка труб", format_money(est.piping_cost))
            .with("Итого", format_money(est.total_cost())),
    )
    .with_recommendations([
        format!(
            "Для {} человек рекомендуем септик объемом {} м³",
            occupants,
            est.septic_m3.ceil()
        ),
        format!(
            "Водонагреватель на {} л (электрический или газовый)",
            est.heater_litres
        ),
        "Установите фильтры грубой и тонкой очистки".to_string(),
    ]))
}
