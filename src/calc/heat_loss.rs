//! Building heat loss and boiler sizing.
//!
//! Unrecognised regions and insulation levels fall back to the central
//! Russia defaults (ΔT 45 °C, k 1.2) instead of failing; the user still gets
//! a usable ballpark figure.

use super::params::{Categorical, Params};
use super::tables::PriceBook;
use super::types::{CalcError, CalculationReport, CalculationResult, Category, Fields};
use crate::display::{capitalize, format_money, format_number};

const FORMAT: &str = "площадь этажи регион утепление";

/// Floor area to envelope area shape factor.
pub const ENVELOPE_FACTOR: f64 = 3.5;
/// Boiler power margin over computed losses.
pub const BOILER_MARGIN: f64 = 1.2;
pub const DEFAULT_DELTA_T: f64 = 45.0;
pub const DEFAULT_LOSS_COEFFICIENT: f64 = 1.2;

const EXCELLENT_INSULATION_PER_M2: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Moscow,
    SaintPetersburg,
    Yekaterinburg,
    Novosibirsk,
    Sochi,
    Krasnodar,
}

impl Region {
    /// Design winter temperature difference, °C.
    pub fn delta_t(self) -> f64 {
        match self {
            Region::Moscow => 45.0,
            Region::SaintPetersburg => 43.0,
            Region::Yekaterinburg => 47.0,
            Region::Novosibirsk => 50.0,
            Region::Sochi => 30.0,
            Region::Krasnodar => 35.0,
        }
    }
}

impl Categorical for Region {
    const CATEGORY: Category = Category::Region;
    const ALL: &'static [Self] = &[
        Region::Moscow,
        Region::SaintPetersburg,
        Region::Yekaterinburg,
        Region::Novosibirsk,
        Region::Sochi,
        Region::Krasnodar,
    ];

    fn name(self) -> &'static str {
        match self {
            Region::Moscow => "москва",
            Region::SaintPetersburg => "спб",
            Region::Yekaterinburg => "екатеринбург",
            Region::Novosibirsk => "новосибирск",
            Region::Sochi => "сочи",
            Region::Krasnodar => "краснодар",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Region::Moscow => &["moscow"],
            Region::SaintPetersburg => &["петербург", "spb", "saint-petersburg"],
            Region::Yekaterinburg => &["yekaterinburg", "ekaterinburg"],
            Region::Novosibirsk => &["novosibirsk"],
            Region::Sochi => &["sochi"],
            Region::Krasnodar => &["krasnodar"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsulationLevel {
    None,
    Weak,
    Medium,
    Good,
    Excellent,
}

impl InsulationLevel {
    /// Heat loss coefficient k.
    pub fn loss_coefficient(self) -> f64 {
        match self {
            InsulationLevel::None => 2.0,
            InsulationLevel::Weak => 1.5,
            InsulationLevel::Medium => 1.2,
            InsulationLevel::Good => 0.9,
            InsulationLevel::Excellent => 0.7,
        }
    }
}

impl Categorical for InsulationLevel {
    const CATEGORY: Category = Category::Insulation;
    const ALL: &'static [Self] = &[
        InsulationLevel::None,
        InsulationLevel::Weak,
        InsulationLevel::Medium,
        InsulationLevel::Good,
        InsulationLevel::Excellent,
    ];

    fn name(self) -> &'static str {
        match self {
            InsulationLevel::None => "нет",
            InsulationLevel::Weak => "слабое",
            InsulationLevel::Medium => "среднее",
            InsulationLevel::Good => "хорошее",
            InsulationLevel::Excellent => "отличное",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            InsulationLevel::None => &["none", "no"],
            InsulationLevel::Weak => &["weak", "poor"],
            InsulationLevel::Medium => &["medium", "average"],
            InsulationLevel::Good => &["good"],
            InsulationLevel::Excellent => &["excellent"],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatLossEstimate {
    pub delta_t: f64,
    pub loss_coefficient: f64,
    pub envelope_area: f64,
    /// kW
    pub heat_loss: f64,
    /// kW, with margin
    pub boiler_power: f64,
    /// Zero when no upgrade is priced.
    pub insulation_cost: f64,
}

/// Heat loss for `area` m² of floor. `None` picks the default ΔT / k.
pub fn estimate(
    area: f64,
    region: Option<Region>,
    insulation: Option<InsulationLevel>,
    prices: &PriceBook,
) -> HeatLossEstimate {
    let delta_t = region.map_or(DEFAULT_DELTA_T, Region::delta_t);
    let loss_coefficient =
        insulation.map_or(DEFAULT_LOSS_COEFFICIENT, InsulationLevel::loss_coefficient);
    let envelope_area = area * ENVELOPE_FACTOR;
    let heat_loss = envelope_area * delta_t * loss_coefficient / 1000.0;

    let insulation_cost = match insulation {
        Some(InsulationLevel::Good) => area * prices.insulation_upgrade_m2,
        Some(InsulationLevel::Excellent) => area * EXCELLENT_INSULATION_PER_M2,
        _ => 0.0,
    };

    HeatLossEstimate {
        delta_t,
        loss_coefficient,
        envelope_area,
        heat_loss,
        boiler_power: heat_loss * BOILER_MARGIN,
        insulation_cost,
    }
}

/// `area floors region insulation`
pub fn compute(params: &[String], prices: &PriceBook) -> CalculationResult {
    run(Params::new(params), prices).into()
}

fn run(params: Params<'_>, prices: &PriceBook) -> Result<CalculationReport, CalcError> {
    params.require(4, FORMAT)?;
    let area = params.number(0, "площадь")?;
    let floors = params.count(1, "этажи")?;
    let region_token = params.text(2).unwrap_or_default().to_lowercase();
    let insulation_token = params.text(3).unwrap_or_default().to_lowercase();

    let est = estimate(
        area,
        Region::parse(&region_token),
        InsulationLevel::parse(&insulation_token),
        prices,
    );

    let insulation_cost = if est.insulation_cost > 0.0 {
        format_money(est.insulation_cost)
    } else {
        "Не требуется".to_string()
    };
    let monthly_heating = est.heat_loss * 0.1 * 720.0 * 30.0 / 1000.0;

    Ok(CalculationReport::new(
        "Расчет теплопотерь",
        Fields::new()
            .with("Площадь дома", format!("{} м²", area))
            .with("Этажи", floors)
            .with("Регион", capitalize(&region_token))
            .with("Качество утепления", &insulation_token)
            .with("ΔT (разница температур)", format!("{}°C", est.delta_t))
            .with("Коэффициент k", est.loss_coefficient),
    )
    .with_results(
        Fields::new()
            .with("Теплопотери дома", format!("{:.1} кВт", est.heat_loss))
            .with(
                "Рекомендуемая мощность котла",
                format!("{:.1} кВт", est.boiler_power),
            )
            .with("Стоимость утепления", insulation_cost),
    )
    .with_recommendations([
        format!(
            "Для дома {} м² в {} рекомендуется котел {} кВт",
            area,
            region_token,
            est.boiler_power.ceil()
        ),
        format!(
            "Ежемесячные затраты на отопление: ~{} руб/мес (газ)",
            format_number(monthly_heating)
        ),
        "Установите терморегуляторы для экономии 10-15%".to_string(),
    ])
    .with_formula(
        "Q = S × ΔT × k / 1000, где Q - теплопотери (кВт), S - площадь (м²), ΔT - разница температур, k - коэффициент",
    ))
}
