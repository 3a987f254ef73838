//! Aggregate work cost estimator.

use super::foundation::FoundationType;
use super::params::{Categorical, Params};
use super::roof::RoofMaterial;
use super::tables::{PriceBook, Quality};
use super::types::{CalcError, CalculationReport, CalculationResult, Category, Fields};
use super::walls::WallMaterial;
use crate::display::{format_money, format_number};

const FORMAT: &str = "работа площадь материал качество";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkKind {
    Foundation,
    Walls,
    Roof,
    Finishing,
}

impl Categorical for WorkKind {
    const CATEGORY: Category = Category::WorkKind;
    const ALL: &'static [Self] = &[
        WorkKind::Foundation,
        WorkKind::Walls,
        WorkKind::Roof,
        WorkKind::Finishing,
    ];

    fn name(self) -> &'static str {
        match self {
            WorkKind::Foundation => "фундамент",
            WorkKind::Walls => "стены",
            WorkKind::Roof => "крыша",
            WorkKind::Finishing => "отделка",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            WorkKind::Foundation => &["foundation"],
            WorkKind::Walls => &["walls"],
            WorkKind::Roof => &["кровля", "roof"],
            WorkKind::Finishing => &["finishing", "finish"],
        }
    }
}

/// Material choice, already validated against the work kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostMaterial {
    Foundation(FoundationType),
    Walls(WallMaterial),
    Roof(RoofMaterial),
    Finishing,
}

impl CostMaterial {
    /// Base price per unit, before the quality coefficient.
    pub fn base_price(self, quality: Option<Quality>, prices: &PriceBook) -> f64 {
        match self {
            CostMaterial::Foundation(FoundationType::Strip) => prices.strip_foundation_m3,
            CostMaterial::Foundation(FoundationType::Slab) => prices.slab_foundation_m3,
            CostMaterial::Walls(WallMaterial::Brick) => prices.brick_walls_m2,
            CostMaterial::Walls(WallMaterial::AeratedBlock) => prices.aerated_walls_m2,
            CostMaterial::Walls(WallMaterial::Timber) => prices.timber_walls_m2,
            // work + materials
            CostMaterial::Roof(RoofMaterial::MetalTile) => 1300.0,
            CostMaterial::Roof(RoofMaterial::Soft) => 1700.0,
            CostMaterial::Finishing => match quality {
                Some(Quality::Economy) => 2000.0,
                Some(Quality::Premium) => 6000.0,
                Some(Quality::Standard) | None => 3500.0,
            },
        }
    }

    fn resolve(work: WorkKind, token: &str) -> Result<Self, CalcError> {
        Ok(match work {
            WorkKind::Foundation => CostMaterial::Foundation(FoundationType::require(token)?),
            WorkKind::Walls => CostMaterial::Walls(WallMaterial::require(token)?),
            WorkKind::Roof => CostMaterial::Roof(RoofMaterial::require(token)?),
            WorkKind::Finishing => CostMaterial::Finishing,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    pub base_price: f64,
    /// Quality multiplier; finishing carries quality in its base price instead.
    pub coefficient: f64,
    /// `area × base_price × coefficient`
    pub cost: f64,
}

pub fn estimate(
    area: f64,
    material: CostMaterial,
    quality: Option<Quality>,
    prices: &PriceBook,
) -> CostEstimate {
    let base_price = material.base_price(quality, prices);
    let coefficient = match material {
        CostMaterial::Finishing => 1.0,
        _ => quality.map_or(1.0, Quality::coefficient),
    };
    CostEstimate {
        base_price,
        coefficient,
        cost: area * base_price * coefficient,
    }
}

/// `work area material quality`
pub fn compute(params: &[String], prices: &PriceBook) -> CalculationResult {
    run(Params::new(params), prices).into()
}

fn run(params: Params<'_>, prices: &PriceBook) -> Result<CalculationReport, CalcError> {
    params.require(4, FORMAT)?;
    let area = params.number(1, "площадь")?;
    let work: WorkKind = params.category(0)?;
    let material_token = params.text(2).unwrap_or_default().to_lowercase();
    let quality_token = params.text(3).unwrap_or_default().to_lowercase();
    let material = CostMaterial::resolve(work, &material_token)?;
    let quality = Quality::parse(&quality_token);

    let est = estimate(area, material, quality, prices);
    let total = est.cost;

    let report = match material {
        CostMaterial::Foundation(_) => CalculationReport::new(
            format!("Стоимость {} ({})", work.name(), material_token),
            Fields::new()
                .with("Площадь/объем", format!("{} м²/м³", area))
                .with("Материал", &material_token)
                .with("Качество", &quality_token)
                .with("Коэффициент", est.coefficient),
        )
        .with_cost(
            Fields::new()
                .with("Базовая цена", format!("{} руб/ед.", format_number(est.base_price)))
                .with("Общая стоимость", format_money(total))
                .with(
                    "Стоимость с материалами",
                    format!("{} (материалы + работа)", format_money(total * 1.5)),
                ),
        ),
        CostMaterial::Walls(_) => CalculationReport::new(
            format!("Стоимость {} ({})", work.name(), material_token),
            Fields::new()
                .with("Площадь стен", format!("{} м²", area))
                .with("Материал", &material_token)
                .with("Качество", &quality_token),
        )
        .with_cost(
            Fields::new()
                .with("Базовая цена", format!("{} руб/м²", format_number(est.base_price)))
                .with("Работа", format_money(total))
                .with("Материалы", format_money(total * 1.8))
                .with("Итого", format_money(total * 2.8)),
        ),
        CostMaterial::Roof(_) => CalculationReport::new(
            format!("Стоимость {} ({})", work.name(), material_token),
            Fields::new()
                .with("Площадь крыши", format!("{} м²", area))
                .with("Материал", &material_token)
                .with("Качество", &quality_token),
        )
        .with_cost(
            Fields::new()
                .with("Работа + материалы", format_money(total))
                .with("Стропильная система", format_money(area * 800.0))
                .with("Утепление", format_money(area * 500.0))
                .with("Итого", format_money(total + area * 1300.0)),
        ),
        CostMaterial::Finishing => CalculationReport::new(
            format!("Стоимость {} ({})", work.name(), quality_token),
            Fields::new()
                .with("Площадь", format!("{} м²", area))
                .with("Качество", &quality_token),
        )
        .with_cost(
            Fields::new()
                .with("Черновая отделка", format_money(area * 1500.0))
                .with("Чистовая отделка", format_money(total))
                .with("Сантехника", format_money(area * 1000.0))
                .with("Электрика", format_money(area * 800.0))
                .with("Итого", format_money(total + area * 3300.0)),
        ),
    };

    Ok(report)
}
