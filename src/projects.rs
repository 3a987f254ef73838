//! Construction projects: stage templates, cost breakdown and schedule.
//!
//! Every project type carries a fixed, ordered stage template whose cost
//! shares add up to 100 percent. Estimates are pure functions of the
//! project's type, area and start date.

use std::fmt::Write as _;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calc::{CalcError, Categorical, Category};
use crate::display::format_money;
use crate::error::Result;

/// One step of a project template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectStage {
    pub name: &'static str,
    pub duration_days: u32,
    pub cost_percent: u32,
}

const fn stage(name: &'static str, duration_days: u32, cost_percent: u32) -> ProjectStage {
    ProjectStage {
        name,
        duration_days,
        cost_percent,
    }
}

const HOUSE_STAGES: &[ProjectStage] = &[
    stage("Проектирование", 30, 5),
    stage("Фундамент", 45, 20),
    stage("Стены и перекрытия", 60, 25),
    stage("Кровля", 30, 15),
    stage("Инженерные системы", 45, 20),
    stage("Отделка", 60, 15),
];

const COTTAGE_STAGES: &[ProjectStage] = &[
    stage("Проектирование", 20, 5),
    stage("Фундамент", 30, 25),
    stage("Стены", 40, 35),
    stage("Кровля", 20, 15),
    stage("Инженерка", 25, 15),
    stage("Отделка", 30, 5),
];

const BATHHOUSE_STAGES: &[ProjectStage] = &[
    stage("Фундамент", 20, 20),
    stage("Стены", 25, 30),
    stage("Кровля", 15, 15),
    stage("Печь и дымоход", 10, 20),
    stage("Отделка и полки", 20, 15),
];

const GARAGE_STAGES: &[ProjectStage] = &[
    stage("Фундамент", 15, 30),
    stage("Стены", 20, 40),
    stage("Кровля", 10, 15),
    stage("Ворота и электрика", 10, 15),
];

const RENOVATION_STAGES: &[ProjectStage] = &[
    stage("Демонтаж", 10, 5),
    stage("Черновая отделка", 20, 30),
    stage("Инженерные системы", 15, 25),
    stage("Чистовая отделка", 25, 40),
];

/// Budget shares by work category, applied to the base estimate.
pub const COST_CATEGORIES: [(&str, f64); 6] = [
    ("Фундамент", 0.20),
    ("Стены и перекрытия", 0.25),
    ("Кровля", 0.15),
    ("Инженерные системы", 0.20),
    ("Отделка", 0.15),
    ("Прочие расходы", 0.05),
];

/// The closed set of project types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    House,
    Cottage,
    Bathhouse,
    Garage,
    Renovation,
}

impl Categorical for ProjectType {
    const CATEGORY: Category = Category::ProjectType;
    const ALL: &'static [Self] = &[
        ProjectType::House,
        ProjectType::Cottage,
        ProjectType::Bathhouse,
        ProjectType::Garage,
        ProjectType::Renovation,
    ];

    fn name(self) -> &'static str {
        match self {
            ProjectType::House => "дом",
            ProjectType::Cottage => "дача",
            ProjectType::Bathhouse => "баня",
            ProjectType::Garage => "гараж",
            ProjectType::Renovation => "ремонт",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ProjectType::House => &["house"],
            ProjectType::Cottage => &["cottage", "dacha"],
            ProjectType::Bathhouse => &["bathhouse", "sauna"],
            ProjectType::Garage => &["garage"],
            ProjectType::Renovation => &["renovation", "repair"],
        }
    }
}

impl ProjectType {
    pub fn stages(self) -> &'static [ProjectStage] {
        match self {
            ProjectType::House => HOUSE_STAGES,
            ProjectType::Cottage => COTTAGE_STAGES,
            ProjectType::Bathhouse => BATHHOUSE_STAGES,
            ProjectType::Garage => GARAGE_STAGES,
            ProjectType::Renovation => RENOVATION_STAGES,
        }
    }

    /// Turnkey price, roubles per m².
    pub fn cost_per_m2(self) -> f64 {
        match self {
            ProjectType::House => 35_000.0,
            ProjectType::Cottage => 25_000.0,
            ProjectType::Bathhouse => 40_000.0,
            ProjectType::Garage => 20_000.0,
            ProjectType::Renovation => 15_000.0,
        }
    }

    /// Calendar days of work per m².
    pub fn days_per_m2(self) -> f64 {
        match self {
            ProjectType::House => 0.8,
            ProjectType::Cottage => 0.6,
            ProjectType::Bathhouse => 0.7,
            ProjectType::Garage => 0.4,
            ProjectType::Renovation => 0.3,
        }
    }
}

/// A planned construction project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub kind: ProjectType,
    /// m²
    pub area: f64,
    pub budget: Option<f64>,
    pub started: NaiveDate,
    #[serde(default)]
    progress: u8,
}

/// Base estimate split by work category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub cost_per_m2: f64,
    pub total: f64,
    pub categories: Vec<(&'static str, f64)>,
    /// Budget minus estimate; negative when over budget
    pub budget_difference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub stage: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: u32,
    pub cost_percent: u32,
}

/// Stages laid back to back from the project start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: u32,
}

/// Area-based duration estimate, independent of the stage template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstructionTime {
    pub days: u32,
    pub weeks: u32,
    pub months: u32,
    pub completion: NaiveDate,
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

impl Project {
    /// Create a project; `area` must be a positive finite number.
    pub fn new(
        name: impl Into<String>,
        kind: ProjectType,
        area: f64,
        started: NaiveDate,
    ) -> Result<Self> {
        if !area.is_finite() || area < 0.0 {
            return Err(CalcError::invalid_number("площадь", area.to_string()).into());
        }
        if area == 0.0 {
            return Err(CalcError::zero_quantity("площадь").into());
        }
        Ok(Self {
            name: name.into(),
            kind,
            area,
            budget: None,
            started,
            progress: 0,
        })
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Percent complete, 0 to 100.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Set progress, clamping into 0..=100; returns the stored value.
    pub fn set_progress(&mut self, percent: i64) -> u8 {
        self.progress = percent.clamp(0, 100) as u8;
        self.progress
    }

    pub fn cost_estimate(&self) -> CostBreakdown {
        let cost_per_m2 = self.kind.cost_per_m2();
        let total = self.area * cost_per_m2;
        CostBreakdown {
            cost_per_m2,
            total,
            categories: COST_CATEGORIES
                .iter()
                .map(|(name, share)| (*name, total * share))
                .collect(),
            budget_difference: self.budget.map(|budget| budget - total),
        }
    }

    pub fn timeline(&self) -> Timeline {
        let mut current = self.started;
        let mut entries = Vec::with_capacity(self.kind.stages().len());
        for stage in self.kind.stages() {
            let end = add_days(current, stage.duration_days);
            entries.push(TimelineEntry {
                stage: stage.name,
                start: current,
                end,
                duration_days: stage.duration_days,
                cost_percent: stage.cost_percent,
            });
            current = end;
        }
        Timeline {
            entries,
            start: self.started,
            end: current,
            total_days: self.kind.stages().iter().map(|s| s.duration_days).sum(),
        }
    }

    pub fn construction_time(&self) -> ConstructionTime {
        let days = self.area * self.kind.days_per_m2();
        let whole_days = days.ceil() as u32;
        ConstructionTime {
            days: whole_days,
            weeks: (days / 7.0).ceil() as u32,
            months: (days / 30.0).ceil() as u32,
            completion: add_days(self.started, whole_days),
        }
    }

    /// Plain-text project card with the estimate and the stage schedule.
    pub fn summary(&self) -> String {
        let cost = self.cost_estimate();
        let timeline = self.timeline();

        let mut out = format!(
            "🏗️ *{}*\nТип: {}\nПлощадь: {} м²\nПрогресс: {}%\n\n",
            self.name,
            self.kind.name(),
            self.area,
            self.progress
        );
        let _ = writeln!(out, "*Расчетная стоимость:* {}", format_money(cost.total));
        let _ = writeln!(out, "Цена за м²: {}", format_money(cost.cost_per_m2));
        if let (Some(budget), Some(diff)) = (self.budget, cost.budget_difference) {
            let _ = writeln!(out, "Бюджет: {}", format_money(budget));
            let verdict = if diff >= 0.0 { "Запас" } else { "Перерасход" };
            let _ = writeln!(out, "{}: {}", verdict, format_money(diff.abs()));
        }

        out.push_str("\n*Детализация:*\n");
        for (category, amount) in &cost.categories {
            let _ = writeln!(out, "• {}: {}", category, format_money(*amount));
        }

        out.push_str("\n*Сроки:*\n");
        for entry in &timeline.entries {
            let _ = writeln!(
                out,
                "• {}: {} - {} ({} дн.)",
                entry.stage,
                entry.start.format("%d.%m.%Y"),
                entry.end.format("%d.%m.%Y"),
                entry.duration_days
            );
        }
        out
    }
}
