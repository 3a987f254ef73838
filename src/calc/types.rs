//! Core types for the calculator engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The fixed catalogue of calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    Foundation,
    Walls,
    Roof,
    HeatLoss,
    Cost,
    AreaVolume,
    WaterSupply,
    Electrical,
    Concrete,
    Materials,
}

impl CalculatorKind {
    /// Every calculator, in catalogue order.
    pub const ALL: [CalculatorKind; 10] = [
        CalculatorKind::Foundation,
        CalculatorKind::Walls,
        CalculatorKind::Roof,
        CalculatorKind::HeatLoss,
        CalculatorKind::Cost,
        CalculatorKind::AreaVolume,
        CalculatorKind::WaterSupply,
        CalculatorKind::Electrical,
        CalculatorKind::Concrete,
        CalculatorKind::Materials,
    ];

    /// Canonical command word.
    pub fn identifier(&self) -> &'static str {
        match self {
            CalculatorKind::Foundation => "фундамент",
            CalculatorKind::Walls => "стены",
            CalculatorKind::Roof => "крыша",
            CalculatorKind::HeatLoss => "теплопотери",
            CalculatorKind::Cost => "стоимость",
            CalculatorKind::AreaVolume => "площадь",
            CalculatorKind::WaterSupply => "водоснабжение",
            CalculatorKind::Electrical => "электрика",
            CalculatorKind::Concrete => "бетон",
            CalculatorKind::Materials => "материалы",
        }
    }

    /// Stable ASCII id used in follow-up action ids (`calc_<slug>`).
    pub fn slug(&self) -> &'static str {
        match self {
            CalculatorKind::Foundation => "foundation",
            CalculatorKind::Walls => "walls",
            CalculatorKind::Roof => "roof",
            CalculatorKind::HeatLoss => "heat-loss",
            CalculatorKind::Cost => "cost",
            CalculatorKind::AreaVolume => "area-volume",
            CalculatorKind::WaterSupply => "water-supply",
            CalculatorKind::Electrical => "electrical",
            CalculatorKind::Concrete => "concrete",
            CalculatorKind::Materials => "generic-materials",
        }
    }

    /// Accepted command words, lowercase.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            CalculatorKind::Foundation => &["фундамент", "foundation"],
            CalculatorKind::Walls => &["стены", "стена", "walls", "wall"],
            CalculatorKind::Roof => &["крыша", "кровля", "roof"],
            CalculatorKind::HeatLoss => &["теплопотери", "тепло", "heat-loss", "heatloss", "heat"],
            CalculatorKind::Cost => &["стоимость", "цена", "cost", "price"],
            CalculatorKind::AreaVolume => &["площадь", "объем", "объём", "area-volume", "area", "volume"],
            CalculatorKind::WaterSupply => &["водоснабжение", "вода", "water-supply", "water"],
            CalculatorKind::Electrical => &["электрика", "electrical", "electric"],
            CalculatorKind::Concrete => &["бетон", "concrete"],
            CalculatorKind::Materials => &["материалы", "materials", "generic-materials"],
        }
    }

    /// Resolve a command word (case-insensitive) to a calculator.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == token || kind.aliases().iter().any(|a| *a == token))
    }

    /// Positional parameter format shown in usage errors.
    pub fn usage(&self) -> &'static str {
        match self {
            CalculatorKind::Foundation => "длина ширина глубина тип",
            CalculatorKind::Walls => "периметр высота толщина материал",
            CalculatorKind::Roof => "длина ширина уклон материал",
            CalculatorKind::HeatLoss => "площадь этажи регион утепление",
            CalculatorKind::Cost => "работа площадь материал качество",
            CalculatorKind::AreaVolume => "фигура параметры",
            CalculatorKind::WaterSupply => "люди сантехника расход",
            CalculatorKind::Electrical => "мощность напряжение фазы",
            CalculatorKind::Concrete => "объем марка [добавки]",
            CalculatorKind::Materials => "материал количество единица [толщина]",
        }
    }

    /// Minimum number of positional parameters.
    pub fn min_params(&self) -> usize {
        match self {
            CalculatorKind::AreaVolume | CalculatorKind::Concrete => 2,
            CalculatorKind::WaterSupply
            | CalculatorKind::Electrical
            | CalculatorKind::Materials => 3,
            _ => 4,
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Categorical parameter families, used to word `UnknownCategory` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FoundationType,
    WallMaterial,
    RoofMaterial,
    Region,
    Insulation,
    Quality,
    WorkKind,
    Shape,
    Grade,
    Material,
    Unit,
    ProjectType,
}

impl Category {
    fn unknown_phrase(&self) -> &'static str {
        match self {
            Category::FoundationType => "Неизвестный тип фундамента",
            Category::WallMaterial => "Неизвестный материал стен",
            Category::RoofMaterial => "Неизвестный материал кровли",
            Category::Region => "Неизвестный регион",
            Category::Insulation => "Неизвестное качество утепления",
            Category::Quality => "Неизвестное качество",
            Category::WorkKind => "Неизвестный тип работ",
            Category::Shape => "Неизвестная фигура",
            Category::Grade => "Неизвестная марка бетона",
            Category::Material => "Неизвестный материал",
            Category::Unit => "Неизвестная единица измерения",
            Category::ProjectType => "Неизвестный тип проекта",
        }
    }
}

/// Local, recoverable calculator failures.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "kebab-case")]
pub enum CalcError {
    #[error("Введите команду для калькулятора")]
    EmptyCommand,

    #[error("Неизвестный калькулятор: {token}. Используйте: {}", .valid.join(", "))]
    UnknownCalculator { token: String, valid: Vec<String> },

    #[error("Недостаточно параметров. Формат: {expected}")]
    InsufficientParameters { expected: String },

    #[error("Некорректное числовое значение '{value}' ({parameter})")]
    InvalidNumericValue { parameter: String, value: String },

    #[error("{}: {value}. Доступно: {}", .category.unknown_phrase(), .valid.join(", "))]
    UnknownCategory {
        category: Category,
        value: String,
        valid: Vec<String>,
    },

    /// `material` is already inflected ("бетона", "кирпича").
    #[error("Для {material} используйте {expected}")]
    WrongUnit { material: String, expected: String },

    #[error("Для утеплителя укажите толщину (мм)")]
    MissingThickness,

    #[error("Значение '{parameter}' должно быть больше нуля")]
    ZeroQuantity { parameter: String },
}

impl CalcError {
    /// Create an unknown-calculator error naming every valid kind.
    pub fn unknown_calculator(token: impl Into<String>) -> Self {
        Self::UnknownCalculator {
            token: token.into(),
            valid: CalculatorKind::ALL
                .iter()
                .map(|k| k.identifier().to_string())
                .collect(),
        }
    }

    /// Create an insufficient-parameters error.
    pub fn insufficient(expected: impl Into<String>) -> Self {
        Self::InsufficientParameters {
            expected: expected.into(),
        }
    }

    /// Create an invalid-numeric-value error.
    pub fn invalid_number(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumericValue {
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Create an unknown-category error.
    pub fn unknown_category<'a>(
        category: Category,
        value: impl Into<String>,
        valid: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::UnknownCategory {
            category,
            value: value.into(),
            valid: valid.into_iter().map(str::to_string).collect(),
        }
    }

    /// Create a wrong-unit error.
    pub fn wrong_unit(material: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::WrongUnit {
            material: material.into(),
            expected: expected.into(),
        }
    }

    /// Create a zero-quantity error.
    pub fn zero_quantity(parameter: impl Into<String>) -> Self {
        Self::ZeroQuantity {
            parameter: parameter.into(),
        }
    }
}

/// Insertion-ordered `(label, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(Vec<(String, String)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, builder style.
    pub fn with(mut self, label: impl Into<String>, value: impl ToString) -> Self {
        self.push(label, value);
        self
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl ToString) {
        self.0.push((label.into(), value.to_string()));
    }

    /// First value stored under `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (label, value) in iter {
            fields.push(label, value);
        }
        fields
    }
}

/// A successful calculation, ready for formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    /// Human-readable calculation title
    pub type_label: String,
    /// Echo of the interpreted inputs
    #[serde(default)]
    pub parameters: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Fields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Fields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Fields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

impl CalculationReport {
    pub fn new(type_label: impl Into<String>, parameters: Fields) -> Self {
        Self {
            type_label: type_label.into(),
            parameters,
            ..Default::default()
        }
    }

    pub fn with_materials(mut self, materials: Fields) -> Self {
        self.materials = Some(materials);
        self
    }

    pub fn with_cost(mut self, cost: Fields) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_results(mut self, results: Fields) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_notes<S: Into<String>>(mut self, notes: impl IntoIterator<Item = S>) -> Self {
        self.notes = Some(notes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_recommendations<S: Into<String>>(
        mut self,
        recommendations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.recommendations = Some(recommendations.into_iter().map(Into::into).collect());
        self
    }
}

/// Outcome of one calculator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationResult {
    Success(CalculationReport),
    Failure { error: CalcError },
}

impl CalculationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResult::Success(_))
    }

    pub fn report(&self) -> Option<&CalculationReport> {
        match self {
            CalculationResult::Success(report) => Some(report),
            CalculationResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&CalcError> {
        match self {
            CalculationResult::Success(_) => None,
            CalculationResult::Failure { error } => Some(error),
        }
    }

    /// User-facing error text, if this is a failure.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

impl From<std::result::Result<CalculationReport, CalcError>> for CalculationResult {
    fn from(result: std::result::Result<CalculationReport, CalcError>) -> Self {
        match result {
            Ok(report) => CalculationResult::Success(report),
            Err(error) => CalculationResult::Failure { error },
        }
    }
}

impl From<CalcError> for CalculationResult {
    fn from(error: CalcError) -> Self {
        CalculationResult::Failure { error }
    }
}

/// A calculator invocation extracted from user text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub kind: CalculatorKind,
    pub params: Vec<String>,
}

impl CalculationRequest {
    pub fn new<S: Into<String>>(kind: CalculatorKind, params: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}
