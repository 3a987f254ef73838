//! Closed-form areas and volumes of simple shapes.

use std::f64::consts::PI;

use super::params::{Categorical, Params};
use super::types::{CalcError, CalculationReport, CalculationResult, Category, Fields};
use crate::display::capitalize;

const FORMAT: &str = "фигура параметры";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rectangle,
    Triangle,
    Circle,
    RectangularPrism,
    Cylinder,
}

impl Shape {
    /// Dimensions the shape needs, in order.
    pub fn dimensions(self) -> &'static [&'static str] {
        match self {
            Shape::Rectangle => &["длина", "ширина"],
            Shape::Triangle => &["основание", "высота"],
            Shape::Circle => &["радиус"],
            Shape::RectangularPrism => &["длина", "ширина", "высота"],
            Shape::Cylinder => &["радиус", "высота"],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Shape::Rectangle => "Прямоугольник",
            Shape::Triangle => "Треугольник",
            Shape::Circle => "Круг",
            Shape::RectangularPrism => "Параллелепипед (прямоугольный)",
            Shape::Cylinder => "Цилиндр",
        }
    }
}

impl Categorical for Shape {
    const CATEGORY: Category = Category::Shape;
    const ALL: &'static [Self] = &[
        Shape::Rectangle,
        Shape::Triangle,
        Shape::Circle,
        Shape::RectangularPrism,
        Shape::Cylinder,
    ];

    fn name(self) -> &'static str {
        match self {
            Shape::Rectangle => "прямоугольник",
            Shape::Triangle => "треугольник",
            Shape::Circle => "круг",
            Shape::RectangularPrism => "параллелепипед",
            Shape::Cylinder => "цилиндр",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Shape::Rectangle => &["rectangle"],
            Shape::Triangle => &["triangle"],
            Shape::Circle => &["circle"],
            Shape::RectangularPrism => &["prism", "box", "rectangular-prism"],
            Shape::Cylinder => &["cylinder"],
        }
    }
}

/// Planar measures for 2-D shapes, volume and surface for solids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Planar { area: f64, perimeter: Option<f64> },
    Solid { volume: f64, surface: f64 },
}

/// `dims` must hold at least `shape.dimensions().len()` values.
pub fn measure(shape: Shape, dims: &[f64]) -> Measure {
    let d = |i: usize| dims.get(i).copied().unwrap_or_default();
    match shape {
        Shape::Rectangle => Measure::Planar {
            area: d(0) * d(1),
            perimeter: Some((d(0) + d(1)) * 2.0),
        },
        Shape::Triangle => Measure::Planar {
            area: d(0) * d(1) / 2.0,
            perimeter: None,
        },
        Shape::Circle => Measure::Planar {
            area: PI * d(0).powi(2),
            perimeter: Some(2.0 * PI * d(0)),
        },
        Shape::RectangularPrism => {
            let (a, b, c) = (d(0), d(1), d(2));
            Measure::Solid {
                volume: a * b * c,
                surface: 2.0 * (a * b + a * c + b * c),
            }
        }
        Shape::Cylinder => {
            let (r, h) = (d(0), d(1));
            Measure::Solid {
                volume: PI * r.powi(2) * h,
                surface: 2.0 * PI * r * (r + h),
            }
        }
    }
}

/// `shape dims...`
///
/// The shape is resolved before any number: it decides how many dimensions
/// follow.
pub fn compute(params: &[String]) -> CalculationResult {
    run(Params::new(params)).into()
}

fn run(params: Params<'_>) -> Result<CalculationReport, CalcError> {
    params.require(2, FORMAT)?;
    let shape: Shape = params.category(0)?;
    let names = shape.dimensions();
    let shape_format = format!("{} {}", shape.name(), names.join(" "));
    params.require(names.len() + 1, &shape_format)?;

    let mut dims = Vec::with_capacity(names.len());
    let mut parameters = Fields::new();
    for (i, name) in names.iter().enumerate() {
        let value = params.number(i + 1, name)?;
        parameters.push(capitalize(name), format!("{} м", value));
        dims.push(value);
    }

    let report = CalculationReport::new(shape.label(), parameters);
    let report = match (shape, measure(shape, &dims)) {
        (Shape::Rectangle, Measure::Planar { area, perimeter }) => report
            .with_results(
                Fields::new()
                    .with("Площадь", format!("{} м²", area))
                    .with("Периметр", format!("{} м", perimeter.unwrap_or_default())),
            )
            .with_formula("S = a × b, P = (a + b) × 2"),
        (Shape::Triangle, Measure::Planar { area, .. }) => report
            .with_results(Fields::new().with("Площадь", format!("{} м²", area)))
            .with_formula("S = (a × h) / 2"),
        (Shape::Circle, Measure::Planar { area, perimeter }) => report
            .with_results(
                Fields::new()
                    .with("Площадь", format!("{:.2} м²", area))
                    .with(
                        "Длина окружности",
                        format!("{:.2} м", perimeter.unwrap_or_default()),
                    ),
            )
            .with_formula("S = π × r², C = 2 × π × r"),
        (Shape::RectangularPrism, Measure::Solid { volume, surface }) => report
            .with_results(
                Fields::new()
                    .with("Объем", format!("{} м³", volume))
                    .with("Площадь поверхности", format!("{} м²", surface)),
            )
            .with_formula("V = a × b × c, S = 2 × (ab + ac + bc)"),
        (_, Measure::Solid { volume, surface }) => report
            .with_results(
                Fields::new()
                    .with("Объем", format!("{:.2} м³", volume))
                    .with("Площадь поверхности", format!("{:.2} м²", surface)),
            )
            .with_formula("V = π × r² × h, S = 2 × π × r × (r + h)"),
        (_, Measure::Planar { area, .. }) => {
            report.with_results(Fields::new().with("Площадь", format!("{} м²", area)))
        }
    };

    Ok(report)
}
