//! Construction calculators.
//!
//! Each calculator is a pure function from positional string parameters to a
//! [`CalculationResult`]. Parameter handling follows one contract everywhere:
//! the count is checked first, then numbers are parsed, then categorical
//! values are looked up in their closed tables. The area/volume calculator is
//! the one exception: its shape is looked up first because it fixes the
//! arity. Any failure yields a [`CalcError`] without partial results.
//!
//! ```
//! use stroyka_core::calc::{format, CalculatorKind, FormulaLibrary};
//!
//! let library = FormulaLibrary::default();
//! let params: Vec<String> = ["10", "М300"].iter().map(|s| s.to_string()).collect();
//! let result = library.compute(CalculatorKind::Concrete, &params);
//! assert!(format(CalculatorKind::Concrete, &result).contains("3800 кг"));
//! ```

pub mod concrete;
pub mod cost;
pub mod electrical;
pub mod format;
pub mod foundation;
pub mod geometry;
pub mod heat_loss;
pub mod help;
pub mod materials;
pub mod params;
pub mod parser;
mod proptest;
pub mod roof;
pub mod tables;
pub mod types;
pub mod walls;
pub mod water;

pub use format::format;
pub use help::{calculator_help, overview};
pub use params::Categorical;
pub use parser::{
    CommandParser, CommandResolver, KeywordHeuristicResolver, ParsedCommand, TableResolver,
};
pub use tables::{ConcreteGrade, PriceBook, Quality};
pub use types::{
    CalcError, CalculationReport, CalculationRequest, CalculationResult, CalculatorKind, Category,
    Fields,
};

use tracing::debug;

/// Dispatches calculator invocations against one price book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormulaLibrary {
    prices: PriceBook,
}

impl FormulaLibrary {
    pub fn new(prices: PriceBook) -> Self {
        Self { prices }
    }

    pub fn prices(&self) -> &PriceBook {
        &self.prices
    }

    /// Run calculator `kind` on positional `params`.
    pub fn compute(&self, kind: CalculatorKind, params: &[String]) -> CalculationResult {
        let result = match kind {
            CalculatorKind::Foundation => foundation::compute(params, &self.prices),
            CalculatorKind::Walls => walls::compute(params, &self.prices),
            CalculatorKind::Roof => roof::compute(params, &self.prices),
            CalculatorKind::HeatLoss => heat_loss::compute(params, &self.prices),
            CalculatorKind::Cost => cost::compute(params, &self.prices),
            CalculatorKind::AreaVolume => geometry::compute(params),
            CalculatorKind::WaterSupply => water::compute(params),
            CalculatorKind::Electrical => electrical::compute(params),
            CalculatorKind::Concrete => concrete::compute(params),
            CalculatorKind::Materials => materials::compute(params),
        };
        if let Some(error) = result.error() {
            debug!(kind = %kind, error = %error, "Calculation rejected");
        }
        result
    }

    pub fn run(&self, request: &CalculationRequest) -> CalculationResult {
        self.compute(request.kind, &request.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_every_kind_dispatches() {
        let library = FormulaLibrary::default();
        let samples: [(CalculatorKind, &[&str]); 10] = [
            (CalculatorKind::Foundation, &["10", "8", "1.5", "ленточный"]),
            (CalculatorKind::Walls, &["40", "3", "0.4", "газобетон"]),
            (CalculatorKind::Roof, &["10", "8", "30", "металлочерепица"]),
            (CalculatorKind::HeatLoss, &["150", "2", "москва", "хорошее"]),
            (CalculatorKind::Cost, &["стены", "100", "кирпич", "премиум"]),
            (CalculatorKind::AreaVolume, &["круг", "3"]),
            (CalculatorKind::WaterSupply, &["4", "ванна+душ", "200"]),
            (CalculatorKind::Electrical, &["15", "220", "1"]),
            (CalculatorKind::Concrete, &["10", "М300", "пластификатор"]),
            (CalculatorKind::Materials, &["кирпич", "100", "м²"]),
        ];
        for (kind, params) in samples {
            let result = library.compute(kind, &args(params));
            assert!(result.is_success(), "{}: {:?}", kind, result);
        }
    }

    #[test]
    fn test_price_book_flows_through() {
        let cheap = FormulaLibrary::new(PriceBook {
            concrete_m3: 1.0,
            ..PriceBook::default()
        });
        let request = CalculationRequest::new(
            CalculatorKind::Foundation,
            ["10", "10", "1", "ленточный"],
        );
        let cheap_cost = cheap.run(&request).report().unwrap().cost.clone().unwrap();
        let default_cost = FormulaLibrary::default()
            .run(&request)
            .report()
            .unwrap()
            .cost
            .clone()
            .unwrap();
        assert_ne!(cheap_cost.get("Бетон"), default_cost.get("Бетон"));
    }
}
