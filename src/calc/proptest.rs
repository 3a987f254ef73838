//! Property-based tests for the formula library, parser and formatter.
//!
//! - Strip footing geometry follows its closed form for all inputs
//! - Concrete mix scales linearly with volume
//! - Every calculator rejects short parameter lists before parsing anything
//! - Parsing and formatting never panic and are deterministic

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::calc::electrical::select_cable;
    use crate::calc::foundation::{strip, CONCRETE_WASTE, STRIP_WIDTH};
    use crate::calc::params::Categorical;
    use crate::calc::tables::{ConcreteGrade, PriceBook};
    use crate::calc::{
        concrete, format, CalcError, CalculationReport, CalculationResult, CalculatorKind,
        CommandParser, Fields, FormulaLibrary,
    };

    fn dimension() -> impl Strategy<Value = f64> {
        0.0f64..1000.0f64
    }

    fn kind() -> impl Strategy<Value = CalculatorKind> {
        prop::sample::select(CalculatorKind::ALL.to_vec())
    }

    fn grade() -> impl Strategy<Value = ConcreteGrade> {
        prop::sample::select(ConcreteGrade::ALL.to_vec())
    }

    fn fields() -> impl Strategy<Value = Fields> {
        prop::collection::vec((".{0,12}", ".{0,12}"), 0..5)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    fn report() -> impl Strategy<Value = CalculationReport> {
        (
            ".{0,20}",
            fields(),
            prop::option::of(fields()),
            prop::option::of(fields()),
            prop::option::of(".{0,20}"),
            prop::option::of(prop::collection::vec(".{0,20}", 0..4)),
        )
            .prop_map(|(label, parameters, materials, cost, formula, notes)| {
                CalculationReport {
                    type_label: label,
                    parameters,
                    materials,
                    cost,
                    formula,
                    notes,
                    ..Default::default()
                }
            })
    }

    proptest! {
        /// Strip footing: volume = perimeter × 0.5 × depth, concrete = volume × 1.05.
        #[test]
        fn strip_footing_closed_form(
            length in dimension(),
            width in dimension(),
            depth in 0.0f64..5.0f64
        ) {
            let est = strip(length, width, depth, &PriceBook::default());
            let perimeter = (length + width) * 2.0;
            let volume = perimeter * STRIP_WIDTH * depth;
            prop_assert!((est.volume - volume).abs() <= 1e-9 * volume.max(1.0));
            prop_assert!((est.concrete_m3 - est.volume * CONCRETE_WASTE).abs() <= 1e-9 * volume.max(1.0));
            prop_assert!(est.total_cost() >= 0.0);
        }

        /// Mix quantities are the per-m³ table times the volume.
        #[test]
        fn concrete_mix_scales_linearly(volume in 0.1f64..500.0f64, grade in grade()) {
            let per_m3 = grade.mix();
            let est = concrete::estimate(volume, grade, None);
            prop_assert!((est.quantities.cement_kg - per_m3.cement_kg * volume).abs() < 1e-6);
            prop_assert!((est.quantities.water_l - per_m3.water_l * volume).abs() < 1e-6);
        }

        /// Fewer than the minimum parameter count is always `InsufficientParameters`.
        #[test]
        fn short_parameter_lists_are_insufficient(
            kind in kind(),
            tokens in prop::collection::vec("[a-zа-я0-9]{1,6}", 0..4)
        ) {
            let params: Vec<String> = tokens.into_iter().take(kind.min_params() - 1).collect();
            let result = FormulaLibrary::default().compute(kind, &params);
            prop_assert!(
                matches!(result.error(), Some(CalcError::InsufficientParameters { .. })),
                "{} with {:?} gave {:?}", kind, params, result
            );
        }

        /// Cable tiers never step down as current grows.
        #[test]
        fn cable_selection_is_monotone(a in 0.0f64..200.0f64, b in 0.0f64..200.0f64) {
            let tiers = ["3×1.5 мм²", "3×2.5 мм²", "3×4 мм²", "3×6 мм²", "3×10 мм²"];
            let rank = |current: f64| {
                tiers.iter().position(|t| *t == select_cable(current).0).unwrap_or(usize::MAX)
            };
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(low) <= rank(high));
        }

        /// The parser accepts any text without panicking.
        #[test]
        fn parser_never_panics(text in ".{0,80}") {
            let parsed = CommandParser::default().parse(&text);
            if text.trim().is_empty() {
                prop_assert_eq!(parsed.result.error(), Some(&CalcError::EmptyCommand));
            }
        }

        /// Formatting is deterministic and always yields text.
        #[test]
        fn format_is_deterministic(kind in kind(), report in report()) {
            let result = CalculationResult::Success(report);
            let first = format(kind, &result);
            prop_assert!(!first.is_empty());
            prop_assert_eq!(first, format(kind, &result));
        }
    }
}
