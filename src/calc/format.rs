//! Text rendering of calculation results.

use std::fmt::Write as _;

use super::types::{CalculationReport, CalculationResult, CalculatorKind, Fields};

/// Placeholder for empty labels and values.
pub const UNKNOWN: &str = "неизвестно";

/// Render `result` as Markdown-flavoured chat text.
///
/// Failures render as the error line only. Successful reports render the
/// title followed by Parameters, Materials, Cost, Results, Recommendations,
/// Formula and Notes in that order, skipping absent or empty sections.
pub fn format(kind: CalculatorKind, result: &CalculationResult) -> String {
    match result {
        CalculationResult::Failure { error } => format!("❌ *Ошибка:* {}", error),
        CalculationResult::Success(report) => format_report(kind, report),
    }
}

fn format_report(kind: CalculatorKind, report: &CalculationReport) -> String {
    let label = if report.type_label.trim().is_empty() {
        kind.identifier()
    } else {
        report.type_label.as_str()
    };

    let mut out = format!("🧮 *Результат расчета ({})*\n\n", label);
    write_fields(&mut out, "Параметры", Some(&report.parameters));
    write_fields(&mut out, "Материалы", report.materials.as_ref());
    write_fields(&mut out, "Стоимость", report.cost.as_ref());
    write_fields(&mut out, "Результаты", report.results.as_ref());

    if let Some(recommendations) = non_empty(report.recommendations.as_deref()) {
        out.push_str("*Рекомендации:*\n");
        for (i, rec) in recommendations.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, or_unknown(rec));
        }
        out.push('\n');
    }

    if let Some(formula) = report.formula.as_deref().filter(|f| !f.trim().is_empty()) {
        let _ = writeln!(out, "*Формула:* {}", formula);
    }

    if let Some(notes) = non_empty(report.notes.as_deref()) {
        out.push_str("\n*Примечания:*\n");
        for note in notes {
            let _ = writeln!(out, "• {}", or_unknown(note));
        }
    }

    out
}

fn write_fields(out: &mut String, title: &str, fields: Option<&Fields>) {
    let Some(fields) = fields.filter(|f| !f.is_empty()) else {
        return;
    };
    let _ = writeln!(out, "*{}:*", title);
    for (label, value) in fields.iter() {
        let _ = writeln!(out, "• {}: {}", or_unknown(label), or_unknown(value));
    }
    out.push('\n');
}

fn non_empty(items: Option<&[String]>) -> Option<&[String]> {
    items.filter(|items| !items.is_empty())
}

fn or_unknown(text: &str) -> &str {
    if text.trim().is_empty() {
        UNKNOWN
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::CalcError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_failure_renders_message_only() {
        let result = CalculationResult::from(CalcError::insufficient("объем марка [добавки]"));
        assert_eq!(
            format(CalculatorKind::Concrete, &result),
            "❌ *Ошибка:* Недостаточно параметров. Формат: объем марка [добавки]"
        );
    }

    #[test]
    fn test_section_order() {
        let report = CalculationReport::new("Тест", Fields::new().with("A", "1"))
            .with_notes(["примечание"])
            .with_formula("x = y")
            .with_recommendations(["первое", "второе"])
            .with_results(Fields::new().with("R", "2"))
            .with_cost(Fields::new().with("C", "3"))
            .with_materials(Fields::new().with("M", "4"));
        let text = format(CalculatorKind::Walls, &CalculationResult::Success(report));

        let expected = "🧮 *Результат расчета (Тест)*\n\n\
            *Параметры:*\n• A: 1\n\n\
            *Материалы:*\n• M: 4\n\n\
            *Стоимость:*\n• C: 3\n\n\
            *Результаты:*\n• R: 2\n\n\
            *Рекомендации:*\n1. первое\n2. второе\n\n\
            *Формула:* x = y\n\
            \n*Примечания:*\n• примечание\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_absent_and_empty_sections_skipped() {
        let report = CalculationReport::new("Тест", Fields::new().with("A", "1"))
            .with_materials(Fields::new())
            .with_notes(Vec::<String>::new());
        let text = format(CalculatorKind::Roof, &CalculationResult::Success(report));
        assert_eq!(text, "🧮 *Результат расчета (Тест)*\n\n*Параметры:*\n• A: 1\n\n");
    }

    #[test]
    fn test_blank_values_render_unknown() {
        let report = CalculationReport::new("", Fields::new().with("", "").with("Б", " "));
        let text = format(CalculatorKind::Roof, &CalculationResult::Success(report));
        assert!(text.starts_with("🧮 *Результат расчета (крыша)*"));
        assert!(text.contains("• неизвестно: неизвестно\n"));
        assert!(text.contains("• Б: неизвестно\n"));
    }

    #[test]
    fn test_deterministic() {
        let result = crate::calc::FormulaLibrary::default()
            .compute(CalculatorKind::HeatLoss, &["150", "2", "москва", "хорошее"].map(String::from));
        assert_eq!(
            format(CalculatorKind::HeatLoss, &result),
            format(CalculatorKind::HeatLoss, &result)
        );
    }
}
