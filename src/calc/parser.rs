//! Free-text calculator command parsing.
//!
//! A [`CommandParser`] walks an ordered list of [`CommandResolver`]s; the
//! first one that recognises the text decides the calculator and its
//! positional parameters. Explicit dispatch (`фундамент 10 8 1.5 ленточный`)
//! and the keyword heuristic (`длина 10 ширина 8 ... фундамент`) are both
//! resolvers, so the heuristic can be dropped or replaced without touching
//! dispatch.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::foundation::FoundationType;
use super::params::Categorical;
use super::types::{CalcError, CalculationRequest, CalculationResult, CalculatorKind};
use super::walls::WallMaterial;
use super::FormulaLibrary;

/// Decides whether a piece of text is a calculator command.
pub trait CommandResolver: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// `tokens` is `text` split on whitespace; never empty.
    fn resolve(&self, text: &str, tokens: &[&str]) -> Option<CalculationRequest>;
}

/// First token names the calculator; the rest are passed through verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableResolver;

impl CommandResolver for TableResolver {
    fn name(&self) -> &'static str {
        "table"
    }

    fn resolve(&self, _text: &str, tokens: &[&str]) -> Option<CalculationRequest> {
        let (first, rest) = tokens.split_first()?;
        let kind = CalculatorKind::from_token(first)?;
        Some(CalculationRequest::new(kind, rest.iter().copied()))
    }
}

/// A number that does not continue a word, so grades like `М300` are skipped.
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w.,])(\d+(?:[.,]\d+)?)").expect("invalid regex")
});

static DIMENSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(длин|ширин|глубин|периметр|length|width|depth|perimeter)")
        .expect("invalid regex")
});

static FOUNDATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(фундамент|бетон|foundation|concrete)").expect("invalid regex")
});

static WALLS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(стен|кирпич|газобетон|wall|brick|aerated)").expect("invalid regex")
});

/// Dimension keyword plus a structure keyword selects foundation or walls.
///
/// Parameters are the numbers in the text, in order, followed by the first
/// token the chosen calculator accepts as its type/material.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordHeuristicResolver;

impl KeywordHeuristicResolver {
    fn params_for<C: Categorical>(text: &str, tokens: &[&str]) -> Vec<String> {
        let mut params: Vec<String> = NUMBER_PATTERN
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        let category = tokens
            .iter()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
            .find(|t| C::parse(t).is_some());
        if let Some(token) = category {
            params.push(token.to_string());
        }
        params
    }
}

impl CommandResolver for KeywordHeuristicResolver {
    fn name(&self) -> &'static str {
        "keyword-heuristic"
    }

    fn resolve(&self, text: &str, tokens: &[&str]) -> Option<CalculationRequest> {
        if !DIMENSION_PATTERN.is_match(text) {
            return None;
        }
        if FOUNDATION_PATTERN.is_match(text) {
            Some(CalculationRequest::new(
                CalculatorKind::Foundation,
                Self::params_for::<FoundationType>(text, tokens),
            ))
        } else if WALLS_PATTERN.is_match(text) {
            Some(CalculationRequest::new(
                CalculatorKind::Walls,
                Self::params_for::<WallMaterial>(text, tokens),
            ))
        } else {
            None
        }
    }
}

/// What the parser made of one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    /// `None` when no calculator was recognised
    pub kind: Option<CalculatorKind>,
    pub params: Vec<String>,
    pub result: CalculationResult,
}

impl ParsedCommand {
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}

/// Turns free text into a calculator invocation and runs it.
pub struct CommandParser {
    library: FormulaLibrary,
    resolvers: Vec<Box<dyn CommandResolver>>,
}

impl std::fmt::Debug for CommandParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.resolvers.iter().map(|r| r.name()).collect();
        f.debug_struct("CommandParser")
            .field("resolvers", &names)
            .finish()
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(FormulaLibrary::default())
    }
}

impl CommandParser {
    /// Table dispatch with the keyword heuristic as fallback.
    pub fn new(library: FormulaLibrary) -> Self {
        Self {
            library,
            resolvers: vec![Box::new(TableResolver), Box::new(KeywordHeuristicResolver)],
        }
    }

    /// Table dispatch only.
    pub fn strict(library: FormulaLibrary) -> Self {
        Self {
            library,
            resolvers: vec![Box::new(TableResolver)],
        }
    }

    /// Append a resolver, tried after the existing ones.
    pub fn with_resolver(mut self, resolver: impl CommandResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    pub fn library(&self) -> &FormulaLibrary {
        &self.library
    }

    /// Find the calculator and parameters without running anything.
    pub fn resolve(&self, text: &str) -> Result<CalculationRequest, CalcError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let first = tokens.first().ok_or(CalcError::EmptyCommand)?;

        for resolver in &self.resolvers {
            if let Some(request) = resolver.resolve(text, &tokens) {
                debug!(
                    resolver = resolver.name(),
                    kind = %request.kind,
                    params = request.params.len(),
                    "Resolved calculator command"
                );
                return Ok(request);
            }
        }

        Err(CalcError::unknown_calculator(first.to_lowercase()))
    }

    /// Resolve and run.
    pub fn parse(&self, text: &str) -> ParsedCommand {
        match self.resolve(text) {
            Ok(request) => {
                let result = self.library.compute(request.kind, &request.params);
                ParsedCommand {
                    kind: Some(request.kind),
                    params: request.params,
                    result,
                }
            }
            Err(error) => ParsedCommand {
                kind: None,
                params: text
                    .split_whitespace()
                    .skip(1)
                    .map(str::to_string)
                    .collect(),
                result: error.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_dispatch() {
        let parser = CommandParser::default();
        let parsed = parser.parse("Фундамент 10 8 1.5 ленточный");
        assert_eq!(parsed.kind, Some(CalculatorKind::Foundation));
        assert_eq!(parsed.params, vec!["10", "8", "1.5", "ленточный"]);
        assert!(parsed.is_success());
    }

    #[test]
    fn test_synonym_dispatch() {
        let parser = CommandParser::default();
        assert_eq!(
            parser.resolve("price фундамент 100 ленточный стандарт").unwrap().kind,
            CalculatorKind::Cost
        );
        assert_eq!(
            parser.resolve("вода 4 душ 200").unwrap().kind,
            CalculatorKind::WaterSupply
        );
    }

    #[test]
    fn test_empty_input() {
        let parser = CommandParser::default();
        let parsed = parser.parse("   ");
        assert_eq!(parsed.kind, None);
        assert_eq!(parsed.result.error(), Some(&CalcError::EmptyCommand));
    }

    #[test]
    fn test_unknown_calculator() {
        let parsed = CommandParser::default().parse("Лестница 3 2");
        assert_eq!(parsed.kind, None);
        assert_eq!(parsed.params, vec!["3", "2"]);
        assert_eq!(
            parsed.result.error(),
            Some(&CalcError::unknown_calculator("лестница"))
        );
    }

    #[test]
    fn test_heuristic_foundation() {
        let parsed = CommandParser::default()
            .parse("нужен ленточный фундамент длина 10 ширина 8 глубина 1,5");
        assert_eq!(parsed.kind, Some(CalculatorKind::Foundation));
        assert_eq!(parsed.params, vec!["10", "8", "1,5", "ленточный"]);
        assert!(parsed.is_success());
    }

    #[test]
    fn test_heuristic_skips_digits_inside_words() {
        let parsed = CommandParser::default().parse(
            "нужен ленточный фундамент, бетон М300, арматура Ø12, длина 10 ширина 8 глубина 1.5",
        );
        assert_eq!(parsed.kind, Some(CalculatorKind::Foundation));
        assert_eq!(parsed.params, vec!["10", "8", "1.5", "ленточный"]);
    }

    #[test]
    fn test_heuristic_walls() {
        let request = KeywordHeuristicResolver
            .resolve(
                "стены из кирпич, периметр 40 высота 3 толщина 0.51",
                &["стены", "из", "кирпич,", "периметр", "40", "высота", "3", "толщина", "0.51"],
            )
            .unwrap();
        assert_eq!(request.kind, CalculatorKind::Walls);
        assert_eq!(request.params, vec!["40", "3", "0.51", "кирпич"]);
    }

    #[test]
    fn test_heuristic_needs_both_keyword_sets() {
        let parser = CommandParser::default();
        assert!(parser.resolve("длина забора 30 метров").is_err());
        assert!(parser.resolve("какой фундамент лучше").is_err());
    }

    #[test]
    fn test_strict_parser_skips_heuristic() {
        let parser = CommandParser::strict(FormulaLibrary::default());
        let parsed = parser.parse("фундамент: длина 10");
        assert_eq!(parsed.kind, None);
        assert!(matches!(
            parsed.result.error(),
            Some(CalcError::UnknownCalculator { .. })
        ));
    }

    #[test]
    fn test_custom_resolver_runs_last() {
        struct Always;
        impl CommandResolver for Always {
            fn name(&self) -> &'static str {
                "always"
            }
            fn resolve(&self, _text: &str, tokens: &[&str]) -> Option<CalculationRequest> {
                Some(CalculationRequest::new(
                    CalculatorKind::AreaVolume,
                    tokens.iter().copied(),
                ))
            }
        }

        let parser = CommandParser::strict(FormulaLibrary::default()).with_resolver(Always);
        let parsed = parser.parse("круг 3");
        assert_eq!(parsed.kind, Some(CalculatorKind::AreaVolume));
        assert!(parsed.is_success());
    }
}
