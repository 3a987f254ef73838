//! Positional parameter parsing shared by every calculator.

use super::types::{CalcError, Category};

/// A closed set of categorical values a calculator accepts.
///
/// `aliases` are lowercase; `name` is what users see in results and errors.
pub trait Categorical: Sized + Copy + 'static {
    const CATEGORY: Category;
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn aliases(self) -> &'static [&'static str];

    /// Case-insensitive lookup by display name or alias.
    fn parse(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        Self::ALL.iter().copied().find(|value| {
            value.name().to_lowercase() == token || value.aliases().iter().any(|a| *a == token)
        })
    }

    /// Like [`Categorical::parse`], failing with the list of valid names.
    fn require(token: &str) -> Result<Self, CalcError> {
        Self::parse(token).ok_or_else(|| {
            CalcError::unknown_category(
                Self::CATEGORY,
                token,
                Self::ALL.iter().map(|value| value.name()),
            )
        })
    }

    /// Display names of every value.
    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|value| value.name()).collect()
    }
}

/// Borrowed view over a calculator's positional parameters.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    raw: &'a [String],
}

impl<'a> Params<'a> {
    pub fn new(raw: &'a [String]) -> Self {
        Self { raw }
    }

    /// Fail with `InsufficientParameters` unless at least `min` values are present.
    pub fn require(&self, min: usize, format: &str) -> Result<(), CalcError> {
        if self.raw.len() < min {
            return Err(CalcError::insufficient(format));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Raw token at `index`.
    pub fn text(&self, index: usize) -> Option<&'a str> {
        self.raw.get(index).map(String::as_str)
    }

    /// Non-negative finite number at `index`. Accepts `1,5` as well as `1.5`.
    pub fn number(&self, index: usize, name: &str) -> Result<f64, CalcError> {
        let token = self.text(index).unwrap_or_default();
        parse_number(token).ok_or_else(|| CalcError::invalid_number(name, token))
    }

    /// Number that will be used as a divisor: zero fails with `ZeroQuantity`.
    pub fn positive(&self, index: usize, name: &str) -> Result<f64, CalcError> {
        let value = self.number(index, name)?;
        if value == 0.0 {
            return Err(CalcError::zero_quantity(name));
        }
        Ok(value)
    }

    /// Non-negative whole number at `index`.
    pub fn count(&self, index: usize, name: &str) -> Result<u32, CalcError> {
        let token = self.text(index).unwrap_or_default();
        token
            .trim()
            .parse::<u32>()
            .map_err(|_| CalcError::invalid_number(name, token))
    }

    /// Categorical value at `index`.
    pub fn category<C: Categorical>(&self, index: usize) -> Result<C, CalcError> {
        C::require(self.text(index).unwrap_or_default())
    }
}

/// Parse a user-entered non-negative finite number.
pub fn parse_number(token: &str) -> Option<f64> {
    let value: f64 = token.trim().replace(',', ".").parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        // normalise -0.0
        Some(value.abs())
    } else {
        None
    }
}
