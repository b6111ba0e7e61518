//! Field constraints and the values they inspect.

use std::fmt;

/// A value extracted from a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    /// `None` when the field was absent from the input.
    Int(Option<i64>),
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Text(value.as_str())
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Int(Some(value))
    }
}

impl From<Option<i64>> for FieldValue<'_> {
    fn from(value: Option<i64>) -> Self {
        FieldValue::Int(value)
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{:?}", s),
            FieldValue::Int(Some(n)) => write!(f, "{}", n),
            FieldValue::Int(None) => write!(f, "<absent>"),
        }
    }
}

/// A declarative rule attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Text must be non-empty; integers must be present and non-zero.
    Required,
    /// Integer must be present; zero is accepted. Reported as `required`.
    Present,
    /// Integer lower bound, inclusive.
    Min(i64),
    /// Integer upper bound, inclusive.
    Max(i64),
    /// Text must equal one of the listed values.
    OneOf(&'static [&'static str]),
}

impl Constraint {
    /// Tag reported in violations.
    pub fn tag(&self) -> &'static str {
        match self {
            Constraint::Required | Constraint::Present => "required",
            Constraint::Min(_) => "min",
            Constraint::Max(_) => "max",
            Constraint::OneOf(_) => "oneof",
        }
    }

    /// Absent values only fail `Required` and `Present`; bounds and sets skip them.
    pub fn check(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Constraint::Required, FieldValue::Text(s)) => !s.is_empty(),
            (Constraint::Required, FieldValue::Int(n)) => n.is_some_and(|n| n != 0),
            (Constraint::Present, FieldValue::Text(_)) => true,
            (Constraint::Present, FieldValue::Int(n)) => n.is_some(),

            (Constraint::Min(min), FieldValue::Int(Some(n))) => n >= min,
            (Constraint::Max(max), FieldValue::Int(Some(n))) => n <= max,
            (Constraint::Min(min), FieldValue::Text(s)) => s.chars().count() as i64 >= *min,
            (Constraint::Max(max), FieldValue::Text(s)) => s.chars().count() as i64 <= *max,

            (Constraint::OneOf(allowed), FieldValue::Text(s)) => allowed.iter().any(|a| *a == *s),
            (Constraint::OneOf(allowed), FieldValue::Int(Some(n))) => {
                allowed.iter().any(|a| a.parse::<i64>().ok() == Some(*n))
            }

            (_, FieldValue::Int(None)) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENCIES: &[&str] = &["USD", "CAD", "EUR"];

    #[test]
    fn test_required() {
        assert!(Constraint::Required.check(&"bob".into()));
        assert!(!Constraint::Required.check(&"".into()));
        assert!(Constraint::Required.check(&FieldValue::Int(Some(-3))));
        assert!(!Constraint::Required.check(&FieldValue::Int(Some(0))));
        assert!(!Constraint::Required.check(&FieldValue::Int(None)));
    }

    #[test]
    fn test_present_accepts_zero() {
        assert!(Constraint::Present.check(&FieldValue::Int(Some(0))));
        assert!(!Constraint::Present.check(&FieldValue::Int(None)));
        assert_eq!(Constraint::Present.tag(), "required");
    }

    #[test]
    fn test_bounds() {
        assert!(Constraint::Min(1).check(&1i64.into()));
        assert!(!Constraint::Min(1).check(&0i64.into()));
        assert!(Constraint::Max(10).check(&10i64.into()));
        assert!(!Constraint::Max(10).check(&11i64.into()));
        assert!(Constraint::Min(1).check(&FieldValue::Int(None)));
    }

    #[test]
    fn test_text_bounds_count_characters() {
        assert!(Constraint::Max(3).check(&"€€€".into()));
        assert!(!Constraint::Min(4).check(&"abc".into()));
    }

    #[test]
    fn test_one_of() {
        let rule = Constraint::OneOf(CURRENCIES);
        assert!(rule.check(&"EUR".into()));
        assert!(!rule.check(&"eur".into()));
        assert!(!rule.check(&"GBP".into()));
        assert_eq!(rule.tag(), "oneof");
    }
}
