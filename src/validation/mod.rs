//! Declarative request validation.
//!
//! # Data Flow
//! ```text
//! decoded request payload
//!     → Validate::validate (payload lists its fields and constraints)
//!     → Rules evaluates each field in declaration order
//!     → Vec<FieldViolation> (empty when valid)
//!     → Validator folds violations into a ValidationFailure message
//! ```
//!
//! # Design Decisions
//! - Only the first failing constraint of a field is reported
//! - Every field is evaluated, so a payload may report several violations
//! - Pure functions: no side effects, no I/O

pub mod constraint;

use std::fmt;

pub use constraint::{Constraint, FieldValue};

/// A single failed constraint on a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Public field name, e.g. `Currency`.
    pub field: &'static str,
    /// Name of the failed constraint, e.g. `oneof`.
    pub tag: &'static str,
    /// Rendered value that failed, for logging.
    pub value: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field has failed. Validation is: {}", self.field, self.tag)
    }
}

/// Implemented by request payloads that declare field constraints.
pub trait Validate {
    fn validate(&self) -> Vec<FieldViolation>;
}

/// Collects violations while a payload walks its fields.
#[derive(Debug, Default)]
pub struct Rules {
    violations: Vec<FieldViolation>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `value` against `constraints`, stopping at the first failure.
    pub fn field<'a>(
        mut self,
        name: &'static str,
        value: impl Into<FieldValue<'a>>,
        constraints: &[Constraint],
    ) -> Self {
        let value = value.into();
        if let Some(failed) = constraints.iter().find(|c| !c.check(&value)) {
            self.violations.push(FieldViolation {
                field: name,
                tag: failed.tag(),
                value: value.to_string(),
            });
        }
        self
    }

    pub fn finish(self) -> Vec<FieldViolation> {
        self.violations
    }
}

/// All violations found on one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, " and that ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Evaluates payload constraints before any store call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate<T: Validate>(&self, payload: &T) -> Result<(), ValidationFailure> {
        let violations = payload.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { violations })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Payload {
        name: String,
        size: Option<i64>,
    }

    impl Validate for Payload {
        fn validate(&self) -> Vec<FieldViolation> {
            Rules::new()
                .field("Name", self.name.as_str(), &[Constraint::Required])
                .field(
                    "Size",
                    self.size,
                    &[Constraint::Required, Constraint::Min(5), Constraint::Max(10)],
                )
                .finish()
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        let payload = Payload { name: "x".into(), size: Some(5) };
        assert!(Validator::new().validate(&payload).is_ok());
    }

    #[test]
    fn test_first_failing_constraint_wins() {
        let payload = Payload { name: "x".into(), size: None };
        let failure = Validator::new().validate(&payload).unwrap_err();
        assert_eq!(failure.violations.len(), 1);
        assert_eq!(failure.violations[0].field, "Size");
        assert_eq!(failure.violations[0].tag, "required");
    }

    #[test]
    fn test_messages_are_joined() {
        let payload = Payload { name: String::new(), size: Some(11) };
        let failure = Validator::new().validate(&payload).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "Name field has failed. Validation is: required and that \
             Size field has failed. Validation is: max"
        );
    }
}
