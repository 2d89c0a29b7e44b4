//! Per-field validation rules

use fancy_regex::Regex;
use thiserror::Error;

use super::schema::FormField;

/// Message used when a required field is empty
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Outcome of evaluating one value against one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// A failing field, as shown inline next to its control
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field_id}: {message}")]
pub struct FieldValidationError {
    pub field_id: String,
    pub message: String,
}

#[derive(Debug, Clone)]
struct PatternRule {
    regex: Regex,
    message: String,
}

/// Rules of one field, with the pattern compiled once
#[derive(Debug, Clone)]
pub struct FieldValidator {
    required: bool,
    pattern: Option<PatternRule>,
}

impl FieldValidator {
    /// Build the rule set for a field.
    ///
    /// Patterns use the JavaScript flavor (lookaround and backreferences are
    /// supported). A pattern on a kind that does not accept one is ignored. A
    /// pattern that does not compile leaves the field with its required rule
    /// only.
    pub fn new(field: &FormField) -> Self {
        let pattern = field
            .validation
            .as_ref()
            .filter(|_| field.kind.accepts_pattern())
            .and_then(|rule| match Regex::new(&rule.pattern) {
                Ok(regex) => Some(PatternRule {
                    regex,
                    message: rule.message.clone(),
                }),
                Err(err) => {
                    tracing::warn!(
                        field_id = %field.id,
                        pattern = %rule.pattern,
                        "ignoring validation pattern that does not compile: {err}"
                    );
                    None
                }
            });

        Self {
            required: field.required,
            pattern,
        }
    }

    /// Evaluate a candidate value; the first failing rule wins.
    ///
    /// An empty value is only checked by the required rule, so a cleared
    /// optional field is valid whatever its pattern.
    pub fn evaluate(&self, value: &str) -> ValidationResult {
        if value.is_empty() {
            return if self.required {
                ValidationResult::fail(REQUIRED_MESSAGE)
            } else {
                ValidationResult::pass()
            };
        }

        if let Some(rule) = &self.pattern {
            match rule.regex.is_match(value) {
                Ok(true) => {}
                Ok(false) => return ValidationResult::fail(rule.message.clone()),
                Err(err) => {
                    // Backtrack limit hit: treated like a pattern that never compiled
                    tracing::warn!(
                        pattern = %rule.regex.as_str(),
                        "pattern evaluation failed: {err}"
                    );
                }
            }
        }

        ValidationResult::pass()
    }

    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }
}
