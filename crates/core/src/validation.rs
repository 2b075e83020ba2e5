//! Input and configuration validation
//!
//! A fluent [`Validator`] collects every problem instead of stopping at the
//! first one, so a rejected report can list all offending fields at once.
//!
//! # Example
//!
//! ```rust
//! use retrievix_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("title", "Black wallet")
//!     .max_chars("title", "Black wallet", 120)
//!     .date("date", "2024-03-01")
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Calendar date format accepted for item dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Machine-readable code such as `REQUIRED`
    pub code: String,
    /// Expected value (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl ValidationError {
    fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            code: code.to_string(),
            expected: None,
            actual: None,
        }
    }

    fn expected(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// One line per error, joined with `; `
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

}

/// Fluent validator builder
#[derive(Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that a field is not blank
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.errors.push(
                ValidationError::new(field, "REQUIRED", "Field is required")
                    .expected("non-empty value", "empty"),
            );
        }
        self
    }

    /// Validate maximum length in characters (not bytes)
    pub fn max_chars(mut self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            self.result.errors.push(
                ValidationError::new(
                    field,
                    "MAX_LENGTH",
                    format!("Must be at most {max} characters"),
                )
                .expected(format!("<= {max} chars"), format!("{len} chars")),
            );
        }
        self
    }

    /// Validate against a regex pattern
    pub fn pattern(mut self, field: &str, value: &str, pattern: &Regex, description: &str) -> Self {
        if !pattern.is_match(value) {
            self.result.errors.push(
                ValidationError::new(field, "PATTERN", format!("Must match {description}"))
                    .expected(description, value),
            );
        }
        self
    }

    /// Validate that a value is in a list of allowed values
    pub fn one_of(mut self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if !allowed.contains(&value) {
            self.result.errors.push(
                ValidationError::new(
                    field,
                    "ONE_OF",
                    format!("Must be one of: {}", allowed.join(", ")),
                )
                .expected(allowed.join(", "), value),
            );
        }
        self
    }

    /// Validate that a value starts with one of the allowed prefixes
    pub fn prefixed_by(mut self, field: &str, value: &str, prefixes: &[&str]) -> Self {
        if !prefixes.iter().any(|p| value.starts_with(p)) {
            let shown: String = value.chars().take(32).collect();
            self.result.errors.push(
                ValidationError::new(
                    field,
                    "PREFIX",
                    format!("Must start with one of: {}", prefixes.join(", ")),
                )
                .expected(prefixes.join(", "), shown),
            );
        }
        self
    }

    /// Validate a numeric range (inclusive)
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result.errors.push(
                ValidationError::new(field, "RANGE", format!("Must be between {min} and {max}"))
                    .expected(format!("{min} - {max}"), value.to_string()),
            );
        }
        self
    }

    /// Validate a `YYYY-MM-DD` calendar date
    pub fn date(mut self, field: &str, value: &str) -> Self {
        if NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
            self.result.errors.push(
                ValidationError::new(field, "DATE", "Must be a calendar date (YYYY-MM-DD)")
                    .expected("YYYY-MM-DD", value),
            );
        }
        self
    }

    /// Record an error when `ok` is false
    pub fn custom(mut self, field: &str, ok: bool, message: &str) -> Self {
        if !ok {
            self.result
                .errors
                .push(ValidationError::new(field, "CUSTOM", message));
        }
        self
    }

    /// Add a warning (non-blocking)
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result
                .warnings
                .push(ValidationError::new(field, "WARNING", message));
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}
