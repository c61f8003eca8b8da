//! Client-side form validation.
//!
//! A failed check blocks submission with a field-level error and never
//! reaches the network — the forms in [`crate::console`] run these before
//! touching the transport.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// National id (cédula): three-six-one digit groups.
static RE_CEDULA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3}-\d{6}-\d$").unwrap());

/// Phone: three-three-four digit groups.
static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap());

/// One inline field error, shown next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn is_valid_cedula(value: &str) -> bool {
    RE_CEDULA.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    RE_PHONE.is_match(value)
}

/// Non-blank check for required text inputs.
pub fn require(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "This field is required"));
    }
}

/// Required cédula in `XXX-XXXXXX-X` form.
pub fn check_cedula(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_cedula(value) {
        errors.push(FieldError::new(
            field,
            "Must match the format 000-000000-0",
        ));
    }
}

/// Phone in `XXX-XXX-XXXX` form. Blank values are the caller's call —
/// pass only when the field is set or required.
pub fn check_phone(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if !is_valid_phone(value) {
        errors.push(FieldError::new(field, "Must match the format 000-000-0000"));
    }
}
