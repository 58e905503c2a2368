use crate::utils::error::{CalcError, Result};
use std::fmt::Display;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Builds the field-scoped error every check in this crate reports.
pub fn invalid_value(field: &str, value: impl Display, reason: impl Into<String>) -> CalcError {
    CalcError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    match path {
        "" => Err(invalid_value(field, path, "Path cannot be empty")),
        p if p.contains('\0') => Err(invalid_value(field, path.escape_default(), "Path contains a NUL byte")),
        _ => Ok(()),
    }
}

/// A money or rate figure: finite and not below `min`.
pub fn validate_amount(field: &str, value: f64, min: f64) -> Result<()> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(invalid_value(field, value, format!("Expected a finite number >= {}", min)))
    }
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(invalid_value(field, value, "Value cannot be blank"))
    } else {
        Ok(())
    }
}

/// Inclusive bounds; NaN is outside every range.
pub fn validate_range<T: PartialOrd + Display + Copy>(field: &str, value: T, min: T, max: T) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(invalid_value(field, value, format!("Expected a value in [{}, {}]", min, max)))
    }
}
