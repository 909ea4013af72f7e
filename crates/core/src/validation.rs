//! Field validators invoked explicitly at the edge of the request layer.

use crate::{
    errors::{ClinicError, ClinicResult},
    models::patient::Gender,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationResult::Invalid(reason.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn into_result(self) -> ClinicResult<()> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(reason) => Err(ClinicError::Validation(reason)),
        }
    }
}

/// Returns the first failure, or `Valid` when every check passed.
pub fn validate_all<I>(results: I) -> ValidationResult
where
    I: IntoIterator<Item = ValidationResult>,
{
    results
        .into_iter()
        .find(|result| !result.is_valid())
        .unwrap_or(ValidationResult::Valid)
}

pub fn passwords_match(password: &str, confirm_password: &str) -> ValidationResult {
    if password == confirm_password {
        ValidationResult::Valid
    } else {
        ValidationResult::invalid("Passwords do not match")
    }
}

pub fn validate_gender(value: &str) -> ValidationResult {
    match value.parse::<Gender>() {
        Ok(_) => ValidationResult::Valid,
        Err(err) => match err {
            ClinicError::Validation(reason) => ValidationResult::Invalid(reason),
            other => ValidationResult::Invalid(other.to_string()),
        },
    }
}

pub fn validate_not_blank(field: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::invalid(format!("{} must not be empty", field))
    } else {
        ValidationResult::Valid
    }
}
