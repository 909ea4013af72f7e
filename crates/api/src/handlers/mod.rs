/// Doctor availability slots
pub mod availability;
/// Patient medication routines
pub mod medication;
/// Notification templates and rendering
pub mod notification;
/// Patient registration
pub mod patient;

use axum::extract::rejection::JsonRejection;
use clinic_core::errors::ClinicError;

/// Turns a missing or unparseable JSON body into a validation error so it is
/// reported in the same shape as every other client error.
pub(crate) fn body_rejection(rejection: JsonRejection) -> ClinicError {
    ClinicError::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

/// Maps a failed insert to `Conflict` when it lost a race on a UNIQUE column.
pub(crate) fn insert_failure(err: eyre::Report, conflict: impl FnOnce() -> String) -> ClinicError {
    if clinic_db::is_unique_violation(&err) {
        ClinicError::Conflict(conflict())
    } else {
        ClinicError::Database(err)
    }
}
