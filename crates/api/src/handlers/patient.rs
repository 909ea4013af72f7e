use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use clinic_core::{
    errors::ClinicError,
    models::patient::{Gender, Patient, PatientResponse, RegisterPatientRequest},
    validation::{passwords_match, validate_all, validate_gender, validate_not_blank},
};
use std::sync::Arc;
use tracing::info;

use crate::{
    handlers::{body_rejection, insert_failure},
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// Registers a patient account.
///
/// # Errors
///
/// * `ClinicError::Validation` - blank fields, mismatched passwords or an
///   unknown gender
/// * `ClinicError::Conflict` - the email is already registered
#[axum::debug_handler]
pub async fn register_patient(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<RegisterPatientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientResponse>), AppError> {
    let Json(request) = payload.map_err(body_rejection)?;

    validate_all([
        validate_not_blank("Full name", &request.full_name),
        validate_not_blank("Email", &request.email),
        validate_not_blank("Password", &request.password),
        passwords_match(&request.password, &request.confirm_password),
        validate_gender(&request.gender),
    ])
    .into_result()?;
    let gender: Gender = request.gender.parse()?;

    let duplicate = || format!("A patient with email {} is already registered", request.email);

    let existing = state
        .patients
        .get_patient_by_email(&request.email)
        .await
        .map_err(ClinicError::Database)?;
    if existing.is_some() {
        return Err(AppError(ClinicError::Conflict(duplicate())));
    }

    let password_hash = auth::hash_password(&request.password)?;

    let row = state
        .patients
        .create_patient(&request, gender, &password_hash)
        .await
        .map_err(|err| insert_failure(err, duplicate))?;
    let patient = Patient::try_from(row)?;

    info!("Registered patient {}", patient.id);

    Ok((StatusCode::CREATED, Json(patient.into())))
}
