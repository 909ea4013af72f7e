use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use clinic_core::{
    errors::ClinicError,
    models::medication::{CreateMedicationRoutineRequest, MedicationRoutineResponse},
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{handlers::body_rejection, middleware::error_handling::AppError, ApiState};

async fn ensure_patient_exists(state: &ApiState, patient_id: Uuid) -> Result<(), AppError> {
    state
        .patients
        .get_patient_by_id(patient_id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Patient with ID {} not found", patient_id)))?;

    Ok(())
}

#[axum::debug_handler]
pub async fn create_routine(
    State(state): State<Arc<ApiState>>,
    Path(patient_id): Path<Uuid>,
    payload: Result<Json<CreateMedicationRoutineRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MedicationRoutineResponse>), AppError> {
    let Json(request) = payload.map_err(body_rejection)?;
    request.validate().into_result()?;

    ensure_patient_exists(&state, patient_id).await?;

    let row = state
        .medications
        .create_routine(patient_id, &request)
        .await
        .map_err(ClinicError::Database)?;

    info!(
        "Added medication routine {} ({}) for patient {}",
        row.id, row.medication_name, patient_id
    );

    Ok((StatusCode::CREATED, Json(row.into())))
}

#[axum::debug_handler]
pub async fn list_routines(
    State(state): State<Arc<ApiState>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<MedicationRoutineResponse>>, AppError> {
    ensure_patient_exists(&state, patient_id).await?;

    let rows = state
        .medications
        .get_routines_by_patient(patient_id)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
