//! # Availability Handlers
//!
//! Doctors publish bookable slots by sending a start time and a duration; the
//! end time is computed by [`SlotBuilder`](clinic_core::slot::SlotBuilder)
//! under the deployment's midnight policy. Booking flips a slot's
//! `is_booked` flag exactly once.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use clinic_core::{
    errors::ClinicError,
    models::availability::{
        AvailabilityQuery, AvailabilityRequest, AvailabilitySlotResponse, DoctorId,
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    handlers::body_rejection,
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// Publishes a new availability slot for the calling doctor.
///
/// # Endpoint
///
/// ```text
/// POST /api/availability
/// X-Doctor-Id: 7
/// {"slot_date": "2024-05-01", "start_time": "09:00:00", "duration_minutes": 30}
/// ```
///
/// # Errors
///
/// * `ClinicError::InvalidArgument` - missing doctor identity, bad duration,
///   or a midnight crossing the policy rejects
/// * `ClinicError::Authentication` - malformed `X-Doctor-Id` header
/// * `ClinicError::Validation` - missing or malformed body
#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AvailabilitySlotResponse>), AppError> {
    let doctor = auth::doctor_identity(&headers)?;
    let Json(request) = payload.map_err(body_rejection)?;

    let slot = state.slot_builder.build(&request, doctor)?;

    let row = state
        .slots
        .create_slot(&slot)
        .await
        .map_err(ClinicError::Database)?;

    info!(
        "Doctor {} published slot {} on {} ({}-{})",
        slot.doctor, row.id, row.slot_date, row.start_time, row.end_time
    );

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Lists a doctor's slots ordered by date and start time, optionally for a
/// single day (`?date=2024-05-01`).
#[axum::debug_handler]
pub async fn list_doctor_slots(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<AvailabilitySlotResponse>>, AppError> {
    let rows = state
        .slots
        .get_slots_by_doctor(DoctorId(doctor_id), query.date)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Marks a slot as booked.
///
/// # Errors
///
/// * `ClinicError::NotFound` - no slot with this id
/// * `ClinicError::Conflict` - the slot is already booked
#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AvailabilitySlotResponse>, AppError> {
    let existing = state
        .slots
        .get_slot_by_id(id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::NotFound(format!("Availability slot with ID {} not found", id)))?;

    if existing.is_booked {
        return Err(AppError(ClinicError::Conflict(format!(
            "Availability slot {} is already booked",
            id
        ))));
    }

    // A concurrent booking can win between the read and the update.
    let booked = state
        .slots
        .mark_slot_booked(id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| ClinicError::Conflict(format!("Availability slot {} is already booked", id)))?;

    info!("Availability slot {} booked", id);

    Ok(Json(booked.into()))
}
