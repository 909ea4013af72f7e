use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use clinic_api::handlers::medication::{create_routine, list_routines};
use clinic_core::{errors::ClinicError, models::medication::CreateMedicationRoutineRequest};
use clinic_db::models::DbMedicationRoutine;
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{date, patient_row, TestContext};

fn routine_request(times_per_day: u32) -> CreateMedicationRoutineRequest {
    CreateMedicationRoutineRequest {
        medication_name: "Lisinopril".to_string(),
        dosage: "10mg".to_string(),
        times_per_day,
        start_date: date(2024, 5, 1),
        end_date: Some(date(2024, 8, 1)),
        instructions: Some("Morning, before breakfast".to_string()),
    }
}

fn routine_row(patient_id: Uuid, request: &CreateMedicationRoutineRequest) -> DbMedicationRoutine {
    DbMedicationRoutine {
        id: Uuid::new_v4(),
        patient_id,
        medication_name: request.medication_name.clone(),
        dosage: request.dosage.clone(),
        times_per_day: request.times_per_day as i32,
        start_date: request.start_date,
        end_date: request.end_date,
        instructions: request.instructions.clone(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_create_routine_for_existing_patient() {
    let patient_id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.patient_repo
        .expect_get_patient_by_id()
        .with(predicate::eq(patient_id))
        .returning(|id| Ok(Some(patient_row(id))));
    ctx.medication_repo
        .expect_create_routine()
        .times(1)
        .returning(|patient_id, request| Ok(routine_row(patient_id, request)));
    let state = ctx.build_state();

    let (status, Json(routine)) = create_routine(
        State(state),
        Path(patient_id),
        Ok(Json(routine_request(1))),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(routine.patient_id, patient_id);
    assert_eq!(routine.medication_name, "Lisinopril");
    assert_eq!(routine.times_per_day, 1);
}

#[tokio::test]
async fn test_create_routine_invalid_frequency() {
    let mut ctx = TestContext::new();
    ctx.patient_repo.expect_get_patient_by_id().never();
    ctx.medication_repo.expect_create_routine().never();
    let state = ctx.build_state();

    let err = create_routine(
        State(state),
        Path(Uuid::new_v4()),
        Ok(Json(routine_request(0))),
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, ClinicError::Validation(_)));
}

#[tokio::test]
async fn test_create_routine_unknown_patient() {
    let mut ctx = TestContext::new();
    ctx.patient_repo.expect_get_patient_by_id().returning(|_| Ok(None));
    ctx.medication_repo.expect_create_routine().never();
    let state = ctx.build_state();

    let err = create_routine(
        State(state),
        Path(Uuid::new_v4()),
        Ok(Json(routine_request(2))),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_routines() {
    let patient_id = Uuid::new_v4();
    let mut ctx = TestContext::new();
    ctx.patient_repo
        .expect_get_patient_by_id()
        .returning(|id| Ok(Some(patient_row(id))));
    ctx.medication_repo
        .expect_get_routines_by_patient()
        .with(predicate::eq(patient_id))
        .returning(|patient_id| {
            Ok(vec![
                routine_row(patient_id, &routine_request(1)),
                routine_row(patient_id, &routine_request(3)),
            ])
        });
    let state = ctx.build_state();

    let Json(routines) = list_routines(State(state), Path(patient_id)).await.unwrap();

    assert_eq!(routines.len(), 2);
    assert_eq!(routines[1].times_per_day, 3);
}
