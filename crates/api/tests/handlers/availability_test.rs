use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    Json,
};
use clinic_api::{
    handlers::availability::{book_slot, create_slot, list_doctor_slots},
    middleware::auth::DOCTOR_ID_HEADER,
};
use clinic_core::{
    errors::ClinicError,
    models::availability::{AvailabilityQuery, AvailabilitySlot, DoctorId},
    slot::MidnightPolicy,
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{availability_request, date, slot_row, time, TestContext};

fn doctor_headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(DOCTOR_ID_HEADER, HeaderValue::from_str(value).unwrap());
    headers
}

fn booked_row(is_booked: bool) -> clinic_db::models::DbAvailabilitySlot {
    let slot = AvailabilitySlot {
        doctor: DoctorId(7),
        slot_date: date(2024, 5, 1),
        start_time: time(9, 0),
        end_time: time(9, 30),
        is_booked,
        notes: None,
    };
    slot_row(&slot)
}

#[tokio::test]
async fn test_create_slot_persists_built_slot() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_create_slot()
        .withf(|slot: &AvailabilitySlot| {
            slot.doctor == DoctorId(7)
                && slot.start_time == time(9, 0)
                && slot.end_time == time(9, 30)
                && !slot.is_booked
        })
        .times(1)
        .returning(|slot| Ok(slot_row(slot)));
    let state = ctx.build_state();

    let (status, Json(response)) = create_slot(
        State(state),
        doctor_headers("7"),
        Ok(Json(availability_request(time(9, 0), 30))),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response.doctor_id, DoctorId(7));
    assert_eq!(response.slot_date, date(2024, 5, 1));
    assert_eq!(response.end_time, time(9, 30));
    assert_eq!(response.end_date, date(2024, 5, 1));
    assert!(!response.is_booked);
}

#[tokio::test]
async fn test_create_slot_without_doctor_is_invalid_argument() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_create_slot().never();
    let state = ctx.build_state();

    let err = create_slot(
        State(state),
        HeaderMap::new(),
        Ok(Json(availability_request(time(9, 0), 30))),
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, ClinicError::InvalidArgument(_)));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_slot_with_malformed_doctor_header() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_create_slot().never();
    let state = ctx.build_state();

    let err = create_slot(
        State(state),
        doctor_headers("dr-house"),
        Ok(Json(availability_request(time(9, 0), 30))),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_slot_rejects_midnight_crossing_by_default() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_create_slot().never();
    let state = ctx.build_state();

    let err = create_slot(
        State(state),
        doctor_headers("7"),
        Ok(Json(availability_request(time(23, 30), 60))),
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, ClinicError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_create_slot_rolls_over_when_configured() {
    let mut ctx = TestContext::new();
    ctx.policy = MidnightPolicy::RollOver;
    ctx.slot_repo
        .expect_create_slot()
        .times(1)
        .returning(|slot| Ok(slot_row(slot)));
    let state = ctx.build_state();

    let (_, Json(response)) = create_slot(
        State(state),
        doctor_headers("7"),
        Ok(Json(availability_request(time(23, 30), 60))),
    )
    .await
    .unwrap();

    assert_eq!(response.end_time, time(0, 30));
    assert_eq!(response.end_date, date(2024, 5, 2));
}

#[tokio::test]
async fn test_create_slot_surfaces_database_errors() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_create_slot()
        .returning(|_| Err(eyre::eyre!("connection reset")));
    let state = ctx.build_state();

    let err = create_slot(
        State(state),
        doctor_headers("7"),
        Ok(Json(availability_request(time(9, 0), 30))),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_list_doctor_slots_passes_filter() {
    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_get_slots_by_doctor()
        .with(predicate::eq(DoctorId(7)), predicate::eq(Some(date(2024, 5, 1))))
        .times(1)
        .returning(|_, _| Ok(vec![booked_row(false), booked_row(true)]));
    let state = ctx.build_state();

    let Json(slots) = list_doctor_slots(
        State(state),
        Path(7),
        Query(AvailabilityQuery {
            date: Some(date(2024, 5, 1)),
        }),
    )
    .await
    .unwrap();

    assert_eq!(slots.len(), 2);
    assert!(!slots[0].is_booked);
    assert!(slots[1].is_booked);
}

#[tokio::test]
async fn test_book_slot_marks_booked() {
    let row = booked_row(false);
    let id = row.id;
    let mut booked = row.clone();
    booked.is_booked = true;

    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_get_slot_by_id()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(row.clone())));
    ctx.slot_repo
        .expect_mark_slot_booked()
        .with(predicate::eq(id))
        .times(1)
        .returning(move |_| Ok(Some(booked.clone())));
    let state = ctx.build_state();

    let Json(response) = book_slot(State(state), Path(id)).await.unwrap();

    assert_eq!(response.id, id);
    assert!(response.is_booked);
}

#[tokio::test]
async fn test_book_slot_already_booked_is_conflict() {
    let row = booked_row(true);
    let id = row.id;

    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |_| Ok(Some(row.clone())));
    ctx.slot_repo.expect_mark_slot_booked().never();
    let state = ctx.build_state();

    let err = book_slot(State(state), Path(id)).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_book_slot_lost_race_is_conflict() {
    let row = booked_row(false);
    let id = row.id;

    let mut ctx = TestContext::new();
    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |_| Ok(Some(row.clone())));
    ctx.slot_repo
        .expect_mark_slot_booked()
        .returning(|_| Ok(None));
    let state = ctx.build_state();

    let err = book_slot(State(state), Path(id)).await.unwrap_err();

    assert!(matches!(err.0, ClinicError::Conflict(_)));
}

#[tokio::test]
async fn test_book_missing_slot_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.slot_repo.expect_get_slot_by_id().returning(|_| Ok(None));
    let state = ctx.build_state();

    let err = book_slot(State(state), Path(Uuid::new_v4())).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}
