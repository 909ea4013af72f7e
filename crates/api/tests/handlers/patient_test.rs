use axum::{extract::State, http::StatusCode, Json};
use clinic_api::handlers::patient::register_patient;
use clinic_core::{
    errors::ClinicError,
    models::patient::{Gender, RegisterPatientRequest},
};
use clinic_db::models::DbPatient;
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

use crate::test_utils::{patient_row, unique_violation, TestContext};

fn registration(password: &str, confirm: &str, gender: &str) -> RegisterPatientRequest {
    RegisterPatientRequest {
        full_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
        gender: gender.to_string(),
        date_of_birth: None,
    }
}

#[tokio::test]
async fn test_register_patient_hashes_password() {
    let mut ctx = TestContext::new();
    ctx.patient_repo
        .expect_get_patient_by_email()
        .returning(|_| Ok(None));
    ctx.patient_repo
        .expect_create_patient()
        .withf(|_, gender, hash| *gender == Gender::Female && hash.starts_with("$argon2"))
        .times(1)
        .returning(|request, gender, hash| {
            Ok(DbPatient {
                id: Uuid::new_v4(),
                full_name: request.full_name.clone(),
                email: request.email.clone(),
                gender: gender.as_str().to_string(),
                date_of_birth: request.date_of_birth,
                password_hash: hash.to_string(),
                created_at: chrono::Utc::now(),
            })
        });
    let state = ctx.build_state();

    let (status, Json(response)) = register_patient(
        State(state),
        Ok(Json(registration("s3cret!", "s3cret!", "Female"))),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response.email, "jane@example.com");
    assert_eq!(response.gender, Gender::Female);
}

#[rstest]
#[case(registration("s3cret!", "different", "female"), "Passwords do not match")]
#[case(registration("s3cret!", "s3cret!", "robot"), "Gender must be one of")]
#[case(registration("", "", "female"), "Password must not be empty")]
#[tokio::test]
async fn test_register_patient_validation(
    #[case] request: RegisterPatientRequest,
    #[case] expected: &str,
) {
    let mut ctx = TestContext::new();
    ctx.patient_repo.expect_create_patient().never();
    let state = ctx.build_state();

    let err = register_patient(State(state), Ok(Json(request))).await.unwrap_err();

    match err.0 {
        ClinicError::Validation(reason) => assert!(reason.contains(expected), "{}", reason),
        other => panic!("expected Validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_patient_duplicate_email() {
    let mut ctx = TestContext::new();
    ctx.patient_repo
        .expect_get_patient_by_email()
        .returning(|_| Ok(Some(patient_row(Uuid::new_v4()))));
    ctx.patient_repo.expect_create_patient().never();
    let state = ctx.build_state();

    let err = register_patient(
        State(state),
        Ok(Json(registration("s3cret!", "s3cret!", "female"))),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_patient_losing_insert_race_is_conflict() {
    let mut ctx = TestContext::new();
    ctx.patient_repo
        .expect_get_patient_by_email()
        .returning(|_| Ok(None));
    ctx.patient_repo
        .expect_create_patient()
        .times(1)
        .returning(|_, _, _| Err(unique_violation()));
    let state = ctx.build_state();

    let err = register_patient(
        State(state),
        Ok(Json(registration("s3cret!", "s3cret!", "female"))),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
    match err.0 {
        ClinicError::Conflict(reason) => assert!(reason.contains("jane@example.com"), "{}", reason),
        other => panic!("expected Conflict error, got {:?}", other),
    }
}
