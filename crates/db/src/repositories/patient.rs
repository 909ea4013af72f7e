use crate::{models::DbPatient, DbPool};
use async_trait::async_trait;
use chrono::Utc;
use clinic_core::models::patient::{Gender, RegisterPatientRequest};
use eyre::Result;
use mockall::automock;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_patient(
    pool: &Pool<Postgres>,
    request: &RegisterPatientRequest,
    gender: Gender,
    password_hash: &str,
) -> Result<DbPatient> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating patient: id={}, email={}", id, request.email);

    let patient = sqlx::query_as::<_, DbPatient>(
        r#"
        INSERT INTO patients (id, full_name, email, gender, date_of_birth, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, full_name, email, gender, date_of_birth, password_hash, created_at
        "#,
    )
    .bind(id)
    .bind(&request.full_name)
    .bind(&request.email)
    .bind(gender.as_str())
    .bind(request.date_of_birth)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(patient)
}

pub async fn get_patient_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPatient>> {
    let patient = sqlx::query_as::<_, DbPatient>(
        r#"
        SELECT id, full_name, email, gender, date_of_birth, password_hash, created_at
        FROM patients
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

pub async fn get_patient_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbPatient>> {
    let patient = sqlx::query_as::<_, DbPatient>(
        r#"
        SELECT id, full_name, email, gender, date_of_birth, password_hash, created_at
        FROM patients
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

#[automock]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn create_patient(
        &self,
        request: &RegisterPatientRequest,
        gender: Gender,
        password_hash: &str,
    ) -> Result<DbPatient>;

    async fn get_patient_by_id(&self, id: Uuid) -> Result<Option<DbPatient>>;

    async fn get_patient_by_email(&self, email: &str) -> Result<Option<DbPatient>>;
}

pub struct PgPatientRepository {
    pool: DbPool,
}

impl PgPatientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for PgPatientRepository {
    async fn create_patient(
        &self,
        request: &RegisterPatientRequest,
        gender: Gender,
        password_hash: &str,
    ) -> Result<DbPatient> {
        create_patient(&self.pool, request, gender, password_hash).await
    }

    async fn get_patient_by_id(&self, id: Uuid) -> Result<Option<DbPatient>> {
        get_patient_by_id(&self.pool, id).await
    }

    async fn get_patient_by_email(&self, email: &str) -> Result<Option<DbPatient>> {
        get_patient_by_email(&self.pool, email).await
    }
}
