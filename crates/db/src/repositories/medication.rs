use crate::{models::DbMedicationRoutine, DbPool};
use async_trait::async_trait;
use chrono::Utc;
use clinic_core::models::medication::CreateMedicationRoutineRequest;
use eyre::{Result, WrapErr};
use mockall::automock;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_routine(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
    request: &CreateMedicationRoutineRequest,
) -> Result<DbMedicationRoutine> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let times_per_day =
        i32::try_from(request.times_per_day).wrap_err("times_per_day does not fit in INTEGER")?;

    tracing::debug!(
        "Creating medication routine: id={}, patient={}, medication={}",
        id, patient_id, request.medication_name
    );

    let routine = sqlx::query_as::<_, DbMedicationRoutine>(
        r#"
        INSERT INTO medication_routines
            (id, patient_id, medication_name, dosage, times_per_day, start_date, end_date, instructions, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, patient_id, medication_name, dosage, times_per_day, start_date, end_date, instructions, created_at
        "#,
    )
    .bind(id)
    .bind(patient_id)
    .bind(&request.medication_name)
    .bind(&request.dosage)
    .bind(times_per_day)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(request.instructions.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(routine)
}

pub async fn get_routines_by_patient(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
) -> Result<Vec<DbMedicationRoutine>> {
    let routines = sqlx::query_as::<_, DbMedicationRoutine>(
        r#"
        SELECT id, patient_id, medication_name, dosage, times_per_day, start_date, end_date, instructions, created_at
        FROM medication_routines
        WHERE patient_id = $1
        ORDER BY start_date ASC, created_at ASC
        "#,
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    Ok(routines)
}

#[automock]
#[async_trait]
pub trait MedicationRoutineRepository: Send + Sync {
    async fn create_routine(
        &self,
        patient_id: Uuid,
        request: &CreateMedicationRoutineRequest,
    ) -> Result<DbMedicationRoutine>;

    async fn get_routines_by_patient(&self, patient_id: Uuid) -> Result<Vec<DbMedicationRoutine>>;
}

pub struct PgMedicationRoutineRepository {
    pool: DbPool,
}

impl PgMedicationRoutineRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MedicationRoutineRepository for PgMedicationRoutineRepository {
    async fn create_routine(
        &self,
        patient_id: Uuid,
        request: &CreateMedicationRoutineRequest,
    ) -> Result<DbMedicationRoutine> {
        create_routine(&self.pool, patient_id, request).await
    }

    async fn get_routines_by_patient(&self, patient_id: Uuid) -> Result<Vec<DbMedicationRoutine>> {
        get_routines_by_patient(&self.pool, patient_id).await
    }
}
