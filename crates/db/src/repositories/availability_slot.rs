use crate::{models::DbAvailabilitySlot, DbPool};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use clinic_core::models::availability::{AvailabilitySlot, DoctorId};
use eyre::Result;
use mockall::automock;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const SLOT_COLUMNS: &str =
    "id, doctor_id, slot_date, start_time, end_time, is_booked, notes, created_at";

pub async fn create_slot(pool: &Pool<Postgres>, slot: &AvailabilitySlot) -> Result<DbAvailabilitySlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating availability slot: id={}, doctor={}, date={}, {}-{}",
        id, slot.doctor, slot.slot_date, slot.start_time, slot.end_time
    );

    let row = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        r#"
        INSERT INTO availability_slots (id, doctor_id, slot_date, start_time, end_time, is_booked, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        SLOT_COLUMNS
    ))
    .bind(id)
    .bind(slot.doctor.0)
    .bind(slot.slot_date)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(slot.is_booked)
    .bind(slot.notes.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAvailabilitySlot>> {
    let row = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        "SELECT {} FROM availability_slots WHERE id = $1",
        SLOT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_slots_by_doctor(
    pool: &Pool<Postgres>,
    doctor: DoctorId,
    date: Option<NaiveDate>,
) -> Result<Vec<DbAvailabilitySlot>> {
    let rows = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        r#"
        SELECT {}
        FROM availability_slots
        WHERE doctor_id = $1 AND ($2::DATE IS NULL OR slot_date = $2)
        ORDER BY slot_date ASC, start_time ASC
        "#,
        SLOT_COLUMNS
    ))
    .bind(doctor.0)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Flips `is_booked` on an unbooked slot. Returns `None` when the slot is
/// missing or was already booked.
pub async fn mark_slot_booked(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAvailabilitySlot>> {
    let row = sqlx::query_as::<_, DbAvailabilitySlot>(&format!(
        r#"
        UPDATE availability_slots
        SET is_booked = TRUE
        WHERE id = $1 AND is_booked = FALSE
        RETURNING {}
        "#,
        SLOT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

#[automock]
#[async_trait]
pub trait AvailabilitySlotRepository: Send + Sync {
    async fn create_slot(&self, slot: &AvailabilitySlot) -> Result<DbAvailabilitySlot>;

    async fn get_slot_by_id(&self, id: Uuid) -> Result<Option<DbAvailabilitySlot>>;

    async fn get_slots_by_doctor(
        &self,
        doctor: DoctorId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<DbAvailabilitySlot>>;

    async fn mark_slot_booked(&self, id: Uuid) -> Result<Option<DbAvailabilitySlot>>;
}

pub struct PgAvailabilitySlotRepository {
    pool: DbPool,
}

impl PgAvailabilitySlotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilitySlotRepository for PgAvailabilitySlotRepository {
    async fn create_slot(&self, slot: &AvailabilitySlot) -> Result<DbAvailabilitySlot> {
        create_slot(&self.pool, slot).await
    }

    async fn get_slot_by_id(&self, id: Uuid) -> Result<Option<DbAvailabilitySlot>> {
        get_slot_by_id(&self.pool, id).await
    }

    async fn get_slots_by_doctor(
        &self,
        doctor: DoctorId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<DbAvailabilitySlot>> {
        get_slots_by_doctor(&self.pool, doctor, date).await
    }

    async fn mark_slot_booked(&self, id: Uuid) -> Result<Option<DbAvailabilitySlot>> {
        mark_slot_booked(&self.pool, id).await
    }
}
