use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clinic_core::{
    errors::ClinicError,
    models::{
        availability::{AvailabilitySlot, AvailabilitySlotResponse, DoctorId},
        medication::MedicationRoutineResponse,
        notification::NotificationTemplate,
        patient::Patient,
    },
};
use eyre::eyre;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilitySlot {
    pub id: Uuid,
    pub doctor_id: i64,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_booked: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotificationTemplate {
    pub id: Uuid,
    pub name: String,
    pub notification_type: String,
    pub subject: String,
    pub body: String,
    pub priority: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPatient {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMedicationRoutine {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub medication_name: String,
    pub dosage: String,
    pub times_per_day: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbAvailabilitySlot> for AvailabilitySlotResponse {
    fn from(row: DbAvailabilitySlot) -> Self {
        let slot = AvailabilitySlot {
            doctor: DoctorId(row.doctor_id),
            slot_date: row.slot_date,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
            notes: row.notes,
        };
        AvailabilitySlotResponse::new(row.id, slot)
    }
}

// Enum columns are plain text; a value we can't parse means the row was
// written by something other than this service.
fn corrupt_column(table: &str, id: Uuid, err: ClinicError) -> ClinicError {
    ClinicError::Database(eyre!("Corrupt {} row {}: {}", table, id, err))
}

impl TryFrom<DbNotificationTemplate> for NotificationTemplate {
    type Error = ClinicError;

    fn try_from(row: DbNotificationTemplate) -> Result<Self, Self::Error> {
        let notification_type = row
            .notification_type
            .parse()
            .map_err(|e| corrupt_column("notification_templates", row.id, e))?;
        let priority = row
            .priority
            .parse()
            .map_err(|e| corrupt_column("notification_templates", row.id, e))?;

        Ok(NotificationTemplate {
            id: row.id,
            name: row.name,
            notification_type,
            subject: row.subject,
            body: row.body,
            priority,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<DbPatient> for Patient {
    type Error = ClinicError;

    fn try_from(row: DbPatient) -> Result<Self, Self::Error> {
        let gender = row
            .gender
            .parse()
            .map_err(|e| corrupt_column("patients", row.id, e))?;

        Ok(Patient {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            gender,
            date_of_birth: row.date_of_birth,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

impl From<DbMedicationRoutine> for MedicationRoutineResponse {
    fn from(row: DbMedicationRoutine) -> Self {
        Self {
            id: row.id,
            patient_id: row.patient_id,
            medication_name: row.medication_name,
            dosage: row.dosage,
            // guarded by the times_per_day CHECK constraint
            times_per_day: u32::try_from(row.times_per_day).unwrap_or_default(),
            start_date: row.start_date,
            end_date: row.end_date,
            instructions: row.instructions,
            created_at: row.created_at,
        }
    }
}
