use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_availability_slots_doctor_id ON availability_slots(doctor_id)",
    "CREATE INDEX IF NOT EXISTS idx_availability_slots_slot_date ON availability_slots(slot_date)",
    "CREATE INDEX IF NOT EXISTS idx_medication_routines_patient_id ON medication_routines(patient_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create patients table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS patients (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            full_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            gender VARCHAR(16) NOT NULL,
            date_of_birth DATE NULL,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availability_slots table. No foreign key on doctor_id: doctor
    // accounts are owned by the identity service.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doctor_id BIGINT NOT NULL,
            slot_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_booked BOOLEAN NOT NULL DEFAULT FALSE,
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT distinct_slot_bounds CHECK (end_time <> start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create notification_templates table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notification_templates (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL UNIQUE,
            notification_type VARCHAR(64) NOT NULL,
            subject TEXT NOT NULL,
            body TEXT NOT NULL,
            priority VARCHAR(16) NOT NULL DEFAULT 'medium',
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create medication_routines table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS medication_routines (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            patient_id UUID NOT NULL REFERENCES patients(id),
            medication_name VARCHAR(255) NOT NULL,
            dosage VARCHAR(255) NOT NULL,
            times_per_day INTEGER NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NULL,
            instructions TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_times_per_day CHECK (times_per_day BETWEEN 1 AND 24),
            CONSTRAINT valid_date_range CHECK (end_date IS NULL OR end_date >= start_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Postgres rejects several commands in one prepared statement.
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
