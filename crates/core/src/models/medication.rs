use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::ValidationResult;

pub const MAX_TIMES_PER_DAY: u32 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMedicationRoutineRequest {
    pub medication_name: String,
    pub dosage: String,
    pub times_per_day: u32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl CreateMedicationRoutineRequest {
    pub fn validate(&self) -> ValidationResult {
        if self.medication_name.trim().is_empty() {
            return ValidationResult::invalid("Medication name must not be empty");
        }
        if self.dosage.trim().is_empty() {
            return ValidationResult::invalid("Dosage must not be empty");
        }
        if self.times_per_day == 0 || self.times_per_day > MAX_TIMES_PER_DAY {
            return ValidationResult::invalid(format!(
                "Times per day must be between 1 and {}",
                MAX_TIMES_PER_DAY
            ));
        }
        match self.end_date {
            Some(end) if end < self.start_date => {
                ValidationResult::invalid("End date must not be before start date")
            }
            _ => ValidationResult::Valid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationRoutineResponse {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub medication_name: String,
    pub dosage: String,
    pub times_per_day: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}
