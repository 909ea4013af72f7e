use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque reference to a doctor account.
///
/// Doctor accounts live outside this service; the id is handed to us by the
/// authenticating layer in front of the API and is never resolved here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(pub i64);

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DoctorId {
    fn from(id: i64) -> Self {
        DoctorId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A bookable interval offered by a doctor, as produced by
/// [`SlotBuilder`](crate::slot::SlotBuilder) and before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub doctor: DoctorId,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_booked: bool,
    pub notes: Option<String>,
}

impl AvailabilitySlot {
    /// Calendar date on which the slot ends.
    ///
    /// Slots never last a full day, so an end time at or before the start
    /// time means the slot was rolled over midnight.
    pub fn end_date(&self) -> NaiveDate {
        end_date_for(self.slot_date, self.start_time, self.end_time)
    }
}

pub(crate) fn end_date_for(slot_date: NaiveDate, start: NaiveTime, end: NaiveTime) -> NaiveDate {
    if end <= start {
        slot_date.succ_opt().unwrap_or(slot_date)
    } else {
        slot_date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlotResponse {
    pub id: Uuid,
    pub doctor_id: DoctorId,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub end_date: NaiveDate,
    pub is_booked: bool,
    pub notes: Option<String>,
}

impl AvailabilitySlotResponse {
    pub fn new(id: Uuid, slot: AvailabilitySlot) -> Self {
        Self {
            id,
            doctor_id: slot.doctor,
            end_date: slot.end_date(),
            slot_date: slot.slot_date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_booked: slot.is_booked,
            notes: slot.notes,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<NaiveDate>,
}
