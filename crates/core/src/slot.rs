//! Construction of bookable availability slots.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    errors::{ClinicError, ClinicResult},
    models::availability::{AvailabilityRequest, AvailabilitySlot, DoctorId},
};

/// Slots must end strictly less than a day after they start.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// What to do with a slot whose end time falls past midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidnightPolicy {
    /// Refuse the slot. Ending exactly at 00:00 counts as crossing.
    #[default]
    Reject,
    /// Wrap the end time onto the following calendar day.
    RollOver,
}

impl fmt::Display for MidnightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidnightPolicy::Reject => f.write_str("reject"),
            MidnightPolicy::RollOver => f.write_str("roll_over"),
        }
    }
}

impl FromStr for MidnightPolicy {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(MidnightPolicy::Reject),
            "roll_over" | "rollover" => Ok(MidnightPolicy::RollOver),
            other => Err(ClinicError::InvalidArgument(format!(
                "Unknown midnight policy '{}', expected 'reject' or 'roll_over'",
                other
            ))),
        }
    }
}

/// Builds [`AvailabilitySlot`]s from caller requests.
///
/// The builder is a plain value carrying its [`MidnightPolicy`]; it holds no
/// other state, so one instance can be shared freely between request tasks.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use clinic_core::models::availability::{AvailabilityRequest, DoctorId};
/// use clinic_core::slot::SlotBuilder;
///
/// let request = AvailabilityRequest {
///     slot_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     duration_minutes: 30,
///     notes: None,
/// };
/// let slot = SlotBuilder::default().build(&request, Some(DoctorId(7))).unwrap();
/// assert_eq!(slot.end_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
/// assert!(!slot.is_booked);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotBuilder {
    policy: MidnightPolicy,
}

impl SlotBuilder {
    pub fn new(policy: MidnightPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MidnightPolicy {
        self.policy
    }

    /// Produces an unbooked slot ending `duration_minutes` after the start.
    ///
    /// # Errors
    ///
    /// * `ClinicError::InvalidArgument` - no doctor was supplied, the duration
    ///   is zero or a full day or longer, or the slot crosses midnight under
    ///   [`MidnightPolicy::Reject`]
    pub fn build(
        &self,
        request: &AvailabilityRequest,
        doctor: Option<DoctorId>,
    ) -> ClinicResult<AvailabilitySlot> {
        let doctor = doctor.ok_or_else(|| {
            ClinicError::InvalidArgument("A doctor identity is required to build a slot".to_string())
        })?;

        if request.duration_minutes == 0 {
            return Err(ClinicError::InvalidArgument(
                "Duration must be at least one minute".to_string(),
            ));
        }
        if request.duration_minutes >= MINUTES_PER_DAY {
            return Err(ClinicError::InvalidArgument(format!(
                "Duration must be shorter than {} minutes",
                MINUTES_PER_DAY
            )));
        }

        let duration = Duration::minutes(i64::from(request.duration_minutes));
        let (end_time, overflow_secs) = request.start_time.overflowing_add_signed(duration);

        if overflow_secs != 0 && self.policy == MidnightPolicy::Reject {
            return Err(ClinicError::InvalidArgument(format!(
                "Slot starting at {} for {} minutes would end after midnight",
                request.start_time.format("%H:%M"),
                request.duration_minutes
            )));
        }

        Ok(AvailabilitySlot {
            doctor,
            slot_date: request.slot_date,
            start_time: request.start_time,
            end_time,
            is_booked: false,
            notes: request.notes.clone(),
        })
    }
}
