//! Schedule — weekday flags plus an onset time, owned by an automation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{AutomationId, ScheduleId};

/// A recurring weekly schedule referenced by time-based and solar-event
/// triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub automation_id: AutomationId,
    pub on_monday: bool,
    pub on_tuesday: bool,
    pub on_wednesday: bool,
    pub on_thursday: bool,
    pub on_friday: bool,
    pub on_saturday: bool,
    pub on_sunday: bool,
    /// `HH:MM:SS`, validated by [`validate_onset_time`].
    pub onset_time: String,
}

impl Schedule {
    /// The weekday flags, Monday first.
    #[must_use]
    pub fn days(&self) -> [bool; 7] {
        [
            self.on_monday,
            self.on_tuesday,
            self.on_wednesday,
            self.on_thursday,
            self.on_friday,
            self.on_saturday,
            self.on_sunday,
        ]
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NoDaysSelected`] when every flag is false,
    /// [`ValidationError::InvalidTimeFormat`] when the onset time is not a
    /// valid `HH:MM:SS`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_days(&self.days())?;
        validate_onset_time(&self.onset_time)
    }
}

/// At least one weekday flag must be set.
///
/// # Errors
///
/// [`ValidationError::NoDaysSelected`] when every flag is false.
pub fn validate_days(days: &[bool; 7]) -> Result<(), ValidationError> {
    if days.iter().any(|selected| *selected) {
        Ok(())
    } else {
        Err(ValidationError::NoDaysSelected)
    }
}

/// Onset times are `HH:MM:SS` with `00..=23` hours and `00..=59`
/// minutes/seconds. Each field must be exactly two digits.
///
/// # Errors
///
/// [`ValidationError::InvalidTimeFormat`] naming the rejected value.
pub fn validate_onset_time(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidTimeFormat {
        value: value.to_string(),
    };

    let mut fields = [0u32; 3];
    let mut parts = value.split(':');
    for field in &mut fields {
        let part = parts.next().ok_or_else(invalid)?;
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *field = part.parse().map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    let [hours, minutes, seconds] = fields;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekday_schedule(onset_time: &str) -> Schedule {
        Schedule {
            id: ScheduleId::new("1"),
            automation_id: AutomationId::new("1"),
            on_monday: true,
            on_tuesday: false,
            on_wednesday: false,
            on_thursday: false,
            on_friday: false,
            on_saturday: false,
            on_sunday: false,
            onset_time: onset_time.to_string(),
        }
    }

    #[test]
    fn should_accept_schedule_with_one_day_and_valid_time() {
        assert!(weekday_schedule("14:30:00").validate().is_ok());
    }

    #[test]
    fn should_reject_schedule_with_no_days_selected() {
        let mut schedule = weekday_schedule("10:00:00");
        schedule.on_monday = false;
        assert!(matches!(
            schedule.validate(),
            Err(ValidationError::NoDaysSelected)
        ));
    }

    #[test]
    fn should_reject_hours_past_midnight() {
        assert!(matches!(
            validate_onset_time("25:00:00"),
            Err(ValidationError::InvalidTimeFormat { value }) if value == "25:00:00"
        ));
    }

    #[test]
    fn should_reject_minutes_and_seconds_over_fifty_nine() {
        assert!(validate_onset_time("10:60:00").is_err());
        assert!(validate_onset_time("10:00:60").is_err());
    }

    #[test]
    fn should_accept_midnight_and_last_second_of_day() {
        assert!(validate_onset_time("00:00:00").is_ok());
        assert!(validate_onset_time("23:59:59").is_ok());
    }

    #[test]
    fn should_reject_malformed_times() {
        for bad in ["", "10:00", "10:00:00:00", "1:00:00", "aa:bb:cc", "10-00-00", " 10:00:00"] {
            assert!(validate_onset_time(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn should_expose_days_monday_first() {
        let mut schedule = weekday_schedule("10:00:00");
        schedule.on_sunday = true;
        assert_eq!(
            schedule.days(),
            [true, false, false, false, false, false, true]
        );
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let schedule = weekday_schedule("06:15:00");
        let json = serde_json::to_string(&schedule).unwrap();
        let parsed: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, schedule);
    }
}
