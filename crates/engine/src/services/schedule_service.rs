//! Schedule service — use-cases for the weekly schedules triggers bind to.

use hearth_domain::error::{HearthError, NotFoundError, ValidationError};
use hearth_domain::schedule::Schedule;

use crate::requests::{AddScheduleRequest, UpdateScheduleRequest};
use crate::store::HomeStore;

/// Application service for schedule create/update.
#[derive(Debug, Default)]
pub struct ScheduleService;

impl ScheduleService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Create a schedule under an automation. Unspecified weekday flags are
    /// false, so at least one must be set explicitly.
    ///
    /// # Errors
    ///
    /// `MissingField` for an absent `automation_id`/`onset_time`,
    /// `NotFound` for an unknown automation, `NoDaysSelected` and
    /// `InvalidTimeFormat` from schedule validation.
    #[tracing::instrument(skip(self, store, req))]
    pub fn add_schedule(
        &self,
        store: &mut HomeStore,
        req: AddScheduleRequest,
    ) -> Result<Schedule, HearthError> {
        let automation_id = req.automation_id.ok_or(ValidationError::MissingField {
            field: "automation_id",
        })?;
        if store.automation(&automation_id).is_none() {
            return Err(NotFoundError {
                entity: "automation",
                id: automation_id.to_string(),
            }
            .into());
        }
        let onset_time = req.onset_time.ok_or(ValidationError::MissingField {
            field: "onset_time",
        })?;

        let schedule = Schedule {
            id: store.next_schedule_id(),
            automation_id,
            on_monday: req.on_monday,
            on_tuesday: req.on_tuesday,
            on_wednesday: req.on_wednesday,
            on_thursday: req.on_thursday,
            on_friday: req.on_friday,
            on_saturday: req.on_saturday,
            on_sunday: req.on_sunday,
            onset_time,
        };
        schedule.validate()?;
        store.put_schedule(schedule.clone());
        tracing::info!(schedule_id = %schedule.id, "schedule created");
        Ok(schedule)
    }

    /// Apply a partial update; absent flags and time keep their stored
    /// value. The merged schedule is validated before it commits.
    ///
    /// # Errors
    ///
    /// `MissingField` for an absent id, `NotFound` for an unknown one, plus
    /// `NoDaysSelected` and `InvalidTimeFormat` on the merged record.
    #[tracing::instrument(skip(self, store, req))]
    pub fn update_schedule(
        &self,
        store: &mut HomeStore,
        req: UpdateScheduleRequest,
    ) -> Result<Schedule, HearthError> {
        let schedule_id = req.schedule_id.ok_or(ValidationError::MissingField {
            field: "schedule_id",
        })?;
        let mut schedule = store
            .schedule(&schedule_id)
            .cloned()
            .ok_or_else(|| NotFoundError {
                entity: "schedule",
                id: schedule_id.to_string(),
            })?;

        schedule.on_monday = req.on_monday.unwrap_or(schedule.on_monday);
        schedule.on_tuesday = req.on_tuesday.unwrap_or(schedule.on_tuesday);
        schedule.on_wednesday = req.on_wednesday.unwrap_or(schedule.on_wednesday);
        schedule.on_thursday = req.on_thursday.unwrap_or(schedule.on_thursday);
        schedule.on_friday = req.on_friday.unwrap_or(schedule.on_friday);
        schedule.on_saturday = req.on_saturday.unwrap_or(schedule.on_saturday);
        schedule.on_sunday = req.on_sunday.unwrap_or(schedule.on_sunday);
        if let Some(onset_time) = req.onset_time {
            schedule.onset_time = onset_time;
        }

        schedule.validate()?;
        store.put_schedule(schedule.clone());
        Ok(schedule)
    }
}
