//! Automation service — use-cases for managing automations.

use std::str::FromStr;

use serde::Serialize;

use hearth_domain::action::Action;
use hearth_domain::automation::{Automation, AutomationStatus};
use hearth_domain::error::{HearthError, NotFoundError, ValidationError};
use hearth_domain::schedule::Schedule;
use hearth_domain::trigger::Trigger;

use crate::requests::{
    AddAutomationRequest, GetAutomationRequest, ListAutomationsRequest, UpdateAutomationRequest,
};
use crate::store::HomeStore;

/// An automation composed with the records it owns, as returned by the
/// read path.
#[derive(Debug, Clone, Serialize)]
pub struct AutomationView {
    #[serde(flatten)]
    pub automation: Automation,
    pub triggers: Vec<Trigger>,
    pub actions: Vec<Action>,
    pub schedules: Vec<Schedule>,
}

/// Application service for automation create/update/read.
#[derive(Debug, Default)]
pub struct AutomationService;

impl AutomationService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Create a new automation.
    ///
    /// # Errors
    ///
    /// `MissingField` for an absent `home_id`/`created_by`/`name`,
    /// `NotFound` for an unknown home, `InvalidEnumValue` for a bad
    /// status, `DuplicateName` when the name is already used in the home,
    /// `EmptyName` for a blank name.
    #[tracing::instrument(skip(self, store, req))]
    pub fn add_automation(
        &self,
        store: &mut HomeStore,
        req: AddAutomationRequest,
    ) -> Result<Automation, HearthError> {
        let home_id = req
            .home_id
            .ok_or(ValidationError::MissingField { field: "home_id" })?;
        let created_by = req.created_by.ok_or(ValidationError::MissingField {
            field: "created_by",
        })?;
        let name = req
            .name
            .ok_or(ValidationError::MissingField { field: "name" })?;
        if store.home(&home_id).is_none() {
            return Err(NotFoundError {
                entity: "home",
                id: home_id.to_string(),
            }
            .into());
        }
        let status = req
            .status
            .as_deref()
            .map(AutomationStatus::from_str)
            .transpose()?
            .unwrap_or_default();
        if store.automation_name_taken(&home_id, &name, None) {
            return Err(ValidationError::DuplicateName {
                entity: "automation",
                name,
            }
            .into());
        }

        let automation = Automation::builder()
            .id(store.next_automation_id())
            .home_id(home_id)
            .created_by(created_by)
            .name(name)
            .status(status)
            .description(req.description.unwrap_or_default())
            .build()?;
        store.put_automation(automation.clone());
        tracing::info!(automation_id = %automation.id, "automation created");
        Ok(automation)
    }

    /// Apply a partial update; absent fields keep their stored value.
    /// Renames re-check name uniqueness excluding the record itself.
    ///
    /// # Errors
    ///
    /// `MissingField`, `NotFound`, `InvalidEnumValue`, `DuplicateName`,
    /// `EmptyName` — as for [`add_automation`](Self::add_automation).
    #[tracing::instrument(skip(self, store, req))]
    pub fn update_automation(
        &self,
        store: &mut HomeStore,
        req: UpdateAutomationRequest,
    ) -> Result<Automation, HearthError> {
        let automation_id = req.automation_id.ok_or(ValidationError::MissingField {
            field: "automation_id",
        })?;
        let mut automation = store
            .automation(&automation_id)
            .cloned()
            .ok_or_else(|| NotFoundError {
                entity: "automation",
                id: automation_id.to_string(),
            })?;

        if let Some(name) = req.name {
            if store.automation_name_taken(&automation.home_id, &name, Some(&automation.id)) {
                return Err(ValidationError::DuplicateName {
                    entity: "automation",
                    name,
                }
                .into());
            }
            automation.name = name;
        }
        if let Some(status) = req.status.as_deref() {
            automation.status = status.parse()?;
        }
        if let Some(description) = req.description {
            automation.description = description;
        }

        automation.validate()?;
        store.put_automation(automation.clone());
        Ok(automation)
    }

    /// Read one automation composed with its triggers, actions, and
    /// schedules.
    ///
    /// # Errors
    ///
    /// `MissingField` for an absent id, `NotFound` for an unknown one.
    pub fn get_automation(
        &self,
        store: &HomeStore,
        req: GetAutomationRequest,
    ) -> Result<AutomationView, HearthError> {
        let automation_id = req.automation_id.ok_or(ValidationError::MissingField {
            field: "automation_id",
        })?;
        let automation = store
            .automation(&automation_id)
            .cloned()
            .ok_or_else(|| NotFoundError {
                entity: "automation",
                id: automation_id.to_string(),
            })?;
        Ok(AutomationView {
            triggers: store.triggers_of(&automation.id).cloned().collect(),
            actions: store.actions_of(&automation.id).cloned().collect(),
            schedules: store.schedules_of(&automation.id).cloned().collect(),
            automation,
        })
    }

    /// List automations, optionally restricted to one home.
    #[must_use]
    pub fn list_automations(
        &self,
        store: &HomeStore,
        req: &ListAutomationsRequest,
    ) -> Vec<Automation> {
        store
            .automations()
            .filter(|automation| {
                req.home_id
                    .as_ref()
                    .map_or(true, |home_id| automation.home_id == *home_id)
            })
            .cloned()
            .collect()
    }
}
