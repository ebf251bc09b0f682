//! Action service — use-cases for attaching actions to automations.

use hearth_domain::action::{Action, ActionKind};
use hearth_domain::error::{HearthError, NotFoundError, StoreError, ValidationError};
use hearth_domain::time::{self, Timestamp};

use crate::attribute_store;
use crate::requests::{AddActionRequest, UpdateActionRequest};
use crate::store::HomeStore;
use crate::variant::{self, ActionBlueprint};

/// Application service for action create/update.
#[derive(Debug, Default)]
pub struct ActionService;

impl ActionService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Create an action under an automation.
    ///
    /// # Errors
    ///
    /// `MissingField` for an absent `automation_id` or kind tag, `NotFound`
    /// for a dangling automation or target, plus the variant-consistency
    /// and attribute-domain errors of the checker.
    #[tracing::instrument(skip(self, store, req))]
    pub fn add_action(
        &self,
        store: &mut HomeStore,
        req: AddActionRequest,
    ) -> Result<Action, HearthError> {
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

        let blueprint = variant::check_action(store, &automation, &req.spec, None)?;

        let now = time::now();
        let action = Action {
            id: store.next_action_id(),
            automation_id: automation.id,
            kind: materialize(store, blueprint, Vec::new(), now),
            created_at: now,
            updated_at: now,
        };
        store.put_action(action.clone());
        tracing::info!(action_id = %action.id, kind = action.kind.tag(), "action created");
        Ok(action)
    }

    /// Update an action. Omitted fields carry over while the kind is
    /// unchanged; assignment records survive a `device_control` update,
    /// merged with the request's pairs by name.
    ///
    /// # Errors
    ///
    /// As [`add_action`](Self::add_action), plus `Store(Inconsistent)` when
    /// the action's owning automation row has vanished.
    #[tracing::instrument(skip(self, store, req))]
    pub fn update_action(
        &self,
        store: &mut HomeStore,
        req: UpdateActionRequest,
    ) -> Result<Action, HearthError> {
        let action_id = req.action_id.ok_or(ValidationError::MissingField {
            field: "action_id",
        })?;
        let mut action = store
            .action(&action_id)
            .cloned()
            .ok_or_else(|| NotFoundError {
                entity: "action",
                id: action_id.to_string(),
            })?;
        let automation = store
            .automation(&action.automation_id)
            .cloned()
            .ok_or_else(|| StoreError::Inconsistent {
                detail: format!(
                    "action `{action_id}` references missing automation `{}`",
                    action.automation_id
                ),
            })?;

        let blueprint = variant::check_action(store, &automation, &req.spec, Some(&action.kind))?;

        let carried = match (&action.kind, &blueprint) {
            (
                ActionKind::DeviceControl {
                    device_id: old_device,
                    attributes,
                },
                ActionBlueprint::DeviceControl {
                    device_id,
                    device_type,
                    ..
                },
            ) => {
                if old_device != device_id {
                    variant::revalidate_assignments(*device_type, attributes)?;
                }
                attributes.clone()
            }
            _ => Vec::new(),
        };

        let now = time::now();
        action.kind = materialize(store, blueprint, carried, now);
        action.updated_at = now;
        store.put_action(action.clone());
        Ok(action)
    }
}

fn materialize(
    store: &HomeStore,
    blueprint: ActionBlueprint,
    carried: Vec<hearth_domain::attribute::AttributeAssignment>,
    now: Timestamp,
) -> ActionKind {
    match blueprint {
        ActionBlueprint::DeviceControl {
            device_id, pairs, ..
        } => {
            let mut attributes = carried;
            let mut seq = store.next_assignment_seq();
            for (name, value) in pairs {
                attribute_store::upsert_assignment(&mut attributes, &name, value, &mut seq, now);
            }
            ActionKind::DeviceControl {
                device_id,
                attributes,
            }
        }
        ActionBlueprint::SceneActivation { scene_id } => ActionKind::SceneActivation { scene_id },
        ActionBlueprint::Notification { notification_id } => {
            ActionKind::Notification { notification_id }
        }
    }
}
