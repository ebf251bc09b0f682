//! Variant consistency — a kind tag fixes its companion fields.
//!
//! Every trigger/action kind requires exactly one target reference; the
//! checker turns a loose request spec into a validated blueprint or a
//! typed error, resolving references against the store along the way.
//! Checks run in a fixed order and fail fast: kind tag, required target,
//! reference existence, home ownership, device policy, attribute domains.
//!
//! On update the previous kind is consulted only for carry-over: a field
//! the request omits is taken from the stored record when the kind is
//! unchanged. A kind transition drops the stale payload, so the new kind's
//! target must be supplied explicitly. Extra targets for another kind are
//! ignored, never an error.

use std::str::FromStr;

use hearth_domain::attribute::{
    self, AttributeAssertion, AttributeAssignment, AttributePayload, AttributeValue,
    ComparisonOperator,
};
use hearth_domain::automation::Automation;
use hearth_domain::error::{HearthError, NotFoundError, StoreError, ValidationError};
use hearth_domain::id::{DeviceId, NotificationId, SceneId, ScheduleId};
use hearth_domain::schema::DeviceType;
use hearth_domain::trigger::{SolarEvent, TriggerKind};
use hearth_domain::action::ActionKind;

use crate::requests::{ActionSpec, TriggerSpec};
use crate::settings::TriggerDevicePolicy;
use crate::store::HomeStore;

/// A fully validated trigger request, ready to be committed. Attribute
/// pairs are typed but not yet record-ified; the service stages them
/// through the attribute store.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerBlueprint {
    TimeBased {
        schedule_id: ScheduleId,
    },
    SolarEvent {
        solar_event: SolarEvent,
        schedule_id: ScheduleId,
    },
    DeviceState {
        device_id: DeviceId,
        device_type: DeviceType,
        pairs: Vec<(String, AttributeValue)>,
        operator: Option<ComparisonOperator>,
    },
    Manual,
}

/// A fully validated action request, ready to be committed.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionBlueprint {
    DeviceControl {
        device_id: DeviceId,
        device_type: DeviceType,
        pairs: Vec<(String, AttributeValue)>,
    },
    SceneActivation {
        scene_id: SceneId,
    },
    Notification {
        notification_id: NotificationId,
    },
}

/// Check a trigger spec against the store and the automation that will own
/// the record.
///
/// # Errors
///
/// Fail-fast, in check order: `MissingField` (no kind anywhere),
/// `InvalidEnumValue` (unknown kind tag, bad solar event or operator),
/// `MissingTarget`, `NotFound`, `CrossHousehold`, `UnknownDeviceType`,
/// `NotASensor`, and the attribute-domain errors.
pub fn check_trigger(
    store: &HomeStore,
    automation: &Automation,
    spec: &TriggerSpec,
    existing: Option<&TriggerKind>,
    policy: TriggerDevicePolicy,
) -> Result<TriggerBlueprint, HearthError> {
    let tag = spec
        .trigger_type
        .as_deref()
        .or(existing.map(TriggerKind::tag))
        .ok_or(ValidationError::MissingField {
            field: "trigger_type",
        })?;

    match tag {
        "time_based" => {
            let schedule_id = spec
                .schedule_id
                .clone()
                .or_else(|| carried_schedule(existing, tag))
                .ok_or(ValidationError::MissingTarget {
                    kind: "time_based",
                    field: "schedule_id",
                })?;
            resolve_schedule(store, automation, &schedule_id)?;
            Ok(TriggerBlueprint::TimeBased { schedule_id })
        }
        "solar_event" => {
            let solar_event = match spec.solar_event.as_deref() {
                Some(raw) => SolarEvent::from_str(raw)?,
                None => carried_solar_event(existing).ok_or(ValidationError::MissingTarget {
                    kind: "solar_event",
                    field: "solar_event",
                })?,
            };
            let schedule_id = spec
                .schedule_id
                .clone()
                .or_else(|| carried_schedule(existing, tag))
                .ok_or(ValidationError::MissingTarget {
                    kind: "solar_event",
                    field: "schedule_id",
                })?;
            resolve_schedule(store, automation, &schedule_id)?;
            Ok(TriggerBlueprint::SolarEvent {
                solar_event,
                schedule_id,
            })
        }
        "device_state" => {
            let device_id = spec
                .device_id
                .clone()
                .or_else(|| carried_device(existing))
                .ok_or(ValidationError::MissingTarget {
                    kind: "device_state",
                    field: "device_id",
                })?;
            let device_type = resolve_device(store, automation, &device_id)?;
            if policy == TriggerDevicePolicy::SensorsOnly && !device_type.is_sensor() {
                return Err(ValidationError::NotASensor {
                    device_type: device_type.to_string(),
                }
                .into());
            }
            let operator = spec
                .comparison_operator
                .as_deref()
                .map(ComparisonOperator::from_str)
                .transpose()?;
            let pairs = validate_payload(device_type, spec.attributes.clone())?;
            Ok(TriggerBlueprint::DeviceState {
                device_id,
                device_type,
                pairs,
                operator,
            })
        }
        "manual" => Ok(TriggerBlueprint::Manual),
        other => Err(unknown_tag("trigger_type", other, &TriggerKind::TAGS)),
    }
}

/// Check an action spec against the store and the owning automation.
///
/// # Errors
///
/// Same order and classes as [`check_trigger`], minus the trigger-only
/// policy and operator checks.
pub fn check_action(
    store: &HomeStore,
    automation: &Automation,
    spec: &ActionSpec,
    existing: Option<&ActionKind>,
) -> Result<ActionBlueprint, HearthError> {
    let tag = spec
        .action_type
        .as_deref()
        .or(existing.map(ActionKind::tag))
        .ok_or(ValidationError::MissingField {
            field: "action_type",
        })?;

    match tag {
        "device_control" => {
            let device_id = spec
                .device_id
                .clone()
                .or_else(|| carried_control_device(existing))
                .ok_or(ValidationError::MissingTarget {
                    kind: "device_control",
                    field: "device_id",
                })?;
            let device_type = resolve_device(store, automation, &device_id)?;
            let pairs = validate_payload(device_type, spec.attributes.clone())?;
            Ok(ActionBlueprint::DeviceControl {
                device_id,
                device_type,
                pairs,
            })
        }
        "scene_activation" => {
            let scene_id = spec
                .scene_id
                .clone()
                .or_else(|| carried_scene(existing))
                .ok_or(ValidationError::MissingTarget {
                    kind: "scene_activation",
                    field: "scene_id",
                })?;
            let scene = store.scene(&scene_id).ok_or_else(|| NotFoundError {
                entity: "scene",
                id: scene_id.to_string(),
            })?;
            if scene.home_id != automation.home_id {
                return Err(ValidationError::CrossHousehold {
                    entity: "scene",
                    id: scene_id.to_string(),
                }
                .into());
            }
            Ok(ActionBlueprint::SceneActivation { scene_id })
        }
        "notification" => {
            let notification_id = spec
                .notification_id
                .clone()
                .or_else(|| carried_notification(existing))
                .ok_or(ValidationError::MissingTarget {
                    kind: "notification",
                    field: "notification_id",
                })?;
            // Existence only; notification storage is external.
            if store.notification(&notification_id).is_none() {
                return Err(NotFoundError {
                    entity: "notification",
                    id: notification_id.to_string(),
                }
                .into());
            }
            Ok(ActionBlueprint::Notification { notification_id })
        }
        other => Err(unknown_tag("action_type", other, &ActionKind::TAGS)),
    }
}

/// Re-validate already-stored assertion records against a schema. Used when
/// an update retargets a `device_state` trigger: the carried records must
/// be legal for the new device's type, not just the delta.
///
/// # Errors
///
/// The attribute-domain errors of [`attribute::validate`], fail-fast.
pub fn revalidate_assertions(
    device_type: DeviceType,
    records: &[AttributeAssertion],
) -> Result<(), ValidationError> {
    for record in records {
        let raw = match &record.value {
            AttributeValue::Text(text) => serde_json::Value::String(text.clone()),
            AttributeValue::Number(number) => serde_json::json!(number),
        };
        attribute::validate(device_type, &record.name, &raw)?;
    }
    Ok(())
}

/// Action-side counterpart of [`revalidate_assertions`], for carried
/// assignment records.
///
/// # Errors
///
/// The attribute-domain errors of [`attribute::validate`], fail-fast.
pub fn revalidate_assignments(
    device_type: DeviceType,
    records: &[AttributeAssignment],
) -> Result<(), ValidationError> {
    for record in records {
        let raw = match &record.value {
            AttributeValue::Text(text) => serde_json::Value::String(text.clone()),
            AttributeValue::Number(number) => serde_json::json!(number),
        };
        attribute::validate(device_type, &record.name, &raw)?;
    }
    Ok(())
}

fn validate_payload(
    device_type: DeviceType,
    payload: Option<AttributePayload>,
) -> Result<Vec<(String, AttributeValue)>, ValidationError> {
    let batches = payload.map(AttributePayload::into_batches).unwrap_or_default();
    attribute::validate_batches(device_type, &batches)
}

fn resolve_device(
    store: &HomeStore,
    automation: &Automation,
    device_id: &DeviceId,
) -> Result<DeviceType, HearthError> {
    let device = store.device(device_id).ok_or_else(|| NotFoundError {
        entity: "device",
        id: device_id.to_string(),
    })?;
    if device.home_id != automation.home_id {
        return Err(ValidationError::CrossHousehold {
            entity: "device",
            id: device_id.to_string(),
        }
        .into());
    }
    Ok(device.device_type.parse()?)
}

fn resolve_schedule(
    store: &HomeStore,
    automation: &Automation,
    schedule_id: &ScheduleId,
) -> Result<(), HearthError> {
    let schedule = store.schedule(schedule_id).ok_or_else(|| NotFoundError {
        entity: "schedule",
        id: schedule_id.to_string(),
    })?;
    // A schedule row referencing a vanished automation means the container
    // itself is broken, not the request.
    let owner = store
        .automation(&schedule.automation_id)
        .ok_or_else(|| StoreError::Inconsistent {
            detail: format!(
                "schedule `{schedule_id}` references missing automation `{}`",
                schedule.automation_id
            ),
        })?;
    if owner.home_id != automation.home_id {
        return Err(ValidationError::CrossHousehold {
            entity: "schedule",
            id: schedule_id.to_string(),
        }
        .into());
    }
    schedule.validate()?;
    Ok(())
}

fn unknown_tag(field: &str, value: &str, allowed: &[&str]) -> HearthError {
    ValidationError::InvalidEnumValue {
        field: field.to_string(),
        value: value.to_string(),
        allowed: allowed.iter().map(ToString::to_string).collect(),
    }
    .into()
}

fn carried_schedule(existing: Option<&TriggerKind>, tag: &str) -> Option<ScheduleId> {
    match existing {
        Some(TriggerKind::TimeBased { schedule_id }) if tag == "time_based" => {
            Some(schedule_id.clone())
        }
        Some(TriggerKind::SolarEvent { schedule_id, .. }) if tag == "solar_event" => {
            Some(schedule_id.clone())
        }
        _ => None,
    }
}

fn carried_solar_event(existing: Option<&TriggerKind>) -> Option<SolarEvent> {
    match existing {
        Some(TriggerKind::SolarEvent { solar_event, .. }) => Some(*solar_event),
        _ => None,
    }
}

fn carried_device(existing: Option<&TriggerKind>) -> Option<DeviceId> {
    match existing {
        Some(TriggerKind::DeviceState { device_id, .. }) => Some(device_id.clone()),
        _ => None,
    }
}

fn carried_control_device(existing: Option<&ActionKind>) -> Option<DeviceId> {
    match existing {
        Some(ActionKind::DeviceControl { device_id, .. }) => Some(device_id.clone()),
        _ => None,
    }
}

fn carried_scene(existing: Option<&ActionKind>) -> Option<SceneId> {
    match existing {
        Some(ActionKind::SceneActivation { scene_id }) => Some(scene_id.clone()),
        _ => None,
    }
}

fn carried_notification(existing: Option<&ActionKind>) -> Option<NotificationId> {
    match existing {
        Some(ActionKind::Notification { notification_id }) => Some(notification_id.clone()),
        _ => None,
    }
}
