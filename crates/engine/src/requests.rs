//! Request records for the engine's operations.
//!
//! Requests are deliberately loose: kind tags arrive as strings and target
//! references as optional fields, mirroring the wire. The variant checker
//! turns a loose spec into a closed domain variant or a typed error;
//! nothing here validates.

use serde::Deserialize;

use hearth_domain::attribute::AttributePayload;
use hearth_domain::id::{
    ActionId, AutomationId, DeviceId, HomeId, NotificationId, SceneId, ScheduleId, TriggerId,
    UserId,
};

/// Create an automation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddAutomationRequest {
    pub home_id: Option<HomeId>,
    pub created_by: Option<UserId>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

/// Partially update an automation. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAutomationRequest {
    pub automation_id: Option<AutomationId>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

/// Read one automation with its owned triggers, actions, and schedules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetAutomationRequest {
    pub automation_id: Option<AutomationId>,
}

/// List automations, optionally restricted to one home.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAutomationsRequest {
    pub home_id: Option<HomeId>,
}

/// The loose trigger shape shared by create and update: a kind tag plus
/// whichever target/attribute fields the caller supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerSpec {
    pub trigger_type: Option<String>,
    pub schedule_id: Option<ScheduleId>,
    pub solar_event: Option<String>,
    pub device_id: Option<DeviceId>,
    pub attributes: Option<AttributePayload>,
    /// Applies to every assertion in this request; absent means `equals`
    /// on create and keep-stored on update.
    pub comparison_operator: Option<String>,
}

/// Create a trigger under an automation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTriggerRequest {
    pub automation_id: Option<AutomationId>,
    #[serde(flatten)]
    pub spec: TriggerSpec,
}

/// Update a trigger. Changing `trigger_type` drops the stale payload; the
/// new kind's target must be supplied unless it carries over.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTriggerRequest {
    pub trigger_id: Option<TriggerId>,
    #[serde(flatten)]
    pub spec: TriggerSpec,
}

/// The loose action shape shared by create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionSpec {
    pub action_type: Option<String>,
    pub device_id: Option<DeviceId>,
    pub scene_id: Option<SceneId>,
    pub notification_id: Option<NotificationId>,
    pub attributes: Option<AttributePayload>,
}

/// Create an action under an automation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddActionRequest {
    pub automation_id: Option<AutomationId>,
    #[serde(flatten)]
    pub spec: ActionSpec,
}

/// Update an action.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActionRequest {
    pub action_id: Option<ActionId>,
    #[serde(flatten)]
    pub spec: ActionSpec,
}

/// Create a schedule under an automation. Unspecified weekday flags are
/// false.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddScheduleRequest {
    pub automation_id: Option<AutomationId>,
    pub on_monday: bool,
    pub on_tuesday: bool,
    pub on_wednesday: bool,
    pub on_thursday: bool,
    pub on_friday: bool,
    pub on_saturday: bool,
    pub on_sunday: bool,
    pub onset_time: Option<String>,
}

/// Partially update a schedule. Absent flags keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScheduleRequest {
    pub schedule_id: Option<ScheduleId>,
    pub on_monday: Option<bool>,
    pub on_tuesday: Option<bool>,
    pub on_wednesday: Option<bool>,
    pub on_thursday: Option<bool>,
    pub on_friday: Option<bool>,
    pub on_saturday: Option<bool>,
    pub on_sunday: Option<bool>,
    pub onset_time: Option<String>,
}
