//! Action — the effect an automation would perform.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeAssignment;
use crate::id::{ActionId, AutomationId, DeviceId, NotificationId, SceneId};
use crate::time::Timestamp;

/// The tagged variant behind `action_type`. Exactly one target reference
/// per variant, mirroring [`TriggerKind`](crate::trigger::TriggerKind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Set attributes on a device.
    DeviceControl {
        device_id: DeviceId,
        attributes: Vec<AttributeAssignment>,
    },
    /// Activate a scene.
    SceneActivation { scene_id: SceneId },
    /// Send a pre-declared notification.
    Notification { notification_id: NotificationId },
}

impl ActionKind {
    /// The wire tags, in declaration order.
    pub const TAGS: [&'static str; 3] = ["device_control", "scene_activation", "notification"];

    /// The wire tag of this kind.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::DeviceControl { .. } => "device_control",
            Self::SceneActivation { .. } => "scene_activation",
            Self::Notification { .. } => "notification",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceControl { device_id, .. } => write!(f, "device_control({device_id})"),
            Self::SceneActivation { scene_id } => write!(f, "scene_activation({scene_id})"),
            Self::Notification { notification_id } => {
                write!(f, "notification({notification_id})")
            }
        }
    }
}

/// A stored action record owned by an automation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub automation_id: AutomationId,
    #[serde(flatten)]
    pub kind: ActionKind,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
