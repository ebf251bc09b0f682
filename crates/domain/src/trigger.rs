//! Trigger — the condition that would fire an automation.
//!
//! The kind is a closed tagged union: each variant carries exactly the
//! target reference its `trigger_type` requires, so an inconsistent
//! combination is unrepresentable once a record exists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeAssertion;
use crate::id::{AutomationId, DeviceId, ScheduleId, TriggerId};
use crate::time::Timestamp;

/// The solar events a [`TriggerKind::SolarEvent`] trigger can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarEvent {
    Sunrise,
    Sunset,
}

impl fmt::Display for SolarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunrise => f.write_str("sunrise"),
            Self::Sunset => f.write_str("sunset"),
        }
    }
}

impl std::str::FromStr for SolarEvent {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunrise" => Ok(Self::Sunrise),
            "sunset" => Ok(Self::Sunset),
            other => Err(crate::error::ValidationError::InvalidEnumValue {
                field: "solar_event".to_string(),
                value: other.to_string(),
                allowed: vec!["sunrise".to_string(), "sunset".to_string()],
            }),
        }
    }
}

/// The tagged variant behind `trigger_type`. Exactly one target reference
/// per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "trigger_type", rename_all = "snake_case")]
pub enum TriggerKind {
    /// Fires on a weekly schedule.
    TimeBased { schedule_id: ScheduleId },
    /// Fires at sunrise/sunset, offset per the referenced schedule.
    SolarEvent {
        solar_event: SolarEvent,
        schedule_id: ScheduleId,
    },
    /// Fires when a device's attributes satisfy the assertions.
    DeviceState {
        device_id: DeviceId,
        attributes: Vec<AttributeAssertion>,
    },
    /// Fires only when invoked explicitly.
    Manual,
}

impl TriggerKind {
    /// The wire tags, in declaration order.
    pub const TAGS: [&'static str; 4] = ["time_based", "solar_event", "device_state", "manual"];

    /// The wire tag of this kind.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::TimeBased { .. } => "time_based",
            Self::SolarEvent { .. } => "solar_event",
            Self::DeviceState { .. } => "device_state",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeBased { schedule_id } => write!(f, "time_based({schedule_id})"),
            Self::SolarEvent {
                solar_event,
                schedule_id,
            } => write!(f, "solar_event({solar_event}, {schedule_id})"),
            Self::DeviceState { device_id, .. } => write!(f, "device_state({device_id})"),
            Self::Manual => f.write_str("manual"),
        }
    }
}

/// A stored trigger record owned by an automation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: TriggerId,
    pub automation_id: AutomationId,
    #[serde(flatten)]
    pub kind: TriggerKind,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_tag_every_kind_with_its_wire_name() {
        let kinds = [
            TriggerKind::TimeBased {
                schedule_id: ScheduleId::new("1"),
            },
            TriggerKind::SolarEvent {
                solar_event: SolarEvent::Sunset,
                schedule_id: ScheduleId::new("1"),
            },
            TriggerKind::DeviceState {
                device_id: DeviceId::new("4"),
                attributes: Vec::new(),
            },
            TriggerKind::Manual,
        ];
        for (kind, tag) in kinds.iter().zip(TriggerKind::TAGS) {
            assert_eq!(kind.tag(), tag);
        }
    }

    #[test]
    fn should_serialize_kind_under_trigger_type_tag() {
        let kind = TriggerKind::SolarEvent {
            solar_event: SolarEvent::Sunrise,
            schedule_id: ScheduleId::new("9"),
        };
        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(
            value,
            json!({
                "trigger_type": "solar_event",
                "solar_event": "sunrise",
                "schedule_id": "9"
            })
        );
    }

    #[test]
    fn should_deserialize_manual_kind_from_tag_alone() {
        let kind: TriggerKind =
            serde_json::from_value(json!({"trigger_type": "manual"})).unwrap();
        assert_eq!(kind, TriggerKind::Manual);
    }

    #[test]
    fn should_reject_payload_missing_its_required_target() {
        let result: Result<TriggerKind, _> =
            serde_json::from_value(json!({"trigger_type": "time_based"}));
        assert!(result.is_err());
    }

    #[test]
    fn should_flatten_kind_into_trigger_record() {
        let trigger = Trigger {
            id: TriggerId::new("2"),
            automation_id: AutomationId::new("1"),
            kind: TriggerKind::TimeBased {
                schedule_id: ScheduleId::new("3"),
            },
            created_at: crate::time::now(),
            updated_at: crate::time::now(),
        };
        let value = serde_json::to_value(&trigger).unwrap();
        assert_eq!(value["trigger_type"], "time_based");
        assert_eq!(value["schedule_id"], "3");
        assert_eq!(value["automation_id"], "1");
    }

    #[test]
    fn should_display_trigger_kinds() {
        assert_eq!(
            TriggerKind::DeviceState {
                device_id: DeviceId::new("7"),
                attributes: Vec::new(),
            }
            .to_string(),
            "device_state(7)"
        );
        assert_eq!(TriggerKind::Manual.to_string(), "manual");
    }
}
