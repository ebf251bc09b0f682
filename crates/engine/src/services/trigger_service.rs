//! Trigger service — use-cases for attaching triggers to automations.

use hearth_domain::error::{HearthError, NotFoundError, StoreError, ValidationError};
use hearth_domain::time::{self, Timestamp};
use hearth_domain::trigger::{Trigger, TriggerKind};

use crate::attribute_store;
use crate::requests::{AddTriggerRequest, UpdateTriggerRequest};
use crate::settings::TriggerDevicePolicy;
use crate::store::HomeStore;
use crate::variant::{self, TriggerBlueprint};

/// Application service for trigger create/update.
#[derive(Debug, Default)]
pub struct TriggerService {
    policy: TriggerDevicePolicy,
}

impl TriggerService {
    #[must_use]
    pub fn new(policy: TriggerDevicePolicy) -> Self {
        Self { policy }
    }

    /// Create a trigger under an automation. The spec is fully checked
    /// before any record is materialized.
    ///
    /// # Errors
    ///
    /// `MissingField` for an absent `automation_id` or kind tag, `NotFound`
    /// for a dangling automation or target, plus every variant-consistency
    /// and attribute-domain error of the checker.
    #[tracing::instrument(skip(self, store, req))]
    pub fn add_trigger(
        &self,
        store: &mut HomeStore,
        req: AddTriggerRequest,
    ) -> Result<Trigger, HearthError> {
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

        let blueprint = variant::check_trigger(store, &automation, &req.spec, None, self.policy)?;

        let now = time::now();
        let trigger = Trigger {
            id: store.next_trigger_id(),
            automation_id: automation.id,
            kind: materialize(store, blueprint, Vec::new(), now),
            created_at: now,
            updated_at: now,
        };
        store.put_trigger(trigger.clone());
        tracing::info!(trigger_id = %trigger.id, kind = trigger.kind.tag(), "trigger created");
        Ok(trigger)
    }

    /// Update a trigger. Fields the request omits carry over from the
    /// stored record as long as the kind is unchanged; a kind change drops
    /// the old payload. Attribute records survive an update that keeps the
    /// `device_state` kind, merged with the request's pairs by name.
    ///
    /// # Errors
    ///
    /// As [`add_trigger`](Self::add_trigger), plus `Store(Inconsistent)`
    /// when the trigger's owning automation row has vanished.
    #[tracing::instrument(skip(self, store, req))]
    pub fn update_trigger(
        &self,
        store: &mut HomeStore,
        req: UpdateTriggerRequest,
    ) -> Result<Trigger, HearthError> {
        let trigger_id = req.trigger_id.ok_or(ValidationError::MissingField {
            field: "trigger_id",
        })?;
        let mut trigger = store
            .trigger(&trigger_id)
            .cloned()
            .ok_or_else(|| NotFoundError {
                entity: "trigger",
                id: trigger_id.to_string(),
            })?;
        let automation = store
            .automation(&trigger.automation_id)
            .cloned()
            .ok_or_else(|| StoreError::Inconsistent {
                detail: format!(
                    "trigger `{trigger_id}` references missing automation `{}`",
                    trigger.automation_id
                ),
            })?;

        let blueprint =
            variant::check_trigger(store, &automation, &req.spec, Some(&trigger.kind), self.policy)?;

        // Carried attribute records stay only across a device_state-to-
        // device_state update. Retargeting to another device re-validates
        // the merged state against the new schema before anything commits.
        let carried = match (&trigger.kind, &blueprint) {
            (
                TriggerKind::DeviceState {
                    device_id: old_device,
                    attributes,
                },
                TriggerBlueprint::DeviceState {
                    device_id,
                    device_type,
                    ..
                },
            ) => {
                if old_device != device_id {
                    variant::revalidate_assertions(*device_type, attributes)?;
                }
                attributes.clone()
            }
            _ => Vec::new(),
        };

        let now = time::now();
        trigger.kind = materialize(store, blueprint, carried, now);
        trigger.updated_at = now;
        store.put_trigger(trigger.clone());
        Ok(trigger)
    }
}

/// Turn a validated blueprint into a stored kind, upserting attribute pairs
/// into the carried records. Runs after every check has passed, so it is
/// infallible.
fn materialize(
    store: &HomeStore,
    blueprint: TriggerBlueprint,
    carried: Vec<hearth_domain::attribute::AttributeAssertion>,
    now: Timestamp,
) -> TriggerKind {
    match blueprint {
        TriggerBlueprint::TimeBased { schedule_id } => TriggerKind::TimeBased { schedule_id },
        TriggerBlueprint::SolarEvent {
            solar_event,
            schedule_id,
        } => TriggerKind::SolarEvent {
            solar_event,
            schedule_id,
        },
        TriggerBlueprint::DeviceState {
            device_id,
            pairs,
            operator,
            ..
        } => {
            let mut attributes = carried;
            let mut seq = store.next_assertion_seq();
            for (name, value) in pairs {
                attribute_store::upsert_assertion(
                    &mut attributes,
                    &name,
                    value,
                    operator,
                    &mut seq,
                    now,
                );
            }
            TriggerKind::DeviceState {
                device_id,
                attributes,
            }
        }
        TriggerBlueprint::Manual => TriggerKind::Manual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_domain::attribute::{AttributeValue, ComparisonOperator};
    use hearth_domain::automation::{Automation, AutomationStatus};
    use hearth_domain::device::Device;
    use hearth_domain::home::Home;
    use hearth_domain::id::{AutomationId, DeviceId, HomeId, ScheduleId, TriggerId, UserId};
    use hearth_domain::schedule::Schedule;
    use hearth_domain::trigger::SolarEvent;
    use serde_json::json;

    fn fixture() -> HomeStore {
        let mut store = HomeStore::new();
        store.seed_home(Home {
            id: HomeId::new("1"),
            name: "Maple Street".to_string(),
        });
        for (id, ty) in [("10", "bulb"), ("11", "thermostat"), ("12", "motion_sensor")] {
            store.seed_device(Device {
                id: DeviceId::new(id),
                name: format!("device {id}"),
                device_type: ty.to_string(),
                home_id: HomeId::new("1"),
            });
        }
        store.put_automation(Automation {
            id: AutomationId::new("1"),
            home_id: HomeId::new("1"),
            created_by: UserId::new("1"),
            name: "Fixture".to_string(),
            status: AutomationStatus::Enabled,
            description: String::new(),
        });
        store.put_schedule(Schedule {
            id: ScheduleId::new("1"),
            automation_id: AutomationId::new("1"),
            on_monday: true,
            on_tuesday: false,
            on_wednesday: false,
            on_thursday: false,
            on_friday: false,
            on_saturday: false,
            on_sunday: false,
            onset_time: "07:00:00".to_string(),
        });
        store
    }

    fn add(store: &mut HomeStore, body: serde_json::Value) -> Result<Trigger, HearthError> {
        let req: AddTriggerRequest = serde_json::from_value(body).unwrap();
        TriggerService::default().add_trigger(store, req)
    }

    fn update(store: &mut HomeStore, body: serde_json::Value) -> Result<Trigger, HearthError> {
        let req: UpdateTriggerRequest = serde_json::from_value(body).unwrap();
        TriggerService::default().update_trigger(store, req)
    }

    #[test]
    fn should_create_device_state_trigger_with_attribute_records() {
        let mut store = fixture();
        let trigger = add(
            &mut store,
            json!({
                "automation_id": "1",
                "trigger_type": "device_state",
                "device_id": "10",
                "attributes": {"power": "on", "brightness": 75}
            }),
        )
        .unwrap();

        assert_eq!(trigger.id, TriggerId::new("1"));
        let TriggerKind::DeviceState { device_id, attributes } = &trigger.kind else {
            panic!("expected device_state, got {}", trigger.kind.tag());
        };
        assert_eq!(device_id, &DeviceId::new("10"));
        assert_eq!(attributes.len(), 2);
        assert!(attributes
            .iter()
            .all(|record| record.operator == ComparisonOperator::Equals));
    }

    #[test]
    fn should_reject_create_without_automation() {
        let mut store = fixture();
        let err = add(
            &mut store,
            json!({"automation_id": "404", "trigger_type": "manual"}),
        )
        .unwrap_err();
        assert!(matches!(err, HearthError::NotFound(_)));
    }

    #[test]
    fn should_not_store_anything_when_validation_fails() {
        let mut store = fixture();
        let err = add(
            &mut store,
            json!({
                "automation_id": "1",
                "trigger_type": "device_state",
                "device_id": "10",
                "attributes": {"power": "on", "brightness": 150}
            }),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            HearthError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(store.triggers_of(&AutomationId::new("1")).count(), 0);
    }

    #[test]
    fn should_upsert_attribute_on_update_keeping_record_id() {
        let mut store = fixture();
        let created = add(
            &mut store,
            json!({
                "automation_id": "1",
                "trigger_type": "device_state",
                "device_id": "10",
                "attributes": {"brightness": 75}
            }),
        )
        .unwrap();

        let updated = update(
            &mut store,
            json!({
                "trigger_id": created.id.as_str(),
                "attributes": {"brightness": 40}
            }),
        )
        .unwrap();

        let TriggerKind::DeviceState { attributes, .. } = &updated.kind else {
            panic!("kind changed unexpectedly");
        };
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].value, AttributeValue::Number(40.0));
        let TriggerKind::DeviceState { attributes: before, .. } = &created.kind else {
            unreachable!();
        };
        assert_eq!(attributes[0].id, before[0].id);
        assert_eq!(attributes[0].created_at, before[0].created_at);
    }

    #[test]
    fn should_preserve_operator_when_update_omits_it() {
        let mut store = fixture();
        let created = add(
            &mut store,
            json!({
                "automation_id": "1",
                "trigger_type": "device_state",
                "device_id": "11",
                "attributes": {"target_temperature": 21},
                "comparison_operator": "greater_than"
            }),
        )
        .unwrap();

        let updated = update(
            &mut store,
            json!({
                "trigger_id": created.id.as_str(),
                "attributes": {"target_temperature": 24}
            }),
        )
        .unwrap();
        let TriggerKind::DeviceState { attributes, .. } = &updated.kind else {
            unreachable!();
        };
        assert_eq!(attributes[0].operator, ComparisonOperator::GreaterThan);
        assert_eq!(attributes[0].value, AttributeValue::Number(24.0));
    }

    #[test]
    fn should_drop_attribute_records_on_kind_transition() {
        let mut store = fixture();
        let created = add(
            &mut store,
            json!({
                "automation_id": "1",
                "trigger_type": "device_state",
                "device_id": "10",
                "attributes": {"power": "on"}
            }),
        )
        .unwrap();

        let updated = update(
            &mut store,
            json!({
                "trigger_id": created.id.as_str(),
                "trigger_type": "time_based",
                "schedule_id": "1"
            }),
        )
        .unwrap();
        assert_eq!(
            updated.kind,
            TriggerKind::TimeBased {
                schedule_id: ScheduleId::new("1")
            }
        );

        // Moving back requires an explicit device again.
        let err = update(
            &mut store,
            json!({"trigger_id": created.id.as_str(), "trigger_type": "device_state"}),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            HearthError::Validation(ValidationError::MissingTarget {
                field: "device_id",
                ..
            })
        ));
    }

    #[test]
    fn should_carry_solar_event_when_kind_unchanged() {
        let mut store = fixture();
        let created = add(
            &mut store,
            json!({
                "automation_id": "1",
                "trigger_type": "solar_event",
                "solar_event": "sunset",
                "schedule_id": "1"
            }),
        )
        .unwrap();

        let updated = update(
            &mut store,
            json!({"trigger_id": created.id.as_str(), "schedule_id": "1"}),
        )
        .unwrap();
        assert_eq!(
            updated.kind,
            TriggerKind::SolarEvent {
                solar_event: SolarEvent::Sunset,
                schedule_id: ScheduleId::new("1")
            }
        );
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn should_reject_retarget_when_carried_records_break_new_schema() {
        let mut store = fixture();
        let created = add(
            &mut store,
            json!({
                "automation_id": "1",
                "trigger_type": "device_state",
                "device_id": "10",
                "attributes": {"brightness": 75}
            }),
        )
        .unwrap();

        // brightness has no meaning on a thermostat; the merged state is
        // rejected and the trigger keeps its old target.
        let err = update(
            &mut store,
            json!({"trigger_id": created.id.as_str(), "device_id": "11"}),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            HearthError::Validation(ValidationError::UnknownAttribute { .. })
        ));
        let stored = store.trigger(&created.id).unwrap();
        assert!(matches!(
            &stored.kind,
            TriggerKind::DeviceState { device_id, .. } if *device_id == DeviceId::new("10")
        ));
    }

    #[test]
    fn should_enforce_sensor_policy_when_configured() {
        let mut store = fixture();
        let svc = TriggerService::new(TriggerDevicePolicy::SensorsOnly);
        let req: AddTriggerRequest = serde_json::from_value(json!({
            "automation_id": "1",
            "trigger_type": "device_state",
            "device_id": "10",
            "attributes": {"power": "on"}
        }))
        .unwrap();
        assert!(matches!(
            svc.add_trigger(&mut store, req).unwrap_err(),
            HearthError::Validation(ValidationError::NotASensor { .. })
        ));

        let req: AddTriggerRequest = serde_json::from_value(json!({
            "automation_id": "1",
            "trigger_type": "device_state",
            "device_id": "12",
            "attributes": {"motion": "detected"}
        }))
        .unwrap();
        assert!(svc.add_trigger(&mut store, req).is_ok());
    }
}
