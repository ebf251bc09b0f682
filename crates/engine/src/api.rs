//! The engine's operation surface.
//!
//! Requests arrive as tagged JSON objects (`"op"` selects the operation)
//! and every reply is an envelope: `{"success": true, <key>: <payload>}`
//! on success, `{"success": false, "error": <message>}` on any failure,
//! including requests that do not deserialize.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hearth_domain::error::HearthError;

use crate::requests::{
    AddActionRequest, AddAutomationRequest, AddScheduleRequest, AddTriggerRequest,
    GetAutomationRequest, ListAutomationsRequest, UpdateActionRequest, UpdateAutomationRequest,
    UpdateScheduleRequest, UpdateTriggerRequest,
};
use crate::services::{ActionService, AutomationService, ScheduleService, TriggerService};
use crate::settings::EngineSettings;
use crate::store::HomeStore;

/// One operation, tagged by `op`.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ApiRequest {
    AddAutomation(AddAutomationRequest),
    UpdateAutomation(UpdateAutomationRequest),
    GetAutomation(GetAutomationRequest),
    ListAutomations(ListAutomationsRequest),
    AddTrigger(AddTriggerRequest),
    UpdateTrigger(UpdateTriggerRequest),
    AddAction(AddActionRequest),
    UpdateAction(UpdateActionRequest),
    AddSchedule(AddScheduleRequest),
    UpdateSchedule(UpdateScheduleRequest),
}

/// The assembled engine: the store plus one service per aggregate.
#[derive(Debug, Default)]
pub struct Engine {
    store: HomeStore,
    automations: AutomationService,
    triggers: TriggerService,
    actions: ActionService,
    schedules: ScheduleService,
}

impl Engine {
    #[must_use]
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_store(settings, HomeStore::new())
    }

    /// Build an engine over a pre-seeded store.
    #[must_use]
    pub fn with_store(settings: EngineSettings, store: HomeStore) -> Self {
        Self {
            store,
            automations: AutomationService::new(),
            triggers: TriggerService::new(settings.trigger_device_policy),
            actions: ActionService::new(),
            schedules: ScheduleService::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &HomeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut HomeStore {
        &mut self.store
    }

    /// Run one operation and wrap the outcome in a reply envelope.
    #[tracing::instrument(skip(self, request))]
    pub fn dispatch(&mut self, request: ApiRequest) -> Value {
        match request {
            ApiRequest::AddAutomation(req) => {
                envelope("automation", self.automations.add_automation(&mut self.store, req))
            }
            ApiRequest::UpdateAutomation(req) => {
                envelope("automation", self.automations.update_automation(&mut self.store, req))
            }
            ApiRequest::GetAutomation(req) => {
                envelope("automation", self.automations.get_automation(&self.store, req))
            }
            ApiRequest::ListAutomations(req) => envelope::<_, HearthError>(
                "automations",
                Ok(self.automations.list_automations(&self.store, &req)),
            ),
            ApiRequest::AddTrigger(req) => {
                envelope("trigger", self.triggers.add_trigger(&mut self.store, req))
            }
            ApiRequest::UpdateTrigger(req) => {
                envelope("trigger", self.triggers.update_trigger(&mut self.store, req))
            }
            ApiRequest::AddAction(req) => {
                envelope("action", self.actions.add_action(&mut self.store, req))
            }
            ApiRequest::UpdateAction(req) => {
                envelope("action", self.actions.update_action(&mut self.store, req))
            }
            ApiRequest::AddSchedule(req) => {
                envelope("schedule", self.schedules.add_schedule(&mut self.store, req))
            }
            ApiRequest::UpdateSchedule(req) => {
                envelope("schedule", self.schedules.update_schedule(&mut self.store, req))
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch), starting from raw JSON. A body
    /// that does not deserialize becomes a failure envelope, never an
    /// abort.
    pub fn dispatch_value(&mut self, raw: Value) -> Value {
        match serde_json::from_value(raw) {
            Ok(request) => self.dispatch(request),
            Err(err) => failure(&err.to_string()),
        }
    }
}

fn envelope<T: Serialize, E: std::fmt::Display>(key: &'static str, result: Result<T, E>) -> Value {
    match result {
        Ok(payload) => match serde_json::to_value(payload) {
            Ok(value) => {
                let mut reply = serde_json::Map::new();
                reply.insert("success".to_string(), Value::Bool(true));
                reply.insert(key.to_string(), value);
                Value::Object(reply)
            }
            Err(err) => failure(&err.to_string()),
        },
        Err(err) => {
            tracing::debug!(error = %err, "operation rejected");
            failure(&err.to_string())
        }
    }
}

fn failure(message: &str) -> Value {
    serde_json::json!({"success": false, "error": message})
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_domain::device::Device;
    use hearth_domain::home::{Home, Notification, Scene};
    use hearth_domain::id::{DeviceId, HomeId, NotificationId, SceneId};
    use serde_json::json;

    fn engine() -> Engine {
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
        store.seed_scene(Scene {
            id: SceneId::new("1"),
            name: "Movie night".to_string(),
            home_id: HomeId::new("1"),
        });
        store.seed_notification(Notification {
            id: NotificationId::new("1"),
            home_id: HomeId::new("1"),
            message: "Door unlocked".to_string(),
        });
        Engine::with_store(EngineSettings::default(), store)
    }

    fn seeded_automation(engine: &mut Engine) -> String {
        let reply = engine.dispatch_value(json!({
            "op": "add_automation",
            "home_id": "1",
            "created_by": "5",
            "name": "Evening lights"
        }));
        assert_eq!(reply["success"], json!(true));
        reply["automation"]["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn should_wrap_success_under_operation_key() {
        let mut engine = engine();
        let reply = engine.dispatch_value(json!({
            "op": "add_automation",
            "home_id": "1",
            "created_by": "5",
            "name": "Evening lights"
        }));
        assert_eq!(reply["success"], json!(true));
        assert_eq!(reply["automation"]["name"], json!("Evening lights"));
        assert_eq!(reply["automation"]["status"], json!("enabled"));
    }

    #[test]
    fn should_wrap_rejection_with_message() {
        let mut engine = engine();
        let reply = engine.dispatch_value(json!({
            "op": "add_automation",
            "home_id": "404",
            "created_by": "5",
            "name": "Evening lights"
        }));
        assert_eq!(reply["success"], json!(false));
        assert!(reply["error"].as_str().unwrap().contains("home"));
    }

    #[test]
    fn should_wrap_undeserializable_request_as_failure() {
        let mut engine = engine();
        let reply = engine.dispatch_value(json!({"op": "defragment_home"}));
        assert_eq!(reply["success"], json!(false));
        assert!(reply["error"].is_string());
    }

    #[test]
    fn should_reject_out_of_range_brightness_with_bounds() {
        let mut engine = engine();
        let automation_id = seeded_automation(&mut engine);
        let reply = engine.dispatch_value(json!({
            "op": "add_action",
            "automation_id": automation_id,
            "action_type": "device_control",
            "device_id": "10",
            "attributes": {"brightness": 150}
        }));
        assert_eq!(reply["success"], json!(false));
        let message = reply["error"].as_str().unwrap();
        assert!(message.contains("brightness"));
        assert!(message.contains('0') && message.contains("100"));
    }

    #[test]
    fn should_reject_unknown_enum_member_listing_allowed() {
        let mut engine = engine();
        let automation_id = seeded_automation(&mut engine);
        let reply = engine.dispatch_value(json!({
            "op": "add_trigger",
            "automation_id": automation_id,
            "trigger_type": "device_state",
            "device_id": "11",
            "attributes": {"mode": "freezing"}
        }));
        assert_eq!(reply["success"], json!(false));
        let message = reply["error"].as_str().unwrap();
        assert!(message.contains("heating") && message.contains("cooling") && message.contains("idle"));
    }

    #[test]
    fn should_reject_solar_trigger_missing_its_event() {
        let mut engine = engine();
        let automation_id = seeded_automation(&mut engine);
        let reply = engine.dispatch_value(json!({
            "op": "add_schedule",
            "automation_id": automation_id,
            "on_monday": true,
            "onset_time": "06:45:00"
        }));
        assert_eq!(reply["success"], json!(true));
        let schedule_id = reply["schedule"]["id"].as_str().unwrap().to_string();

        let reply = engine.dispatch_value(json!({
            "op": "add_trigger",
            "automation_id": automation_id,
            "trigger_type": "solar_event",
            "schedule_id": schedule_id
        }));
        assert_eq!(reply["success"], json!(false));
        assert!(reply["error"].as_str().unwrap().contains("solar_event"));
    }

    #[test]
    fn should_keep_attribute_record_id_across_repeated_writes() {
        let mut engine = engine();
        let automation_id = seeded_automation(&mut engine);
        let reply = engine.dispatch_value(json!({
            "op": "add_action",
            "automation_id": automation_id,
            "action_type": "device_control",
            "device_id": "10",
            "attributes": {"brightness": 75}
        }));
        assert_eq!(reply["success"], json!(true));
        let action_id = reply["action"]["id"].as_str().unwrap().to_string();
        let first = reply["action"]["attributes"][0].clone();
        assert_eq!(first["attribute_value"], json!(75.0));

        let reply = engine.dispatch_value(json!({
            "op": "update_action",
            "action_id": action_id,
            "attributes": {"brightness": 40}
        }));
        assert_eq!(reply["success"], json!(true));
        let records = reply["action"]["attributes"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], first["id"]);
        assert_eq!(records[0]["attribute_value"], json!(40.0));
        assert_eq!(records[0]["created_at"], first["created_at"]);
    }

    #[test]
    fn should_compose_automation_with_owned_records_on_read() {
        let mut engine = engine();
        let automation_id = seeded_automation(&mut engine);
        let reply = engine.dispatch_value(json!({
            "op": "add_schedule",
            "automation_id": automation_id,
            "on_saturday": true,
            "on_sunday": true,
            "onset_time": "08:00:00"
        }));
        let schedule_id = reply["schedule"]["id"].as_str().unwrap().to_string();
        engine.dispatch_value(json!({
            "op": "add_trigger",
            "automation_id": automation_id,
            "trigger_type": "time_based",
            "schedule_id": schedule_id
        }));
        engine.dispatch_value(json!({
            "op": "add_action",
            "automation_id": automation_id,
            "action_type": "scene_activation",
            "scene_id": "1"
        }));

        let reply = engine.dispatch_value(json!({
            "op": "get_automation",
            "automation_id": automation_id
        }));
        assert_eq!(reply["success"], json!(true));
        let automation = &reply["automation"];
        assert_eq!(automation["name"], json!("Evening lights"));
        assert_eq!(automation["triggers"].as_array().unwrap().len(), 1);
        assert_eq!(
            automation["triggers"][0]["trigger_type"],
            json!("time_based")
        );
        assert_eq!(automation["actions"].as_array().unwrap().len(), 1);
        assert_eq!(
            automation["actions"][0]["action_type"],
            json!("scene_activation")
        );
        assert_eq!(automation["schedules"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn should_list_automations_scoped_to_home() {
        let mut engine = engine();
        seeded_automation(&mut engine);
        let reply = engine.dispatch_value(json!({"op": "list_automations", "home_id": "1"}));
        assert_eq!(reply["success"], json!(true));
        assert_eq!(reply["automations"].as_array().unwrap().len(), 1);

        let reply = engine.dispatch_value(json!({"op": "list_automations", "home_id": "2"}));
        assert_eq!(reply["automations"].as_array().unwrap().len(), 0);
    }
}
