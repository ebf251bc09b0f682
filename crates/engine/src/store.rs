//! The in-memory store — typed tables behind accessor methods.
//!
//! One `HomeStore` owns every record the engine writes (automations,
//! triggers, actions, schedules) and holds read-only fixture tables for
//! the external entities those records reference. Identifier allocation is
//! `max(existing) + 1` rendered as a string, `"1"` when the table is
//! empty, so a rejected request never burns an id.

use std::collections::BTreeMap;

use hearth_domain::action::{Action, ActionKind};
use hearth_domain::automation::Automation;
use hearth_domain::device::Device;
use hearth_domain::home::{Home, Notification, Scene};
use hearth_domain::id::{
    ActionId, AutomationId, DeviceId, HomeId, NotificationId, SceneId, ScheduleId, TriggerId,
};
use hearth_domain::schedule::Schedule;
use hearth_domain::trigger::{Trigger, TriggerKind};

/// The shared mutable store passed by reference through every use-case.
#[derive(Debug, Default)]
pub struct HomeStore {
    homes: BTreeMap<HomeId, Home>,
    devices: BTreeMap<DeviceId, Device>,
    scenes: BTreeMap<SceneId, Scene>,
    notifications: BTreeMap<NotificationId, Notification>,
    automations: BTreeMap<AutomationId, Automation>,
    triggers: BTreeMap<TriggerId, Trigger>,
    actions: BTreeMap<ActionId, Action>,
    schedules: BTreeMap<ScheduleId, Schedule>,
}

impl HomeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Fixture seeding. External entities are inserted as-is; the engine
    // never mutates them afterwards.

    pub fn seed_home(&mut self, home: Home) {
        self.homes.insert(home.id.clone(), home);
    }

    pub fn seed_device(&mut self, device: Device) {
        self.devices.insert(device.id.clone(), device);
    }

    pub fn seed_scene(&mut self, scene: Scene) {
        self.scenes.insert(scene.id.clone(), scene);
    }

    pub fn seed_notification(&mut self, notification: Notification) {
        self.notifications
            .insert(notification.id.clone(), notification);
    }

    // Collaborator lookups (read-only).

    #[must_use]
    pub fn home(&self, id: &HomeId) -> Option<&Home> {
        self.homes.get(id)
    }

    /// The display name of a home, when it exists.
    #[must_use]
    pub fn home_name(&self, id: &HomeId) -> Option<&str> {
        self.homes.get(id).map(|home| home.name.as_str())
    }

    #[must_use]
    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.get(id)
    }

    #[must_use]
    pub fn scene(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    #[must_use]
    pub fn notification(&self, id: &NotificationId) -> Option<&Notification> {
        self.notifications.get(id)
    }

    // Owned tables.

    #[must_use]
    pub fn automation(&self, id: &AutomationId) -> Option<&Automation> {
        self.automations.get(id)
    }

    pub fn automations(&self) -> impl Iterator<Item = &Automation> {
        self.automations.values()
    }

    /// Insert or replace an automation record.
    pub fn put_automation(&mut self, automation: Automation) {
        self.automations.insert(automation.id.clone(), automation);
    }

    #[must_use]
    pub fn trigger(&self, id: &TriggerId) -> Option<&Trigger> {
        self.triggers.get(id)
    }

    pub fn triggers_of<'a>(
        &'a self,
        automation_id: &'a AutomationId,
    ) -> impl Iterator<Item = &'a Trigger> + 'a {
        self.triggers
            .values()
            .filter(move |trigger| trigger.automation_id == *automation_id)
    }

    pub fn put_trigger(&mut self, trigger: Trigger) {
        self.triggers.insert(trigger.id.clone(), trigger);
    }

    #[must_use]
    pub fn action(&self, id: &ActionId) -> Option<&Action> {
        self.actions.get(id)
    }

    pub fn actions_of<'a>(
        &'a self,
        automation_id: &'a AutomationId,
    ) -> impl Iterator<Item = &'a Action> + 'a {
        self.actions
            .values()
            .filter(move |action| action.automation_id == *automation_id)
    }

    pub fn put_action(&mut self, action: Action) {
        self.actions.insert(action.id.clone(), action);
    }

    #[must_use]
    pub fn schedule(&self, id: &ScheduleId) -> Option<&Schedule> {
        self.schedules.get(id)
    }

    pub fn schedules_of<'a>(
        &'a self,
        automation_id: &'a AutomationId,
    ) -> impl Iterator<Item = &'a Schedule> + 'a {
        self.schedules
            .values()
            .filter(move |schedule| schedule.automation_id == *automation_id)
    }

    pub fn put_schedule(&mut self, schedule: Schedule) {
        self.schedules.insert(schedule.id.clone(), schedule);
    }

    // Identifier allocation.

    #[must_use]
    pub fn next_automation_id(&self) -> AutomationId {
        AutomationId::new(next_id(self.automations.keys().map(AutomationId::sequence)))
    }

    #[must_use]
    pub fn next_trigger_id(&self) -> TriggerId {
        TriggerId::new(next_id(self.triggers.keys().map(TriggerId::sequence)))
    }

    #[must_use]
    pub fn next_action_id(&self) -> ActionId {
        ActionId::new(next_id(self.actions.keys().map(ActionId::sequence)))
    }

    #[must_use]
    pub fn next_schedule_id(&self) -> ScheduleId {
        ScheduleId::new(next_id(self.schedules.keys().map(ScheduleId::sequence)))
    }

    /// Next free counter for trigger-side attribute records, across all
    /// triggers.
    #[must_use]
    pub fn next_assertion_seq(&self) -> u64 {
        next_seq(self.triggers.values().flat_map(|trigger| {
            match &trigger.kind {
                TriggerKind::DeviceState { attributes, .. } => attributes.as_slice(),
                _ => &[],
            }
            .iter()
            .map(|record| record.id.sequence())
        }))
    }

    /// Next free counter for action-side attribute records, across all
    /// actions.
    #[must_use]
    pub fn next_assignment_seq(&self) -> u64 {
        next_seq(self.actions.values().flat_map(|action| {
            match &action.kind {
                ActionKind::DeviceControl { attributes, .. } => attributes.as_slice(),
                _ => &[],
            }
            .iter()
            .map(|record| record.id.sequence())
        }))
    }

    // Name uniqueness — the cross-cutting rule for every create/rename
    // path: case-sensitive exact match against all siblings excluding self.

    #[must_use]
    pub fn automation_name_taken(
        &self,
        home_id: &HomeId,
        name: &str,
        exclude: Option<&AutomationId>,
    ) -> bool {
        self.automations.values().any(|automation| {
            automation.home_id == *home_id
                && automation.name == name
                && Some(&automation.id) != exclude
        })
    }
}

fn next_seq(existing: impl Iterator<Item = Option<u64>>) -> u64 {
    existing.flatten().max().unwrap_or(0) + 1
}

fn next_id(existing: impl Iterator<Item = Option<u64>>) -> String {
    next_seq(existing).to_string()
}
