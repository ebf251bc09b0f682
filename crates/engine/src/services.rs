//! Use-case services — one per aggregate the engine writes.
//!
//! Every use-case follows validate-then-commit: all checks run against a
//! staged copy of the affected record, and the store is only touched once
//! nothing can fail. A rejected request leaves the store byte-for-byte
//! unchanged.

pub mod action_service;
pub mod automation_service;
pub mod schedule_service;
pub mod trigger_service;

pub use action_service::ActionService;
pub use automation_service::{AutomationService, AutomationView};
pub use schedule_service::ScheduleService;
pub use trigger_service::TriggerService;
