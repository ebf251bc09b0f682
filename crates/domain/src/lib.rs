//! # hearth-domain
//!
//! Pure domain model for the hearth smart-home fixture backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Automations** (named if-this-then-that rules scoped to a home)
//! - Define **Triggers** and **Actions** (closed tagged variants whose
//!   payload is fixed by their kind)
//! - Define **Device type schemas** (the attribute-name → value-domain
//!   contract for each device category) and attribute validation
//! - Define **Schedules** (weekday flags + onset time) and their invariants
//! - Define read-only views of external entities (homes, devices, scenes,
//!   notifications)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `engine` or the binary. All storage
//! and orchestration live above this crate.

pub mod error;
pub mod id;
pub mod time;

pub mod attribute;
pub mod automation;
pub mod device;
pub mod home;
pub mod schedule;
pub mod schema;

pub mod action;
pub mod trigger;
