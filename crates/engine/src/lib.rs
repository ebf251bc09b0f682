//! # hearth-engine
//!
//! Application layer — the in-memory store, use-case services, and the
//! request/response surface of the fixture backend.
//!
//! ## Responsibilities
//! - Own the **store**: typed tables for automations, triggers, actions,
//!   and schedules, plus read-only tables for the external entities they
//!   reference (homes, devices, scenes, notifications)
//! - Enforce **variant consistency**: a trigger/action kind fixes which
//!   single target reference must be populated and which device attributes
//!   are legal
//! - Provide **use-case services** (create/update automations, triggers,
//!   actions, schedules) with validate-then-commit semantics: a rejected
//!   request leaves the store untouched
//! - Expose the **request surface**: an `op`-tagged request enum dispatched
//!   into a `{"success": ...}` JSON envelope
//!
//! ## Concurrency model
//! Single-threaded and synchronous. Every operation is a plain function
//! over `&mut HomeStore`; callers serialize access externally.
//!
//! ## Dependency rule
//! Depends on `hearth-domain` only. The binary depends on this crate, not
//! the reverse.

pub mod api;
pub mod attribute_store;
pub mod requests;
pub mod services;
pub mod settings;
pub mod store;
pub mod variant;
