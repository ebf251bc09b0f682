//! Device — read-only view of an externally managed device.
//!
//! The engine never mutates devices; it only reads existence, type, and
//! home membership. `device_type` stays a string here because device rows
//! are fixture data — the checker parses it into
//! [`DeviceType`](crate::schema::DeviceType) at the validation boundary so
//! an unknown type surfaces as a typed error, not a seed failure.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, HomeId};

/// An externally managed device referenced by triggers and actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub device_type: String,
    pub home_id: HomeId,
}
