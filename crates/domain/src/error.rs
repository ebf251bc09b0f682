//! Common error types used across the workspace.
//!
//! Errors are layered: each failure class has its own typed enum, and
//! [`HearthError`] wraps them via `#[from]` so services can bubble any of
//! them with `?`. Nothing here is fatal — every error is recovered at the
//! operation boundary and rendered into a failure response.

use thiserror::Error;

/// Top-level error returned by every use-case.
#[derive(Debug, Error)]
pub enum HearthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A referenced record does not exist in its table.
#[derive(Debug, Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    /// Human-readable entity name, e.g. `"automation"`.
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: String,
}

/// A request violated a domain rule.
///
/// Validation is fail-fast: the first violated rule is reported, never an
/// aggregate, and a rejected request leaves the store unmodified.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required request field was absent.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// A value was outside a closed set (kind tags, statuses, enum domains).
    #[error("invalid value `{value}` for `{field}` (allowed: {})", allowed.join(", "))]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// The attribute name is not part of the device type's schema.
    #[error("device type `{device_type}` has no attribute `{attribute}`")]
    UnknownAttribute {
        device_type: String,
        attribute: String,
    },

    /// A range-domain attribute received a value that is not a number.
    #[error("attribute `{attribute}` expects a numeric value, got `{value}`")]
    InvalidNumericValue { attribute: String, value: String },

    /// A range-domain attribute received a number outside its bounds.
    #[error("attribute `{attribute}` value {value} is outside {min}..={max}")]
    OutOfRange {
        attribute: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A trigger/action request did not carry the target its kind requires.
    #[error("`{kind}` requires `{field}`")]
    MissingTarget {
        kind: &'static str,
        field: &'static str,
    },

    /// The device type string is not one of the known device types.
    #[error("unknown device type `{device_type}`")]
    UnknownDeviceType { device_type: String },

    /// Sensor-only policy: a `device_state` trigger referenced a non-sensor.
    #[error("device type `{device_type}` cannot back a device_state trigger under the sensors-only policy")]
    NotASensor { device_type: String },

    /// A schedule with every weekday flag false.
    #[error("schedule selects no days")]
    NoDaysSelected,

    /// An onset time that is not `HH:MM:SS` within 24h bounds.
    #[error("invalid onset time `{value}`, expected HH:MM:SS")]
    InvalidTimeFormat { value: String },

    /// A record name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// Name uniqueness within a home was violated.
    #[error("{entity} named `{name}` already exists in this home")]
    DuplicateName { entity: &'static str, name: String },

    /// A referenced entity belongs to a different home than the automation.
    #[error("{entity} `{id}` belongs to a different home")]
    CrossHousehold { entity: &'static str, id: String },
}

/// The store itself is malformed, e.g. an owned record referencing a
/// vanished parent.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store inconsistency: {detail}")]
    Inconsistent { detail: String },
}
