//! Attribute values, records, and the stateless attribute validator.
//!
//! Triggers assert attribute values (with a comparison operator); actions
//! assign them. Both kinds of record are owned 1:N by their parent and
//! keyed by attribute name for upsert purposes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::AttributeId;
use crate::schema::{DeviceType, Domain};
use crate::time::Timestamp;

/// A validated attribute value: the typed result of checking a raw JSON
/// value against its schema domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => n.fmt(f),
        }
    }
}

/// The predicate applied by a trigger-side attribute assertion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    #[default]
    Equals,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
}

impl ComparisonOperator {
    const ALL: [Self; 5] = [
        Self::Equals,
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterEqual,
        Self::LessEqual,
    ];

    /// The wire name of this operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::GreaterEqual => "greater_equal",
            Self::LessEqual => "less_equal",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComparisonOperator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidEnumValue {
                field: "comparison_operator".to_string(),
                value: s.to_string(),
                allowed: Self::ALL.iter().map(ToString::to_string).collect(),
            })
    }
}

/// A trigger-side `(name, value, operator)` predicate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeAssertion {
    pub id: AttributeId,
    #[serde(rename = "attribute_name")]
    pub name: String,
    #[serde(rename = "attribute_value")]
    pub value: AttributeValue,
    #[serde(rename = "comparison_operator")]
    pub operator: ComparisonOperator,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An action-side `(name, value)` set-command record. No operator: it is a
/// command, not a predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeAssignment {
    pub id: AttributeId,
    #[serde(rename = "attribute_name")]
    pub name: String,
    #[serde(rename = "attribute_value")]
    pub value: AttributeValue,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Raw attribute input: a single `{name: value}` object or a list of them.
/// Both wire forms are accepted and normalized to a list of batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributePayload {
    Single(serde_json::Map<String, serde_json::Value>),
    Many(Vec<serde_json::Map<String, serde_json::Value>>),
}

impl AttributePayload {
    /// Normalize into a list of single-object batches.
    #[must_use]
    pub fn into_batches(self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        match self {
            Self::Single(batch) => vec![batch],
            Self::Many(batches) => batches,
        }
    }
}

/// Validate one `(attribute_name, raw value)` pair against a device type's
/// schema, returning the typed value.
///
/// # Errors
///
/// - [`ValidationError::UnknownAttribute`] when the name is not in the schema
/// - [`ValidationError::InvalidEnumValue`] when an enum-domain value is not
///   an exact, case-sensitive member of the allowed set
/// - [`ValidationError::InvalidNumericValue`] when a range-domain value is
///   not a number (JSON number or numeric string)
/// - [`ValidationError::OutOfRange`] when a range-domain value falls outside
///   the inclusive bounds
pub fn validate(
    device_type: DeviceType,
    name: &str,
    raw: &serde_json::Value,
) -> Result<AttributeValue, ValidationError> {
    let Some(domain) = device_type.schema().domain(name) else {
        return Err(ValidationError::UnknownAttribute {
            device_type: device_type.to_string(),
            attribute: name.to_string(),
        });
    };
    match domain {
        Domain::Enum(allowed) => match raw.as_str() {
            Some(value) if allowed.iter().any(|member| *member == value) => {
                Ok(AttributeValue::Text(value.to_string()))
            }
            _ => Err(ValidationError::InvalidEnumValue {
                field: name.to_string(),
                value: raw_display(raw),
                allowed: allowed.iter().map(ToString::to_string).collect(),
            }),
        },
        Domain::Range { min, max } => {
            let parsed = raw
                .as_f64()
                .or_else(|| raw.as_str().and_then(|s| s.trim().parse().ok()));
            let Some(value) = parsed else {
                return Err(ValidationError::InvalidNumericValue {
                    attribute: name.to_string(),
                    value: raw_display(raw),
                });
            };
            if value < *min || value > *max {
                return Err(ValidationError::OutOfRange {
                    attribute: name.to_string(),
                    value,
                    min: *min,
                    max: *max,
                });
            }
            Ok(AttributeValue::Number(value))
        }
    }
}

/// Validate every pair in every batch, fail-fast, preserving batch order.
///
/// # Errors
///
/// The first violated rule, per [`validate`]. No partial result is produced.
pub fn validate_batches(
    device_type: DeviceType,
    batches: &[serde_json::Map<String, serde_json::Value>],
) -> Result<Vec<(String, AttributeValue)>, ValidationError> {
    let mut pairs = Vec::new();
    for batch in batches {
        for (name, raw) in batch {
            let value = validate(device_type, name, raw)?;
            pairs.push((name.clone(), value));
        }
    }
    Ok(pairs)
}

fn raw_display(raw: &serde_json::Value) -> String {
    match raw.as_str() {
        Some(s) => s.to_string(),
        None => raw.to_string(),
    }
}
