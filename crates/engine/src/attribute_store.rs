//! Attribute upsert — update-if-exists-by-name else append.
//!
//! Attribute records are keyed by `(parent, attribute_name)`: at most one
//! live record per name per trigger/action. Repeated upserts of the same
//! name overwrite the value in place, preserving the record's id and
//! `created_at` while stamping `updated_at`. Callers must not assume a
//! fresh id on every call.
//!
//! These functions run on an already-validated staging copy of the parent's
//! list; they cannot fail, which keeps commit infallible after validation.

use hearth_domain::attribute::{
    AttributeAssertion, AttributeAssignment, AttributeValue, ComparisonOperator,
};
use hearth_domain::id::AttributeId;
use hearth_domain::time::Timestamp;

/// Upsert a trigger-side assertion. The operator is overwritten only when
/// supplied; a fresh record defaults it to `equals`.
pub fn upsert_assertion(
    records: &mut Vec<AttributeAssertion>,
    name: &str,
    value: AttributeValue,
    operator: Option<ComparisonOperator>,
    seq: &mut u64,
    now: Timestamp,
) {
    if let Some(existing) = records.iter_mut().find(|record| record.name == name) {
        existing.value = value;
        if let Some(operator) = operator {
            existing.operator = operator;
        }
        existing.updated_at = now;
        return;
    }
    records.push(AttributeAssertion {
        id: allocate(seq),
        name: name.to_string(),
        value,
        operator: operator.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    });
}

/// Upsert an action-side assignment.
pub fn upsert_assignment(
    records: &mut Vec<AttributeAssignment>,
    name: &str,
    value: AttributeValue,
    seq: &mut u64,
    now: Timestamp,
) {
    if let Some(existing) = records.iter_mut().find(|record| record.name == name) {
        existing.value = value;
        existing.updated_at = now;
        return;
    }
    records.push(AttributeAssignment {
        id: allocate(seq),
        name: name.to_string(),
        value,
        created_at: now,
        updated_at: now,
    });
}

fn allocate(seq: &mut u64) -> AttributeId {
    let id = AttributeId::new(seq.to_string());
    *seq += 1;
    id
}
