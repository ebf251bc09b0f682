//! Typed identifier newtypes backed by counter strings.
//!
//! Identifiers in the fixture store are monotonic integers carried as
//! strings (`"1"`, `"2"`, …). Allocation (`max + 1`) lives in the store;
//! these newtypes only keep references from mixing across tables.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Access the inner string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Parse the counter value, when the identifier is numeric.
            #[must_use]
            pub fn sequence(&self) -> Option<u64> {
                self.0.parse().ok()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Home`](crate::home::Home).
    HomeId
);

define_id!(
    /// Unique identifier for a user. Users are external; the engine only
    /// records who created an automation.
    UserId
);

define_id!(
    /// Unique identifier for a [`Device`](crate::device::Device).
    DeviceId
);

define_id!(
    /// Unique identifier for a [`Scene`](crate::home::Scene).
    SceneId
);

define_id!(
    /// Unique identifier for a [`Notification`](crate::home::Notification).
    NotificationId
);

define_id!(
    /// Unique identifier for an [`Automation`](crate::automation::Automation).
    AutomationId
);

define_id!(
    /// Unique identifier for a [`Trigger`](crate::trigger::Trigger).
    TriggerId
);

define_id!(
    /// Unique identifier for an [`Action`](crate::action::Action).
    ActionId
);

define_id!(
    /// Unique identifier for an attribute record owned by a trigger or action.
    AttributeId
);

define_id!(
    /// Unique identifier for a [`Schedule`](crate::schedule::Schedule).
    ScheduleId
);
