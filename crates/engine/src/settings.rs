//! Engine settings.

use serde::{Deserialize, Serialize};

/// Which devices may back a `device_state` trigger.
///
/// The platform's tool families disagree on this rule: one restricts
/// trigger devices to the `*sensor` types, the other accepts any device
/// (e.g. a bulb's `power` as a condition). The policy is therefore explicit
/// configuration rather than a silent merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerDevicePolicy {
    /// Any known device type may back a trigger.
    #[default]
    AnyDevice,
    /// Only device types ending in `sensor` may back a trigger.
    SensorsOnly,
}

/// Settings the engine is constructed with.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSettings {
    pub trigger_device_policy: TriggerDevicePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_any_device_policy() {
        let settings = EngineSettings::default();
        assert_eq!(settings.trigger_device_policy, TriggerDevicePolicy::AnyDevice);
    }

    #[test]
    fn should_deserialize_policy_from_snake_case() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{"trigger_device_policy": "sensors_only"}"#).unwrap();
        assert_eq!(
            settings.trigger_device_policy,
            TriggerDevicePolicy::SensorsOnly
        );
    }
}
