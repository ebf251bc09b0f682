//! Device type schemas — the fixed attribute contract per device category.
//!
//! Every device type exposes a closed set of attributes, each with a value
//! domain: an enumerated string set or an inclusive numeric range. The
//! table is process-wide constant data with no lifecycle; consolidating it
//! here keeps every validation call site a thin lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The value domain of a single attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Exact, case-sensitive membership in a closed string set.
    Enum(&'static [&'static str]),
    /// Inclusive numeric range: `min <= v <= max`.
    Range { min: f64, max: f64 },
}

/// The ordered attribute-name → domain mapping for one device type.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    attributes: &'static [(&'static str, Domain)],
}

impl Schema {
    /// Look up the domain of an attribute by name.
    #[must_use]
    pub fn domain(&self, attribute: &str) -> Option<&Domain> {
        self.attributes
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, domain)| domain)
    }

    /// Iterate the schema in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Domain)> {
        self.attributes.iter().map(|(name, domain)| (*name, domain))
    }
}

const ON_OFF: Domain = Domain::Enum(&["on", "off"]);

const BULB: Schema = Schema {
    attributes: &[
        ("power", ON_OFF),
        ("brightness", Domain::Range { min: 0.0, max: 100.0 }),
        ("color_temperature", Domain::Range { min: 2700.0, max: 6500.0 }),
    ],
};

const THERMOSTAT: Schema = Schema {
    attributes: &[
        ("mode", Domain::Enum(&["heating", "cooling", "idle"])),
        ("target_temperature", Domain::Range { min: 5.0, max: 35.0 }),
    ],
};

const DOOR_LOCK: Schema = Schema {
    attributes: &[("state", Domain::Enum(&["locked", "unlocked"]))],
};

const SMART_PLUG: Schema = Schema {
    attributes: &[("power", ON_OFF)],
};

const BLIND: Schema = Schema {
    attributes: &[("position", Domain::Range { min: 0.0, max: 100.0 })],
};

const FAN: Schema = Schema {
    attributes: &[
        ("power", ON_OFF),
        ("speed", Domain::Enum(&["low", "medium", "high"])),
    ],
};

const SPEAKER: Schema = Schema {
    attributes: &[
        ("power", ON_OFF),
        ("volume", Domain::Range { min: 0.0, max: 100.0 }),
    ],
};

const CAMERA: Schema = Schema {
    attributes: &[("recording", ON_OFF)],
};

const VACUUM: Schema = Schema {
    attributes: &[(
        "state",
        Domain::Enum(&["docked", "cleaning", "paused", "returning"]),
    )],
};

const DOORBELL: Schema = Schema {
    attributes: &[("chime", ON_OFF)],
};

const MOTION_SENSOR: Schema = Schema {
    attributes: &[("motion", Domain::Enum(&["detected", "clear"]))],
};

const TEMPERATURE_SENSOR: Schema = Schema {
    attributes: &[("temperature", Domain::Range { min: -40.0, max: 60.0 })],
};

const HUMIDITY_SENSOR: Schema = Schema {
    attributes: &[("humidity", Domain::Range { min: 0.0, max: 100.0 })],
};

const CONTACT_SENSOR: Schema = Schema {
    attributes: &[("contact", Domain::Enum(&["open", "closed"]))],
};

/// The closed set of device types known to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Bulb,
    Thermostat,
    DoorLock,
    SmartPlug,
    Blind,
    Fan,
    Speaker,
    Camera,
    Vacuum,
    Doorbell,
    MotionSensor,
    TemperatureSensor,
    HumiditySensor,
    ContactSensor,
}

impl DeviceType {
    /// Every known device type, in schema-table order.
    pub const ALL: [Self; 14] = [
        Self::Bulb,
        Self::Thermostat,
        Self::DoorLock,
        Self::SmartPlug,
        Self::Blind,
        Self::Fan,
        Self::Speaker,
        Self::Camera,
        Self::Vacuum,
        Self::Doorbell,
        Self::MotionSensor,
        Self::TemperatureSensor,
        Self::HumiditySensor,
        Self::ContactSensor,
    ];

    /// The attribute schema for this device type. Total — every known
    /// type has one.
    #[must_use]
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Bulb => &BULB,
            Self::Thermostat => &THERMOSTAT,
            Self::DoorLock => &DOOR_LOCK,
            Self::SmartPlug => &SMART_PLUG,
            Self::Blind => &BLIND,
            Self::Fan => &FAN,
            Self::Speaker => &SPEAKER,
            Self::Camera => &CAMERA,
            Self::Vacuum => &VACUUM,
            Self::Doorbell => &DOORBELL,
            Self::MotionSensor => &MOTION_SENSOR,
            Self::TemperatureSensor => &TEMPERATURE_SENSOR,
            Self::HumiditySensor => &HUMIDITY_SENSOR,
            Self::ContactSensor => &CONTACT_SENSOR,
        }
    }

    /// The wire name of this device type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bulb => "bulb",
            Self::Thermostat => "thermostat",
            Self::DoorLock => "door_lock",
            Self::SmartPlug => "smart_plug",
            Self::Blind => "blind",
            Self::Fan => "fan",
            Self::Speaker => "speaker",
            Self::Camera => "camera",
            Self::Vacuum => "vacuum",
            Self::Doorbell => "doorbell",
            Self::MotionSensor => "motion_sensor",
            Self::TemperatureSensor => "temperature_sensor",
            Self::HumiditySensor => "humidity_sensor",
            Self::ContactSensor => "contact_sensor",
        }
    }

    /// Whether this type belongs to the sensor family (name ends in
    /// `sensor`), used by the sensors-only trigger policy.
    #[must_use]
    pub fn is_sensor(self) -> bool {
        self.as_str().ends_with("sensor")
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownDeviceType {
                device_type: s.to_string(),
            })
    }
}
