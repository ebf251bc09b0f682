//! Fixture data — the external entities the engine validates against.
//!
//! Homes, devices, scenes, and notifications are owned by the wider
//! platform; this backend only reads them. They are loaded once at startup,
//! either from a JSON seed file or from a built-in demo home.

use serde::Deserialize;

use hearth_domain::device::Device;
use hearth_domain::home::{Home, Notification, Scene};
use hearth_domain::id::{DeviceId, HomeId, NotificationId, SceneId};
use hearth_engine::store::HomeStore;

/// The shape of a JSON seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub homes: Vec<Home>,
    pub devices: Vec<Device>,
    pub scenes: Vec<Scene>,
    pub notifications: Vec<Notification>,
}

impl SeedData {
    /// Load seed data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is unreadable or not valid JSON.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// A small single-home fixture for running without a seed file.
    #[must_use]
    pub fn demo() -> Self {
        let home_id = HomeId::new("1");
        Self {
            homes: vec![Home {
                id: home_id.clone(),
                name: "Demo Home".to_string(),
            }],
            devices: [
                ("1", "Living room bulb", "bulb"),
                ("2", "Hallway thermostat", "thermostat"),
                ("3", "Front door lock", "door_lock"),
                ("4", "Porch motion sensor", "motion_sensor"),
                ("5", "Bedroom blind", "blind"),
            ]
            .into_iter()
            .map(|(id, name, ty)| Device {
                id: DeviceId::new(id),
                name: name.to_string(),
                device_type: ty.to_string(),
                home_id: home_id.clone(),
            })
            .collect(),
            scenes: vec![Scene {
                id: SceneId::new("1"),
                name: "Movie night".to_string(),
                home_id: home_id.clone(),
            }],
            notifications: vec![Notification {
                id: NotificationId::new("1"),
                home_id,
                message: "Front door unlocked".to_string(),
            }],
        }
    }

    /// Seed a store with this data.
    #[must_use]
    pub fn into_store(self) -> HomeStore {
        let mut store = HomeStore::new();
        for home in self.homes {
            store.seed_home(home);
        }
        for device in self.devices {
            store.seed_device(device);
        }
        for scene in self.scenes {
            store.seed_scene(scene);
        }
        for notification in self.notifications {
            store.seed_notification(notification);
        }
        store
    }
}
