//! Homes and the other externally managed entities automations reference.
//!
//! Scene and notification storage is not modeled here; the engine only
//! checks existence and (for scenes) home membership.

use serde::{Deserialize, Serialize};

use crate::id::{HomeId, NotificationId, SceneId};

/// A household. Membership management is external.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Home {
    pub id: HomeId,
    pub name: String,
}

/// An externally stored scene referenced by scene-activation actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    pub home_id: HomeId,
}

/// An externally stored notification referenced by notification actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub home_id: HomeId,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_scene_through_serde_json() {
        let scene = Scene {
            id: SceneId::new("2"),
            name: "Movie night".to_string(),
            home_id: HomeId::new("1"),
        };
        let json = serde_json::to_string(&scene).unwrap();
        let parsed: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scene);
    }
}
