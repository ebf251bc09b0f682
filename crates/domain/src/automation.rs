//! Automation — a named if-this-then-that rule scoped to a home.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{AutomationId, HomeId, UserId};

/// Whether an automation is eligible to fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomationStatus {
    #[default]
    Enabled,
    Disabled,
}

impl AutomationStatus {
    const ALL: [Self; 2] = [Self::Enabled, Self::Disabled];

    /// The wire name of this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for AutomationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutomationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidEnumValue {
                field: "status".to_string(),
                value: s.to_string(),
                allowed: Self::ALL.iter().map(ToString::to_string).collect(),
            })
    }
}

/// A rule that would react to a trigger by executing actions. Triggers and
/// actions are owned separately, keyed by `automation_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automation {
    pub id: AutomationId,
    pub home_id: HomeId,
    pub created_by: UserId,
    /// Unique within the home, case-sensitive.
    pub name: String,
    pub status: AutomationStatus,
    pub description: String,
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyName`] when `name` is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    home_id: Option<HomeId>,
    created_by: Option<UserId>,
    name: Option<String>,
    status: Option<AutomationStatus>,
    description: Option<String>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn home_id(mut self, home_id: HomeId) -> Self {
        self.home_id = Some(home_id);
        self
    }

    #[must_use]
    pub fn created_by(mut self, created_by: UserId) -> Self {
        self.created_by = Some(created_by);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: AutomationStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Consume the builder, validate, and return an [`Automation`].
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyName`] if `name` is missing or empty.
    pub fn build(self) -> Result<Automation, ValidationError> {
        let automation = Automation {
            id: self.id.unwrap_or_else(|| AutomationId::new("1")),
            home_id: self.home_id.unwrap_or_else(|| HomeId::new("1")),
            created_by: self.created_by.unwrap_or_else(|| UserId::new("1")),
            name: self.name.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        };
        automation.validate()?;
        Ok(automation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_automation() -> Automation {
        Automation::builder()
            .id(AutomationId::new("3"))
            .home_id(HomeId::new("2"))
            .created_by(UserId::new("5"))
            .name("Evening lights")
            .description("Turn the porch on at sunset")
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_automation_when_required_fields_provided() {
        let auto = valid_automation();
        assert_eq!(auto.name, "Evening lights");
        assert_eq!(auto.status, AutomationStatus::Enabled);
        assert_eq!(auto.home_id, HomeId::new("2"));
    }

    #[test]
    fn should_default_to_enabled_when_status_not_specified() {
        assert_eq!(valid_automation().status, AutomationStatus::Enabled);
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Automation::builder().build();
        assert!(matches!(result, Err(ValidationError::EmptyName)));
    }

    #[test]
    fn should_parse_status_from_wire_names() {
        assert_eq!(
            "enabled".parse::<AutomationStatus>().unwrap(),
            AutomationStatus::Enabled
        );
        assert_eq!(
            "disabled".parse::<AutomationStatus>().unwrap(),
            AutomationStatus::Disabled
        );
    }

    #[test]
    fn should_reject_unknown_status_with_allowed_set() {
        let err = "paused".parse::<AutomationStatus>().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidEnumValue { ref allowed, .. }
                if allowed == &["enabled", "disabled"]
        ));
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let auto = valid_automation();
        let json = serde_json::to_string(&auto).unwrap();
        let parsed: Automation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, auto);
    }
}
