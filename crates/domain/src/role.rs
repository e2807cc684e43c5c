use std::str::FromStr;

use rolegate_core::{AppError, RoleId};
use serde::{Deserialize, Serialize};

/// Lifecycle status shared by roles and permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    /// The entity participates in authorization decisions.
    #[default]
    Enabled,
    /// The entity is retained but excluded from effective grants.
    Disabled,
}

impl EntityStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    /// Returns whether the entity is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl FromStr for EntityStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "enabled" => Ok(Self::Enabled),
            "disabled" => Ok(Self::Disabled),
            _ => Err(AppError::InvalidFormat(format!(
                "unknown status value '{value}'"
            ))),
        }
    }
}

/// Named grouping of permissions assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable role identifier.
    pub id: RoleId,
    /// Unique role name among non-deleted roles.
    pub name: String,
    /// Human-readable role description.
    pub description: String,
    /// Lifecycle status.
    pub status: EntityStatus,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::EntityStatus;

    #[test]
    fn status_roundtrip_storage_value() {
        for status in [EntityStatus::Enabled, EntityStatus::Disabled] {
            let restored = EntityStatus::from_str(status.as_str());
            assert_eq!(restored.ok(), Some(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(EntityStatus::from_str("archived").is_err());
    }

    #[test]
    fn status_defaults_to_enabled() {
        assert!(EntityStatus::default().is_enabled());
    }
}
