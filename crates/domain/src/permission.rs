use rolegate_core::PermissionId;
use serde::{Deserialize, Serialize};

use crate::EntityStatus;

/// A named grant over one `(resource, action)` pair.
///
/// The pair `(*, *)` denotes all resources and actions, and `(resource, *)`
/// denotes all actions on one resource. Both are stored as plain values;
/// their wildcard meaning exists only in [`crate::resolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Stable permission identifier.
    pub id: PermissionId,
    /// Unique permission name among non-deleted permissions.
    pub name: String,
    /// Resource token the permission applies to.
    pub resource: String,
    /// Action token the permission allows.
    pub action: String,
    /// Human-readable permission description.
    pub description: String,
    /// Lifecycle status.
    pub status: EntityStatus,
}

impl Permission {
    /// Returns the canonical `resource:action` string form.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.resource, self.action)
    }
}

#[cfg(test)]
mod tests {
    use rolegate_core::PermissionId;

    use super::{EntityStatus, Permission};

    #[test]
    fn canonical_joins_resource_and_action() {
        let permission = Permission {
            id: PermissionId::new(1),
            name: "posts:write".to_owned(),
            resource: "posts".to_owned(),
            action: "write".to_owned(),
            description: String::new(),
            status: EntityStatus::Enabled,
        };
        assert_eq!(permission.canonical(), "posts:write");
    }
}
