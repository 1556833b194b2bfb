//! Role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trafficwise_core::traits::{Draft, Managed, Patch, Record};
use trafficwise_core::types::{FieldValue, RecordId};
use trafficwise_core::AppResult;

use crate::validation::{reject_blank, require, take};

/// A named set of permissions users can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier.
    pub id: RecordId,
    /// Role name.
    pub name: String,
    /// Permission names, deduplicated, in the order first granted.
    pub permissions: Vec<String>,
}

impl Role {
    /// Whether the role grants `permission` (case-insensitive).
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|granted| granted.eq_ignore_ascii_case(permission))
    }

    /// A role with no permissions cannot be assigned to users.
    pub fn is_assignable(&self) -> bool {
        !self.permissions.is_empty()
    }
}

impl Record for Role {
    type Id = RecordId;

    const ENTITY: &'static str = "Role";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "permissions"];
    const DATE_FIELD: Option<&'static str> = None;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "name" => Some(FieldValue::text(&self.name)),
            "permissions" => Some(FieldValue::text(self.permissions.join(", "))),
            "permissionCount" => Some(FieldValue::Number(self.permissions.len() as f64)),
            _ => None,
        }
    }

    fn audit_details(&self) -> String {
        format!("Permissions: {}", self.permissions.join(", "))
    }
}

/// Data required to create a new role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleDraft {
    /// Role name (required).
    pub name: Option<String>,
    /// Granted permissions (at least one non-blank entry required).
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Draft for RoleDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require(&mut missing, "name", &self.name);
        if normalize_permissions(&self.permissions).is_empty() {
            missing.push("permissions");
        }
        missing
    }
}

/// Partial update for an existing role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolePatch {
    /// New role name.
    pub name: Option<String>,
    /// Replacement permission set.
    pub permissions: Option<Vec<String>>,
}

impl Patch for RolePatch {
    fn empty_fields(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        reject_blank(&mut empty, "name", &self.name);
        if self
            .permissions
            .as_ref()
            .is_some_and(|permissions| normalize_permissions(permissions).is_empty())
        {
            empty.push("permissions");
        }
        empty
    }

    fn changed_fields(&self) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.name.is_some() {
            changed.push("name");
        }
        if self.permissions.is_some() {
            changed.push("permissions");
        }
        changed
    }
}

impl Managed for Role {
    type Draft = RoleDraft;
    type Patch = RolePatch;

    fn sequenced_id(value: u64) -> RecordId {
        RecordId::sequenced("role", value, 3)
    }

    fn from_draft(id: RecordId, draft: RoleDraft, _now: DateTime<Utc>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: take(draft.name),
            permissions: normalize_permissions(&draft.permissions),
        })
    }

    fn apply_patch(&mut self, patch: &RolePatch, _now: DateTime<Utc>) -> AppResult<()> {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(permissions) = &patch.permissions {
            self.permissions = normalize_permissions(permissions);
        }
        Ok(())
    }
}

/// Trim, drop blanks, and deduplicate while keeping first-seen order.
fn normalize_permissions(permissions: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(permissions.len());
    for permission in permissions.iter().map(|p| p.trim()) {
        if !permission.is_empty() && !normalized.iter().any(|p| p == permission) {
            normalized.push(permission.to_string());
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_requires_a_permission() {
        let draft = RoleDraft {
            name: Some("Night Shift".to_string()),
            permissions: vec![" ".to_string()],
        };
        assert_eq!(draft.missing_fields(), vec!["permissions"]);
    }

    #[test]
    fn test_permissions_are_deduplicated() {
        let draft = RoleDraft {
            name: Some("Night Shift".to_string()),
            permissions: vec![
                "Monitor Feeds".to_string(),
                "Monitor Feeds ".to_string(),
                "View Analytics".to_string(),
            ],
        };
        let role = Role::from_draft(Role::sequenced_id(1), draft, Utc::now()).unwrap();
        assert_eq!(role.id.as_str(), "role001");
        assert_eq!(role.permissions, vec!["Monitor Feeds", "View Analytics"]);
        assert!(role.grants("monitor feeds"));
        assert!(role.is_assignable());
    }
}
