//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use trafficwise_core::traits::{Draft, Managed, Patch, Record};
use trafficwise_core::types::{FieldValue, RecordId};
use trafficwise_core::{AppError, AppResult};

use super::status::UserStatus;
use crate::validation::{reject_blank, require, take};

/// A console operator account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role name. Usually one of the role collection's names, but free
    /// text is accepted.
    pub role: String,
    /// Account status.
    pub status: UserStatus,
    /// Last successful sign-in (`None` = never).
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Check if the user can sign in right now.
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }
}

impl Record for User {
    type Id = RecordId;

    const ENTITY: &'static str = "User";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email", "role"];
    const DATE_FIELD: Option<&'static str> = Some("lastLogin");

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "name" => Some(FieldValue::text(&self.name)),
            "email" => Some(FieldValue::text(&self.email)),
            "role" => Some(FieldValue::text(&self.role)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "lastLogin" => Some(FieldValue::Timestamp(self.last_login)),
            _ => None,
        }
    }

    fn audit_details(&self) -> String {
        format!("Name: {}, Role: {}, Status: {}", self.name, self.role, self.status)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    /// Display name (required).
    pub name: Option<String>,
    /// Email address (required).
    pub email: Option<String>,
    /// Role name (required).
    pub role: Option<String>,
    /// Initial status; new accounts start `Pending`.
    pub status: Option<UserStatus>,
}

impl Draft for UserDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require(&mut missing, "name", &self.name);
        require(&mut missing, "email", &self.email);
        require(&mut missing, "role", &self.role);
        missing
    }

    fn check(&self) -> AppResult<()> {
        check_email(self.email.as_deref())
    }
}

/// Partial update for an existing user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role name.
    pub role: Option<String>,
    /// New status.
    pub status: Option<UserStatus>,
    /// Recorded sign-in time.
    pub last_login: Option<DateTime<Utc>>,
}

impl Patch for UserPatch {
    fn empty_fields(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        reject_blank(&mut empty, "name", &self.name);
        reject_blank(&mut empty, "email", &self.email);
        reject_blank(&mut empty, "role", &self.role);
        empty
    }

    fn changed_fields(&self) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.name.is_some() {
            changed.push("name");
        }
        if self.email.is_some() {
            changed.push("email");
        }
        if self.role.is_some() {
            changed.push("role");
        }
        if self.status.is_some() {
            changed.push("status");
        }
        if self.last_login.is_some() {
            changed.push("lastLogin");
        }
        changed
    }

    fn check(&self) -> AppResult<()> {
        check_email(self.email.as_deref())
    }
}

impl Managed for User {
    type Draft = UserDraft;
    type Patch = UserPatch;

    fn sequenced_id(value: u64) -> RecordId {
        RecordId::sequenced("usr", value, 3)
    }

    fn from_draft(id: RecordId, draft: UserDraft, _now: DateTime<Utc>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: take(draft.name),
            email: take(draft.email),
            role: take(draft.role),
            status: draft.status.unwrap_or(UserStatus::Pending),
            last_login: None,
        })
    }

    fn apply_patch(&mut self, patch: &UserPatch, _now: DateTime<Utc>) -> AppResult<()> {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = &patch.email {
            self.email = email.trim().to_string();
        }
        if let Some(role) = &patch.role {
            self.role = role.trim().to_string();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(last_login) = patch.last_login {
            self.last_login = Some(last_login);
        }
        Ok(())
    }
}

fn check_email(email: Option<&str>) -> AppResult<()> {
    match email.map(str::trim) {
        Some(email) if !email.is_empty() && !email.validate_email() => Err(
            AppError::invalid_fields(format!("Invalid email address: '{email}'"), ["email"]),
        ),
        _ => Ok(()),
    }
}
