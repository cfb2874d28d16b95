//! User-related entity definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a user by the store.
pub type UserId = i64;

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// First name.
    pub name: String,
    /// Last name.
    pub lastname: String,
}

impl User {
    /// Creates a new user with the given id.
    pub fn new(id: UserId, name: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lastname: lastname.into(),
        }
    }

    /// Builds a record from a create/replace payload.
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self::new(id, new_user.name, new_user.lastname)
    }
}

/// Payload for creating or replacing a user.
///
/// An `id` key in the incoming document is ignored; the id always comes from
/// the store or the request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub lastname: String,
}

/// Partial update of a user.
///
/// Decoded from a JSON object of string values. Keys other than `name` and
/// `lastname` are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
}

impl UserPatch {
    /// Sets the first name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the last name.
    pub fn with_lastname(mut self, lastname: impl Into<String>) -> Self {
        self.lastname = Some(lastname.into());
        self
    }

    /// Overwrites the supplied fields on `user`, leaving the rest untouched.
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(lastname) = &self.lastname {
            user.lastname.clone_from(lastname);
        }
    }
}

impl From<HashMap<String, String>> for UserPatch {
    fn from(mut fields: HashMap<String, String>) -> Self {
        Self {
            name: fields.remove("name"),
            lastname: fields.remove("lastname"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_flat() {
        let user = User::new(1, "John", "Doe");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "John", "lastname": "Doe"})
        );
    }

    #[test]
    fn test_new_user_ignores_id() {
        let new_user: NewUser =
            serde_json::from_str(r#"{"id": 42, "name": "Ada", "lastname": "Lovelace"}"#).unwrap();

        assert_eq!(
            new_user,
            NewUser {
                name: "Ada".to_string(),
                lastname: "Lovelace".to_string(),
            }
        );
        assert_eq!(User::from_new(7, new_user).id, 7);
    }

    #[test]
    fn test_new_user_requires_both_fields() {
        assert!(serde_json::from_str::<NewUser>(r#"{"name": "Ada"}"#).is_err());
        assert!(serde_json::from_str::<NewUser>("not json").is_err());
    }

    #[test]
    fn test_patch_drops_unknown_keys() {
        let patch: UserPatch =
            serde_json::from_str(r#"{"name": "Z", "nickname": "zz"}"#).unwrap();

        assert_eq!(patch, UserPatch::default().with_name("Z"));
    }

    #[test]
    fn test_patch_rejects_non_string_values() {
        assert!(serde_json::from_str::<UserPatch>(r#"{"name": 5}"#).is_err());
        assert!(serde_json::from_str::<UserPatch>(r#"["name"]"#).is_err());
    }

    #[test]
    fn test_patch_apply_keeps_missing_fields() {
        let mut user = User::new(1, "X", "Y");

        UserPatch::default().with_name("Z").apply(&mut user);
        assert_eq!(user, User::new(1, "Z", "Y"));

        UserPatch::default().with_lastname("W").apply(&mut user);
        assert_eq!(user, User::new(1, "Z", "W"));

        UserPatch::default().apply(&mut user);
        assert_eq!(user, User::new(1, "Z", "W"));
    }
}
