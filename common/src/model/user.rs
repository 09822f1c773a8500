//! Shapes of the remote "list users" response.
//!
//! The export keeps the raw JSON of every user so the snapshot file is a verbatim
//! copy of what the API returned. `RemoteUser` is a lenient typed view used only to
//! flatten a record into the CSV columns and the front-end summary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `GET /users/`. The API returns every user of a location in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub users: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteUserRoles {
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub role: Option<String>,
    pub location_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteUser {
    pub id: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub roles: Option<RemoteUserRoles>,
    pub deleted: Option<bool>,
    pub date_added: Option<String>,
    pub date_updated: Option<String>,
}

impl RemoteUser {
    /// Reads the typed view out of a raw record. Fields with unexpected types fall
    /// back to empty rather than failing the whole export.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_else(|_| RemoteUser {
            id: text_field(value, "id"),
            name: text_field(value, "name"),
            first_name: text_field(value, "firstName"),
            last_name: text_field(value, "lastName"),
            email: text_field(value, "email"),
            phone: text_field(value, "phone"),
            roles: value
                .get("roles")
                .and_then(|roles| serde_json::from_value(roles.clone()).ok()),
            deleted: value.get("deleted").and_then(Value::as_bool),
            date_added: text_field(value, "dateAdded"),
            date_updated: text_field(value, "dateUpdated"),
        })
    }

    pub fn role(&self) -> &str {
        self.roles
            .as_ref()
            .and_then(|r| r.role.as_deref())
            .unwrap_or_default()
    }

    pub fn account_type(&self) -> &str {
        self.roles
            .as_ref()
            .and_then(|r| r.account_type.as_deref())
            .unwrap_or_default()
    }

    pub fn location_ids(&self) -> &[String] {
        self.roles
            .as_ref()
            .and_then(|r| r.location_ids.as_deref())
            .unwrap_or_default()
    }
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Flattened user as returned by `POST /list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub location_ids: Vec<String>,
    pub deleted: bool,
    pub date_added: String,
    pub date_updated: String,
}

impl From<&RemoteUser> for UserSummary {
    fn from(user: &RemoteUser) -> Self {
        UserSummary {
            id: user.id.clone().unwrap_or_default(),
            name: user.name.clone().unwrap_or_default(),
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            role: user.role().to_string(),
            account_type: user.account_type().to_string(),
            location_ids: user.location_ids().to_vec(),
            deleted: user.deleted.unwrap_or(false),
            date_added: user.date_added.clone().unwrap_or_default(),
            date_updated: user.date_updated.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_roles() {
        let raw = json!({
            "id": "u1",
            "name": "Ana Souza",
            "email": "ana@x.com",
            "roles": {"type": "account", "role": "user", "locationIds": ["L1", "L2"]},
            "deleted": false
        });
        let summary = UserSummary::from(&RemoteUser::from_value(&raw));
        assert_eq!(summary.role, "user");
        assert_eq!(summary.account_type, "account");
        assert_eq!(summary.location_ids, vec!["L1", "L2"]);
        assert_eq!(summary.phone, "");
    }

    #[test]
    fn tolerates_odd_field_types() {
        let raw = json!({"id": "u2", "phone": 5511999, "deleted": "yes"});
        let user = RemoteUser::from_value(&raw);
        assert_eq!(user.id.as_deref(), Some("u2"));
        assert_eq!(user.phone, None);
        assert_eq!(user.deleted, None);
    }
}
