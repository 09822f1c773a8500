//! Builds the `POST /users/` body from a template and a normalized row.

use super::load::RoleTemplate;
use crate::error::RowError;
use crate::services::data_sources::csv::normalize::NormalizedRow;
use serde::Serialize;
use serde_json::{Map, Value};

/// Exact body sent to the remote API when creating a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreationRequest {
    pub company_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub role: String,
    pub location_ids: Vec<String>,
    pub permissions: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
}

impl UserCreationRequest {
    pub fn has_scopes(&self) -> bool {
        self.scopes.is_some()
    }

    pub fn without_scopes(&self) -> UserCreationRequest {
        UserCreationRequest {
            scopes: None,
            ..self.clone()
        }
    }
}

/// Location IDs for a new user: the explicit override as a single-element list,
/// else the template's `roles.locationIds`. An empty result rejects the row.
pub fn resolve_location_ids(
    location_override: Option<&str>,
    template: &RoleTemplate,
) -> Result<Vec<String>, RowError> {
    let location_ids = match location_override {
        Some(location_id) => vec![location_id.to_string()],
        None => template.location_ids().to_vec(),
    };
    if location_ids.is_empty() {
        return Err(RowError::MissingLocationIds);
    }
    Ok(location_ids)
}

/// Company ID for a new user. Company and location IDs are the same value for
/// this API, so the first location stands in when no override is given.
pub fn resolve_company_id(
    company_override: Option<&str>,
    template: &RoleTemplate,
    location_ids: &[String],
) -> Result<String, RowError> {
    company_override
        .map(str::to_string)
        .or_else(|| location_ids.first().cloned())
        .or_else(|| template.company_id.clone())
        .filter(|id| !id.is_empty())
        .ok_or(RowError::MissingCompanyId)
}

pub fn build_body(
    template: &RoleTemplate,
    row: &NormalizedRow,
    company_id: String,
    location_ids: Vec<String>,
) -> Result<UserCreationRequest, RowError> {
    let (Some(account_type), Some(role)) = (template.account_type(), template.role_tag()) else {
        return Err(RowError::TemplateMissingRoleType);
    };

    Ok(UserCreationRequest {
        company_id,
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        email: row.email.clone(),
        phone: row.phone.clone(),
        account_type: account_type.to_string(),
        role: role.to_string(),
        location_ids,
        permissions: template
            .permissions
            .clone()
            .unwrap_or_else(|| Value::Object(Map::new())),
        scopes: template.scopes.clone().filter(|s| !s.is_empty()),
    })
}
