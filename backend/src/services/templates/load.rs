//! Role templates: one static JSON document per role describing the default
//! shape of a new account.
//!
//! ```json
//! {
//!   "type": "account",
//!   "role": "user",
//!   "companyId": "...",
//!   "permissions": { "contactsEnabled": true },
//!   "scopes": ["contacts.write"],
//!   "roles": { "type": "account", "role": "user", "locationIds": ["..."] }
//! }
//! ```
//!
//! `type` and `role` may live at the top level or under `roles`. Nothing else is
//! validated here; the payload builder decides what a usable template is.

use super::role::Role;
use crate::error::{ImportError, ImportResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateRoles {
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub role: Option<String>,
    pub location_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleTemplate {
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub role: Option<String>,
    pub company_id: Option<String>,
    pub permissions: Option<Value>,
    pub scopes: Option<Vec<String>>,
    pub roles: Option<TemplateRoles>,
}

impl RoleTemplate {
    /// Account type from the top level, else from `roles`.
    pub fn account_type(&self) -> Option<&str> {
        non_empty(self.account_type.as_deref())
            .or_else(|| non_empty(self.roles.as_ref()?.account_type.as_deref()))
    }

    /// Role tag from the top level, else from `roles`.
    pub fn role_tag(&self) -> Option<&str> {
        non_empty(self.role.as_deref())
            .or_else(|| non_empty(self.roles.as_ref()?.role.as_deref()))
    }

    pub fn location_ids(&self) -> &[String] {
        self.roles
            .as_ref()
            .and_then(|r| r.location_ids.as_deref())
            .unwrap_or_default()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Reads role templates from a directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TemplateStore { dir: dir.into() }
    }

    pub fn path_for(&self, role: Role) -> PathBuf {
        self.dir.join(role.template_file())
    }

    /// Loads the template for `role` from disk. A missing file is
    /// `TemplateNotFound`; broken JSON is `InvalidTemplate`.
    pub fn load(&self, role: Role) -> ImportResult<RoleTemplate> {
        let path = self.path_for(role);
        load_template_file(&path)
    }
}

pub fn load_template_file(path: &Path) -> ImportResult<RoleTemplate> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ImportError::TemplateNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(ImportError::Io(e)),
    };
    serde_json::from_str(&raw).map_err(|source| ImportError::InvalidTemplate {
        path: path.to_path_buf(),
        source,
    })
}
