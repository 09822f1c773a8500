use crate::services::data_sources::csv::headers::canonicalize;
use std::fmt;

/// The two account roles the importer knows how to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Vendedor,
    Administrador,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Vendedor => "vendedor",
            Role::Administrador => "administrador",
        }
    }

    /// File name of the role's template inside the template directory.
    pub fn template_file(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ROLE_ALIASES: &[(&str, Role)] = &[
    ("vendedor", Role::Vendedor),
    ("vendedora", Role::Vendedor),
    ("seller", Role::Vendedor),
    ("sales", Role::Vendedor),
    ("salesperson", Role::Vendedor),
    ("admin", Role::Administrador),
    ("administrador", Role::Administrador),
    ("administradora", Role::Administrador),
    ("administrator", Role::Administrador),
    ("master", Role::Administrador),
];

/// Resolves a free-text role. `None` means the row must be rejected.
pub fn resolve_role(raw: &str) -> Option<Role> {
    let key = canonicalize(raw);
    if key.is_empty() {
        return None;
    }
    ROLE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, role)| *role)
}
