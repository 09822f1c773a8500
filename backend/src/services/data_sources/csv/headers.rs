//! Maps loosely written CSV column names onto the canonical field keys.

use std::fmt;

/// Canonical fields a CSV column can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Role,
    Name,
    FirstName,
    LastName,
    Email,
    Phone,
}

impl FieldKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Role => "role",
            FieldKey::Name => "name",
            FieldKey::FirstName => "firstName",
            FieldKey::LastName => "lastName",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonicalized header spellings (Portuguese and English).
const HEADER_ALIASES: &[(&str, FieldKey)] = &[
    ("cargo", FieldKey::Role),
    ("role", FieldKey::Role),
    ("funcao", FieldKey::Role),
    ("perfil", FieldKey::Role),
    ("usuario", FieldKey::Name),
    ("nome", FieldKey::Name),
    ("name", FieldKey::Name),
    ("nomecompleto", FieldKey::Name),
    ("fullname", FieldKey::Name),
    ("firstname", FieldKey::FirstName),
    ("first", FieldKey::FirstName),
    ("primnome", FieldKey::FirstName),
    ("primernome", FieldKey::FirstName),
    ("primeironome", FieldKey::FirstName),
    ("lastname", FieldKey::LastName),
    ("last", FieldKey::LastName),
    ("sobrenome", FieldKey::LastName),
    ("email", FieldKey::Email),
    ("mail", FieldKey::Email),
    ("emailaddress", FieldKey::Email),
    ("fone", FieldKey::Phone),
    ("telefone", FieldKey::Phone),
    ("celular", FieldKey::Phone),
    ("phone", FieldKey::Phone),
    ("phonenumber", FieldKey::Phone),
    ("mobile", FieldKey::Phone),
    ("whatsapp", FieldKey::Phone),
];

/// Lower-cases the value and drops everything outside `[a-z0-9]`, so
/// `"E-mail "` and `"EMAIL"` both become `"email"`.
pub fn canonicalize(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

pub fn lookup_header(header: &str) -> Option<FieldKey> {
    let key = canonicalize(header);
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, field)| *field)
}

/// A recognized CSV column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedColumn {
    /// Position of the column in each record.
    pub index: usize,
    /// Header text as it appears in the file.
    pub header: String,
    pub key: FieldKey,
}

/// Recognized columns in file order. Unrecognized headers are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    columns: Vec<MappedColumn>,
}

impl HeaderMapping {
    pub fn columns(&self) -> &[MappedColumn] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Builds the mapping for a header row. An empty mapping is a valid result; the
/// caller decides whether it is fatal.
pub fn resolve_headers<S: AsRef<str>>(headers: &[S]) -> HeaderMapping {
    let columns = headers
        .iter()
        .enumerate()
        .filter_map(|(index, header)| {
            let header = header.as_ref();
            lookup_header(header).map(|key| MappedColumn {
                index,
                header: header.to_string(),
                key,
            })
        })
        .collect();
    HeaderMapping { columns }
}
