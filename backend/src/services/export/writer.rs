//! Snapshot files for the "list users" export.

use crate::error::ImportResult;
use common::model::user::RemoteUser;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column order of the CSV snapshot.
pub const CSV_COLUMNS: [&str; 12] = [
    "id",
    "name",
    "firstName",
    "lastName",
    "email",
    "phone",
    "role",
    "type",
    "locationIds",
    "deleted",
    "dateAdded",
    "dateUpdated",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UsersSnapshot<'a> {
    count: usize,
    company_id: &'a str,
    location_id: &'a str,
    users: &'a [Value],
}

/// Writes `{count, companyId, locationId, users}` with the users exactly as the
/// API returned them. Company and location are the same ID here.
pub fn write_users_json(path: &Path, users: &[Value], location_id: &str) -> ImportResult<()> {
    let snapshot = UsersSnapshot {
        count: users.len(),
        company_id: location_id,
        location_id,
        users,
    };
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &snapshot)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// One CSV line per user, flattened from the nested `roles` object.
pub fn csv_record(user: &RemoteUser) -> [String; 12] {
    [
        user.id.clone().unwrap_or_default(),
        user.name.clone().unwrap_or_default(),
        user.first_name.clone().unwrap_or_default(),
        user.last_name.clone().unwrap_or_default(),
        user.email.clone().unwrap_or_default(),
        user.phone.clone().unwrap_or_default(),
        user.role().to_string(),
        user.account_type().to_string(),
        user.location_ids().join(","),
        user.deleted.map(|d| d.to_string()).unwrap_or_default(),
        user.date_added.clone().unwrap_or_default(),
        user.date_updated.clone().unwrap_or_default(),
    ]
}

pub fn write_users_csv(path: &Path, users: &[Value]) -> ImportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_COLUMNS)?;
    for user in users {
        writer.write_record(csv_record(&RemoteUser::from_value(user)))?;
    }
    writer.flush()?;
    Ok(())
}
