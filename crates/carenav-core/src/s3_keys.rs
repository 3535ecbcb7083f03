//! S3 key/path conventions.
//!
//! Pure string functions. These define the canonical layout of objects in
//! the carenav S3 bucket.

use uuid::Uuid;

use crate::error::CoreError;

pub fn client_checklists_prefix(client_id: Uuid) -> String {
    format!("clients/{client_id}/checklists/")
}

/// Key of the saved record for one client and checklist type.
///
/// Checklist ids end up in the object key, so only `[a-z0-9_-]` is allowed.
pub fn checklist_record(client_id: Uuid, checklist_id: &str) -> Result<String, CoreError> {
    let valid = !checklist_id.is_empty()
        && checklist_id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if !valid {
        return Err(CoreError::InvalidChecklistId(checklist_id.to_string()));
    }
    Ok(format!("clients/{client_id}/checklists/{checklist_id}.json"))
}
