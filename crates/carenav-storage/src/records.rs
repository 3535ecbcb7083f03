//! Load, save, list and delete checklist records.

use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;
use uuid::Uuid;

use carenav_core::models::record::ChecklistRecord;
use carenav_core::s3_keys;

use crate::error::StorageError;

/// A saved record together with the ETag it was read at.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub record: ChecklistRecord,
    pub etag: String,
}

/// Which conditional write a save performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode<'a> {
    /// Nothing is stored yet. Succeeds only while the key is still absent
    /// (`If-None-Match: *`).
    Create,
    /// Replace exactly the copy the caller loaded (`If-Match`).
    Replace { etag: &'a str },
}

/// Choose the write for a save, given whether a record is stored now and
/// the ETag the caller last saw (`None` if it saw no record).
///
/// Returns `None` when the caller's view is already stale: it holds an ETag
/// for a record that is gone, or it saw nothing and a record now exists.
pub fn write_mode(stored: bool, expected_etag: Option<&str>) -> Option<WriteMode<'_>> {
    match (stored, expected_etag) {
        (false, None) => Some(WriteMode::Create),
        (true, Some(etag)) => Some(WriteMode::Replace { etag }),
        (false, Some(_)) | (true, None) => None,
    }
}

/// HTTP statuses S3 uses to refuse a conditional put.
///
/// 412 for a failed `If-Match`/`If-None-Match`, 409 when a concurrent
/// conditional write won the race, 404 when the `If-Match` target was
/// deleted.
pub fn is_write_conflict(status: u16) -> bool {
    matches!(status, 404 | 409 | 412)
}

/// Load a saved record. `Ok(None)` if nothing is saved yet.
pub async fn load_record(
    client: &Client,
    bucket: &str,
    client_id: Uuid,
    checklist_id: &str,
) -> Result<Option<StoredRecord>, StorageError> {
    let key = s3_keys::checklist_record(client_id, checklist_id)?;

    let resp = match client.get_object().bucket(bucket).key(&key).send().await {
        Ok(resp) => resp,
        Err(e) => {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                tracing::debug!(%client_id, checklist_id, "no saved checklist record");
                return Ok(None);
            }
            return Err(StorageError::s3("GetObject", &key, err));
        }
    };

    let etag = resp.e_tag().unwrap_or_default().to_string();
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::s3("GetObject", &key, e))?
        .into_bytes();
    let record: ChecklistRecord = serde_json::from_slice(&body)?;

    Ok(Some(StoredRecord { record, etag }))
}

/// Write a record under the given mode. Returns the new ETag, or
/// `StorageError::PreconditionFailed` if another writer got there first.
pub async fn save_record(
    client: &Client,
    bucket: &str,
    record: &ChecklistRecord,
    mode: WriteMode<'_>,
) -> Result<String, StorageError> {
    let key = s3_keys::checklist_record(record.client_id, &record.checklist_id)?;
    let body = serde_json::to_vec_pretty(record)?;

    let req = client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .content_type("application/json")
        .body(ByteStream::from(body));
    let req = match mode {
        WriteMode::Create => req.if_none_match("*"),
        WriteMode::Replace { etag } => req.if_match(etag),
    };

    let resp = req.send().await.map_err(|e| {
        let status = e.raw_response().map(|raw| raw.status().as_u16());
        if status.is_some_and(is_write_conflict) {
            tracing::warn!(key = %key, ?mode, "conditional record write refused");
            StorageError::PreconditionFailed { key: key.clone() }
        } else {
            StorageError::s3("PutObject", &key, e.into_service_error())
        }
    })?;

    tracing::info!(
        client_id = %record.client_id,
        checklist_id = %record.checklist_id,
        values = record.values.len(),
        created = matches!(mode, WriteMode::Create),
        "checklist record saved"
    );
    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Checklist ids with a saved record for `client_id`.
pub async fn list_client_checklists(
    client: &Client,
    bucket: &str,
    client_id: Uuid,
) -> Result<Vec<String>, StorageError> {
    let prefix = s3_keys::client_checklists_prefix(client_id);
    let mut pages = client
        .list_objects_v2()
        .bucket(bucket)
        .prefix(&prefix)
        .into_paginator()
        .send();

    let mut ids = Vec::new();
    while let Some(page) = pages.next().await {
        let page =
            page.map_err(|e| StorageError::s3("ListObjectsV2", &prefix, e.into_service_error()))?;
        ids.extend(
            page.contents()
                .iter()
                .filter_map(|obj| obj.key())
                .filter_map(|key| key.strip_prefix(prefix.as_str())?.strip_suffix(".json"))
                .map(str::to_string),
        );
    }
    Ok(ids)
}

/// Remove a saved record. Deleting a missing record is not an error.
pub async fn delete_record(
    client: &Client,
    bucket: &str,
    client_id: Uuid,
    checklist_id: &str,
) -> Result<(), StorageError> {
    let key = s3_keys::checklist_record(client_id, checklist_id)?;
    client
        .delete_object()
        .bucket(bucket)
        .key(&key)
        .send()
        .await
        .map_err(|e| StorageError::s3("DeleteObject", &key, e.into_service_error()))?;

    tracing::info!(%client_id, checklist_id, "checklist record deleted");
    Ok(())
}
