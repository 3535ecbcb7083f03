use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carenav_checklists::{FieldIndex, default_values};
use carenav_core::models::record::ChecklistRecord;
use carenav_core::models::values::FormValueMap;
use carenav_storage::records;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct RecordResponse {
    record: ChecklistRecord,
    /// `None` until the record has been saved once.
    etag: Option<String>,
}

#[derive(Deserialize)]
pub struct SaveRecordRequest {
    values: FormValueMap,
    /// ETag from the last load, `None` if the load found no saved record.
    /// The save fails with 412 if the stored record changed in between.
    #[serde(default)]
    etag: Option<String>,
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<String>>, ApiError> {
    let ids = records::list_client_checklists(&state.s3, &state.bucket, client_id).await?;
    Ok(Json(ids))
}

/// Saved record for the client, or a fresh one seeded from schema defaults.
pub async fn get_record(
    State(state): State<AppState>,
    Path((client_id, checklist_id)): Path<(Uuid, String)>,
) -> Result<Json<RecordResponse>, ApiError> {
    let schema = state.registry.get(&checklist_id)?;

    let response =
        match records::load_record(&state.s3, &state.bucket, client_id, &checklist_id).await? {
            Some(stored) => RecordResponse {
                record: stored.record,
                etag: Some(stored.etag),
            },
            None => {
                let index = FieldIndex::new(&schema.fields);
                RecordResponse {
                    record: ChecklistRecord::new(
                        client_id,
                        checklist_id,
                        schema.version,
                        default_values(&index),
                    ),
                    etag: None,
                }
            }
        };

    Ok(Json(response))
}

pub async fn save_record(
    State(state): State<AppState>,
    Path((client_id, checklist_id)): Path<(Uuid, String)>,
    Json(req): Json<SaveRecordRequest>,
) -> Result<Json<RecordResponse>, ApiError> {
    let schema = state.registry.get(&checklist_id)?;

    let existing = records::load_record(&state.s3, &state.bucket, client_id, &checklist_id).await?;
    let mode = records::write_mode(existing.is_some(), req.etag.as_deref()).ok_or_else(|| {
        ApiError::PreconditionFailed(format!(
            "checklist record {checklist_id} for client {client_id} changed since it was loaded"
        ))
    })?;

    let record = match existing {
        Some(stored) => {
            let mut record = stored.record;
            record.update_values(req.values, schema.version);
            record
        }
        None => ChecklistRecord::new(client_id, checklist_id, schema.version, req.values),
    };

    let etag = records::save_record(&state.s3, &state.bucket, &record, mode).await?;

    Ok(Json(RecordResponse {
        record,
        etag: Some(etag),
    }))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path((client_id, checklist_id)): Path<(Uuid, String)>,
) -> Result<Json<()>, ApiError> {
    state.registry.get(&checklist_id)?;
    records::delete_record(&state.s3, &state.bucket, client_id, &checklist_id).await?;
    Ok(Json(()))
}
