use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use carenav_checklists::apply_change;
use carenav_checklists::render::{Completion, Section, completion, visible_ids, visible_sections};
use carenav_core::models::schema::{ChecklistSchema, ChecklistSummary};
use carenav_core::models::values::{FieldValue, FormValueMap};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    values: FormValueMap,
}

#[derive(Serialize)]
pub struct EvaluateResponse {
    visible_ids: Vec<String>,
    sections: Vec<Section>,
    completion: Completion,
}

#[derive(Deserialize)]
pub struct ChangeRequest {
    #[serde(default)]
    values: FormValueMap,
    value: FieldValue,
}

#[derive(Serialize)]
pub struct ChangeResponse {
    values: FormValueMap,
    visible_ids: Vec<String>,
}

pub async fn list_checklists(State(state): State<AppState>) -> Json<Vec<ChecklistSummary>> {
    Json(state.registry.list())
}

pub async fn get_checklist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChecklistSchema>, ApiError> {
    Ok(Json(state.registry.get(&id)?.clone()))
}

pub async fn evaluate_checklist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let (schema, index) = state.registry.indexed(&id)?;

    Ok(Json(EvaluateResponse {
        visible_ids: owned(visible_ids(&index, &req.values)),
        sections: visible_sections(&schema.headings, &index, &req.values),
        completion: completion(&index, &req.values),
    }))
}

pub async fn change_field(
    State(state): State<AppState>,
    Path((id, field_id)): Path<(String, String)>,
    Json(req): Json<ChangeRequest>,
) -> Result<Json<ChangeResponse>, ApiError> {
    let (_, index) = state.registry.indexed(&id)?;
    let values = apply_change(&index, &id, &field_id, req.value, &req.values)?;
    let visible = owned(visible_ids(&index, &values));

    tracing::debug!(checklist = %id, field = %field_id, "field change applied");
    Ok(Json(ChangeResponse {
        values,
        visible_ids: visible,
    }))
}

fn owned(ids: Vec<&str>) -> Vec<String> {
    ids.into_iter().map(str::to_string).collect()
}
