use thiserror::Error;

use carenav_core::models::field::FieldType;

use crate::validate::SchemaIssue;

#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("unknown checklist: {0}")]
    UnknownChecklist(String),

    #[error("duplicate checklist id: {0}")]
    DuplicateChecklist(String),

    #[error("unknown field '{field_id}' in checklist '{checklist_id}'")]
    UnknownField {
        checklist_id: String,
        field_id: String,
    },

    #[error("field '{field_id}' is a {field_type:?} and cannot hold a value")]
    NotInteractive {
        field_id: String,
        field_type: FieldType,
    },

    #[error("field '{field_id}' expects a {expected} value")]
    ValueMismatch {
        field_id: String,
        expected: &'static str,
    },

    #[error("checklist '{checklist_id}' is invalid: {}", summarize(.issues))]
    InvalidSchema {
        checklist_id: String,
        issues: Vec<SchemaIssue>,
    },

    #[error("failed to parse checklist {source_name}: {source}")]
    Parse {
        source_name: String,
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn summarize(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
