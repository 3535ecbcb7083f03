use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use carenav_core::models::field::{FieldDefinition, FieldType};
use carenav_core::models::schema::ChecklistSchema;

/// A problem found in a hand-authored checklist schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum SchemaIssue {
    #[error("field id '{id}' is declared more than once")]
    DuplicateId { id: String },

    #[error("field '{id}' references missing parent '{parent_id}'")]
    DanglingParent { id: String, parent_id: String },

    #[error("field '{id}' is its own parent")]
    SelfParent { id: String },

    #[error("parent cycle through fields {ids:?}")]
    Cycle { ids: Vec<String> },

    #[error("field '{id}' declares a parent option but parent '{parent_id}' is not a radio")]
    OptionWithoutRadioParent { id: String, parent_id: String },

    #[error("field '{id}' expects option '{option}' which radio '{parent_id}' does not offer")]
    UnknownParentOption {
        id: String,
        parent_id: String,
        option: String,
    },

    #[error("radio '{id}' has no options")]
    RadioWithoutOptions { id: String },

    #[error("field '{id}' references missing heading '{heading_id}'")]
    UnknownHeading { id: String, heading_id: String },
}

impl SchemaIssue {
    /// Structural issues break the tree itself. Schemas carrying any of them
    /// are refused at load time; the rest are only reported.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            SchemaIssue::DuplicateId { .. }
                | SchemaIssue::DanglingParent { .. }
                | SchemaIssue::SelfParent { .. }
                | SchemaIssue::Cycle { .. }
        )
    }
}

/// Check a schema against the tree invariants: unique ids, resolvable
/// parents, no cycles, consistent radio options and headings.
pub fn validate_schema(schema: &ChecklistSchema) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();

    // First declaration wins, same as `FieldIndex`.
    let mut by_id: HashMap<&str, &FieldDefinition> = HashMap::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match by_id.entry(field.id.as_str()) {
            Entry::Occupied(_) => issues.push(SchemaIssue::DuplicateId {
                id: field.id.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(field);
            }
        }
    }

    let headings: HashSet<&str> = schema.headings.iter().map(|h| h.id.as_str()).collect();

    for field in &schema.fields {
        if field.field_type == FieldType::Radio && field.options.is_empty() {
            issues.push(SchemaIssue::RadioWithoutOptions {
                id: field.id.clone(),
            });
        }

        if let Some(heading_id) = field.heading_id.as_deref()
            && !headings.contains(heading_id)
        {
            issues.push(SchemaIssue::UnknownHeading {
                id: field.id.clone(),
                heading_id: heading_id.to_string(),
            });
        }

        let Some(parent_id) = field.parent_id.as_deref() else {
            continue;
        };
        if parent_id == field.id {
            issues.push(SchemaIssue::SelfParent {
                id: field.id.clone(),
            });
            continue;
        }
        let Some(parent) = by_id.get(parent_id) else {
            issues.push(SchemaIssue::DanglingParent {
                id: field.id.clone(),
                parent_id: parent_id.to_string(),
            });
            continue;
        };

        if let Some(option) = field.parent_option.as_deref() {
            if parent.field_type != FieldType::Radio {
                issues.push(SchemaIssue::OptionWithoutRadioParent {
                    id: field.id.clone(),
                    parent_id: parent_id.to_string(),
                });
            } else if !parent.options.iter().any(|o| o == option) {
                issues.push(SchemaIssue::UnknownParentOption {
                    id: field.id.clone(),
                    parent_id: parent_id.to_string(),
                    option: option.to_string(),
                });
            }
        }
    }

    issues.extend(
        find_cycles(schema, &by_id)
            .into_iter()
            .map(|ids| SchemaIssue::Cycle { ids }),
    );

    issues
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Walk {
    Active,
    Done,
}

/// Each field has at most one parent, so following parent links from every
/// field finds each cycle exactly once. Self-parents are reported
/// separately and skipped here.
fn find_cycles<'a>(
    schema: &'a ChecklistSchema,
    by_id: &HashMap<&'a str, &'a FieldDefinition>,
) -> Vec<Vec<String>> {
    let mut state: HashMap<&'a str, Walk> = HashMap::new();
    let mut cycles = Vec::new();

    for start in &schema.fields {
        let mut path: Vec<&'a str> = Vec::new();
        let mut cursor = Some(start.id.as_str());

        while let Some(id) = cursor {
            match state.get(id) {
                Some(Walk::Done) => break,
                Some(Walk::Active) => {
                    if let Some(pos) = path.iter().position(|p| *p == id)
                        && path.len() - pos > 1
                    {
                        cycles.push(path[pos..].iter().map(|s| s.to_string()).collect());
                    }
                    break;
                }
                None => {
                    state.insert(id, Walk::Active);
                    path.push(id);
                    cursor = by_id.get(id).and_then(|f| f.parent_id.as_deref());
                }
            }
        }

        for id in path {
            state.insert(id, Walk::Done);
        }
    }

    cycles
}
