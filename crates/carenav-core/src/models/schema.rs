use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::field::FieldDefinition;

/// A display section that root fields attach to via `heading_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Heading {
    pub id: String,
    pub title: String,
}

/// The static, ordered structure of one checklist type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChecklistSchema {
    pub id: String,
    pub name: String,
    pub version: u32,
    #[serde(default)]
    pub headings: Vec<Heading>,
    pub fields: Vec<FieldDefinition>,
}

impl ChecklistSchema {
    pub fn summary(&self) -> ChecklistSummary {
        ChecklistSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            version: self.version,
            field_count: self.fields.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChecklistSummary {
    pub id: String,
    pub name: String,
    pub version: u32,
    pub field_count: usize,
}
