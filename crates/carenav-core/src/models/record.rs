use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::values::FormValueMap;

/// The saved answers of one checklist for one client.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChecklistRecord {
    pub client_id: Uuid,
    pub checklist_id: String,
    /// Version of the schema the values were entered against.
    pub schema_version: u32,
    #[ts(type = "Record<string, boolean | string>")]
    pub values: FormValueMap,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl ChecklistRecord {
    pub fn new(
        client_id: Uuid,
        checklist_id: impl Into<String>,
        schema_version: u32,
        values: FormValueMap,
    ) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            client_id,
            checklist_id: checklist_id.into(),
            schema_version,
            values,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored values and bump `updated_at`.
    pub fn update_values(&mut self, values: FormValueMap, schema_version: u32) {
        self.values = values;
        self.schema_version = schema_version;
        self.updated_at = jiff::Timestamp::now();
    }
}
