use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, warn};

use carenav_core::models::schema::{ChecklistSchema, ChecklistSummary};

use crate::error::ChecklistError;
use crate::index::FieldIndex;
use crate::validate::validate_schema;

/// Schemas compiled into the crate, by file name.
const EMBEDDED: &[(&str, &str)] = &[
    (
        "care_recipient.json",
        include_str!("../schemas/care_recipient.json"),
    ),
    ("caregiver.json", include_str!("../schemas/caregiver.json")),
    ("face_sheet.json", include_str!("../schemas/face_sheet.json")),
    ("move_in.json", include_str!("../schemas/move_in.json")),
];

/// The set of checklist types available to the application, keyed by
/// checklist id. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct ChecklistRegistry {
    checklists: BTreeMap<String, ChecklistSchema>,
}

impl ChecklistRegistry {
    /// Load the schemas that ship with this crate.
    pub fn embedded() -> Result<Self, ChecklistError> {
        let schemas = EMBEDDED
            .iter()
            .map(|(name, json)| parse_schema(name, json))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_schemas(schemas)
    }

    /// Load every `*.json` file in `dir`, in file name order.
    pub fn from_dir(dir: &Path) -> Result<Self, ChecklistError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut schemas = Vec::with_capacity(paths.len());
        for path in &paths {
            let json = std::fs::read_to_string(path)?;
            schemas.push(parse_schema(&path.display().to_string(), &json)?);
        }

        info!(dir = %dir.display(), count = schemas.len(), "checklist schemas loaded");
        Self::from_schemas(schemas)
    }

    /// Validate and register already-parsed schemas.
    pub fn from_schemas(
        schemas: impl IntoIterator<Item = ChecklistSchema>,
    ) -> Result<Self, ChecklistError> {
        let mut checklists = BTreeMap::new();
        for schema in schemas {
            check_schema(&schema)?;
            if checklists.contains_key(&schema.id) {
                return Err(ChecklistError::DuplicateChecklist(schema.id));
            }
            checklists.insert(schema.id.clone(), schema);
        }
        Ok(Self { checklists })
    }

    pub fn get(&self, id: &str) -> Result<&ChecklistSchema, ChecklistError> {
        self.checklists
            .get(id)
            .ok_or_else(|| ChecklistError::UnknownChecklist(id.to_string()))
    }

    /// Schema and a fresh field index for it, ready for the engine.
    pub fn indexed(&self, id: &str) -> Result<(&ChecklistSchema, FieldIndex<'_>), ChecklistError> {
        let schema = self.get(id)?;
        Ok((schema, FieldIndex::new(&schema.fields)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.checklists.contains_key(id)
    }

    pub fn list(&self) -> Vec<ChecklistSummary> {
        self.checklists.values().map(ChecklistSchema::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.checklists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checklists.is_empty()
    }
}

fn parse_schema(source_name: &str, json: &str) -> Result<ChecklistSchema, ChecklistError> {
    serde_json::from_str(json).map_err(|source| ChecklistError::Parse {
        source_name: source_name.to_string(),
        source,
    })
}

/// Refuse schemas whose tree is broken; log everything else.
fn check_schema(schema: &ChecklistSchema) -> Result<(), ChecklistError> {
    let (structural, minor): (Vec<_>, Vec<_>) = validate_schema(schema)
        .into_iter()
        .partition(|issue| issue.is_structural());

    for issue in &minor {
        warn!(checklist = %schema.id, %issue, "checklist schema issue");
    }

    if !structural.is_empty() {
        return Err(ChecklistError::InvalidSchema {
            checklist_id: schema.id.clone(),
            issues: structural,
        });
    }
    Ok(())
}
