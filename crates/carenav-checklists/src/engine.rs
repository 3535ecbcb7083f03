//! Checklist visibility and cascade-clear rules.
//!
//! Every function here is pure: visibility is recomputed from the value map
//! on each call, and value changes return a new map instead of mutating the
//! caller's. Schema inconsistencies never raise. A dangling parent reads as
//! visible and a cycle reads as "no further descendants", so a broken schema
//! over-shows fields rather than hiding them.

use std::collections::BTreeSet;

use carenav_core::models::field::{FieldDefinition, FieldType};
use carenav_core::models::values::{FieldValue, FormValueMap};
use tracing::{debug, warn};

use crate::error::ChecklistError;
use crate::index::FieldIndex;

/// Whether `field` should currently be shown.
///
/// Root fields are always visible. Otherwise the answer depends on the
/// parent's type:
///
/// - `checkbox`: the parent's value is truthy.
/// - `radio`: the parent's value equals `field.parent_option`, or, when the
///   field declares no option, the parent has any value at all.
/// - `group`: the group itself is visible, checked transitively.
/// - anything else, or a parent that cannot be found: visible.
pub fn is_visible(field: &FieldDefinition, values: &FormValueMap, index: &FieldIndex<'_>) -> bool {
    let mut current = field;
    let mut hops = 0usize;

    loop {
        let Some(parent_id) = current.parent_id.as_deref() else {
            return true;
        };
        let Some(parent) = index.get(parent_id) else {
            debug!(field = %current.id, parent = %parent_id, "parent not in schema, showing field");
            return true;
        };

        match parent.field_type {
            FieldType::Checkbox => {
                return values.get(&parent.id).is_some_and(FieldValue::is_truthy);
            }
            FieldType::Radio => {
                let selected = values.get(&parent.id);
                return match current.parent_option.as_deref() {
                    Some(option) => selected.and_then(FieldValue::as_str) == Some(option),
                    None => selected.is_some(),
                };
            }
            FieldType::Group => {
                // A chain longer than the schema must revisit a field.
                hops += 1;
                if hops > index.len() {
                    warn!(field = %field.id, "group cycle while resolving visibility, showing field");
                    return true;
                }
                current = parent;
            }
            FieldType::Link | FieldType::Heading => return true,
        }
    }
}

/// Every field below `field_id` in the parent tree, excluding `field_id`
/// itself.
pub fn collect_descendant_ids<'a>(field_id: &str, index: &FieldIndex<'a>) -> BTreeSet<&'a str> {
    let mut found = BTreeSet::new();
    let mut pending: Vec<&'a FieldDefinition> = index.children(field_id).collect();

    while let Some(field) = pending.pop() {
        if field.id == field_id || !found.insert(field.id.as_str()) {
            warn!(root = %field_id, field = %field.id, "field revisited while collecting descendants");
            continue;
        }
        pending.extend(index.children(&field.id));
    }

    found
}

/// Record a checkbox change. Unchecking removes every descendant's value so
/// the subtree comes back empty if it is shown again.
pub fn on_checkbox_toggle(
    field: &FieldDefinition,
    checked: bool,
    values: &FormValueMap,
    index: &FieldIndex<'_>,
) -> FormValueMap {
    let mut next = values.clone();
    next.insert(field.id.clone(), checked);
    if !checked {
        clear_descendants(&field.id, &mut next, index);
    }
    next
}

/// Record a radio selection. Descendants are always cleared: a different
/// option may reveal a different branch, and answers from the old branch
/// must not survive.
pub fn on_radio_select(
    field: &FieldDefinition,
    selected: impl Into<String>,
    values: &FormValueMap,
    index: &FieldIndex<'_>,
) -> FormValueMap {
    let mut next = values.clone();
    next.insert(field.id.clone(), FieldValue::Text(selected.into()));
    clear_descendants(&field.id, &mut next, index);
    next
}

/// Route a value change for `field_id` to the matching handler.
///
/// Unlike the handlers themselves this can fail, since the request names
/// the field and value shape from outside.
pub fn apply_change(
    index: &FieldIndex<'_>,
    checklist_id: &str,
    field_id: &str,
    value: FieldValue,
    values: &FormValueMap,
) -> Result<FormValueMap, ChecklistError> {
    let field = index
        .get(field_id)
        .ok_or_else(|| ChecklistError::UnknownField {
            checklist_id: checklist_id.to_string(),
            field_id: field_id.to_string(),
        })?;

    match (field.field_type, value) {
        (FieldType::Checkbox, FieldValue::Bool(checked)) => {
            Ok(on_checkbox_toggle(field, checked, values, index))
        }
        (FieldType::Radio, FieldValue::Text(selected)) => {
            Ok(on_radio_select(field, selected, values, index))
        }
        (FieldType::Checkbox, _) => Err(ChecklistError::ValueMismatch {
            field_id: field_id.to_string(),
            expected: "boolean",
        }),
        (FieldType::Radio, _) => Err(ChecklistError::ValueMismatch {
            field_id: field_id.to_string(),
            expected: "string",
        }),
        (field_type, _) => Err(ChecklistError::NotInteractive {
            field_id: field_id.to_string(),
            field_type,
        }),
    }
}

/// Initial values for a fresh record: every declared `default_value`.
pub fn default_values(index: &FieldIndex<'_>) -> FormValueMap {
    index
        .fields()
        .iter()
        .filter_map(|field| {
            field
                .default_value
                .clone()
                .map(|value| (field.id.clone(), value))
        })
        .collect()
}

fn clear_descendants(field_id: &str, values: &mut FormValueMap, index: &FieldIndex<'_>) {
    let mut cleared = 0usize;
    for id in collect_descendant_ids(field_id, index) {
        if values.remove(id).is_some() {
            cleared += 1;
        }
    }
    if cleared > 0 {
        debug!(field = %field_id, cleared, "cleared descendant values");
    }
}
