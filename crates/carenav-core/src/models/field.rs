use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::values::FieldValue;

/// The closed set of field kinds a checklist schema may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FieldType {
    /// Container whose children inherit its visibility.
    Group,
    /// Boolean toggle. Children show while it is checked.
    Checkbox,
    /// Single choice among `options`. Children show per `parent_option`.
    Radio,
    /// Static text; raw URLs in the label are rendered as links.
    Link,
    /// Static sub-heading inside a section.
    Heading,
}

impl FieldType {
    /// Whether the user can set a value on this kind of field.
    pub fn is_interactive(self) -> bool {
        matches!(self, FieldType::Checkbox | FieldType::Radio)
    }
}

/// One entry in a checklist schema. Parent references form an implicit
/// forest over the flat field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    /// For children of a radio: the option that reveals this field. Absent
    /// means any selection reveals it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_option: Option<String>,
    /// Display section for root fields. Not part of the visibility tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
}

impl FieldDefinition {
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            parent_id: None,
            parent_option: None,
            heading_id: None,
            options: Vec::new(),
            default_value: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_parent_option(mut self, option: impl Into<String>) -> Self {
        self.parent_option = Some(option.into());
        self
    }

    pub fn with_heading(mut self, heading_id: impl Into<String>) -> Self {
        self.heading_id = Some(heading_id.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
