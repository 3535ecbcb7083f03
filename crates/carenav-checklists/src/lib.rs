//! carenav-checklists
//!
//! Checklist schemas and the visibility engine that drives them. Pure data
//! and pure functions; no AWS dependency. Schemas ship as JSON data files
//! and are validated when a registry loads them.

pub mod engine;
pub mod error;
pub mod index;
pub mod registry;
pub mod render;
pub mod validate;

pub use engine::{
    apply_change, collect_descendant_ids, default_values, is_visible, on_checkbox_toggle,
    on_radio_select,
};
pub use error::ChecklistError;
pub use index::FieldIndex;
pub use registry::ChecklistRegistry;
