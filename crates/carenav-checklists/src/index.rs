use std::collections::HashMap;

use carenav_core::models::field::FieldDefinition;

/// Lookup tables over a flat field list: `id -> field` and
/// `parent_id -> children`, both built in one pass.
///
/// Children keep schema order. If an id is declared twice, lookups resolve
/// to the first declaration.
pub struct FieldIndex<'a> {
    fields: &'a [FieldDefinition],
    by_id: HashMap<&'a str, usize>,
    children: HashMap<&'a str, Vec<usize>>,
}

impl<'a> FieldIndex<'a> {
    pub fn new(fields: &'a [FieldDefinition]) -> Self {
        let mut by_id = HashMap::with_capacity(fields.len());
        let mut children: HashMap<&'a str, Vec<usize>> = HashMap::new();

        for (slot, field) in fields.iter().enumerate() {
            by_id.entry(field.id.as_str()).or_insert(slot);
            if let Some(parent_id) = field.parent_id.as_deref() {
                children.entry(parent_id).or_default().push(slot);
            }
        }

        Self {
            fields,
            by_id,
            children,
        }
    }

    pub fn fields(&self) -> &'a [FieldDefinition] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&'a FieldDefinition> {
        self.by_id.get(id).map(|&slot| &self.fields[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Direct children of `parent_id`, in schema order.
    pub fn children<'s>(
        &'s self,
        parent_id: &str,
    ) -> impl Iterator<Item = &'a FieldDefinition> + use<'a, 's> {
        let fields = self.fields;
        self.children
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&slot| &fields[slot])
    }

    /// Fields that start a tree: no parent, or a parent id that does not
    /// resolve. The latter are treated as roots so they still render.
    pub fn roots<'s>(&'s self) -> impl Iterator<Item = &'a FieldDefinition> + use<'a, 's> {
        self.fields.iter().filter(move |field| match field.parent_id.as_deref() {
            None => true,
            Some(parent_id) => !self.by_id.contains_key(parent_id),
        })
    }
}
