//! Visible-tree construction for the rendering layer.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use carenav_core::models::field::{FieldDefinition, FieldType};
use carenav_core::models::schema::Heading;
use carenav_core::models::values::{FieldValue, FormValueMap};

use crate::engine::is_visible;
use crate::index::FieldIndex;

/// A piece of a `link` label: plain text or a URL to render as a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum LabelSegment {
    Text { text: String },
    Url { href: String },
}

/// One visible field with its visible children.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct RenderNode {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<LabelSegment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub value: Option<FieldValue>,
    pub children: Vec<RenderNode>,
}

/// Root fields under one heading. Roots without a known heading land in a
/// trailing section with no heading.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct Section {
    pub heading_id: Option<String>,
    pub title: Option<String>,
    pub nodes: Vec<RenderNode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Completion {
    /// Visible checkbox and radio fields.
    pub answerable: usize,
    /// Of those, how many hold a value.
    pub answered: usize,
}

/// Group the visible forest into heading sections, in heading order.
pub fn visible_sections(
    headings: &[Heading],
    index: &FieldIndex<'_>,
    values: &FormValueMap,
) -> Vec<Section> {
    let slot_of: HashMap<&str, usize> = headings
        .iter()
        .enumerate()
        .map(|(slot, heading)| (heading.id.as_str(), slot))
        .collect();

    let mut sections: Vec<Section> = headings
        .iter()
        .map(|heading| Section {
            heading_id: Some(heading.id.clone()),
            title: Some(heading.title.clone()),
            nodes: Vec::new(),
        })
        .collect();
    let mut unsectioned = Vec::new();

    for root in index.roots() {
        if !is_visible(root, values, index) {
            continue;
        }
        let mut path = vec![root.id.as_str()];
        let node = build_node(root, index, values, &mut path);
        match root
            .heading_id
            .as_deref()
            .and_then(|id| slot_of.get(id))
        {
            Some(&slot) => sections[slot].nodes.push(node),
            None => unsectioned.push(node),
        }
    }

    if !unsectioned.is_empty() {
        sections.push(Section {
            heading_id: None,
            title: None,
            nodes: unsectioned,
        });
    }
    sections
}

/// Ids of every field that is currently visible, in schema order.
pub fn visible_ids<'a>(index: &FieldIndex<'a>, values: &FormValueMap) -> Vec<&'a str> {
    index
        .fields()
        .iter()
        .filter(|field| is_visible(field, values, index))
        .map(|field| field.id.as_str())
        .collect()
}

pub fn completion(index: &FieldIndex<'_>, values: &FormValueMap) -> Completion {
    index
        .fields()
        .iter()
        .filter(|field| field.field_type.is_interactive() && is_visible(field, values, index))
        .fold(Completion::default(), |mut acc, field| {
            acc.answerable += 1;
            if values.contains_key(&field.id) {
                acc.answered += 1;
            }
            acc
        })
}

// Compile-time constant pattern. Full-width punctuation never belongs to a
// URL, so it ends the match.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^\s<>。、，．！？：；（）「」『』【】]+").expect("valid URL pattern")
});

/// Split a label on the raw `http(s)://` URLs it contains. Trailing
/// sentence punctuation after a URL stays with the text.
pub fn parse_link_label(label: &str) -> Vec<LabelSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in URL_PATTERN.find_iter(label) {
        let href = trim_url(found.as_str());
        if href.ends_with("://") {
            continue;
        }
        let start = found.start();
        let end = start + href.len();
        if start > cursor {
            segments.push(LabelSegment::Text {
                text: label[cursor..start].to_string(),
            });
        }
        segments.push(LabelSegment::Url {
            href: href.to_string(),
        });
        cursor = end;
    }

    if cursor < label.len() {
        segments.push(LabelSegment::Text {
            text: label[cursor..].to_string(),
        });
    }
    segments
}

/// Drop trailing sentence punctuation from a matched URL. A closing bracket
/// is kept when it balances an opening one inside the URL, as in
/// `https://en.wikipedia.org/wiki/Foo_(bar)`.
fn trim_url(candidate: &str) -> &str {
    let mut url = candidate;
    while let Some(last) = url.chars().next_back() {
        let strip = match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '\'' | '"' => true,
            ')' => unbalanced(url, '(', ')'),
            ']' => unbalanced(url, '[', ']'),
            _ => false,
        };
        if !strip {
            break;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
    url
}

fn unbalanced(url: &str, open: char, close: char) -> bool {
    url.matches(close).count() > url.matches(open).count()
}

fn build_node<'a>(
    field: &'a FieldDefinition,
    index: &FieldIndex<'a>,
    values: &FormValueMap,
    path: &mut Vec<&'a str>,
) -> RenderNode {
    let mut children = Vec::new();
    for child in index.children(&field.id) {
        // Duplicate ids can make a field its own descendant.
        if path.contains(&child.id.as_str()) || !is_visible(child, values, index) {
            continue;
        }
        path.push(child.id.as_str());
        children.push(build_node(child, index, values, path));
        path.pop();
    }

    let segments = if field.field_type == FieldType::Link {
        parse_link_label(&field.label)
    } else {
        Vec::new()
    };

    RenderNode {
        id: field.id.clone(),
        field_type: field.field_type,
        label: field.label.clone(),
        segments,
        options: field.options.clone(),
        value: values.get(&field.id).cloned(),
        children,
    }
}
