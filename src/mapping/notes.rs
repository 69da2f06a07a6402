//! Note mapping
//!
//! `<note>`, `<abstract>`, `<tableOfContents>` and `<targetAudience>`
//! all land in the note array. Contact notes are left for the access
//! builder. An abstract only gets the default type when it carries
//! neither a type nor a display label of its own.

use crate::models::{DescriptiveValue, ValueContent};
use crate::notifier::Notifier;
use crate::xml::Element;

use super::{alt_rep_group, authority, language_script, presence, value_uri};

const NOTE_ELEMENTS: [&str; 4] = ["note", "abstract", "tableOfContents", "targetAudience"];

pub(crate) fn build(resource: &Element, notifier: &Notifier) -> Vec<DescriptiveValue> {
    let nodes: Vec<&Element> = resource
        .child_elements()
        .filter(|el| NOTE_ELEMENTS.contains(&el.name.as_str()))
        .filter(|el| !(el.name == "note" && el.attribute("type") == Some("contact")))
        .collect();
    let (groups, others) = alt_rep_group::split(&nodes);
    let mut notes = Vec::new();
    for &node in &others {
        notes.extend(note_value(node, notifier));
    }
    for group in groups {
        let mut members: Vec<DescriptiveValue> = group
            .iter()
            .filter_map(|&node| note_value(node, notifier))
            .collect();
        match members.len() {
            0 => {}
            1 => notes.extend(members.pop()),
            _ => {
                let shared = members[0].type_.clone().filter(|kind| {
                    members
                        .iter()
                        .all(|member| member.type_.as_deref() == Some(kind.as_str()))
                });
                if shared.is_some() {
                    for member in &mut members {
                        member.type_ = None;
                    }
                }
                notes.push(DescriptiveValue {
                    content: Some(ValueContent::ParallelValue(members)),
                    type_: shared,
                    ..Default::default()
                });
            }
        }
    }
    notes
}

fn note_value(node: &Element, notifier: &Notifier) -> Option<DescriptiveValue> {
    let text = node.value()?;
    let mut note = DescriptiveValue::value(text);
    note.type_ = note_type(node);
    note.display_label = node.attribute("displayLabel").and_then(presence);
    note.uri = value_uri::uri_for(node, notifier);
    note.source = authority::source_for(node, notifier);
    note.value_language = language_script::build(node);
    Some(note)
}

fn note_type(node: &Element) -> Option<String> {
    match node.name.as_str() {
        "abstract" => {
            if let Some(kind) = node.attribute("type").and_then(presence) {
                return Some(kind);
            }
            if node.has_attribute("displayLabel") {
                return None;
            }
            Some("abstract".to_string())
        }
        "tableOfContents" => Some("table of contents".to_string()),
        "targetAudience" => Some("target audience".to_string()),
        _ => node.attribute("type").and_then(presence),
    }
}
