//! Identifier mapping
//!
//! Maps `<identifier>` elements (and their name- and record-level
//! cousins) through the type vocabulary. A type that resolves to a URI
//! scheme contributes a source URI, a source-code type contributes a
//! source code, and the special `uri` type moves the text into the
//! value's own uri field.

use crate::models::{DescriptiveValue, Source, ValueContent};
use crate::xml::Element;

use super::identifier_type::{self, IdentifierType};
use super::{alt_rep_group, presence};

/// Map the resource-level identifiers, clustering alternate
/// representations into parallelValues.
pub(crate) fn build(resource: &Element) -> Vec<DescriptiveValue> {
    let nodes = resource.children_named("identifier");
    let (groups, others) = alt_rep_group::split(&nodes);
    let mut identifiers: Vec<DescriptiveValue> = others
        .iter()
        .filter_map(|node| identifier_value(node))
        .collect();
    for group in groups {
        let members: Vec<DescriptiveValue> = group
            .iter()
            .filter_map(|node| identifier_value(node))
            .collect();
        match members.len() {
            0 => {}
            1 => identifiers.extend(members),
            _ => identifiers.push(DescriptiveValue::parallel(members)),
        }
    }
    identifiers
}

/// Map a `<nameIdentifier>` belonging to a name.
pub(crate) fn name_identifier_value(node: &Element) -> Option<DescriptiveValue> {
    identifier_value(node)
}

/// Map a `<recordIdentifier>`, whose kind lives in `source` rather
/// than `type`.
pub(crate) fn record_identifier_value(node: &Element) -> Option<DescriptiveValue> {
    let text = node.value()?;
    Some(DescriptiveValue {
        content: Some(ValueContent::Value(text)),
        type_: node.attribute("source").and_then(presence),
        ..Default::default()
    })
}

fn identifier_value(node: &Element) -> Option<DescriptiveValue> {
    let text = node.value();
    let raw_type = node.attribute("type").and_then(presence);
    let mut value = match raw_type {
        None => DescriptiveValue {
            content: text.map(ValueContent::Value),
            ..Default::default()
        },
        Some(raw) => match identifier_type::lookup(&raw) {
            IdentifierType::Known { type_name } if type_name == "uri" => DescriptiveValue {
                uri: text,
                ..Default::default()
            },
            IdentifierType::Scheme { type_name, uri } => DescriptiveValue {
                content: text.map(ValueContent::Value),
                type_: Some(type_name.to_string()),
                source: Some(Source {
                    uri: Some(uri.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            IdentifierType::Code { type_name } => DescriptiveValue {
                content: text.map(ValueContent::Value),
                type_: Some(type_name.to_string()),
                source: Some(Source {
                    code: Some(type_name.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            IdentifierType::Known { type_name } => DescriptiveValue {
                content: text.map(ValueContent::Value),
                type_: Some(type_name.to_string()),
                ..Default::default()
            },
            IdentifierType::Unknown => DescriptiveValue {
                content: text.map(ValueContent::Value),
                type_: Some(raw),
                ..Default::default()
            },
        },
    };
    value.display_label = node.attribute("displayLabel").and_then(presence);
    if node.attribute("invalid") == Some("yes") {
        value.status = Some("invalid".to_string());
    }
    // type and source alone do not make an identifier
    if value.content.is_none() && value.uri.is_none() {
        return None;
    }
    Some(value)
}
